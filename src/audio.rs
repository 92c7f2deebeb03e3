use std::io::{self, Write};

use tracing::debug;

use crate::game::GameEvent;

/// Discrete sound cues a host may play.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AudioCue {
    TargetConsumed,
    GameOver,
}

impl AudioCue {
    /// Maps a simulation event to its cue, if it has one.
    #[must_use]
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::TargetConsumed { .. } => Some(Self::TargetConsumed),
            GameEvent::GameOver(_) => Some(Self::GameOver),
            GameEvent::NewHighScore(_) | GameEvent::GridFilled => None,
        }
    }
}

/// Anything that can play cues. Playback failures stay inside the sink.
pub trait CueSink {
    fn play(&mut self, cue: AudioCue);
}

impl<T: CueSink + ?Sized> CueSink for Box<T> {
    fn play(&mut self, cue: AudioCue) {
        (**self).play(cue);
    }
}

/// Rings the terminal bell: once for a bite, twice for game over.
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        for _ in 0..times {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        let times = match cue {
            AudioCue::TargetConsumed => 1,
            AudioCue::GameOver => 2,
        };

        if let Err(error) = self.ring(times) {
            debug!(?cue, %error, "terminal bell failed");
        }
    }
}

/// Drops every cue.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: AudioCue) {}
}

#[cfg(test)]
mod tests {
    use crate::game::{DeathReason, GameEvent};
    use crate::snake::Position;

    use super::{AudioCue, CueSink, TerminalBell};

    #[test]
    fn events_map_to_cues() {
        assert_eq!(
            AudioCue::for_event(&GameEvent::TargetConsumed {
                at: Position::new(1, 1),
                score: 1
            }),
            Some(AudioCue::TargetConsumed)
        );
        assert_eq!(
            AudioCue::for_event(&GameEvent::GameOver(DeathReason::WallCollision)),
            Some(AudioCue::GameOver)
        );
        assert_eq!(AudioCue::for_event(&GameEvent::NewHighScore(4)), None);
        assert_eq!(AudioCue::for_event(&GameEvent::GridFilled), None);
    }

    #[test]
    fn bell_rings_once_per_bite_and_twice_on_game_over() {
        let mut bell = TerminalBell::new(Vec::new());

        bell.play(AudioCue::TargetConsumed);
        bell.play(AudioCue::GameOver);

        assert_eq!(bell.out, b"\x07\x07\x07".to_vec());
    }
}
