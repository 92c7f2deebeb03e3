//! Grid snake: a deterministic snake simulation with terminal collaborators.
//!
//! [`game::SnakeSimulation`] holds all game rules and is driven one step at a
//! time. Everything else in the crate is I/O around it: the [`app`] driver and
//! its tick schedule, [`input`] key mapping, the [`renderer`], the [`score`]
//! store and [`audio`] cues.

pub mod app;
pub mod audio;
pub mod config;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod score;
pub mod snake;
pub mod target;
pub mod terminal_runtime;
pub mod ui;
