//! # Connect Four
//!
//! Rules engine for Connect Four on the standard 6×7 board, with a
//! line-based prompt and a terminal UI built with Ratatui as front ends.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, game state, outcome
//! - [`repl`]: Line-based driver over any reader/writer pair
//! - [`ui`]: Terminal UI: board view with column selector
//! - [`config`]: TOML configuration loading and validation
//! - [`logging`]: Tracing subscriber setup
//! - [`error`]: Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod logging;
pub mod repl;
pub mod ui;
