//! TUI Candy (workspace facade crate).
//!
//! Re-exports the engine crates under `tui_candy::{core,input,term,types}` and
//! holds the application layer: configuration, command line, logging and the
//! [`app::App`] that connects key actions to the games.

pub use tui_candy_core as core;
pub use tui_candy_input as input;
pub use tui_candy_term as term;
pub use tui_candy_types as types;

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
