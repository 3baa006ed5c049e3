//! Terminal input module (game-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`]. Both mini-games share one action
//! set, so the caller decides what an action means for the active game.

pub mod map;

pub use tui_candy_types as types;

pub use map::{handle_key_event, should_quit};
