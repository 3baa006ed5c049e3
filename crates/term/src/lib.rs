//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that can be flushed to a terminal backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Render from copyable snapshots, never from live game state
//! - Allow precise control over aspect ratio (2 chars wide per board cell)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_candy_core as core;
pub use tui_candy_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{
    symbol_color, symbol_glyph, AnchorY, GameView, OrderingView, Overlay, Viewport, PANEL_MIN_W,
};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, FramePaint, Run, TerminalRenderer};
