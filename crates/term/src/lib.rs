//! Terminal renderer for the game.
//!
//! Draws into a plain framebuffer (two columns per board cell) rather than
//! a widget toolkit, then flushes only the glyph runs that changed.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
