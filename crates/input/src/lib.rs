//! Terminal input module.
//!
//! Maps `crossterm` key events to game intents and session lifecycle
//! commands through a rebindable [`KeyMap`].

pub mod map;

pub use blockfall_types as types;

pub use map::{parse_key_code, KeyAction, KeyMap};
