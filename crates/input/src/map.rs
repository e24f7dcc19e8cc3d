//! Key mapping from terminal events to game actions.

use anyhow::{anyhow, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::types::{Intent, Lifecycle};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Game(Intent),
    Session(Lifecycle),
    Quit,
}

impl KeyAction {
    /// Parse an action name. Accepts intent names in camelCase or
    /// snake_case (`rotate_ccw`, `hardDrop`) plus `start`, `end`, `reset`
    /// and `quit`.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace(['_', '-'], "").to_lowercase();
        match normalized.as_str() {
            "start" => Some(KeyAction::Session(Lifecycle::Start)),
            "end" => Some(KeyAction::Session(Lifecycle::End)),
            "reset" | "restart" => Some(KeyAction::Session(Lifecycle::Reset)),
            "quit" => Some(KeyAction::Quit),
            other => Intent::from_str(other).map(KeyAction::Game),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyAction::Game(intent) => intent.as_str(),
            KeyAction::Session(cmd) => cmd.as_str(),
            KeyAction::Quit => "quit",
        }
    }
}

/// Parse a key name: a single character, or one of `left`, `right`, `up`,
/// `down`, `space`, `enter`, `esc`, `tab`, `shift`.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let name = name.trim();
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c.to_ascii_lowercase()));
    }
    match name.to_lowercase().as_str() {
        "left" => Some(KeyCode::Left),
        "right" => Some(KeyCode::Right),
        "up" => Some(KeyCode::Up),
        "down" => Some(KeyCode::Down),
        "space" => Some(KeyCode::Char(' ')),
        "enter" | "return" => Some(KeyCode::Enter),
        "esc" | "escape" => Some(KeyCode::Esc),
        "tab" => Some(KeyCode::Tab),
        "shift" => Some(KeyCode::Modifier(ModifierKeyCode::LeftShift)),
        _ => None,
    }
}

/// Letters match case-insensitively and both shift keys count as one.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        KeyCode::Modifier(ModifierKeyCode::RightShift) => {
            KeyCode::Modifier(ModifierKeyCode::LeftShift)
        }
        other => other,
    }
}

/// Rebindable key table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    bindings: Vec<(KeyCode, KeyAction)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use KeyAction::{Game, Quit, Session};

        let bindings = vec![
            (KeyCode::Left, Game(Intent::MoveLeft)),
            (KeyCode::Right, Game(Intent::MoveRight)),
            (KeyCode::Down, Game(Intent::SoftDrop)),
            (KeyCode::Up, Game(Intent::RotateCw)),
            (KeyCode::Char('x'), Game(Intent::RotateCw)),
            (KeyCode::Char('z'), Game(Intent::RotateCcw)),
            (KeyCode::Char('a'), Game(Intent::Rotate180)),
            (KeyCode::Char(' '), Game(Intent::HardDrop)),
            (KeyCode::Char('c'), Game(Intent::Hold)),
            (
                KeyCode::Modifier(ModifierKeyCode::LeftShift),
                Game(Intent::Hold),
            ),
            (KeyCode::Esc, Game(Intent::TogglePause)),
            (KeyCode::Char('p'), Game(Intent::TogglePause)),
            (KeyCode::Enter, Session(Lifecycle::Start)),
            (KeyCode::Char('r'), Session(Lifecycle::Reset)),
            (KeyCode::Char('e'), Session(Lifecycle::End)),
            (KeyCode::Char('q'), Quit),
        ];
        Self { bindings }
    }
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with overrides applied, e.g. `"hold=v,rotate_ccw=x"`.
    pub fn with_overrides(overrides: &str) -> Result<Self> {
        let mut map = Self::default();
        map.apply_overrides(overrides)?;
        Ok(map)
    }

    /// Apply comma-separated `action=key` pairs. Each pair replaces every
    /// existing binding of the action and steals the key from any other action.
    pub fn apply_overrides(&mut self, overrides: &str) -> Result<()> {
        for pair in overrides.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, key) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("keys: expected action=key, got {:?}", pair))?;
            let action = KeyAction::from_name(name)
                .ok_or_else(|| anyhow!("keys: unknown action {:?}", name.trim()))?;
            let code = parse_key_code(key)
                .ok_or_else(|| anyhow!("keys: unknown key {:?}", key.trim()))?;
            self.rebind(action, code);
        }
        Ok(())
    }

    /// Make `code` the only key for `action`.
    pub fn rebind(&mut self, action: KeyAction, code: KeyCode) {
        let code = normalize(code);
        self.bindings.retain(|(c, a)| *a != action && *c != code);
        self.bindings.push((code, action));
    }

    /// Keys currently bound to `action`
    pub fn keys_for(&self, action: KeyAction) -> impl Iterator<Item = KeyCode> + '_ {
        self.bindings
            .iter()
            .filter(move |(_, a)| *a == action)
            .map(|(c, _)| *c)
    }

    /// Map a key event. Release events are ignored; Ctrl-C always quits.
    pub fn lookup(&self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
                .then_some(KeyAction::Quit);
        }
        let code = normalize(key.code);
        self.bindings
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, a)| *a)
    }
}
