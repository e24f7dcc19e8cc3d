//! Shared data types and constants for the blockfall engine.
//!
//! Everything here is plain data with no external dependencies so it can be
//! used by the engine, the renderer and the input layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FRAME_MS` | 16 | Default frame interval of the runner (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest gravity |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `CLEAR_DELAY_MS` | 150 | Length of the row-clear window |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::T.tag(), 6);
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells
pub const BOARD_HEIGHT: u8 = 20;

/// Default frame interval of the terminal runner (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Gravity interval at level 1
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Gravity never gets faster than this
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lock delay once a piece rests on the floor or stack
pub const LOCK_DELAY_MS: u32 = 500;

/// Length of the blocking row-clear window
pub const CLEAR_DELAY_MS: u32 = 150;

/// Number of upcoming pieces kept in the next queue
pub const NEXT_QUEUE_LEN: usize = 4;

/// Number of next-queue entries exposed to the renderer
pub const NEXT_PREVIEW_LEN: usize = 3;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for clearing 0..=4 rows at once, multiplied by the level
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Flat bonus for every hard drop
pub const HARD_DROP_BONUS: u32 = 20;

/// All-clear bonus, multiplied by the level
pub const ALL_CLEAR_BONUS: u32 = 2000;

/// Rotation kick offsets `(dx, dy)`, tried in order until one fits.
///
/// `dy = -1` lifts the piece one row (floor kick).
pub const KICKS: [(i8, i8); 8] = [
    (0, 0),
    (1, 0),
    (-1, 0),
    (0, -1),
    (1, -1),
    (-1, -1),
    (2, 0),
    (-2, 0),
];

/// Gameplay tunables.
///
/// `lock_reset_limit` caps how often a grounded piece may refresh its lock
/// timer by shifting or rotating. `None` allows unlimited refreshes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub lock_delay_ms: u32,
    pub clear_delay_ms: u32,
    pub lock_reset_limit: Option<u32>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            lock_delay_ms: LOCK_DELAY_MS,
            clear_delay_ms: CLEAR_DELAY_MS,
            lock_reset_limit: None,
        }
    }
}

/// The seven piece kinds.
///
/// Each kind has a numeric tag (1..=7) used inside shape matrices and a
/// color identity that only the renderer cares about:
/// - **I**: cyan
/// - **J**: blue
/// - **L**: orange
/// - **O**: yellow
/// - **S**: green
/// - **T**: purple
/// - **Z**: red
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in tag order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Single uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Nonzero tag written into shape matrices
    pub fn tag(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::tag`]
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// for kind in PieceKind::ALL {
    ///     assert_eq!(PieceKind::from_tag(kind.tag()), Some(kind));
    /// }
    /// assert_eq!(PieceKind::from_tag(0), None);
    /// ```
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// A cell on the game board.
///
/// `Clearing` only exists while a row-clear window is running; it marks the
/// rows about to be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceKind),
    Clearing,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Occupied for collision purposes (the clear marker is transient and never blocks)
    pub fn is_solid(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn kind(&self) -> Option<PieceKind> {
        match self {
            Cell::Filled(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Rotation direction of an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDir {
    /// 90° clockwise
    Cw,
    /// 90° counter-clockwise
    Ccw,
    /// 180°
    Half,
}

/// Discrete player intents produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one row down, grounding it if it cannot move
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Rotate piece 180°
    Rotate180,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Swap with the hold slot (once per piece)
    Hold,
    /// Pause or resume
    TogglePause,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Intent;
    ///
    /// assert_eq!(Intent::from_str("moveLeft"), Some(Intent::MoveLeft));
    /// assert_eq!(Intent::from_str("rotate180"), Some(Intent::Rotate180));
    /// assert_eq!(Intent::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "rotatecw" => Some(Intent::RotateCw),
            "rotateccw" => Some(Intent::RotateCcw),
            "rotate180" => Some(Intent::Rotate180),
            "harddrop" => Some(Intent::HardDrop),
            "hold" => Some(Intent::Hold),
            "togglepause" | "pause" => Some(Intent::TogglePause),
            _ => None,
        }
    }

    /// camelCase name, the inverse of [`Intent::from_str`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::RotateCw => "rotateCw",
            Intent::RotateCcw => "rotateCcw",
            Intent::Rotate180 => "rotate180",
            Intent::HardDrop => "hardDrop",
            Intent::Hold => "hold",
            Intent::TogglePause => "togglePause",
        }
    }

    /// Rotation direction, if this is a rotate intent
    pub fn rotation(&self) -> Option<RotateDir> {
        match self {
            Intent::RotateCw => Some(RotateDir::Cw),
            Intent::RotateCcw => Some(RotateDir::Ccw),
            Intent::Rotate180 => Some(RotateDir::Half),
            _ => None,
        }
    }
}

/// Session lifecycle commands issued by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Fresh session
    Start,
    /// Force game over, surfacing the final score
    End,
    /// End then Start
    Reset,
}

impl Lifecycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifecycle::Start => "start",
            Lifecycle::End => "end",
            Lifecycle::Reset => "reset",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_and_scoring_defaults() {
        assert_eq!(LOCK_DELAY_MS, 500);
        assert_eq!(CLEAR_DELAY_MS, 150);
        assert_eq!(BASE_DROP_MS, 1000);
        assert_eq!(DROP_INTERVAL_MIN_MS, 100);
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
        assert_eq!(HARD_DROP_BONUS, 20);
        assert_eq!(ALL_CLEAR_BONUS, 2000);
    }

    #[test]
    fn default_rules_allow_unlimited_lock_resets() {
        let rules = Rules::default();
        assert_eq!(rules.lock_delay_ms, LOCK_DELAY_MS);
        assert_eq!(rules.clear_delay_ms, CLEAR_DELAY_MS);
        assert_eq!(rules.lock_reset_limit, None);
    }

    #[test]
    fn kick_table_starts_in_place() {
        assert_eq!(KICKS[0], (0, 0));
        assert_eq!(KICKS.len(), 8);
    }

    #[test]
    fn intent_names_round_trip() {
        for intent in [
            Intent::MoveLeft,
            Intent::MoveRight,
            Intent::SoftDrop,
            Intent::RotateCw,
            Intent::RotateCcw,
            Intent::Rotate180,
            Intent::HardDrop,
            Intent::Hold,
            Intent::TogglePause,
        ] {
            assert_eq!(Intent::from_str(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn only_rotate_intents_carry_a_direction() {
        assert_eq!(Intent::RotateCw.rotation(), Some(RotateDir::Cw));
        assert_eq!(Intent::RotateCcw.rotation(), Some(RotateDir::Ccw));
        assert_eq!(Intent::Rotate180.rotation(), Some(RotateDir::Half));
        assert_eq!(Intent::HardDrop.rotation(), None);
    }

    #[test]
    fn clear_marker_is_not_solid_but_not_empty() {
        assert!(Cell::Empty.is_empty());
        assert!(!Cell::Clearing.is_empty());
        assert!(!Cell::Clearing.is_solid());
        assert!(Cell::Filled(PieceKind::T).is_solid());
        assert_eq!(Cell::Filled(PieceKind::S).kind(), Some(PieceKind::S));
    }
}
