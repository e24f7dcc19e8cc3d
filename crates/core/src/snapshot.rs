use crate::board::Position;
use crate::catalog::Shape;
use crate::piece::ActivePiece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, NEXT_PREVIEW_LEN};

/// Read-only view of the falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
    /// Resting with the lock timer running (renderer lock cue)
    pub grounded: bool,
}

impl ActiveSnapshot {
    pub fn from_piece(piece: &ActivePiece, grounded: bool) -> Self {
        Self {
            kind: piece.kind,
            shape: piece.shape.clone(),
            position: piece.position,
            grounded,
        }
    }
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    /// `None` while clearing, before start, or after game over
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: [PieceKind; NEXT_PREVIEW_LEN],
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub drop_interval_ms: u32,
    pub started: bool,
    pub paused: bool,
    pub animating: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused && !self.animating
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: [PieceKind::I; NEXT_PREVIEW_LEN],
            hold: None,
            can_hold: true,
            score: 0,
            lines: 0,
            level: 1,
            drop_interval_ms: crate::types::BASE_DROP_MS,
            started: false,
            paused: false,
            animating: false,
            game_over: false,
        }
    }
}
