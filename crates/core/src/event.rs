//! Session events, buffered by the session and drained by observers
//! (the runner's event log, tests).

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Started,
    Spawned {
        kind: PieceKind,
    },
    Held {
        kind: PieceKind,
        swapped_in: Option<PieceKind>,
    },
    Locked {
        kind: PieceKind,
        hard_drop: bool,
    },
    LinesCleared {
        lines: u32,
        points: u32,
        all_clear: bool,
        level: u32,
    },
    Paused,
    Resumed,
    GameOver {
        score: u32,
    },
}

impl SessionEvent {
    /// Stable snake_case name for logs
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Started => "started",
            SessionEvent::Spawned { .. } => "spawned",
            SessionEvent::Held { .. } => "held",
            SessionEvent::Locked { .. } => "locked",
            SessionEvent::LinesCleared { .. } => "lines_cleared",
            SessionEvent::Paused => "paused",
            SessionEvent::Resumed => "resumed",
            SessionEvent::GameOver { .. } => "game_over",
        }
    }
}
