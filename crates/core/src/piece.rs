//! Active piece - the falling piece and its movement rules
//!
//! The piece owns its shape matrix (an independent copy from the catalog),
//! so rotation mutates only this instance.
//!
//! Rotation uses a single kick table ([`KICKS`]): after rotating in place the
//! offsets are tried in order and the first legal placement wins. If none
//! fits, shape and position are restored untouched.

use crate::board::{Board, Position};
use crate::catalog::{instantiate, Shape};
use crate::types::{PieceKind, RotateDir, BOARD_WIDTH, KICKS};

/// The falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub position: Position,
}

/// Spawn column for a shape of the given width: `floor(COLS/2) - ceil(width/2)`
pub fn spawn_x(width: usize) -> i8 {
    (BOARD_WIDTH as i8) / 2 - (width as i8 + 1) / 2
}

impl ActivePiece {
    /// Fresh piece at the top of the board, horizontally centered
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = instantiate(kind);
        let position = Position::new(spawn_x(shape.width()), 0);
        Self {
            kind,
            shape,
            position,
        }
    }

    pub fn collides(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.position)
    }

    /// Resting on the floor or stack: one row lower would collide
    pub fn is_resting(&self, board: &Board) -> bool {
        board.collides(&self.shape, self.position.offset(0, 1))
    }

    /// Move by `(dx, dy)` if the target is legal. Returns whether it moved.
    pub fn shift(&mut self, dx: i8, dy: i8, board: &Board) -> bool {
        let target = self.position.offset(dx, dy);
        if board.collides(&self.shape, target) {
            return false;
        }
        self.position = target;
        true
    }

    /// Rotate with kicks. Returns whether the rotation took effect.
    pub fn rotate(&mut self, dir: RotateDir, board: &Board) -> bool {
        let original_shape = self.shape.clone();
        let original_position = self.position;

        match dir {
            RotateDir::Cw => self.shape.rotate_cw(),
            RotateDir::Ccw => self.shape.rotate_ccw(),
            RotateDir::Half => self.shape.rotate_half(),
        }

        for &(dx, dy) in KICKS.iter() {
            let candidate = original_position.offset(dx, dy);
            if !board.collides(&self.shape, candidate) {
                self.position = candidate;
                return true;
            }
        }

        self.shape = original_shape;
        self.position = original_position;
        false
    }

    /// Rows the piece can fall before it rests
    pub fn drop_distance(&self, board: &Board) -> i8 {
        let mut distance = 0;
        while !board.collides(&self.shape, self.position.offset(0, distance + 1)) {
            distance += 1;
        }
        distance
    }

    /// Row the piece would land on (ghost projection)
    pub fn landing_y(&self, board: &Board) -> i8 {
        self.position.y + self.drop_distance(board)
    }
}
