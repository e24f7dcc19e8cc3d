//! Board module - the fixed 10x20 cell grid
//!
//! Cells are stored in a flat row-major array. Coordinates are `(x, y)` with
//! `x` in `0..10` left to right and `y` in `0..20` top to bottom.
//!
//! Rows above the top edge (`y < 0`) are open space: shapes may poke into
//! them without colliding, but merging there is silently dropped.

use arrayvec::ArrayVec;

use crate::catalog::Shape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;
const BOARD_SIZE: usize = WIDTH * HEIGHT;

/// Full-row indices, at most one per board row
pub type RowList = ArrayVec<usize, HEIGHT>;

/// Top-left offset of a shape's bounding box on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i8,
    pub y: i8,
}

impl Position {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// The game board - 10 columns x 20 rows
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Cell at `(x, y)`, `None` when off the grid
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at `(x, y)`. Returns false if off the grid.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a single mino may sit at `(x, y)`.
    fn blocks(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.cells[(y as usize) * WIDTH + (x as usize)].is_solid()
    }

    /// True iff any nonzero shape cell lands outside the side walls, below
    /// the floor, or on a filled cell.
    pub fn collides(&self, shape: &Shape, pos: Position) -> bool {
        shape
            .filled()
            .any(|(dx, dy, _)| self.blocks(pos.x + dx, pos.y + dy))
    }

    /// Write every nonzero shape cell into the grid. Off-grid cells are dropped.
    pub fn merge(&mut self, shape: &Shape, pos: Position) {
        for (dx, dy, tag) in shape.filled() {
            if let Some(kind) = PieceKind::from_tag(tag) {
                self.set(pos.x + dx, pos.y + dy, Cell::Filled(kind));
            }
        }
    }

    fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * WIDTH..(y + 1) * WIDTH]
    }

    /// A row is full when no column is empty
    pub fn is_row_full(&self, y: usize) -> bool {
        y < HEIGHT && self.row(y).iter().all(|c| !c.is_empty())
    }

    /// Indices of all full rows, top to bottom
    pub fn find_full_rows(&self) -> RowList {
        (0..HEIGHT).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Replace every cell of the given rows with the clear marker
    pub fn mark_rows(&mut self, rows: &[usize]) {
        for &y in rows.iter().filter(|&&y| y < HEIGHT) {
            self.cells[y * WIDTH..(y + 1) * WIDTH].fill(Cell::Clearing);
        }
    }

    /// Remove the given rows and shift everything above them down.
    ///
    /// Rows may be given in any order and need not be contiguous. Untouched
    /// rows keep their relative order; the freed rows appear empty at the top.
    pub fn clear_rows(&mut self, rows: &[usize]) {
        if rows.is_empty() {
            return;
        }

        let mut write_y = HEIGHT;
        for read_y in (0..HEIGHT).rev() {
            if rows.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, write_y * WIDTH);
            }
        }

        self.cells[..write_y * WIDTH].fill(Cell::Empty);
    }

    /// True iff every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array
    pub fn write_grid(&self, out: &mut [[Cell; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            row.copy_from_slice(self.row(y));
        }
    }

    /// Empty the whole board
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Fill row `y` with `kind`, leaving the listed columns empty
    pub fn fill_row_except(&mut self, y: i8, kind: PieceKind, holes: &[i8]) {
        for x in 0..BOARD_WIDTH as i8 {
            let cell = if holes.contains(&x) {
                Cell::Empty
            } else {
                Cell::Filled(kind)
            };
            self.set(x, y, cell);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{instantiate, shape_of};

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(9, 0), Some(9));
        assert_eq!(Board::index(0, 1), Some(10));
        assert_eq!(Board::index(9, 19), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(10, 0), None);
        assert_eq!(Board::index(0, 20), None);
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let board = Board::new();
        let o = shape_of(PieceKind::O);

        assert!(!board.collides(o, Position::new(0, 0)));
        assert!(!board.collides(o, Position::new(8, 18)));
        assert!(board.collides(o, Position::new(-1, 0)));
        assert!(board.collides(o, Position::new(9, 0)));
        assert!(board.collides(o, Position::new(0, 19)));
    }

    #[test]
    fn test_collides_ignores_empty_matrix_cells() {
        let board = Board::new();
        // I matrix has an empty top row; its filled row is y+1.
        let i = shape_of(PieceKind::I);
        assert!(!board.collides(i, Position::new(0, 18)));
        assert!(board.collides(i, Position::new(0, 19)));
        // A vertical I only fills matrix column 2; the empty columns may hang off the wall.
        let mut i_vertical = instantiate(PieceKind::I);
        i_vertical.rotate_cw();
        assert!(!board.collides(&i_vertical, Position::new(-2, 0)));
        assert!(board.collides(&i_vertical, Position::new(-3, 0)));
    }

    #[test]
    fn test_above_top_is_open() {
        let board = Board::new();
        let o = shape_of(PieceKind::O);
        assert!(!board.collides(o, Position::new(4, -1)));
        assert!(!board.collides(o, Position::new(4, -5)));
        // Side walls still apply above the grid.
        assert!(board.collides(o, Position::new(-1, -2)));
    }

    #[test]
    fn test_collides_with_stack() {
        let mut board = Board::new();
        board.set(5, 19, Cell::Filled(PieceKind::Z));
        let o = shape_of(PieceKind::O);
        assert!(board.collides(o, Position::new(4, 18)));
        assert!(!board.collides(o, Position::new(6, 18)));
    }

    #[test]
    fn test_clear_marker_does_not_collide() {
        let mut board = Board::new();
        board.mark_rows(&[19]);
        assert!(!board.collides(shape_of(PieceKind::O), Position::new(0, 18)));
    }

    #[test]
    fn test_merge_writes_kind() {
        let mut board = Board::new();
        let t = instantiate(PieceKind::T);
        board.merge(&t, Position::new(3, 0));

        assert_eq!(board.get(4, 0), Some(Cell::Filled(PieceKind::T)));
        assert_eq!(board.get(3, 1), Some(Cell::Filled(PieceKind::T)));
        assert_eq!(board.get(5, 1), Some(Cell::Filled(PieceKind::T)));
        assert_eq!(board.get(3, 0), Some(Cell::Empty));
    }

    #[test]
    fn test_merge_drops_off_grid_cells() {
        let mut board = Board::new();
        board.merge(shape_of(PieceKind::O), Position::new(0, -1));
        assert_eq!(board.get(0, 0), Some(Cell::Filled(PieceKind::O)));
        assert_eq!(board.get(1, 0), Some(Cell::Filled(PieceKind::O)));
        assert_eq!(board.cells().iter().filter(|c| !c.is_empty()).count(), 2);
    }

    #[test]
    fn test_find_full_rows_top_to_bottom() {
        let mut board = Board::new();
        board.fill_row_except(19, PieceKind::I, &[]);
        board.fill_row_except(17, PieceKind::I, &[]);
        board.fill_row_except(18, PieceKind::I, &[4]);
        assert_eq!(board.find_full_rows().as_slice(), &[17, 19]);
    }

    #[test]
    fn test_clear_rows_non_contiguous() {
        let mut board = Board::new();
        board.fill_row_except(19, PieceKind::I, &[]);
        board.fill_row_except(18, PieceKind::J, &[0]);
        board.fill_row_except(17, PieceKind::L, &[]);
        board.fill_row_except(16, PieceKind::S, &[1]);

        board.clear_rows(&[19, 17]);

        // Survivors drop and keep their order.
        assert_eq!(board.get(0, 19), Some(Cell::Empty));
        assert_eq!(board.get(1, 19), Some(Cell::Filled(PieceKind::J)));
        assert_eq!(board.get(1, 18), Some(Cell::Empty));
        assert_eq!(board.get(0, 18), Some(Cell::Filled(PieceKind::S)));
        for y in 0..18 {
            for x in 0..10 {
                assert_eq!(board.get(x, y), Some(Cell::Empty));
            }
        }
    }

    #[test]
    fn test_clear_rows_empty_list_is_noop() {
        let mut board = Board::new();
        board.fill_row_except(19, PieceKind::T, &[2]);
        let before = board.clone();
        board.clear_rows(&[]);
        assert_eq!(board, before);
    }

    #[test]
    fn test_marked_rows_still_count_as_full() {
        let mut board = Board::new();
        board.fill_row_except(19, PieceKind::T, &[]);
        board.mark_rows(&[19]);
        assert!(board.is_row_full(19));
        assert!(!board.is_empty());
    }

    #[test]
    fn test_is_empty() {
        let mut board = Board::new();
        assert!(board.is_empty());
        board.set(3, 3, Cell::Filled(PieceKind::O));
        assert!(!board.is_empty());
        board.clear();
        assert!(board.is_empty());
    }
}
