//! Piece catalog - immutable shape definitions for the seven kinds
//!
//! Shapes are square matrices of small integers: `0` is empty, any other
//! value is the kind's tag. The catalog definitions are `'static` and are
//! never rotated; every falling, held or previewed piece works on its own
//! copy obtained from [`instantiate`].

use crate::types::PieceKind;

/// Largest shape matrix (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// A square shape matrix of side `size` (2, 3 or 4).
///
/// Cells outside `size x size` are always zero. Deliberately not `Copy`:
/// copies are explicit via [`instantiate`] / `clone()`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    size: u8,
    cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows. Only the top-left `size x size` block is used.
    pub const fn new(size: u8, cells: [[u8; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE]) -> Self {
        Self { size, cells }
    }

    /// Side length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Width used for spawn centering (equal to the matrix side)
    pub fn width(&self) -> usize {
        self.size as usize
    }

    /// Value at column `x`, row `y`; 0 when outside the matrix
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x >= self.size() || y >= self.size() {
            return 0;
        }
        self.cells[y][x]
    }

    /// Iterate nonzero cells as `(dx, dy, tag)`
    pub fn filled(&self) -> impl Iterator<Item = (i8, i8, u8)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != 0).then_some((x as i8, y as i8, v))
            })
        })
    }

    /// Rows of the matrix, trimmed to `size`
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        let n = self.size();
        self.cells[..n].iter().map(move |row| &row[..n])
    }

    fn transpose(&mut self) {
        let n = self.size();
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
    }

    /// Rotate 90° clockwise in place (transpose, then reverse each row)
    pub fn rotate_cw(&mut self) {
        let n = self.size();
        self.transpose();
        for row in self.cells[..n].iter_mut() {
            row[..n].reverse();
        }
    }

    /// Rotate 90° counter-clockwise in place (transpose, then reverse row order)
    pub fn rotate_ccw(&mut self) {
        let n = self.size();
        self.transpose();
        self.cells[..n].reverse();
    }

    /// Rotate 180° in place
    pub fn rotate_half(&mut self) {
        self.rotate_cw();
        self.rotate_cw();
    }
}

const I_SHAPE: Shape = Shape::new(
    4,
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const J_SHAPE: Shape = Shape::new(
    3,
    [[2, 0, 0, 0], [2, 2, 2, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const L_SHAPE: Shape = Shape::new(
    3,
    [[0, 0, 3, 0], [3, 3, 3, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const O_SHAPE: Shape = Shape::new(
    2,
    [[4, 4, 0, 0], [4, 4, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const S_SHAPE: Shape = Shape::new(
    3,
    [[0, 5, 5, 0], [5, 5, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const T_SHAPE: Shape = Shape::new(
    3,
    [[0, 6, 0, 0], [6, 6, 6, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);
const Z_SHAPE: Shape = Shape::new(
    3,
    [[7, 7, 0, 0], [0, 7, 7, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
);

static CATALOG: [Shape; 7] = [I_SHAPE, J_SHAPE, L_SHAPE, O_SHAPE, S_SHAPE, T_SHAPE, Z_SHAPE];

/// Read-only catalog definition for a kind (spawn orientation)
pub fn shape_of(kind: PieceKind) -> &'static Shape {
    &CATALOG[(kind.tag() - 1) as usize]
}

/// Independent working copy of a kind's shape
pub fn instantiate(kind: PieceKind) -> Shape {
    shape_of(kind).clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(shape: &Shape) -> Vec<Vec<u8>> {
        shape.rows().map(|r| r.to_vec()).collect()
    }

    #[test]
    fn catalog_tags_match_kinds() {
        for kind in PieceKind::ALL {
            let shape = shape_of(kind);
            assert_eq!(shape.filled().count(), 4, "{:?} should have 4 minos", kind);
            assert!(shape.filled().all(|(_, _, v)| v == kind.tag()));
        }
    }

    #[test]
    fn catalog_sizes() {
        assert_eq!(shape_of(PieceKind::I).size(), 4);
        assert_eq!(shape_of(PieceKind::O).size(), 2);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(shape_of(kind).size(), 3);
        }
    }

    #[test]
    fn rotate_cw_t() {
        let mut t = instantiate(PieceKind::T);
        t.rotate_cw();
        assert_eq!(rows(&t), vec![vec![0, 6, 0], vec![0, 6, 6], vec![0, 6, 0]]);
    }

    #[test]
    fn rotate_ccw_t() {
        let mut t = instantiate(PieceKind::T);
        t.rotate_ccw();
        assert_eq!(rows(&t), vec![vec![0, 6, 0], vec![6, 6, 0], vec![0, 6, 0]]);
    }

    #[test]
    fn rotate_half_t() {
        let mut t = instantiate(PieceKind::T);
        t.rotate_half();
        assert_eq!(rows(&t), vec![vec![0, 0, 0], vec![6, 6, 6], vec![0, 6, 0]]);
    }

    #[test]
    fn rotate_cw_then_ccw_is_identity() {
        for kind in PieceKind::ALL {
            let mut shape = instantiate(kind);
            shape.rotate_cw();
            shape.rotate_ccw();
            assert_eq!(&shape, shape_of(kind));
        }
    }

    #[test]
    fn four_cw_rotations_are_identity() {
        let mut i = instantiate(PieceKind::I);
        for _ in 0..4 {
            i.rotate_cw();
        }
        assert_eq!(&i, shape_of(PieceKind::I));
    }

    #[test]
    fn rotating_a_copy_never_touches_the_catalog() {
        let before: Vec<Shape> = PieceKind::ALL.iter().map(|k| shape_of(*k).clone()).collect();

        for kind in PieceKind::ALL {
            let mut shape = instantiate(kind);
            shape.rotate_cw();
            shape.rotate_half();
            shape.rotate_cw();
            shape.rotate_ccw();
        }

        for (kind, original) in PieceKind::ALL.iter().zip(before.iter()) {
            assert_eq!(shape_of(*kind), original);
        }
    }

    #[test]
    fn instances_are_independent() {
        let mut a = instantiate(PieceKind::L);
        let b = instantiate(PieceKind::L);
        a.rotate_cw();
        assert_ne!(a, b);
        assert_eq!(&b, shape_of(PieceKind::L));
    }

    #[test]
    fn get_outside_matrix_is_zero() {
        let o = shape_of(PieceKind::O);
        assert_eq!(o.get(0, 0), 4);
        assert_eq!(o.get(2, 0), 0);
        assert_eq!(o.get(0, 3), 0);
    }
}
