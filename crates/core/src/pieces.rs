//! Pieces module - Tetromino shapes and their rotation tables
//!
//! Every rotation state is four cell offsets inside a 4x4 bounding box,
//! relative to the piece anchor. Rotation 0 of every shape touches row 0 of
//! its box so a freshly spawned piece sits on the top row of the board.
//! There are no wall kicks: a rotation either fits at the same anchor or is
//! rejected.

use crate::types::{PieceKind, Rotation, SPAWN_X, SPAWN_Y};

/// Offset of a single mino relative to piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Spawn position for new pieces (x, y)
pub const SPAWN_POSITION: (i8, i8) = (SPAWN_X, SPAWN_Y);

const O_SHAPE: PieceShape = [(1, 0), (2, 0), (1, 1), (2, 1)];

const O_ROTATIONS: [PieceShape; 4] = [O_SHAPE; 4];

const I_ROTATIONS: [PieceShape; 4] = [
    [(0, 0), (1, 0), (2, 0), (3, 0)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const J_ROTATIONS: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_ROTATIONS: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

const S_ROTATIONS: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_ROTATIONS: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const T_ROTATIONS: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

/// All four rotation states of a piece kind
pub fn rotations(kind: PieceKind) -> &'static [PieceShape; 4] {
    match kind {
        PieceKind::O => &O_ROTATIONS,
        PieceKind::I => &I_ROTATIONS,
        PieceKind::J => &J_ROTATIONS,
        PieceKind::L => &L_ROTATIONS,
        PieceKind::S => &S_ROTATIONS,
        PieceKind::Z => &Z_ROTATIONS,
        PieceKind::T => &T_ROTATIONS,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    rotations(kind)[rotation.index()]
}

/// Get initial shape for a new piece at spawn position
pub fn get_spawn_shape(kind: PieceKind) -> PieceShape {
    get_shape(kind, Rotation::R0)
}

/// Absolute board cells covered by `shape` anchored at `(x, y)`.
///
/// Coordinates saturate at the `i8` range, which lies off the board either way.
pub fn cells_at(shape: &PieceShape, x: i8, y: i8) -> PieceShape {
    shape.map(|(dx, dy)| (x.saturating_add(dx), y.saturating_add(dy)))
}
