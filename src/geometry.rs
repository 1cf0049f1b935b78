//! Rotation and reflection of pieces.
//!
//! A piece in a box can take 24 orientations (the rotation group of a cube):
//! 6 choices of which direction the original +Z axis ends up facing, times
//! 4 quarter turns about Z. A flat piece on a board can take 8: 4 quarter
//! turns, with and without a mirror flip.
//!
//! Planar pieces live in the `x`/`y` plane with `z = 0`; `x` is the board
//! row and `y` the column.

use crate::pieces::Coord;

/// Which transform group a puzzle's pieces may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// Rotations and mirror flips within the board plane (8 transforms).
    Planar,
    /// Proper rotations in space (24 transforms).
    Spatial,
}

impl Symmetry {
    /// Number of transforms the group generates, duplicates included.
    pub const fn transform_count(self) -> usize {
        match self {
            Self::Planar => 8,
            Self::Spatial => 24,
        }
    }

    /// Every transform of `piece` in generation order, each minimized.
    ///
    /// Symmetric pieces produce repeated entries; callers deduplicate.
    pub fn orientations(self, piece: &[Coord]) -> Vec<Vec<Coord>> {
        match self {
            Self::Planar => planar_orientations(piece),
            Self::Spatial => spatial_orientations(piece),
        }
    }
}

/// Quarter turn about the X axis.
pub const fn rotate_x((x, y, z): Coord) -> Coord {
    (x, z, -y)
}

/// Quarter turn about the Y axis.
pub const fn rotate_y((x, y, z): Coord) -> Coord {
    (-z, y, x)
}

/// Quarter turn about the Z axis.
pub const fn rotate_z((x, y, z): Coord) -> Coord {
    (-y, x, z)
}

/// Quarter turn within the board plane.
pub const fn rotate_planar((row, col, z): Coord) -> Coord {
    (-col, row, z)
}

/// Mirror flip across the board's row axis.
pub const fn flip_planar((row, col, z): Coord) -> Coord {
    (row, -col, z)
}

fn apply(piece: &[Coord], transform: fn(Coord) -> Coord, times: usize) -> Vec<Coord> {
    piece
        .iter()
        .map(|&cell| (0..times).fold(cell, |acc, _| transform(acc)))
        .collect()
}

/// The 24 spatial orientations.
///
/// Bases `P, X(P), X³(P), Y(P), Y³(P), Y²(P)` each face a different
/// direction up; every base is then turned 0-3 times about Z.
pub fn spatial_orientations(piece: &[Coord]) -> Vec<Vec<Coord>> {
    let bases = [
        piece.to_vec(),
        apply(piece, rotate_x, 1),
        apply(piece, rotate_x, 3),
        apply(piece, rotate_y, 1),
        apply(piece, rotate_y, 3),
        apply(piece, rotate_y, 2),
    ];

    bases
        .iter()
        .flat_map(|base| (0..4).map(move |turns| minimize(apply(base, rotate_z, turns))))
        .collect()
}

/// The 8 planar orientations: `P, R, R², R³, F, RF, R²F, R³F`.
pub fn planar_orientations(piece: &[Coord]) -> Vec<Vec<Coord>> {
    let flipped = apply(piece, flip_planar, 1);

    [piece.to_vec(), flipped]
        .iter()
        .flat_map(|base| (0..4).map(move |turns| minimize(apply(base, rotate_planar, turns))))
        .collect()
}

/// Translates cells so the minimum x, y, z values are all zero, and sorts
/// them so equal shapes compare equal.
pub fn minimize(mut cells: Vec<Coord>) -> Vec<Coord> {
    let Some(min_x) = cells.iter().map(|&(x, _, _)| x).min() else {
        return cells;
    };
    let min_y = cells.iter().map(|&(_, y, _)| y).min().unwrap_or(0);
    let min_z = cells.iter().map(|&(_, _, z)| z).min().unwrap_or(0);

    for (x, y, z) in &mut cells {
        *x -= min_x;
        *y -= min_y;
        *z -= min_z;
    }

    cells.sort_unstable();
    cells.dedup();
    cells
}

/// Size of the bounding box of minimized cells along each axis.
pub fn extent(cells: &[Coord]) -> Coord {
    cells.iter().fold((0, 0, 0), |(ex, ey, ez), &(x, y, z)| {
        (ex.max(x + 1), ey.max(y + 1), ez.max(z + 1))
    })
}
