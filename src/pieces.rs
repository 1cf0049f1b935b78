//! Piece definitions and puzzle presets.
//!
//! Each piece is a set of unit cells. Planar pieces are written as
//! `(row, column, 0)`; box pieces as `(x, y, z)`.

use crate::catalog::{PLANAR_FIT_OFFSETS, SPATIAL_FIT_OFFSETS};
use crate::config::{SearchPolicy, FIT_WORD_BITS, PLANAR_SOLUTION_CAP};
use crate::geometry::Symmetry;
use crate::grid::Dims;

/// A 3D coordinate representing a unit cell position.
pub type Coord = (i32, i32, i32);

/// The twelve pentominoes for the planar benchmark.
///
/// Order matters: it is the order the search tries them in, and piece 0
/// (the V) gets pinned to a single orientation.
pub const PLANAR_PIECES: &[&[Coord]] = &[
    // V
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 0), (2, 0, 0)],
    // U
    &[(0, 0, 0), (0, 1, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0)],
    // P
    &[(0, 0, 0), (0, 1, 0), (1, 0, 0), (1, 1, 0), (2, 0, 0)],
    // L
    &[(0, 0, 0), (0, 1, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)],
    // N
    &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0), (3, 1, 0)],
    // Y
    &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (2, 0, 0), (3, 0, 0)],
    // T
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 1, 0), (2, 1, 0)],
    // X
    &[(0, 1, 0), (1, 0, 0), (1, 1, 0), (1, 2, 0), (2, 1, 0)],
    // F
    &[(0, 1, 0), (1, 0, 0), (1, 1, 0), (2, 1, 0), (2, 2, 0)],
    // I
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (0, 3, 0), (0, 4, 0)],
    // W
    &[(0, 1, 0), (0, 2, 0), (1, 0, 0), (1, 1, 0), (2, 0, 0)],
    // Z
    &[(0, 0, 0), (0, 1, 0), (1, 1, 0), (2, 1, 0), (2, 2, 0)],
];

/// The 31 pieces of the box benchmark: 12 flat and 17 non-flat
/// pentominoes, a straight tricube and a domino (150 cells in all).
pub const BOX_PIECES: &[&[Coord]] = &[
    // flat pentominoes
    &[(1, 0, 0), (0, 0, 0), (0, 1, 0), (0, 2, 0), (0, 3, 0)], // L
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0), (4, 0, 0)], // I
    &[(0, 2, 0), (0, 1, 0), (0, 0, 0), (1, 0, 0), (1, 1, 0)], // P
    &[(2, 0, 0), (1, 0, 0), (0, 0, 0), (0, 1, 0), (0, 2, 0)], // V
    &[(2, 0, 0), (1, 0, 0), (1, 1, 0), (0, 1, 0), (0, 2, 0)], // W
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0), (3, 1, 0)], // N
    &[(1, 0, 0), (0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 2, 0)], // U
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0), (1, 1, 0)], // Y
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0), (1, 2, 0)], // T
    &[(1, 0, 0), (1, 1, 0), (0, 1, 0), (1, 2, 0), (2, 1, 0)], // X
    &[(1, 0, 0), (1, 1, 0), (0, 1, 0), (1, 2, 0), (2, 2, 0)], // F
    &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (1, 2, 0), (2, 2, 0)], // Z
    // non-flat, with a mirror symmetry
    &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (0, 1, 0), (0, 0, 1)], // square with a block on it
    &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 0, 1), (0, 1, 1)], // compact diagonal
    &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 0, 1), (0, 0, 2)], // bent Y
    &[(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 1, 1), (1, 0, 1)], // octopus
    &[(0, 0, 0), (0, 0, 1), (0, 0, 2), (0, 1, 1), (1, 1, 1)], // elephant
    // non-flat chiral pairs
    &[(1, 0, 0), (1, 1, 0), (1, 2, 0), (0, 2, 0), (1, 1, 1)], // twisted R
    &[(1, 0, 0), (1, 1, 0), (1, 2, 0), (2, 2, 0), (1, 1, 1)], // twisted R mirror
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 2, 1), (0, 2, 1)], // twisted hook
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 2, 1), (1, 2, 0)], // twisted hook mirror
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (1, 0, 0), (0, 2, 1)], // twisted S
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (0, 0, 1), (1, 2, 0)], // twisted S mirror
    &[(0, 0, 0), (0, 0, 1), (0, 1, 1), (1, 1, 1), (1, 1, 2)], // folded S
    &[(0, 0, 0), (0, 0, 1), (1, 0, 1), (1, 1, 1), (1, 1, 2)], // folded S mirror
    &[(0, 0, 0), (0, 1, 0), (0, 0, 1), (1, 0, 1), (1, 0, 2)], // small S with side cube
    &[(0, 0, 0), (1, 0, 0), (0, 0, 1), (0, 1, 1), (0, 1, 2)], // small S with side cube mirror
    &[(0, 0, 0), (0, 1, 1), (0, 0, 1), (1, 0, 1), (1, 0, 2)], // small S with end cube
    &[(0, 0, 0), (1, 0, 1), (0, 0, 1), (0, 1, 1), (0, 1, 2)], // small S with end cube mirror
    // fillers that bring the total to 150 cells
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0)],
    &[(0, 0, 0), (1, 0, 0)],
];

/// Hexominoes tried before the box pieces when the box runs with extras.
pub const HEXOMINOES: &[&[Coord]] = &[
    &[(0, 0, 0), (1, 0, 0), (0, 0, 1), (0, 0, 2), (0, 0, 3), (0, 1, 3)], // long twisted hook
    &[(0, 0, 0), (0, 1, 0), (0, 0, 1), (0, 0, 2), (0, 0, 3), (1, 0, 3)], // long twisted hook mirror
    &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (1, 2, 0), (1, 2, 1), (2, 2, 1)], // offset S
    &[(0, 0, 1), (1, 0, 1), (1, 1, 1), (1, 2, 1), (1, 2, 0), (2, 2, 0)], // offset S mirror
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 0, 1), (0, 0, 2), (0, 1, 2)], // L with side hook
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 0, 1), (0, 0, 2), (2, 1, 0)], // L with side hook mirror
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 0, 1), (0, 0, 2), (0, 1, 1)], // long arm twisted R
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 0, 1), (0, 0, 2), (1, 1, 0)], // long arm twisted R mirror
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (0, 3, 0), (1, 3, 1), (0, 3, 1)], // twisted long hook
    &[(0, 0, 0), (0, 1, 0), (0, 2, 0), (0, 3, 0), (1, 3, 1), (1, 3, 0)], // twisted long hook mirror
    &[(2, 0, 0), (1, 0, 0), (1, 1, 0), (0, 1, 0), (0, 1, 1), (0, 2, 1)], // mutant W
    &[(2, 0, 1), (1, 0, 1), (1, 1, 1), (0, 1, 1), (0, 1, 0), (0, 2, 0)], // mutant W mirror
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 1, 0), (0, 1, 1), (0, 1, 2)], // offset L
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 0, 1), (0, 1, 1), (0, 2, 1)], // offset L mirror
    &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (1, 1, 1), (1, 2, 0), (2, 2, 0)], // S with side tab
    &[(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 1, 1), (2, 1, 0), (2, 2, 0)], // S with side tab mirror
    &[(0, 0, 0), (0, 0, 1), (0, 1, 0), (1, 1, 0), (1, 2, 0), (1, 2, 1)], // small S with tabs
    &[(0, 0, 0), (0, 0, 1), (1, 0, 0), (1, 1, 0), (2, 1, 0), (2, 1, 1)], // small S with tabs mirror
    &[(0, 1, 0), (1, 1, 0), (2, 1, 0), (1, 0, 1), (1, 1, 1), (1, 2, 1)], // crossing threes
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0), (1, 2, 0), (1, 2, 1)], // T with hooked stem
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (1, 1, 0), (1, 1, 1), (1, 2, 1)], // T with folded stem
    &[(0, 0, 0), (0, 1, 0), (0, 1, 1), (0, 1, 2), (0, 1, 3), (0, 2, 3)], // flat S
    &[(0, 0, 0), (1, 0, 0), (0, 0, 1), (0, 0, 2), (0, 0, 3), (0, 0, 4)], // bench dog
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (0, 0, 1), (0, 0, 2), (0, 0, 3)], // flat L
    &[(0, 0, 0), (1, 0, 0), (1, 1, 0), (1, 2, 0), (2, 2, 0), (1, 3, 0)], // stretched R
    &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 2, 0), (0, 3, 0), (1, 3, 0)], // big C
    &[(0, 0, 0), (0, 1, 0), (1, 1, 0), (1, 2, 0), (1, 3, 0), (2, 3, 0)], // flat mutant W
    &[(0, 0, 0), (0, 0, 1), (0, 1, 1), (0, 0, 2), (0, 0, 3), (0, 0, 4)], // five with a tab
    &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (2, 1, 0), (2, 2, 0), (3, 2, 0)], // L with hook
];

/// `HEXOMINOES` followed by `BOX_PIECES`.
pub const HEXOMINO_BOX_PIECES: &[&[Coord]] = &[
    HEXOMINOES[0], HEXOMINOES[1], HEXOMINOES[2], HEXOMINOES[3], HEXOMINOES[4],
    HEXOMINOES[5], HEXOMINOES[6], HEXOMINOES[7], HEXOMINOES[8], HEXOMINOES[9],
    HEXOMINOES[10], HEXOMINOES[11], HEXOMINOES[12], HEXOMINOES[13], HEXOMINOES[14],
    HEXOMINOES[15], HEXOMINOES[16], HEXOMINOES[17], HEXOMINOES[18], HEXOMINOES[19],
    HEXOMINOES[20], HEXOMINOES[21], HEXOMINOES[22], HEXOMINOES[23], HEXOMINOES[24],
    HEXOMINOES[25], HEXOMINOES[26], HEXOMINOES[27], HEXOMINOES[28],
    BOX_PIECES[0], BOX_PIECES[1], BOX_PIECES[2], BOX_PIECES[3], BOX_PIECES[4],
    BOX_PIECES[5], BOX_PIECES[6], BOX_PIECES[7], BOX_PIECES[8], BOX_PIECES[9],
    BOX_PIECES[10], BOX_PIECES[11], BOX_PIECES[12], BOX_PIECES[13], BOX_PIECES[14],
    BOX_PIECES[15], BOX_PIECES[16], BOX_PIECES[17], BOX_PIECES[18], BOX_PIECES[19],
    BOX_PIECES[20], BOX_PIECES[21], BOX_PIECES[22], BOX_PIECES[23], BOX_PIECES[24],
    BOX_PIECES[25], BOX_PIECES[26], BOX_PIECES[27], BOX_PIECES[28], BOX_PIECES[29],
    BOX_PIECES[30],
];

/// A complete puzzle: pieces, field, symmetry group and search policy.
#[derive(Debug, Clone, Copy)]
pub struct Puzzle {
    pub name: &'static str,
    pub pieces: &'static [&'static [Coord]],
    pub dims: Dims,
    pub symmetry: Symmetry,
    /// Neighbourhood sampled for the fit pre-check.
    pub fit_offsets: &'static [Coord],
    pub policy: SearchPolicy,
    /// Piece restricted to its first orientation to drop mirrored duplicates.
    pub pinned_piece: Option<usize>,
}

impl Puzzle {
    /// Creates a puzzle definition with compile-time validation.
    pub const fn new(
        name: &'static str,
        pieces: &'static [&'static [Coord]],
        dims: Dims,
        symmetry: Symmetry,
        fit_offsets: &'static [Coord],
        policy: SearchPolicy,
    ) -> Self {
        assert!(
            fit_offsets.len() <= FIT_WORD_BITS,
            "fit neighbourhood exceeds the fit word"
        );
        Self {
            name,
            pieces,
            dims,
            symmetry,
            fit_offsets,
            policy,
            pinned_piece: None,
        }
    }

    /// Pins `piece` to its first orientation.
    pub const fn pin(mut self, piece: usize) -> Self {
        assert!(piece < self.pieces.len(), "pinned piece out of range");
        self.pinned_piece = Some(piece);
        self
    }

    /// Same puzzle on a different field.
    pub const fn with_dims(mut self, dims: Dims) -> Self {
        self.dims = dims;
        self
    }

    /// Same puzzle with a different search policy.
    pub const fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Total number of cells over all pieces.
    pub fn cell_count(&self) -> usize {
        self.pieces.iter().map(|piece| piece.len()).sum()
    }
}

/// 12 pentominoes on a board 6 columns wide and 10 rows tall.
pub const PLANAR_PUZZLE: Puzzle = Puzzle::new(
    "planar 6x10",
    PLANAR_PIECES,
    Dims::new(10, 6, 1),
    Symmetry::Planar,
    PLANAR_FIT_OFFSETS,
    SearchPolicy::enumerate(PLANAR_SOLUTION_CAP),
)
.pin(0);

/// 31 pieces packed into a 6x5x5 box.
///
/// X is the largest axis: the search fills the box one X slice at a time.
pub const BOX_PUZZLE: Puzzle = Puzzle::new(
    "box 6x5x5",
    BOX_PIECES,
    Dims::new(6, 5, 5),
    Symmetry::Spatial,
    SPATIAL_FIT_OFFSETS,
    SearchPolicy::first_solution(),
);

/// The box puzzle with 29 hexominoes available on top of the 31 pieces.
///
/// Not every piece fits; a filled box is a solution.
pub const HEXOMINO_BOX_PUZZLE: Puzzle = Puzzle::new(
    "box 6x5x5 with hexominoes",
    HEXOMINO_BOX_PIECES,
    Dims::new(6, 5, 5),
    Symmetry::Spatial,
    SPATIAL_FIT_OFFSETS,
    SearchPolicy::first_solution(),
);
