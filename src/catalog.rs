//! Piece catalog: every distinct orientation of every piece, with the
//! precomputed data the search needs to try it quickly.
//!
//! Each orientation is placed by its anchor, the first cell of its `x = 0`
//! plane in `(y, z)` order. The search always puts the anchor on the cell it
//! is trying to fill.
//!
//! The fit word is a cheap pre-check. Bit `i` of an orientation's word says
//! it covers `anchor + offsets[i]`; bit `i` of a field's word says that cell
//! is already filled. If the two words share a bit the placement cannot fit.

use rustc_hash::FxHashSet;

use crate::config::{FIT_WORD_BITS, MAX_PIECES};
use crate::error::{Result, SolverError};
use crate::geometry::Symmetry;
use crate::pieces::{Coord, Puzzle};

/// Neighbourhood of the anchor checked by the box solver's pre-check.
///
/// Cells at lower `x`, and at lower `y` in the anchor's own plane, are
/// mostly filled already, so the offsets lean towards `+x` and `+y`.
pub const SPATIAL_FIT_OFFSETS: &[Coord] = &[
    // same plane
    (0, 0, 1), (0, 0, 2), (0, 0, 3),
    (0, 1, -2), (0, 1, -1), (0, 1, 0), (0, 1, 1), (0, 1, 2),
    (0, 2, -1), (0, 2, 0), (0, 2, 1),
    (0, 3, 0),
    // next plane
    (1, -2, 0),
    (1, -1, -1), (1, -1, 0), (1, -1, 1),
    (1, 0, -2), (1, 0, -1), (1, 0, 0), (1, 0, 1), (1, 0, 2),
    (1, 1, -1), (1, 1, 0), (1, 1, 1),
    (1, 2, 0),
    // two planes over
    (2, -1, 0),
    (2, 0, -1), (2, 0, 0), (2, 0, 1),
    (2, 1, 0),
    // far planes
    (3, 0, 0),
    (4, 0, 0),
];

/// Neighbourhood of the anchor checked by the planar solver's pre-check,
/// as `(row, column, 0)` offsets.
pub const PLANAR_FIT_OFFSETS: &[Coord] = &[
    (0, 1, 0), (0, 2, 0), (0, 3, 0), (0, 4, 0),
    (1, -3, 0), (1, -2, 0), (1, -1, 0), (1, 0, 0), (1, 1, 0), (1, 2, 0), (1, 3, 0),
    (2, -2, 0), (2, -1, 0), (2, 0, 0), (2, 1, 0), (2, 2, 0),
    (3, -1, 0), (3, 0, 0), (3, 1, 0),
    (4, 0, 0),
];

/// Where an orientation is anchored and which neighbour cells it covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitDescriptor {
    /// `(y, z)` of the anchor cell inside the orientation (its `x` is 0).
    pub anchor: (i32, i32),
    /// Bit `i` set if the orientation covers `anchor + offsets[i]`.
    pub fit_word: u32,
}

/// One distinct orientation of a piece, minimized to the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orientation {
    cells: Vec<Coord>,
    descriptor: FitDescriptor,
}

impl Orientation {
    /// Builds an orientation from minimized, sorted cells.
    ///
    /// Returns `None` for an empty cell list.
    fn new(cells: Vec<Coord>, fit_offsets: &[Coord]) -> Option<Self> {
        // sorted order puts the x = 0 plane first, lowest y then lowest z
        let &(_, anchor_y, anchor_z) = cells.first()?;

        let fit_word = fit_offsets
            .iter()
            .enumerate()
            .filter(|&(_, &(dx, dy, dz))| cells.contains(&(dx, anchor_y + dy, anchor_z + dz)))
            .fold(0u32, |word, (bit, _)| word | (1 << bit));

        Some(Self {
            cells,
            descriptor: FitDescriptor {
                anchor: (anchor_y, anchor_z),
                fit_word,
            },
        })
    }

    /// The occupied cells relative to the orientation's origin.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    #[inline]
    pub fn descriptor(&self) -> FitDescriptor {
        self.descriptor
    }

    #[inline]
    pub fn fit_word(&self) -> u32 {
        self.descriptor.fit_word
    }

    /// Origin that puts the anchor on `target`, or `None` if it would start
    /// at a negative `y` or `z`.
    #[inline]
    pub fn origin_for(&self, (x, y, z): Coord) -> Option<Coord> {
        let (anchor_y, anchor_z) = self.descriptor.anchor;
        let origin = (x, y - anchor_y, z - anchor_z);
        (origin.1 >= 0 && origin.2 >= 0).then_some(origin)
    }
}

/// All unique orientations of every piece of a puzzle.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    orientations: Vec<Vec<Orientation>>,
    fit_offsets: &'static [Coord],
}

impl PieceCatalog {
    /// Generates, deduplicates and describes every orientation.
    ///
    /// Orientations keep generation order; a repeat of an earlier one is
    /// dropped.
    pub fn build(
        pieces: &[&[Coord]],
        symmetry: Symmetry,
        fit_offsets: &'static [Coord],
    ) -> Result<Self> {
        if pieces.len() > MAX_PIECES {
            return Err(SolverError::TooManyPieces {
                count: pieces.len(),
                max: MAX_PIECES,
            });
        }
        debug_assert!(fit_offsets.len() <= FIT_WORD_BITS);

        let orientations = pieces
            .iter()
            .enumerate()
            .map(|(piece, cells)| unique_orientations(piece, cells, symmetry, fit_offsets))
            .collect::<Result<Vec<_>>>()?;

        let catalog = Self {
            orientations,
            fit_offsets,
        };
        log::info!(
            "catalog: {} pieces, {} orientations",
            catalog.len(),
            catalog.total_orientations()
        );
        Ok(catalog)
    }

    /// Builds the catalog for a puzzle, applying its pinned piece.
    pub fn for_puzzle(puzzle: &Puzzle) -> Result<Self> {
        let mut catalog = Self::build(puzzle.pieces, puzzle.symmetry, puzzle.fit_offsets)?;
        if let Some(piece) = puzzle.pinned_piece {
            catalog.pin_orientation(piece);
        }
        Ok(catalog)
    }

    /// Keeps only the first orientation of `piece`.
    ///
    /// Pinning one piece whose orientations the field's own symmetries
    /// permute keeps the search from reporting mirrored copies of a tiling.
    pub fn pin_orientation(&mut self, piece: usize) {
        if let Some(orientations) = self.orientations.get_mut(piece) {
            orientations.truncate(1);
        }
    }

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }

    /// The orientations of `piece`, in search order.
    #[inline]
    pub fn orientations(&self, piece: usize) -> &[Orientation] {
        &self.orientations[piece]
    }

    /// Neighbourhood offsets the fit words are computed over.
    #[inline]
    pub fn fit_offsets(&self) -> &'static [Coord] {
        self.fit_offsets
    }

    pub fn total_orientations(&self) -> usize {
        self.orientations.iter().map(Vec::len).sum()
    }
}

fn unique_orientations(
    piece: usize,
    cells: &[Coord],
    symmetry: Symmetry,
    fit_offsets: &[Coord],
) -> Result<Vec<Orientation>> {
    let mut seen: FxHashSet<Vec<Coord>> = FxHashSet::default();
    let mut unique = Vec::new();

    for candidate in symmetry.orientations(cells) {
        if !seen.insert(candidate.clone()) {
            continue;
        }
        let orientation =
            Orientation::new(candidate, fit_offsets).ok_or(SolverError::EmptyPiece { piece })?;
        unique.push(orientation);
    }

    if unique.is_empty() {
        return Err(SolverError::EmptyPiece { piece });
    }
    Ok(unique)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{BOX_PIECES, PLANAR_PIECES, PLANAR_PUZZLE};

    fn planar_catalog() -> PieceCatalog {
        PieceCatalog::build(PLANAR_PIECES, Symmetry::Planar, PLANAR_FIT_OFFSETS).unwrap()
    }

    fn spatial_catalog() -> PieceCatalog {
        PieceCatalog::build(BOX_PIECES, Symmetry::Spatial, SPATIAL_FIT_OFFSETS).unwrap()
    }

    #[test]
    fn test_planar_orientation_counts() {
        let catalog = planar_catalog();
        let counts: Vec<usize> = (0..catalog.len())
            .map(|piece| catalog.orientations(piece).len())
            .collect();
        // V U P L N Y T X F I W Z
        assert_eq!(counts, vec![4, 4, 8, 8, 8, 8, 4, 1, 8, 2, 4, 4]);
        assert_eq!(catalog.total_orientations(), 63);
    }

    #[test]
    fn test_pinning_leaves_the_original_orientation() {
        let catalog = PieceCatalog::for_puzzle(&PLANAR_PUZZLE).unwrap();
        assert_eq!(catalog.orientations(0).len(), 1);
        assert_eq!(catalog.orientations(0)[0].cells(), planar_catalog().orientations(0)[0].cells());
        assert_eq!(catalog.total_orientations(), 60);
    }

    #[test]
    fn test_spatial_orientation_counts() {
        let catalog = spatial_catalog();
        // flat L: no symmetry in the plane, so all 24 differ
        assert_eq!(catalog.orientations(0).len(), 24);
        // straight pieces only point along one of three axes
        assert_eq!(catalog.orientations(1).len(), 3);
        assert_eq!(catalog.orientations(29).len(), 3);
        assert_eq!(catalog.orientations(30).len(), 3);
        // X is symmetric in the plane as well
        assert_eq!(catalog.orientations(9).len(), 3);
        // T has one mirror line
        assert_eq!(catalog.orientations(8).len(), 12);
    }

    #[test]
    fn test_orientations_are_unique_and_bounded() {
        for (catalog, symmetry) in [
            (planar_catalog(), Symmetry::Planar),
            (spatial_catalog(), Symmetry::Spatial),
        ] {
            for piece in 0..catalog.len() {
                let orientations = catalog.orientations(piece);
                assert!(orientations.len() <= symmetry.transform_count());
                for (i, a) in orientations.iter().enumerate() {
                    for b in &orientations[i + 1..] {
                        assert_ne!(a.cells(), b.cells(), "piece {piece} repeats an orientation");
                    }
                }
            }
        }
    }

    #[test]
    fn test_mirror_pairs_have_equal_counts() {
        let catalog = spatial_catalog();
        for piece in (17..29).step_by(2) {
            assert_eq!(
                catalog.orientations(piece).len(),
                catalog.orientations(piece + 1).len()
            );
        }
    }

    #[test]
    fn test_orientations_are_minimized() {
        let catalog = spatial_catalog();
        for piece in 0..catalog.len() {
            for orientation in catalog.orientations(piece) {
                let cells = orientation.cells();
                assert_eq!(cells.iter().map(|c| c.0).min(), Some(0));
                assert_eq!(cells.iter().map(|c| c.1).min(), Some(0));
                assert_eq!(cells.iter().map(|c| c.2).min(), Some(0));
            }
        }
    }

    #[test]
    fn test_anchor_is_first_cell_of_leading_plane() {
        let catalog = spatial_catalog();
        for piece in 0..catalog.len() {
            for orientation in catalog.orientations(piece) {
                let (anchor_y, anchor_z) = orientation.descriptor().anchor;
                assert!(orientation.cells().contains(&(0, anchor_y, anchor_z)));
                for &(x, y, z) in orientation.cells() {
                    if x == 0 {
                        assert!((anchor_y, anchor_z) <= (y, z));
                    }
                }
            }
        }
    }

    #[test]
    fn test_fit_word_marks_covered_neighbours() {
        let catalog = spatial_catalog();
        // I pentomino along x, anchored at its first cube
        let along_x = &catalog.orientations(1)[0];
        assert_eq!(along_x.descriptor().anchor, (0, 0));
        let expected = [(1, 0, 0), (2, 0, 0), (3, 0, 0), (4, 0, 0)]
            .iter()
            .map(|offset| SPATIAL_FIT_OFFSETS.iter().position(|o| o == offset).unwrap())
            .fold(0u32, |word, bit| word | (1 << bit));
        assert_eq!(along_x.fit_word(), expected);
    }

    #[test]
    fn test_origin_for_rejects_negative_start() {
        let catalog = planar_catalog();
        // X pentomino: anchor sits one column in from its left edge
        let cross = &catalog.orientations(7)[0];
        assert_eq!(cross.descriptor().anchor, (1, 0));
        assert_eq!(cross.origin_for((3, 0, 0)), None);
        assert_eq!(cross.origin_for((3, 2, 0)), Some((3, 1, 0)));
    }

    #[test]
    fn test_empty_piece_is_rejected() {
        let pieces: &[&[Coord]] = &[&[(0, 0, 0)], &[]];
        let err = PieceCatalog::build(pieces, Symmetry::Spatial, SPATIAL_FIT_OFFSETS).unwrap_err();
        assert_eq!(err, SolverError::EmptyPiece { piece: 1 });
    }

    #[test]
    fn test_too_many_pieces_is_rejected() {
        let pieces: Vec<&[Coord]> = vec![&[(0, 0, 0)][..]; MAX_PIECES + 1];
        let err = PieceCatalog::build(&pieces, Symmetry::Planar, PLANAR_FIT_OFFSETS).unwrap_err();
        assert!(matches!(err, SolverError::TooManyPieces { .. }));
    }

    #[test]
    fn test_fit_offsets_fit_in_the_word() {
        assert_eq!(SPATIAL_FIT_OFFSETS.len(), 32);
        assert!(PLANAR_FIT_OFFSETS.len() <= FIT_WORD_BITS);
    }
}
