//! Placing pieces on a field.
//!
//! A placement puts an orientation's anchor on a target cell. The origin of
//! the orientation is then `target - anchor` on `y` and `z`, with `x`
//! unchanged since every anchor sits in its orientation's `x = 0` plane.

use crate::catalog::PieceCatalog;
use crate::error::{Result, SolverError};
use crate::grid::{Cell, Dims, Field};
use crate::pieces::Coord;

/// One step of a partial solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub piece: usize,
    pub orientation: usize,
    /// Cell the anchor was put on.
    pub target: Coord,
}

impl Placement {
    pub fn new(piece: usize, orientation: usize, target: Coord) -> Self {
        Self {
            piece,
            orientation,
            target,
        }
    }

    /// Absolute cells covered, or `None` if the origin would be negative.
    pub fn cells<'a>(&self, catalog: &'a PieceCatalog) -> Option<impl Iterator<Item = Coord> + 'a> {
        let orientation = &catalog.orientations(self.piece)[self.orientation];
        let (ox, oy, oz) = orientation.origin_for(self.target)?;
        Some(
            orientation
                .cells()
                .iter()
                .map(move |&(x, y, z)| (ox + x, oy + y, oz + z)),
        )
    }
}

impl Field {
    /// Whether `orientation` of `piece` fits with its anchor on `target`.
    ///
    /// A fitting placement of a piece that is already used means the search
    /// lost track of its state, and is an error.
    pub fn can_place(
        &self,
        catalog: &PieceCatalog,
        target: Coord,
        piece: usize,
        orientation: usize,
    ) -> Result<bool> {
        let Some(mut cells) = Placement::new(piece, orientation, target).cells(catalog) else {
            return Ok(false);
        };
        if !cells.all(|cell| self.is_empty_at(cell)) {
            return Ok(false);
        }
        if self.is_used(piece) {
            return Err(SolverError::PieceAlreadyUsed { piece });
        }
        Ok(true)
    }

    /// Writes `placement` into the field and marks its piece used.
    ///
    /// Callers check [`Field::can_place`] first; every failure here is an
    /// error. The field is untouched when an error is returned.
    pub fn place(&mut self, catalog: &PieceCatalog, placement: Placement) -> Result<()> {
        let Placement {
            piece,
            orientation,
            target,
        } = placement;

        let cells: Vec<Coord> = placement
            .cells(catalog)
            .ok_or(SolverError::OriginOutOfBounds {
                piece,
                orientation,
                target,
            })?
            .collect();

        if self.is_used(piece) {
            return Err(SolverError::PieceAlreadyUsed { piece });
        }
        if let Some(&cell) = cells.iter().find(|&&cell| !self.is_empty_at(cell)) {
            return Err(SolverError::Interference {
                piece,
                orientation,
                cell,
            });
        }

        for cell in cells {
            self.set(cell, Cell::Occupied(piece as u8));
        }
        self.mark_used(piece);
        Ok(())
    }
}

/// Rebuilds a field by applying `placements` in order to an empty one.
pub fn replay(catalog: &PieceCatalog, dims: Dims, placements: &[Placement]) -> Result<Field> {
    let mut field = Field::fresh(dims);
    for &placement in placements {
        field.place(catalog, placement)?;
    }
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PLANAR_FIT_OFFSETS, SPATIAL_FIT_OFFSETS};
    use crate::geometry::Symmetry;
    use crate::pieces::{BOX_PIECES, PLANAR_PIECES};

    const DOMINO: &[Coord] = &[(0, 0, 0), (1, 0, 0)];
    const CORNER: &[Coord] = &[(0, 0, 0), (0, 1, 0), (1, 0, 0)];

    fn small_catalog() -> PieceCatalog {
        PieceCatalog::build(&[DOMINO, CORNER], Symmetry::Spatial, SPATIAL_FIT_OFFSETS).unwrap()
    }

    /// Deterministic xorshift stream for patterned fields.
    fn pattern(seed: u64) -> impl FnMut() -> u64 {
        let mut state = seed;
        move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }
    }

    #[test]
    fn test_place_writes_cells_and_marks_used() {
        let catalog = small_catalog();
        let mut field = Field::fresh(Dims::new(2, 2, 1));
        field.place(&catalog, Placement::new(0, 0, (0, 0, 0))).unwrap();

        assert_eq!(field.cell((0, 0, 0)), Cell::Occupied(0));
        assert_eq!(field.cell((1, 0, 0)), Cell::Occupied(0));
        assert!(field.is_used(0));
        assert!(!field.is_used(1));
        assert_eq!(field.empty_count(), 2);
    }

    #[test]
    fn test_can_place_rejects_overlap_and_guards() {
        let catalog = small_catalog();
        let mut field = Field::fresh(Dims::new(2, 2, 1));
        assert!(field.can_place(&catalog, (0, 0, 0), 0, 0).unwrap());
        // pokes into the guard layer
        assert!(!field.can_place(&catalog, (1, 0, 0), 0, 0).unwrap());

        field.place(&catalog, Placement::new(0, 0, (0, 0, 0))).unwrap();
        assert!(!field.can_place(&catalog, (0, 0, 0), 1, 0).unwrap());
    }

    #[test]
    fn test_can_place_rejects_negative_origin() {
        let catalog = small_catalog();
        let field = Field::fresh(Dims::new(3, 3, 3));
        let (piece, orientation) = (0..catalog.orientations(1).len())
            .map(|o| (1, o))
            .find(|&(p, o)| catalog.orientations(p)[o].descriptor().anchor.0 > 0)
            .unwrap();
        assert!(!field.can_place(&catalog, (0, 0, 0), piece, orientation).unwrap());
    }

    #[test]
    fn test_fitting_used_piece_is_an_error() {
        let catalog = small_catalog();
        let mut field = Field::fresh(Dims::new(4, 1, 1));
        field.place(&catalog, Placement::new(0, 0, (0, 0, 0))).unwrap();
        assert_eq!(
            field.can_place(&catalog, (2, 0, 0), 0, 0),
            Err(SolverError::PieceAlreadyUsed { piece: 0 })
        );
        // no fit, so no error
        assert_eq!(field.can_place(&catalog, (1, 0, 0), 0, 0), Ok(false));
    }

    #[test]
    fn test_place_errors_leave_field_untouched() {
        let catalog = small_catalog();
        let mut field = Field::fresh(Dims::new(4, 2, 1));
        field.place(&catalog, Placement::new(0, 0, (0, 0, 0))).unwrap();
        let before = field.clone();

        assert_eq!(
            field.place(&catalog, Placement::new(0, 0, (2, 0, 0))),
            Err(SolverError::PieceAlreadyUsed { piece: 0 })
        );
        assert!(matches!(
            field.place(&catalog, Placement::new(1, 0, (1, 0, 0))),
            Err(SolverError::Interference { piece: 1, .. })
        ));
        assert_eq!(field, before);
    }

    #[test]
    fn test_place_with_negative_origin_is_an_error() {
        let catalog =
            PieceCatalog::build(PLANAR_PIECES, Symmetry::Planar, PLANAR_FIT_OFFSETS).unwrap();
        let mut field = Field::fresh(Dims::new(10, 6, 1));
        // the X pentomino's anchor is one column in
        assert_eq!(
            field.place(&catalog, Placement::new(7, 0, (0, 0, 0))),
            Err(SolverError::OriginOutOfBounds {
                piece: 7,
                orientation: 0,
                target: (0, 0, 0),
            })
        );
    }

    #[test]
    fn test_restoring_a_stage_undoes_a_placement() {
        let catalog = small_catalog();
        let dims = Dims::new(3, 2, 2);
        let mut stages = vec![Field::fresh(dims), Field::fresh(dims)];
        stages[0].place(&catalog, Placement::new(1, 0, (0, 0, 0))).unwrap();
        let snapshot = stages[0].clone();

        let (done, next) = stages.split_at_mut(1);
        next[0].clone_from(&done[0]);
        next[0].place(&catalog, Placement::new(0, 0, (1, 1, 0))).unwrap();
        assert_ne!(stages[1], stages[0]);

        let (done, next) = stages.split_at_mut(1);
        next[0].clone_from(&done[0]);
        assert_eq!(stages[1], snapshot);
    }

    #[test]
    fn test_replay_matches_incremental_placement() {
        let catalog = small_catalog();
        let dims = Dims::new(3, 2, 1);
        let placements = [
            Placement::new(1, 0, (0, 0, 0)),
            Placement::new(0, 0, (1, 1, 0)),
        ];

        let mut field = Field::fresh(dims);
        for &placement in &placements {
            field.place(&catalog, placement).unwrap();
        }
        assert_eq!(replay(&catalog, dims, &placements).unwrap(), field);
        assert_eq!(replay(&catalog, dims, &[]).unwrap(), Field::fresh(dims));
    }

    #[test]
    fn test_fit_word_never_rejects_a_valid_placement() {
        let cases = [
            (
                PieceCatalog::build(BOX_PIECES, Symmetry::Spatial, SPATIAL_FIT_OFFSETS).unwrap(),
                Dims::new(6, 5, 5),
            ),
            (
                PieceCatalog::build(PLANAR_PIECES, Symmetry::Planar, PLANAR_FIT_OFFSETS).unwrap(),
                Dims::new(10, 6, 1),
            ),
        ];

        for (catalog, dims) in &cases {
            for seed in 1..=12u64 {
                let mut next = pattern(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15));
                let mut field = Field::fresh(*dims);
                let interior: Vec<Coord> = field.interior().collect();
                for &cell in &interior {
                    // roughly a quarter of the cells filled
                    if next() % 4 == 0 {
                        field.set(cell, Cell::Occupied(0));
                    }
                }

                let mut fits = 0;
                for &target in &interior {
                    let word = field.fit_word(target, catalog.fit_offsets());
                    for piece in 0..catalog.len() {
                        for (index, orientation) in catalog.orientations(piece).iter().enumerate() {
                            if field.can_place(catalog, target, piece, index).unwrap() {
                                fits += 1;
                                assert_eq!(word & orientation.fit_word(), 0);
                            }
                        }
                    }
                }
                assert!(fits > 0, "pattern {seed} left no room for any piece");
            }
        }
    }
}
