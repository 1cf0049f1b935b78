//! Depth-first exact-cover search with backjumping.
//!
//! Each depth owns one stage: a full copy of the field with that many pieces
//! placed. The search always fills the first empty cell in traversal order.
//! When no unused piece can cover that cell, a backjumping search probes the
//! shallower stages for the deepest one at which the cell *can* be covered
//! and unwinds straight to it; every depth in between would hit the same
//! dead end.
//!
//! Probing only considers placements anchored on the stuck cell, so a jump
//! may skip tilings. Enumerating searches run chronologically instead.

use crate::catalog::PieceCatalog;
use crate::config::{SearchPolicy, PROGRESS_INTERVAL};
use crate::error::{Result, SolverError};
use crate::grid::{Dims, Field, Traversal};
use crate::pieces::{Coord, Puzzle};
use crate::placement::Placement;

/// A complete packing, as handed to a [`SolutionSink`].
#[derive(Debug, Clone, Copy)]
pub struct Solution<'a> {
    pub field: &'a Field,
    /// Placements in the order the search made them.
    pub placements: &'a [Placement],
    /// 1-based number of this solution within the run.
    pub index: usize,
}

/// Receives every solution as it is found.
pub trait SolutionSink {
    fn report(&mut self, solution: &Solution<'_>);
}

impl<F: FnMut(&Solution<'_>)> SolutionSink for F {
    fn report(&mut self, solution: &Solution<'_>) {
        self(solution)
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Pieces written into a stage.
    pub placements: u64,
    pub solutions: usize,
    /// Placements that left exactly one piece to place.
    pub near_complete: u64,
    /// Unwinds past at least one depth.
    pub backjumps: u64,
    /// Shallower stages examined while looking for a backjump target.
    pub probes: u64,
}

#[derive(Debug, Default)]
struct SearchContext {
    abort: bool,
    /// Depth the search is unwinding to.
    backup_to: Option<usize>,
    stats: SearchStats,
}

/// Search state for one catalog on one field.
pub struct Solver<'a, S> {
    catalog: &'a PieceCatalog,
    dims: Dims,
    policy: SearchPolicy,
    traversal: Traversal,
    stages: Vec<Field>,
    placements: Vec<Placement>,
    context: SearchContext,
    sink: S,
}

impl<'a, S: SolutionSink> Solver<'a, S> {
    pub fn new(catalog: &'a PieceCatalog, dims: Dims, policy: SearchPolicy, sink: S) -> Self {
        let depths = catalog.len() + 1;
        Self {
            catalog,
            dims,
            policy,
            traversal: Traversal::new(dims),
            stages: vec![Field::fresh(dims); depths],
            placements: Vec::with_capacity(catalog.len()),
            context: SearchContext::default(),
            sink,
        }
    }

    /// Searches from an empty field until the space is exhausted or the
    /// policy's solution cap is reached.
    pub fn run(&mut self) -> Result<SearchStats> {
        self.stages[0] = Field::fresh(self.dims);
        self.placements.clear();
        self.context = SearchContext::default();

        self.search(0, 0)?;

        let stats = self.context.stats;
        log::info!(
            "search finished: {} solutions, {} placements, {} backjumps",
            stats.solutions,
            stats.placements,
            stats.backjumps
        );
        Ok(stats)
    }

    pub fn stats(&self) -> SearchStats {
        self.context.stats
    }

    fn search(&mut self, depth: usize, cursor: usize) -> Result<()> {
        if depth == self.catalog.len() {
            self.complete(depth);
            return Ok(());
        }
        // pieces may be left over once every cell is covered
        let Some((cursor, target)) = self.traversal.next_empty(&self.stages[depth], cursor) else {
            self.complete(depth);
            return Ok(());
        };

        let catalog = self.catalog;
        let in_last_slice = target.0 as usize + 1 >= self.dims.x;
        let mut try_level = depth;

        loop {
            let word = self.stages[try_level].fit_word(target, catalog.fit_offsets());
            let mut fits = 0usize;

            'pieces: for piece in 0..catalog.len() {
                if self.stages[try_level].is_used(piece) {
                    continue;
                }
                for (index, orientation) in catalog.orientations(piece).iter().enumerate() {
                    if word & orientation.fit_word() != 0 {
                        continue;
                    }
                    if !self.stages[try_level].can_place(catalog, target, piece, index)? {
                        continue;
                    }
                    fits += 1;
                    if try_level != depth {
                        break 'pieces;
                    }

                    self.descend(depth, cursor, Placement::new(piece, index, target))?;

                    if self.context.abort {
                        return Ok(());
                    }
                    if let Some(level) = self.context.backup_to {
                        if level < depth {
                            return Ok(());
                        }
                        self.context.backup_to = None;
                    }
                }
            }

            if fits > 0 {
                if try_level != depth {
                    log::trace!("backjump {depth} -> {try_level} at {target:?}");
                    self.context.stats.backjumps += 1;
                    self.context.backup_to = Some(try_level);
                }
                return Ok(());
            }
            // the last slice has nothing behind it that a jump could help
            if !self.policy.backjump || in_last_slice {
                return Ok(());
            }
            if try_level == 0 {
                return Err(SolverError::BackjumpUnderflow {
                    depth,
                    cell: target,
                });
            }
            try_level -= 1;
            self.context.stats.probes += 1;
        }
    }

    /// Places onto a copy of stage `depth` and searches one level deeper.
    fn descend(&mut self, depth: usize, cursor: usize, placement: Placement) -> Result<()> {
        let (done, next) = self.stages.split_at_mut(depth + 1);
        next[0].clone_from(&done[depth]);
        next[0].place(self.catalog, placement)?;

        self.context.stats.placements += 1;
        if depth + 2 == self.catalog.len() {
            self.context.stats.near_complete += 1;
        }
        if self.context.stats.placements % PROGRESS_INTERVAL == 0 {
            self.log_progress(depth, placement.target);
        }

        self.placements.push(placement);
        let outcome = self.search(depth + 1, cursor);
        self.placements.pop();
        outcome
    }

    fn complete(&mut self, depth: usize) {
        self.context.stats.solutions += 1;
        let index = self.context.stats.solutions;
        log::info!(
            "solution {index} after {} placements, {} one piece short",
            self.context.stats.placements,
            self.context.stats.near_complete
        );

        self.sink.report(&Solution {
            field: &self.stages[depth],
            placements: &self.placements,
            index,
        });

        if self.policy.max_solutions.is_some_and(|cap| index >= cap) {
            self.context.abort = true;
        }
    }

    fn log_progress(&self, depth: usize, (x, _, _): Coord) {
        log::debug!(
            "{} placements, depth {depth}, slice {x} of {}",
            self.context.stats.placements,
            self.dims.x
        );
    }
}

impl Puzzle {
    /// Builds this puzzle's catalog and runs its search policy.
    pub fn solve<S: SolutionSink>(&self, sink: S) -> Result<SearchStats> {
        let catalog = PieceCatalog::for_puzzle(self)?;
        log::info!(
            "solving {}: {} pieces, {} cells to fill, field {}",
            self.name,
            catalog.len(),
            self.dims.cell_count(),
            self.dims
        );
        Solver::new(&catalog, self.dims, self.policy, sink).run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SPATIAL_FIT_OFFSETS;
    use crate::geometry::Symmetry;
    use crate::placement::replay;

    const CUBE: &[Coord] = &[(0, 0, 0)];
    const DOMINO: &[Coord] = &[(0, 0, 0), (1, 0, 0)];
    const ROD: &[Coord] = &[(0, 0, 0), (1, 0, 0), (2, 0, 0)];
    const LONG_ROD: &[Coord] = &[(0, 0, 0), (1, 0, 0), (2, 0, 0), (3, 0, 0)];

    fn catalog(pieces: &[&[Coord]]) -> PieceCatalog {
        PieceCatalog::build(pieces, Symmetry::Spatial, SPATIAL_FIT_OFFSETS).unwrap()
    }

    fn collect(
        catalog: &PieceCatalog,
        dims: Dims,
        policy: SearchPolicy,
    ) -> (Result<SearchStats>, Vec<Vec<Placement>>) {
        let mut found = Vec::new();
        let mut solver = Solver::new(catalog, dims, policy, |solution: &Solution<'_>| {
            found.push(solution.placements.to_vec());
        });
        let stats = solver.run();
        drop(solver);
        (stats, found)
    }

    #[test]
    fn test_backjump_skips_levels_that_cannot_help() {
        // a 9-long line: the cube is placed first and strands the rods
        let catalog = catalog(&[CUBE, ROD, ROD, ROD]);
        let (stats, found) = collect(&catalog, Dims::new(9, 1, 1), SearchPolicy::first_solution());
        let stats = stats.unwrap();

        assert_eq!(stats.solutions, 1);
        assert_eq!(stats.placements, 9);
        assert_eq!(stats.backjumps, 3);
        assert_eq!(stats.probes, 6);

        let placed: Vec<(usize, Coord)> = found[0].iter().map(|p| (p.piece, p.target)).collect();
        assert_eq!(placed, vec![(1, (0, 0, 0)), (2, (3, 0, 0)), (3, (6, 0, 0))]);
    }

    #[test]
    fn test_chronological_search_retries_every_level() {
        let catalog = catalog(&[CUBE, ROD, ROD, ROD]);
        let policy = SearchPolicy {
            backjump: false,
            max_solutions: Some(1),
        };
        let (stats, found) = collect(&catalog, Dims::new(9, 1, 1), policy);
        let stats = stats.unwrap();

        assert_eq!(stats.placements, 17);
        assert_eq!(stats.backjumps, 0);
        assert_eq!(stats.probes, 0);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn test_backjump_below_depth_zero_is_an_error() {
        let catalog = catalog(&[LONG_ROD]);
        let (stats, found) = collect(&catalog, Dims::new(3, 1, 1), SearchPolicy::first_solution());
        assert_eq!(
            stats,
            Err(SolverError::BackjumpUnderflow {
                depth: 0,
                cell: (0, 0, 0),
            })
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_backjump_in_last_slice() {
        let catalog = catalog(&[DOMINO]);
        let (stats, found) = collect(&catalog, Dims::new(1, 1, 1), SearchPolicy::first_solution());
        assert_eq!(stats, Ok(SearchStats::default()));
        assert!(found.is_empty());
    }

    #[test]
    fn test_enumeration_finds_every_tiling() {
        // two dominoes in a 2x2 square: side by side either way, in either order
        let catalog = catalog(&[DOMINO, DOMINO]);
        let (stats, found) = collect(&catalog, Dims::new(2, 2, 1), SearchPolicy::enumerate(100));
        let stats = stats.unwrap();
        assert_eq!(stats.solutions, 4);
        assert_eq!(stats.placements, 8);
        // every first domino leaves the other one to place
        assert_eq!(stats.near_complete, 4);
        assert_eq!(found.len(), 4);
        for (i, a) in found.iter().enumerate() {
            for b in &found[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_solution_cap_stops_the_search() {
        let catalog = catalog(&[DOMINO, DOMINO]);
        let (stats, found) = collect(&catalog, Dims::new(2, 2, 1), SearchPolicy::enumerate(3));
        assert_eq!(stats.unwrap().solutions, 3);
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn test_reported_placements_replay_to_the_reported_field() {
        let catalog = catalog(&[ROD, ROD, DOMINO, DOMINO, CUBE, CUBE]);
        let dims = Dims::new(3, 2, 2);
        let mut checked = 0;
        let mut solver = Solver::new(
            &catalog,
            dims,
            SearchPolicy::enumerate(50),
            |solution: &Solution<'_>| {
                let rebuilt = replay(&catalog, dims, solution.placements).unwrap();
                assert_eq!(&rebuilt, solution.field);
                assert_eq!(solution.field.empty_count(), 0);
                assert_eq!(solution.field.placed_count(), solution.placements.len());
                checked += 1;
            },
        );
        let stats = solver.run().unwrap();
        drop(solver);
        assert!(stats.solutions > 0);
        assert_eq!(checked, stats.solutions);
    }

    #[test]
    fn test_leftover_pieces_still_solve() {
        let catalog = catalog(&[ROD, DOMINO, CUBE]);
        let (stats, found) = collect(&catalog, Dims::new(3, 1, 1), SearchPolicy::first_solution());
        assert_eq!(stats.unwrap().solutions, 1);
        assert_eq!(found[0], vec![Placement::new(0, 0, (0, 0, 0))]);
    }

    #[test]
    fn test_rerunning_gives_identical_stats() {
        let catalog = catalog(&[CUBE, ROD, ROD, ROD]);
        let mut solver = Solver::new(
            &catalog,
            Dims::new(9, 1, 1),
            SearchPolicy::first_solution(),
            |_: &Solution<'_>| {},
        );
        let first = solver.run().unwrap();
        let second = solver.run().unwrap();
        assert_eq!(first, second);
        assert_eq!(solver.stats(), second);
    }
}
