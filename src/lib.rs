//! Pentomino Solver Library
//!
//! Exact-cover search for packing polyomino and polycube pieces into a
//! bounded field: the 6x10 pentomino rectangle and a 6x5x5 box of mixed
//! pentacubes.

pub mod catalog;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod pieces;
pub mod placement;
pub mod report;
pub mod solver;

pub use catalog::PieceCatalog;
pub use error::{Result, SolverError};
pub use grid::{Dims, Field};
pub use pieces::{Puzzle, BOX_PUZZLE, HEXOMINO_BOX_PUZZLE, PLANAR_PUZZLE};
pub use solver::{SearchStats, Solution, SolutionSink, Solver};

use report::LogSink;

/// Enumerates tilings of the 6x10 rectangle with the twelve pentominoes.
///
/// Returns the number of tilings found; every tiling is logged at debug
/// level.
pub fn run_solve_2d() -> Result<usize> {
    let stats = PLANAR_PUZZLE.solve(LogSink::planar())?;
    Ok(stats.solutions)
}

/// Packs the box benchmark until the first solution.
///
/// Returns the number of placements the search performed.
pub fn run_solve_3d() -> Result<u64> {
    let stats = BOX_PUZZLE.solve(LogSink::layered())?;
    Ok(stats.placements)
}
