//! Search constants and run policies.

/// Solutions the planar benchmark enumerates before it stops.
pub const PLANAR_SOLUTION_CAP: usize = 5000;

/// Number of 6x10 pentomino tilings with the V piece pinned.
pub const EXPECTED_PLANAR_SOLUTIONS: usize = 2339;

/// Placements between two progress log lines.
pub const PROGRESS_INTERVAL: u64 = 200_000;

/// Maximum pieces per puzzle (one bit each in the used mask).
pub const MAX_PIECES: usize = 64;

/// Largest field interior a parsed size may describe.
pub const MAX_CELLS: usize = 1 << 16;

/// Maximum cells in any single piece across all piece sets.
pub const MAX_CUBES: usize = 6;

/// Width of the fit word; neighbourhoods may not be larger.
pub const FIT_WORD_BITS: usize = 32;

/// How a search explores and when it stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Probe shallower stages when a cell cannot be filled.
    pub backjump: bool,
    /// Stop once this many solutions were reported (`None` = exhaust).
    pub max_solutions: Option<usize>,
}

impl SearchPolicy {
    /// Chronological enumeration up to `cap` solutions.
    pub const fn enumerate(cap: usize) -> Self {
        Self {
            backjump: false,
            max_solutions: Some(cap),
        }
    }

    /// Backjumping search that stops at the first solution.
    pub const fn first_solution() -> Self {
        Self {
            backjump: true,
            max_solutions: Some(1),
        }
    }

    /// Returns a copy with a different solution cap.
    pub const fn with_max_solutions(self, max_solutions: Option<usize>) -> Self {
        Self {
            backjump: self.backjump,
            max_solutions,
        }
    }
}
