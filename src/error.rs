//! Error types for the solvers.
//!
//! Every variant is an invariant violation: bad static piece data or a broken
//! search assumption. Ordinary dead ends in the search are not errors.

use thiserror::Error;

use crate::pieces::Coord;

/// Result type alias for solver operations.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Invariant violations detected while building or searching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// A piece definition has no cells.
    #[error("piece {piece} has no cells")]
    EmptyPiece { piece: usize },

    /// More pieces than the used-piece mask can track.
    #[error("{count} pieces given, at most {max} supported")]
    TooManyPieces { count: usize, max: usize },

    /// A piece was placed twice.
    #[error("piece {piece} is already placed")]
    PieceAlreadyUsed { piece: usize },

    /// Anchoring an orientation on the target pushes its origin off the field.
    #[error("piece {piece} orientation {orientation} anchored at {target:?} starts outside the field")]
    OriginOutOfBounds {
        piece: usize,
        orientation: usize,
        target: Coord,
    },

    /// A placement overlaps an occupied or guard cell.
    #[error("piece {piece} orientation {orientation} overlaps a filled cell at {cell:?}")]
    Interference {
        piece: usize,
        orientation: usize,
        cell: Coord,
    },

    /// No stage down to depth 0 can fill the stuck cell.
    #[error("backjump from depth {depth} found no stage able to fill {cell:?}")]
    BackjumpUnderflow { depth: usize, cell: Coord },

    /// Field dimensions are unusable.
    #[error("invalid field dimensions: {0}")]
    InvalidDimensions(String),
}
