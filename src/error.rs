use thiserror::Error;

use crate::cell::Cell;

/// Failures reported by grid construction and by the search entry points. A search that
/// exhausts its frontier is not an error; it yields [PathResult::NotFound](crate::PathResult::NotFound).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("cell {cell} lies outside the {rows}x{cols} grid")]
    OutOfBounds { cell: Cell, rows: usize, cols: usize },
    #[error("expected {expected} flags for a {rows}x{cols} grid, got {found}")]
    DimensionMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("invalid character '{ch}' found at ({row},{col})")]
    InvalidCharacter { ch: char, row: usize, col: usize },
    #[error("blocked probability {probability} is not within [0, 1]")]
    InvalidProbability { probability: f64 },
    #[error("empty input")]
    EmptyInput,
    #[error("search was cancelled after {expanded} expansions")]
    Cancelled { expanded: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
