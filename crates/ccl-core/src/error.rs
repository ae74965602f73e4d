//! Error types for ccl-core
//!
//! Provides a unified error type for grid construction and access.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// ccl-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input rows have differing lengths
    #[error("invalid grid shape: row {row} has {actual} columns, expected {expected}")]
    InvalidGridShape {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Flat buffer length does not match `rows * cols`
    #[error("data length mismatch: expected {expected} cells, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    /// `rows * cols` does not fit in `usize`
    #[error("grid size overflow: {rows}x{cols}")]
    SizeOverflow { rows: usize, cols: usize },

    /// Cell coordinates outside the grid
    #[error("index out of bounds: ({row}, {col}) in {rows}x{cols} grid")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Two grids that must share a shape do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;
