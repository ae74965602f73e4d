//! Grayscale to binary conversion
//!
//! Labelers working on 4-connectivity expect cells that are exactly `0` or
//! `1`. These helpers turn an 8-bit grayscale grid into that form.

use crate::grid::Grid;

/// Default binarization threshold for 8-bit input.
pub const DEFAULT_BINARY_THRESHOLD: u8 = 128;

/// Binarize a grayscale grid.
///
/// A cell becomes `1` if its value is strictly greater than `threshold`,
/// otherwise `0`.
///
/// # Examples
///
/// ```
/// use ccl_core::{Grid, binarize};
///
/// let gray = Grid::from_rows(&[vec![0u8, 128, 129, 255]]).unwrap();
/// let bin = binarize(&gray, 128);
/// assert_eq!(bin.row(0), &[0, 0, 1, 1]);
/// ```
pub fn binarize(grid: &Grid<u8>, threshold: u8) -> Grid<u8> {
    grid.map(|v| u8::from(v > threshold))
}

/// Binarize using [`DEFAULT_BINARY_THRESHOLD`].
pub fn binarize_default(grid: &Grid<u8>) -> Grid<u8> {
    binarize(grid, DEFAULT_BINARY_THRESHOLD)
}
