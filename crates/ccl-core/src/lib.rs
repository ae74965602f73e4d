//! ccl-core - Basic data structures for connected-component labeling
//!
//! This crate provides the fundamental data structures shared by the
//! labeling crates:
//!
//! - [`Grid`] - Rectangular row-major cell container
//! - [`LabelGrid`] - A `Grid<u32>` of component labels (`0` = background)
//! - [`Rect`] - Axis-aligned rectangle in grid coordinates
//! - [`binarize`] - Grayscale to `0`/`1` conversion

pub mod error;
pub mod grid;
pub mod rect;
pub mod threshold;

pub use error::{Error, Result};
pub use grid::{Grid, LabelGrid};
pub use rect::Rect;
pub use threshold::{DEFAULT_BINARY_THRESHOLD, binarize, binarize_default};
