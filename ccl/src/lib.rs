//! ccl - Connected component labeling for 2D grids
//!
//! Labels the connected foreground regions of a binary or grayscale grid
//! with a two-pass union-find algorithm and filters them by size.
//!
//! # Overview
//!
//! - 4-way labeling of binary grids
//! - 8-way labeling of grayscale grids with an inclusive intensity window
//! - Size filtering of labeled regions
//! - Component statistics (sizes, bounding boxes, centroids)
//!
//! # Example
//!
//! ```
//! use ccl::Grid;
//! use ccl::region::{IntensityWindow, label_eight_connectivity};
//!
//! let grid = Grid::from_rows(&[vec![1u8, 0], vec![0, 1]]).unwrap();
//! let window = IntensityWindow::new(1, 1).unwrap();
//! let labels = label_eight_connectivity(&grid, window).unwrap();
//! assert_eq!(labels[(0, 0)], labels[(1, 1)]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use ccl_core::*;

// Re-export the labeling crate as a module to avoid name conflicts
pub use ccl_region as region;
