//! ccl-region - Connected component labeling
//!
//! This crate labels connected components in 2D grids with a two-pass
//! union-find algorithm and filters the labeled regions by size:
//!
//! - **Equivalence resolution** - Directed union-find over provisional labels
//! - **4-way and 8-way labeling** - Single raster scan plus resolution pass
//! - **Size filtering** - Remove components at or below a pixel count
//! - **Component statistics** - Sizes, bounding boxes and centroids
//!
//! # Examples
//!
//! ## Labeling a binary grid
//!
//! ```
//! use ccl_core::Grid;
//! use ccl_region::{ConnectivityType, label_connected_components};
//!
//! let grid = Grid::from_rows(&[
//!     vec![1u8, 1, 0, 0],
//!     vec![0, 0, 0, 1],
//! ]).unwrap();
//!
//! let labels = label_connected_components(&grid, ConnectivityType::FourWay).unwrap();
//! assert_eq!(labels.to_rows(), vec![vec![1, 1, 0, 0], vec![0, 0, 0, 2]]);
//! ```
//!
//! ## Filtering by size
//!
//! ```
//! use ccl_core::Grid;
//! use ccl_region::{filter_components_by_size, label_four_connectivity};
//!
//! let grid = Grid::from_rows(&[vec![1u8, 1, 0, 1, 1, 1]]).unwrap();
//! let labels = label_four_connectivity(&grid).unwrap();
//! let kept = filter_components_by_size(&labels, 2);
//! assert_eq!(kept.row(0), &[0, 0, 0, 2, 2, 2]);
//! ```

pub mod conncomp;
pub mod equivalence;
pub mod error;
pub mod label;
pub mod resolve;
pub mod select;

// Re-export core types
pub use ccl_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export equivalence types
pub use equivalence::EquivalenceMap;

// Re-export conncomp types and functions
pub use conncomp::{
    ConnectedComponent, ConnectivityType, IntensityWindow, LabelingResult, ProvisionalLabels,
    find_connected_components, label_connected_components, label_eight_connectivity,
    label_eight_connectivity_detailed, label_four_connectivity, label_four_connectivity_detailed,
    scan_eight_way, scan_four_way,
};

// Re-export label types and functions
pub use label::{
    ComponentStats, LabelOptions, count_components, get_component_bounds, get_component_stats,
    label_components,
};

// Re-export resolution and selection functions
pub use resolve::{apply_equivalences, resolve_labels};
pub use select::{component_sizes, filter_components_by_size, surviving_labels};
