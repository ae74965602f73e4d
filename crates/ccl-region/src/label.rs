//! Labeling pipeline and component statistics
//!
//! This module provides high-level functions for labeling a grid in one
//! call and for analyzing the components of a resolved label grid.

use crate::conncomp::{
    ConnectivityType, IntensityWindow, label_eight_connectivity, label_four_connectivity,
};
use crate::error::RegionResult;
use crate::select::filter_components_by_size;
use ccl_core::{Grid, LabelGrid, Rect};
use log::trace;
use std::collections::{BTreeMap, BTreeSet};

/// Options for [`label_components`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelOptions {
    /// Neighbor rule used by the scan
    pub connectivity: ConnectivityType,
    /// Foreground window, used by 8-way labeling only. Defaults to
    /// [`IntensityWindow::FULL`], which makes every cell foreground.
    pub window: IntensityWindow,
    /// Remove components with at most this many cells
    pub size_threshold: Option<usize>,
}

impl LabelOptions {
    /// Create new options with the specified connectivity
    ///
    /// The window stays at [`IntensityWindow::FULL`] for both rules. This
    /// differs from [`label_connected_components`], which treats only
    /// non-zero cells as foreground; pass
    /// `with_window(IntensityWindow::NONZERO)` to label binary input with
    /// 8-way connectivity.
    ///
    /// [`label_connected_components`]: crate::label_connected_components
    pub fn new(connectivity: ConnectivityType) -> Self {
        Self {
            connectivity,
            ..Self::default()
        }
    }

    /// Set the foreground intensity window
    pub fn with_window(mut self, window: IntensityWindow) -> Self {
        self.window = window;
        self
    }

    /// Enable the size filter
    pub fn with_size_threshold(mut self, threshold: usize) -> Self {
        self.size_threshold = Some(threshold);
        self
    }
}

/// Label a grid and optionally filter the result by component size.
///
/// With [`ConnectivityType::FourWay`] non-zero cells are foreground and
/// `options.window` is ignored. With [`ConnectivityType::EightWay`] cells
/// inside `options.window` are foreground.
///
/// # Arguments
///
/// * `grid` - Input grid
/// * `options` - Connectivity, foreground window and size filter
///
/// # Returns
///
/// The resolved label grid, with filtered-out components set to `0`.
///
/// # Examples
///
/// ```
/// use ccl_core::Grid;
/// use ccl_region::{ConnectivityType, LabelOptions, label_components};
///
/// let grid = Grid::from_rows(&[vec![1u8, 1, 0, 1, 1, 1]]).unwrap();
/// let options = LabelOptions::new(ConnectivityType::FourWay).with_size_threshold(2);
/// let labels = label_components(&grid, &options).unwrap();
/// assert_eq!(labels.row(0), &[0, 0, 0, 2, 2, 2]);
/// ```
pub fn label_components(grid: &Grid<u8>, options: &LabelOptions) -> RegionResult<LabelGrid> {
    let labels = match options.connectivity {
        ConnectivityType::FourWay => label_four_connectivity(grid)?,
        ConnectivityType::EightWay => label_eight_connectivity(grid, options.window)?,
    };

    match options.size_threshold {
        Some(threshold) => {
            let filtered = filter_components_by_size(&labels, threshold);
            trace!(
                "size filter > {threshold}: {} of {} components kept",
                count_components(&filtered),
                count_components(&labels)
            );
            Ok(filtered)
        }
        None => Ok(labels),
    }
}

/// Count the distinct components in a resolved label grid
///
/// # Arguments
///
/// * `labels` - Label grid returned by a labeler or the size filter
///
/// # Returns
///
/// Number of distinct positive labels. Labels need not be contiguous, so
/// this is not the largest label.
pub fn count_components(labels: &LabelGrid) -> usize {
    labels
        .data()
        .iter()
        .filter(|&&l| l > 0)
        .collect::<BTreeSet<_>>()
        .len()
}

/// Component statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Bounding box
    pub bounds: Rect,
    /// Number of cells
    pub pixel_count: usize,
    /// Centroid row coordinate
    pub centroid_row: f64,
    /// Centroid column coordinate
    pub centroid_col: f64,
}

/// Get detailed statistics for all components
///
/// # Arguments
///
/// * `labels` - Resolved label grid
///
/// # Returns
///
/// One [`ComponentStats`] per positive label, sorted by label.
pub fn get_component_stats(labels: &LabelGrid) -> Vec<ComponentStats> {
    struct Accum {
        count: usize,
        sum_row: u64,
        sum_col: u64,
        bounds: Rect,
    }

    let mut stats: BTreeMap<u32, Accum> = BTreeMap::new();

    for (row, col, label) in labels.iter_cells() {
        if label == 0 {
            continue;
        }
        let acc = stats.entry(label).or_insert_with(|| Accum {
            count: 0,
            sum_row: 0,
            sum_col: 0,
            bounds: Rect::new(row, col, 1, 1),
        });
        acc.count += 1;
        acc.sum_row += row as u64;
        acc.sum_col += col as u64;
        acc.bounds.expand_to(row, col);
    }

    stats
        .into_iter()
        .map(|(label, acc)| ComponentStats {
            label,
            bounds: acc.bounds,
            pixel_count: acc.count,
            centroid_row: acc.sum_row as f64 / acc.count as f64,
            centroid_col: acc.sum_col as f64 / acc.count as f64,
        })
        .collect()
}

/// Get bounding boxes for all components, sorted by label
pub fn get_component_bounds(labels: &LabelGrid) -> Vec<(u32, Rect)> {
    get_component_stats(labels)
        .into_iter()
        .map(|s| (s.label, s.bounds))
        .collect()
}
