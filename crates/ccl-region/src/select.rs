//! Component selection by size
//!
//! This module removes connected components from a resolved label grid
//! based on their pixel count.

use ccl_core::LabelGrid;
use std::collections::{BTreeMap, BTreeSet};

/// Count the cells carrying each label value, background included.
///
/// The result always has an entry for every value present in the grid,
/// including `0` when the grid has background cells.
pub fn component_sizes(labels: &LabelGrid) -> BTreeMap<u32, usize> {
    let mut sizes = BTreeMap::new();
    for &label in labels.data() {
        *sizes.entry(label).or_insert(0) += 1;
    }
    sizes
}

/// Remove every component whose size is not strictly greater than `threshold`.
///
/// A component of exactly `threshold` cells is removed; one of
/// `threshold + 1` cells is kept. Background (label `0`) is never a
/// component. The input is not modified.
///
/// # Arguments
///
/// * `labels` - Resolved label grid
/// * `threshold` - Largest component size that is removed
///
/// # Returns
///
/// A copy of `labels` with the removed components set to `0`.
///
/// # Examples
///
/// ```
/// use ccl_core::LabelGrid;
/// use ccl_region::filter_components_by_size;
///
/// let labels = LabelGrid::from_rows(&[vec![1, 1, 0, 2, 2, 2]]).unwrap();
/// let filtered = filter_components_by_size(&labels, 2);
/// assert_eq!(filtered.row(0), &[0, 0, 0, 2, 2, 2]);
/// ```
pub fn filter_components_by_size(labels: &LabelGrid, threshold: usize) -> LabelGrid {
    let keep = surviving_labels(labels, threshold);
    labels.map(|label| if keep.contains(&label) { label } else { 0 })
}

/// Labels that survive [`filter_components_by_size`] at `threshold`.
pub fn surviving_labels(labels: &LabelGrid, threshold: usize) -> BTreeSet<u32> {
    component_sizes(labels)
        .into_iter()
        .filter(|&(label, count)| label != 0 && count > threshold)
        .map(|(label, _)| label)
        .collect()
}
