//! Connected component labeling
//!
//! This module implements two-pass connected component labeling. A single
//! forward raster scan assigns provisional labels and records equivalences
//! in an [`EquivalenceMap`]; the map is then flattened and applied to every
//! cell by the resolution pass.
//!
//! Two neighbor rules are provided:
//!
//! - **4-way** ([`scan_four_way`]): looks at the left and upper neighbors.
//!   When both carry different labels the cell takes the upper label and the
//!   left label is unioned under it.
//! - **8-way** ([`scan_eight_way`]): looks at left, upper, upper-left and
//!   upper-right. The cell takes the smallest neighbor label and every other
//!   neighbor label is unioned under that minimum.
//!
//! Final labels are the roots of the equivalence forest. They are not
//! renumbered, so gaps are expected wherever a minted label was merged away.

use crate::equivalence::EquivalenceMap;
use crate::error::{RegionError, RegionResult};
use crate::label::get_component_stats;
use crate::resolve::resolve_labels;
use ccl_core::{Grid, LabelGrid, Rect};
use log::{debug, trace};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// Inclusive intensity range selecting foreground cells for 8-way labeling
///
/// # Examples
///
/// ```
/// use ccl_region::IntensityWindow;
///
/// let window = IntensityWindow::new(100, 200).unwrap();
/// assert!(window.contains(100));
/// assert!(window.contains(200));
/// assert!(!window.contains(201));
/// assert!(IntensityWindow::new(5, 4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntensityWindow {
    min: u8,
    max: u8,
}

impl IntensityWindow {
    /// Every value is foreground.
    pub const FULL: Self = Self { min: 0, max: 255 };

    /// Every non-zero value is foreground.
    pub const NONZERO: Self = Self { min: 1, max: 255 };

    /// Create a window `[min, max]`, both ends inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidWindow`] if `min > max`.
    pub fn new(min: u8, max: u8) -> RegionResult<Self> {
        if min > max {
            return Err(RegionError::InvalidWindow { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    #[inline]
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Upper bound (inclusive).
    #[inline]
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Check whether a value is inside the window.
    #[inline]
    pub fn contains(&self, value: u8) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Default for IntensityWindow {
    fn default() -> Self {
        Self::FULL
    }
}

/// Output of the first (scan) pass
///
/// Owns the provisional label grid, the equivalences discovered while
/// scanning, and the label counter. Labels are minted in strictly increasing
/// order of first occurrence in raster order, starting at 1.
#[derive(Debug, Clone)]
pub struct ProvisionalLabels {
    /// Provisional label of every cell (`0` = background)
    pub labels: LabelGrid,
    /// Equivalences recorded during the scan (unresolved)
    pub equivalences: EquivalenceMap,
    next_label: u32,
}

impl ProvisionalLabels {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            labels: LabelGrid::new(rows, cols),
            equivalences: EquivalenceMap::new(),
            next_label: 1,
        }
    }

    /// Mint and register the next label.
    fn mint(&mut self) -> u32 {
        let label = self.next_label;
        self.equivalences.register(label);
        self.next_label += 1;
        label
    }

    /// Number of labels minted during the scan.
    pub fn labels_minted(&self) -> u32 {
        self.next_label - 1
    }

    /// Run the second pass: flatten the equivalences and rewrite the grid.
    pub fn resolve(self) -> RegionResult<LabelingResult> {
        let before = self.equivalences.clone();
        if before.displaced_links() > 0 {
            trace!("re-joining {} overwritten links", before.displaced_links());
        }
        let mut after = self.equivalences;
        after.resolve_all()?;

        debug!("Equivalence before resolving: {before}");
        debug!("Equivalence after resolving: {after}");

        let labels = resolve_labels(&self.labels, &after)?;
        let result = LabelingResult {
            labels,
            provisional: self.labels,
            equivalences_before: before,
            equivalences_after: after,
            labels_minted: self.next_label - 1,
        };
        trace!(
            "labeled {}x{} grid: {} labels minted, {} components",
            result.labels.rows(),
            result.labels.cols(),
            result.labels_minted,
            result.component_count()
        );
        Ok(result)
    }
}

/// Final labels together with the intermediate state that produced them
#[derive(Debug, Clone)]
pub struct LabelingResult {
    /// Canonical label of every cell (`0` = background)
    pub labels: LabelGrid,
    /// Labels as assigned by the scan, before resolution
    pub provisional: LabelGrid,
    /// Equivalence map as left by the scan
    pub equivalences_before: EquivalenceMap,
    /// Equivalence map after path compression
    pub equivalences_after: EquivalenceMap,
    /// Number of provisional labels minted
    pub labels_minted: u32,
}

impl LabelingResult {
    /// Number of connected components found.
    pub fn component_count(&self) -> usize {
        self.equivalences_after.roots().count()
    }
}

/// First pass of 4-way labeling.
///
/// A cell is foreground when its value is non-zero; callers should
/// pre-binarize grayscale input.
///
/// # Errors
///
/// Returns [`RegionError::KeyNotFound`] only on an internal inconsistency.
pub fn scan_four_way(grid: &Grid<u8>) -> RegionResult<ProvisionalLabels> {
    let (rows, cols) = grid.shape();
    let mut scan = ProvisionalLabels::new(rows, cols);

    for row in 0..rows {
        for col in 0..cols {
            if grid[(row, col)] == 0 {
                continue;
            }

            let left = if col > 0 {
                scan.labels[(row, col - 1)]
            } else {
                0
            };
            let up = if row > 0 {
                scan.labels[(row - 1, col)]
            } else {
                0
            };

            let label = match (left, up) {
                (0, 0) => scan.mint(),
                (left, 0) => left,
                (0, up) => up,
                (left, up) if left == up => left,
                (left, up) => {
                    scan.equivalences.union(left, up)?;
                    up
                }
            };
            scan.labels[(row, col)] = label;
        }
    }

    Ok(scan)
}

/// First pass of 8-way labeling.
///
/// A cell is foreground when its value lies inside `window`.
///
/// # Arguments
///
/// * `grid` - Grayscale input grid
/// * `window` - Inclusive foreground intensity range
///
/// # Returns
///
/// Provisional labels and the unresolved equivalence map.
///
/// # Errors
///
/// Returns [`RegionError::KeyNotFound`] only on an internal inconsistency.
pub fn scan_eight_way(
    grid: &Grid<u8>,
    window: IntensityWindow,
) -> RegionResult<ProvisionalLabels> {
    let (rows, cols) = grid.shape();
    let mut scan = ProvisionalLabels::new(rows, cols);

    for row in 0..rows {
        for col in 0..cols {
            if !window.contains(grid[(row, col)]) {
                continue;
            }

            // Already-visited neighbors: left, up, upper-left, upper-right
            let neighbors = [
                (col > 0).then(|| (row, col - 1)),
                (row > 0).then(|| (row - 1, col)),
                (row > 0 && col > 0).then(|| (row - 1, col - 1)),
                (row > 0 && col + 1 < cols).then(|| (row - 1, col + 1)),
            ];

            let mut candidates = [0u32; 4];
            let mut n = 0;
            for (r, c) in neighbors.into_iter().flatten() {
                let label = scan.labels[(r, c)];
                if label > 0 {
                    candidates[n] = label;
                    n += 1;
                }
            }
            let candidates = &candidates[..n];

            let label = match candidates.iter().min() {
                None => scan.mint(),
                Some(&min_label) => {
                    for &other in candidates {
                        if other != min_label {
                            scan.equivalences.union(other, min_label)?;
                        }
                    }
                    min_label
                }
            };
            scan.labels[(row, col)] = label;
        }
    }

    Ok(scan)
}

/// Label a binary grid with 4-way connectivity, keeping diagnostics.
pub fn label_four_connectivity_detailed(grid: &Grid<u8>) -> RegionResult<LabelingResult> {
    scan_four_way(grid)?.resolve()
}

/// Label a binary grid with 4-way connectivity.
///
/// # Examples
///
/// ```
/// use ccl_core::Grid;
/// use ccl_region::label_four_connectivity;
///
/// let grid = Grid::from_rows(&[vec![1u8, 0], vec![0, 1]]).unwrap();
/// let labels = label_four_connectivity(&grid).unwrap();
/// assert_eq!(labels.to_rows(), vec![vec![1, 0], vec![0, 2]]);
/// ```
pub fn label_four_connectivity(grid: &Grid<u8>) -> RegionResult<LabelGrid> {
    Ok(label_four_connectivity_detailed(grid)?.labels)
}

/// Label a grayscale grid with 8-way connectivity, keeping diagnostics.
pub fn label_eight_connectivity_detailed(
    grid: &Grid<u8>,
    window: IntensityWindow,
) -> RegionResult<LabelingResult> {
    scan_eight_way(grid, window)?.resolve()
}

/// Label a grayscale grid with 8-way connectivity.
///
/// # Arguments
///
/// * `grid` - Grayscale input grid
/// * `window` - Cells whose value lies in this range are foreground
///
/// # Examples
///
/// ```
/// use ccl_core::Grid;
/// use ccl_region::{IntensityWindow, label_eight_connectivity};
///
/// let grid = Grid::from_rows(&[vec![1u8, 0], vec![0, 1]]).unwrap();
/// let window = IntensityWindow::new(1, 1).unwrap();
/// let labels = label_eight_connectivity(&grid, window).unwrap();
/// assert_eq!(labels.to_rows(), vec![vec![1, 0], vec![0, 1]]);
/// ```
pub fn label_eight_connectivity(
    grid: &Grid<u8>,
    window: IntensityWindow,
) -> RegionResult<LabelGrid> {
    Ok(label_eight_connectivity_detailed(grid, window)?.labels)
}

/// Label all connected components in a binary grid
///
/// Non-zero cells are foreground for both connectivity types.
pub fn label_connected_components(
    grid: &Grid<u8>,
    connectivity: ConnectivityType,
) -> RegionResult<LabelGrid> {
    match connectivity {
        ConnectivityType::FourWay => label_four_connectivity(grid),
        ConnectivityType::EightWay => label_eight_connectivity(grid, IntensityWindow::NONZERO),
    }
}

/// A connected component in a grid
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectedComponent {
    /// Canonical label of this component
    pub label: u32,
    /// Number of cells in this component
    pub pixel_count: usize,
    /// Bounding box of this component
    pub bounds: Rect,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: usize, bounds: Rect) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// Find all connected components in a binary grid
///
/// Returns one entry per component, sorted by label.
pub fn find_connected_components(
    grid: &Grid<u8>,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let labels = label_connected_components(grid, connectivity)?;
    Ok(get_component_stats(&labels)
        .into_iter()
        .map(|s| ConnectedComponent::new(s.label, s.pixel_count, s.bounds))
        .collect())
}
