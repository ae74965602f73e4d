//! Label resolution pass
//!
//! Rewrites a provisional label grid so every foreground cell carries the
//! canonical label of its component. Shared by both labelers.

use crate::equivalence::EquivalenceMap;
use crate::error::{RegionError, RegionResult};
use ccl_core::LabelGrid;

/// Map every non-zero cell through a resolved equivalence map.
///
/// Zero cells are copied unchanged. The map is expected to have been
/// flattened with [`EquivalenceMap::resolve_all`]; each cell is replaced by
/// its direct entry, without further chasing.
///
/// # Arguments
///
/// * `labels` - Provisional labels from a scan
/// * `equivalences` - Flattened equivalence map
///
/// # Returns
///
/// A new grid holding the canonical label of every cell.
///
/// # Errors
///
/// Returns [`RegionError::KeyNotFound`] if a cell holds a label the map has
/// never seen. No output is produced in that case.
pub fn resolve_labels(
    labels: &LabelGrid,
    equivalences: &EquivalenceMap,
) -> RegionResult<LabelGrid> {
    debug_assert!(equivalences.is_resolved());

    let mut out = labels.clone();
    for cell in out.data_mut() {
        if *cell != 0 {
            *cell = equivalences
                .get(*cell)
                .ok_or(RegionError::KeyNotFound { label: *cell })?;
        }
    }
    Ok(out)
}

/// In-place variant of [`resolve_labels`].
///
/// On error `labels` is left untouched.
pub fn apply_equivalences(
    labels: &mut LabelGrid,
    equivalences: &EquivalenceMap,
) -> RegionResult<()> {
    *labels = resolve_labels(labels, equivalences)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_labels() {
        let mut map = EquivalenceMap::new();
        for l in 1..=3 {
            map.register(l);
        }
        map.union(3, 1).unwrap();
        map.resolve_all().unwrap();

        let labels = LabelGrid::from_rows(&[vec![1, 0, 3], vec![2, 0, 3]]).unwrap();
        let resolved = resolve_labels(&labels, &map).unwrap();
        assert_eq!(resolved.to_rows(), vec![vec![1, 0, 1], vec![2, 0, 1]]);
        // input untouched
        assert_eq!(labels.get(0, 2), Some(3));
    }

    #[test]
    fn test_unknown_label_is_error() {
        let mut map = EquivalenceMap::new();
        map.register(1);

        let mut labels = LabelGrid::from_rows(&[vec![1, 5]]).unwrap();
        let before = labels.clone();
        assert_eq!(
            apply_equivalences(&mut labels, &map),
            Err(RegionError::KeyNotFound { label: 5 })
        );
        assert_eq!(labels, before);
    }

    #[test]
    fn test_background_only() {
        let map = EquivalenceMap::new();
        let labels = LabelGrid::new(4, 4);
        assert_eq!(resolve_labels(&labels, &map).unwrap(), labels);
    }
}
