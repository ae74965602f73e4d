//! Label equivalence resolution
//!
//! [`EquivalenceMap`] records which provisional labels belong to the same
//! connected component. It is a forest stored as a `label -> parent` map;
//! a label mapped to itself is a root, and the root of a tree is the
//! canonical label of that component.
//!
//! Unions are directed (`union(a, b)` writes `a -> b`) and are not balanced
//! by rank or size, so the final canonical label of a component depends
//! only on the order of unions issued by the scan. A union that overwrites
//! an existing link keeps the displaced link aside; those links are
//! re-joined and the map is path-compressed once, in
//! [`EquivalenceMap::resolve_all`], after the scan is done.

use crate::error::{RegionError, RegionResult};
use std::collections::BTreeMap;
use std::fmt;

/// Directed union-find over provisional labels
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquivalenceMap {
    parent: BTreeMap<u32, u32>,
    /// `(label, old_parent)` links overwritten by [`EquivalenceMap::union`]
    displaced: Vec<(u32, u32)>,
}

impl EquivalenceMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly minted label as its own root.
    ///
    /// Registering a label that is already present leaves its entry alone.
    pub fn register(&mut self, label: u32) {
        self.parent.entry(label).or_insert(label);
    }

    /// Check whether a label has been registered.
    #[inline]
    pub fn contains(&self, label: u32) -> bool {
        self.parent.contains_key(&label)
    }

    /// Immediate parent of a label, or `None` if unregistered.
    #[inline]
    pub fn get(&self, label: u32) -> Option<u32> {
        self.parent.get(&label).copied()
    }

    /// Number of registered labels.
    #[inline]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// Check whether no label has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Iterate over `(label, parent)` pairs in ascending label order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.parent.iter().map(|(&k, &v)| (k, v))
    }

    /// Iterate over the root labels in ascending order.
    pub fn roots(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().filter(|&(k, v)| k == v).map(|(k, _)| k)
    }

    /// Follow parent links from `label` until a self-mapped entry is found.
    ///
    /// The walk is iterative and does not modify the map.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::KeyNotFound`] if `label`, or any label on its
    /// chain, was never registered.
    pub fn find(&self, label: u32) -> RegionResult<u32> {
        let mut current = label;
        loop {
            let next = self
                .get(current)
                .ok_or(RegionError::KeyNotFound { label: current })?;
            if next == current {
                return Ok(current);
            }
            current = next;
        }
    }

    /// Record that `a` and `b` belong to the same component.
    ///
    /// Writes `a -> b` directly, whether or not `a` is a root. If `a`
    /// already pointed somewhere else, the old link is kept aside and
    /// re-joined by [`resolve_all`](Self::resolve_all). A write that would
    /// close a cycle (`a` lies on the path from `b` to its root) is skipped,
    /// since `a` and `b` are then already in the same tree.
    ///
    /// # Arguments
    ///
    /// * `a` - Label whose parent link is written
    /// * `b` - New parent of `a`
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::KeyNotFound`] if either label is unregistered.
    pub fn union(&mut self, a: u32, b: u32) -> RegionResult<()> {
        let previous = self.get(a).ok_or(RegionError::KeyNotFound { label: a })?;

        let mut current = b;
        loop {
            if current == a {
                return Ok(());
            }
            let next = self
                .get(current)
                .ok_or(RegionError::KeyNotFound { label: current })?;
            if next == current {
                break;
            }
            current = next;
        }

        self.parent.insert(a, b);
        if previous != a && previous != b {
            self.displaced.push((a, previous));
        }
        Ok(())
    }

    /// Point every label directly at its root.
    ///
    /// Links displaced by [`union`](Self::union) are re-joined first: when
    /// the roots of a displaced pair differ, the root of the old parent is
    /// attached under the root of the label. Must be called once after all
    /// unions for a grid. Running it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::KeyNotFound`] if a chain leads to an
    /// unregistered label.
    pub fn resolve_all(&mut self) -> RegionResult<()> {
        for (label, previous) in std::mem::take(&mut self.displaced) {
            let root = self.find(label)?;
            let previous_root = self.find(previous)?;
            if root != previous_root {
                self.parent.insert(previous_root, root);
            }
        }

        let labels: Vec<u32> = self.parent.keys().copied().collect();
        for label in labels {
            let root = self.find(label)?;
            // Compress the whole chain, not only its head
            let mut current = label;
            while current != root {
                let next = self.parent.insert(current, root).unwrap_or(root);
                current = next;
            }
        }
        Ok(())
    }

    /// Number of overwritten links waiting for [`resolve_all`](Self::resolve_all).
    pub fn displaced_links(&self) -> usize {
        self.displaced.len()
    }

    /// Check whether every label points directly at a root.
    pub fn is_resolved(&self) -> bool {
        self.displaced.is_empty()
            && self
                .iter()
                .all(|(_, parent)| self.get(parent) == Some(parent))
    }
}

impl fmt::Display for EquivalenceMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (label, parent)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{label}: {parent}")?;
        }
        write!(f, "}}")
    }
}
