//! Decay trees rooted at a single nuclide

// standard library
use std::sync::Arc;

// internal modules
use crate::decay::IsotopeRecord;
use crate::error::{Error, Result};
use crate::registry::Registry;

/// Default recursion limit for tree expansion
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Owned tree of every nuclide reachable by decay from the root
///
/// Each child is stored alongside the branch probability leading to it. The
/// same nuclide may appear at several positions when it is reachable by more
/// than one route, and each position is expanded independently. Bateman
/// weighting depends on the full path, so these are deliberately not merged
/// into a shared graph.
///
/// Only unstable nodes (half-life below the cutoff) are expanded. Anything
/// else is a leaf, even if it has decay branches of its own.
#[derive(Debug, Clone)]
pub struct DecayTree {
    record: Arc<IsotopeRecord>,
    children: Vec<(f64, DecayTree)>,
}

impl DecayTree {
    /// Expand the tree below `record`
    ///
    /// Daughter records are fetched through the `registry`. Fails with
    /// [Error::DecayChainTooDeep] if any path is longer than `max_depth`
    /// decays, which only happens with cyclic or malformed data.
    pub fn build(
        registry: &Registry,
        record: Arc<IsotopeRecord>,
        cutoff: f64,
        max_depth: usize,
    ) -> Result<Self> {
        Self::expand(registry, record, cutoff, max_depth, 0)
    }

    fn expand(
        registry: &Registry,
        record: Arc<IsotopeRecord>,
        cutoff: f64,
        max_depth: usize,
        depth: usize,
    ) -> Result<Self> {
        if depth > max_depth {
            return Err(Error::DecayChainTooDeep {
                nuclide: record.isotope().to_string(),
                depth: max_depth,
            });
        }

        let mut children = Vec::new();
        if record.is_unstable(cutoff) {
            children.reserve(record.decays().len());
            for &(daughter, probability) in record.decays() {
                let daughter = registry.get(daughter)?;
                let subtree = Self::expand(registry, daughter, cutoff, max_depth, depth + 1)?;
                children.push((probability, subtree));
            }
        }

        Ok(Self { record, children })
    }

    /// Record at this node
    pub fn record(&self) -> &Arc<IsotopeRecord> {
        &self.record
    }

    /// Child subtrees with the branch probability leading to each
    pub fn children(&self) -> &[(f64, DecayTree)] {
        &self.children
    }

    /// Total number of nodes, including the root
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(|(_, c)| c.len()).sum::<usize>()
    }

    /// Number of decays along the longest path
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|(_, c)| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decay::DecayData;
    use crate::elements::PeriodicTable;
    use crate::isotope::Isotope;
    use crate::provider::MemoryProvider;

    const TE134: Isotope = Isotope::new(52, 134);
    const I134: Isotope = Isotope::new(53, 134);
    const XE134: Isotope = Isotope::new(54, 134);

    fn registry() -> Registry {
        let provider = MemoryProvider::new()
            .with_decay(TE134, DecayData::with_half_life(2508.0).branch("B-", 100.0))
            .with_decay(I134, DecayData::with_half_life(3150.0).branch("B-", 100.0))
            .with_decay(XE134, DecayData::stable());
        Registry::new(provider, PeriodicTable)
    }

    #[test]
    fn linear_chain() {
        let registry = registry();
        let root = registry.get(TE134).unwrap();
        let tree = DecayTree::build(&registry, root, 1.0e9, DEFAULT_MAX_DEPTH).unwrap();

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.depth(), 2);
        let (p, child) = &tree.children()[0];
        assert_eq!(*p, 1.0);
        assert_eq!(child.record().isotope(), I134);
        assert!(child.children()[0].1.children().is_empty());
    }

    #[test]
    fn cutoff_stops_expansion() {
        let registry = registry();
        let root = registry.get(TE134).unwrap();

        // the root itself is not below the cutoff
        let tree = DecayTree::build(&registry, root, 100.0, DEFAULT_MAX_DEPTH).unwrap();
        assert!(tree.children().is_empty());
        assert!(!registry.contains(I134));

        // root expands, daughter does not
        let root = registry.get(TE134).unwrap();
        let tree = DecayTree::build(&registry, root, 3000.0, DEFAULT_MAX_DEPTH).unwrap();
        assert_eq!(tree.len(), 2);
        assert!(!registry.contains(XE134));
    }

    #[test]
    fn depth_limit() {
        let registry = registry();
        let root = registry.get(TE134).unwrap();
        assert!(DecayTree::build(&registry, Arc::clone(&root), 1.0e9, 2).is_ok());
        assert!(matches!(
            DecayTree::build(&registry, root, 1.0e9, 1),
            Err(Error::DecayChainTooDeep { depth: 1, .. })
        ));
    }

    #[test]
    fn cyclic_data_is_caught() {
        // nonsense data where beta+ and beta- undo each other
        let a = Isotope::new(40, 100);
        let b = Isotope::new(41, 100);
        let provider = MemoryProvider::new()
            .with_decay(a, DecayData::with_half_life(1.0).branch("B-", 100.0))
            .with_decay(b, DecayData::with_half_life(1.0).branch("B+", 100.0));
        let registry = Registry::new(provider, PeriodicTable);

        let root = registry.get(a).unwrap();
        assert!(matches!(
            DecayTree::build(&registry, root, 10.0, 16),
            Err(Error::DecayChainTooDeep { .. })
        ));
    }
}
