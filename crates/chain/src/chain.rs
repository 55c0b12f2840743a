//! Chain decay fractions for every descendant of a nuclide

// standard library
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

// external crates
use log::trace;

// internal modules
use crate::bateman::bateman;
use crate::decay::IsotopeRecord;
use crate::error::Result;
use crate::isotope::Isotope;
use crate::registry::Registry;
use crate::tree::{DecayTree, DEFAULT_MAX_DEPTH};

/// Cumulative fraction of a root nuclide found in each descendant
pub type ChainDecays = HashMap<Isotope, f64>;

/// Evaluates chain decays for a fixed cutoff and elapsed time
///
/// For every node of the [DecayTree] below a root nuclide, the Bateman
/// solution for the root-to-node path is weighted by the product of branch
/// probabilities along that path. Nuclides reached by several paths have
/// their contributions summed.
///
/// Nuclides that are not unstable (half-life at or above the cutoff) are
/// terminal sinks. Their decay constant in the chain is zero, so they keep
/// everything they are fed for the rest of the elapsed time.
///
/// Results are memoised per root nuclide for the lifetime of the calculator.
///
/// ```rust
/// # use ftools_chain::{ChainDecayCalculator, DecayData, Isotope, MemoryProvider, PeriodicTable, Registry};
/// let (parent, daughter) = (Isotope::new(38, 90), Isotope::new(39, 90));
/// let provider = MemoryProvider::new()
///     .with_decay(parent, DecayData::with_half_life(10.0).branch("B-", 100.0))
///     .with_decay(daughter, DecayData::stable());
/// let registry = Registry::new(provider, PeriodicTable);
///
/// // cutoff of one year, 100 s elapsed
/// let calculator = ChainDecayCalculator::new(&registry, 3.1536e7, 100.0);
/// let decays = calculator.chain_decays(&registry.get(parent).unwrap()).unwrap();
///
/// assert!((decays[&parent] - 9.765625e-4).abs() < 1e-12);
/// assert!((decays[&daughter] - (1.0 - 9.765625e-4)).abs() < 1e-12);
/// ```
pub struct ChainDecayCalculator<'r> {
    registry: &'r Registry,
    cutoff: f64,
    elapsed: f64,
    max_depth: usize,
    memo: Mutex<HashMap<Isotope, Arc<ChainDecays>>>,
}

impl<'r> ChainDecayCalculator<'r> {
    /// New calculator for a `cutoff` half-life (s) and `elapsed` time (s)
    pub fn new(registry: &'r Registry, cutoff: f64, elapsed: f64) -> Self {
        Self {
            registry,
            cutoff,
            elapsed,
            max_depth: DEFAULT_MAX_DEPTH,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Change the recursion limit used when building decay trees
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Registry the calculator pulls records from
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Half-life cutoff (s)
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Elapsed decay time (s)
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Fraction of `record` found in itself and every descendant
    ///
    /// The root is always present in the output. A root that is not unstable
    /// gives `{root: 1.0}`.
    pub fn chain_decays(&self, record: &Arc<IsotopeRecord>) -> Result<Arc<ChainDecays>> {
        let root = record.isotope();
        if let Some(cached) = self.lock().get(&root) {
            return Ok(Arc::clone(cached));
        }

        let tree = DecayTree::build(
            self.registry,
            Arc::clone(record),
            self.cutoff,
            self.max_depth,
        )?;
        trace!("{root}: decay tree of {} nodes", tree.len());

        let mut decays = ChainDecays::new();
        let mut path = Vec::with_capacity(tree.depth() + 1);
        self.accumulate(&tree, &mut path, 1.0, &mut decays);

        let decays = Arc::new(decays);
        self.lock().insert(root, Arc::clone(&decays));
        Ok(decays)
    }

    /// Depth first walk carrying the path decay constants and weight
    fn accumulate(
        &self,
        node: &DecayTree,
        path: &mut Vec<f64>,
        weight: f64,
        out: &mut ChainDecays,
    ) {
        let record = node.record();
        let unstable = record.is_unstable(self.cutoff);

        path.push(if unstable { record.decay_constant() } else { 0.0 });
        *out.entry(record.isotope()).or_insert(0.0) += weight * bateman(path, self.elapsed);

        if unstable {
            for (probability, child) in node.children() {
                self.accumulate(child, path, weight * probability, out);
            }
        }
        path.pop();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Isotope, Arc<ChainDecays>>> {
        self.memo.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ChainDecayCalculator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ChainDecayCalculator")
            .field("cutoff", &self.cutoff)
            .field("elapsed", &self.elapsed)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
