//! External data sources consumed by the engine
//!
//! The engine never fetches anything itself. Decay data and fission yields
//! come through the [DecayDataProvider] and [FissionYieldProvider] traits,
//! implemented over the IAEA chart of nuclides by `ftools-iaea`.
//!
//! [MemoryProvider] serves pre-loaded data and counts requests, which is
//! enough for offline runs and tests.

// standard library
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// internal modules
use crate::decay::DecayData;
use crate::error::{Error, Result};
use crate::isotope::Isotope;

/// Source of per-nuclide decay data
pub trait DecayDataProvider: Send + Sync {
    /// Decay data for `isotope`, where `query` is its lower case name (`90sr`)
    ///
    /// Fails with [Error::DataUnavailable] if the data cannot be obtained.
    fn decay_data(&self, isotope: Isotope, query: &str) -> Result<DecayData>;
}

/// Source of independent fission yields for a fissile nuclide
pub trait FissionYieldProvider: Send + Sync {
    /// Independent thermal fission yields for `fissile`, queried as `query`
    ///
    /// Fails with [Error::DataUnavailable] if the data cannot be obtained.
    fn fission_yields(&self, fissile: Isotope, query: &str) -> Result<FissionYields>;
}

impl<T: DecayDataProvider + ?Sized> DecayDataProvider for Arc<T> {
    fn decay_data(&self, isotope: Isotope, query: &str) -> Result<DecayData> {
        (**self).decay_data(isotope, query)
    }
}

impl<T: FissionYieldProvider + ?Sized> FissionYieldProvider for Arc<T> {
    fn fission_yields(&self, fissile: Isotope, query: &str) -> Result<FissionYields> {
        (**self).fission_yields(fissile, query)
    }
}

/// Independent fission yields with any element symbols found alongside them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FissionYields {
    /// Fraction of fissions producing each nuclide directly
    pub yields: HashMap<Isotope, f64>,
    /// Element symbols listed in the yield data, by proton number
    pub symbols: HashMap<u8, String>,
}

impl FissionYields {
    /// Only the yields at or above `minimum`
    pub fn above(&self, minimum: f64) -> HashMap<Isotope, f64> {
        self.yields
            .iter()
            .filter(|(_, y)| **y >= minimum)
            .map(|(i, y)| (*i, *y))
            .collect()
    }
}

/// In-memory provider for pre-loaded data
#[derive(Debug, Default)]
pub struct MemoryProvider {
    decays: HashMap<Isotope, DecayData>,
    fission: HashMap<Isotope, FissionYields>,
    requests: AtomicUsize,
}

impl MemoryProvider {
    /// Empty provider, every request fails
    pub fn new() -> Self {
        Self::default()
    }

    /// Add decay data for a nuclide, builder style
    pub fn with_decay(mut self, isotope: Isotope, data: DecayData) -> Self {
        self.decays.insert(isotope, data);
        self
    }

    /// Add fission yields for a fissile nuclide, builder style
    pub fn with_fission(mut self, fissile: Isotope, yields: FissionYields) -> Self {
        self.fission.insert(fissile, yields);
        self
    }

    /// Number of decay data requests served or refused so far
    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl DecayDataProvider for MemoryProvider {
    fn decay_data(&self, isotope: Isotope, query: &str) -> Result<DecayData> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.decays
            .get(&isotope)
            .cloned()
            .ok_or_else(|| Error::unavailable(query, "no decay data loaded"))
    }
}

impl FissionYieldProvider for MemoryProvider {
    fn fission_yields(&self, fissile: Isotope, query: &str) -> Result<FissionYields> {
        self.fission
            .get(&fissile)
            .cloned()
            .ok_or_else(|| Error::unavailable(query, "no fission yields loaded"))
    }
}
