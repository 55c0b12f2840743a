//! Memoised store of decay records

// standard library
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

// external crates
use log::{debug, trace};
use once_cell::sync::OnceCell;

// internal modules
use crate::decay::IsotopeRecord;
use crate::elements::ElementResolver;
use crate::error::Result;
use crate::isotope::Isotope;
use crate::provider::DecayDataProvider;

type Slot = Arc<OnceCell<Arc<IsotopeRecord>>>;

/// Lazily populated mapping from [Isotope] to its [IsotopeRecord]
///
/// At most one record is ever materialised per isotope. The first request for
/// an isotope resolves its element symbol, asks the provider for decay data
/// and stores the record before handing it out. Every later request returns
/// the same `Arc`.
///
/// The registry is safe to share between threads. Concurrent requests for the
/// same missing isotope wait on a single fetch, while requests for different
/// isotopes proceed independently. A failed fetch stores nothing, so the
/// isotope may be requested again.
///
/// ```rust
/// # use ftools_chain::{DecayData, Elements, Isotope, MemoryProvider, Registry};
/// # use std::sync::Arc;
/// let sr90 = Isotope::new(38, 90);
/// let provider = MemoryProvider::new()
///     .with_decay(sr90, DecayData::with_half_life(9.1e8).branch("B-", 100.0));
///
/// let registry = Registry::new(provider, Elements::periodic());
/// let first = registry.get(sr90).unwrap();
/// let second = registry.get(sr90).unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
/// ```
pub struct Registry {
    provider: Box<dyn DecayDataProvider>,
    elements: Box<dyn ElementResolver>,
    records: Mutex<HashMap<Isotope, Slot>>,
}

impl Registry {
    /// New empty registry over a data provider and element resolver
    pub fn new<P, E>(provider: P, elements: E) -> Self
    where
        P: DecayDataProvider + 'static,
        E: ElementResolver + 'static,
    {
        Self {
            provider: Box::new(provider),
            elements: Box::new(elements),
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Element resolver used for naming nuclides
    pub fn elements(&self) -> &dyn ElementResolver {
        self.elements.as_ref()
    }

    /// Record for `isotope`, fetching and constructing it on first use
    ///
    /// Fails with [ElementUnknown](crate::Error::ElementUnknown) if the
    /// nuclide cannot be named, or
    /// [DataUnavailable](crate::Error::DataUnavailable) if the provider fails.
    pub fn get(&self, isotope: Isotope) -> Result<Arc<IsotopeRecord>> {
        let slot = self.slot(isotope);
        let record = slot.get_or_try_init(|| self.materialise(isotope))?;
        Ok(Arc::clone(record))
    }

    /// Seed a record directly, returning whichever record ends up stored
    ///
    /// An existing record is never replaced.
    pub fn insert(&self, record: IsotopeRecord) -> Arc<IsotopeRecord> {
        let slot = self.slot(record.isotope());
        Arc::clone(slot.get_or_init(|| Arc::new(record)))
    }

    /// True if a record for `isotope` has been materialised
    pub fn contains(&self, isotope: Isotope) -> bool {
        self.lock()
            .get(&isotope)
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Number of materialised records
    pub fn len(&self) -> usize {
        self.lock()
            .values()
            .filter(|slot| slot.get().is_some())
            .count()
    }

    /// True if nothing has been materialised yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Per-key cell, created empty if needed
    ///
    /// The map lock is only held for the lookup, never during a fetch.
    fn slot(&self, isotope: Isotope) -> Slot {
        Arc::clone(self.lock().entry(isotope).or_default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Isotope, Slot>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn materialise(&self, isotope: Isotope) -> Result<Arc<IsotopeRecord>> {
        let query = isotope.query_name(self.elements())?;
        debug!("Fetching decay data for {query}");
        let data = self.provider.decay_data(isotope, &query)?;
        let record = IsotopeRecord::from_decay_data(isotope, &data);
        trace!(
            "{isotope}: half-life {} s, {} branches",
            record.half_life(),
            record.decays().len()
        );
        Ok(Arc::new(record))
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("records", &self.len())
            .finish()
    }
}
