//! Decay chain data providers backed by the IAEA chart of nuclides

// ftools modules
use ftools_chain::{
    DecayData, DecayDataProvider, Error as ChainError, FissionYieldProvider, FissionYields,
    Isotope, Result as ChainResult,
};

// internal modules
use crate::cache::DataCache;
use crate::error::Result;
use crate::record::decay_data_from_csv;
use crate::yields::fission_yields_from_csv;

/// Supplies decay data and fission yields through a [DataCache]
///
/// Anything not already cached is fetched from the IAEA API on first use.
/// Every failure is reported to the chain engine as
/// [DataUnavailable](ftools_chain::Error::DataUnavailable), keeping the
/// underlying error as its source.
///
/// ```rust, no_run
/// # use ftools_iaea::{DataCache, IaeaProvider};
/// # use ftools_chain::{compute_element_distribution, Config, Isotope};
/// let provider = IaeaProvider::new(DataCache::new("./data"));
/// let pu241 = Isotope::new(94, 241);
///
/// let rows =
///     compute_element_distribution(pu241, provider.clone(), &provider, &Config::default())
///         .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct IaeaProvider {
    cache: DataCache,
}

impl IaeaProvider {
    /// Provider over an existing cache
    pub fn new(cache: DataCache) -> Self {
        Self { cache }
    }

    /// The underlying cache
    pub fn cache(&self) -> &DataCache {
        &self.cache
    }

    fn fission(&self, query: &str) -> Result<FissionYields> {
        fission_yields_from_csv(&self.cache.fission_yields(query)?)
    }
}

impl DecayDataProvider for IaeaProvider {
    fn decay_data(&self, _isotope: Isotope, query: &str) -> ChainResult<DecayData> {
        self.cache
            .ground_state(query)
            .and_then(|csv_text| decay_data_from_csv(&csv_text, query))
            .map_err(|e| ChainError::unavailable(query, e))
    }
}

impl FissionYieldProvider for IaeaProvider {
    fn fission_yields(&self, _fissile: Isotope, query: &str) -> ChainResult<FissionYields> {
        let fission = self
            .fission(query)
            .map_err(|e| ChainError::unavailable(query, e))?;

        if fission.yields.is_empty() {
            return Err(ChainError::unavailable(
                query,
                "no independent fission yields listed",
            ));
        }
        Ok(fission)
    }
}
