//! Fission product inventories grouped by element

// standard library
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

// external crates
use kdam::par_tqdm;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

// ftools modules
use ftools_format::NumFormat;

// internal modules
use crate::chain::ChainDecayCalculator;
use crate::elements::{ElementResolver, Elements};
use crate::error::Result;
use crate::isotope::Isotope;
use crate::provider::{DecayDataProvider, FissionYieldProvider};
use crate::registry::Registry;
use crate::tree::DEFAULT_MAX_DEPTH;

/// Seconds in a (365 day) year
pub const SECONDS_PER_YEAR: f64 = 60.0 * 60.0 * 24.0 * 365.0;

/// Run configuration
///
/// The half-life cutoff and the elapsed time are separate parameters, though
/// the usual choice is to set both to the same number of years.
///
/// ```rust
/// # use ftools_chain::{Config, SECONDS_PER_YEAR};
/// let config = Config::new(31.0);
/// assert_eq!(config.cutoff_seconds(), 31.0 * SECONDS_PER_YEAR);
/// assert_eq!(config.elapsed_seconds(), config.cutoff_seconds());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Nuclides with half-lives below this are decayed further (years)
    pub cutoff_years: f64,
    /// Time allowed for decay after fission (years)
    pub elapsed_years: f64,
    /// Independent yields below this are ignored
    pub min_yield: f64,
    /// Recursion limit for decay trees
    pub max_depth: usize,
    /// Show a progress bar while decaying fission products
    pub progress: bool,
}

impl Config {
    /// Cutoff and elapsed time both set to `years`
    pub fn new(years: f64) -> Self {
        Self {
            cutoff_years: years,
            elapsed_years: years,
            ..Default::default()
        }
    }

    /// Half-life cutoff (s)
    pub fn cutoff_seconds(&self) -> f64 {
        self.cutoff_years * SECONDS_PER_YEAR
    }

    /// Elapsed decay time (s)
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_years * SECONDS_PER_YEAR
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cutoff_years: 31.0,
            elapsed_years: 31.0,
            min_yield: 1e-4,
            max_depth: DEFAULT_MAX_DEPTH,
            progress: false,
        }
    }
}

/// Cumulative yield for a single element
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ElementYield {
    /// Proton number
    pub protons: u8,
    /// Element symbol
    pub symbol: String,
    /// Atoms per fission summed over every isotope of the element
    pub fraction: f64,
}

/// Decays every fission product and accumulates the results
///
/// Each (nuclide, yield) pair contributes `yield * fraction` to every
/// descendant reported by the [ChainDecayCalculator]. Nuclides are processed
/// in parallel and share the calculator's registry.
#[derive(Debug)]
pub struct FissionYieldAggregator<'r> {
    calculator: ChainDecayCalculator<'r>,
    progress: bool,
}

impl<'r> FissionYieldAggregator<'r> {
    /// Aggregator over an existing calculator
    pub fn new(calculator: ChainDecayCalculator<'r>) -> Self {
        Self {
            calculator,
            progress: false,
        }
    }

    /// Show a progress bar on stderr while aggregating
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Atoms per fission of every nuclide after decay
    ///
    /// Any failure to fetch data for a fission product or its descendants
    /// aborts the whole run.
    pub fn aggregate(&self, yields: &HashMap<Isotope, f64>) -> Result<HashMap<Isotope, f64>> {
        let products: Vec<(Isotope, f64)> = yields.iter().map(|(i, y)| (*i, *y)).collect();

        let partials: Vec<Vec<(Isotope, f64)>> = if self.progress {
            let partials = par_tqdm!(
                products
                    .par_iter()
                    .map(|&(isotope, fission_yield)| self.contributions(isotope, fission_yield)),
                bar_format = "Decaying products: {count}/{total} [{rate:.2} nuc/s]  "
            )
            .collect::<Result<_>>();
            eprintln!();
            partials?
        } else {
            products
                .par_iter()
                .map(|&(isotope, fission_yield)| self.contributions(isotope, fission_yield))
                .collect::<Result<_>>()?
        };

        let mut inventory: HashMap<Isotope, f64> = HashMap::new();
        for (isotope, amount) in partials.into_iter().flatten() {
            *inventory.entry(isotope).or_insert(0.0) += amount;
        }

        info!(
            "Decayed {} fission products into {} nuclides",
            yields.len(),
            inventory.len()
        );
        Ok(inventory)
    }

    fn contributions(&self, isotope: Isotope, fission_yield: f64) -> Result<Vec<(Isotope, f64)>> {
        let record = self.calculator.registry().get(isotope)?;
        let decays = self.calculator.chain_decays(&record)?;
        debug!(
            "{isotope}: yield {} spread over {} nuclides",
            fission_yield.sci(3, 2),
            decays.len()
        );
        Ok(decays
            .iter()
            .map(|(&descendant, &fraction)| (descendant, fission_yield * fraction))
            .collect())
    }
}

/// Sum an inventory by element
///
/// Rows are sorted by ascending proton number and elements with no yield are
/// left out.
pub fn element_totals(
    inventory: &HashMap<Isotope, f64>,
    elements: &dyn ElementResolver,
) -> Result<Vec<ElementYield>> {
    let mut totals: BTreeMap<u8, f64> = BTreeMap::new();
    for (isotope, amount) in inventory {
        *totals.entry(isotope.protons).or_insert(0.0) += amount;
    }

    totals
        .into_iter()
        .filter(|(_, fraction)| *fraction > 0.0)
        .map(|(protons, fraction)| {
            Ok(ElementYield {
                protons,
                symbol: elements.symbol(protons)?,
                fraction,
            })
        })
        .collect()
}

/// Element distribution of the decayed fission products of `fissile`
///
/// Yields are requested from `fission_data` first, and any element symbols
/// listed alongside them are preferred over the periodic table. Decay data
/// for every product and descendant then come from `decay_data`. Everything
/// built here is dropped when the run ends.
pub fn compute_element_distribution<D, Y>(
    fissile: Isotope,
    decay_data: D,
    fission_data: &Y,
    config: &Config,
) -> Result<Vec<ElementYield>>
where
    D: DecayDataProvider + 'static,
    Y: FissionYieldProvider + ?Sized,
{
    let mut elements = Elements::periodic();
    let query = fissile.query_name(&elements)?;
    info!("Fetching fission yields for {query}");

    let fission_yields = fission_data.fission_yields(fissile, &query)?;
    elements.extend(fission_yields.symbols.iter().map(|(z, s)| (*z, s.as_str())));

    let yields = fission_yields.above(config.min_yield);
    info!(
        "Using {} of {} fission products with yields of at least {}",
        yields.len(),
        fission_yields.yields.len(),
        config.min_yield.sci(1, 2)
    );

    let elements = Arc::new(elements);
    let registry = Registry::new(decay_data, Arc::clone(&elements));
    let calculator =
        ChainDecayCalculator::new(&registry, config.cutoff_seconds(), config.elapsed_seconds())
            .with_max_depth(config.max_depth);

    let inventory = FissionYieldAggregator::new(calculator)
        .with_progress(config.progress)
        .aggregate(&yields)?;
    debug!("Registry holds {} records", registry.len());

    element_totals(&inventory, elements.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::PeriodicTable;
    use crate::error::Error;

    #[test]
    fn totals_are_grouped_and_sorted() {
        let inventory = HashMap::from([
            (Isotope::new(55, 137), 0.06),
            (Isotope::new(38, 90), 0.05),
            (Isotope::new(38, 88), 0.02),
            (Isotope::new(40, 90), 0.0),
        ]);
        let totals = element_totals(&inventory, &PeriodicTable).unwrap();

        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].symbol, "Sr");
        assert!((totals[0].fraction - 0.07).abs() < 1e-15);
        assert_eq!(totals[1].protons, 55);
    }

    #[test]
    fn totals_need_known_elements() {
        let inventory = HashMap::from([(Isotope::new(38, 90), 0.05)]);
        assert!(matches!(
            element_totals(&inventory, &Elements::new()),
            Err(Error::ElementUnknown(38))
        ));
    }

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.cutoff_years, 31.0);
        assert_eq!(config.min_yield, 1e-4);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.progress);
    }
}
