//! IAEA chart of nuclides data for decay chains
//!
//! This crate feeds the `ftools-chain` engine with ground state decay data
//! and independent fission yields from the IAEA chart of nuclides API.
//!
//! See <https://www-nds.iaea.org/relnsd/vcharthtml/api_v0_guide.html> for
//! further information on the API.
//!
//! ## Caching
//!
//! Every response is written to a local [DataCache] and read back on later
//! runs, so each nuclide is only ever requested once. A full fission product
//! inventory needs a few hundred ground state requests, which would otherwise
//! be repeated for every run.
//!
//! ## Providers
//!
//! [IaeaProvider] implements both provider traits of the chain engine on top
//! of the cache:
//!
//! ```rust, no_run
//! # use ftools_iaea::{DataCache, IaeaProvider, Nuclide};
//! # use ftools_chain::{compute_element_distribution, Config};
//! # use std::str::FromStr;
//! let provider = IaeaProvider::new(DataCache::new("./data"));
//! let fissile = Nuclide::from_str("Pu241").unwrap().to_isotope().unwrap();
//!
//! let config = Config::default();
//! for row in compute_element_distribution(fissile, provider.clone(), &provider, &config).unwrap() {
//!     println!("{} {}", row.symbol, row.fraction);
//! }
//! ```
//!
//! The raw CSV and its parsed form are also available directly for anything
//! more specialised.
//!
//! ```rust, no_run
//! # use ftools_iaea::{decay_data_from_csv, fetch_ground_state_csv};
//! let csv_text = fetch_ground_state_csv("137cs", 30).unwrap();
//! let data = decay_data_from_csv(&csv_text, "137cs").unwrap();
//! println!("{} s", data.half_life);
//! ```

// Modules
mod cache;
mod error;
mod fetch;
mod nuclide;
mod parsers;
mod provider;
mod record;
mod yields;

// Re-exports of anything important with in-lined documentation for simplicity
#[doc(inline)]
pub use cache::DataCache;

#[doc(inline)]
pub use error::{Error, Result};

#[doc(inline)]
pub use fetch::{fetch_fission_yield_csv, fetch_ground_state_csv, DEFAULT_TIMEOUT, IAEA_API};

#[doc(inline)]
pub use nuclide::Nuclide;

#[doc(inline)]
pub use provider::IaeaProvider;

#[doc(inline)]
pub use record::{decay_data_from_csv, parse_ground_states, GroundState};

#[doc(inline)]
pub use yields::fission_yields_from_csv;
