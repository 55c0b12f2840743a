//! Raw CSV requests to the IAEA chart of nuclides API

// external crates
use log::debug;

// ftools modules
use ftools_format::f;

// internal modules
use crate::error::{Error, Result};

/// Base of the URL used to query the IAEA API
pub const IAEA_API: &str = "https://nds.iaea.org/relnsd/v1/data?";

/// Default request timeout (s)
pub const DEFAULT_TIMEOUT: u64 = 30;

/// The API refuses requests without a browser-like user agent
const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:77.0) Gecko/20100101 Firefox/77.0";

/// Raw `ground_states` CSV for a single nuclide
///
/// The `query` is the lower case name expected by the API, e.g. `90sr`.
///
/// ```rust, no_run
/// # use ftools_iaea::fetch_ground_state_csv;
/// println!("{}", fetch_ground_state_csv("90sr", 30).unwrap());
/// ```
///
/// will provide the headings followed by a single data record
///
/// ```text
/// z,n,symbol,radius,unc_r,abundance,unc_a,energy_shift,energy,unc_e,
/// ripl_shift,jp,half_life,operator_hl,unc_hl,unit_hl,half_life_sec,unc_hls,
/// decay_1,decay_1_%,unc_1,decay_2,decay_2_%,unc_2,decay_3,decay_3_%,unc_3,...
///
/// 38,52,Sr,4.2696,0.0026,,,,0,,,0+,28.91,,3,y,912301680,94670000,B-,100,,...
/// ```
pub fn fetch_ground_state_csv(query: &str, timeout: u64) -> Result<String> {
    fetch_csv(
        &f!("{IAEA_API}fields=ground_states&nuclides={query}"),
        timeout,
    )
}

/// Raw `independent_fy` CSV for a fissile parent
///
/// The `parent` is the lower case name expected by the API, e.g. `241pu`.
pub fn fetch_fission_yield_csv(parent: &str, timeout: u64) -> Result<String> {
    fetch_csv(
        &f!("{IAEA_API}fields=independent_fy&parents={parent}"),
        timeout,
    )
}

fn fetch_csv(url: &str, timeout: u64) -> Result<String> {
    debug!("GET {url}");

    // send get request to IAEA
    let response = minreq::get(url)
        .with_header("User-Agent", USER_AGENT)
        .with_timeout(timeout)
        .send()?;

    if response.status_code != 200 {
        return Err(Error::BadStatus {
            status: response.status_code,
            url: url.to_string(),
        });
    }

    Ok(response.as_str()?.to_string())
}
