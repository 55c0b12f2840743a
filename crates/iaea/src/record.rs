//! Ground state records and their conversion to decay data

// external crates
use csv::Reader;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

// ftools modules
use ftools_chain::{DecayBranch, DecayData};

// internal modules
use crate::error::Result;

/// Data for a single row of an IAEA `ground_states` request
///
/// Only the fields needed for decay chains are kept, everything else in the
/// response is ignored. As with any IAEA data every field is optional, and
/// unreadable values (e.g. `STABLE` in a numeric column) are read as `None`.
///
/// Up to three decay modes are listed per nuclide along with their branching
/// percentages.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct GroundState {
    /// Proton number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub z: Option<u8>,

    /// Neutron number
    #[serde(deserialize_with = "csv::invalid_option")]
    pub n: Option<u16>,

    /// Element symbol
    #[serde(deserialize_with = "csv::invalid_option")]
    pub symbol: Option<String>,

    /// Half-life (s)
    #[serde(deserialize_with = "csv::invalid_option")]
    pub half_life_sec: Option<f64>,

    /// First decay mode
    #[serde(deserialize_with = "csv::invalid_option")]
    pub decay_1: Option<String>,

    /// First decay mode branching (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_1_%")]
    pub decay_1_percent: Option<f64>,

    /// Second decay mode
    #[serde(deserialize_with = "csv::invalid_option")]
    pub decay_2: Option<String>,

    /// Second decay mode branching (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_2_%")]
    pub decay_2_percent: Option<f64>,

    /// Third decay mode
    #[serde(deserialize_with = "csv::invalid_option")]
    pub decay_3: Option<String>,

    /// Third decay mode branching (%)
    #[serde(deserialize_with = "csv::invalid_option")]
    #[serde(rename = "decay_3_%")]
    pub decay_3_percent: Option<f64>,
}

impl GroundState {
    /// Decay branches in listed order, skipping any incomplete mode
    pub fn branches(&self) -> Vec<DecayBranch> {
        [
            (&self.decay_1, self.decay_1_percent),
            (&self.decay_2, self.decay_2_percent),
            (&self.decay_3, self.decay_3_percent),
        ]
        .into_iter()
        .zip(1..)
        .filter_map(|((mode, percent), column)| match (mode, percent) {
            (Some(mode), Some(percent)) if !mode.is_empty() => Some(DecayBranch {
                mode: mode.clone(),
                percent,
                column,
            }),
            _ => None,
        })
        .collect()
    }

    /// Convert to the decay data used by the chain engine
    ///
    /// A row without a numeric half-life is stable, whatever modes it lists.
    pub fn decay_data(&self) -> DecayData {
        match self.half_life_sec {
            Some(half_life) => DecayData {
                half_life,
                branches: self.branches(),
            },
            None => DecayData::stable(),
        }
    }
}

/// Deserialise every row of a `ground_states` response
pub fn parse_ground_states(csv_text: &str) -> Result<Vec<GroundState>> {
    let rows = csv_reader(csv_text)
        .deserialize::<GroundState>()
        .collect::<csv::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Decay data from a `ground_states` response for the nuclide `query`
///
/// The first row with a numeric half-life is used. No such row means the
/// nuclide is treated as stable.
///
/// ```rust
/// # use ftools_iaea::decay_data_from_csv;
/// let csv_text = "z,n,symbol,half_life_sec,decay_1,decay_1_%\n38,52,Sr,912301680,B-,100\n";
/// let data = decay_data_from_csv(csv_text, "90sr").unwrap();
///
/// assert_eq!(data.half_life, 912301680.0);
/// assert_eq!(data.branches[0].mode, "B-");
/// ```
pub fn decay_data_from_csv(csv_text: &str, query: &str) -> Result<DecayData> {
    let rows = parse_ground_states(csv_text)?;

    if rows.is_empty() {
        warn!("No ground state data for {query}, treated as stable");
        return Ok(DecayData::stable());
    }

    match rows.iter().find(|r| r.half_life_sec.is_some()) {
        Some(row) => Ok(row.decay_data()),
        None => {
            debug!("{query} has no numeric half-life, treated as stable");
            Ok(DecayData::stable())
        }
    }
}

fn csv_reader(csv_text: &str) -> Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .quoting(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes())
}
