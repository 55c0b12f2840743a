//! Independent fission yields

// external crates
use csv::StringRecord;
use log::{debug, trace, warn};

// ftools modules
use ftools_chain::{FissionYields, Isotope};
use ftools_format::{element_case, f};

// internal modules
use crate::error::{Error, Result};

/// Column positions in an `independent_fy` response
///
/// The yield columns are read by position, the header names are not relied
/// on. The `meta` column (isomer energy) sits at 6 but is not needed since
/// isomers are merged into their ground state.
mod column {
    pub const Z: usize = 0;
    pub const A: usize = 1;
    pub const ELEMENT: usize = 2;
    pub const THERMAL: usize = 7;
}

/// Header name of the thermal yield column, repeated between parent blocks
const THERMAL_HEADER: &str = "independent_thermal_fy";

/// Independent thermal fission yields from an `independent_fy` response
///
/// Rows without a thermal yield are skipped, as are repeated header rows.
/// Isomers are listed as separate rows and their yields are summed onto the
/// ground state. Every element symbol seen is kept alongside the yields.
///
/// No minimum yield is applied here.
///
/// ```rust
/// # use ftools_iaea::fission_yields_from_csv;
/// # use ftools_chain::Isotope;
/// let csv_text = "\
/// z,a,elem,zp,ap,elemp,meta,independent_thermal_fy
/// 38,90,Sr,94,241,Pu,0,0.0118
/// 55,137,Cs,94,241,Pu,0,0.00141
/// ";
/// let fission = fission_yields_from_csv(csv_text).unwrap();
///
/// assert_eq!(fission.yields[&Isotope::new(38, 90)], 0.0118);
/// assert_eq!(fission.symbols[&55], "Cs");
/// ```
pub fn fission_yields_from_csv(csv_text: &str) -> Result<FissionYields> {
    let mut reader = csv::ReaderBuilder::new()
        .quoting(false)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut fission = FissionYields::default();
    for (line, record) in reader.records().enumerate() {
        let record = record?;

        let Some((isotope, symbol, fission_yield)) = parse_row(&record, line + 2)? else {
            continue;
        };

        trace!("{isotope}: independent thermal yield {fission_yield}");
        *fission.yields.entry(isotope).or_insert(0.0) += fission_yield;
        fission.symbols.entry(isotope.protons).or_insert(symbol);
    }

    debug!(
        "Read {} fission products over {} elements",
        fission.yields.len(),
        fission.symbols.len()
    );
    Ok(fission)
}

/// Nuclide, symbol and yield for a row, `None` for rows to skip
fn parse_row(record: &StringRecord, line: usize) -> Result<Option<(Isotope, String, f64)>> {
    let thermal = match record.get(column::THERMAL) {
        None | Some("") | Some(THERMAL_HEADER) => return Ok(None),
        Some(thermal) => thermal,
    };

    let fission_yield = parse_field::<f64>(thermal, "yield", line)?;
    let protons = parse_field::<u8>(field(record, column::Z)?, "z", line)?;
    let mass = parse_field::<u16>(field(record, column::A)?, "a", line)?;
    let symbol = element_case(field(record, column::ELEMENT)?);

    if protons == 0 || mass < u16::from(protons) {
        warn!("Skipping line {line}, z={protons} a={mass} is not a nuclide");
        return Ok(None);
    }

    Ok(Some((Isotope::new(protons, mass), symbol, fission_yield)))
}

fn field(record: &StringRecord, index: usize) -> Result<&str> {
    record
        .get(index)
        .ok_or_else(|| Error::ParseError(f!("missing column {index} in {record:?}")))
}

fn parse_field<T: std::str::FromStr>(value: &str, name: &str, line: usize) -> Result<T> {
    value
        .parse::<T>()
        .map_err(|_| Error::ParseError(f!("line {line}: invalid {name} \"{value}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn by_symbol(fission: &FissionYields) -> HashMap<String, f64> {
        let mut totals = HashMap::new();
        for (isotope, fission_yield) in &fission.yields {
            let symbol = fission.symbols[&isotope.protons].clone();
            *totals.entry(symbol).or_insert(0.0) += fission_yield;
        }
        totals
    }

    const HEADER: &str = "z,a,elem,zp,ap,elemp,meta,independent_thermal_fy,unc_itf";

    #[test]
    fn isomers_are_summed() {
        let csv_text = f!(
            "{HEADER}\n\
             50,130,SN,94,241,Pu,0,0.01,\n\
             50,130,SN,94,241,Pu,1946.88,0.02,\n"
        );
        let fission = fission_yields_from_csv(&csv_text).unwrap();
        assert_eq!(fission.yields.len(), 1);
        assert!((fission.yields[&Isotope::new(50, 130)] - 0.03).abs() < 1e-15);
        assert_eq!(fission.symbols[&50], "Sn");
    }

    #[test]
    fn skipped_rows() {
        let csv_text = f!(
            "{HEADER}\n\
             38,90,Sr,94,241,Pu,0,,\n\
             {HEADER}\n\
             38,91,Sr,94,241,Pu,0,0.05,0.001\n\
             38,92\n"
        );
        let fission = fission_yields_from_csv(&csv_text).unwrap();
        assert_eq!(fission.yields.len(), 1);
        assert_eq!(by_symbol(&fission)["Sr"], 0.05);
    }

    #[test]
    fn small_yields_are_kept() {
        let csv_text = f!("{HEADER}\n30,78,Zn,94,241,Pu,0,2.1e-6,\n");
        let fission = fission_yields_from_csv(&csv_text).unwrap();
        assert_eq!(fission.yields[&Isotope::new(30, 78)], 2.1e-6);
    }

    #[test]
    fn bad_values() {
        let csv_text = f!("{HEADER}\n38,90,Sr,94,241,Pu,0,lots,\n");
        assert!(matches!(
            fission_yields_from_csv(&csv_text),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn free_neutrons_are_ignored() {
        let csv_text = f!("{HEADER}\n0,1,n,94,241,Pu,0,0.01,\n38,90,Sr,94,241,Pu,0,0.05,\n");
        let fission = fission_yields_from_csv(&csv_text).unwrap();
        assert_eq!(fission.yields.len(), 1);
        assert!(!fission.symbols.contains_key(&0));
    }
}
