//! User facing nuclide names

// ftools modules
use ftools_chain::{Isotope, PeriodicTable};
use ftools_format::f;

// internal modules
use crate::error::{Error, Result};
use crate::parsers::nuclide_from_str;

/// Ground state nuclide as written by a user
///
/// The `FromStr` trait is implemented and accepts the element and mass number
/// in either order, with an optional separator. The symbol is always stored
/// with conventional capitalisation.
///
/// ```rust
/// # use ftools_iaea::Nuclide;
/// # use std::str::FromStr;
/// let nuclide = Nuclide::from_str("pu-241").unwrap();
/// assert_eq!(nuclide, Nuclide::from_str("241PU").unwrap());
///
/// assert_eq!(nuclide.symbol, "Pu");
/// assert_eq!(nuclide.mass, 241);
/// assert_eq!(nuclide.query_name(), "241pu");
/// assert_eq!(nuclide.to_string(), "241Pu");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nuclide {
    /// Element symbol
    pub symbol: String,
    /// Mass number (Z+N, total nucleons)
    pub mass: u16,
}

impl Nuclide {
    /// Name as expected by IAEA API queries, e.g. `241pu`
    pub fn query_name(&self) -> String {
        f!("{}{}", self.mass, self.symbol.to_lowercase())
    }

    /// Proton number from the periodic table
    pub fn protons(&self) -> Result<u8> {
        PeriodicTable::protons(&self.symbol)
            .ok_or_else(|| Error::UnknownElement(self.symbol.clone()))
    }

    /// Convert to the [Isotope] key used by the decay chain engine
    ///
    /// ```rust
    /// # use ftools_iaea::Nuclide;
    /// # use ftools_chain::Isotope;
    /// # use std::str::FromStr;
    /// let nuclide = Nuclide::from_str("U235").unwrap();
    /// assert_eq!(nuclide.to_isotope().unwrap(), Isotope::new(92, 235));
    /// ```
    pub fn to_isotope(&self) -> Result<Isotope> {
        let protons = self.protons()?;
        if self.mass < u16::from(protons) {
            return Err(Error::ParseError(f!(
                "mass number {} is below the proton number of {}",
                self.mass,
                self.symbol
            )));
        }
        Ok(Isotope::new(protons, self.mass))
    }
}

impl std::str::FromStr for Nuclide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (_, nuclide) =
            nuclide_from_str(s).map_err(|_| Error::FailedToParseNuclide(s.to_string()))?;

        Ok(nuclide)
    }
}

impl std::fmt::Display for Nuclide {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.mass, self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn unknown_elements() {
        let nuclide = Nuclide::from_str("Xx12").unwrap();
        assert!(matches!(nuclide.to_isotope(), Err(Error::UnknownElement(s)) if s == "Xx"));
    }

    #[test]
    fn impossible_mass() {
        assert!(matches!(
            Nuclide::from_str("Pu12").unwrap().to_isotope(),
            Err(Error::ParseError(_))
        ));
    }

    #[test]
    fn parse_failure_keeps_input() {
        assert!(matches!(
            Nuclide::from_str("plutonium"),
            Err(Error::FailedToParseNuclide(s)) if s == "plutonium"
        ));
    }
}
