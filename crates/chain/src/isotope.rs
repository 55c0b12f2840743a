//! Nuclide identity

// external crates
use serde::{Deserialize, Serialize};

// ftools modules
use ftools_format::f;

// internal modules
use crate::elements::{ElementResolver, PeriodicTable};
use crate::error::Result;

/// Nuclide identified by proton count and mass number
///
/// Used as a lookup key throughout, so equality, hashing and ordering are all
/// by `(protons, mass)`. Isomeric states are not distinguished.
///
/// ```rust
/// # use ftools_chain::Isotope;
/// let pu241 = Isotope::new(94, 241);
/// assert_eq!(pu241.neutrons(), 147);
/// assert_eq!(pu241.to_string(), "241Pu");
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Isotope {
    /// Proton number (Z)
    pub protons: u8,
    /// Mass number (Z+N, total nucleons)
    pub mass: u16,
}

impl Isotope {
    /// New isotope from Z and A
    pub const fn new(protons: u8, mass: u16) -> Self {
        Self { protons, mass }
    }

    /// Neutron number (N)
    pub fn neutrons(&self) -> u16 {
        self.mass.saturating_sub(self.protons as u16)
    }

    /// Shift Z and A, returning `None` for anything unphysical
    pub fn shifted(&self, delta_protons: i16, delta_mass: i16) -> Option<Self> {
        let protons = u8::try_from(self.protons as i16 + delta_protons).ok()?;
        let mass = u16::try_from(self.mass as i32 + delta_mass as i32).ok()?;
        (protons > 0 && mass >= protons as u16).then_some(Self { protons, mass })
    }

    /// Display name such as `90Sr` using the provided element resolver
    pub fn name(&self, elements: &dyn ElementResolver) -> Result<String> {
        Ok(f!("{}{}", self.mass, elements.symbol(self.protons)?))
    }

    /// Lower case name expected by IAEA queries, e.g. `90sr`
    pub fn query_name(&self, elements: &dyn ElementResolver) -> Result<String> {
        Ok(self.name(elements)?.to_lowercase())
    }
}

impl std::fmt::Display for Isotope {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match PeriodicTable::lookup(self.protons) {
            Some(symbol) => write!(f, "{}{}", self.mass, symbol),
            None => write!(f, "{}Z{}", self.mass, self.protons),
        }
    }
}
