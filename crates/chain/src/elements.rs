//! Element symbol resolution
//!
//! Proton numbers are resolved to symbols through an [ElementResolver]. This
//! is needed for display and, more importantly, to build the nuclide names
//! used when querying decay data.
//!
//! Two implementations are provided:
//!
//! - [PeriodicTable], a static lookup for Z = 1 to 118
//! - [Elements], a table of known symbols (typically learned from fission
//!   yield data) with an optional fallback resolver
//!
//! ```rust
//! # use ftools_chain::{ElementResolver, Elements, PeriodicTable};
//! assert_eq!(PeriodicTable.symbol(94).unwrap(), "Pu");
//!
//! let mut elements = Elements::new().with_fallback(PeriodicTable);
//! elements.insert(43, "Tc");
//! assert_eq!(elements.symbol(43).unwrap(), "Tc");
//! assert_eq!(elements.symbol(55).unwrap(), "Cs");
//! ```

// standard library
use std::collections::HashMap;
use std::sync::Arc;

// ftools modules
use ftools_format::element_case;

// internal modules
use crate::error::{Error, Result};

/// Symbols indexed by proton number, index 0 is unused
const SYMBOLS: [&str; 119] = [
    "", "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge",
    "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd",
    "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd",
    "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg",
    "Tl", "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm",
    "Bk", "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn",
    "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Capability for turning a proton number into an element symbol
///
/// Implementations must fail with [Error::ElementUnknown] rather than make
/// up a placeholder name.
pub trait ElementResolver: Send + Sync {
    /// Element symbol for `protons`, e.g. `Sr` for 38
    fn symbol(&self, protons: u8) -> Result<String>;
}

impl<T: ElementResolver + ?Sized> ElementResolver for Arc<T> {
    fn symbol(&self, protons: u8) -> Result<String> {
        (**self).symbol(protons)
    }
}

/// Static periodic table for Z = 1 to 118
#[derive(Debug, Default, Clone, Copy)]
pub struct PeriodicTable;

impl PeriodicTable {
    /// Symbol lookup without the error wrapping
    pub fn lookup(protons: u8) -> Option<&'static str> {
        match protons {
            0 => None,
            z => SYMBOLS.get(z as usize).copied(),
        }
    }

    /// Proton number for a symbol, case insensitive
    ///
    /// ```rust
    /// # use ftools_chain::PeriodicTable;
    /// assert_eq!(PeriodicTable::protons("pu"), Some(94));
    /// assert_eq!(PeriodicTable::protons("Xx"), None);
    /// ```
    pub fn protons(symbol: &str) -> Option<u8> {
        let symbol = element_case(symbol);
        SYMBOLS
            .iter()
            .skip(1)
            .position(|s| *s == symbol)
            .map(|i| (i + 1) as u8)
    }
}

impl ElementResolver for PeriodicTable {
    fn symbol(&self, protons: u8) -> Result<String> {
        Self::lookup(protons)
            .map(str::to_string)
            .ok_or(Error::ElementUnknown(protons))
    }
}

/// Known element symbols with an optional fallback strategy
///
/// Symbols inserted directly always take priority over the fallback.
#[derive(Default)]
pub struct Elements {
    symbols: HashMap<u8, String>,
    fallback: Option<Box<dyn ElementResolver>>,
}

impl Elements {
    /// An empty table with no fallback
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty table falling back to the [PeriodicTable]
    pub fn periodic() -> Self {
        Self::new().with_fallback(PeriodicTable)
    }

    /// Use `resolver` for anything not explicitly known
    pub fn with_fallback<R: ElementResolver + 'static>(mut self, resolver: R) -> Self {
        self.fallback = Some(Box::new(resolver));
        self
    }

    /// Record the symbol for a proton number, replacing any previous entry
    pub fn insert<S: AsRef<str>>(&mut self, protons: u8, symbol: S) {
        self.symbols.insert(protons, element_case(symbol.as_ref()));
    }

    /// Number of explicitly known symbols
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// True if no symbols have been explicitly recorded
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl<S: AsRef<str>> Extend<(u8, S)> for Elements {
    fn extend<I: IntoIterator<Item = (u8, S)>>(&mut self, iter: I) {
        for (protons, symbol) in iter {
            self.insert(protons, symbol);
        }
    }
}

impl ElementResolver for Elements {
    fn symbol(&self, protons: u8) -> Result<String> {
        match (self.symbols.get(&protons), &self.fallback) {
            (Some(symbol), _) => Ok(symbol.clone()),
            (None, Some(fallback)) => fallback.symbol(protons),
            (None, None) => Err(Error::ElementUnknown(protons)),
        }
    }
}

impl std::fmt::Debug for Elements {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Elements")
            .field("symbols", &self.symbols)
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_table_bounds() {
        assert_eq!(PeriodicTable::lookup(1), Some("H"));
        assert_eq!(PeriodicTable::lookup(118), Some("Og"));
        assert_eq!(PeriodicTable::lookup(0), None);
        assert_eq!(PeriodicTable::lookup(119), None);
        assert!(matches!(
            PeriodicTable.symbol(0),
            Err(Error::ElementUnknown(0))
        ));
    }

    #[test]
    fn reverse_lookup_round_trips() {
        for z in 1..=118u8 {
            let symbol = PeriodicTable::lookup(z).unwrap();
            assert_eq!(PeriodicTable::protons(symbol), Some(z));
        }
        assert_eq!(PeriodicTable::protons("SR"), Some(38));
        assert_eq!(PeriodicTable::protons(""), None);
    }

    #[test]
    fn learned_symbols_take_priority() {
        let mut elements = Elements::periodic();
        elements.insert(38, "strontium");
        assert_eq!(elements.symbol(38).unwrap(), "Strontium");
        assert_eq!(elements.symbol(39).unwrap(), "Y");
    }

    #[test]
    fn no_fallback_is_an_error() {
        let mut elements = Elements::new();
        elements.extend([(55u8, "cs")]);
        assert_eq!(elements.len(), 1);
        assert_eq!(elements.symbol(55).unwrap(), "Cs");
        assert!(matches!(
            elements.symbol(56),
            Err(Error::ElementUnknown(56))
        ));
    }
}
