//! Formatting helpers shared by the ftools crates
//!
//! Nuclide names, yield tables and log messages all want the same handful of
//! conventions, so they live here rather than being repeated everywhere.

// standard library
use std::fmt::LowerExp;

// Alias for the format! macro out of laziness
pub use std::format as f;

/// Extends primitives with more specific formatting options
pub trait NumFormat {
    /// Better scientific number formatting
    ///
    /// The default `{:e}` output does not sign or pad the exponent, which
    /// makes columns of yields hard to read. Works for anything implementing
    /// `LowerExp`.
    ///
    /// ```rust
    /// # use ftools_format::NumFormat;
    /// assert_eq!((9.7656e-4).sci(3, 2), "9.766e-04".to_string());
    /// assert_eq!((1.0).sci(5, 2), "1.00000e+00".to_string());
    /// ```
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: LowerExp> NumFormat for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let num = f!("{:.precision$e}", &self, precision = precision);
        let Some((mantissa, exp)) = num.split_once('e') else {
            return num;
        };
        let (sign, exp) = match exp.strip_prefix('-') {
            Some(exp) => ('-', exp),
            None => ('+', exp),
        };
        f!("{mantissa}e{sign}{exp:0>exp_pad$}")
    }
}

/// Capitalises the first letter of a string
///
/// Element symbols come back from the IAEA in whatever case the query used.
///
/// ```rust
/// # use ftools_format::capitalise;
/// assert_eq!(capitalise("pu"), "Pu".to_string());
/// assert_eq!(capitalise(""), "".to_string());
/// ```
pub fn capitalise(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
        None => String::new(),
    }
}

/// Element symbol in canonical form, i.e. `Pu`, `Sr`, `I`
///
/// ```rust
/// # use ftools_format::element_case;
/// assert_eq!(element_case("PU"), "Pu".to_string());
/// assert_eq!(element_case(" sr "), "Sr".to_string());
/// ```
pub fn element_case(symbol: &str) -> String {
    capitalise(&symbol.trim().to_lowercase())
}

/// Single row of a pipe delimited table
///
/// ```rust
/// # use ftools_format::table_row;
/// assert_eq!(table_row(&["Sr", "0.058000"]), "| Sr | 0.058000 |".to_string());
/// ```
pub fn table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let inner = cells
        .iter()
        .map(|c| c.as_ref())
        .collect::<Vec<&str>>()
        .join(" | ");
    f!("| {inner} |")
}
