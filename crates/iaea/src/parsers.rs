//! Set of useful parser combinators

// ftools modules
use ftools_format::element_case;

// nom parser combinators
use nom::branch::alt;
use nom::character::complete::{alpha1, one_of, space0};
use nom::combinator::{all_consuming, opt};
use nom::error::{Error, ErrorKind};
use nom::sequence::delimited;
use nom::{self, Err, IResult};

// internal modules
use crate::nuclide::Nuclide;

/// Parse a string into a ground state nuclide
///
/// Either order is accepted, with an optional separator:
///     - Symbol first: Pu241, pu-241, Pu_241
///     - Mass first: 241Pu, 241pu, 241-Pu
///
/// Surrounding whitespace is ignored, anything else left over is an error.
/// Isomer tags are not supported since the decay chain only deals in ground
/// states.
pub(crate) fn nuclide_from_str(i: &str) -> IResult<&str, Nuclide> {
    all_consuming(delimited(space0, alt((symbol_first, mass_first)), space0))(i)
}

/// `<element><separator><mass>`
fn symbol_first(i: &str) -> IResult<&str, Nuclide> {
    let (i, symbol) = element(i)?;
    let (i, _) = opt(separator)(i)?;
    let (i, mass) = mass(i)?;
    Ok((i, nuclide(symbol, mass)))
}

/// `<mass><separator><element>`
fn mass_first(i: &str) -> IResult<&str, Nuclide> {
    let (i, mass) = mass(i)?;
    let (i, _) = opt(separator)(i)?;
    let (i, symbol) = element(i)?;
    Ok((i, nuclide(symbol, mass)))
}

fn nuclide(symbol: &str, mass: u16) -> Nuclide {
    Nuclide {
        symbol: element_case(symbol),
        mass,
    }
}

/// Get the element symbol
fn element(i: &str) -> IResult<&str, &str> {
    let (rest, element) = alpha1(i)?;

    if element.len() > 2 {
        Err(Err::Error(Error::new(i, ErrorKind::Fail)))
    } else {
        Ok((rest, element))
    }
}

/// Get the mass number
fn mass(i: &str) -> IResult<&str, u16> {
    nom::character::complete::u16(i)
}

/// List of possible separators people may use
fn separator(i: &str) -> IResult<&str, char> {
    one_of("_- ")(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(i: &str) -> Option<Nuclide> {
        nuclide_from_str(i).ok().map(|(_, n)| n)
    }

    #[test]
    fn both_orders() {
        let expected = Nuclide {
            symbol: "Pu".to_string(),
            mass: 241,
        };
        for i in ["Pu241", "pu241", "PU-241", "pu_241", "241Pu", "241pu", "241-pu", " 241Pu "] {
            assert_eq!(parse(i).as_ref(), Some(&expected), "{i}");
        }
    }

    #[test]
    fn single_letter_elements() {
        assert_eq!(parse("131I").unwrap().symbol, "I");
        assert_eq!(parse("U235").unwrap().mass, 235);
    }

    #[test]
    fn rejects_junk() {
        for i in ["", "Pu", "241", "Plu241", "Pu241m", "Pu241x", "Pu-", "99999Pu"] {
            assert!(parse(i).is_none(), "{i}");
        }
    }
}
