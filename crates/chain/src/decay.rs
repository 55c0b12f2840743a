//! Decay properties of a single nuclide

// external crates
use log::{debug, warn};

// internal modules
use crate::bateman::decay_constant;
use crate::error::{Error, Result};
use crate::isotope::Isotope;

/// A single decay mode and its branching percentage as listed by the source
#[derive(Debug, Clone, PartialEq)]
pub struct DecayBranch {
    /// Decay mode code, e.g. `B-`, `A`, `EC+B+`
    pub mode: String,
    /// Branching ratio (%)
    pub percent: f64,
    /// Source column the branch was listed in, starting from 1
    pub column: usize,
}

/// Raw decay data as supplied by a data provider
///
/// Branches are kept in source order, which matters for the renormalisation
/// rule applied in [IsotopeRecord::from_decay_data].
#[derive(Debug, Clone, PartialEq)]
pub struct DecayData {
    /// Half-life (s), infinite for stable nuclides
    pub half_life: f64,
    /// Decay branches in source order
    pub branches: Vec<DecayBranch>,
}

impl DecayData {
    /// Stable nuclide with no decay branches
    pub fn stable() -> Self {
        Self {
            half_life: f64::INFINITY,
            branches: Vec::new(),
        }
    }

    /// Unstable nuclide with a half-life (s) and no branches yet
    pub fn with_half_life(half_life: f64) -> Self {
        Self {
            half_life,
            branches: Vec::new(),
        }
    }

    /// Append a branch in the next source column, builder style
    pub fn branch(self, mode: &str, percent: f64) -> Self {
        let column = self.branches.last().map_or(1, |b| b.column + 1);
        self.branch_in_column(column, mode, percent)
    }

    /// Append a branch listed in a specific source column
    pub fn branch_in_column(mut self, column: usize, mode: &str, percent: f64) -> Self {
        self.branches.push(DecayBranch {
            mode: mode.to_string(),
            percent,
            column,
        });
        self
    }
}

impl Default for DecayData {
    fn default() -> Self {
        Self::stable()
    }
}

/// Daughter nuclide produced by a decay mode
///
/// | mode             | ΔZ | ΔA |
/// | ---------------- | -- | -- |
/// | `A`              | -2 | -4 |
/// | `B-`             | +1 |  0 |
/// | `B-N`            | +1 | -1 |
/// | `B-2N`           | +1 | -2 |
/// | `B+P`            | -2 | -1 |
/// | `2B-`            | +2 |  0 |
/// | `B+`, `EC+B+`, `EC` | -1 |  0 |
///
/// ```rust
/// # use ftools_chain::{decay_mode_daughter, Isotope};
/// let sr90 = Isotope::new(38, 90);
/// assert_eq!(decay_mode_daughter("B-", sr90).unwrap(), Isotope::new(39, 90));
/// assert!(decay_mode_daughter("SF", sr90).is_err());
/// ```
pub fn decay_mode_daughter(mode: &str, isotope: Isotope) -> Result<Isotope> {
    let (delta_protons, delta_mass) = match mode.trim() {
        "A" => (-2, -4),
        "B-" => (1, 0),
        "B-N" => (1, -1),
        "B-2N" => (1, -2),
        "B+P" => (-2, -1),
        "2B-" => (2, 0),
        "B+" | "EC+B+" | "EC" => (-1, 0),
        _ => return Err(unsupported(mode, isotope)),
    };

    isotope
        .shifted(delta_protons, delta_mass)
        .ok_or_else(|| unsupported(mode, isotope))
}

fn unsupported(mode: &str, isotope: Isotope) -> Error {
    Error::UnsupportedDecayMode {
        mode: mode.to_string(),
        nuclide: isotope.to_string(),
    }
}

/// Decay properties for a single nuclide
///
/// Records are owned by the [Registry](crate::Registry) and are immutable once
/// constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeRecord {
    isotope: Isotope,
    half_life: f64,
    decays: Vec<(Isotope, f64)>,
}

impl IsotopeRecord {
    /// A stable record with no decays
    pub fn stable(isotope: Isotope) -> Self {
        Self {
            isotope,
            half_life: f64::INFINITY,
            decays: Vec::new(),
        }
    }

    /// Build the record from provider data
    ///
    /// Percentages are converted to probabilities and each decay mode is
    /// mapped onto its daughter. Unsupported modes are dropped with a warning,
    /// as are branches with no probability.
    ///
    /// The source data are inconsistently normalised. When the branch in the
    /// second source column is processed and an earlier branch is listed at
    /// exactly 100%, every existing probability is rewritten to `1 - chance`
    /// of that branch. Branches in any other column are taken as they are,
    /// even when the second column is blank.
    pub fn from_decay_data(isotope: Isotope, data: &DecayData) -> Self {
        let mut decays: Vec<(Isotope, f64)> = Vec::with_capacity(data.branches.len());

        for branch in &data.branches {
            let chance = branch.percent / 100.0;

            if branch.column == 2 && decays.iter().any(|(_, p)| *p == 1.0) {
                debug!("{isotope}: renormalising earlier branches to {}", 1.0 - chance);
                decays.iter_mut().for_each(|(_, p)| *p = 1.0 - chance);
            }

            let daughter = match decay_mode_daughter(&branch.mode, isotope) {
                Ok(daughter) => daughter,
                Err(e) => {
                    warn!("{e}, dropping {}% branch", branch.percent);
                    continue;
                }
            };

            match decays.iter_mut().find(|(d, _)| *d == daughter) {
                Some((_, p)) => *p = chance,
                None => decays.push((daughter, chance)),
            }
        }

        decays.retain(|(daughter, p)| {
            let keep = *p > 0.0;
            if !keep {
                debug!("{isotope}: ignoring zero probability branch to {daughter}");
            }
            keep
        });

        Self {
            isotope,
            half_life: data.half_life,
            decays,
        }
    }

    /// The nuclide this record describes
    pub fn isotope(&self) -> Isotope {
        self.isotope
    }

    /// Half-life (s), infinite if stable
    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    /// Decay constant (1/s), zero if stable
    pub fn decay_constant(&self) -> f64 {
        decay_constant(self.half_life)
    }

    /// Daughters and their branch probabilities in source order
    pub fn decays(&self) -> &[(Isotope, f64)] {
        &self.decays
    }

    /// True if the half-life is below `cutoff` seconds
    ///
    /// The same cutoff gates both tree expansion and decay propagation.
    pub fn is_unstable(&self, cutoff: f64) -> bool {
        self.half_life < cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CS137: Isotope = Isotope::new(55, 137);

    #[test]
    fn decay_mode_table() {
        let u238 = Isotope::new(92, 238);
        let cases = [
            ("A", Isotope::new(90, 234)),
            ("B-", Isotope::new(93, 238)),
            ("B-N", Isotope::new(93, 237)),
            ("B-2N", Isotope::new(93, 236)),
            ("B+P", Isotope::new(90, 237)),
            ("2B-", Isotope::new(94, 238)),
            ("B+", Isotope::new(91, 238)),
            ("EC+B+", Isotope::new(91, 238)),
            ("EC", Isotope::new(91, 238)),
        ];
        for (mode, expected) in cases {
            assert_eq!(decay_mode_daughter(mode, u238).unwrap(), expected);
        }
    }

    #[test]
    fn unsupported_modes() {
        assert!(matches!(
            decay_mode_daughter("SF", CS137),
            Err(Error::UnsupportedDecayMode { .. })
        ));
        // alpha decay of hydrogen has nowhere to go
        assert!(decay_mode_daughter("A", Isotope::new(1, 3)).is_err());
    }

    #[test]
    fn percentages_become_probabilities() {
        let data = DecayData::with_half_life(9.49e8).branch("B-", 100.0);
        let record = IsotopeRecord::from_decay_data(CS137, &data);
        assert_eq!(record.decays(), &[(Isotope::new(56, 137), 1.0)]);
        assert_eq!(record.half_life(), 9.49e8);
    }

    #[test]
    fn second_branch_renormalises_full_first_branch() {
        let parent = Isotope::new(37, 94);
        let data = DecayData::with_half_life(2.7)
            .branch("B-", 100.0)
            .branch("B-N", 10.5);
        let record = IsotopeRecord::from_decay_data(parent, &data);

        let decays = record.decays();
        assert_eq!(decays[0].0, Isotope::new(38, 94));
        assert!((decays[0].1 - 0.895).abs() < 1e-12);
        assert_eq!(decays[1], (Isotope::new(38, 93), 0.105));
    }

    #[test]
    fn third_branch_never_renormalises() {
        let parent = Isotope::new(37, 97);
        let data = DecayData::with_half_life(0.17)
            .branch("B-", 60.0)
            .branch("B-N", 39.0)
            .branch("B-2N", 100.0);
        let record = IsotopeRecord::from_decay_data(parent, &data);
        let probabilities: Vec<f64> = record.decays().iter().map(|(_, p)| *p).collect();
        assert_eq!(probabilities, vec![0.6, 0.39, 1.0]);
    }

    #[test]
    fn blank_second_column_never_renormalises() {
        let parent = Isotope::new(37, 94);
        let data = DecayData::with_half_life(2.7)
            .branch_in_column(1, "B-", 100.0)
            .branch_in_column(3, "B-N", 10.0);
        let record = IsotopeRecord::from_decay_data(parent, &data);
        assert_eq!(
            record.decays(),
            &[(Isotope::new(38, 94), 1.0), (Isotope::new(38, 93), 0.1)]
        );
    }

    #[test]
    fn unsupported_second_column_still_renormalises() {
        let data = DecayData::with_half_life(10.0)
            .branch("B-", 100.0)
            .branch("SF", 25.0);
        let record = IsotopeRecord::from_decay_data(CS137, &data);
        assert_eq!(record.decays(), &[(Isotope::new(56, 137), 0.75)]);
    }

    #[test]
    fn unsupported_branch_is_dropped() {
        let data = DecayData::with_half_life(10.0)
            .branch("SF", 3.0)
            .branch("A", 97.0);
        let record = IsotopeRecord::from_decay_data(Isotope::new(98, 252), &data);
        assert_eq!(record.decays(), &[(Isotope::new(96, 248), 0.97)]);
    }

    #[test]
    fn zero_probability_branch_is_dropped() {
        let data = DecayData::with_half_life(10.0)
            .branch("B-", 0.0)
            .branch("B+", 100.0);
        let record = IsotopeRecord::from_decay_data(CS137, &data);
        assert_eq!(record.decays(), &[(Isotope::new(54, 137), 1.0)]);
    }

    #[test]
    fn stability_against_cutoff() {
        let year = 3.1536e7;
        let stable = IsotopeRecord::stable(CS137);
        assert_eq!(stable.half_life(), f64::INFINITY);
        assert!(!stable.is_unstable(f64::MAX));
        assert_eq!(stable.decay_constant(), 0.0);

        let data = DecayData::with_half_life(30.08 * year).branch("B-", 100.0);
        let record = IsotopeRecord::from_decay_data(CS137, &data);
        assert!(record.is_unstable(31.0 * year));
        assert!(!record.is_unstable(2.0 * year));
        assert!(record.half_life().is_finite());
    }
}
