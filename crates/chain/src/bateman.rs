//! Closed form Bateman solution for linear decay chains
//!
//! For a chain `N0 -> N1 -> ... -> Nn-1` with unit initial quantity of `N0`
//! and nothing else, the quantity of the last member after time `t` is
//!
//! ```text
//!            n-2            n-1       exp(-λi t)
//! Nn-1(t) =   Π  λk    ×     Σ   -------------------
//!            k=0            i=0   Π_{j≠i} (λj - λi)
//! ```
//!
//! The sum is undefined whenever two constants are equal. Coincident constants
//! are nudged apart by a tiny relative amount before evaluation, which is
//! physically negligible but keeps every denominator finite. Distinct constants
//! are never moved, however small, and no constant ever becomes negative.

// standard library
use std::f64::consts::LN_2;

/// Relative separation below which two decay constants are treated as coincident
pub const DEGENERACY_EPSILON: f64 = 1e-10;

/// Relative shift applied to the later of two coincident decay constants
pub const DEGENERACY_SHIFT: f64 = 2e-10;

/// Decay constant (1/s) from a half-life (s)
///
/// Infinite half-lives (stable nuclides) give zero.
///
/// ```rust
/// # use ftools_chain::decay_constant;
/// assert_eq!(decay_constant(f64::INFINITY), 0.0);
/// assert!((decay_constant(10.0) - 0.0693147).abs() < 1e-6);
/// ```
pub fn decay_constant(half_life: f64) -> f64 {
    (LN_2 / half_life).max(0.0)
}

/// Fraction of the first chain member found in the last after `elapsed` seconds
///
/// `decay_constants` is the ordered chain from root to terminal nuclide. A
/// single-member chain gives the surviving fraction of the root itself, so a
/// stable root always returns 1.
///
/// ```rust
/// # use ftools_chain::bateman;
/// // stable nuclide, nothing decays
/// assert_eq!(bateman(&[0.0], 1.0e9), 1.0);
///
/// // parent with a 10 s half-life feeding a stable daughter
/// let lambda = std::f64::consts::LN_2 / 10.0;
/// let daughter = bateman(&[lambda, 0.0], 100.0);
/// assert!((daughter - (1.0 - 2f64.powi(-10))).abs() < 1e-12);
/// ```
///
/// Never fails. An empty chain returns 0.
pub fn bateman(decay_constants: &[f64], elapsed: f64) -> f64 {
    if decay_constants.is_empty() {
        return 0.0;
    }

    let lambdas = separate_coincident(decay_constants);
    let leading: f64 = lambdas[..lambdas.len() - 1].iter().product();

    let sum: f64 = lambdas
        .iter()
        .enumerate()
        .map(|(i, &lambda_i)| {
            let denominator: f64 = lambdas
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, &lambda_j)| lambda_j - lambda_i)
                .product();
            (-lambda_i * elapsed).exp() / denominator
        })
        .sum();

    leading * sum
}

/// Copy of the chain with no two constants coincident
///
/// Two constants are coincident when they are identical or differ by less than
/// [DEGENERACY_EPSILON] of the larger. On a collision the later constant moves
/// by [DEGENERACY_SHIFT] of the larger away from the earlier (upwards when
/// they are identical) and is checked again from the start. A zero constant
/// only collides with another zero.
fn separate_coincident(decay_constants: &[f64]) -> Vec<f64> {
    let mut lambdas = decay_constants.to_vec();
    let max_shifts = 2 * lambdas.len() * lambdas.len();

    for i in 1..lambdas.len() {
        let mut shifts = 0;
        let mut j = 0;
        while j < i && shifts < max_shifts {
            let difference = lambdas[i] - lambdas[j];
            let scale = lambdas[i].abs().max(lambdas[j].abs());
            if difference == 0.0 || difference.abs() < DEGENERACY_EPSILON * scale {
                // both zero, nothing to scale against
                let step = if scale > 0.0 {
                    DEGENERACY_SHIFT * scale
                } else {
                    DEGENERACY_SHIFT
                };
                let direction = if difference < 0.0 { -1.0 } else { 1.0 };
                lambdas[i] += direction * step;
                shifts += 1;
                j = 0;
            } else {
                j += 1;
            }
        }
    }

    lambdas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance * b.abs().max(1e-300)
    }

    #[test]
    fn stable_single_member() {
        for t in [0.0, 1.0, 3.15e7, 1.0e12] {
            assert_eq!(bateman(&[0.0], t), 1.0);
        }
    }

    #[test]
    fn single_member_pure_decay() {
        let lambda = decay_constant(10.0);
        let mut previous = bateman(&[lambda], 0.0);
        assert!(close(previous, 1.0, 1e-15));
        for t in [1.0, 5.0, 10.0, 50.0, 100.0] {
            let current = bateman(&[lambda], t);
            assert!(current < previous);
            assert!(close(current, (-lambda * t).exp(), 1e-12));
            previous = current;
        }
        assert!(close(bateman(&[lambda], 10.0), 0.5, 1e-12));
    }

    #[test]
    fn two_member_matches_analytic() {
        let (la, lb) = (decay_constant(10.0), decay_constant(25.0));
        let t = 40.0;
        let expected = la / (lb - la) * ((-la * t).exp() - (-lb * t).exp());
        assert!(close(bateman(&[la, lb], t), expected, 1e-12));
    }

    #[test]
    fn distinct_chain_bounded() {
        let chain = [
            decay_constant(3.0),
            decay_constant(17.0),
            decay_constant(120.0),
            0.0,
        ];
        for n in 1..=chain.len() {
            for t in [0.5, 10.0, 100.0, 1.0e4] {
                let value = bateman(&chain[..n], t);
                assert!(value >= 0.0, "n={n} t={t} value={value}");
                assert!(value <= 1.0 + 1e-12, "n={n} t={t} value={value}");
            }
        }
    }

    #[test]
    fn chain_members_sum_to_one() {
        let chain = [decay_constant(2.0), decay_constant(7.0), decay_constant(30.0), 0.0];
        let t = 12.0;
        let total: f64 = (1..=chain.len()).map(|n| bateman(&chain[..n], t)).sum();
        assert!(close(total, 1.0, 1e-10));
    }

    #[test]
    fn coincident_constants_approach_limit() {
        let lambda: f64 = 0.1;
        for t in [1.0, 10.0, 50.0] {
            let limit = lambda * t * (-lambda * t).exp();
            let value = bateman(&[lambda, lambda], t);
            assert!(value.is_finite());
            assert!(close(value, limit, 1e-5), "t={t} {value} vs {limit}");
        }
    }

    #[test]
    fn separation_is_consistent() {
        let lambdas = separate_coincident(&[0.3, 0.3, 0.3 - 5e-12, 0.1]);
        assert_eq!(lambdas[0], 0.3);
        assert_eq!(lambdas[3], 0.1);
        for i in 0..lambdas.len() {
            assert!(lambdas[i] > 0.0);
            for j in 0..i {
                let scale = lambdas[i].max(lambdas[j]);
                assert!((lambdas[i] - lambdas[j]).abs() >= DEGENERACY_EPSILON * scale);
            }
        }
    }

    #[test]
    fn tiny_distinct_constants_are_untouched() {
        let lambdas = [decay_constant(2.11e5 * 3.1536e7), 0.0];
        assert_eq!(separate_coincident(&lambdas), lambdas);

        let zeros = separate_coincident(&[0.0, 0.0]);
        assert!(zeros[1] > 0.0);
    }

    #[test]
    fn long_lived_parent_feeds_stable_daughter() {
        let year = 3.1536e7;
        let half_life = 2.11e5 * year;
        let chain = [decay_constant(half_life), 0.0];
        for years in [1.0e3, 1.0e5, 1.0e6] {
            let t = years * year;
            let expected = 1.0 - 2f64.powf(-t / half_life);
            let daughter = bateman(&chain, t);
            let parent = bateman(&chain[..1], t);
            assert!(close(daughter, expected, 1e-9), "t={years} y {daughter} vs {expected}");
            assert!(close(parent + daughter, 1.0, 1e-12), "t={years} y");
        }
    }

    #[test]
    fn empty_chain() {
        assert_eq!(bateman(&[], 10.0), 0.0);
    }
}
