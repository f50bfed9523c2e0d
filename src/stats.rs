//! Goodness-of-fit tests against the theoretical Benford distribution.
//!
//! Three independent conformance measures over the same fixed digit order
//! 1..=9: Pearson chi-square, a discrete Kolmogorov-Smirnov statistic, and
//! Mean Absolute Deviation (MAD).

// Statistical computation requires casts, similar variable names, and float
// literals
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::suboptimal_flops)]

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    digits::{round_to, DigitCounts, DigitDistribution},
    error::{Error, Result},
};

/// Theoretical Benford leading-digit probabilities for digits 1..=9.
///
/// The single process-wide definition; every component references this
/// table.
pub const BENFORD_EXPECTED: [f64; 9] = [0.301, 0.176, 0.125, 0.097, 0.079, 0.067, 0.058, 0.051, 0.046];

/// Degrees of freedom for the chi-square test: 9 categories - 1.
const CHI2_DEGREES_OF_FREEDOM: usize = 8;

/// Theoretical Benford proportion for one digit (1-9).
///
/// # Panics
///
/// Panics if `digit` is outside 1..=9.
pub fn expected_proportion(digit: u8) -> f64 {
    assert!((1..=9).contains(&digit), "digit must be in 1..=9");
    BENFORD_EXPECTED[usize::from(digit) - 1]
}

/// Theoretical Benford percentages, rounded to `decimals` places, keyed by
/// digit in order.
pub fn expected_percentages(decimals: u8) -> BTreeMap<u8, f64> {
    BENFORD_EXPECTED
        .iter()
        .enumerate()
        .map(|(i, &p)| (i as u8 + 1, round_to(p * 100.0, decimals)))
        .collect()
}

/// Conformity classification derived from the MAD value.
///
/// Conventional interpretation thresholds; informational only, never
/// enforced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Conformity {
    /// MAD < 0.006
    Close,
    /// 0.006 <= MAD < 0.012
    Acceptable,
    /// 0.012 <= MAD < 0.015
    Marginal,
    /// MAD >= 0.015
    Nonconforming,
}

impl Conformity {
    /// Classify a MAD value.
    pub fn from_mad(mad: f64) -> Self {
        if mad < 0.006 {
            Self::Close
        } else if mad < 0.012 {
            Self::Acceptable
        } else if mad < 0.015 {
            Self::Marginal
        } else {
            Self::Nonconforming
        }
    }

    /// Get human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Close => "close conformity",
            Self::Acceptable => "acceptable conformity",
            Self::Marginal => "marginal conformity",
            Self::Nonconforming => "nonconformity",
        }
    }

    /// Check if this classification indicates conformance.
    pub fn is_conformant(&self) -> bool {
        *self != Self::Nonconforming
    }
}

/// Chi-square test result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChiSquare {
    /// Pearson chi-square statistic over 8 degrees of freedom.
    pub statistic: f64,
    /// Right-tail p-value; low values indicate non-conformance.
    pub p_value: f64,
}

/// Pearson chi-square test of observed counts against the Benford
/// distribution.
///
/// Expected counts are `total * BENFORD_EXPECTED[d]` per digit.
///
/// # Errors
///
/// Returns [`Error::DegenerateDistribution`] when the total count is zero.
pub fn chi_square_test(counts: &DigitCounts) -> Result<ChiSquare> {
    let total = counts.total();
    if total == 0 {
        return Err(Error::DegenerateDistribution);
    }

    let mut statistic = 0.0;
    for (digit, observed) in counts.iter() {
        let expected = total as f64 * expected_proportion(digit);
        statistic += (observed as f64 - expected).powi(2) / expected;
    }

    Ok(ChiSquare {
        statistic,
        p_value: chi_square_p_value(statistic, CHI2_DEGREES_OF_FREEDOM),
    })
}

/// Kolmogorov-Smirnov test result.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KsTest {
    /// Maximum absolute difference between the two cumulative sequences.
    pub statistic: f64,
    /// Approximate p-value from the asymptotic Kolmogorov distribution.
    pub p_value: f64,
}

/// Discrete Kolmogorov-Smirnov statistic over the 9-point digit support.
///
/// `D = max_d |cum_observed[d] - cum_expected[d]|` with both cumulative
/// sums taken in digit order 1..=9. This is deliberately NOT a continuous
/// KS test: the construction treats the two 9-point cumulative sequences as
/// two samples and derives an approximate p-value from the asymptotic
/// two-sample formula with n1 = n2 = 9. A known deviation from the textbook
/// goodness-of-fit KS test, preserved for compatibility with the reference
/// behavior.
pub fn ks_test(dist: &DigitDistribution) -> KsTest {
    let mut cum_observed = 0.0;
    let mut cum_expected = 0.0;
    let mut statistic = 0.0_f64;

    for digit in 1..=9u8 {
        cum_observed += dist.proportion(digit);
        cum_expected += expected_proportion(digit);
        statistic = statistic.max((cum_observed - cum_expected).abs());
    }

    // Two samples of 9 points each
    let en = (9.0_f64 * 9.0 / (9.0 + 9.0)).sqrt();

    KsTest {
        statistic,
        p_value: kolmogorov_p_value(statistic * en),
    }
}

/// Mean Absolute Deviation between observed and expected proportions.
///
/// `MAD = (1/9) * sum_d |observed[d] - expected[d]|`, over proportions in
/// [0, 1].
pub fn mean_absolute_deviation(dist: &DigitDistribution) -> f64 {
    let sum: f64 = (1..=9u8)
        .map(|d| (dist.proportion(d) - expected_proportion(d)).abs())
        .sum();
    sum / 9.0
}

/// The full test-suite result bundle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TestResults {
    /// Pearson chi-square statistic.
    pub chi2_stat: f64,
    /// Chi-square right-tail p-value.
    pub p_value: f64,
    /// Discrete KS statistic.
    pub ks_statistic: f64,
    /// Approximate KS p-value.
    pub ks_p_value: f64,
    /// Mean Absolute Deviation of proportions.
    pub mad: f64,
    /// MAD-based conformity classification.
    pub conformity: Conformity,
}

impl TestResults {
    /// Run all three tests over the same counts and distribution.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateDistribution`] when the total count is
    /// zero.
    pub fn compute(counts: &DigitCounts, dist: &DigitDistribution) -> Result<Self> {
        let chi2 = chi_square_test(counts)?;
        let ks = ks_test(dist);
        let mad = mean_absolute_deviation(dist);

        Ok(Self {
            chi2_stat: chi2.statistic,
            p_value: chi2.p_value,
            ks_statistic: ks.statistic,
            ks_p_value: ks.p_value,
            mad,
            conformity: Conformity::from_mad(mad),
        })
    }
}

/// Right-tail chi-square p-value via the Wilson-Hilferty transformation.
fn chi_square_p_value(chi_sq: f64, df: usize) -> f64 {
    if df == 0 {
        return 1.0;
    }

    let k = df as f64;
    let z = ((chi_sq / k).cbrt() - (1.0 - 2.0 / (9.0 * k))) / (2.0 / (9.0 * k)).sqrt();

    (1.0 - standard_normal_cdf(z)).clamp(0.0, 1.0)
}

/// Standard normal CDF approximation.
fn standard_normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Error function approximation (Abramowitz and Stegun).
fn erf(x: f64) -> f64 {
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}

/// Asymptotic Kolmogorov survival function `P(D > z)`.
fn kolmogorov_p_value(z: f64) -> f64 {
    if z <= 0.0 {
        return 1.0;
    }
    if z > 3.0 {
        return 0.0;
    }

    // P(D > z) ~ 2 * sum_{k=1}^inf (-1)^(k-1) * exp(-2*k^2*z^2)
    let mut p = 0.0;
    let z_sq = z * z;

    for k in 1..=100i32 {
        let k_f = f64::from(k);
        let term = (-1.0_f64).powi(k - 1) * (-2.0 * k_f * k_f * z_sq).exp();
        p += term;
        if term.abs() < 1e-12 {
            break;
        }
    }

    (2.0 * p).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts drawn exactly from the Benford table, scaled to 1000 records.
    fn benford_counts() -> DigitCounts {
        let mut counts = DigitCounts::new();
        for (i, &p) in BENFORD_EXPECTED.iter().enumerate() {
            let n = (p * 1000.0).round() as usize;
            for _ in 0..n {
                counts.record(i as u8 + 1);
            }
        }
        counts
    }

    /// Near-uniform counts: every digit observed equally often.
    fn uniform_counts() -> DigitCounts {
        let mut counts = DigitCounts::new();
        for digit in 1..=9u8 {
            for _ in 0..111 {
                counts.record(digit);
            }
        }
        counts
    }

    #[test]
    fn test_expected_table_sums_to_one() {
        let sum: f64 = BENFORD_EXPECTED.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_expected_percentages() {
        let pct = expected_percentages(2);
        assert_eq!(pct[&1], 30.1);
        assert_eq!(pct[&9], 4.6);
        let sum: f64 = pct.values().sum();
        assert!((sum - 100.0).abs() < 0.05);
    }

    #[test]
    fn test_chi_square_on_benford_data() {
        let counts = benford_counts();
        let result = chi_square_test(&counts).unwrap();
        assert!(result.statistic < 1.0, "statistic {}", result.statistic);
        assert!(result.p_value > 0.05, "p-value {}", result.p_value);
    }

    #[test]
    fn test_chi_square_on_uniform_data() {
        let counts = uniform_counts();
        let result = chi_square_test(&counts).unwrap();
        assert!(result.statistic > 100.0, "statistic {}", result.statistic);
        assert!(result.p_value < 0.001, "p-value {}", result.p_value);
    }

    #[test]
    fn test_chi_square_empty_counts_is_an_error() {
        let counts = DigitCounts::new();
        assert!(matches!(
            chi_square_test(&counts),
            Err(Error::DegenerateDistribution)
        ));
    }

    #[test]
    fn test_ks_on_benford_data() {
        let counts = benford_counts();
        let dist = DigitDistribution::from_counts(&counts).unwrap();
        let result = ks_test(&dist);
        assert!(result.statistic < 0.01, "statistic {}", result.statistic);
        assert!(result.p_value > 0.9, "p-value {}", result.p_value);
    }

    #[test]
    fn test_ks_on_uniform_data() {
        let counts = uniform_counts();
        let dist = DigitDistribution::from_counts(&counts).unwrap();
        let result = ks_test(&dist);
        // Max cumulative gap sits around digit 3: ~0.602 - ~0.333
        assert!(result.statistic > 0.2, "statistic {}", result.statistic);
        assert!(result.statistic < 0.35, "statistic {}", result.statistic);
    }

    #[test]
    fn test_ks_p_value_nine_point_scaling() {
        // Everything in digit 1: cumulative observed is 1.0 at every
        // digit, so D = 1 - 0.301 = 0.699 exactly. With two 9-point
        // samples, z = 0.699 * sqrt(81/18) ~ 1.483 and the asymptotic
        // series gives p ~ 0.0246.
        let mut counts = DigitCounts::new();
        for _ in 0..100 {
            counts.record(1);
        }
        let dist = DigitDistribution::from_counts(&counts).unwrap();
        let result = ks_test(&dist);

        assert!((result.statistic - 0.699).abs() < 1e-9);
        assert!(
            (0.02..0.03).contains(&result.p_value),
            "p-value {}",
            result.p_value
        );
    }

    #[test]
    fn test_statistics_are_non_negative_and_p_values_bounded() {
        for counts in [benford_counts(), uniform_counts()] {
            let dist = DigitDistribution::from_counts(&counts).unwrap();
            let results = TestResults::compute(&counts, &dist).unwrap();

            assert!(results.chi2_stat >= 0.0);
            assert!(results.ks_statistic >= 0.0);
            assert!(results.mad >= 0.0);
            assert!((0.0..=1.0).contains(&results.p_value));
            assert!((0.0..=1.0).contains(&results.ks_p_value));
        }
    }

    #[test]
    fn test_mad_on_benford_data() {
        let counts = benford_counts();
        let dist = DigitDistribution::from_counts(&counts).unwrap();
        let mad = mean_absolute_deviation(&dist);
        assert!(mad < 0.006, "mad {mad}");
    }

    #[test]
    fn test_mad_on_uniform_data() {
        let counts = uniform_counts();
        let dist = DigitDistribution::from_counts(&counts).unwrap();
        let mad = mean_absolute_deviation(&dist);
        assert!(mad > 0.015, "mad {mad}");
    }

    #[test]
    fn test_conformity_thresholds() {
        assert_eq!(Conformity::from_mad(0.004), Conformity::Close);
        assert_eq!(Conformity::from_mad(0.008), Conformity::Acceptable);
        assert_eq!(Conformity::from_mad(0.013), Conformity::Marginal);
        assert_eq!(Conformity::from_mad(0.02), Conformity::Nonconforming);
    }

    #[test]
    fn test_conformity_helpers() {
        assert!(Conformity::Close.is_conformant());
        assert!(Conformity::Marginal.is_conformant());
        assert!(!Conformity::Nonconforming.is_conformant());
        assert_eq!(Conformity::Close.name(), "close conformity");
        assert!(Conformity::Close < Conformity::Nonconforming);
    }

    #[test]
    fn test_kolmogorov_p_value_edges() {
        assert_eq!(kolmogorov_p_value(0.0), 1.0);
        assert_eq!(kolmogorov_p_value(5.0), 0.0);
        let mid = kolmogorov_p_value(1.0);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn test_erf_symmetry() {
        // The Abramowitz-Stegun coefficients sum to 0.999999999, so the
        // approximation carries ~1e-9 error even at zero
        assert!((erf(0.0)).abs() < 1e-8);
        assert!((erf(1.0) + erf(-1.0)).abs() < 1e-6);
        assert!(erf(2.0) > 0.99);
    }
}
