//! Leading-digit extraction and observed digit distributions.

// Statistical computation requires casts and float literals
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Extract the leading significant digit (1-9) of a numeric value.
///
/// Sign is ignored. For magnitudes >= 1 the value is divided by 10 until it
/// lands in [1, 10) and truncated. For proper fractions the decimal
/// rendering is scanned for its first non-zero digit (`f64`'s `Display`
/// never uses exponent notation, so the scan is total).
///
/// Returns `None` for zero and non-finite values; the validation stage
/// filters those out before digits are extracted.
pub fn leading_digit(value: f64) -> Option<u8> {
    let magnitude = value.abs();
    if !magnitude.is_finite() || magnitude == 0.0 {
        return None;
    }

    if magnitude >= 1.0 {
        let mut m = magnitude;
        while m >= 10.0 {
            m /= 10.0;
        }
        Some(m.trunc() as u8)
    } else {
        format!("{magnitude}")
            .bytes()
            .find(|b| (b'1'..=b'9').contains(b))
            .map(|b| b - b'0')
    }
}

/// Occurrence counts of leading digits over a dataset.
///
/// The key space is always exactly {1, ..., 9}; unseen digits count zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigitCounts {
    counts: [usize; 9],
}

impl DigitCounts {
    /// Create an empty count set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count leading digits over a cleaned value sequence.
    ///
    /// Values without a computable leading digit (zero, non-finite) are
    /// skipped; validation guarantees none remain on the analysis path.
    pub fn from_values(values: &[f64]) -> Self {
        let mut counts = Self::new();
        for &value in values {
            if let Some(digit) = leading_digit(value) {
                counts.record(digit);
            }
        }
        counts
    }

    /// Record one occurrence of a digit. Digits outside 1..=9 are ignored.
    pub fn record(&mut self, digit: u8) {
        if (1..=9).contains(&digit) {
            self.counts[usize::from(digit) - 1] += 1;
        }
    }

    /// Occurrence count for one digit (1-9).
    ///
    /// # Panics
    ///
    /// Panics if `digit` is outside 1..=9.
    pub fn count(&self, digit: u8) -> usize {
        assert!((1..=9).contains(&digit), "digit must be in 1..=9");
        self.counts[usize::from(digit) - 1]
    }

    /// Total number of counted values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Iterate over (digit, count) pairs in digit order 1..=9.
    pub fn iter(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (i as u8 + 1, c))
    }

    /// Counts as an ordered digit -> count map.
    pub fn to_map(&self) -> BTreeMap<u8, usize> {
        self.iter().collect()
    }
}

/// Observed leading-digit proportions derived from [`DigitCounts`].
#[derive(Debug, Clone, PartialEq)]
pub struct DigitDistribution {
    proportions: [f64; 9],
    total: usize,
}

impl DigitDistribution {
    /// Derive proportions from counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateDistribution`] when the total count is
    /// zero; the division is guarded rather than surfaced as NaN.
    pub fn from_counts(counts: &DigitCounts) -> Result<Self> {
        let total = counts.total();
        if total == 0 {
            return Err(Error::DegenerateDistribution);
        }

        let mut proportions = [0.0; 9];
        for (digit, count) in counts.iter() {
            proportions[usize::from(digit) - 1] = count as f64 / total as f64;
        }

        Ok(Self { proportions, total })
    }

    /// Observed proportion for one digit (1-9), in [0, 1].
    ///
    /// # Panics
    ///
    /// Panics if `digit` is outside 1..=9.
    pub fn proportion(&self, digit: u8) -> f64 {
        assert!((1..=9).contains(&digit), "digit must be in 1..=9");
        self.proportions[usize::from(digit) - 1]
    }

    /// All proportions in digit order 1..=9.
    pub fn proportions(&self) -> &[f64; 9] {
        &self.proportions
    }

    /// Number of values behind this distribution.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Proportions as percentages, rounded to `decimals` decimal places,
    /// keyed by digit in order.
    pub fn percentages(&self, decimals: u8) -> BTreeMap<u8, f64> {
        self.proportions
            .iter()
            .enumerate()
            .map(|(i, &p)| (i as u8 + 1, round_to(p * 100.0, decimals)))
            .collect()
    }
}

/// Round to a fixed number of decimal places.
pub(crate) fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10f64.powi(i32::from(decimals));
    (value * factor).round() / factor
}
