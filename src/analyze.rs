//! The analysis pipeline: validation, digit extraction, distribution, and
//! the goodness-of-fit suite, assembled into one report.
//!
//! # Example
//!
//! ```
//! use benford::{BenfordAnalyzer, RawValue};
//!
//! let data: Vec<RawValue> = (1u32..=200).map(|n| f64::from(n * n * n).into()).collect();
//! let report = BenfordAnalyzer::new().analyze(&data)?;
//! println!("MAD {:.4} ({})", report.mad, report.conformity.name());
//! # Ok::<(), benford::Error>(())
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    digits::{DigitCounts, DigitDistribution},
    error::{Error, Result},
    stats::{self, Conformity, TestResults},
    validate::{validate, ValidationReport},
    value::RawValue,
};

/// Condensed view of a [`ValidationReport`], embedded in the analysis
/// report.
#[derive(Debug, Clone, Serialize)]
pub struct DataQualitySummary {
    /// Total input cells.
    pub total_records: usize,
    /// Cells that survived cleaning.
    pub valid_records: usize,
    /// Missing cell count.
    pub missing_count: usize,
    /// Invalid cell count.
    pub invalid_count: usize,
    /// Valid cells as a percentage of the total.
    pub data_completeness: f64,
    /// Whether the readiness thresholds were met.
    pub ready_for_analysis: bool,
}

impl From<&ValidationReport> for DataQualitySummary {
    fn from(report: &ValidationReport) -> Self {
        Self {
            total_records: report.total_records,
            valid_records: report.valid_records,
            missing_count: report.missing.count,
            invalid_count: report.invalid.count,
            data_completeness: report.data_completeness,
            ready_for_analysis: report.ready_for_analysis,
        }
    }
}

/// Complete Benford conformance report for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Observed leading-digit percentages, keyed by digit 1..=9.
    pub actual_percentages: BTreeMap<u8, f64>,
    /// Theoretical Benford percentages, keyed by digit 1..=9.
    pub expected_percentages: BTreeMap<u8, f64>,
    /// Observed leading-digit counts, keyed by digit 1..=9.
    pub digit_counts: BTreeMap<u8, usize>,
    /// Pearson chi-square statistic (8 degrees of freedom).
    pub chi2_stat: f64,
    /// Chi-square right-tail p-value; below ~0.05 suggests the data does
    /// not follow Benford's Law.
    pub p_value: f64,
    /// Discrete 9-point Kolmogorov-Smirnov statistic.
    pub ks_statistic: f64,
    /// Approximate KS p-value.
    pub ks_p_value: f64,
    /// Mean Absolute Deviation of proportions.
    pub mad: f64,
    /// MAD-based conformity classification.
    pub conformity: Conformity,
    /// Number of records behind the statistics.
    pub records_analyzed: usize,
    /// Validation summary; absent when validation was skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_quality: Option<DataQualitySummary>,
    /// Validation issues; empty when validation was skipped.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<String>,
}

impl AnalysisReport {
    /// Check conformance at significance level `alpha` using the
    /// chi-square p-value.
    pub fn conforms(&self, alpha: f64) -> bool {
        self.p_value >= alpha
    }
}

/// Benford's Law conformance analyzer.
///
/// Stateless between invocations; safe to reuse and to share across
/// threads.
#[derive(Debug, Clone)]
pub struct BenfordAnalyzer {
    /// Decimal places for percentage output (the historical callers used
    /// 2 or 3).
    percentage_decimals: u8,
    /// Skip validation; the caller asserts the data is already cleaned.
    skip_validation: bool,
}

impl Default for BenfordAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl BenfordAnalyzer {
    /// Create an analyzer with default options: validation on, percentages
    /// rounded to 2 decimals.
    pub fn new() -> Self {
        Self {
            percentage_decimals: 2,
            skip_validation: false,
        }
    }

    /// Set the number of decimal places for percentage output.
    #[must_use]
    pub fn with_percentage_decimals(mut self, decimals: u8) -> Self {
        self.percentage_decimals = decimals;
        self
    }

    /// Skip the validation pass. On this path every cell must already be a
    /// non-zero numeric value; anything else is a [`Error::MalformedInput`].
    #[must_use]
    pub fn with_skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    /// Get the configured percentage decimal places.
    pub fn percentage_decimals(&self) -> u8 {
        self.percentage_decimals
    }

    /// Check whether validation is skipped.
    pub fn skip_validation(&self) -> bool {
        self.skip_validation
    }

    /// Run the full pipeline over a sequence of raw cells.
    ///
    /// # Errors
    ///
    /// - [`Error::InsufficientData`] when the dataset fails the readiness
    ///   thresholds (carries the full validation report); an expected
    ///   business outcome, not a crash.
    /// - [`Error::MalformedInput`] on the validation-skipping path when a
    ///   cell is missing, non-numeric, or zero.
    /// - [`Error::DegenerateDistribution`] when no leading digit could be
    ///   observed despite the data being judged ready.
    pub fn analyze(&self, data: &[RawValue]) -> Result<AnalysisReport> {
        let (cleaned, quality) = if self.skip_validation {
            (coerce_cleaned(data)?, None)
        } else {
            let report = validate(data);
            if !report.ready_for_analysis {
                return Err(Error::insufficient_data(report));
            }
            let cleaned = report.cleaned_data.clone();
            (cleaned, Some(report))
        };

        let counts = DigitCounts::from_values(&cleaned);
        let dist = DigitDistribution::from_counts(&counts)?;
        let tests = TestResults::compute(&counts, &dist)?;

        Ok(AnalysisReport {
            actual_percentages: dist.percentages(self.percentage_decimals),
            expected_percentages: stats::expected_percentages(self.percentage_decimals),
            digit_counts: counts.to_map(),
            chi2_stat: tests.chi2_stat,
            p_value: tests.p_value,
            ks_statistic: tests.ks_statistic,
            ks_p_value: tests.ks_p_value,
            mad: tests.mad,
            conformity: tests.conformity,
            records_analyzed: dist.total(),
            data_quality: quality.as_ref().map(DataQualitySummary::from),
            issues: quality.map(|r| r.issues).unwrap_or_default(),
        })
    }

    /// Run the pipeline over a decoded JSON payload.
    ///
    /// # Errors
    ///
    /// [`Error::NotASequence`] when the payload is not a JSON array, plus
    /// everything [`Self::analyze`] can return.
    pub fn analyze_json(&self, payload: &serde_json::Value) -> Result<AnalysisReport> {
        let cells = payload.as_array().ok_or(Error::NotASequence)?;
        let data: Vec<RawValue> = cells.iter().cloned().map(RawValue::from).collect();
        self.analyze(&data)
    }
}

/// Analyze with default options.
///
/// # Errors
///
/// See [`BenfordAnalyzer::analyze`].
pub fn analyze(data: &[RawValue]) -> Result<AnalysisReport> {
    BenfordAnalyzer::new().analyze(data)
}

/// Strict coercion for the validation-skipping path: every cell must carry
/// a non-zero finite number; negatives still collapse to their magnitude.
fn coerce_cleaned(data: &[RawValue]) -> Result<Vec<f64>> {
    let mut cleaned = Vec::with_capacity(data.len());
    for (index, cell) in data.iter().enumerate() {
        if cell.is_missing() {
            return Err(Error::malformed_input(index, cell.to_string(), "missing value"));
        }
        let n = cell
            .coerce()
            .ok_or_else(|| Error::malformed_input(index, cell.to_string(), "non-numeric value"))?;
        if n == 0.0 {
            return Err(Error::malformed_input(index, cell.to_string(), "zero value"));
        }
        cleaned.push(n.abs());
    }
    Ok(cleaned)
}
