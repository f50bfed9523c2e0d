//! Data validation and quality reporting.
//!
//! Classifies every raw cell as missing, invalid, or valid; produces the
//! cleaned numeric sequence plus a [`ValidationReport`] with per-row issues
//! and the readiness decision for Benford analysis.

use std::collections::HashSet;

use serde::Serialize;

use crate::value::RawValue;

/// Minimum number of valid records required before statistics run.
pub const MIN_VALID_RECORDS: usize = 10;

/// Minimum data completeness (valid / total, in percent) required before
/// statistics run.
pub const MIN_COMPLETENESS_PCT: f64 = 50.0;

/// Missing-value block of a [`ValidationReport`].
#[derive(Debug, Clone, Serialize)]
pub struct MissingValues {
    /// Number of missing cells.
    pub count: usize,
    /// Missing cells as a percentage of the total, rounded to 2 decimals.
    pub percentage: f64,
    /// Zero-based indices of the missing cells.
    pub indices: Vec<usize>,
}

/// Invalid-value block of a [`ValidationReport`].
#[derive(Debug, Clone, Serialize)]
pub struct InvalidValues {
    /// Number of invalid cells (non-numeric or zero).
    pub count: usize,
    /// Invalid cells as a percentage of the total, rounded to 2 decimals.
    pub percentage: f64,
    /// Zero-based indices of the invalid cells.
    pub indices: Vec<usize>,
    /// Renderings of the original invalid cells, for diagnostics.
    pub values: Vec<String>,
}

/// Data-quality report for one input dataset.
///
/// Built once per validation pass and never mutated afterwards; downstream
/// stages read it and consume `cleaned_data`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Total input cells.
    pub total_records: usize,
    /// Cells that survived cleaning.
    pub valid_records: usize,
    /// Valid cells as a percentage of the total, rounded to 2 decimals.
    pub data_completeness: f64,
    /// Whether the dataset meets both readiness thresholds.
    pub ready_for_analysis: bool,
    /// Missing-value details.
    pub missing: MissingValues,
    /// Invalid-value details.
    pub invalid: InvalidValues,
    /// Deduplicated human-readable issues, in first-occurrence order.
    pub issues: Vec<String>,
    /// Cleaned numeric sequence: non-zero, negatives replaced by their
    /// absolute value, input order preserved.
    pub cleaned_data: Vec<f64>,
}

impl ValidationReport {
    /// Check if any issues were recorded.
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Report for input that was not a sequence of values: zero counts and
    /// a single type-mismatch issue. Never ready.
    fn not_a_sequence() -> Self {
        Self {
            total_records: 0,
            valid_records: 0,
            data_completeness: 0.0,
            ready_for_analysis: false,
            missing: MissingValues {
                count: 0,
                percentage: 0.0,
                indices: Vec::new(),
            },
            invalid: InvalidValues {
                count: 0,
                percentage: 0.0,
                indices: Vec::new(),
                values: Vec::new(),
            },
            issues: vec!["Input is not a sequence of values".to_string()],
            cleaned_data: Vec::new(),
        }
    }
}

/// Validate a sequence of raw cells and produce a quality report.
///
/// Classification per cell, in order:
/// 1. missing: explicit null, NaN-valued number, or a missing token
/// 2. invalid: cannot be coerced to a finite number, or equals zero
///    (Benford's Law is undefined at zero)
/// 3. valid: kept in `cleaned_data`; negative values are kept as their
///    absolute value with an informational issue
///
/// Pure function of its input; never fails.
pub fn validate(data: &[RawValue]) -> ValidationReport {
    let total = data.len();

    let mut missing_indices = Vec::new();
    let mut invalid_indices = Vec::new();
    let mut invalid_values = Vec::new();
    let mut cleaned = Vec::new();
    let mut issues = Vec::new();

    for (idx, cell) in data.iter().enumerate() {
        if cell.is_missing() {
            missing_indices.push(idx);
            issues.push(format!(
                "Row {idx}: Missing value detected (value: '{cell}')"
            ));
            continue;
        }

        match cell.coerce() {
            None => {
                invalid_indices.push(idx);
                invalid_values.push(cell.to_string());
                issues.push(format!("Row {idx}: Non-numeric value '{cell}'"));
            }
            Some(n) if n == 0.0 => {
                invalid_indices.push(idx);
                invalid_values.push(cell.to_string());
                issues.push(format!(
                    "Row {idx}: Zero value not suitable for Benford's Law"
                ));
            }
            Some(n) if n < 0.0 => {
                issues.push(format!("Row {idx}: Negative value - will use absolute value"));
                cleaned.push(n.abs());
            }
            Some(n) => cleaned.push(n),
        }
    }

    let valid = cleaned.len();
    let completeness = percentage_of(valid, total);
    let ready = valid >= MIN_VALID_RECORDS && completeness >= MIN_COMPLETENESS_PCT;

    if total == 0 {
        issues.push("No records provided".to_string());
    }
    if valid < MIN_VALID_RECORDS {
        issues.push(format!(
            "Insufficient valid records: {valid} (minimum {MIN_VALID_RECORDS} required)"
        ));
    }
    if completeness < MIN_COMPLETENESS_PCT {
        issues.push(format!(
            "Data completeness {completeness:.2}% below minimum {MIN_COMPLETENESS_PCT}%"
        ));
    }

    ValidationReport {
        total_records: total,
        valid_records: valid,
        data_completeness: completeness,
        ready_for_analysis: ready,
        missing: MissingValues {
            count: missing_indices.len(),
            percentage: percentage_of(missing_indices.len(), total),
            indices: missing_indices,
        },
        invalid: InvalidValues {
            count: invalid_indices.len(),
            percentage: percentage_of(invalid_indices.len(), total),
            indices: invalid_indices,
            values: invalid_values,
        },
        issues: dedup_preserving_order(issues),
        cleaned_data: cleaned,
    }
}

/// Validate a decoded JSON payload.
///
/// A non-array payload yields the degenerate never-erroring report from
/// the validation contract rather than an error.
pub fn validate_json(payload: &serde_json::Value) -> ValidationReport {
    match payload.as_array() {
        Some(cells) => {
            let data: Vec<RawValue> = cells.iter().cloned().map(RawValue::from).collect();
            validate(&data)
        }
        None => ValidationReport::not_a_sequence(),
    }
}

fn percentage_of(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let pct = part as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

fn dedup_preserving_order(issues: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter(|issue| seen.insert(issue.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(raw: &[RawValue]) -> Vec<RawValue> {
        raw.to_vec()
    }

    #[test]
    fn test_mixed_classification_fixture() {
        let data = cells(&[
            "12".into(),
            "".into(),
            "NA".into(),
            "-7".into(),
            "abc".into(),
            RawValue::Number(0.0),
            "45".into(),
        ]);
        let report = validate(&data);

        assert_eq!(report.total_records, 7);
        assert_eq!(report.missing.count, 2);
        assert_eq!(report.missing.indices, vec![1, 2]);
        assert_eq!(report.invalid.count, 2);
        assert_eq!(report.invalid.indices, vec![4, 5]);
        assert_eq!(report.invalid.values, vec!["abc", "0"]);
        assert_eq!(report.cleaned_data, vec![12.0, 7.0, 45.0]);
        assert_eq!(report.valid_records, 3);
        assert!(!report.ready_for_analysis);
    }

    #[test]
    fn test_issue_messages() {
        let data = cells(&["NA".into(), "abc".into(), 0.0.into(), (-5.0).into()]);
        let report = validate(&data);

        assert!(report
            .issues
            .contains(&"Row 0: Missing value detected (value: 'NA')".to_string()));
        assert!(report
            .issues
            .contains(&"Row 1: Non-numeric value 'abc'".to_string()));
        assert!(report
            .issues
            .contains(&"Row 2: Zero value not suitable for Benford's Law".to_string()));
        assert!(report
            .issues
            .contains(&"Row 3: Negative value - will use absolute value".to_string()));
    }

    #[test]
    fn test_ready_thresholds() {
        // 10 valid records at 100% completeness: ready
        let data: Vec<RawValue> = (1..=10).map(|n| RawValue::Number(n as f64)).collect();
        assert!(validate(&data).ready_for_analysis);

        // 9 valid records: below the count threshold
        let data: Vec<RawValue> = (1..=9).map(|n| RawValue::Number(n as f64)).collect();
        assert!(!validate(&data).ready_for_analysis);
    }

    #[test]
    fn test_completeness_threshold() {
        // 10 valid out of 25 records: 40% completeness, below threshold
        let mut data: Vec<RawValue> = (1..=10).map(|n| RawValue::Number(n as f64)).collect();
        data.extend(std::iter::repeat(RawValue::Null).take(15));

        let report = validate(&data);
        assert_eq!(report.valid_records, 10);
        assert!((report.data_completeness - 40.0).abs() < 1e-9);
        assert!(!report.ready_for_analysis);
        assert!(report
            .issues
            .iter()
            .any(|i| i.contains("Data completeness")));
    }

    #[test]
    fn test_empty_input() {
        let report = validate(&[]);
        assert_eq!(report.total_records, 0);
        assert_eq!(report.data_completeness, 0.0);
        assert!(!report.ready_for_analysis);
        assert!(report.issues.contains(&"No records provided".to_string()));
    }

    #[test]
    fn test_negative_values_kept_as_absolute() {
        let data = cells(&[(-3.5).into(), "-200".into()]);
        let report = validate(&data);
        assert_eq!(report.cleaned_data, vec![3.5, 200.0]);
        assert_eq!(report.invalid.count, 0);
    }

    #[test]
    fn test_issue_dedup_preserves_first_occurrence() {
        let issues = vec![
            "b".to_string(),
            "a".to_string(),
            "b".to_string(),
            "c".to_string(),
            "a".to_string(),
        ];
        assert_eq!(dedup_preserving_order(issues), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_dash_token_is_missing_but_negative_number_is_not() {
        let data = cells(&["-".into(), "-7".into()]);
        let report = validate(&data);
        assert_eq!(report.missing.count, 1);
        assert_eq!(report.missing.indices, vec![0]);
        assert_eq!(report.cleaned_data, vec![7.0]);
    }

    #[test]
    fn test_validate_json_array() {
        let payload = serde_json::json!([12, "NA", "45", null]);
        let report = validate_json(&payload);
        assert_eq!(report.total_records, 4);
        assert_eq!(report.missing.count, 2);
        assert_eq!(report.cleaned_data, vec![12.0, 45.0]);
    }

    #[test]
    fn test_validate_json_not_a_sequence() {
        let payload = serde_json::json!({"values": [1, 2, 3]});
        let report = validate_json(&payload);
        assert_eq!(report.total_records, 0);
        assert!(!report.ready_for_analysis);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("not a sequence"));
    }

    #[test]
    fn test_report_serializes() {
        let data = cells(&["12".into(), "NA".into()]);
        let report = validate(&data);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_records"], 2);
        assert_eq!(json["missing"]["count"], 1);
    }
}
