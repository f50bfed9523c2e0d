//! benford - Benford's Law Conformance Analysis in Pure Rust
//!
//! Analyzes a raw, possibly dirty numeric dataset for conformance to
//! Benford's Law: validates and cleans the input, extracts leading
//! significant digits, computes the observed digit distribution, and runs
//! three goodness-of-fit tests (chi-square, Kolmogorov-Smirnov, Mean
//! Absolute Deviation) against the theoretical distribution.
//!
//! # Design Principles
//!
//! 1. **Pure core** - every stage is a deterministic function of immutable
//!    inputs; safe to call concurrently without synchronization
//! 2. **Issues, not exceptions** - per-record problems accumulate in the
//!    quality report; only structural problems short-circuit a call
//! 3. **Loud failure** - degenerate distributions are errors, never NaN
//!
//! # Quick Start
//!
//! ```
//! use benford::{BenfordAnalyzer, RawValue};
//!
//! let data: Vec<RawValue> = vec![
//!     "1200".into(), "378".into(), "NA".into(), "-95".into(), "abc".into(),
//!     "1043".into(), "211".into(), "17".into(), "389".into(), "1530".into(),
//!     "42".into(), "108".into(),
//! ];
//!
//! match BenfordAnalyzer::new().analyze(&data) {
//!     Ok(report) => println!("MAD {:.4}, p {:.4}", report.mad, report.p_value),
//!     Err(benford::Error::InsufficientData { report }) => {
//!         eprintln!("not enough clean data: {} issues", report.issues.len());
//!     }
//!     Err(e) => eprintln!("analysis failed: {e}"),
//! }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::cast_lossless,
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::float_cmp,
        clippy::similar_names,
        clippy::unreadable_literal
    )
)]
// Allow some pedantic lints for cleaner code
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]

pub mod analyze;
pub mod digits;
pub mod error;
pub mod stats;
pub mod validate;
pub mod value;

// Re-exports for convenience
pub use analyze::{analyze, AnalysisReport, BenfordAnalyzer, DataQualitySummary};
pub use digits::{leading_digit, DigitCounts, DigitDistribution};
pub use error::{Error, Result};
pub use stats::{
    chi_square_test, expected_percentages, ks_test, mean_absolute_deviation, ChiSquare,
    Conformity, KsTest, TestResults, BENFORD_EXPECTED,
};
pub use validate::{
    validate, validate_json, ValidationReport, MIN_COMPLETENESS_PCT, MIN_VALID_RECORDS,
};
pub use value::{is_missing_token, RawValue, MISSING_TOKENS};
