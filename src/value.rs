//! Raw input cells and missing-value classification.
//!
//! Input datasets arrive as dynamically typed cells: numbers, numeric-looking
//! strings, explicit missing-value tokens, or arbitrary junk. [`RawValue`]
//! models that as a tagged union so every later stage works with explicit
//! coercion rules instead of runtime type inspection.

use serde::{Deserialize, Serialize};

/// Canonical tokens that mark a text cell as missing.
///
/// Matching is case-insensitive and ignores surrounding whitespace. This set
/// is the sole authority for the "missing" classification of text cells.
pub const MISSING_TOKENS: &[&str] = &[
    "",
    "NULL",
    "NONE",
    "NA",
    "N/A",
    "NAN",
    "#N/A",
    "#NA",
    "MISSING",
    "-",
    "--",
    "?",
    "...",
    "UNKNOWN",
    "N.A.",
    "NOT AVAILABLE",
    "NOT APPLICABLE",
    "NIL",
    "#DIV/0!",
    "#VALUE!",
];

/// Check whether a text cell matches one of the [`MISSING_TOKENS`].
pub fn is_missing_token(text: &str) -> bool {
    let normalized = text.trim().to_uppercase();
    MISSING_TOKENS.contains(&normalized.as_str())
}

/// One raw input cell, before any validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    /// A numeric cell. NaN-valued numbers are classified as missing.
    Number(f64),
    /// A text cell; may be numeric-looking, a missing token, or junk.
    Text(String),
    /// An explicit null cell.
    Null,
}

impl RawValue {
    /// Check whether this cell is missing: explicit null, NaN-valued number,
    /// or text matching a missing token.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Number(n) => n.is_nan(),
            Self::Text(s) => is_missing_token(s),
        }
    }

    /// Attempt numeric coercion.
    ///
    /// Returns `None` for cells that cannot be read as a finite real number.
    /// Text is trimmed before parsing; non-finite parse results (`"inf"`
    /// parses under `f64::from_str`) are rejected.
    pub fn coerce(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            Self::Number(_) | Self::Null => None,
            Self::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
            Self::Null => write!(f, "null"),
        }
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for RawValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<serde_json::Value> for RawValue {
    /// Convert a decoded JSON value into a cell.
    ///
    /// Numbers and strings map directly; null maps to [`RawValue::Null`];
    /// booleans, arrays and objects are demoted to text of their JSON
    /// rendering, which the validator then classifies as non-numeric.
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(f) => Self::Number(f),
                None => Self::Text(n.to_string()),
            },
            serde_json::Value::String(s) => Self::Text(s),
            other => Self::Text(other.to_string()),
        }
    }
}
