//! Line Classifier
//!
//! Decides whether a trimmed line is an integer, a float or plain text.
//! Integer parsing is tried first, then float parsing; anything else is text.

use crate::aggregate::Category;

/// A single classified input line
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ClassifiedValue {
    /// Category this value belongs to
    pub fn category(&self) -> Category {
        match self {
            Self::Integer(_) => Category::Integer,
            Self::Float(_) => Category::Float,
            Self::Text(_) => Category::Text,
        }
    }
}

/// Classify a non-blank, already trimmed line
pub fn classify(line: &str) -> ClassifiedValue {
    try_parse_integer(line)
        .map(ClassifiedValue::Integer)
        .or_else(|| try_parse_float(line).map(ClassifiedValue::Float))
        .unwrap_or_else(|| ClassifiedValue::Text(line.to_string()))
}

/// Base-10 signed 64-bit integer, optional leading sign, whole input only
pub fn try_parse_integer(text: &str) -> Option<i64> {
    text.parse::<i64>().ok()
}

/// 64-bit float in decimal or exponent notation, whole input only.
///
/// Non-finite results are rejected: `1e400`, `inf` and `nan` are text.
pub fn try_parse_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}
