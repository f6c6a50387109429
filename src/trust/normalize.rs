//! Value normalization and column-kind inference.
//!
//! Raw cell text is coerced into numbers by stateless pure functions: no
//! regex tables, no shared state. A cell that fails coercion and is not a
//! recognized missing marker is counted as missing, never raised as an
//! error.

use std::collections::HashSet;
use std::fmt;

/// Fraction of non-missing values that must coerce to numbers for a
/// column to count as numeric.
pub(crate) const NUMERIC_PARSE_THRESHOLD: f64 = 0.9;

/// Fraction of rows that must be non-missing for the identifier
/// heuristic to apply.
const ID_COVERAGE_RATIO: f64 = 0.9;

/// Inferred kind of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    /// Values are (mostly) numeric after symbol stripping.
    Numeric,
    /// Unique row-identifying tokens, excluded from trust scoring.
    Identifier,
    /// Free-form or label data; only the missing rate is scored.
    Categorical,
}

impl ColumnKind {
    /// Human-readable kind name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Numeric => "Numeric",
            Self::Identifier => "Identifier",
            Self::Categorical => "Categorical",
        }
    }
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A column after normalization: inferred kind plus the coerced values
/// with missing entries marked in place, preserving row positions.
#[derive(Debug, Clone)]
pub struct NormalizedColumn {
    /// Inferred column kind.
    pub kind: ColumnKind,
    /// Total row count of the column.
    pub total_count: usize,
    /// Cells that are null or a recognized missing marker.
    pub missing_count: usize,
    /// Coerced values, one slot per row; `None` marks missing or
    /// unparseable cells.
    pub values: Vec<Option<f64>>,
}

/// Returns true if the cell text is a recognized missing marker.
#[must_use]
pub fn is_missing_marker(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || matches!(
            trimmed.to_ascii_lowercase().as_str(),
            "na" | "n/a" | "null" | "none" | "nan" | "-"
        )
}

/// Attempts to coerce raw cell text into a number.
///
/// Strips currency symbols, thousands separators, and percent signs
/// before parsing. A percent string keeps its face value ("75%" → 75.0).
/// Returns `None` for anything that does not parse to a finite number.
#[must_use]
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '%'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Normalizes one column: infers its kind and coerces its values.
///
/// The input is never modified; the returned values are a derived copy
/// with one slot per input row.
#[must_use]
pub fn normalize_column(raw: &[Option<String>]) -> NormalizedColumn {
    let total_count = raw.len();

    let mut missing_count = 0;
    let mut present: Vec<&str> = Vec::new();
    for cell in raw {
        match cell.as_deref() {
            None => missing_count += 1,
            Some(s) if is_missing_marker(s) => missing_count += 1,
            Some(s) => present.push(s),
        }
    }

    let values: Vec<Option<f64>> = raw
        .iter()
        .map(|cell| {
            cell.as_deref()
                .filter(|s| !is_missing_marker(s))
                .and_then(parse_numeric)
        })
        .collect();

    let kind = if is_identifier(&present, total_count) {
        ColumnKind::Identifier
    } else if numeric_fraction(&present) >= NUMERIC_PARSE_THRESHOLD {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    };

    NormalizedColumn {
        kind,
        total_count,
        missing_count,
        values,
    }
}

/// Fraction of present values that coerce to numbers.
///
/// An all-missing column counts as fully numeric so it flows through the
/// numeric path and gets flagged on its missing rate.
fn numeric_fraction(present: &[&str]) -> f64 {
    if present.is_empty() {
        return 1.0;
    }
    let parsed = present.iter().filter(|s| parse_numeric(s).is_some()).count();
    parsed as f64 / present.len() as f64
}

/// Identifier heuristic: all non-missing values unique, covering at least
/// 90% of rows, and shaped like ID tokens.
///
/// Two token shapes are recognized: integers with one constant positive
/// step between sorted neighbors (sequential row ids), and a shared
/// alphabetic prefix with a digit suffix (`ID001`, `ID002`, ...).
fn is_identifier(present: &[&str], total_count: usize) -> bool {
    if present.len() < 2 {
        return false;
    }
    if (present.len() as f64) < total_count as f64 * ID_COVERAGE_RATIO {
        return false;
    }

    let unique: HashSet<&str> = present.iter().map(|s| s.trim()).collect();
    if unique.len() != present.len() {
        return false;
    }

    is_stepped_integers(present) || is_prefixed_tokens(present)
}

/// True when every value is an integer and the sorted gaps are one
/// constant positive step.
fn is_stepped_integers(present: &[&str]) -> bool {
    let mut ints: Vec<i64> = Vec::with_capacity(present.len());
    for s in present {
        match s.trim().parse::<i64>() {
            Ok(v) => ints.push(v),
            Err(_) => return false,
        }
    }

    ints.sort_unstable();
    let step = ints[1] - ints[0];
    if step <= 0 {
        return false;
    }
    ints.windows(2).all(|w| w[1] - w[0] == step)
}

/// True when every value is one shared alphabetic prefix followed by a
/// digit suffix.
fn is_prefixed_tokens(present: &[&str]) -> bool {
    let mut shared_prefix: Option<&str> = None;

    for s in present {
        let s = s.trim();
        let split = s.find(|c: char| c.is_ascii_digit());
        let Some(at) = split else { return false };
        let (prefix, digits) = s.split_at(at);

        if prefix.is_empty()
            || !prefix.chars().all(|c| c.is_ascii_alphabetic())
            || digits.is_empty()
            || !digits.chars().all(|c| c.is_ascii_digit())
        {
            return false;
        }

        match shared_prefix {
            None => shared_prefix = Some(prefix),
            Some(p) if p != prefix => return false,
            Some(_) => {}
        }
    }

    true
}
