//! Operator-prefixed numeric filters such as `">=30"` or `"< 15.5"`.

use crate::error::FilterError;
use crate::numeric::parse_number;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison applied between a stored value and a filter operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CompareOp {
    #[default]
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

/// Recognized prefixes, two-character operators first so `">=5"` is never read
/// as `>` followed by `"=5"`.
const PREFIXES: &[(&str, CompareOp)] = &[
    (">=", CompareOp::Ge),
    ("<=", CompareOp::Le),
    (">", CompareOp::Gt),
    ("<", CompareOp::Lt),
    ("==", CompareOp::Eq),
    ("=", CompareOp::Eq),
];

impl CompareOp {
    /// SQL comparison token. Only these fixed strings ever reach a query.
    pub fn as_sql(self) -> &'static str {
        match self {
            CompareOp::Eq => "=",
            CompareOp::Gt => ">",
            CompareOp::Ge => ">=",
            CompareOp::Lt => "<",
            CompareOp::Le => "<=",
        }
    }

    /// Evaluate the comparison in memory. A missing left-hand value never matches,
    /// the same way SQL `NULL` comparisons behave.
    pub fn matches(self, value: Option<f64>, operand: f64) -> bool {
        let Some(value) = value else {
            return false;
        };
        match self {
            CompareOp::Eq => value == operand,
            CompareOp::Gt => value > operand,
            CompareOp::Ge => value >= operand,
            CompareOp::Lt => value < operand,
            CompareOp::Le => value <= operand,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Result of parsing a raw filter string.
///
/// `operand` is `None` either when there was nothing to parse or when the text
/// after the operator was not a number. Callers decide which of the two they are
/// looking at; see [`ParsedFilter::require`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ParsedFilter {
    pub op: CompareOp,
    pub operand: Option<f64>,
}

impl ParsedFilter {
    /// Turn an absent operand into an error naming the offending parameter.
    pub fn require(self, param: &'static str) -> Result<NumericFilter, FilterError> {
        match self.operand {
            Some(operand) => Ok(NumericFilter {
                op: self.op,
                operand,
            }),
            None => Err(FilterError::Invalid { param }),
        }
    }
}

/// A fully-specified numeric filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericFilter {
    pub op: CompareOp,
    pub operand: f64,
}

impl NumericFilter {
    pub fn matches(&self, value: Option<f64>) -> bool {
        self.op.matches(value, self.operand)
    }
}

/// Parse a filter string into an operator and numeric operand.
///
/// Never fails: absent or empty input yields `=` with no operand, and an
/// unparsable number yields the recognized operator with no operand.
pub fn parse_filter(raw: Option<&str>) -> ParsedFilter {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return ParsedFilter::default();
    };
    let s = raw.trim();

    for (prefix, op) in PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            return ParsedFilter {
                op: *op,
                operand: parse_operand(rest),
            };
        }
    }

    ParsedFilter {
        op: CompareOp::Eq,
        operand: parse_operand(s),
    }
}

/// Parse a filter string that must carry an operand when present.
///
/// `None` means the parameter was absent or empty (no constraint).
pub fn parse_required_filter(
    raw: Option<&str>,
    param: &'static str,
) -> Result<Option<NumericFilter>, FilterError> {
    match raw {
        Some(s) if !s.is_empty() => parse_filter(Some(s)).require(param).map(Some),
        _ => Ok(None),
    }
}

/// Operands are cast to `numeric` in SQL, which has no infinity on older
/// Postgres, so `inf` is not an operand.
fn parse_operand(text: &str) -> Option<f64> {
    parse_number(text)
        .map(|n| n.as_f64())
        .filter(|f| f.is_finite())
}
