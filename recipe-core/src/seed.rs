//! Loading recipe records from a JSON export.
//!
//! Exports come from tooling that writes `NaN` for missing numbers, so the raw
//! text is cleaned up before it reaches `serde_json`. Each record is then
//! normalized: numeric fields go through [`coerce_number`], text fields are kept
//! as-is, and the nutrients document is kept as an open string-keyed map.

use crate::calories::{calorie_digits, Nutrients};
use crate::error::SeedError;
use crate::numeric::{coerce_number, Number};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Field names of a recipe record. Used to tell a single record apart from an
/// object keyed by row index.
const RECORD_FIELDS: &[&str] = &[
    "cuisine",
    "title",
    "rating",
    "prep_time",
    "cook_time",
    "total_time",
    "description",
    "nutrients",
    "serves",
];

/// A recipe ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecipe {
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub description: Option<String>,
    pub nutrients: Nutrients,
    pub serves: Option<String>,
}

impl NormalizedRecipe {
    /// Whether this recipe can take part in calorie filtering.
    pub fn has_calories(&self) -> bool {
        calorie_digits(&self.nutrients).is_some()
    }
}

/// Read and normalize every record in a JSON file.
pub fn load_recipes(path: &Path) -> Result<Vec<NormalizedRecipe>, SeedError> {
    let text = fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_recipes(&text)
}

/// Parse and normalize records from JSON text.
///
/// Accepts an array of records, a single record, or an object whose values are
/// records (as written by dataframe exports keyed by row index).
pub fn parse_recipes(text: &str) -> Result<Vec<NormalizedRecipe>, SeedError> {
    let data: Value = serde_json::from_str(&replace_non_finite(text))?;

    let records = match data {
        Value::Array(items) => items,
        Value::Object(map) if is_keyed_collection(&map) => records_in_row_order(map),
        obj @ Value::Object(_) => vec![obj],
        _ => return Err(SeedError::UnexpectedShape),
    };

    let total = records.len();
    let normalized: Vec<NormalizedRecipe> = records
        .iter()
        .filter_map(|record| match record {
            Value::Object(map) => Some(normalize_record(map)),
            _ => None,
        })
        .collect();

    if normalized.len() != total {
        tracing::warn!(
            skipped = total - normalized.len(),
            "Skipped recipe entries that were not JSON objects"
        );
    }

    Ok(normalized)
}

/// Normalize one record. Missing keys become `None`; a missing or non-object
/// nutrients entry becomes an empty map.
pub fn normalize_record(record: &Map<String, Value>) -> NormalizedRecipe {
    let number = |key: &str| record.get(key).and_then(coerce_number);
    let minutes = |key: &str| number(key).and_then(Number::to_i32);

    let nutrients = match record.get("nutrients") {
        Some(Value::Object(map)) => map.clone(),
        _ => Nutrients::new(),
    };

    NormalizedRecipe {
        cuisine: text_field(record, "cuisine"),
        title: text_field(record, "title"),
        rating: number("rating").map(Number::as_f64),
        prep_time: minutes("prep_time"),
        cook_time: minutes("cook_time"),
        total_time: minutes("total_time"),
        description: text_field(record, "description"),
        nutrients,
        serves: text_field(record, "serves"),
    }
}

fn text_field(record: &Map<String, Value>, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_keyed_collection(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map.values().all(Value::is_object)
        && !map.keys().any(|k| RECORD_FIELDS.contains(&k.as_str()))
}

/// Values of an index-keyed object, ordered by numeric key when every key is an
/// integer (`"2"` before `"10"`), otherwise in map order.
fn records_in_row_order(map: Map<String, Value>) -> Vec<Value> {
    let mut rows: Vec<(Option<u64>, Value)> = map
        .into_iter()
        .map(|(key, value)| (key.trim().parse().ok(), value))
        .collect();

    if rows.iter().all(|(index, _)| index.is_some()) {
        rows.sort_by_key(|(index, _)| *index);
    }

    rows.into_iter().map(|(_, value)| value).collect()
}

/// Replace the non-standard `NaN`, `Infinity` and `-Infinity` literals with `null`.
///
/// Only tokens outside string literals are touched.
fn replace_non_finite(input: &str) -> String {
    const TOKENS: &[&str] = &["-Infinity", "Infinity", "NaN"];

    let mut out = String::with_capacity(input.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = input;

    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = TOKENS.iter().find(|t| rest.starts_with(**t)) {
            out.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}
