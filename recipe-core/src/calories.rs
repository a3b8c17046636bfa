//! Calorie values embedded in free-text nutrient entries.
//!
//! Nutrient documents hold strings like `"389 kcal"`. The comparable value is the
//! integer formed by every decimal digit in the entry, in order. An entry without
//! digits has no value; it is never treated as zero.
//!
//! The server evaluates the same rule inside Postgres so filtering and counting
//! happen in the database. This in-memory version backs the seeder's reporting.

use serde_json::{Map, Value};

/// Key of the calorie entry in a nutrients document.
pub const CALORIES_KEY: &str = "calories";

pub type Nutrients = Map<String, Value>;

/// Extract the calorie count from a nutrients document.
///
/// `None` also when the digits don't fit in an `i64`; see [`calorie_digits`].
pub fn extract_calories(nutrients: &Nutrients) -> Option<i64> {
    calorie_digits(nutrients)?.parse().ok()
}

/// The digits of the calorie entry, in order. `None` when the entry is missing,
/// null, or has no digits.
pub fn calorie_digits(nutrients: &Nutrients) -> Option<String> {
    let text = match nutrients.get(CALORIES_KEY)? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        // Postgres `->>` renders non-string JSON as its text form
        other => other.to_string(),
    };
    digits_of(&text)
}

/// Keep only ASCII digits and read them as one integer.
///
/// Returns `None` when no digits remain or the digit run does not fit in an `i64`.
pub fn digits_to_int(text: &str) -> Option<i64> {
    digits_of(text)?.parse().ok()
}

fn digits_of(text: &str) -> Option<String> {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    (!digits.is_empty()).then_some(digits)
}
