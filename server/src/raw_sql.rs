//! Raw SQL fragments that can't be expressed in Diesel's type-safe DSL.
//!
//! # Safety
//!
//! Every fragment here is assembled from static strings only. Filter operands
//! are always attached with `.bind()` by the caller, never interpolated.

use recipe_core::CompareOp;

/// Integer formed by the digits of `nutrients->>'calories'`, e.g. `"389 kcal"` -> 389.
///
/// An entry with no digits becomes NULL (not zero), so it drops out of every
/// comparison. `numeric` has no practical digit limit, so long digit runs still
/// compare.
///
/// Must stay identical to the expression index in the `create_recipes` migration.
///
/// # Why raw SQL?
/// Diesel has no `regexp_replace` or JSONB `->>` operator.
pub const CALORIES_AS_NUMBER: &str =
    "(NULLIF(regexp_replace(recipes.nutrients->>'calories', '\\D', '', 'g'), '')::numeric)";

/// `total_time` widened to `numeric` so a fractional operand compares exactly.
///
/// Must stay identical to the expression index in the `create_recipes` migration.
pub const TOTAL_TIME_AS_NUMBER: &str = "(recipes.total_time::numeric)";

/// Numeric columns and expressions that accept operator filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericField {
    TotalTime,
    Rating,
    Calories,
}

impl NumericField {
    /// Query parameter carrying the filter for this field.
    pub fn param(self) -> &'static str {
        match self {
            NumericField::TotalTime => "total_time",
            NumericField::Rating => "rating",
            NumericField::Calories => "calories",
        }
    }

    pub fn sql_expr(self) -> &'static str {
        match self {
            NumericField::TotalTime => TOTAL_TIME_AS_NUMBER,
            NumericField::Rating => "recipes.rating",
            NumericField::Calories => CALORIES_AS_NUMBER,
        }
    }

    /// SQL type the bound `double precision` operand is cast to, if any.
    ///
    /// Without the cast Postgres would widen the left-hand side to
    /// `double precision` instead, which overflows on long calorie digit runs
    /// and keeps the expression indexes from matching.
    pub fn operand_cast(self) -> Option<&'static str> {
        match self {
            NumericField::TotalTime | NumericField::Calories => Some("numeric"),
            NumericField::Rating => None,
        }
    }
}

/// SQL surrounding the bound operand of a numeric comparison.
///
/// `recipes.rating >= $1` is split as `("recipes.rating >= ", "")`, and a
/// calorie comparison as `("<expr> >= CAST(", " AS numeric)")`. The operand
/// itself is always bound as `Double` by the caller.
///
/// # Safety
/// Every piece comes from fixed `match` arms; nothing user-supplied reaches here.
pub fn comparison_sql(field: NumericField, op: CompareOp) -> (String, String) {
    match field.operand_cast() {
        Some(ty) => (
            format!("{} {} CAST(", field.sql_expr(), op.as_sql()),
            format!(" AS {})", ty),
        ),
        None => (
            format!("{} {} ", field.sql_expr(), op.as_sql()),
            String::new(),
        ),
    }
}
