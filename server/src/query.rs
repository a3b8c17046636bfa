//! Composition of recipe filters, ordering and pagination into Diesel queries.

use crate::raw_sql::{comparison_sql, NumericField};
use crate::schema::recipes;
use diesel::dsl::sql;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Double};
use recipe_core::{parse_required_filter, FilterError, NumericFilter};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

pub type BoxedRecipeQuery<'a> = recipes::BoxedQuery<'a, Pg>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page must be at least 1")]
    InvalidPage,

    #[error("limit must be between 1 and 100")]
    InvalidLimit,
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Validate `page >= 1` and `1 <= limit <= 100`, filling in defaults for
    /// missing values. Out-of-range values are rejected, not clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, PaginationError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);

        if page < 1 {
            return Err(PaginationError::InvalidPage);
        }
        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(PaginationError::InvalidLimit);
        }

        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Parsed search filters. The default value matches every recipe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeFilters {
    /// `ILIKE` pattern for the title, already escaped and wrapped in `%`.
    title_pattern: Option<String>,
    cuisine_pattern: Option<String>,
    numeric: Vec<(NumericField, NumericFilter)>,
}

impl RecipeFilters {
    /// Build filters from raw query parameters.
    ///
    /// Empty strings are treated like absent parameters. A non-empty numeric
    /// filter without a parsable operand fails with an error naming the parameter.
    pub fn from_params(
        title: Option<&str>,
        cuisine: Option<&str>,
        total_time: Option<&str>,
        rating: Option<&str>,
        calories: Option<&str>,
    ) -> Result<Self, FilterError> {
        let mut numeric = Vec::new();
        for (field, raw) in [
            (NumericField::TotalTime, total_time),
            (NumericField::Rating, rating),
            (NumericField::Calories, calories),
        ] {
            if let Some(filter) = parse_required_filter(raw, field.param())? {
                numeric.push((field, filter));
            }
        }

        Ok(Self {
            title_pattern: title.filter(|s| !s.is_empty()).map(contains_pattern),
            cuisine_pattern: cuisine.filter(|s| !s.is_empty()).map(contains_pattern),
            numeric,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.title_pattern.is_none() && self.cuisine_pattern.is_none() && self.numeric.is_empty()
    }

    /// AND every present filter onto `query`.
    pub fn apply<'a>(&'a self, mut query: BoxedRecipeQuery<'a>) -> BoxedRecipeQuery<'a> {
        if let Some(ref pattern) = self.title_pattern {
            query = query.filter(recipes::title.ilike(pattern));
        }
        if let Some(ref pattern) = self.cuisine_pattern {
            query = query.filter(recipes::cuisine.ilike(pattern));
        }
        for (field, filter) in &self.numeric {
            let (before, after) = comparison_sql(*field, filter.op);
            query = query.filter(
                sql::<Bool>(&before)
                    .bind::<Double, _>(filter.operand)
                    .sql(&after),
            );
        }
        query
    }
}

/// Every recipe matching `filters`, unordered and unpaginated. Used for counting.
pub fn filtered(filters: &RecipeFilters) -> BoxedRecipeQuery<'_> {
    filters.apply(recipes::table.into_boxed())
}

/// One page of recipes matching `filters` in the default order: highest rating
/// first, unrated recipes last, ties broken by id.
pub fn page_of<'a>(filters: &'a RecipeFilters, pagination: &Pagination) -> BoxedRecipeQuery<'a> {
    filtered(filters)
        .order((recipes::rating.desc().nulls_last(), recipes::id.asc()))
        .offset(pagination.offset())
        .limit(pagination.limit)
}

/// Case-insensitive substring pattern with LIKE wildcards in the input escaped.
fn contains_pattern(text: &str) -> String {
    format!(
        "%{}%",
        text.replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    )
}
