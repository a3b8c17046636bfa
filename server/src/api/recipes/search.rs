use crate::api::recipes::list::PaginatedRecipes;
use crate::api::{ApiError, ErrorResponse};
use crate::query::{Pagination, RecipeFilters};
use crate::store;
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchRecipesParams {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    /// Case-insensitive substring of the cuisine
    pub cuisine: Option<String>,
    /// Total time in minutes with optional operator, e.g. `<=30`
    pub total_time: Option<String>,
    /// Rating with optional operator, e.g. `>=4.5`
    pub rating: Option<String>,
    /// Calories with optional operator, e.g. `<400`. Compared against the digits
    /// of the recipe's `calories` nutrient.
    pub calories: Option<String>,
    /// Page number, starting at 1 (default: 1)
    pub page: Option<i64>,
    /// Number of items per page, 1 to 100 (default: 10)
    pub limit: Option<i64>,
}

/// Numeric filters accept an optional `>=`, `<=`, `>`, `<`, `==` or `=` prefix
/// followed by a number. A value that can't be parsed fails the whole request.
#[utoipa::path(
    get,
    path = "/api/recipes/search",
    tag = "recipes",
    params(SearchRecipesParams),
    responses(
        (status = 200, description = "Matching recipes ordered by rating, unrated last", body = PaginatedRecipes),
        (status = 400, description = "Invalid filter or pagination", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn search_recipes(
    State(pool): State<AppState>,
    Query(params): Query<SearchRecipesParams>,
) -> Result<Json<PaginatedRecipes>, ApiError> {
    // Pagination is checked before any filter is parsed
    let pagination = Pagination::new(params.page, params.limit)?;

    let filters = RecipeFilters::from_params(
        params.title.as_deref(),
        params.cuisine.as_deref(),
        params.total_time.as_deref(),
        params.rating.as_deref(),
        params.calories.as_deref(),
    )?;

    tracing::debug!(?filters, page = pagination.page, limit = pagination.limit, "Searching recipes");

    let page = store::search_recipes(&pool, &filters, &pagination)?;

    Ok(Json(PaginatedRecipes::new(pagination, page)))
}
