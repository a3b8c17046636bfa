pub mod list;
pub mod search;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_recipes))
        .route("/search", get(search::search_recipes))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_recipes, search::search_recipes),
    components(schemas(list::PaginatedRecipes, list::RecipeResponse))
)]
pub struct ApiDoc;
