use crate::api::{ApiError, ErrorResponse};
use crate::models::Recipe;
use crate::query::{Pagination, RecipeFilters};
use crate::store::{self, RecipePage};
use crate::AppState;
use axum::{
    extract::{Query, State},
    Json,
};
use recipe_core::Nutrients;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// Page number, starting at 1 (default: 1)
    pub page: Option<i64>,
    /// Number of items per page, 1 to 100 (default: 10)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecipeResponse {
    pub id: i32,
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub description: Option<String>,
    /// Nutrient name to free-text value, e.g. `{"calories": "389 kcal"}`
    #[schema(value_type = Option<Object>)]
    pub nutrients: Option<Nutrients>,
    pub serves: Option<String>,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        let nutrients = match recipe.nutrients {
            Some(serde_json::Value::Object(map)) => Some(map),
            _ => None,
        };

        Self {
            id: recipe.id,
            cuisine: recipe.cuisine,
            title: recipe.title,
            rating: recipe.rating,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            description: recipe.description,
            nutrients,
            serves: recipe.serves,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaginatedRecipes {
    pub page: i64,
    pub limit: i64,
    /// Number of recipes matching the filters, across all pages
    pub total: i64,
    pub data: Vec<RecipeResponse>,
}

impl PaginatedRecipes {
    pub fn new(pagination: Pagination, page: RecipePage) -> Self {
        Self {
            page: pagination.page,
            limit: pagination.limit,
            total: page.total,
            data: page.recipes.into_iter().map(RecipeResponse::from).collect(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Recipes ordered by rating, unrated last", body = PaginatedRecipes),
        (status = 400, description = "Invalid pagination", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    )
)]
pub async fn list_recipes(
    State(pool): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<PaginatedRecipes>, ApiError> {
    let pagination = Pagination::new(params.page, params.limit)?;
    let filters = RecipeFilters::default();

    let page = store::search_recipes(&pool, &filters, &pagination)?;

    Ok(Json(PaginatedRecipes::new(pagination, page)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn recipe(nutrients: Option<serde_json::Value>) -> Recipe {
        Recipe {
            id: 7,
            cuisine: None,
            title: Some("Soup".to_string()),
            rating: Some(4.5),
            prep_time: None,
            cook_time: None,
            total_time: Some(20),
            description: None,
            nutrients,
            serves: None,
        }
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let body = serde_json::to_value(RecipeResponse::from(recipe(None))).unwrap();
        assert_eq!(
            body,
            json!({
                "id": 7,
                "cuisine": null,
                "title": "Soup",
                "rating": 4.5,
                "prep_time": null,
                "cook_time": null,
                "total_time": 20,
                "description": null,
                "nutrients": null,
                "serves": null
            })
        );
    }

    #[test]
    fn test_nutrients_object_is_kept() {
        let response = RecipeResponse::from(recipe(Some(json!({"calories": "389 kcal"}))));
        let nutrients = response.nutrients.unwrap();
        assert_eq!(nutrients.get("calories"), Some(&json!("389 kcal")));
    }

    #[test]
    fn test_non_object_nutrients_are_dropped() {
        let response = RecipeResponse::from(recipe(Some(json!("389 kcal"))));
        assert!(response.nutrients.is_none());
    }

    #[test]
    fn test_paginated_shape() {
        let page = RecipePage {
            total: 42,
            recipes: vec![recipe(None)],
        };
        let body = PaginatedRecipes::new(Pagination { page: 3, limit: 1 }, page);
        let value = serde_json::to_value(body).unwrap();

        assert_eq!(value["page"], 3);
        assert_eq!(value["limit"], 1);
        assert_eq!(value["total"], 42);
        assert_eq!(value["data"].as_array().unwrap().len(), 1);
    }
}
