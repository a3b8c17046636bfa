use diesel::prelude::*;
use recipe_core::NormalizedRecipe;

#[derive(Queryable, Selectable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Recipe {
    pub id: i32,
    pub cuisine: Option<String>,
    pub title: Option<String>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub description: Option<String>,
    pub nutrients: Option<serde_json::Value>,
    pub serves: Option<String>,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::recipes)]
pub struct NewRecipe<'a> {
    pub cuisine: Option<&'a str>,
    pub title: Option<&'a str>,
    pub rating: Option<f64>,
    pub prep_time: Option<i32>,
    pub cook_time: Option<i32>,
    pub total_time: Option<i32>,
    pub description: Option<&'a str>,
    pub nutrients: Option<serde_json::Value>,
    pub serves: Option<&'a str>,
}

impl<'a> From<&'a NormalizedRecipe> for NewRecipe<'a> {
    fn from(recipe: &'a NormalizedRecipe) -> Self {
        Self {
            cuisine: recipe.cuisine.as_deref(),
            title: recipe.title.as_deref(),
            rating: recipe.rating,
            prep_time: recipe.prep_time,
            cook_time: recipe.cook_time,
            total_time: recipe.total_time,
            description: recipe.description.as_deref(),
            nutrients: Some(serde_json::Value::Object(recipe.nutrients.clone())),
            serves: recipe.serves.as_deref(),
        }
    }
}
