//! Bulk loading of recipes from a JSON export.

use crate::db::{self, DbPool, DbSetupError};
use crate::models::NewRecipe;
use crate::store;
use recipe_core::{load_recipes, NormalizedRecipe, SeedError};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SeedCommandError {
    #[error(transparent)]
    Load(#[from] SeedError),

    #[error(transparent)]
    Setup(#[from] DbSetupError),

    #[error("Failed to insert recipes: {0}")]
    Insert(#[from] diesel::result::Error),
}

/// Summary of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    /// Recipes whose calories can't be filtered because the entry has no digits
    /// or is missing.
    pub without_calories: usize,
}

/// Create the schema if needed and insert every recipe in `path`.
pub fn seed_from_file(pool: &DbPool, path: &Path) -> Result<SeedSummary, SeedCommandError> {
    db::run_migrations(pool)?;

    let recipes = load_recipes(path)?;
    tracing::info!(count = recipes.len(), path = %path.display(), "Loaded recipes");

    seed_recipes(pool, &recipes)
}

pub fn seed_recipes(
    pool: &DbPool,
    recipes: &[NormalizedRecipe],
) -> Result<SeedSummary, SeedCommandError> {
    let without_calories = recipes.iter().filter(|r| !r.has_calories()).count();
    if without_calories > 0 {
        tracing::warn!(
            without_calories,
            "Some recipes have no numeric calorie value and will never match a calories filter"
        );
    }

    let new_recipes: Vec<NewRecipe<'_>> = recipes.iter().map(NewRecipe::from).collect();

    let mut conn = pool.get().map_err(DbSetupError::from)?;
    let inserted = store::insert_recipes(&mut conn, &new_recipes)?;

    tracing::info!(inserted, "Seed complete");

    Ok(SeedSummary {
        inserted,
        without_calories,
    })
}
