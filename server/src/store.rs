//! Running recipe queries against Postgres.
//!
//! Each query runs inside a `db.query` span so the per-request counter in
//! [`crate::telemetry`] sees it.

use crate::db::DbPool;
use crate::models::{NewRecipe, Recipe};
use crate::query::{self, Pagination, RecipeFilters};
use crate::schema::recipes;
use diesel::prelude::*;
use diesel::r2d2::PoolError;
use thiserror::Error;

/// Rows per INSERT statement. Keeps bind parameters well under the Postgres
/// limit of 65535.
const INSERT_CHUNK_SIZE: usize = 1000;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(#[from] PoolError),

    #[error("Query failed: {0}")]
    Query(#[from] diesel::result::Error),
}

/// One page of matching recipes plus the size of the whole filtered set.
#[derive(Debug)]
pub struct RecipePage {
    pub total: i64,
    pub recipes: Vec<Recipe>,
}

pub fn count_recipes(conn: &mut PgConnection, filters: &RecipeFilters) -> QueryResult<i64> {
    let _span = tracing::info_span!("db.query", op = "count_recipes").entered();
    query::filtered(filters).count().get_result(conn)
}

pub fn fetch_recipes(
    conn: &mut PgConnection,
    filters: &RecipeFilters,
    pagination: &Pagination,
) -> QueryResult<Vec<Recipe>> {
    let _span = tracing::info_span!(
        "db.query",
        op = "fetch_recipes",
        offset = pagination.offset(),
        limit = pagination.limit
    )
    .entered();
    query::page_of(filters, pagination)
        .select(Recipe::as_select())
        .load(conn)
}

/// Count and fetch on a single pooled connection. The connection goes back to
/// the pool when this returns.
pub fn search_recipes(
    pool: &DbPool,
    filters: &RecipeFilters,
    pagination: &Pagination,
) -> Result<RecipePage, StoreError> {
    let mut conn = pool.get()?;
    let total = count_recipes(&mut conn, filters)?;
    let recipes = fetch_recipes(&mut conn, filters, pagination)?;
    Ok(RecipePage { total, recipes })
}

/// Insert recipes in chunks inside one transaction. Returns the number of rows
/// written.
pub fn insert_recipes(
    conn: &mut PgConnection,
    new_recipes: &[NewRecipe<'_>],
) -> QueryResult<usize> {
    conn.transaction(|conn| {
        let mut inserted = 0;
        for chunk in new_recipes.chunks(INSERT_CHUNK_SIZE) {
            let _span = tracing::info_span!("db.query", op = "insert_recipes", rows = chunk.len())
                .entered();
            inserted += diesel::insert_into(recipes::table)
                .values(chunk)
                .execute(conn)?;
        }
        Ok(inserted)
    })
}
