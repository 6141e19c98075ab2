//! PostgreSQL-backed `RestaurantRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RestaurantPersistenceError, RestaurantRepository};
use crate::domain::{Restaurant, RestaurantId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::RestaurantRow;
use super::pool::DbPool;
use super::schema::restaurants;

/// Diesel-backed restaurant lookups.
#[derive(Clone)]
pub struct DieselRestaurantRepository {
    pool: DbPool,
}

impl DieselRestaurantRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: &diesel::result::Error) -> RestaurantPersistenceError {
    map_diesel_error(
        error,
        RestaurantPersistenceError::query,
        RestaurantPersistenceError::connection,
    )
}

fn row_to_restaurant(row: RestaurantRow) -> Result<Restaurant, RestaurantPersistenceError> {
    let id = RestaurantId::new(i64::from(row.id))
        .map_err(|err| RestaurantPersistenceError::query(format!("invalid restaurant row: {err}")))?;
    Ok(Restaurant { id, name: row.name })
}

#[async_trait]
impl RestaurantRepository for DieselRestaurantRepository {
    async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        // Keys outside the column's range cannot match a row.
        let Ok(key) = i32::try_from(id.get()) else {
            return Ok(None);
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(&err, RestaurantPersistenceError::connection))?;

        let row: Option<RestaurantRow> = restaurants::table
            .find(key)
            .select(RestaurantRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(&err))?;

        row.map(row_to_restaurant).transpose()
    }
}
