//! PostgreSQL-backed `ProductRepository` implementation using Diesel ORM.
//!
//! The highlighted count is a plain `SELECT COUNT(*)`; it is not locked
//! against concurrent writers.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ProductPersistenceError, ProductRepository};
use crate::domain::{Product, ProductCategoryId, ProductId, RestaurantId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::ProductRow;
use super::pool::DbPool;
use super::schema::products;

/// Diesel-backed product lookups.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: &diesel::result::Error) -> ProductPersistenceError {
    map_diesel_error(
        error,
        ProductPersistenceError::query,
        ProductPersistenceError::connection,
    )
}

fn invalid_row(err: impl std::fmt::Display) -> ProductPersistenceError {
    ProductPersistenceError::query(format!("invalid product row: {err}"))
}

/// Convert a database row to a domain product.
fn row_to_product(row: ProductRow) -> Result<Product, ProductPersistenceError> {
    Ok(Product {
        id: ProductId::new(i64::from(row.id)).map_err(invalid_row)?,
        restaurant_id: RestaurantId::new(i64::from(row.restaurant_id)).map_err(invalid_row)?,
        product_category_id: ProductCategoryId::new(i64::from(row.product_category_id))
            .map_err(invalid_row)?,
        name: row.name,
        description: row.description,
        price: row.price,
        order: row.order.map(i64::from),
        availability: row.availability,
        highlighted: row.highlighted,
    })
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        let Ok(key) = i32::try_from(id.get()) else {
            return Ok(None);
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(&err, ProductPersistenceError::connection))?;

        let row: Option<ProductRow> = products::table
            .find(key)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_error(&err))?;

        row.map(row_to_product).transpose()
    }

    async fn count_highlighted(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<u64, ProductPersistenceError> {
        let Ok(key) = i32::try_from(restaurant_id.get()) else {
            return Ok(0);
        };
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(&err, ProductPersistenceError::connection))?;

        let count: i64 = products::table
            .filter(products::restaurant_id.eq(key))
            .filter(products::highlighted.eq(true))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_error(&err))?;

        u64::try_from(count).map_err(invalid_row)
    }
}
