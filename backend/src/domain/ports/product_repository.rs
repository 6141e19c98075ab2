//! Port abstraction for product lookups used by validation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Product, ProductId, RestaurantId};

/// Persistence errors raised by product repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductPersistenceError {
    /// Repository connection could not be established.
    #[error("product repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution or row conversion.
    #[error("product repository query failed: {message}")]
    Query { message: String },
}

impl ProductPersistenceError {
    /// Helper for connection failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Read access to product records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch a product by primary key; `None` when it does not exist.
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError>;

    /// Count the restaurant's products flagged as highlighted.
    async fn count_highlighted(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<u64, ProductPersistenceError>;
}
