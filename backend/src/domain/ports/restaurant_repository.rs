//! Port abstraction for restaurant lookups and their errors.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Restaurant, RestaurantId};

/// Persistence errors raised by restaurant repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestaurantPersistenceError {
    /// Repository connection could not be established.
    #[error("restaurant repository connection failed: {message}")]
    Connection { message: String },
    /// Query failed during execution.
    #[error("restaurant repository query failed: {message}")]
    Query { message: String },
}

impl RestaurantPersistenceError {
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

/// Read access to restaurant records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// Fetch a restaurant by primary key; `None` when it does not exist.
    async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError>;
}
