//! Product catalogue entities referenced by product validation.
//!
//! Records are owned by the persistence layer; the domain only reads them.
//! Identifiers are positive integers and are wrapped in newtypes so a
//! restaurant id cannot be passed where a category id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors returned by identifier constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdentifierError {
    /// Identifiers start at one.
    #[error("identifier must be at least 1, got {value}")]
    NotPositive { value: i64 },
}

macro_rules! positive_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Validate and wrap a raw identifier.
            pub fn new(value: i64) -> Result<Self, IdentifierError> {
                if value < 1 {
                    return Err(IdentifierError::NotPositive { value });
                }
                Ok(Self(value))
            }

            /// Raw identifier value.
            #[must_use]
            pub fn get(self) -> i64 {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = IdentifierError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

positive_id! {
    /// Primary key of a restaurant.
    RestaurantId
}

positive_id! {
    /// Primary key of a product.
    ProductId
}

positive_id! {
    /// Primary key of a product category.
    ProductCategoryId
}

/// Restaurant record, referenced only for existence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
}

/// Stored product record as seen by the validator.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub restaurant_id: RestaurantId,
    pub product_category_id: ProductCategoryId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub order: Option<i64>,
    pub availability: bool,
    pub highlighted: bool,
}
