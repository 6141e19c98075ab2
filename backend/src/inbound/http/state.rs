//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain services and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ProductValidator;
use crate::domain::ports::{ProductRepository, RestaurantRepository};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: ProductValidator,
}

impl HttpState {
    /// Build state around an already configured validator.
    pub fn new(products: ProductValidator) -> Self {
        Self { products }
    }

    /// Build state from the lookup ports the validator needs.
    pub fn from_ports(
        restaurants: Arc<dyn RestaurantRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self::new(ProductValidator::new(restaurants, products))
    }
}
