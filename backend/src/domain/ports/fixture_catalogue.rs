//! In-memory catalogue backing both lookup ports.
//!
//! Used when the server runs without a database and by behaviour tests that
//! need deterministic records.

use async_trait::async_trait;

use crate::domain::{Product, ProductId, Restaurant, RestaurantId};

use super::{
    ProductPersistenceError, ProductRepository, RestaurantPersistenceError, RestaurantRepository,
};

/// Fixed set of restaurants and products seeded at construction.
#[derive(Debug, Default, Clone)]
pub struct FixtureCatalogue {
    restaurants: Vec<Restaurant>,
    products: Vec<Product>,
}

impl FixtureCatalogue {
    /// Add a restaurant record.
    #[must_use]
    pub fn with_restaurant(mut self, restaurant: Restaurant) -> Self {
        self.restaurants.push(restaurant);
        self
    }

    /// Add a product record.
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.products.push(product);
        self
    }
}

#[async_trait]
impl RestaurantRepository for FixtureCatalogue {
    async fn find_by_id(
        &self,
        id: RestaurantId,
    ) -> Result<Option<Restaurant>, RestaurantPersistenceError> {
        Ok(self
            .restaurants
            .iter()
            .find(|restaurant| restaurant.id == id)
            .cloned())
    }
}

#[async_trait]
impl ProductRepository for FixtureCatalogue {
    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, ProductPersistenceError> {
        Ok(self.products.iter().find(|product| product.id == id).cloned())
    }

    async fn count_highlighted(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<u64, ProductPersistenceError> {
        let count = self
            .products
            .iter()
            .filter(|product| product.restaurant_id == restaurant_id && product.highlighted)
            .count();
        u64::try_from(count).map_err(|err| ProductPersistenceError::query(err.to_string()))
    }
}
