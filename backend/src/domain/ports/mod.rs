//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Ports describe the record lookups product validation depends on. Each
//! trait exposes a typed error so adapters map their failures into
//! predictable variants.

mod fixture_catalogue;
mod product_repository;
mod restaurant_repository;

pub use fixture_catalogue::FixtureCatalogue;
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{ProductPersistenceError, ProductRepository};
#[cfg(test)]
pub use restaurant_repository::MockRestaurantRepository;
pub use restaurant_repository::{RestaurantPersistenceError, RestaurantRepository};
