//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the catalogue lookup ports backed by
//! PostgreSQL via `diesel-async` with `bb8` pooling.
//!
//! - **Thin adapters**: repositories only translate rows into domain
//!   records; no validation policy lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Typed errors**: pool and Diesel failures map onto the ports'
//!   `Connection` and `Query` variants.
//!
//! # Example
//!
//! ```ignore
//! use deliverus_backend::outbound::persistence::{
//!     DbPool, DieselProductRepository, DieselRestaurantRepository, PoolConfig,
//! };
//!
//! let pool = DbPool::connect(PoolConfig::new("postgres://localhost/deliverus")).await?;
//! let restaurants = DieselRestaurantRepository::new(pool.clone());
//! let products = DieselProductRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_product_repository;
mod diesel_restaurant_repository;
mod models;
mod pool;
mod schema;

pub use diesel_product_repository::DieselProductRepository;
pub use diesel_restaurant_repository::DieselRestaurantRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
