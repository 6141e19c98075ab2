//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod products;
pub mod schemas;
pub mod state;
pub(crate) mod validation;

pub use error::ApiResult;
