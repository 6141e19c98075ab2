//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer; repositories convert them into
//! domain records.

use diesel::prelude::*;

use super::schema::{products, restaurants};

/// Row struct for reading from the restaurants table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RestaurantRow {
    pub id: i32,
    pub name: String,
}

/// Row struct for reading from the products table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProductRow {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub order: Option<i32>,
    pub availability: bool,
    pub highlighted: bool,
    pub restaurant_id: i32,
    pub product_category_id: i32,
}
