//! Diesel table definitions for the catalogue tables read by validation.
//!
//! These must match the database migrations, which are owned by the service
//! that writes products. `diesel print-schema` regenerates them from a live
//! database.

diesel::table! {
    /// Restaurants; validation only checks that a primary key exists.
    restaurants (id) {
        id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Products offered by restaurants.
    products (id) {
        id -> Int4,
        name -> Varchar,
        description -> Nullable<Text>,
        price -> Float8,
        /// Display position within the restaurant's menu.
        order -> Nullable<Int4>,
        availability -> Bool,
        highlighted -> Bool,
        restaurant_id -> Int4,
        product_category_id -> Int4,
    }
}

diesel::joinable!(products -> restaurants (restaurant_id));
diesel::allow_tables_to_appear_in_same_query!(products, restaurants);
