//! Embedded PostgreSQL helpers shared by the Diesel adapter suites.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! cluster bootstrap and catalogue seeding live here instead of being copied
//! into each suite.

pub mod pg_embed;

use postgres::{Client, NoTls};

/// Catalogue tables as the product service creates them.
const CATALOGUE_SCHEMA: &str = r#"
CREATE TABLE restaurants (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL
);

CREATE TABLE products (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    description TEXT,
    price DOUBLE PRECISION NOT NULL,
    "order" INTEGER,
    availability BOOLEAN NOT NULL DEFAULT TRUE,
    highlighted BOOLEAN NOT NULL DEFAULT FALSE,
    restaurant_id INTEGER NOT NULL REFERENCES restaurants (id),
    product_category_id INTEGER NOT NULL
);
"#;

/// Returns true when `SKIP_TEST_CLUSTER` is "1", "true" or "yes".
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip with a marker when `SKIP_TEST_CLUSTER` is set, otherwise fail loudly
/// so CI breakage is not masked.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Render a `postgres` error with the server message and SQLSTATE when present.
pub fn format_postgres_error(error: &postgres::Error) -> String {
    match error.as_db_error() {
        Some(db_error) => format!(
            "postgres error {:?}: {}",
            db_error.code(),
            db_error.message()
        ),
        None => error.to_string(),
    }
}

/// Run `sql` against `url` outside of any Diesel transaction.
pub fn batch_execute(url: &str, sql: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .batch_execute(sql)
        .map_err(|err| format_postgres_error(&err))
}

/// Create the `restaurants` and `products` tables.
pub fn create_catalogue_schema(url: &str) -> Result<(), String> {
    batch_execute(url, CATALOGUE_SCHEMA)
}

/// Drop the `products` table to simulate schema loss.
pub fn drop_products_table(url: &str) -> Result<(), String> {
    batch_execute(url, "DROP TABLE IF EXISTS products;")
}
