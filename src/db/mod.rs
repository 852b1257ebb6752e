//! Database module: row models, schema and the two store backends.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for bootstrapping `usuarios` and `cafes`
//! - `sqlite.rs` / `postgres.rs`: backend-specific queries
//! - `store.rs`: the `Store` handle injected into request handlers

pub mod models;
pub mod postgres;
pub mod schema;
pub mod sqlite;
pub mod store;

pub use models::{Cafe, CafeRecord, NewRegistration, StoredCredential};
pub use schema::{POSTGRES_INIT, SQLITE_INIT};
pub use store::Store;

/// Split a bundled DDL script into individual statements; `sqlx::query` runs one at a time.
pub(crate) fn statements(script: &str) -> impl Iterator<Item = &str> {
    script.split(';').map(str::trim).filter(|s| !s.is_empty())
}
