//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `store` - ProfileStore backends (in-memory, YAML files, PostgreSQL, remote HTTP)
//! - `cache` - LocalCache backends (in-memory, files)
//! - `http` - the axum REST API

pub mod cache;
pub mod http;
pub mod store;

pub use cache::{FileLocalCache, InMemoryLocalCache};
pub use store::{
    FileProfileStore, HttpProfileStore, HttpStoreConfig, InMemoryProfileStore, PgProfileStore,
};
