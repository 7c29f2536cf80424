//! ProfileStore adapters.
//!
//! - `InMemoryProfileStore` - shared map, for development and tests
//! - `FileProfileStore` - one YAML file per profile
//! - `PgProfileStore` - PostgreSQL with a JSONB category tree
//! - `HttpProfileStore` - a remote server's REST API

mod file_store;
mod http_client;
mod in_memory;
mod postgres;

pub use file_store::FileProfileStore;
pub use http_client::{HttpProfileStore, HttpStoreConfig};
pub use in_memory::{InMemoryProfileStore, RecordedWrite};
pub use postgres::PgProfileStore;
