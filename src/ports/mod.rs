//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ProfileStore` - durable CRUD persistence of profiles
//! - `LocalCache` - key/value fallback used while the store is unreachable

mod local_cache;
mod profile_store;

pub use local_cache::{CacheError, LocalCache, LEGACY_CATEGORIES_KEY, PROFILES_KEY};
pub use profile_store::{ProfilePatch, ProfileStore, StoreError};
