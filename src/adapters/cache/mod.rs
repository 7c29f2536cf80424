//! LocalCache adapters.

mod file_cache;
mod in_memory;

pub use file_cache::FileLocalCache;
pub use in_memory::InMemoryLocalCache;
