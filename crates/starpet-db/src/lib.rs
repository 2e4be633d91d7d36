//! Starpet DB - Storage layer for starpet
//!
//! Provides:
//! - The `KeyValueStore` contract for raw string storage
//! - `MemoryStore` and the native_db-backed `NativeDbStore`
//! - `Persistence`, the namespaced JSON adapter the engine reads and writes through

mod error;
mod kv;
mod models;
mod persistence;
mod store;

pub use error::{Error, Result};
pub use kv::{KeyValueStore, MemoryStore};
pub use persistence::{Persistence, DEFAULT_PREFIX};
pub use store::NativeDbStore;
