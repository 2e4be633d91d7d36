//! Starpet Engine - Progression store with background persistence
//!
//! Ties `starpet-core`'s pure update function to `starpet-db` storage:
//!
//! ```rust,ignore
//! use starpet_db::MemoryStore;
//! use starpet_engine::{EngineConfig, ProgressionStore};
//!
//! let mut store = ProgressionStore::new(MemoryStore::new(), EngineConfig::default());
//! store.load_data().await;
//!
//! store.complete_mission("brush_teeth_morning", 2);
//! assert_eq!(store.total_stars(), 2);
//!
//! // Wait for the write to reach storage
//! store.flush().await?;
//! ```

mod config;
mod error;
mod store;
mod writer;

pub use config::EngineConfig;
pub use error::{Error, Result};
pub use store::ProgressionStore;
