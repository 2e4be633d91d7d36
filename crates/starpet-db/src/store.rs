//! native_db-backed key-value store.

use crate::error::{Error, Result};
use crate::kv::KeyValueStore;
use crate::models::*;
use async_trait::async_trait;
use native_db::*;
use std::path::Path;
use std::sync::LazyLock;

// Static models for the database
static MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut models = Models::new();
    if let Err(e) = models.define::<StoredItem>() {
        tracing::error!(error = %e, "failed to define storage model");
    }
    models
});

/// Database store for persistent app data.
pub struct NativeDbStore {
    pub(crate) db: Database<'static>,
}

impl NativeDbStore {
    /// Open or create a database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Builder::new()
            .create(&MODELS, path.as_ref())
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Create an in-memory database.
    pub fn in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_in_memory(&MODELS)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(Self { db })
    }

    /// Load a record by key.
    pub fn load(&self, key: &str) -> Result<Option<String>> {
        let r = self.db.r_transaction()?;
        let stored: Option<StoredItem> = r.get().primary(key.to_string())?;
        Ok(stored.map(|s| s.value))
    }

    /// Save a record.
    pub fn save(&self, key: &str, value: String) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        rw.upsert(StoredItem::new(key, value))?;
        rw.commit()?;
        Ok(())
    }

    /// Delete a record if present.
    pub fn delete(&self, key: &str) -> Result<()> {
        let rw = self.db.rw_transaction()?;
        let stored: Option<StoredItem> = rw.get().primary(key.to_string())?;
        if let Some(s) = stored {
            rw.remove(s)?;
        }
        rw.commit()?;
        Ok(())
    }

    /// All stored keys, in key order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let r = self.db.r_transaction()?;
        let scan = r.scan().primary::<StoredItem>()?;
        let iter = scan.all()?;
        let items: std::result::Result<Vec<StoredItem>, _> = iter.collect();
        let items = items.map_err(|e| Error::Database(e.to_string()))?;
        Ok(items.into_iter().map(|i| i.key).collect())
    }

    /// Clear all data.
    pub fn clear(&self) -> Result<()> {
        let keys = self.keys()?;
        let rw = self.db.rw_transaction()?;
        for key in keys {
            if let Some(item) = rw.get().primary::<StoredItem>(key)? {
                rw.remove(item)?;
            }
        }
        rw.commit()?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for NativeDbStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.load(key)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        self.save(key, value)
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.delete(key)
    }
}

impl From<native_db::db_type::Error> for Error {
    fn from(err: native_db::db_type::Error) -> Self {
        Error::Database(err.to_string())
    }
}
