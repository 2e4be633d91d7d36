//! Namespaced JSON persistence.
//!
//! Every key is prefixed before it reaches the backend, so this app's data
//! never collides with other data living in the same store.

use crate::error::Result;
use crate::kv::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

/// Default key namespace.
pub const DEFAULT_PREFIX: &str = "@starpet:";

/// JSON get/set/remove over a [`KeyValueStore`].
///
/// Reads fail safe: a missing key, a stored `null`, or a payload that does
/// not decode as the requested type all yield the caller's fallback.
#[derive(Debug, Clone)]
pub struct Persistence<S> {
    store: S,
    prefix: String,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Wrap a store using [`DEFAULT_PREFIX`].
    pub fn new(store: S) -> Self {
        Self::with_prefix(store, DEFAULT_PREFIX)
    }

    /// Wrap a store using a custom namespace.
    pub fn with_prefix(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// The namespace prepended to every key.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Full backend key for `key`.
    pub fn namespaced(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    /// Read and decode `key`, or return `fallback`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let full_key = self.namespaced(key);
        let raw = match self.store.get_item(&full_key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(e) => {
                warn!(key = %full_key, error = %e, "storage read failed, using fallback");
                return fallback;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %full_key, error = %e, "stored payload is not valid JSON, using fallback");
                return fallback;
            }
        };
        if value.is_null() {
            return fallback;
        }

        match serde_json::from_value(value) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(key = %full_key, error = %e, "stored payload has unexpected shape, using fallback");
                fallback
            }
        }
    }

    /// Encode `value` as JSON and store it under `key`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let full_key = self.namespaced(key);
        let raw = serde_json::to_string(value)?;
        debug!(key = %full_key, bytes = raw.len(), "persisting");
        self.store.set_item(&full_key, raw).await
    }

    /// Remove `key`; a missing key is not an error.
    pub async fn remove(&self, key: &str) -> Result<()> {
        self.store.remove_item(&self.namespaced(key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use crate::store::NativeDbStore;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Settings {
        volume: u8,
        tags: Vec<String>,
    }

    #[tokio::test]
    async fn test_untouched_key_returns_fallback() {
        let persistence = Persistence::new(MemoryStore::new());
        assert_eq!(persistence.get("missing", 42).await, 42);
        let fallback = vec!["a".to_string()];
        assert_eq!(persistence.get("missing", fallback.clone()).await, fallback);
    }

    #[tokio::test]
    async fn test_round_trip_json_values() {
        let persistence = Persistence::new(MemoryStore::new());
        let values = [
            json!(7),
            json!("text"),
            json!(true),
            json!([1, [2, 3], { "a": null }]),
            json!({ "nested": { "list": [1, 2, 3], "flag": false }, "n": 1.5 }),
        ];
        for value in values {
            persistence.set("value", &value).await.unwrap();
            let back: serde_json::Value = persistence.get("value", json!("fallback")).await;
            assert_eq!(back, value);
        }
    }

    #[tokio::test]
    async fn test_round_trip_typed() {
        let persistence = Persistence::new(MemoryStore::new());
        let settings = Settings {
            volume: 3,
            tags: vec!["x".into(), "y".into()],
        };
        persistence.set("settings", &settings).await.unwrap();
        let back = persistence
            .get(
                "settings",
                Settings {
                    volume: 0,
                    tags: vec![],
                },
            )
            .await;
        assert_eq!(back, settings);
    }

    #[tokio::test]
    async fn test_keys_are_namespaced() {
        let store = MemoryStore::new();
        let persistence = Persistence::with_prefix(store.clone(), "@app:");
        persistence.set("stars", &5).await.unwrap();
        assert_eq!(store.keys().await, vec!["@app:stars".to_string()]);

        // Data outside the namespace is invisible.
        store.set_item("stars", "99".to_string()).await.unwrap();
        assert_eq!(persistence.get("stars", 0).await, 5);
    }

    #[tokio::test]
    async fn test_corrupted_payload_returns_fallback() {
        let store = MemoryStore::new();
        let persistence = Persistence::new(store.clone());
        store
            .set_item(&persistence.namespaced("broken"), "{broken".to_string())
            .await
            .unwrap();
        assert_eq!(persistence.get("broken", 42).await, 42);
    }

    #[tokio::test]
    async fn test_wrong_shape_returns_fallback() {
        let persistence = Persistence::new(MemoryStore::new());
        persistence.set("stars", &json!({ "not": "a number" })).await.unwrap();
        assert_eq!(persistence.get("stars", 3u32).await, 3);
    }

    #[tokio::test]
    async fn test_null_is_treated_as_absent() {
        let persistence = Persistence::new(MemoryStore::new());
        persistence.set("name", &json!(null)).await.unwrap();
        assert_eq!(persistence.get("name", "fallback".to_string()).await, "fallback");

        // Option<T> fallbacks see None rather than a decoded null.
        persistence.set("maybe", &Option::<u8>::None).await.unwrap();
        assert_eq!(persistence.get("maybe", Some(9u8)).await, Some(9));
    }

    #[tokio::test]
    async fn test_remove() {
        let persistence = Persistence::new(MemoryStore::new());
        persistence.remove("never-set").await.unwrap();

        persistence.set("k", &1).await.unwrap();
        persistence.remove("k").await.unwrap();
        assert_eq!(persistence.get("k", 0).await, 0);
    }

    #[tokio::test]
    async fn test_native_db_backend() {
        let persistence = Persistence::new(NativeDbStore::in_memory().unwrap());
        let value = json!({ "2024-01-01": ["wake_up", "bedtime"] });
        persistence.set("completed", &value).await.unwrap();
        assert_eq!(persistence.get("completed", json!({})).await, value);

        persistence.remove("completed").await.unwrap();
        assert_eq!(persistence.get("completed", json!({})).await, json!({}));
    }
}
