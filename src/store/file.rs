use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};

pub const PRODUCTS: &str = "products";
pub const ORDERS: &str = "orders";
pub const ADMINS: &str = "admins";
pub const CARTS: &str = "carts";

/// JSON-file fallback storage: one file per collection, whole-file reads and
/// rewrites guarded by an in-process lock.
#[derive(Clone)]
pub struct FileStore {
    dir: PathBuf,
    lock: Arc<RwLock<()>>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Arc::new(RwLock::new(())),
        }
    }

    fn path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    /// A missing file reads as an empty collection.
    pub async fn load<T: DeserializeOwned>(&self, collection: &str) -> AppResult<Vec<T>> {
        let _guard = self.lock.read().await;
        let path = self.path(collection);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(AppError::Internal(err.into())),
        };
        let items = serde_json::from_str(&raw).map_err(anyhow::Error::from)?;
        Ok(items)
    }

    pub async fn save<T: Serialize>(&self, collection: &str, items: &[T]) -> AppResult<()> {
        let _guard = self.lock.write().await;
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(anyhow::Error::from)?;
        let raw = serde_json::to_string_pretty(items).map_err(anyhow::Error::from)?;
        tokio::fs::write(self.path(collection), raw)
            .await
            .map_err(anyhow::Error::from)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use uuid::Uuid;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        id: u32,
        name: String,
    }

    fn temp_store() -> FileStore {
        FileStore::new(std::env::temp_dir().join(format!("storefront-test-{}", Uuid::new_v4())))
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let store = temp_store();
        let items: Vec<Entry> = store.load("products").await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = temp_store();
        let items = vec![
            Entry {
                id: 1,
                name: "jutti".into(),
            },
            Entry {
                id: 2,
                name: "phulkari".into(),
            },
        ];
        store.save("products", &items).await.unwrap();
        let loaded: Vec<Entry> = store.load("products").await.unwrap();
        assert_eq!(loaded, items);
    }

    #[tokio::test]
    async fn save_overwrites_previous_contents() {
        let store = temp_store();
        store
            .save(
                "orders",
                &[Entry {
                    id: 1,
                    name: "old".into(),
                }],
            )
            .await
            .unwrap();
        store
            .save(
                "orders",
                &[Entry {
                    id: 2,
                    name: "new".into(),
                }],
            )
            .await
            .unwrap();
        let loaded: Vec<Entry> = store.load("orders").await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
    }
}
