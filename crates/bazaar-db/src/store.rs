//! Document store abstraction and the typed `Db` handle.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::client::RedisStore;
use crate::event::EntityType;
use crate::memory::MemoryStore;

/// Storage error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Redis connection error: {0}")]
    Connection(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;

/// Raw JSON document storage, one collection per entity type.
///
/// `fetch_all` returns documents in insertion order. Implementations must be
/// safe to share between concurrent requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, entity: EntityType, id: &str, json: String) -> DbResult<()>;

    async fn fetch(&self, entity: EntityType, id: &str) -> DbResult<Option<String>>;

    async fn fetch_all(&self, entity: EntityType) -> DbResult<Vec<String>>;

    /// Overwrite an existing document. Returns `false` when `id` is absent.
    async fn replace(&self, entity: EntityType, id: &str, json: String) -> DbResult<bool>;

    /// Returns `false` when `id` is absent.
    async fn remove(&self, entity: EntityType, id: &str) -> DbResult<bool>;
}

/// A record type stored as one JSON document.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const ENTITY: EntityType;

    fn id(&self) -> &str;
}

/// Cloneable handle over a [`DocumentStore`] with typed accessors.
#[derive(Clone)]
pub struct Db {
    store: Arc<dyn DocumentStore>,
}

impl Db {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Volatile store, used by `--memory` and tests.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::default()))
    }

    /// Connect to Redis.
    ///
    /// Example URL: `redis://127.0.0.1:6379`
    pub async fn connect(redis_url: &str) -> DbResult<Self> {
        let store = RedisStore::connect(redis_url).await?;
        Ok(Self::new(Arc::new(store)))
    }

    pub async fn insert<T: Document>(&self, doc: &T) -> DbResult<()> {
        let json = serde_json::to_string(doc)?;
        self.store.insert(T::ENTITY, doc.id(), json).await
    }

    pub async fn get<T: Document>(&self, id: &str) -> DbResult<Option<T>> {
        match self.store.fetch(T::ENTITY, id).await? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// All documents of a type, oldest first. Undecodable documents are skipped.
    pub async fn list<T: Document>(&self) -> DbResult<Vec<T>> {
        let rows = self.store.fetch_all(T::ENTITY).await?;
        let mut docs = Vec::with_capacity(rows.len());
        for json in rows {
            match serde_json::from_str::<T>(&json) {
                Ok(doc) => docs.push(doc),
                Err(e) => warn!(entity = %T::ENTITY, error = %e, "Skipping undecodable document"),
            }
        }
        Ok(docs)
    }

    /// Returns `false` when the document no longer exists.
    pub async fn replace<T: Document>(&self, doc: &T) -> DbResult<bool> {
        let json = serde_json::to_string(doc)?;
        self.store.replace(T::ENTITY, doc.id(), json).await
    }

    /// Remove a document, returning it if it existed.
    pub async fn remove<T: Document>(&self, id: &str) -> DbResult<Option<T>> {
        let Some(existing) = self.get::<T>(id).await? else {
            return Ok(None);
        };
        if self.store.remove(T::ENTITY, id).await? {
            Ok(Some(existing))
        } else {
            Ok(None)
        }
    }

    /// First document matching `pred`, in insertion order.
    pub async fn find<T, F>(&self, pred: F) -> DbResult<Option<T>>
    where
        T: Document,
        F: Fn(&T) -> bool + Send,
    {
        Ok(self.list::<T>().await?.into_iter().find(|doc| pred(doc)))
    }

    pub async fn count_where<T, F>(&self, pred: F) -> DbResult<usize>
    where
        T: Document,
        F: Fn(&T) -> bool + Send,
    {
        Ok(self.list::<T>().await?.iter().filter(|doc| pred(doc)).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Shelf {
        id: String,
        label: String,
    }

    impl Document for Shelf {
        const ENTITY: EntityType = EntityType::Poster;

        fn id(&self) -> &str {
            &self.id
        }
    }

    fn shelf(id: &str, label: &str) -> Shelf {
        Shelf {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_get_and_list_order() {
        let db = Db::in_memory();
        db.insert(&shelf("b", "second")).await.unwrap();
        db.insert(&shelf("a", "first")).await.unwrap();

        let got: Shelf = db.get("a").await.unwrap().unwrap();
        assert_eq!(got.label, "first");

        let all: Vec<Shelf> = db.list().await.unwrap();
        let ids: Vec<&str> = all.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_replace_missing_returns_false() {
        let db = Db::in_memory();
        assert!(!db.replace(&shelf("x", "nope")).await.unwrap());

        db.insert(&shelf("x", "old")).await.unwrap();
        assert!(db.replace(&shelf("x", "new")).await.unwrap());
        let got: Shelf = db.get("x").await.unwrap().unwrap();
        assert_eq!(got.label, "new");
    }

    #[tokio::test]
    async fn test_remove_returns_previous() {
        let db = Db::in_memory();
        db.insert(&shelf("x", "gone")).await.unwrap();

        let removed: Option<Shelf> = db.remove("x").await.unwrap();
        assert_eq!(removed.unwrap().label, "gone");

        let again: Option<Shelf> = db.remove("x").await.unwrap();
        assert!(again.is_none());
    }

    #[tokio::test]
    async fn test_find_and_count() {
        let db = Db::in_memory();
        db.insert(&shelf("1", "red")).await.unwrap();
        db.insert(&shelf("2", "blue")).await.unwrap();
        db.insert(&shelf("3", "red")).await.unwrap();

        let n = db.count_where(|s: &Shelf| s.label == "red").await.unwrap();
        assert_eq!(n, 2);

        let first = db.find(|s: &Shelf| s.label == "red").await.unwrap().unwrap();
        assert_eq!(first.id, "1");
    }
}
