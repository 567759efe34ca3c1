//! In-memory document store.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::event::EntityType;
use crate::store::{DbResult, DocumentStore};

/// Volatile store backed by insertion-ordered vectors.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<EntityType, Vec<(String, String)>>>,
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, entity: EntityType, id: &str, json: String) -> DbResult<()> {
        let mut collections = self.collections.write();
        let docs = collections.entry(entity).or_default();
        match docs.iter_mut().find(|(doc_id, _)| doc_id == id) {
            Some(slot) => slot.1 = json,
            None => docs.push((id.to_string(), json)),
        }
        Ok(())
    }

    async fn fetch(&self, entity: EntityType, id: &str) -> DbResult<Option<String>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&entity)
            .and_then(|docs| docs.iter().find(|(doc_id, _)| doc_id == id))
            .map(|(_, json)| json.clone()))
    }

    async fn fetch_all(&self, entity: EntityType) -> DbResult<Vec<String>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&entity)
            .map(|docs| docs.iter().map(|(_, json)| json.clone()).collect())
            .unwrap_or_default())
    }

    async fn replace(&self, entity: EntityType, id: &str, json: String) -> DbResult<bool> {
        let mut collections = self.collections.write();
        let slot = collections
            .get_mut(&entity)
            .and_then(|docs| docs.iter_mut().find(|(doc_id, _)| doc_id == id));
        match slot {
            Some(slot) => {
                slot.1 = json;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn remove(&self, entity: EntityType, id: &str) -> DbResult<bool> {
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(&entity) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|(doc_id, _)| doc_id != id);
        Ok(docs.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collections_are_isolated() {
        let store = MemoryStore::default();
        store
            .insert(EntityType::Brand, "1", "{\"b\":1}".to_string())
            .await
            .unwrap();

        assert!(store.fetch(EntityType::Product, "1").await.unwrap().is_none());
        assert_eq!(store.fetch_all(EntityType::Brand).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reinsert_keeps_position() {
        let store = MemoryStore::default();
        store.insert(EntityType::Poster, "a", "1".to_string()).await.unwrap();
        store.insert(EntityType::Poster, "b", "2".to_string()).await.unwrap();
        store.insert(EntityType::Poster, "a", "3".to_string()).await.unwrap();

        let all = store.fetch_all(EntityType::Poster).await.unwrap();
        assert_eq!(all, vec!["3".to_string(), "2".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_missing() {
        let store = MemoryStore::default();
        assert!(!store.remove(EntityType::Order, "nope").await.unwrap());
    }
}
