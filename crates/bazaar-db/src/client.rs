//! Redis document store.
//!
//! Each document lives in a hash `bazaar:{collection}:{id}` under the field
//! `data`. A sorted set `bazaar:{collection}:index`, scored by a per-collection
//! counter, keeps insertion order for listing.
//!
//! Document and index writes go out as one `MULTI`/`EXEC` block, and the
//! conditional replace runs as a Lua script, so a concurrent delete can never
//! leave a document without its index entry.

use std::sync::LazyLock;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};

use crate::event::EntityType;
use crate::store::{DbResult, DocumentStore};

const KEY_PREFIX: &str = "bazaar";

/// Overwrite `data` only while the document still exists. Returns 1 or 0.
static REPLACE_IF_EXISTS: LazyLock<Script> = LazyLock::new(|| {
    Script::new(
        r#"
if redis.call('EXISTS', KEYS[1]) == 1 then
    redis.call('HSET', KEYS[1], 'data', ARGV[1])
    return 1
end
return 0
"#,
    )
});

/// `ConnectionManager` multiplexes and reconnects internally; it is cloned
/// per operation to get a mutable handle.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    pub async fn connect(redis_url: &str) -> DbResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!(url = %redis_url, "Connected to Redis");
        Ok(Self { conn })
    }

    fn doc_key(entity: EntityType, id: &str) -> String {
        format!("{}:{}:{}", KEY_PREFIX, entity.collection(), id)
    }

    fn index_key(entity: EntityType) -> String {
        format!("{}:{}:index", KEY_PREFIX, entity.collection())
    }

    fn seq_key(entity: EntityType) -> String {
        format!("{}:{}:seq", KEY_PREFIX, entity.collection())
    }
}

#[async_trait]
impl DocumentStore for RedisStore {
    async fn insert(&self, entity: EntityType, id: &str, json: String) -> DbResult<()> {
        let mut conn = self.conn.clone();
        let seq: i64 = conn.incr(Self::seq_key(entity), 1).await?;
        let _: () = redis::pipe()
            .atomic()
            .hset(Self::doc_key(entity, id), "data", json)
            .ignore()
            .zadd(Self::index_key(entity), id, seq)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn fetch(&self, entity: EntityType, id: &str) -> DbResult<Option<String>> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn.hget(Self::doc_key(entity, id), "data").await?;
        Ok(json)
    }

    async fn fetch_all(&self, entity: EntityType) -> DbResult<Vec<String>> {
        let mut conn = self.conn.clone();
        let ids: Vec<String> = conn.zrange(Self::index_key(entity), 0, -1).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for id in &ids {
            pipe.hget(Self::doc_key(entity, id), "data");
        }
        let docs: Vec<Option<String>> = pipe.query_async(&mut conn).await?;
        Ok(docs.into_iter().flatten().collect())
    }

    async fn replace(&self, entity: EntityType, id: &str, json: String) -> DbResult<bool> {
        let mut conn = self.conn.clone();
        let replaced: i64 = REPLACE_IF_EXISTS
            .key(Self::doc_key(entity, id))
            .arg(json)
            .invoke_async(&mut conn)
            .await?;
        Ok(replaced == 1)
    }

    async fn remove(&self, entity: EntityType, id: &str) -> DbResult<bool> {
        let mut conn = self.conn.clone();
        let (removed,): (i64,) = redis::pipe()
            .atomic()
            .del(Self::doc_key(entity, id))
            .zrem(Self::index_key(entity), id)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(removed > 0)
    }
}
