//! Redis-backed storage over `devhub_redis::blobs`.

use crate::{validate_key, DbPool, DbResult, Storage};
use async_trait::async_trait;
use devhub_redis::blobs;

/// Namespace used when none is given.
pub const DEFAULT_NAMESPACE: &str = "default";

#[derive(Clone)]
pub struct RedisStorage {
    pool: DbPool,
    namespace: String,
}

impl RedisStorage {
    pub fn new(pool: DbPool) -> Self {
        Self::with_namespace(pool, DEFAULT_NAMESPACE)
    }

    /// Separate dashboards (e.g. per user) sharing one Redis instance.
    pub fn with_namespace(pool: DbPool, namespace: &str) -> Self {
        Self {
            pool,
            namespace: namespace.to_string(),
        }
    }
}

#[async_trait]
impl Storage for RedisStorage {
    async fn get(&self, key: &str) -> DbResult<Option<String>> {
        validate_key(key)?;
        Ok(blobs::get_blob(&self.pool, &self.namespace, key).await?)
    }

    async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        validate_key(key)?;
        blobs::set_blob(&self.pool, &self.namespace, key, value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> DbResult<()> {
        validate_key(key)?;
        blobs::delete_blob(&self.pool, &self.namespace, key).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
