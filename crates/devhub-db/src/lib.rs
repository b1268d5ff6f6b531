//! DevHub storage layer.
//!
//! A single key-value surface (`Storage`) for serialized state blobs, with
//! in-memory, file and Redis backends. Stores above this crate only ever
//! read and write whole blobs by a fixed key.

pub mod file;
pub mod memory;
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;

pub use devhub_redis::RedisPool as DbPool;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use redis::RedisStorage;

/// Storage error types.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Redis error: {0}")]
    Redis(#[from] devhub_redis::RedisError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// Result type for storage operations.
pub type DbResult<T> = Result<T, DbError>;

/// Key-value persistence for serialized blobs.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Read the blob stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> DbResult<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob. Returns only
    /// once the write is durable for the backend.
    async fn set(&self, key: &str, value: &str) -> DbResult<()>;

    /// Remove the blob under `key`. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> DbResult<()>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Initialize a Redis-backed storage from a URL.
pub async fn init_redis_storage(redis_url: &str) -> DbResult<RedisStorage> {
    let pool = devhub_redis::init_pool(redis_url).await?;
    Ok(RedisStorage::new(pool))
}

/// Keys become file names and Redis key segments, so keep them to a safe
/// alphabet.
pub(crate) fn validate_key(key: &str) -> DbResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
        && !key.starts_with('.');
    if valid {
        Ok(())
    } else {
        Err(DbError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("widgetSettings").is_ok());
        assert!(validate_key("layout-v2.json").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("a b").is_err());
    }
}
