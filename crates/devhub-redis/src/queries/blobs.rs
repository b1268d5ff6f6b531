//! Serialized state blobs keyed by a fixed name.
//!
//! Each blob lives in a hash `devhub:{namespace}:blob:{key}` with the
//! payload under `data` and the write time under `updated_at`.

use crate::client::{RedisPool, RedisResult};
use redis::AsyncCommands;

fn blob_key(namespace: &str, key: &str) -> String {
    format!("devhub:{}:blob:{}", namespace, key)
}

/// Read a blob, returning `None` when it was never written.
pub async fn get_blob(pool: &RedisPool, namespace: &str, key: &str) -> RedisResult<Option<String>> {
    let mut conn = pool.clone();
    let data: Option<String> = conn.hget(blob_key(namespace, key), "data").await?;
    Ok(data)
}

/// Write (or overwrite) a blob.
pub async fn set_blob(pool: &RedisPool, namespace: &str, key: &str, value: &str) -> RedisResult<()> {
    let mut conn = pool.clone();
    let hkey = blob_key(namespace, key);
    let now = chrono::Utc::now().to_rfc3339();
    conn.hset_multiple::<_, _, _, ()>(&hkey, &[("data", value), ("updated_at", now.as_str())])
        .await?;
    Ok(())
}

/// Delete a blob. Deleting a missing blob is not an error.
pub async fn delete_blob(pool: &RedisPool, namespace: &str, key: &str) -> RedisResult<()> {
    let mut conn = pool.clone();
    conn.del::<_, ()>(blob_key(namespace, key)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_key_layout() {
        assert_eq!(blob_key("default", "widgetSettings"), "devhub:default:blob:widgetSettings");
        assert_eq!(blob_key("team-a", "widgetSettings"), "devhub:team-a:blob:widgetSettings");
    }
}
