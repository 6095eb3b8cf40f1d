//! Integration tests for the storage areas
//!
//! These tests drive every storage backend through the `StorageArea` trait
//! object, the same way the session store uses them.

use std::sync::Arc;

use common::{Entries, FileStorage, MemoryStorage, RedisConfig, RedisStorage, StorageArea};

async fn exercise(storage: Arc<dyn StorageArea>) -> Result<(), Box<dyn std::error::Error>> {
    storage.clear().await?;

    storage.set("token", "t-1").await?;
    storage.set("role", "EMPLOYEE").await?;
    storage.set("token", "t-2").await?;

    assert_eq!(storage.get("token").await?, Some("t-2".to_string()));
    assert_eq!(storage.get("role").await?, Some("EMPLOYEE".to_string()));
    assert_eq!(storage.get("username").await?, None);

    storage.remove("role").await?;
    assert_eq!(storage.get("role").await?, None);

    let mut login = Entries::new();
    login.insert("token".to_string(), "t-3".to_string());
    login.insert("loginTime".to_string(), "1000".to_string());
    storage.merge(login.clone()).await?;
    assert_eq!(storage.get("loginTime").await?, Some("1000".to_string()));

    storage.set("username", "stale").await?;
    storage.replace_all(login.clone()).await?;
    assert_eq!(storage.entries().await?, login, "replace_all kept an old key");

    storage.clear().await?;
    assert_eq!(storage.get("token").await?, None, "clear left a key behind");
    assert!(storage.entries().await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_memory_storage_contract() -> Result<(), Box<dyn std::error::Error>> {
    exercise(Arc::new(MemoryStorage::new())).await
}

#[tokio::test]
async fn test_file_storage_contract() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let storage = FileStorage::open(dir.path().join("area.json")).await?;
    exercise(Arc::new(storage)).await?;

    // A cleared area persists as an empty document
    let reopened = FileStorage::open(dir.path().join("area.json")).await?;
    assert_eq!(reopened.get("token").await?, None);
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_redis_storage_contract() -> Result<(), Box<dyn std::error::Error>> {
    let config = RedisConfig::from_env()?;
    let storage = RedisStorage::new(&config).await?;
    assert!(storage.health_check().await?, "Redis health check failed");
    exercise(Arc::new(storage)).await
}

#[tokio::test]
async fn test_file_storage_handles_share_one_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("area.json");
    let writer = FileStorage::open(&path).await?;
    let watcher = FileStorage::open(&path).await?;

    writer.set("token", "t-1").await?;
    writer.set("loginTime", "1000").await?;
    assert_eq!(watcher.get("loginTime").await?, Some("1000".to_string()));

    writer.set("loginTime", "2000").await?;
    assert_eq!(watcher.get("loginTime").await?, Some("2000".to_string()));

    watcher.clear().await?;
    assert_eq!(writer.get("token").await?, None);
    Ok(())
}
