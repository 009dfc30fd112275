use std::{
    io,
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// Every operation re-reads the whole file, so callers always observe the
/// latest durable state. Nothing is cached between calls. A missing file is
/// treated as an empty collection and written out on first access.
///
/// Load-mutate-persist cycles are serialized per instance. Writers in other
/// processes are not coordinated with.
pub struct JsonListStore<T> {
    file_path: PathBuf,
    lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Bind the store to a path. No I/O happens until the first operation.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), lock: Mutex::new(()), _marker: PhantomData }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the full collection, initializing an empty file if none exists.
    pub async fn list(&self) -> Result<Vec<T>, ServiceError> {
        let _guard = self.lock.lock().await;
        self.load().await
    }

    /// Load the collection, hand it to `f`, and persist it if `f` succeeds.
    ///
    /// When `f` returns an error nothing is written.
    pub async fn update_list<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.load().await?;
        let out = f(&mut items)?;
        self.persist(&items).await?;
        Ok(out)
    }

    async fn load(&self) -> Result<Vec<T>, ServiceError> {
        match fs::read(&self.file_path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.file_path.display(), "backing file missing, writing empty collection");
                self.persist(&[]).await?;
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self, items: &[T]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_vec_pretty(items)?;
        fs::write(&self.file_path, data).await?;
        debug!(path = %self.file_path.display(), count = items.len(), "collection persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("json_list_store_{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[tokio::test]
    async fn missing_file_is_initialized_empty() -> Result<(), anyhow::Error> {
        let path = temp_path("nested/items.json");
        let store = JsonListStore::<String>::new(&path);

        assert!(!path.exists());
        assert!(store.list().await?.is_empty());
        assert!(path.exists());
        assert_eq!(tokio::fs::read_to_string(&path).await?, "[]");

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap().parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_list_persists_pretty_json_in_order() -> Result<(), anyhow::Error> {
        let path = temp_path("items.json");
        let store = JsonListStore::<String>::new(&path);

        store.update_list(|v| { v.push("b".into()); Ok(()) }).await?;
        let len = store.update_list(|v| { v.push("a".into()); Ok(v.len()) }).await?;
        assert_eq!(len, 2);

        let raw = tokio::fs::read_to_string(&path).await?;
        assert_eq!(raw, "[\n  \"b\",\n  \"a\"\n]");

        // a fresh instance sees the same durable state
        let reopened = JsonListStore::<String>::new(&path);
        assert_eq!(reopened.list().await?, vec!["b".to_string(), "a".to_string()]);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_mutation_leaves_file_untouched() -> Result<(), anyhow::Error> {
        let path = temp_path("items.json");
        let store = JsonListStore::<String>::new(&path);
        store.update_list(|v| { v.push("keep".into()); Ok(()) }).await?;
        let before = tokio::fs::read(&path).await?;

        let res: Result<(), _> = store
            .update_list(|v| {
                v.clear();
                Err(ServiceError::not_found("item"))
            })
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read(&path).await?, before);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() -> Result<(), anyhow::Error> {
        let path = temp_path("items.json");
        tokio::fs::create_dir_all(path.parent().unwrap()).await?;
        tokio::fs::write(&path, b"{not json").await?;

        let store = JsonListStore::<String>::new(&path);
        assert!(matches!(store.list().await, Err(ServiceError::Serialization(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_path_is_a_storage_error() -> Result<(), anyhow::Error> {
        // the backing path is a directory, so reading it fails with something other than NotFound
        let dir = temp_path("as_dir");
        tokio::fs::create_dir_all(&dir).await?;

        let store = JsonListStore::<String>::new(&dir);
        assert!(matches!(store.list().await, Err(ServiceError::Storage(_))));

        let _ = tokio::fs::remove_dir_all(dir.parent().unwrap()).await;
        Ok(())
    }
}
