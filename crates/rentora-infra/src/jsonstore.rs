//! JSON-file property repository.
//!
//! Persists the whole listing set as one pretty-printed JSON document
//! (`listings.json`) under the data directory. Reads are served from an
//! in-memory cache behind an async RwLock; every mutation rewrites the
//! file before returning.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;

use rentora_core::repository::property::{ListingFilter, PropertyRepository};
use rentora_types::error::RepositoryError;
use rentora_types::property::{Property, PropertyId};

#[derive(Debug)]
struct JsonStoreInner {
    path: PathBuf,
    cache: RwLock<HashMap<PropertyId, Property>>,
}

/// File-backed listing store. Clones share the same cache and file.
#[derive(Clone, Debug)]
pub struct JsonFilePropertyRepository {
    inner: Arc<JsonStoreInner>,
}

impl JsonFilePropertyRepository {
    /// Open the store at `path`, loading any existing document.
    ///
    /// A missing file is an empty store; a malformed one is an error, so
    /// a corrupt document is never silently overwritten.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();
        let listings = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str::<Vec<Property>>(&content).map_err(|err| {
                RepositoryError::Query(format!("malformed listings file: {err}"))
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(RepositoryError::Io(err.to_string())),
        };
        tracing::debug!(
            count = listings.len(),
            path = %path.display(),
            "opened listing store"
        );
        let cache = listings
            .into_iter()
            .map(|property| (property.id.clone(), property))
            .collect();
        Ok(Self {
            inner: Arc::new(JsonStoreInner {
                path,
                cache: RwLock::new(cache),
            }),
        })
    }

    /// Rewrite the whole document from the cache, oldest listing first.
    async fn persist(
        &self,
        cache: &HashMap<PropertyId, Property>,
    ) -> Result<(), RepositoryError> {
        let mut listings: Vec<&Property> = cache.values().collect();
        listings.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let json = serde_json::to_string_pretty(&listings)
            .map_err(|err| RepositoryError::Query(format!("serialize listings: {err}")))?;
        if let Some(parent) = self.inner.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| RepositoryError::Io(err.to_string()))?;
        }
        tokio::fs::write(&self.inner.path, json)
            .await
            .map_err(|err| RepositoryError::Io(err.to_string()))
    }
}

impl PropertyRepository for JsonFilePropertyRepository {
    async fn create(&self, property: &Property) -> Result<Property, RepositoryError> {
        let mut cache = self.inner.cache.write().await;
        if cache.contains_key(&property.id) {
            return Err(RepositoryError::Conflict(format!(
                "listing {} already exists",
                property.id
            )));
        }
        cache.insert(property.id.clone(), property.clone());
        // A failed write must not leave the cache ahead of the file.
        if let Err(err) = self.persist(&cache).await {
            cache.remove(&property.id);
            return Err(err);
        }
        Ok(property.clone())
    }

    async fn get_by_id(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self.inner.cache.read().await.get(id).cloned())
    }

    async fn list(
        &self,
        filter: Option<ListingFilter>,
    ) -> Result<Vec<Property>, RepositoryError> {
        let all: Vec<Property> = self.inner.cache.read().await.values().cloned().collect();
        Ok(filter.unwrap_or_default().apply(all))
    }

    async fn update(&self, property: &Property) -> Result<Property, RepositoryError> {
        let mut cache = self.inner.cache.write().await;
        let previous = match cache.get(&property.id) {
            Some(existing) => existing.clone(),
            None => return Err(RepositoryError::NotFound),
        };
        cache.insert(property.id.clone(), property.clone());
        if let Err(err) = self.persist(&cache).await {
            cache.insert(property.id.clone(), previous);
            return Err(err);
        }
        Ok(property.clone())
    }

    async fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        let mut cache = self.inner.cache.write().await;
        let removed = match cache.remove(id) {
            Some(removed) => removed,
            None => return Err(RepositoryError::NotFound),
        };
        if let Err(err) = self.persist(&cache).await {
            cache.insert(id.clone(), removed);
            return Err(err);
        }
        Ok(())
    }
}
