//! In-memory property repository.
//!
//! Implements `PropertyRepository` from `rentora-core` over a concurrent
//! map. Volatile: every process start begins empty unless seeded. Used by
//! tests and by `storage.kind = "memory"`.

use std::sync::Arc;

use dashmap::DashMap;

use rentora_core::repository::property::{ListingFilter, PropertyRepository};
use rentora_types::error::RepositoryError;
use rentora_types::property::{Property, PropertyId};

/// Concurrent in-memory listing store. Cheap to clone, clones share state.
#[derive(Clone, Default)]
pub struct InMemoryPropertyRepository {
    listings: Arc<DashMap<PropertyId, Property>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PropertyRepository for InMemoryPropertyRepository {
    async fn create(&self, property: &Property) -> Result<Property, RepositoryError> {
        use dashmap::mapref::entry::Entry;
        match self.listings.entry(property.id.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "listing {} already exists",
                property.id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(property.clone());
                Ok(property.clone())
            }
        }
    }

    async fn get_by_id(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        Ok(self.listings.get(id).map(|entry| entry.value().clone()))
    }

    async fn list(
        &self,
        filter: Option<ListingFilter>,
    ) -> Result<Vec<Property>, RepositoryError> {
        let all: Vec<Property> = self
            .listings
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        Ok(filter.unwrap_or_default().apply(all))
    }

    async fn update(&self, property: &Property) -> Result<Property, RepositoryError> {
        match self.listings.get_mut(&property.id) {
            Some(mut entry) => {
                *entry = property.clone();
                Ok(property.clone())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        match self.listings.remove(id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound),
        }
    }
}
