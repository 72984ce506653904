//! Marketplace search service.

use rentora_types::error::RepositoryError;
use rentora_types::property::{ListingStatus, Property, PropertyId};

use crate::repository::property::{ListingFilter, PropertyRepository};

/// Read-side service over published listings.
pub struct MarketplaceService<R: PropertyRepository> {
    repo: R,
}

impl<R: PropertyRepository> MarketplaceService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Run a filtered search.
    ///
    /// A filter without an explicit status searches available listings
    /// only. A search that matches nothing returns an empty result --
    /// never a fallback to the full inventory.
    pub async fn search(
        &self,
        filter: ListingFilter,
    ) -> Result<Vec<Property>, RepositoryError> {
        let filter = ListingFilter {
            status: filter.status.or(Some(ListingStatus::Available)),
            ..filter
        };
        let results = self.repo.list(Some(filter)).await?;
        tracing::debug!(count = results.len(), "marketplace search");
        Ok(results)
    }

    /// Count the listings a filter matches, ignoring pagination.
    ///
    /// Applies the same status defaulting as [`search`](Self::search).
    pub async fn count(&self, filter: ListingFilter) -> Result<usize, RepositoryError> {
        let filter = ListingFilter {
            limit: None,
            offset: None,
            ..filter
        };
        Ok(self.search(filter).await?.len())
    }

    /// Fetch one listing by id, whatever its status.
    pub async fn get(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        self.repo.get_by_id(id).await
    }

    /// Remove a listing permanently.
    pub async fn remove(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        self.repo.delete(id).await?;
        tracing::info!(listing = %id, "listing deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    use chrono::Utc;
    use rentora_types::property::{
        Basics, BillingPeriod, Financials, Location, PropertyType, Terms,
    };
    use rentora_types::role::Role;

    struct MockRepo {
        listings: Mutex<HashMap<PropertyId, Property>>,
    }

    impl MockRepo {
        fn with(listings: Vec<Property>) -> Self {
            Self {
                listings: Mutex::new(
                    listings
                        .into_iter()
                        .map(|p| (p.id.clone(), p))
                        .collect(),
                ),
            }
        }
    }

    impl PropertyRepository for MockRepo {
        fn create(
            &self,
            property: &Property,
        ) -> impl Future<Output = Result<Property, RepositoryError>> + Send {
            self.listings
                .lock()
                .unwrap()
                .insert(property.id.clone(), property.clone());
            let stored = property.clone();
            async move { Ok(stored) }
        }

        fn get_by_id(
            &self,
            id: &PropertyId,
        ) -> impl Future<Output = Result<Option<Property>, RepositoryError>> + Send {
            let found = self.listings.lock().unwrap().get(id).cloned();
            async move { Ok(found) }
        }

        fn list(
            &self,
            filter: Option<ListingFilter>,
        ) -> impl Future<Output = Result<Vec<Property>, RepositoryError>> + Send {
            let all: Vec<Property> = self.listings.lock().unwrap().values().cloned().collect();
            let result = filter.unwrap_or_default().apply(all);
            async move { Ok(result) }
        }

        fn update(
            &self,
            property: &Property,
        ) -> impl Future<Output = Result<Property, RepositoryError>> + Send {
            self.listings
                .lock()
                .unwrap()
                .insert(property.id.clone(), property.clone());
            let stored = property.clone();
            async move { Ok(stored) }
        }

        fn delete(
            &self,
            id: &PropertyId,
        ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
            self.listings.lock().unwrap().remove(id);
            async move { Ok(()) }
        }
    }

    fn listing(city: &str, status: ListingStatus) -> Property {
        let now = Utc::now();
        Property {
            id: PropertyId::new(),
            listed_by_role: Role::Landlord,
            status,
            basics: Basics {
                title: format!("Flat in {city}"),
                summary: "Test".to_string(),
                property_type: PropertyType::Apartment,
                bedrooms: 2,
                bathrooms: 1,
                furnished: true,
                amenities: vec![],
                agency: None,
                owner_contact: None,
            },
            location: Location {
                address_line: "1 High Street".to_string(),
                city: city.to_string(),
                region: None,
                postal_code: None,
                country: "UK".to_string(),
            },
            media: vec![],
            terms: Terms::Rental(Financials {
                rent: 1_000_00,
                deposit: 1_000_00,
                billing: BillingPeriod::Monthly,
                utilities_included: false,
                service_charge: None,
            }),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_search_defaults_to_available() {
        let repo = MockRepo::with(vec![
            listing("Bristol", ListingStatus::Available),
            listing("Bristol", ListingStatus::Let),
            listing("Bristol", ListingStatus::Archived),
        ]);
        let service = MarketplaceService::new(repo);

        let results = service.search(ListingFilter::default()).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ListingStatus::Available);
    }

    #[tokio::test]
    async fn test_search_explicit_status_wins() {
        let repo = MockRepo::with(vec![
            listing("Bristol", ListingStatus::Available),
            listing("Bristol", ListingStatus::Let),
        ]);
        let service = MarketplaceService::new(repo);

        let filter = ListingFilter {
            status: Some(ListingStatus::Let),
            ..Default::default()
        };
        let results = service.search(filter).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, ListingStatus::Let);
    }

    #[tokio::test]
    async fn test_search_no_match_returns_empty() {
        let repo = MockRepo::with(vec![
            listing("Bristol", ListingStatus::Available),
            listing("Leeds", ListingStatus::Available),
        ]);
        let service = MarketplaceService::new(repo);

        let filter = ListingFilter {
            city: Some("Aberdeen".to_string()),
            ..Default::default()
        };
        let results = service.search(filter).await.unwrap();
        assert!(results.is_empty(), "no-match search must stay empty");
    }

    #[tokio::test]
    async fn test_count_ignores_pagination() {
        let repo = MockRepo::with(vec![
            listing("Bristol", ListingStatus::Available),
            listing("Bristol", ListingStatus::Available),
            listing("Bristol", ListingStatus::Available),
        ]);
        let service = MarketplaceService::new(repo);

        let filter = ListingFilter {
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(service.count(filter).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_get_finds_any_status() {
        let archived = listing("Bristol", ListingStatus::Archived);
        let id = archived.id.clone();
        let service = MarketplaceService::new(MockRepo::with(vec![archived]));

        let found = service.get(&id).await.unwrap();
        assert!(found.is_some());
    }
}
