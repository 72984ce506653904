//! Property repository trait definition and listing filter.

use rentora_types::error::RepositoryError;
use rentora_types::property::{ListingStatus, Property, PropertyId, PropertyType};

use std::fmt;
use std::str::FromStr;

use super::SortOrder;

/// Field to sort listings by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Rent,
    Bedrooms,
}

impl Default for SortField {
    fn default() -> Self {
        SortField::CreatedAt
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortField::CreatedAt => write!(f, "created"),
            SortField::UpdatedAt => write!(f, "updated"),
            SortField::Rent => write!(f, "rent"),
            SortField::Bedrooms => write!(f, "bedrooms"),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" | "created_at" => Ok(SortField::CreatedAt),
            "updated" | "updated_at" => Ok(SortField::UpdatedAt),
            "rent" => Ok(SortField::Rent),
            "bedrooms" | "beds" => Ok(SortField::Bedrooms),
            other => Err(format!("invalid sort field: '{other}'")),
        }
    }
}

/// Filter criteria for listing queries.
///
/// Every field is optional; an empty filter matches everything. Rent
/// bounds read the rental terms, so development listings (which have no
/// rent) never match a rent-bounded query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFilter {
    /// Case-insensitive city match.
    pub city: Option<String>,
    /// Filter by built form.
    pub property_type: Option<PropertyType>,
    /// Minimum asking rent, inclusive.
    pub min_rent: Option<u64>,
    /// Maximum asking rent, inclusive.
    pub max_rent: Option<u64>,
    /// Minimum number of bedrooms.
    pub min_bedrooms: Option<u8>,
    /// Filter by furnished state.
    pub furnished: Option<bool>,
    /// Filter by lifecycle status.
    pub status: Option<ListingStatus>,
    /// Field to sort by.
    pub sort_by: Option<SortField>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<usize>,
}

impl ListingFilter {
    /// Whether a single listing satisfies every present criterion.
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(city) = &self.city {
            if !property.location.city.eq_ignore_ascii_case(city) {
                return false;
            }
        }
        if let Some(kind) = &self.property_type {
            if property.basics.property_type != *kind {
                return false;
            }
        }
        let rent = property.terms.rent();
        if let Some(min_rent) = self.min_rent {
            match rent {
                Some(r) if r >= min_rent => {}
                _ => return false,
            }
        }
        if let Some(max_rent) = self.max_rent {
            match rent {
                Some(r) if r <= max_rent => {}
                _ => return false,
            }
        }
        if let Some(min_bedrooms) = self.min_bedrooms {
            if property.basics.bedrooms < min_bedrooms {
                return false;
            }
        }
        if let Some(furnished) = self.furnished {
            if property.basics.furnished != furnished {
                return false;
            }
        }
        if let Some(status) = &self.status {
            if property.status != *status {
                return false;
            }
        }
        true
    }

    /// Filter, sort, and paginate a full result set.
    ///
    /// Shared by the in-memory and file adapters so that query semantics
    /// cannot drift between backends. Listings without a rent sort as
    /// zero under the rent key.
    pub fn apply(&self, mut items: Vec<Property>) -> Vec<Property> {
        items.retain(|property| self.matches(property));

        let field = self.sort_by.clone().unwrap_or_default();
        let order = self.sort_order.clone().unwrap_or_default();
        items.sort_by(|a, b| {
            let ordering = match field {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortField::Rent => a
                    .terms
                    .rent()
                    .unwrap_or(0)
                    .cmp(&b.terms.rent().unwrap_or(0)),
                SortField::Bedrooms => a.basics.bedrooms.cmp(&b.basics.bedrooms),
            };
            match order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        items
            .into_iter()
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Repository trait for listing persistence.
///
/// Implementations live in rentora-infra (in-memory map, JSON file).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait PropertyRepository: Send + Sync {
    /// Store a new listing. Returns the stored listing.
    fn create(
        &self,
        property: &Property,
    ) -> impl std::future::Future<Output = Result<Property, RepositoryError>> + Send;

    /// Get a listing by its unique ID.
    fn get_by_id(
        &self,
        id: &PropertyId,
    ) -> impl std::future::Future<Output = Result<Option<Property>, RepositoryError>> + Send;

    /// List listings with optional filtering, sorting, and pagination.
    fn list(
        &self,
        filter: Option<ListingFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Property>, RepositoryError>> + Send;

    /// Replace an existing listing. Returns the updated listing.
    fn update(
        &self,
        property: &Property,
    ) -> impl std::future::Future<Output = Result<Property, RepositoryError>> + Send;

    /// Permanently delete a listing by ID.
    fn delete(
        &self,
        id: &PropertyId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
