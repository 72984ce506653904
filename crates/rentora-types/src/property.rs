use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::role::Role;

/// Unique identifier for a listed property, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub Uuid);

impl PropertyId {
    /// Create a new PropertyId using UUID v7 (time-sortable, guaranteed ordering).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a PropertyId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PropertyId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PropertyId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Built form of the property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Townhouse,
    Commercial,
}

impl PropertyType {
    /// All property types, in display order.
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Studio,
        PropertyType::Townhouse,
        PropertyType::Commercial,
    ];
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyType::Apartment => write!(f, "apartment"),
            PropertyType::House => write!(f, "house"),
            PropertyType::Studio => write!(f, "studio"),
            PropertyType::Townhouse => write!(f, "townhouse"),
            PropertyType::Commercial => write!(f, "commercial"),
        }
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "apartment" => Ok(PropertyType::Apartment),
            "house" => Ok(PropertyType::House),
            "studio" => Ok(PropertyType::Studio),
            "townhouse" => Ok(PropertyType::Townhouse),
            "commercial" => Ok(PropertyType::Commercial),
            other => Err(format!("invalid property type: '{other}'")),
        }
    }
}

/// Listing lifecycle states.
///
/// - Available: live on the marketplace
/// - Let: tenancy agreed, hidden from default searches
/// - Archived: withdrawn by the lister, data preserved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Available,
    Let,
    Archived,
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListingStatus::Available => write!(f, "available"),
            ListingStatus::Let => write!(f, "let"),
            ListingStatus::Archived => write!(f, "archived"),
        }
    }
}

impl FromStr for ListingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "available" => Ok(ListingStatus::Available),
            "let" => Ok(ListingStatus::Let),
            "archived" => Ok(ListingStatus::Archived),
            other => Err(format!("invalid listing status: '{other}'")),
        }
    }
}

impl Default for ListingStatus {
    fn default() -> Self {
        ListingStatus::Available
    }
}

/// How often rent falls due.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingPeriod {
    Monthly,
    Quarterly,
    Annually,
}

impl BillingPeriod {
    /// All billing periods, in display order.
    pub const ALL: [BillingPeriod; 3] = [
        BillingPeriod::Monthly,
        BillingPeriod::Quarterly,
        BillingPeriod::Annually,
    ];
}

impl fmt::Display for BillingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BillingPeriod::Monthly => write!(f, "monthly"),
            BillingPeriod::Quarterly => write!(f, "quarterly"),
            BillingPeriod::Annually => write!(f, "annually"),
        }
    }
}

impl FromStr for BillingPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(BillingPeriod::Monthly),
            "quarterly" => Ok(BillingPeriod::Quarterly),
            "annually" => Ok(BillingPeriod::Annually),
            other => Err(format!("invalid billing period: '{other}'")),
        }
    }
}

impl Default for BillingPeriod {
    fn default() -> Self {
        BillingPeriod::Monthly
    }
}

/// How investor returns are paid out on a development listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutSchedule {
    Monthly,
    Quarterly,
    Annually,
}

impl PayoutSchedule {
    /// All payout schedules, in display order.
    pub const ALL: [PayoutSchedule; 3] = [
        PayoutSchedule::Monthly,
        PayoutSchedule::Quarterly,
        PayoutSchedule::Annually,
    ];
}

impl fmt::Display for PayoutSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayoutSchedule::Monthly => write!(f, "monthly"),
            PayoutSchedule::Quarterly => write!(f, "quarterly"),
            PayoutSchedule::Annually => write!(f, "annually"),
        }
    }
}

impl FromStr for PayoutSchedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(PayoutSchedule::Monthly),
            "quarterly" => Ok(PayoutSchedule::Quarterly),
            "annually" => Ok(PayoutSchedule::Annually),
            other => Err(format!("invalid payout schedule: '{other}'")),
        }
    }
}

impl Default for PayoutSchedule {
    fn default() -> Self {
        PayoutSchedule::Quarterly
    }
}

/// Kind of media attachment on a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MediaKind {
    Photo,
    FloorPlan,
    Video,
}

impl MediaKind {
    /// All media kinds, in display order.
    pub const ALL: [MediaKind; 3] = [MediaKind::Photo, MediaKind::FloorPlan, MediaKind::Video];
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Photo => write!(f, "photo"),
            MediaKind::FloorPlan => write!(f, "floor-plan"),
            MediaKind::Video => write!(f, "video"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "photo" => Ok(MediaKind::Photo),
            "floor-plan" => Ok(MediaKind::FloorPlan),
            "video" => Ok(MediaKind::Video),
            other => Err(format!("invalid media kind: '{other}'")),
        }
    }
}

impl Default for MediaKind {
    fn default() -> Self {
        MediaKind::Photo
    }
}

/// One media attachment (photo, floor plan, or video) on a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    pub caption: Option<String>,
}

/// Agency identification, required on agent listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyDetails {
    pub agency_name: String,
    pub licence_number: String,
}

/// Owner contact details, required on caretaker listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnerContact {
    pub name: String,
    pub phone: String,
}

/// Descriptive facts about the property itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basics {
    pub title: String,
    pub summary: String,
    pub property_type: PropertyType,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub furnished: bool,
    pub amenities: Vec<String>,
    /// Present on agent listings.
    pub agency: Option<AgencyDetails>,
    /// Present on caretaker listings.
    pub owner_contact: Option<OwnerContact>,
}

/// Where the property is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub address_line: String,
    pub city: String,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: String,
}

/// Rental commercial terms. Amounts are in minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Financials {
    pub rent: u64,
    pub deposit: u64,
    pub billing: BillingPeriod,
    pub utilities_included: bool,
    pub service_charge: Option<u64>,
}

/// Delivery schedule for a development project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectTimeline {
    pub project_name: String,
    pub start: NaiveDate,
    pub expected_completion: NaiveDate,
    pub phases: Vec<String>,
}

/// Investor-facing terms for a development project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentTerms {
    pub minimum_investment: u64,
    pub projected_yield_pct: f64,
    pub payout: PayoutSchedule,
}

/// Commercial terms of a listing. Which variant applies is fixed by the
/// listing role: developer listings carry `Development`, all other roles
/// carry `Rental`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Terms {
    Rental(Financials),
    Development {
        timeline: ProjectTimeline,
        investment: InvestmentTerms,
    },
}

impl Terms {
    /// Monthly-equivalent asking rent, if this is a rental listing.
    pub fn rent(&self) -> Option<u64> {
        match self {
            Terms::Rental(financials) => Some(financials.rent),
            Terms::Development { .. } => None,
        }
    }
}

/// A published property listing.
///
/// Produced exclusively by the wizard assembler: a `Property` only exists
/// once every step of its wizard session validated, so downstream code can
/// rely on the required fields being populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    /// Role the listing was created under; fixes the `Terms` variant.
    pub listed_by_role: Role,
    pub status: ListingStatus,
    pub basics: Basics,
    pub location: Location,
    pub media: Vec<MediaItem>,
    pub terms: Terms,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_id_display() {
        let id = PropertyId::new();
        let s = id.to_string();
        let parsed: PropertyId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_property_type_roundtrip() {
        for kind in PropertyType::ALL {
            let s = kind.to_string();
            let parsed: PropertyType = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_listing_status_roundtrip() {
        for status in [
            ListingStatus::Available,
            ListingStatus::Let,
            ListingStatus::Archived,
        ] {
            let s = status.to_string();
            let parsed: ListingStatus = s.parse().unwrap();
            assert_eq!(status, parsed);
        }
    }

    #[test]
    fn test_media_kind_roundtrip() {
        for kind in MediaKind::ALL {
            let s = kind.to_string();
            let parsed: MediaKind = s.parse().unwrap();
            assert_eq!(kind, parsed);
        }
    }

    #[test]
    fn test_terms_rent_by_variant() {
        let rental = Terms::Rental(Financials {
            rent: 1_200_00,
            deposit: 1_200_00,
            billing: BillingPeriod::Monthly,
            utilities_included: false,
            service_charge: None,
        });
        assert_eq!(rental.rent(), Some(1_200_00));

        let development = Terms::Development {
            timeline: ProjectTimeline {
                project_name: "Riverside Quarter".to_string(),
                start: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
                expected_completion: NaiveDate::from_ymd_opt(2028, 9, 1).unwrap(),
                phases: vec!["groundworks".to_string(), "fit-out".to_string()],
            },
            investment: InvestmentTerms {
                minimum_investment: 25_000_00,
                projected_yield_pct: 6.5,
                payout: PayoutSchedule::Quarterly,
            },
        };
        assert_eq!(development.rent(), None);
    }

    #[test]
    fn test_terms_serde_tagged() {
        let development = Terms::Development {
            timeline: ProjectTimeline {
                project_name: "Harbour Walk".to_string(),
                start: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
                expected_completion: NaiveDate::from_ymd_opt(2027, 6, 30).unwrap(),
                phases: vec![],
            },
            investment: InvestmentTerms {
                minimum_investment: 10_000_00,
                projected_yield_pct: 5.0,
                payout: PayoutSchedule::Annually,
            },
        };
        let json = serde_json::to_string(&development).unwrap();
        assert!(json.contains("\"kind\":\"development\""));
        let back: Terms = serde_json::from_str(&json).unwrap();
        assert_eq!(back, development);
    }
}
