//! Demo listing fixtures.
//!
//! A small set of listings covering every role, both terms variants and
//! all three statuses, seeded into an empty store so a fresh install has
//! something to browse.

use chrono::{Duration, NaiveDate, Utc};

use rentora_core::repository::property::PropertyRepository;
use rentora_types::error::RepositoryError;
use rentora_types::property::{
    AgencyDetails, Basics, BillingPeriod, Financials, InvestmentTerms, ListingStatus, Location,
    MediaItem, MediaKind, OwnerContact, PayoutSchedule, ProjectTimeline, Property, PropertyId,
    PropertyType, Terms,
};
use rentora_types::role::Role;

fn photo(url: &str, caption: &str) -> MediaItem {
    MediaItem {
        url: url.to_string(),
        kind: MediaKind::Photo,
        caption: Some(caption.to_string()),
    }
}

/// Build the demo set. Content is fixed; ids and timestamps are fresh
/// per call, with creation dates staggered one day apart so the default
/// newest-first sort is stable.
pub fn demo_listings() -> Vec<Property> {
    let now = Utc::now();
    let stamp = |days_ago: i64| now - Duration::days(days_ago);

    vec![
        Property {
            id: PropertyId::new(),
            listed_by_role: Role::Landlord,
            status: ListingStatus::Available,
            basics: Basics {
                title: "Bright two-bed flat near Harbourside".to_string(),
                summary: "Recently refurbished apartment with open-plan living \
                          and a short walk to the waterfront."
                    .to_string(),
                property_type: PropertyType::Apartment,
                bedrooms: 2,
                bathrooms: 1,
                furnished: true,
                amenities: vec!["balcony".to_string(), "dishwasher".to_string()],
                agency: None,
                owner_contact: None,
            },
            location: Location {
                address_line: "14 Anchor Road".to_string(),
                city: "Bristol".to_string(),
                region: Some("South West".to_string()),
                postal_code: Some("BS1 5DB".to_string()),
                country: "UK".to_string(),
            },
            media: vec![
                photo("https://media.rentora.dev/demo/bristol-01.jpg", "Living room"),
                photo("https://media.rentora.dev/demo/bristol-02.jpg", "Balcony view"),
            ],
            terms: Terms::Rental(Financials {
                rent: 145_000,
                deposit: 167_000,
                billing: BillingPeriod::Monthly,
                utilities_included: false,
                service_charge: None,
            }),
            created_at: stamp(0),
            updated_at: stamp(0),
        },
        Property {
            id: PropertyId::new(),
            listed_by_role: Role::Landlord,
            status: ListingStatus::Let,
            basics: Basics {
                title: "Compact studio in the city centre".to_string(),
                summary: "Self-contained studio above the arcades, ideal for a \
                          single professional."
                    .to_string(),
                property_type: PropertyType::Studio,
                bedrooms: 1,
                bathrooms: 1,
                furnished: true,
                amenities: vec!["bills included".to_string()],
                agency: None,
                owner_contact: None,
            },
            location: Location {
                address_line: "3 Queen Victoria Street".to_string(),
                city: "Leeds".to_string(),
                region: Some("West Yorkshire".to_string()),
                postal_code: Some("LS1 6BE".to_string()),
                country: "UK".to_string(),
            },
            media: vec![photo(
                "https://media.rentora.dev/demo/leeds-01.jpg",
                "Studio interior",
            )],
            terms: Terms::Rental(Financials {
                rent: 82_500,
                deposit: 95_000,
                billing: BillingPeriod::Monthly,
                utilities_included: true,
                service_charge: None,
            }),
            created_at: stamp(1),
            updated_at: stamp(1),
        },
        Property {
            id: PropertyId::new(),
            listed_by_role: Role::Agent,
            status: ListingStatus::Available,
            basics: Basics {
                title: "Four-bed family house with garden".to_string(),
                summary: "Detached house in a quiet crescent, managed end to \
                          end by Northgate Lettings."
                    .to_string(),
                property_type: PropertyType::House,
                bedrooms: 4,
                bathrooms: 2,
                furnished: false,
                amenities: vec![
                    "garden".to_string(),
                    "driveway".to_string(),
                    "garage".to_string(),
                ],
                agency: Some(AgencyDetails {
                    agency_name: "Northgate Lettings".to_string(),
                    licence_number: "NGL-2209".to_string(),
                }),
                owner_contact: None,
            },
            location: Location {
                address_line: "27 Heaton Crescent".to_string(),
                city: "Manchester".to_string(),
                region: Some("Greater Manchester".to_string()),
                postal_code: Some("M20 4RB".to_string()),
                country: "UK".to_string(),
            },
            media: vec![
                photo("https://media.rentora.dev/demo/manchester-01.jpg", "Front aspect"),
                photo("https://media.rentora.dev/demo/manchester-02.jpg", "Garden"),
                MediaItem {
                    url: "https://media.rentora.dev/demo/manchester-plan.png".to_string(),
                    kind: MediaKind::FloorPlan,
                    caption: None,
                },
            ],
            terms: Terms::Rental(Financials {
                rent: 210_000,
                deposit: 242_000,
                billing: BillingPeriod::Monthly,
                utilities_included: false,
                service_charge: Some(12_000),
            }),
            created_at: stamp(2),
            updated_at: stamp(2),
        },
        Property {
            id: PropertyId::new(),
            listed_by_role: Role::Caretaker,
            status: ListingStatus::Available,
            basics: Basics {
                title: "Three-bed apartment, caretaker managed".to_string(),
                summary: "Top-floor apartment listed on behalf of the owner; \
                          viewings arranged through the building caretaker."
                    .to_string(),
                property_type: PropertyType::Apartment,
                bedrooms: 3,
                bathrooms: 1,
                furnished: false,
                amenities: vec!["lift".to_string(), "secure entry".to_string()],
                agency: None,
                owner_contact: Some(OwnerContact {
                    name: "R. Okafor".to_string(),
                    phone: "+44 114 496 0203".to_string(),
                }),
            },
            location: Location {
                address_line: "Flat 12, Milton Works".to_string(),
                city: "Sheffield".to_string(),
                region: Some("South Yorkshire".to_string()),
                postal_code: Some("S3 8EN".to_string()),
                country: "UK".to_string(),
            },
            media: vec![photo(
                "https://media.rentora.dev/demo/sheffield-01.jpg",
                "Open-plan kitchen",
            )],
            terms: Terms::Rental(Financials {
                rent: 120_000,
                deposit: 138_000,
                billing: BillingPeriod::Monthly,
                utilities_included: false,
                service_charge: None,
            }),
            created_at: stamp(3),
            updated_at: stamp(3),
        },
        Property {
            id: PropertyId::new(),
            listed_by_role: Role::Developer,
            status: ListingStatus::Available,
            basics: Basics {
                title: "Foss Quarter build-to-rent development".to_string(),
                summary: "48-unit riverside development, phase one complete and \
                          open to investors."
                    .to_string(),
                property_type: PropertyType::Apartment,
                bedrooms: 2,
                bathrooms: 2,
                furnished: false,
                amenities: vec!["concierge".to_string(), "gym".to_string()],
                agency: None,
                owner_contact: None,
            },
            location: Location {
                address_line: "Foss Islands Road".to_string(),
                city: "York".to_string(),
                region: Some("North Yorkshire".to_string()),
                postal_code: Some("YO31 7UL".to_string()),
                country: "UK".to_string(),
            },
            media: vec![
                photo("https://media.rentora.dev/demo/york-01.jpg", "Riverside render"),
                MediaItem {
                    url: "https://media.rentora.dev/demo/york-tour.mp4".to_string(),
                    kind: MediaKind::Video,
                    caption: Some("Show apartment tour".to_string()),
                },
            ],
            terms: Terms::Development {
                timeline: ProjectTimeline {
                    project_name: "Foss Quarter".to_string(),
                    start: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
                    expected_completion: NaiveDate::from_ymd_opt(2027, 9, 1).unwrap_or_default(),
                    phases: vec![
                        "Groundworks".to_string(),
                        "Phase one handover".to_string(),
                        "Phase two handover".to_string(),
                    ],
                },
                investment: InvestmentTerms {
                    minimum_investment: 2_500_000,
                    projected_yield_pct: 6.2,
                    payout: PayoutSchedule::Quarterly,
                },
            },
            created_at: stamp(4),
            updated_at: stamp(4),
        },
        Property {
            id: PropertyId::new(),
            listed_by_role: Role::Landlord,
            status: ListingStatus::Archived,
            basics: Basics {
                title: "Regency townhouse, three floors".to_string(),
                summary: "Period townhouse close to the seafront. Withdrawn \
                          from the market pending renovation."
                    .to_string(),
                property_type: PropertyType::Townhouse,
                bedrooms: 3,
                bathrooms: 2,
                furnished: false,
                amenities: vec!["period features".to_string()],
                agency: None,
                owner_contact: None,
            },
            location: Location {
                address_line: "8 Clifton Terrace".to_string(),
                city: "Brighton".to_string(),
                region: Some("East Sussex".to_string()),
                postal_code: Some("BN1 3HA".to_string()),
                country: "UK".to_string(),
            },
            media: vec![photo(
                "https://media.rentora.dev/demo/brighton-01.jpg",
                "Street view",
            )],
            terms: Terms::Rental(Financials {
                rent: 187_500,
                deposit: 216_000,
                billing: BillingPeriod::Monthly,
                utilities_included: false,
                service_charge: None,
            }),
            created_at: stamp(5),
            updated_at: stamp(5),
        },
    ]
}

/// Seed the demo set into an empty store.
///
/// Returns how many listings were inserted; zero when the store already
/// holds anything.
pub async fn seed_if_empty<R: PropertyRepository>(repo: &R) -> Result<usize, RepositoryError> {
    if !repo.list(None).await?.is_empty() {
        return Ok(0);
    }
    let listings = demo_listings();
    let count = listings.len();
    for listing in &listings {
        repo.create(listing).await?;
    }
    tracing::info!(count, "seeded demo listings");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryPropertyRepository;

    #[test]
    fn test_demo_set_covers_roles_and_statuses() {
        let listings = demo_listings();
        for role in Role::ALL {
            assert!(
                listings.iter().any(|p| p.listed_by_role == role),
                "no demo listing for {role}"
            );
        }
        for status in [
            ListingStatus::Available,
            ListingStatus::Let,
            ListingStatus::Archived,
        ] {
            assert!(
                listings.iter().any(|p| p.status == status),
                "no demo listing with status {status}"
            );
        }
        assert!(listings
            .iter()
            .any(|p| matches!(p.terms, Terms::Development { .. })));
    }

    #[test]
    fn test_demo_listings_have_media() {
        for listing in demo_listings() {
            assert!(
                !listing.media.is_empty(),
                "demo listing '{}' has no media",
                listing.basics.title
            );
        }
    }

    #[tokio::test]
    async fn test_seed_if_empty_inserts_once() {
        let repo = InMemoryPropertyRepository::new();

        let seeded = seed_if_empty(&repo).await.unwrap();
        assert_eq!(seeded, demo_listings().len());

        let again = seed_if_empty(&repo).await.unwrap();
        assert_eq!(again, 0, "a non-empty store must not be reseeded");
    }
}
