//! Assembles a validated draft into a publishable `Property`.
//!
//! Assembly runs inside `begin_submit`, after every planned step has
//! validated, and is pure apart from the timestamps and the fresh id of a
//! create-mode listing. A required field missing at this point means the
//! rule set and the assembler disagree about what "complete" means; that
//! surfaces as [`WizardError::MissingField`] instead of a panic.

use chrono::Utc;

use rentora_types::draft::PropertyDraft;
use rentora_types::property::{
    Basics, Financials, InvestmentTerms, ListingStatus, Location, ProjectTimeline, Property,
    PropertyId, Terms,
};
use rentora_types::role::Role;
use rentora_types::step::StepId;

use super::error::WizardError;
use super::session::ListingOrigin;

fn require<T>(value: Option<T>, step: StepId, field: &'static str) -> Result<T, WizardError> {
    value.ok_or(WizardError::MissingField { step, field })
}

/// Build the publishable listing from the accumulated draft.
///
/// `origin` carries identity over from the listing an edit session was
/// seeded from; create-mode sessions pass `None` and get a fresh id, a
/// fresh creation time, and `Available` status.
pub fn assemble(
    role: Role,
    draft: &PropertyDraft,
    origin: Option<&ListingOrigin>,
) -> Result<Property, WizardError> {
    let basics = Basics {
        title: require(draft.basics.title.clone(), StepId::Basics, "title")?,
        summary: require(draft.basics.summary.clone(), StepId::Basics, "summary")?,
        property_type: require(
            draft.basics.property_type.clone(),
            StepId::Basics,
            "property_type",
        )?,
        bedrooms: require(draft.basics.bedrooms, StepId::Basics, "bedrooms")?,
        bathrooms: require(draft.basics.bathrooms, StepId::Basics, "bathrooms")?,
        furnished: draft.basics.furnished.unwrap_or(false),
        amenities: draft.basics.amenities.clone().unwrap_or_default(),
        agency: draft.basics.agency.clone(),
        owner_contact: draft.basics.owner_contact.clone(),
    };

    let location = Location {
        address_line: require(
            draft.location.address_line.clone(),
            StepId::Location,
            "address_line",
        )?,
        city: require(draft.location.city.clone(), StepId::Location, "city")?,
        region: draft.location.region.clone(),
        postal_code: draft.location.postal_code.clone(),
        country: require(draft.location.country.clone(), StepId::Location, "country")?,
    };

    let media = draft.media.items.clone().unwrap_or_default();
    if media.is_empty() {
        return Err(WizardError::MissingField {
            step: StepId::Media,
            field: "media",
        });
    }

    let terms = match role {
        Role::Landlord | Role::Agent | Role::Caretaker => Terms::Rental(Financials {
            rent: require(draft.financials.rent, StepId::Financials, "rent")?,
            deposit: require(draft.financials.deposit, StepId::Financials, "deposit")?,
            billing: require(
                draft.financials.billing.clone(),
                StepId::Financials,
                "billing",
            )?,
            utilities_included: draft.financials.utilities_included.unwrap_or(false),
            service_charge: draft.financials.service_charge,
        }),
        Role::Developer => Terms::Development {
            timeline: ProjectTimeline {
                project_name: require(
                    draft.timeline.project_name.clone(),
                    StepId::ProjectTimeline,
                    "project_name",
                )?,
                start: require(draft.timeline.start, StepId::ProjectTimeline, "start")?,
                expected_completion: require(
                    draft.timeline.expected_completion,
                    StepId::ProjectTimeline,
                    "expected_completion",
                )?,
                phases: draft.timeline.phases.clone().unwrap_or_default(),
            },
            investment: InvestmentTerms {
                minimum_investment: require(
                    draft.investment.minimum_investment,
                    StepId::InvestmentTerms,
                    "minimum_investment",
                )?,
                projected_yield_pct: require(
                    draft.investment.projected_yield_pct,
                    StepId::InvestmentTerms,
                    "projected_yield_pct",
                )?,
                payout: require(
                    draft.investment.payout.clone(),
                    StepId::InvestmentTerms,
                    "payout",
                )?,
            },
        },
    };

    let now = Utc::now();
    let (id, status, created_at) = match origin {
        Some(origin) => (origin.id.clone(), origin.status.clone(), origin.created_at),
        None => (PropertyId::new(), ListingStatus::Available, now),
    };

    Ok(Property {
        id,
        listed_by_role: role,
        status,
        basics,
        location,
        media,
        terms,
        created_at,
        updated_at: now,
    })
}

/// Format an amount in minor currency units as "1450.00".
pub fn format_money(minor: u64) -> String {
    format!("{}.{:02}", minor / 100, minor % 100)
}

/// Format a human-readable listing summary for CLI display.
pub fn format_listing_summary(property: &Property) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", property.basics.title));
    output.push_str(&format!("ID:       {}\n", property.id));
    output.push_str(&format!("Role:     {}\n", property.listed_by_role));
    output.push_str(&format!("Status:   {}\n", property.status));
    output.push_str(&format!(
        "Type:     {}, {} bed / {} bath{}\n",
        property.basics.property_type,
        property.basics.bedrooms,
        property.basics.bathrooms,
        if property.basics.furnished {
            ", furnished"
        } else {
            ""
        },
    ));
    output.push_str(&format!(
        "Address:  {}, {}, {}\n",
        property.location.address_line, property.location.city, property.location.country
    ));

    match &property.terms {
        Terms::Rental(financials) => {
            output.push_str(&format!(
                "Terms:    {} rent ({}), {} deposit\n",
                format_money(financials.rent),
                financials.billing,
                format_money(financials.deposit),
            ));
            if let Some(service_charge) = financials.service_charge {
                output.push_str(&format!(
                    "          service charge {}\n",
                    format_money(service_charge)
                ));
            }
        }
        Terms::Development {
            timeline,
            investment,
        } => {
            output.push_str(&format!(
                "Project:  {} ({} to {})\n",
                timeline.project_name, timeline.start, timeline.expected_completion
            ));
            output.push_str(&format!(
                "Invest:   from {}, {:.1}% projected yield, paid {}\n",
                format_money(investment.minimum_investment),
                investment.projected_yield_pct,
                investment.payout,
            ));
        }
    }

    output.push_str(&format!(
        "Media:    {} item{}\n",
        property.media.len(),
        if property.media.len() == 1 { "" } else { "s" }
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rentora_types::draft::{BasicsDraft, FinancialsDraft, LocationDraft, MediaDraft};
    use rentora_types::property::{BillingPeriod, MediaItem, MediaKind, PropertyType};

    fn rental_draft() -> PropertyDraft {
        PropertyDraft {
            basics: BasicsDraft {
                title: Some("Corner studio".to_string()),
                summary: Some("Compact and central".to_string()),
                property_type: Some(PropertyType::Studio),
                bedrooms: Some(0),
                bathrooms: Some(1),
                furnished: Some(true),
                amenities: None,
                agency: None,
                owner_contact: None,
            },
            location: LocationDraft {
                address_line: Some("3 Mill Lane".to_string()),
                city: Some("Leeds".to_string()),
                region: None,
                postal_code: None,
                country: Some("UK".to_string()),
            },
            financials: FinancialsDraft {
                rent: Some(825_00),
                deposit: Some(900_00),
                billing: Some(BillingPeriod::Monthly),
                utilities_included: Some(true),
                service_charge: None,
            },
            media: MediaDraft {
                items: Some(vec![MediaItem {
                    url: "https://img.example/studio.jpg".to_string(),
                    kind: MediaKind::Photo,
                    caption: None,
                }]),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_assemble_rental() {
        let property = assemble(Role::Landlord, &rental_draft(), None).unwrap();
        assert_eq!(property.basics.title, "Corner studio");
        assert_eq!(property.status, ListingStatus::Available);
        assert_eq!(property.terms.rent(), Some(825_00));
        assert_eq!(property.created_at, property.updated_at);
    }

    #[test]
    fn test_assemble_missing_rent() {
        let mut draft = rental_draft();
        draft.financials.rent = None;
        let err = assemble(Role::Landlord, &draft, None).unwrap_err();
        assert_eq!(
            err,
            WizardError::MissingField {
                step: StepId::Financials,
                field: "rent",
            }
        );
    }

    #[test]
    fn test_assemble_missing_media() {
        let mut draft = rental_draft();
        draft.media.items = Some(vec![]);
        let err = assemble(Role::Landlord, &draft, None).unwrap_err();
        assert_eq!(
            err,
            WizardError::MissingField {
                step: StepId::Media,
                field: "media",
            }
        );
    }

    #[test]
    fn test_assemble_carries_origin_identity() {
        let original = assemble(Role::Landlord, &rental_draft(), None).unwrap();
        let origin = ListingOrigin {
            id: original.id.clone(),
            status: ListingStatus::Let,
            created_at: original.created_at,
        };
        let updated = assemble(Role::Landlord, &rental_draft(), Some(&origin)).unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.status, ListingStatus::Let);
        assert_eq!(updated.created_at, original.created_at);
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(0), "0.00");
        assert_eq!(format_money(5), "0.05");
        assert_eq!(format_money(825_00), "825.00");
        assert_eq!(format_money(1_450_50), "1450.50");
    }

    #[test]
    fn test_format_listing_summary() {
        let property = assemble(Role::Landlord, &rental_draft(), None).unwrap();
        let summary = format_listing_summary(&property);
        assert!(summary.contains("Corner studio"), "missing title:\n{summary}");
        assert!(summary.contains("studio, 0 bed / 1 bath"), "missing type line:\n{summary}");
        assert!(summary.contains("825.00 rent (monthly)"), "missing terms:\n{summary}");
        assert!(summary.contains("Media:    1 item\n"), "missing media count:\n{summary}");
    }
}
