//! Draft accumulation for the listing wizard.
//!
//! Each wizard step edits one section of a [`PropertyDraft`]. Sections are
//! all-`Option` mirrors of their published counterparts: a `None` field has
//! never been provided, and merging a patch overwrites provided fields only
//! (per-field last-write-wins). The accumulated draft survives failed
//! validation and failed submission unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::property::{
    AgencyDetails, BillingPeriod, MediaItem, OwnerContact, PayoutSchedule, Property, PropertyType,
    Terms,
};
use crate::step::StepId;

/// Overwrite `dst` only when the patch actually provided a value.
fn overwrite<T>(dst: &mut Option<T>, src: Option<T>) {
    if src.is_some() {
        *dst = src;
    }
}

/// Draft of the basics section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicsDraft {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<u8>,
    pub bathrooms: Option<u8>,
    pub furnished: Option<bool>,
    pub amenities: Option<Vec<String>>,
    pub agency: Option<AgencyDetails>,
    pub owner_contact: Option<OwnerContact>,
}

impl BasicsDraft {
    pub fn merge(&mut self, patch: BasicsDraft) {
        overwrite(&mut self.title, patch.title);
        overwrite(&mut self.summary, patch.summary);
        overwrite(&mut self.property_type, patch.property_type);
        overwrite(&mut self.bedrooms, patch.bedrooms);
        overwrite(&mut self.bathrooms, patch.bathrooms);
        overwrite(&mut self.furnished, patch.furnished);
        overwrite(&mut self.amenities, patch.amenities);
        overwrite(&mut self.agency, patch.agency);
        overwrite(&mut self.owner_contact, patch.owner_contact);
    }
}

/// Draft of the location section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationDraft {
    pub address_line: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl LocationDraft {
    pub fn merge(&mut self, patch: LocationDraft) {
        overwrite(&mut self.address_line, patch.address_line);
        overwrite(&mut self.city, patch.city);
        overwrite(&mut self.region, patch.region);
        overwrite(&mut self.postal_code, patch.postal_code);
        overwrite(&mut self.country, patch.country);
    }
}

/// Draft of the rental financials section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialsDraft {
    pub rent: Option<u64>,
    pub deposit: Option<u64>,
    pub billing: Option<BillingPeriod>,
    pub utilities_included: Option<bool>,
    pub service_charge: Option<u64>,
}

impl FinancialsDraft {
    pub fn merge(&mut self, patch: FinancialsDraft) {
        overwrite(&mut self.rent, patch.rent);
        overwrite(&mut self.deposit, patch.deposit);
        overwrite(&mut self.billing, patch.billing);
        overwrite(&mut self.utilities_included, patch.utilities_included);
        overwrite(&mut self.service_charge, patch.service_charge);
    }
}

/// Draft of the media section. The item list is replaced wholesale: the
/// wizard edits the collection as one value, not item-by-item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDraft {
    pub items: Option<Vec<MediaItem>>,
}

impl MediaDraft {
    pub fn merge(&mut self, patch: MediaDraft) {
        overwrite(&mut self.items, patch.items);
    }
}

/// Draft of the project timeline section (developer listings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineDraft {
    pub project_name: Option<String>,
    pub start: Option<NaiveDate>,
    pub expected_completion: Option<NaiveDate>,
    pub phases: Option<Vec<String>>,
}

impl TimelineDraft {
    pub fn merge(&mut self, patch: TimelineDraft) {
        overwrite(&mut self.project_name, patch.project_name);
        overwrite(&mut self.start, patch.start);
        overwrite(&mut self.expected_completion, patch.expected_completion);
        overwrite(&mut self.phases, patch.phases);
    }
}

/// Draft of the investment terms section (developer listings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvestmentDraft {
    pub minimum_investment: Option<u64>,
    pub projected_yield_pct: Option<f64>,
    pub payout: Option<PayoutSchedule>,
}

impl InvestmentDraft {
    pub fn merge(&mut self, patch: InvestmentDraft) {
        overwrite(&mut self.minimum_investment, patch.minimum_investment);
        overwrite(&mut self.projected_yield_pct, patch.projected_yield_pct);
        overwrite(&mut self.payout, patch.payout);
    }
}

/// The full accumulated draft for one wizard session.
///
/// Holds every section regardless of role; sections outside the active
/// role's step sequence simply stay empty and are ignored at assembly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub basics: BasicsDraft,
    pub location: LocationDraft,
    pub financials: FinancialsDraft,
    pub media: MediaDraft,
    pub timeline: TimelineDraft,
    pub investment: InvestmentDraft,
}

impl PropertyDraft {
    /// Merge one step's field patch into the draft. Preview carries no
    /// fields, so committing it leaves the draft untouched.
    pub fn merge(&mut self, fields: StepFields) {
        match fields {
            StepFields::Basics(patch) => self.basics.merge(patch),
            StepFields::Location(patch) => self.location.merge(patch),
            StepFields::Financials(patch) => self.financials.merge(patch),
            StepFields::Media(patch) => self.media.merge(patch),
            StepFields::ProjectTimeline(patch) => self.timeline.merge(patch),
            StepFields::InvestmentTerms(patch) => self.investment.merge(patch),
            StepFields::Preview => {}
        }
    }

    /// Seed a draft from a published listing, for edit-mode sessions.
    pub fn from_property(property: &Property) -> Self {
        let basics = BasicsDraft {
            title: Some(property.basics.title.clone()),
            summary: Some(property.basics.summary.clone()),
            property_type: Some(property.basics.property_type.clone()),
            bedrooms: Some(property.basics.bedrooms),
            bathrooms: Some(property.basics.bathrooms),
            furnished: Some(property.basics.furnished),
            amenities: Some(property.basics.amenities.clone()),
            agency: property.basics.agency.clone(),
            owner_contact: property.basics.owner_contact.clone(),
        };
        let location = LocationDraft {
            address_line: Some(property.location.address_line.clone()),
            city: Some(property.location.city.clone()),
            region: property.location.region.clone(),
            postal_code: property.location.postal_code.clone(),
            country: Some(property.location.country.clone()),
        };
        let media = MediaDraft {
            items: Some(property.media.clone()),
        };

        let mut draft = PropertyDraft {
            basics,
            location,
            media,
            ..Default::default()
        };

        match &property.terms {
            Terms::Rental(financials) => {
                draft.financials = FinancialsDraft {
                    rent: Some(financials.rent),
                    deposit: Some(financials.deposit),
                    billing: Some(financials.billing.clone()),
                    utilities_included: Some(financials.utilities_included),
                    service_charge: financials.service_charge,
                };
            }
            Terms::Development {
                timeline,
                investment,
            } => {
                draft.timeline = TimelineDraft {
                    project_name: Some(timeline.project_name.clone()),
                    start: Some(timeline.start),
                    expected_completion: Some(timeline.expected_completion),
                    phases: Some(timeline.phases.clone()),
                };
                draft.investment = InvestmentDraft {
                    minimum_investment: Some(investment.minimum_investment),
                    projected_yield_pct: Some(investment.projected_yield_pct),
                    payout: Some(investment.payout.clone()),
                };
            }
        }

        draft
    }
}

/// One step's worth of submitted fields, tagged with the step it belongs
/// to. Committing a patch against a different step is a structural error,
/// caught by the session before any merge happens.
#[derive(Debug, Clone, PartialEq)]
pub enum StepFields {
    Basics(BasicsDraft),
    Location(LocationDraft),
    Financials(FinancialsDraft),
    Media(MediaDraft),
    ProjectTimeline(TimelineDraft),
    InvestmentTerms(InvestmentDraft),
    Preview,
}

impl StepFields {
    /// The step this patch targets.
    pub fn step(&self) -> StepId {
        match self {
            StepFields::Basics(_) => StepId::Basics,
            StepFields::Location(_) => StepId::Location,
            StepFields::Financials(_) => StepId::Financials,
            StepFields::Media(_) => StepId::Media,
            StepFields::ProjectTimeline(_) => StepId::ProjectTimeline,
            StepFields::InvestmentTerms(_) => StepId::InvestmentTerms,
            StepFields::Preview => StepId::Preview,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_provided_fields_only() {
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Basics(BasicsDraft {
            title: Some("Two-bed flat".to_string()),
            bedrooms: Some(2),
            ..Default::default()
        }));
        draft.merge(StepFields::Basics(BasicsDraft {
            bedrooms: Some(3),
            ..Default::default()
        }));

        assert_eq!(draft.basics.title.as_deref(), Some("Two-bed flat"));
        assert_eq!(draft.basics.bedrooms, Some(3));
        assert_eq!(draft.basics.summary, None);
    }

    #[test]
    fn test_merge_none_does_not_clear() {
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Location(LocationDraft {
            city: Some("Bristol".to_string()),
            ..Default::default()
        }));
        draft.merge(StepFields::Location(LocationDraft::default()));

        assert_eq!(draft.location.city.as_deref(), Some("Bristol"));
    }

    #[test]
    fn test_merge_is_section_scoped() {
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Financials(FinancialsDraft {
            rent: Some(95_000),
            ..Default::default()
        }));

        assert_eq!(draft.financials.rent, Some(95_000));
        assert_eq!(draft.basics, BasicsDraft::default());
        assert_eq!(draft.timeline, TimelineDraft::default());
    }

    #[test]
    fn test_preview_merge_is_noop() {
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Basics(BasicsDraft {
            title: Some("Loft".to_string()),
            ..Default::default()
        }));
        let before = draft.clone();
        draft.merge(StepFields::Preview);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_step_fields_step_mapping() {
        assert_eq!(
            StepFields::Basics(BasicsDraft::default()).step(),
            StepId::Basics
        );
        assert_eq!(
            StepFields::InvestmentTerms(InvestmentDraft::default()).step(),
            StepId::InvestmentTerms
        );
        assert_eq!(StepFields::Preview.step(), StepId::Preview);
    }
}
