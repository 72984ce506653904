//! Data-driven validation for wizard steps.
//!
//! Each step validates through a list of [`FieldCheck`]s: a base list per
//! step, plus per-role overlay lists (agents must identify their agency,
//! caretakers the owner they manage for). Checks run against the whole
//! accumulated draft, so a step stays valid however its data arrived --
//! typed in, seeded from an edit, or merged across repeat visits.
//!
//! A failing check never mutates anything; it reports one
//! [`FieldViolation`] addressed to the step's own field.

use std::collections::HashMap;

use rentora_types::draft::PropertyDraft;
use rentora_types::error::FieldViolation;
use rentora_types::role::Role;
use rentora_types::step::StepId;

fn text_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.trim().is_empty())
}

/// One validation rule, evaluated against the accumulated draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCheck {
    Title,
    Summary,
    PropertyType,
    Bedrooms,
    Bathrooms,
    AgencyDetails,
    OwnerContact,
    AddressLine,
    City,
    Country,
    RentPositive,
    DepositPresent,
    BillingPeriod,
    MediaPresent,
    MediaUrls,
    ProjectName,
    StartDate,
    CompletionDate,
    TimelineOrder,
    MinimumInvestment,
    YieldRange,
    PayoutSchedule,
}

impl FieldCheck {
    /// Evaluate this check, returning a violation if it fails.
    pub fn evaluate(&self, draft: &PropertyDraft) -> Option<FieldViolation> {
        match self {
            FieldCheck::Title => (!text_present(&draft.basics.title))
                .then(|| FieldViolation::new("title", "a listing title is required")),
            FieldCheck::Summary => (!text_present(&draft.basics.summary))
                .then(|| FieldViolation::new("summary", "a short summary is required")),
            FieldCheck::PropertyType => draft
                .basics
                .property_type
                .is_none()
                .then(|| FieldViolation::new("property_type", "select a property type")),
            FieldCheck::Bedrooms => draft
                .basics
                .bedrooms
                .is_none()
                .then(|| FieldViolation::new("bedrooms", "number of bedrooms is required")),
            FieldCheck::Bathrooms => draft
                .basics
                .bathrooms
                .is_none()
                .then(|| FieldViolation::new("bathrooms", "number of bathrooms is required")),
            FieldCheck::AgencyDetails => match &draft.basics.agency {
                None => Some(FieldViolation::new(
                    "agency",
                    "agency details are required for agent listings",
                )),
                Some(agency) if agency.agency_name.trim().is_empty() => {
                    Some(FieldViolation::new("agency", "agency name cannot be empty"))
                }
                Some(agency) if agency.licence_number.trim().is_empty() => Some(
                    FieldViolation::new("agency", "agency licence number cannot be empty"),
                ),
                Some(_) => None,
            },
            FieldCheck::OwnerContact => match &draft.basics.owner_contact {
                None => Some(FieldViolation::new(
                    "owner_contact",
                    "owner contact details are required for caretaker listings",
                )),
                Some(contact) if contact.name.trim().is_empty() => Some(FieldViolation::new(
                    "owner_contact",
                    "owner name cannot be empty",
                )),
                Some(contact) if contact.phone.trim().is_empty() => Some(FieldViolation::new(
                    "owner_contact",
                    "owner phone number cannot be empty",
                )),
                Some(_) => None,
            },
            FieldCheck::AddressLine => (!text_present(&draft.location.address_line))
                .then(|| FieldViolation::new("address_line", "an address line is required")),
            FieldCheck::City => (!text_present(&draft.location.city))
                .then(|| FieldViolation::new("city", "a city is required")),
            FieldCheck::Country => (!text_present(&draft.location.country))
                .then(|| FieldViolation::new("country", "a country is required")),
            FieldCheck::RentPositive => match draft.financials.rent {
                None => Some(FieldViolation::new("rent", "an asking rent is required")),
                Some(0) => Some(FieldViolation::new(
                    "rent",
                    "asking rent must be greater than zero",
                )),
                Some(_) => None,
            },
            FieldCheck::DepositPresent => draft.financials.deposit.is_none().then(|| {
                FieldViolation::new("deposit", "a deposit amount is required (zero is allowed)")
            }),
            FieldCheck::BillingPeriod => draft
                .financials
                .billing
                .is_none()
                .then(|| FieldViolation::new("billing", "select a billing period")),
            FieldCheck::MediaPresent => {
                let empty = draft
                    .media
                    .items
                    .as_ref()
                    .is_none_or(|items| items.is_empty());
                empty.then(|| {
                    FieldViolation::new("media", "add at least one photo or media item")
                })
            }
            FieldCheck::MediaUrls => {
                let blank = draft.media.items.as_ref().is_some_and(|items| {
                    items.iter().any(|item| item.url.trim().is_empty())
                });
                blank.then(|| {
                    FieldViolation::new("media", "every media item needs a non-empty url")
                })
            }
            FieldCheck::ProjectName => (!text_present(&draft.timeline.project_name))
                .then(|| FieldViolation::new("project_name", "a project name is required")),
            FieldCheck::StartDate => draft
                .timeline
                .start
                .is_none()
                .then(|| FieldViolation::new("start", "a project start date is required")),
            FieldCheck::CompletionDate => draft.timeline.expected_completion.is_none().then(|| {
                FieldViolation::new(
                    "expected_completion",
                    "an expected completion date is required",
                )
            }),
            FieldCheck::TimelineOrder => {
                match (draft.timeline.start, draft.timeline.expected_completion) {
                    (Some(start), Some(completion)) if completion <= start => {
                        Some(FieldViolation::new(
                            "expected_completion",
                            "expected completion must fall after the start date",
                        ))
                    }
                    _ => None,
                }
            }
            FieldCheck::MinimumInvestment => match draft.investment.minimum_investment {
                None => Some(FieldViolation::new(
                    "minimum_investment",
                    "a minimum investment is required",
                )),
                Some(0) => Some(FieldViolation::new(
                    "minimum_investment",
                    "minimum investment must be greater than zero",
                )),
                Some(_) => None,
            },
            FieldCheck::YieldRange => match draft.investment.projected_yield_pct {
                None => Some(FieldViolation::new(
                    "projected_yield_pct",
                    "a projected yield is required",
                )),
                Some(y) if !(y > 0.0 && y <= 100.0) => Some(FieldViolation::new(
                    "projected_yield_pct",
                    "projected yield must be between 0 and 100 percent",
                )),
                Some(_) => None,
            },
            FieldCheck::PayoutSchedule => draft
                .investment
                .payout
                .is_none()
                .then(|| FieldViolation::new("payout", "select a payout schedule")),
        }
    }
}

/// Validation rules for every step, with per-role overlays.
#[derive(Debug, Clone)]
pub struct RuleSet {
    base: HashMap<StepId, Vec<FieldCheck>>,
    overlays: HashMap<Role, HashMap<StepId, Vec<FieldCheck>>>,
}

impl RuleSet {
    /// The built-in rules.
    ///
    /// Preview deliberately carries no checks: committing it records the
    /// lister's confirmation of the preview, nothing more.
    pub fn builtin() -> Self {
        let mut base = HashMap::new();
        base.insert(
            StepId::Basics,
            vec![
                FieldCheck::Title,
                FieldCheck::Summary,
                FieldCheck::PropertyType,
                FieldCheck::Bedrooms,
                FieldCheck::Bathrooms,
            ],
        );
        base.insert(
            StepId::Location,
            vec![FieldCheck::AddressLine, FieldCheck::City, FieldCheck::Country],
        );
        base.insert(
            StepId::Financials,
            vec![
                FieldCheck::RentPositive,
                FieldCheck::DepositPresent,
                FieldCheck::BillingPeriod,
            ],
        );
        base.insert(
            StepId::Media,
            vec![FieldCheck::MediaPresent, FieldCheck::MediaUrls],
        );
        base.insert(
            StepId::ProjectTimeline,
            vec![
                FieldCheck::ProjectName,
                FieldCheck::StartDate,
                FieldCheck::CompletionDate,
                FieldCheck::TimelineOrder,
            ],
        );
        base.insert(
            StepId::InvestmentTerms,
            vec![
                FieldCheck::MinimumInvestment,
                FieldCheck::YieldRange,
                FieldCheck::PayoutSchedule,
            ],
        );
        base.insert(StepId::Preview, vec![]);

        let mut overlays = HashMap::new();
        for role in Role::ALL {
            let mut overlay: HashMap<StepId, Vec<FieldCheck>> = HashMap::new();
            match role {
                Role::Agent => {
                    overlay.insert(StepId::Basics, vec![FieldCheck::AgencyDetails]);
                }
                Role::Caretaker => {
                    overlay.insert(StepId::Basics, vec![FieldCheck::OwnerContact]);
                }
                Role::Landlord | Role::Developer => {}
            }
            overlays.insert(role, overlay);
        }

        Self { base, overlays }
    }

    /// The checks that apply to `step` for `role` (base plus overlay).
    pub fn checks_for(&self, role: Role, step: StepId) -> Vec<FieldCheck> {
        let mut checks = self.base.get(&step).cloned().unwrap_or_default();
        if let Some(extra) = self.overlays.get(&role).and_then(|o| o.get(&step)) {
            checks.extend(extra.iter().copied());
        }
        checks
    }

    /// Run every applicable check, collecting all violations.
    pub fn validate(&self, role: Role, step: StepId, draft: &PropertyDraft) -> Vec<FieldViolation> {
        self.checks_for(role, step)
            .iter()
            .filter_map(|check| check.evaluate(draft))
            .collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rentora_types::draft::{
        BasicsDraft, InvestmentDraft, MediaDraft, StepFields, TimelineDraft,
    };
    use rentora_types::property::{AgencyDetails, MediaItem, MediaKind, OwnerContact};

    fn filled_basics() -> BasicsDraft {
        BasicsDraft {
            title: Some("Bright two-bed flat".to_string()),
            summary: Some("Close to the station".to_string()),
            property_type: Some(rentora_types::property::PropertyType::Apartment),
            bedrooms: Some(2),
            bathrooms: Some(1),
            furnished: Some(true),
            amenities: None,
            agency: None,
            owner_contact: None,
        }
    }

    #[test]
    fn test_empty_basics_reports_every_missing_field() {
        let rules = RuleSet::builtin();
        let violations = rules.validate(Role::Landlord, StepId::Basics, &PropertyDraft::default());
        let fields: Vec<&str> = violations.iter().map(|v| v.field).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"summary"));
        assert!(fields.contains(&"property_type"));
        assert!(fields.contains(&"bedrooms"));
        assert!(fields.contains(&"bathrooms"));
    }

    #[test]
    fn test_filled_basics_passes_for_landlord() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Basics(filled_basics()));
        assert!(rules.validate(Role::Landlord, StepId::Basics, &draft).is_empty());
    }

    #[test]
    fn test_agent_basics_requires_agency_details() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Basics(filled_basics()));

        let violations = rules.validate(Role::Agent, StepId::Basics, &draft);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "agency");

        draft.merge(StepFields::Basics(BasicsDraft {
            agency: Some(AgencyDetails {
                agency_name: "Harbour Lettings".to_string(),
                licence_number: "HL-4421".to_string(),
            }),
            ..Default::default()
        }));
        assert!(rules.validate(Role::Agent, StepId::Basics, &draft).is_empty());
    }

    #[test]
    fn test_caretaker_basics_requires_owner_contact() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Basics(filled_basics()));

        let violations = rules.validate(Role::Caretaker, StepId::Basics, &draft);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "owner_contact");

        draft.merge(StepFields::Basics(BasicsDraft {
            owner_contact: Some(OwnerContact {
                name: "J. Mwangi".to_string(),
                phone: "+44 117 000000".to_string(),
            }),
            ..Default::default()
        }));
        assert!(
            rules
                .validate(Role::Caretaker, StepId::Basics, &draft)
                .is_empty()
        );
    }

    #[test]
    fn test_blank_agency_name_is_rejected() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Basics(BasicsDraft {
            agency: Some(AgencyDetails {
                agency_name: "   ".to_string(),
                licence_number: "HL-1".to_string(),
            }),
            ..filled_basics()
        }));
        let violations = rules.validate(Role::Agent, StepId::Basics, &draft);
        assert!(violations.iter().any(|v| v.field == "agency"));
    }

    #[test]
    fn test_zero_rent_is_rejected_but_zero_deposit_allowed() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.financials.rent = Some(0);
        draft.financials.deposit = Some(0);
        draft.financials.billing = Some(rentora_types::property::BillingPeriod::Monthly);

        let violations = rules.validate(Role::Landlord, StepId::Financials, &draft);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "rent");
    }

    #[test]
    fn test_timeline_order_violation() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::ProjectTimeline(TimelineDraft {
            project_name: Some("Harbour Walk".to_string()),
            start: NaiveDate::from_ymd_opt(2027, 1, 1),
            expected_completion: NaiveDate::from_ymd_opt(2026, 1, 1),
            phases: None,
        }));
        let violations = rules.validate(Role::Developer, StepId::ProjectTimeline, &draft);
        assert!(
            violations
                .iter()
                .any(|v| v.field == "expected_completion"
                    && v.message.contains("after the start date"))
        );
    }

    #[test]
    fn test_yield_range_bounds() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::InvestmentTerms(InvestmentDraft {
            minimum_investment: Some(10_000),
            projected_yield_pct: Some(120.0),
            payout: Some(rentora_types::property::PayoutSchedule::Quarterly),
        }));
        let violations = rules.validate(Role::Developer, StepId::InvestmentTerms, &draft);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "projected_yield_pct");

        draft.investment.projected_yield_pct = Some(6.5);
        assert!(
            rules
                .validate(Role::Developer, StepId::InvestmentTerms, &draft)
                .is_empty()
        );
    }

    #[test]
    fn test_media_requires_nonblank_urls() {
        let rules = RuleSet::builtin();
        let mut draft = PropertyDraft::default();
        draft.merge(StepFields::Media(MediaDraft {
            items: Some(vec![MediaItem {
                url: "  ".to_string(),
                kind: MediaKind::Photo,
                caption: None,
            }]),
        }));
        let violations = rules.validate(Role::Landlord, StepId::Media, &draft);
        assert!(violations.iter().any(|v| v.message.contains("non-empty url")));
    }

    #[test]
    fn test_preview_has_no_checks() {
        let rules = RuleSet::builtin();
        for role in Role::ALL {
            assert!(rules.checks_for(role, StepId::Preview).is_empty());
            assert!(
                rules
                    .validate(role, StepId::Preview, &PropertyDraft::default())
                    .is_empty()
            );
        }
    }
}
