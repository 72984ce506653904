//! Wizard hosting service.
//!
//! Sessions themselves are pure; this service is the effectful edge that
//! opens them against stored listings and carries a ready session through
//! submission. Generic over the repository trait to maintain clean
//! architecture -- rentora-core never depends on rentora-infra.

use rentora_types::config::StepTable;
use rentora_types::error::FieldViolation;
use rentora_types::property::{Property, PropertyId};
use rentora_types::role::Role;
use rentora_types::step::StepId;

use crate::repository::property::PropertyRepository;

use super::error::WizardServiceError;
use super::rules::RuleSet;
use super::session::{Advance, WizardMode, WizardSession};

/// Outcome of a service-driven forward move.
///
/// Mirrors [`Advance`], except that reaching the end of the sequence rolls
/// straight into submission: confirming the final step is the submit
/// action, there is no separate button after it.
#[derive(Debug)]
pub enum NavOutcome {
    Moved {
        to: usize,
    },
    Blocked {
        step: StepId,
        violations: Vec<FieldViolation>,
    },
    Submitted(Box<Property>),
}

/// Hosts wizard sessions against the listing repository.
pub struct WizardService<R: PropertyRepository> {
    repo: R,
    table: StepTable,
    rules: RuleSet,
}

impl<R: PropertyRepository> WizardService<R> {
    pub fn new(repo: R, table: StepTable, rules: RuleSet) -> Self {
        Self { repo, table, rules }
    }

    /// Open a create-mode session for `role`.
    pub fn start_create(&self, role: Role) -> WizardSession {
        let session = WizardSession::new_create(role, &self.table, self.rules.clone());
        tracing::debug!(session = %session.id(), role = %role, "wizard session opened");
        session
    }

    /// Open an edit-mode session seeded from the stored listing.
    pub async fn start_edit(&self, id: &PropertyId) -> Result<WizardSession, WizardServiceError> {
        let property = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(WizardServiceError::NotFound)?;
        let session = WizardSession::new_edit(&property, &self.table, self.rules.clone());
        tracing::debug!(
            session = %session.id(),
            listing = %id,
            "edit session opened at step {}",
            session.current_index()
        );
        Ok(session)
    }

    /// Move the session forward, submitting when it reports the end.
    pub async fn advance(
        &self,
        session: &mut WizardSession,
    ) -> Result<NavOutcome, WizardServiceError> {
        match session.advance()? {
            Advance::Moved { to } => Ok(NavOutcome::Moved { to }),
            Advance::Blocked { step, violations } => Ok(NavOutcome::Blocked { step, violations }),
            Advance::AtEnd => {
                let property = self.submit(session).await?;
                Ok(NavOutcome::Submitted(Box::new(property)))
            }
        }
    }

    /// Submit the session's listing to the repository.
    ///
    /// Create-mode sessions insert, edit-mode sessions update. On storage
    /// failure the session reopens with its draft intact so the user can
    /// retry without losing anything.
    pub async fn submit(
        &self,
        session: &mut WizardSession,
    ) -> Result<Property, WizardServiceError> {
        let record = session.begin_submit()?;
        let result = match session.mode() {
            WizardMode::Create => self.repo.create(&record).await,
            WizardMode::Edit => self.repo.update(&record).await,
        };
        match result {
            Ok(stored) => {
                session.complete_submit(stored.id.clone());
                tracing::info!(
                    listing = %stored.id,
                    role = %stored.listed_by_role,
                    city = %stored.location.city,
                    "listing submitted"
                );
                Ok(stored)
            }
            Err(err) => {
                session.fail_submit();
                tracing::warn!(error = %err, "listing submission failed, draft retained");
                Err(WizardServiceError::Storage(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    use rentora_types::draft::{
        BasicsDraft, FinancialsDraft, LocationDraft, MediaDraft, StepFields,
    };
    use rentora_types::error::RepositoryError;
    use rentora_types::property::{BillingPeriod, MediaItem, MediaKind, PropertyType};

    use crate::repository::property::ListingFilter;
    use crate::wizard::error::WizardError;
    use crate::wizard::session::SessionState;

    // --- Mock repository ---

    struct MockRepo {
        listings: Mutex<HashMap<PropertyId, Property>>,
        fail_writes: bool,
    }

    impl MockRepo {
        fn new() -> Self {
            Self {
                listings: Mutex::new(HashMap::new()),
                fail_writes: false,
            }
        }

        fn failing() -> Self {
            Self {
                listings: Mutex::new(HashMap::new()),
                fail_writes: true,
            }
        }
    }

    impl PropertyRepository for MockRepo {
        fn create(
            &self,
            property: &Property,
        ) -> impl Future<Output = Result<Property, RepositoryError>> + Send {
            let result = if self.fail_writes {
                Err(RepositoryError::Connection)
            } else {
                self.listings
                    .lock()
                    .unwrap()
                    .insert(property.id.clone(), property.clone());
                Ok(property.clone())
            };
            async move { result }
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
            _filter: Option<ListingFilter>,
        ) -> impl Future<Output = Result<Vec<Property>, RepositoryError>> + Send {
            let all: Vec<Property> = self.listings.lock().unwrap().values().cloned().collect();
            async move { Ok(all) }
        }

        fn update(
            &self,
            property: &Property,
        ) -> impl Future<Output = Result<Property, RepositoryError>> + Send {
            let result = if self.fail_writes {
                Err(RepositoryError::Connection)
            } else {
                self.listings
                    .lock()
                    .unwrap()
                    .insert(property.id.clone(), property.clone());
                Ok(property.clone())
            };
            async move { result }
        }

        fn delete(
            &self,
            id: &PropertyId,
        ) -> impl Future<Output = Result<(), RepositoryError>> + Send {
            self.listings.lock().unwrap().remove(id);
            async move { Ok(()) }
        }
    }

    fn service(repo: MockRepo) -> WizardService<MockRepo> {
        WizardService::new(repo, StepTable::builtin(), RuleSet::builtin())
    }

    fn complete_landlord_session(service: &WizardService<MockRepo>) -> WizardSession {
        let mut session = service.start_create(Role::Landlord);
        session
            .commit_step(
                StepId::Basics,
                StepFields::Basics(BasicsDraft {
                    title: Some("Garden flat".to_string()),
                    summary: Some("Ground floor with a private garden".to_string()),
                    property_type: Some(PropertyType::Apartment),
                    bedrooms: Some(1),
                    bathrooms: Some(1),
                    furnished: Some(false),
                    amenities: None,
                    agency: None,
                    owner_contact: None,
                }),
            )
            .unwrap();
        session
            .commit_step(
                StepId::Location,
                StepFields::Location(LocationDraft {
                    address_line: Some("22 Clifton Road".to_string()),
                    city: Some("Bristol".to_string()),
                    region: None,
                    postal_code: None,
                    country: Some("UK".to_string()),
                }),
            )
            .unwrap();
        session
            .commit_step(
                StepId::Financials,
                StepFields::Financials(FinancialsDraft {
                    rent: Some(1_100_00),
                    deposit: Some(1_100_00),
                    billing: Some(BillingPeriod::Monthly),
                    utilities_included: Some(false),
                    service_charge: None,
                }),
            )
            .unwrap();
        session
            .commit_step(
                StepId::Media,
                StepFields::Media(MediaDraft {
                    items: Some(vec![MediaItem {
                        url: "https://img.example/garden.jpg".to_string(),
                        kind: MediaKind::Photo,
                        caption: None,
                    }]),
                }),
            )
            .unwrap();
        session
            .commit_step(StepId::Preview, StepFields::Preview)
            .unwrap();
        session
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_submit_creates_listing_and_closes_session() {
        let service = service(MockRepo::new());
        let mut session = complete_landlord_session(&service);

        let stored = service.submit(&mut session).await.unwrap();
        assert_eq!(session.state(), &SessionState::Submitted(stored.id.clone()));

        let found = service.repo.get_by_id(&stored.id).await.unwrap();
        assert_eq!(found.unwrap().basics.title, "Garden flat");
    }

    #[tokio::test]
    async fn test_advance_at_end_submits() {
        let service = service(MockRepo::new());
        let mut session = complete_landlord_session(&service);
        // Walk to the final step, then one more advance submits.
        while session.current_index() + 1 < session.steps().len() {
            session.advance().unwrap();
        }
        match service.advance(&mut session).await.unwrap() {
            NavOutcome::Submitted(property) => {
                assert_eq!(property.listed_by_role, Role::Landlord);
            }
            other => panic!("expected submission, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_advance_blocked_surfaces_violations() {
        let service = service(MockRepo::new());
        let mut session = service.start_create(Role::Landlord);
        match service.advance(&mut session).await.unwrap() {
            NavOutcome::Blocked { step, violations } => {
                assert_eq!(step, StepId::Basics);
                assert!(!violations.is_empty());
            }
            other => panic!("expected block, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_draft_and_reopens() {
        let service = service(MockRepo::failing());
        let mut session = complete_landlord_session(&service);
        let draft_before = session.draft().clone();

        let err = service.submit(&mut session).await.unwrap_err();
        assert!(matches!(err, WizardServiceError::Storage(_)));
        assert_eq!(session.state(), &SessionState::InProgress);
        assert_eq!(session.draft(), &draft_before);
    }

    #[tokio::test]
    async fn test_submit_incomplete_session_is_rejected_locally() {
        let service = service(MockRepo::new());
        let mut session = service.start_create(Role::Landlord);
        let err = service.submit(&mut session).await.unwrap_err();
        assert!(matches!(
            err,
            WizardServiceError::Session(WizardError::StepIncomplete(StepId::Basics))
        ));
        // Nothing was stored.
        assert!(
            service
                .repo
                .listings
                .lock()
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_start_edit_unknown_listing() {
        let service = service(MockRepo::new());
        let missing = PropertyId::from_uuid(uuid::Uuid::nil());
        let err = service.start_edit(&missing).await.unwrap_err();
        assert!(matches!(err, WizardServiceError::NotFound));
    }

    #[tokio::test]
    async fn test_edit_flow_updates_in_place() {
        let service = service(MockRepo::new());
        let mut session = complete_landlord_session(&service);
        let stored = service.submit(&mut session).await.unwrap();

        let mut edit = service.start_edit(&stored.id).await.unwrap();
        edit.jump_to(2).unwrap();
        edit.commit_step(
            StepId::Financials,
            StepFields::Financials(FinancialsDraft {
                rent: Some(1_250_00),
                ..Default::default()
            }),
        )
        .unwrap();

        let updated = service.submit(&mut edit).await.unwrap();
        assert_eq!(updated.id, stored.id);
        assert_eq!(updated.terms.rent(), Some(1_250_00));
        assert_eq!(updated.created_at, stored.created_at);
        // Still exactly one listing in the store.
        assert_eq!(service.repo.listings.lock().unwrap().len(), 1);
    }
}
