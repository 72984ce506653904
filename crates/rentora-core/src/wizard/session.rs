//! Wizard session state machine.
//!
//! A session is created in one of two modes (create from scratch, edit an
//! existing listing), plans its step sequence once from the step table,
//! and then navigates under three invariants:
//!
//! - the current index always points inside the planned sequence
//! - a step only counts as completed while the accumulated draft passes
//!   its checks; re-committing invalid data revokes completion
//! - forward movement requires the current step to be completed; backward
//!   movement is always allowed and loses nothing
//!
//! Every transition is a pure function of the session plus the operation's
//! arguments: same session state, same call, same outcome. Submission
//! itself is the one effectful edge, so it is split into `begin_submit`
//! (validates and locks), and `complete_submit` / `fail_submit` which the
//! service calls with the repository result.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use rentora_types::config::{StepTable, standard_sequence};
use rentora_types::draft::{PropertyDraft, StepFields};
use rentora_types::error::FieldViolation;
use rentora_types::property::{ListingStatus, Property, PropertyId};
use rentora_types::role::Role;
use rentora_types::step::StepId;

use super::assembler;
use super::error::WizardError;
use super::rules::RuleSet;

/// Whether the session creates a new listing or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit,
}

/// Lifecycle of a session. `Submitted` is terminal.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    InProgress,
    Submitting,
    Submitted(PropertyId),
}

/// One entry in the planned sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedStep {
    pub ordinal: usize,
    pub id: StepId,
}

/// Identity carried over from the listing an edit session was seeded from.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingOrigin {
    pub id: PropertyId,
    pub status: ListingStatus,
    pub created_at: DateTime<Utc>,
}

/// Result of committing a step's fields.
///
/// Both variants mean the merge happened; `Rejected` reports why the step
/// does not count as completed afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    Accepted {
        step: StepId,
    },
    Rejected {
        step: StepId,
        violations: Vec<FieldViolation>,
    },
}

/// Result of asking to move forward.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved to the next step.
    Moved { to: usize },
    /// The current step has not validated; stayed in place.
    Blocked {
        step: StepId,
        violations: Vec<FieldViolation>,
    },
    /// Already at the final step and it has validated; ready to submit.
    AtEnd,
}

/// Result of asking to jump to an arbitrary step.
#[derive(Debug, Clone, PartialEq)]
pub enum Jump {
    Moved { to: usize },
    /// Target lies beyond the furthest completed step plus one.
    Rejected { requested: usize, max_allowed: usize },
}

/// A navigation event, for hosts that drive the session as an event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum WizardEvent {
    Commit { step: StepId, fields: StepFields },
    Next,
    Back,
    JumpTo(usize),
}

/// The transition an event produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Committed(CommitOutcome),
    Advanced(Advance),
    Retreated { to: usize },
    Jumped(Jump),
}

/// One in-flight listing flow.
#[derive(Debug, Clone)]
pub struct WizardSession {
    id: Uuid,
    role: Role,
    mode: WizardMode,
    steps: Vec<PlannedStep>,
    current: usize,
    draft: PropertyDraft,
    completed: BTreeSet<usize>,
    state: SessionState,
    origin: Option<ListingOrigin>,
    rules: RuleSet,
}

impl WizardSession {
    /// Start a create-mode session with an empty draft at the first step.
    pub fn new_create(role: Role, table: &StepTable, rules: RuleSet) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            mode: WizardMode::Create,
            steps: plan_steps(role, table),
            current: 0,
            draft: PropertyDraft::default(),
            completed: BTreeSet::new(),
            state: SessionState::InProgress,
            origin: None,
            rules,
        }
    }

    /// Start an edit-mode session seeded from a published listing.
    ///
    /// Steps whose checks already pass against the seeded draft are marked
    /// completed up front, and the session opens at the first incomplete
    /// step (the final step when everything passes). The listing's id,
    /// status, and creation time survive resubmission.
    pub fn new_edit(property: &Property, table: &StepTable, rules: RuleSet) -> Self {
        let role = property.listed_by_role;
        let steps = plan_steps(role, table);
        let draft = PropertyDraft::from_property(property);

        let mut completed = BTreeSet::new();
        for planned in &steps {
            if rules.validate(role, planned.id, &draft).is_empty() {
                completed.insert(planned.ordinal);
            }
        }
        let current = (0..steps.len())
            .find(|ordinal| !completed.contains(ordinal))
            .unwrap_or(steps.len() - 1);

        Self {
            id: Uuid::now_v7(),
            role,
            mode: WizardMode::Edit,
            steps,
            current,
            draft,
            completed,
            state: SessionState::InProgress,
            origin: Some(ListingOrigin {
                id: property.id.clone(),
                status: property.status.clone(),
                created_at: property.created_at,
            }),
            rules,
        }
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn steps(&self) -> &[PlannedStep] {
        &self.steps
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The step the session currently sits on.
    pub fn current_step(&self) -> StepId {
        self.steps[self.current].id
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    pub fn origin(&self) -> Option<&ListingOrigin> {
        self.origin.as_ref()
    }

    pub fn is_step_completed(&self, ordinal: usize) -> bool {
        self.completed.contains(&ordinal)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Highest completed ordinal, if any step has completed.
    pub fn furthest_completed(&self) -> Option<usize> {
        self.completed.iter().next_back().copied()
    }

    // --- Transitions ---

    /// Merge one step's fields into the draft, then validate that step.
    ///
    /// The merge happens unconditionally -- field edits are never thrown
    /// away -- and the step's completion mark is set or revoked by the
    /// validation result.
    pub fn commit_step(
        &mut self,
        step: StepId,
        fields: StepFields,
    ) -> Result<CommitOutcome, WizardError> {
        self.ensure_open()?;
        let ordinal = self
            .ordinal_of(step)
            .ok_or(WizardError::UnknownStep(step))?;
        if fields.step() != step {
            return Err(WizardError::PatchMismatch {
                step,
                fields: fields.step(),
            });
        }

        self.draft.merge(fields);
        let violations = self.rules.validate(self.role, step, &self.draft);
        if violations.is_empty() {
            self.completed.insert(ordinal);
            Ok(CommitOutcome::Accepted { step })
        } else {
            self.completed.remove(&ordinal);
            Ok(CommitOutcome::Rejected { step, violations })
        }
    }

    /// Move forward one step, gated on the current step's completion.
    ///
    /// At the final step this never moves: it reports [`Advance::AtEnd`]
    /// so the host can hand the session to the service for submission.
    pub fn advance(&mut self) -> Result<Advance, WizardError> {
        self.ensure_open()?;
        if !self.completed.contains(&self.current) {
            let step = self.current_step();
            return Ok(Advance::Blocked {
                step,
                violations: self.rules.validate(self.role, step, &self.draft),
            });
        }
        if self.current + 1 < self.steps.len() {
            self.current += 1;
            Ok(Advance::Moved { to: self.current })
        } else {
            Ok(Advance::AtEnd)
        }
    }

    /// Move back one step, saturating at the first. Never gated and never
    /// discards anything.
    pub fn retreat(&mut self) -> Result<usize, WizardError> {
        self.ensure_open()?;
        self.current = self.current.saturating_sub(1);
        Ok(self.current)
    }

    /// Jump to an arbitrary step by index.
    ///
    /// Allowed up to one past the furthest completed step, which keeps
    /// direct navigation (step indicators, edit-from-preview) from
    /// skipping unvalidated work. An index outside the sequence is a
    /// structural error, not a rejection.
    pub fn jump_to(&mut self, index: usize) -> Result<Jump, WizardError> {
        self.ensure_open()?;
        if index >= self.steps.len() {
            return Err(WizardError::StepOutOfRange {
                index,
                len: self.steps.len(),
            });
        }
        let max_allowed = self
            .furthest_completed()
            .map(|furthest| (furthest + 1).min(self.steps.len() - 1))
            .unwrap_or(0);
        if index > max_allowed {
            return Ok(Jump::Rejected {
                requested: index,
                max_allowed,
            });
        }
        self.current = index;
        Ok(Jump::Moved { to: index })
    }

    /// Apply a navigation event. Equivalent to calling the matching method
    /// directly; exists so hosts can drive the session from a single
    /// event-dispatch point.
    pub fn apply(&mut self, event: WizardEvent) -> Result<Transition, WizardError> {
        match event {
            WizardEvent::Commit { step, fields } => {
                Ok(Transition::Committed(self.commit_step(step, fields)?))
            }
            WizardEvent::Next => Ok(Transition::Advanced(self.advance()?)),
            WizardEvent::Back => Ok(Transition::Retreated { to: self.retreat()? }),
            WizardEvent::JumpTo(index) => Ok(Transition::Jumped(self.jump_to(index)?)),
        }
    }

    // --- Submission ---

    /// Validate the whole sequence, assemble the publishable listing, and
    /// lock the session.
    ///
    /// On error nothing changes: the draft, the completion marks, and the
    /// current index all stay put, and the session remains open.
    pub fn begin_submit(&mut self) -> Result<Property, WizardError> {
        self.ensure_open()?;
        if let Some(ordinal) = (0..self.steps.len()).find(|o| !self.completed.contains(o)) {
            return Err(WizardError::StepIncomplete(self.steps[ordinal].id));
        }
        let property = assembler::assemble(self.role, &self.draft, self.origin.as_ref())?;
        self.state = SessionState::Submitting;
        Ok(property)
    }

    /// Record a successful submission. The session is closed for good.
    pub fn complete_submit(&mut self, id: PropertyId) {
        self.state = SessionState::Submitted(id);
    }

    /// Record a failed submission. The session reopens with the draft and
    /// completion marks untouched, ready to retry.
    pub fn fail_submit(&mut self) {
        if self.state == SessionState::Submitting {
            self.state = SessionState::InProgress;
        }
    }

    // --- Internals ---

    fn ensure_open(&self) -> Result<(), WizardError> {
        match self.state {
            SessionState::InProgress => Ok(()),
            SessionState::Submitting => Err(WizardError::SubmitInFlight),
            SessionState::Submitted(_) => Err(WizardError::SessionClosed),
        }
    }

    fn ordinal_of(&self, step: StepId) -> Option<usize> {
        self.steps
            .iter()
            .find(|planned| planned.id == step)
            .map(|planned| planned.ordinal)
    }
}

/// Resolve the planned sequence for a role from the step table.
///
/// A role missing from the table, or an empty configured sequence, falls
/// back rather than failing: a misconfigured table should degrade to the
/// standard flow, not brick the wizard.
fn plan_steps(role: Role, table: &StepTable) -> Vec<PlannedStep> {
    let sequence: Vec<StepId> = match table.sequence_for(role) {
        Some(sequence) => sequence.to_vec(),
        None => {
            tracing::warn!(
                role = %role,
                "no step sequence configured for role, using the table default"
            );
            table.default.clone()
        }
    };
    let sequence = if sequence.is_empty() {
        tracing::warn!(role = %role, "configured step sequence is empty, using the built-in default");
        standard_sequence()
    } else {
        sequence
    };
    sequence
        .into_iter()
        .enumerate()
        .map(|(ordinal, id)| PlannedStep { ordinal, id })
        .collect()
}
