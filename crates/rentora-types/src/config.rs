//! Configuration types for the wizard step table and local storage.
//!
//! The step table is data, not code: which steps a role walks through (and
//! in what order) can be overridden from the config file without touching
//! the session machine. Validation rules stay in code -- see
//! `rentora-core::wizard::rules`.

use serde::{Deserialize, Serialize};

use std::collections::HashMap;

use crate::role::Role;
use crate::step::StepId;

/// The standard listing sequence walked by landlord, agent, and caretaker.
pub fn standard_sequence() -> Vec<StepId> {
    vec![
        StepId::Basics,
        StepId::Location,
        StepId::Financials,
        StepId::Media,
        StepId::Preview,
    ]
}

/// The developer sequence: rental financials are replaced by project
/// timeline and investment terms.
pub fn development_sequence() -> Vec<StepId> {
    vec![
        StepId::Basics,
        StepId::Location,
        StepId::ProjectTimeline,
        StepId::InvestmentTerms,
        StepId::Media,
        StepId::Preview,
    ]
}

/// Maps roles to their ordered step sequences.
///
/// A role missing from `roles` falls back to `default`; resolving that
/// fallback (and warning about it) is the session's job, so the table
/// itself stays a plain lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTable {
    #[serde(default = "standard_sequence")]
    pub default: Vec<StepId>,
    #[serde(default)]
    pub roles: HashMap<Role, Vec<StepId>>,
}

impl StepTable {
    /// The built-in table: every role mapped, developer with its own path.
    pub fn builtin() -> Self {
        let mut roles = HashMap::new();
        for role in Role::ALL {
            let sequence = match role {
                Role::Landlord | Role::Agent | Role::Caretaker => standard_sequence(),
                Role::Developer => development_sequence(),
            };
            roles.insert(role, sequence);
        }
        Self {
            default: standard_sequence(),
            roles,
        }
    }

    /// The sequence configured for `role`, if any.
    pub fn sequence_for(&self, role: Role) -> Option<&[StepId]> {
        self.roles.get(&role).map(Vec::as_slice)
    }
}

impl Default for StepTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Which repository adapter backs the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    /// Volatile in-memory map, lost on exit.
    Memory,
    /// JSON file under the data directory.
    File,
}

impl Default for StorageKind {
    fn default() -> Self {
        StorageKind::File
    }
}

fn default_seed_demo() -> bool {
    true
}

/// Local storage options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub kind: StorageKind,
    /// Artificial delay added to every repository call, to exercise the
    /// wizard's submitting state. Zero disables it.
    #[serde(default)]
    pub latency_ms: u64,
    /// Seed demo listings into an empty store on startup.
    #[serde(default = "default_seed_demo")]
    pub seed_demo: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            kind: StorageKind::default(),
            latency_ms: 0,
            seed_demo: true,
        }
    }
}

fn default_profile_roles() -> Vec<Role> {
    Role::ALL.to_vec()
}

/// Which roles this installation lists under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Roles the wizard can be opened as. Defaults to all of them.
    #[serde(default = "default_profile_roles")]
    pub roles: Vec<Role>,
    /// Preferred role when none is requested explicitly.
    #[serde(default)]
    pub default_role: Option<Role>,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            roles: default_profile_roles(),
            default_role: None,
        }
    }
}

/// Root of `config.toml` in the data directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub wizard: StepTable,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_role() {
        let table = StepTable::builtin();
        for role in Role::ALL {
            assert!(
                table.sequence_for(role).is_some(),
                "builtin table is missing {role}"
            );
        }
    }

    #[test]
    fn test_builtin_developer_sequence() {
        let table = StepTable::builtin();
        assert_eq!(
            table.sequence_for(Role::Developer).unwrap(),
            &[
                StepId::Basics,
                StepId::Location,
                StepId::ProjectTimeline,
                StepId::InvestmentTerms,
                StepId::Media,
                StepId::Preview,
            ]
        );
    }

    #[test]
    fn test_sequences_end_in_preview() {
        let table = StepTable::builtin();
        for role in Role::ALL {
            let sequence = table.sequence_for(role).unwrap();
            assert_eq!(sequence.last(), Some(&StepId::Preview));
        }
    }

    #[test]
    fn test_config_parses_from_toml() {
        let raw = r#"
            [storage]
            kind = "memory"
            latency_ms = 150

            [wizard]
            default = ["basics", "location", "preview"]

            [wizard.roles]
            landlord = ["basics", "location", "financials", "media", "preview"]
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.storage.kind, StorageKind::Memory);
        assert_eq!(config.storage.latency_ms, 150);
        assert!(config.storage.seed_demo);
        assert_eq!(config.wizard.default.len(), 3);
        assert_eq!(
            config.wizard.sequence_for(Role::Landlord).unwrap().len(),
            5
        );
        assert_eq!(config.wizard.sequence_for(Role::Developer), None);
    }

    #[test]
    fn test_profile_parses_from_toml() {
        let raw = r#"
            [profile]
            roles = ["landlord", "developer"]
            default_role = "developer"
        "#;
        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.profile.roles, vec![Role::Landlord, Role::Developer]);
        assert_eq!(config.profile.default_role, Some(Role::Developer));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.storage.kind, StorageKind::File);
        assert_eq!(config.storage.latency_ms, 0);
        assert_eq!(config.wizard, StepTable::builtin());
        assert_eq!(config.profile.roles, Role::ALL.to_vec());
        assert_eq!(config.profile.default_role, None);
    }
}
