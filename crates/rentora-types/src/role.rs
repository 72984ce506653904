use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// The persona a user lists property under.
///
/// An account may hold several roles at once; the wizard plans its step
/// sequence and validation rules from the active one.
///
/// - Landlord: lets out property they own directly
/// - Agent: lists on behalf of a registered agency
/// - Caretaker: manages and lists property for an absent owner
/// - Developer: markets units in a development project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Landlord,
    Agent,
    Caretaker,
    Developer,
}

impl Role {
    /// All roles, in display order.
    pub const ALL: [Role; 4] = [
        Role::Landlord,
        Role::Agent,
        Role::Caretaker,
        Role::Developer,
    ];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Landlord => write!(f, "landlord"),
            Role::Agent => write!(f, "agent"),
            Role::Caretaker => write!(f, "caretaker"),
            Role::Developer => write!(f, "developer"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    /// ```
    /// use rentora_types::role::Role;
    ///
    /// assert_eq!("agent".parse::<Role>().unwrap(), Role::Agent);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "landlord" => Ok(Role::Landlord),
            "agent" => Ok(Role::Agent),
            "caretaker" => Ok(Role::Caretaker),
            "developer" => Ok(Role::Developer),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}
