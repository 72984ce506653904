//! Active-role resolution.
//!
//! An account may hold several roles. Which one drives the wizard is
//! resolved here: an explicit request wins when the account holds it,
//! then a stored preference, then the first role held. Pure so the
//! host can decide how to surface a denied request.

use rentora_types::role::Role;

/// Where the resolved role came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    Requested,
    Stored,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleResolution {
    pub role: Role,
    pub source: RoleSource,
    /// A requested role the account does not hold.
    pub denied: Option<Role>,
}

/// Resolve the active role for a session.
///
/// Returns `None` when the account holds no roles at all.
pub fn resolve_active_role(
    available: &[Role],
    stored: Option<Role>,
    requested: Option<Role>,
) -> Option<RoleResolution> {
    let first = *available.first()?;

    if let Some(role) = requested {
        if available.contains(&role) {
            return Some(RoleResolution {
                role,
                source: RoleSource::Requested,
                denied: None,
            });
        }
    }
    let denied = requested;

    if let Some(role) = stored {
        if available.contains(&role) {
            return Some(RoleResolution {
                role,
                source: RoleSource::Stored,
                denied,
            });
        }
    }

    Some(RoleResolution {
        role: first,
        source: RoleSource::Fallback,
        denied,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_roles_resolves_to_none() {
        assert_eq!(resolve_active_role(&[], None, Some(Role::Agent)), None);
    }

    #[test]
    fn test_requested_role_wins_when_held() {
        let resolution = resolve_active_role(
            &[Role::Landlord, Role::Agent],
            Some(Role::Landlord),
            Some(Role::Agent),
        )
        .unwrap();
        assert_eq!(resolution.role, Role::Agent);
        assert_eq!(resolution.source, RoleSource::Requested);
        assert_eq!(resolution.denied, None);
    }

    #[test]
    fn test_unheld_request_falls_back_to_stored() {
        let resolution = resolve_active_role(
            &[Role::Landlord, Role::Caretaker],
            Some(Role::Caretaker),
            Some(Role::Developer),
        )
        .unwrap();
        assert_eq!(resolution.role, Role::Caretaker);
        assert_eq!(resolution.source, RoleSource::Stored);
        assert_eq!(resolution.denied, Some(Role::Developer));
    }

    #[test]
    fn test_stale_stored_preference_falls_back_to_first() {
        let resolution =
            resolve_active_role(&[Role::Agent, Role::Landlord], Some(Role::Developer), None)
                .unwrap();
        assert_eq!(resolution.role, Role::Agent);
        assert_eq!(resolution.source, RoleSource::Fallback);
        assert_eq!(resolution.denied, None);
    }

    #[test]
    fn test_first_role_when_nothing_expressed() {
        let resolution = resolve_active_role(&[Role::Landlord], None, None).unwrap();
        assert_eq!(resolution.role, Role::Landlord);
        assert_eq!(resolution.source, RoleSource::Fallback);
    }
}
