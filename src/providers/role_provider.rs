use std::collections::HashMap;

use crate::errors::InternalError;
use crate::errors::internal::AuthorizationError;
use crate::types::internal::auth::Principal;

pub const ROLE_MEMBER: &str = "Member";
pub const ROLE_ADMIN: &str = "Admin";

/// Outcome of a role check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Granted,
    /// No valid principal on the request
    Unauthenticated,
    /// Principal present but lacks the role
    Forbidden { role: String },
}

/// Map granted authority names to a role map
///
/// Every key maps to `true`; absence means not granted. Duplicates collapse.
pub fn extract_roles<I, S>(authorities: I) -> HashMap<String, bool>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    authorities
        .into_iter()
        .map(|authority| (authority.into(), true))
        .collect()
}

pub fn authorize(principal: Option<&Principal>, role: &str) -> AuthorizationDecision {
    match principal {
        None => AuthorizationDecision::Unauthenticated,
        Some(p) if p.has_role(role) => AuthorizationDecision::Granted,
        Some(_) => AuthorizationDecision::Forbidden {
            role: role.to_string(),
        },
    }
}

/// Guard for operations that need a role; call before touching any state
pub fn require_role<'a>(principal: Option<&'a Principal>, role: &str) -> Result<&'a Principal, InternalError> {
    match (authorize(principal, role), principal) {
        (AuthorizationDecision::Granted, Some(p)) => Ok(p),
        (AuthorizationDecision::Forbidden { role }, _) => {
            Err(AuthorizationError::RoleRequired { role }.into())
        }
        _ => Err(AuthorizationError::MissingPrincipal.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn principal_with(roles: &[&str]) -> Principal {
        Principal {
            user_id: 1,
            username: "resident".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    #[test]
    fn test_extract_roles_maps_every_name_to_true() {
        let roles = extract_roles(["Member", "Admin"]);

        assert_eq!(roles.len(), 2);
        assert_eq!(roles.get("Member"), Some(&true));
        assert_eq!(roles.get("Admin"), Some(&true));
        assert!(roles.values().all(|granted| *granted));
    }

    #[test]
    fn test_extract_roles_collapses_duplicates() {
        let roles = extract_roles(vec!["Member".to_string(), "Member".to_string()]);
        assert_eq!(roles, HashMap::from([("Member".to_string(), true)]));
    }

    #[test]
    fn test_extract_roles_empty() {
        assert!(extract_roles(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_authorize_decisions() {
        let member = principal_with(&[ROLE_MEMBER]);
        let admin = principal_with(&[ROLE_ADMIN]);

        assert_eq!(authorize(Some(&member), ROLE_MEMBER), AuthorizationDecision::Granted);
        assert_eq!(
            authorize(Some(&admin), ROLE_MEMBER),
            AuthorizationDecision::Forbidden { role: ROLE_MEMBER.to_string() }
        );
        assert_eq!(authorize(None, ROLE_MEMBER), AuthorizationDecision::Unauthenticated);
    }

    #[test]
    fn test_require_role_errors() {
        let admin = principal_with(&[ROLE_ADMIN]);

        assert!(matches!(
            require_role(None, ROLE_MEMBER),
            Err(InternalError::Authorization(AuthorizationError::MissingPrincipal))
        ));
        assert!(matches!(
            require_role(Some(&admin), ROLE_MEMBER),
            Err(InternalError::Authorization(AuthorizationError::RoleRequired { .. }))
        ));
        assert_eq!(require_role(Some(&admin), ROLE_ADMIN).unwrap().user_id, 1);
    }
}
