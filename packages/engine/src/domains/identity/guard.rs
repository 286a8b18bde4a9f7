use serde::{Deserialize, Serialize};

use crate::common::{EngineError, IdentityId};

/// An authenticated submitter, as supplied by the external auth
/// collaborator. Threaded explicitly through every call that needs it —
/// the engine holds no ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub email: String,
    /// Whether the email belongs to the allowed campus domain.
    pub domain_verified: bool,
}

/// Stamps identities with the campus-domain verification flag.
#[derive(Debug, Clone)]
pub struct IdentityGuard {
    allowed_domain: String,
}

impl IdentityGuard {
    pub fn new(allowed_domain: &str) -> Self {
        Self {
            allowed_domain: allowed_domain.to_ascii_lowercase(),
        }
    }

    /// Build an [`Identity`] from the collaborator's raw claims, computing
    /// the domain verification flag.
    pub fn identify(&self, id: IdentityId, email: &str) -> Identity {
        Identity {
            id,
            email: email.to_string(),
            domain_verified: self.domain_matches(email),
        }
    }

    fn domain_matches(&self, email: &str) -> bool {
        email
            .rsplit_once('@')
            .map(|(_, domain)| domain.eq_ignore_ascii_case(&self.allowed_domain))
            .unwrap_or(false)
    }
}

/// Require a present, domain-verified identity. Used by the proposal
/// workflow; review submission accepts anonymous callers.
pub fn require_verified(identity: Option<&Identity>) -> Result<&Identity, EngineError> {
    match identity {
        Some(id) if id.domain_verified => Ok(id),
        Some(_) => Err(EngineError::Authorization(
            "a verified campus email address is required".to_string(),
        )),
        None => Err(EngineError::Authorization(
            "sign-in is required for this action".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> IdentityGuard {
        IdentityGuard::new("college.edu")
    }

    #[test]
    fn campus_email_is_verified() {
        let identity = guard().identify(IdentityId::new(), "student@college.edu");
        assert!(identity.domain_verified);
    }

    #[test]
    fn domain_check_is_case_insensitive() {
        let identity = guard().identify(IdentityId::new(), "student@College.EDU");
        assert!(identity.domain_verified);
    }

    #[test]
    fn foreign_domain_is_not_verified() {
        let identity = guard().identify(IdentityId::new(), "someone@gmail.com");
        assert!(!identity.domain_verified);
        assert!(require_verified(Some(&identity)).is_err());
    }

    #[test]
    fn missing_identity_is_rejected() {
        assert!(matches!(
            require_verified(None),
            Err(EngineError::Authorization(_))
        ));
    }
}
