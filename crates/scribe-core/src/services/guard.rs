//! Authorization guard.
//!
//! Two independent axes are checked before a mutation is allowed:
//!
//! - **ownership**: the actor proven by the token must match the actor id the
//!   request claims, and, once the target is loaded, the target's persisted owner
//!   must match that same id;
//! - **capability**: the actor's role must be one the endpoint accepts. This one is
//!   applied by the HTTP boundary before a service is called.

use crate::domain::{Id, Role};
use crate::error::{DomainError, DomainResult};

/// Compare the token-derived actor with the id supplied in the request.
///
/// Runs before any entity is loaded.
pub fn verify_ownership(token_actor: Id, claimed: Id) -> DomainResult<()> {
    if token_actor != claimed {
        tracing::warn!(token_actor, claimed, "actor mismatch");
        return Err(DomainError::AuthorValidationFailed);
    }
    Ok(())
}

/// Compare a loaded entity's persisted owner with the claimed actor.
///
/// Catches a request whose claim agrees with its token but targets someone
/// else's entity.
pub fn verify_entity_owner(owner: Id, claimed: Id) -> DomainResult<()> {
    if owner != claimed {
        tracing::warn!(owner, claimed, "entity owned by a different author");
        return Err(DomainError::AuthorIsDifferent);
    }
    Ok(())
}

/// Capability check: does `actor_role` appear in `required`?
pub fn has_any_role(actor_role: Role, required: &[Role]) -> bool {
    required.contains(&actor_role)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_actor_always_fails() {
        let err = verify_ownership(5, 7).unwrap_err();
        assert!(matches!(err, DomainError::AuthorValidationFailed));
        assert!(err.is_authorization_failure());
    }

    #[test]
    fn test_matching_actor_passes() {
        assert!(verify_ownership(5, 5).is_ok());
    }

    #[test]
    fn test_entity_owner_mismatch() {
        let err = verify_entity_owner(1, 2).unwrap_err();
        assert!(matches!(err, DomainError::AuthorIsDifferent));
        assert!(err.is_authorization_failure());
        assert!(verify_entity_owner(2, 2).is_ok());
    }

    #[test]
    fn test_has_any_role() {
        assert!(has_any_role(Role::Write, &[Role::Read, Role::Write]));
        assert!(!has_any_role(Role::Admin, &[Role::Write]));
        assert!(!has_any_role(Role::Read, &[]));
    }
}
