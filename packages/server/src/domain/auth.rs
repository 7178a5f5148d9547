//! Bearer token verification collaborator.

use super::{error::AuthError, value_object::UserId};

/// Verifies a bearer token and yields the user it was issued to.
#[cfg_attr(test, mockall::automock)]
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}
