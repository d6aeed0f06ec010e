//! Acting identity

use super::UserRole;

/// The authenticated caller, as asserted by the identity provider.
///
/// Services never trust this beyond the email: the email is resolved to a stored
/// user and the stored role is what authorization decisions use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }
}
