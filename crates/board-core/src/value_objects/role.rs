//! User role

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user account.
///
/// Stored and serialized as `USER` / `ADMIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    #[serde(rename = "USER")]
    Regular,
    #[serde(rename = "ADMIN")]
    Admin,
}

/// Error when parsing a role name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl UserRole {
    /// Canonical storage name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regular => "USER",
            Self::Admin => "ADMIN",
        }
    }

    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" => Ok(Self::Regular),
            "ADMIN" => Ok(Self::Admin),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("user".parse::<UserRole>().unwrap(), UserRole::Regular);
        assert_eq!(UserRole::Admin.to_string(), "ADMIN");
        assert!("root".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_default_is_regular() {
        assert_eq!(UserRole::default(), UserRole::Regular);
        assert!(!UserRole::default().is_admin());
    }
}
