//! User entity - a registered account that owns ads and comments

use chrono::{DateTime, Utc};

use crate::value_objects::{UserId, UserRole};

/// Registered user. The email doubles as the login name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
    /// Blob reference of the avatar image, if one was uploaded
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert a user; the store assigns the id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub role: UserRole,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl User {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Public URL of the avatar, when the user has one
    pub fn avatar_url(&self) -> Option<String> {
        self.avatar
            .as_ref()
            .map(|_| format!("/users/{}/image", self.id))
    }

    /// Apply a partial profile update
    pub fn apply(&mut self, changes: UserChanges) {
        if let Some(first_name) = changes.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            self.last_name = last_name;
        }
        if let Some(phone) = changes.phone {
            self.phone = phone;
        }
        self.updated_at = Utc::now();
    }

    /// Replace the avatar reference, returning the previous one
    pub fn set_avatar(&mut self, avatar: Option<String>) -> Option<String> {
        self.updated_at = Utc::now();
        std::mem::replace(&mut self.avatar, avatar)
    }
}
