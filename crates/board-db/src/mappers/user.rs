//! User model -> entity mapper

use board_core::entities::User;
use board_core::value_objects::{UserId, UserRole};
use tracing::warn;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        // An unrecognized stored role never grants admin rights
        let role = model.role.parse().unwrap_or_else(|_| {
            warn!(user_id = model.id, role = %model.role, "Unknown stored role, treating as USER");
            UserRole::Regular
        });

        User {
            id: UserId::new(model.id),
            email: model.email,
            first_name: model.first_name,
            last_name: model.last_name,
            phone: model.phone,
            role,
            avatar: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
