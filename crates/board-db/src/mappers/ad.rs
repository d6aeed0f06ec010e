//! Ad model -> entity mapper

use board_core::entities::Ad;
use board_core::value_objects::{AdId, UserId};

use crate::models::AdModel;

impl From<AdModel> for Ad {
    fn from(model: AdModel) -> Self {
        Ad {
            id: AdId::new(model.id),
            author_id: UserId::new(model.author_id),
            title: model.title,
            description: model.description,
            price: model.price,
            image: model.image,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
