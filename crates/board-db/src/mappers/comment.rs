//! Comment model -> entity mapper

use board_core::entities::Comment;
use board_core::value_objects::{AdId, CommentId, UserId};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::new(model.id),
            ad_id: AdId::new(model.ad_id),
            author_id: UserId::new(model.author_id),
            text: model.text,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_model_to_entity() {
        let comment = Comment::from(CommentModel {
            id: 3,
            ad_id: 2,
            author_id: 1,
            text: "Still for sale?".to_string(),
            created_at: Utc::now(),
        });
        assert_eq!(comment.id, CommentId::new(3));
        assert!(comment.belongs_to(AdId::new(2)));
        assert!(comment.is_authored_by(UserId::new(1)));
    }
}
