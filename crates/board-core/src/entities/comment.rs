//! Comment entity

use chrono::{DateTime, Utc};

use crate::value_objects::{AdId, CommentId, UserId};

/// Comment left on an ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: CommentId,
    pub ad_id: AdId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub ad_id: AdId,
    pub author_id: UserId,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    #[inline]
    pub fn belongs_to(&self, ad_id: AdId) -> bool {
        self.ad_id == ad_id
    }

    #[inline]
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Creation time as epoch milliseconds
    pub fn created_at_millis(&self) -> i64 {
        self.created_at.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_relation_checks() {
        let comment = Comment {
            id: CommentId::new(5),
            ad_id: AdId::new(2),
            author_id: UserId::new(9),
            text: "Is it still available?".to_string(),
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        };
        assert!(comment.belongs_to(AdId::new(2)));
        assert!(!comment.belongs_to(AdId::new(3)));
        assert!(comment.is_authored_by(UserId::new(9)));
        assert_eq!(comment.created_at_millis(), 1_700_000_000_123);
    }
}
