//! Ad entity - a classified listing owned by one user

use chrono::{DateTime, Utc};

use crate::value_objects::{AdId, UserId};

/// Classified ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ad {
    pub id: AdId,
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    pub price: i32,
    /// Blob reference of the ad image
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data required to insert an ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAd {
    pub author_id: UserId,
    pub title: String,
    pub description: String,
    pub price: i32,
    pub image: String,
}

/// Partial ad update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<i32>,
}

impl AdChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.price.is_none()
    }
}

impl Ad {
    #[inline]
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.author_id == user_id
    }

    /// Public URL serving the ad image
    pub fn image_url(&self) -> Option<String> {
        self.image.as_ref().map(|_| format!("/ads/{}/image", self.id))
    }

    /// Apply a partial update; the id and author never change
    pub fn apply(&mut self, changes: AdChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        self.updated_at = Utc::now();
    }

    /// Replace the image reference, returning the previous one
    pub fn set_image(&mut self, image: String) -> Option<String> {
        self.updated_at = Utc::now();
        self.image.replace(image)
    }
}
