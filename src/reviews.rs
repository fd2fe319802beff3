//! Customer reviews, newest first, with two welcome reviews on first use.

use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::collection::{PersistedCollection, Renderer};
use crate::local_store::KeyValueStore;
use crate::record_id::{create_id, REVIEW_PREFIX};
use crate::records::{Review, REVIEWS_KEY};
use crate::timestamps::datestamp;

pub const ANONYMOUS: &str = "Anonymous";

const SEED_REVIEWS: [(&str, &str); 2] = [
    ("Priya S", "Amazing quality! Fast delivery. ⭐⭐⭐⭐⭐"),
    ("Arjun K", "Great experience. Good support. ⭐⭐⭐⭐"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSubmission {
    #[serde(default)]
    pub name: String,
    pub comment: String,
}

pub struct Reviews<'s> {
    reviews: PersistedCollection<'s, Review>,
}

impl<'s> Reviews<'s> {
    pub fn new(store: &'s dyn KeyValueStore, renderer: Option<&'s Renderer<Review>>) -> Self {
        Self {
            reviews: PersistedCollection::new(store, REVIEWS_KEY).with_renderer(renderer),
        }
    }

    pub fn ensure_seeded(&self) -> Result<bool, AppResponse> {
        self.reviews.ensure_seeded(|| {
            let date = datestamp();
            SEED_REVIEWS
                .iter()
                .map(|(name, text)| Review {
                    id: create_id(REVIEW_PREFIX),
                    name: (*name).to_string(),
                    text: (*text).to_string(),
                    date: date.clone(),
                })
                .collect()
        })
    }

    pub fn submit(&self, submission: &ReviewSubmission) -> Result<Review, AppResponse> {
        let text = submission.comment.trim();
        if text.is_empty() {
            return Err(AppResponse::validation("Please write a review/comment."));
        }

        let name = match submission.name.trim() {
            "" => ANONYMOUS,
            name => name,
        };

        let review = Review {
            id: create_id(REVIEW_PREFIX),
            name: name.to_string(),
            text: text.to_string(),
            date: datestamp(),
        };
        self.reviews.prepend(review.clone())?;
        Ok(review)
    }

    pub fn list(&self) -> Vec<Review> {
        self.reviews.load()
    }
}
