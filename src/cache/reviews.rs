use crate::cache::RegistrationStore;
use crate::models::Review;

impl RegistrationStore {
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Отзывы только отображаются, поэтому снимок просто заменяется целиком.
    pub fn replace_reviews(&mut self, reviews: Vec<Review>) {
        self.reviews = reviews;
    }
}
