//! Filter to ensure a minimum quality threshold.
//!
//! Removes services rated below a configured floor. Off by default in the
//! engine; enabled through `EngineConfig::min_rating`.

use crate::traits::Filter;
use catalog::{ServiceData, UserBehavior};

/// Removes candidates rated below `min_rating`.
pub struct MinimumRatingFilter {
    min_rating: f32,
}

impl MinimumRatingFilter {
    /// Create a new MinimumRatingFilter.
    ///
    /// # Arguments
    /// * `min_rating` - Lowest rating (0.0 - 5.0) a service may have to be kept
    pub fn new(min_rating: f32) -> Self {
        Self { min_rating }
    }
}

impl Filter for MinimumRatingFilter {
    fn name(&self) -> &str {
        "MinimumRatingFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a ServiceData>,
        _user: &UserBehavior,
    ) -> Vec<&'a ServiceData> {
        candidates
            .into_iter()
            .filter(|service| service.rating >= self.min_rating)
            .collect()
    }
}
