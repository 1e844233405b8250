//! Content-based scoring.
//!
//! Matches a user's stated preferences against a service's static
//! attributes:
//!
//! | signal                                   | default weight     |
//! |------------------------------------------|--------------------|
//! | category in preferred categories         | 0.3                |
//! | price inside preferred range (inclusive) | 0.2                |
//! | location equals user location            | 0.2                |
//! | provider in preferred providers          | 0.2                |
//! | rating                                   | `(rating/5) * 0.1` |
//!
//! The sum is capped at 1.0.

use crate::clamp_unit;
use crate::weights::ContentWeights;
use catalog::{ServiceData, UserBehavior};

/// Which preference signals a service matched for a user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentMatch {
    pub category: bool,
    pub price: bool,
    pub location: bool,
    pub provider: bool,
}

impl ContentMatch {
    /// Evaluate every boolean signal of `service` against `user`
    pub fn evaluate(user: &UserBehavior, service: &ServiceData) -> Self {
        Self {
            category: user.prefers_category(&service.category),
            price: user.preferences.price_range.contains(service.price),
            location: user.location == service.location,
            provider: user.prefers_provider(&service.provider_id),
        }
    }
}

/// Scores services against one user's preferences
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentScorer {
    weights: ContentWeights,
}

impl ContentScorer {
    /// Create a scorer with the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the weights (builder style)
    pub fn with_weights(mut self, weights: ContentWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Content score of `service` for `user`, in `0.0..=1.0`
    pub fn score(&self, user: &UserBehavior, service: &ServiceData) -> f64 {
        let matched = ContentMatch::evaluate(user, service);
        let w = &self.weights;

        let mut score = 0.0;
        if matched.category {
            score += w.category;
        }
        if matched.price {
            score += w.price;
        }
        if matched.location {
            score += w.location;
        }
        if matched.provider {
            score += w.provider;
        }
        score += service.normalized_rating() * w.rating;

        clamp_unit(score)
    }
}
