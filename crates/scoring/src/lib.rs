//! # Scoring Crate
//!
//! The scoring heuristics behind marketplace recommendations.
//!
//! ## Components
//!
//! ### Content Scorer
//! Matches a user's stated preferences (categories, price range, location,
//! providers) against a service's attributes, plus a rating term.
//!
//! ### Collaborative Scorer
//! "Customers like you booked this": finds neighbors by weighted overlap of
//! preferences, bookings and location, then averages their booked/viewed
//! signal for a service.
//!
//! ### Trending
//! Most-booked services among the customers of one location.
//!
//! ## Example Usage
//!
//! ```ignore
//! use scoring::{CollaborativeScorer, ContentScorer};
//!
//! let content = ContentScorer::new().score(&user, &service);
//! let collaborative = CollaborativeScorer::new().score(&user, &service.id, &population);
//! let trending = scoring::trending::trending_services("Lagos", &population, &services, 3);
//! ```
//!
//! All scorers are pure: they borrow their inputs and keep no state between calls.

pub mod weights;
pub mod content;
pub mod similarity;
pub mod collaborative;
pub mod trending;

pub use collaborative::{CollaborativeScorer, Neighbor};
pub use content::{ContentMatch, ContentScorer};
pub use similarity::user_similarity;
pub use trending::{BookingCount, booking_counts, trending_among, trending_services};
pub use weights::{BlendWeights, CollaborativeWeights, ContentWeights, ScoringWeights, SimilarityWeights};

/// Clamp a score into `0.0..=1.0`; NaN maps to 0.0
pub fn clamp_unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}
