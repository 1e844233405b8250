//! User-to-user similarity.
//!
//! A raw weighted overlap, not a normalized metric:
//!
//! ```text
//! sim(a, b) = shared_categories * 0.3 + shared_bookings * 0.5 + same_location * 0.2
//! ```
//!
//! Shared counts walk `a`'s lists and test membership in `b`'s, so the
//! result is unbounded above (many shared bookings push it past 1.0).

use crate::weights::SimilarityWeights;
use catalog::UserBehavior;
use std::collections::HashSet;

/// Number of `a`'s preferred categories that `b` also prefers
pub fn shared_categories(a: &UserBehavior, b: &UserBehavior) -> usize {
    let theirs: HashSet<&str> = b.preferences.categories.iter().map(String::as_str).collect();
    a.preferences
        .categories
        .iter()
        .filter(|c| theirs.contains(c.as_str()))
        .count()
}

/// Number of `a`'s booked services that `b` also booked
pub fn shared_bookings(a: &UserBehavior, b: &UserBehavior) -> usize {
    let theirs: HashSet<&str> = b.booked_services.iter().map(String::as_str).collect();
    a.booked_services
        .iter()
        .filter(|s| theirs.contains(s.as_str()))
        .count()
}

/// Weighted overlap between two behavior profiles
pub fn user_similarity(a: &UserBehavior, b: &UserBehavior, weights: &SimilarityWeights) -> f64 {
    let categories = shared_categories(a, b) as f64 * weights.shared_category;
    let bookings = shared_bookings(a, b) as f64 * weights.shared_booking;
    let location = if a.location == b.location {
        weights.same_location
    } else {
        0.0
    };
    categories + bookings + location
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, location: &str, categories: &[&str], booked: &[&str]) -> UserBehavior {
        let mut behavior = UserBehavior::new(id, location);
        behavior.preferences.categories = categories.iter().map(|s| s.to_string()).collect();
        behavior.booked_services = booked.iter().map(|s| s.to_string()).collect();
        behavior
    }

    #[test]
    fn test_similarity_components() {
        let a = user("a", "Lagos", &["Cleaning", "Plumbing"], &["s1", "s2"]);
        let b = user("b", "Lagos", &["Cleaning"], &["s2", "s3"]);

        // 1 shared category, 1 shared booking, same location
        let sim = user_similarity(&a, &b, &SimilarityWeights::default());
        assert!((sim - (0.3 + 0.5 + 0.2)).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_is_not_normalized() {
        let a = user("a", "Lagos", &[], &["s1", "s2", "s3"]);
        let b = user("b", "Abuja", &[], &["s1", "s2", "s3"]);

        // Three shared bookings alone exceed 1.0
        let sim = user_similarity(&a, &b, &SimilarityWeights::default());
        assert!((sim - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_users() {
        let a = user("a", "Lagos", &["Cleaning"], &["s1"]);
        let b = user("b", "Abuja", &["Beauty"], &["s9"]);

        assert_eq!(user_similarity(&a, &b, &SimilarityWeights::default()), 0.0);
    }

    #[test]
    fn test_duplicates_on_left_counted_each_time() {
        let a = user("a", "X", &["Cleaning", "Cleaning"], &[]);
        let b = user("b", "Y", &["Cleaning"], &[]);

        assert_eq!(shared_categories(&a, &b), 2);
        assert_eq!(shared_categories(&b, &a), 1);
    }
}
