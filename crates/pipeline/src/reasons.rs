//! Human-readable reasons attached to each recommendation.
//!
//! Three signals produce a reason: the service's category is one the user
//! prefers, the service is offered in the user's location, and the service
//! is rated at or above the top-rated threshold (4.5). When none applies a
//! single fallback reason is used, so every recommendation carries at least
//! one reason.

use catalog::{ServiceData, UserBehavior};

/// Reason used when no specific signal applies
pub const FALLBACK_REASON: &str = "Recommended based on your activity";

/// Default rating at or above which a service counts as top rated
pub const TOP_RATED_THRESHOLD: f32 = 4.5;

/// Builds reason strings for recommended services
#[derive(Debug, Clone, Copy)]
pub struct ReasonBuilder {
    top_rated_threshold: f32,
}

impl Default for ReasonBuilder {
    fn default() -> Self {
        Self {
            top_rated_threshold: TOP_RATED_THRESHOLD,
        }
    }
}

impl ReasonBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the top-rated threshold (default: 4.5)
    pub fn with_top_rated_threshold(mut self, threshold: f32) -> Self {
        self.top_rated_threshold = threshold;
        self
    }

    /// Reasons why `service` suits `user`; never empty
    pub fn reasons(&self, user: &UserBehavior, service: &ServiceData) -> Vec<String> {
        let mut reasons = Vec::new();

        if user.prefers_category(&service.category) {
            reasons.push(format!("Matches your interest in {}", service.category));
        }
        if user.location == service.location {
            reasons.push(format!("Available in {}", service.location));
        }
        if service.rating >= self.top_rated_threshold {
            reasons.push(format!("Highly rated ({:.1}/5)", service.rating));
        }

        if reasons.is_empty() {
            reasons.push(FALLBACK_REASON.to_string());
        }
        reasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_reasons() {
        let mut user = UserBehavior::new("u1", "Lagos");
        user.preferences.categories = vec!["Cleaning".to_string()];
        let service = ServiceData::new("s1", "Deep Cleaning", "Cleaning", 1.0, "Lagos", 4.8, "p1");

        let reasons = ReasonBuilder::new().reasons(&user, &service);
        assert_eq!(
            reasons,
            vec![
                "Matches your interest in Cleaning".to_string(),
                "Available in Lagos".to_string(),
                "Highly rated (4.8/5)".to_string(),
            ]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let user = UserBehavior::new("u1", "Abuja");
        let service = ServiceData::new("s1", "Braids", "Beauty", 1.0, "Lagos", 4.5, "p1");

        let reasons = ReasonBuilder::new().reasons(&user, &service);
        assert_eq!(reasons, vec!["Highly rated (4.5/5)".to_string()]);
    }

    #[test]
    fn test_fallback_reason() {
        let user = UserBehavior::new("u1", "Abuja");
        let service = ServiceData::new("s1", "Braids", "Beauty", 1.0, "Lagos", 4.4, "p1");

        let reasons = ReasonBuilder::new().reasons(&user, &service);
        assert_eq!(reasons, vec![FALLBACK_REASON.to_string()]);

        // Lowering the threshold turns the fallback into a rating reason
        let reasons = ReasonBuilder::new()
            .with_top_rated_threshold(4.0)
            .reasons(&user, &service);
        assert_eq!(reasons, vec!["Highly rated (4.4/5)".to_string()]);
    }
}
