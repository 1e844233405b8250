//! Score breakdown for candidate services.
//!
//! For each candidate that survived filtering, computes the content score,
//! the collaborative score and their blend. The breakdown is kept whole so
//! explanations can show where a final score came from.

use catalog::{ServiceData, ServiceId, UserBehavior};
use rayon::prelude::*;
use scoring::{BlendWeights, CollaborativeScorer, ContentScorer, Neighbor, ScoringWeights};

/// Component scores of one candidate, each in `0.0..=1.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub service_id: ServiceId,
    pub content_score: f64,
    pub collaborative_score: f64,
    pub final_score: f64,
}

/// Computes score breakdowns for candidates in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct HybridScorer {
    content: ContentScorer,
    collaborative: CollaborativeScorer,
    blend: BlendWeights,
}

impl HybridScorer {
    /// Create a scorer with the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer from a full set of weights
    pub fn from_weights(weights: &ScoringWeights) -> Self {
        Self {
            content: ContentScorer::new().with_weights(weights.content),
            collaborative: CollaborativeScorer::new()
                .with_similarity_weights(weights.similarity)
                .with_weights(weights.collaborative),
            blend: weights.blend,
        }
    }

    pub fn content(&self) -> &ContentScorer {
        &self.content
    }

    pub fn collaborative(&self) -> &CollaborativeScorer {
        &self.collaborative
    }

    /// Compute breakdowns for all candidates.
    ///
    /// Neighbors are found once for the user and shared by every candidate.
    ///
    /// # Returns
    /// One ScoreBreakdown per candidate, in the same order
    pub fn compute_breakdowns(
        &self,
        candidates: &[&ServiceData],
        user: &UserBehavior,
        population: &[UserBehavior],
    ) -> Vec<ScoreBreakdown> {
        let neighbors = self.collaborative.find_neighbors(user, population);
        candidates
            .par_iter()
            .map(|service| self.compute_single(service, user, &neighbors))
            .collect()
    }

    /// Compute the breakdown of a single candidate.
    fn compute_single(
        &self,
        service: &ServiceData,
        user: &UserBehavior,
        neighbors: &[Neighbor<'_>],
    ) -> ScoreBreakdown {
        let content_score = self.content.score(user, service);
        let collaborative_score = self.collaborative.score_with_neighbors(&service.id, neighbors);

        ScoreBreakdown {
            service_id: service.id.clone(),
            content_score,
            collaborative_score,
            final_score: self.blend.blend(content_score, collaborative_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::PriceRange;

    #[test]
    fn test_breakdown_blends_components() {
        let mut user = UserBehavior::new("u1", "Lagos");
        user.preferences.categories = vec!["Cleaning".to_string()];
        user.preferences.price_range = PriceRange::new(10_000.0, 20_000.0);
        user.booked_services = vec!["s0".to_string()];

        // One neighbor (shares s0 + location) that booked s1
        let mut neighbor = UserBehavior::new("u2", "Lagos");
        neighbor.booked_services = vec!["s0".to_string(), "s1".to_string()];

        let services = vec![ServiceData::new("s1", "Deep Cleaning", "Cleaning", 15_000.0, "Lagos", 5.0, "p1")];
        let candidates: Vec<&ServiceData> = services.iter().collect();

        let breakdowns = HybridScorer::new().compute_breakdowns(&candidates, &user, &[neighbor]);

        assert_eq!(breakdowns.len(), 1);
        let b = &breakdowns[0];
        assert!((b.content_score - 0.8).abs() < 1e-9);
        assert!((b.collaborative_score - 0.5).abs() < 1e-9);
        assert!((b.final_score - (0.7 * 0.8 + 0.3 * 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_breakdowns_keep_candidate_order() {
        let user = UserBehavior::new("u1", "Lagos");
        let services: Vec<ServiceData> = (0..50)
            .map(|i| ServiceData::new(format!("s{i}"), "S", "Cleaning", 1.0, "Lagos", 4.0, "p1"))
            .collect();
        let candidates: Vec<&ServiceData> = services.iter().collect();

        let breakdowns = HybridScorer::new().compute_breakdowns(&candidates, &user, &[]);

        for (service, breakdown) in services.iter().zip(&breakdowns) {
            assert_eq!(service.id, breakdown.service_id);
            assert_eq!(breakdown.collaborative_score, 0.0);
        }
    }
}
