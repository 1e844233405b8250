//! Collaborative Scoring - "customers like you booked this"
//!
//! ## Algorithm
//! 1. Compare the target user with every other member of the population
//! 2. Members whose similarity is strictly above the threshold (0.3) are
//!    neighbors; the target user is never its own neighbor
//! 3. Each neighbor contributes 0.5 if it booked the service, 0.2 if it
//!    only viewed it, nothing otherwise
//! 4. The score is the average contribution per neighbor, capped at 1.0;
//!    with no neighbors it is 0

use crate::clamp_unit;
use crate::similarity::user_similarity;
use crate::weights::{CollaborativeWeights, SimilarityWeights};
use catalog::UserBehavior;
use rayon::prelude::*;
use tracing::{debug, instrument};

/// A population member judged similar to the target user
#[derive(Debug, Clone, Copy)]
pub struct Neighbor<'a> {
    pub behavior: &'a UserBehavior,
    pub similarity: f64,
}

/// Scores services from the behavior of similar users
#[derive(Debug, Clone, Copy, Default)]
pub struct CollaborativeScorer {
    similarity: SimilarityWeights,
    weights: CollaborativeWeights,
}

impl CollaborativeScorer {
    /// Create a scorer with the default weights
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the similarity weights (builder style)
    pub fn with_similarity_weights(mut self, similarity: SimilarityWeights) -> Self {
        self.similarity = similarity;
        self
    }

    /// Configure neighbor contributions and threshold (builder style)
    pub fn with_weights(mut self, weights: CollaborativeWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Configure the neighbor threshold alone (default: 0.3)
    pub fn with_neighbor_threshold(mut self, threshold: f64) -> Self {
        self.weights.neighbor_threshold = threshold;
        self
    }

    /// Raw similarity between two users
    pub fn similarity(&self, a: &UserBehavior, b: &UserBehavior) -> f64 {
        user_similarity(a, b, &self.similarity)
    }

    /// Find the neighbors of `user` in `population`, in population order.
    ///
    /// Members sharing the user's id are skipped.
    #[instrument(skip_all, fields(user_id = %user.user_id, population = population.len()))]
    pub fn find_neighbors<'a>(
        &self,
        user: &UserBehavior,
        population: &'a [UserBehavior],
    ) -> Vec<Neighbor<'a>> {
        let neighbors: Vec<Neighbor<'a>> = population
            .par_iter()
            .filter(|other| other.user_id != user.user_id)
            .filter_map(|other| {
                let similarity = self.similarity(user, other);
                (similarity > self.weights.neighbor_threshold).then_some(Neighbor {
                    behavior: other,
                    similarity,
                })
            })
            .collect();

        debug!("Found {} neighbors", neighbors.len());
        neighbors
    }

    /// Collaborative score of one service given precomputed neighbors
    pub fn score_with_neighbors(&self, service_id: &str, neighbors: &[Neighbor<'_>]) -> f64 {
        if neighbors.is_empty() {
            return 0.0;
        }

        let total: f64 = neighbors
            .iter()
            .map(|n| {
                if n.behavior.has_booked(service_id) {
                    self.weights.booked
                } else if n.behavior.has_viewed(service_id) {
                    self.weights.viewed
                } else {
                    0.0
                }
            })
            .sum();

        clamp_unit(total / neighbors.len() as f64)
    }

    /// Collaborative score of `service_id` for `user`, in `0.0..=1.0`
    pub fn score(&self, user: &UserBehavior, service_id: &str, population: &[UserBehavior]) -> f64 {
        let neighbors = self.find_neighbors(user, population);
        self.score_with_neighbors(service_id, &neighbors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_population() -> (UserBehavior, Vec<UserBehavior>) {
        // Target user: Lagos, likes Cleaning, booked s1
        let mut target = UserBehavior::new("u1", "Lagos");
        target.preferences.categories = vec!["Cleaning".to_string()];
        target.booked_services = vec!["s1".to_string()];

        // Neighbor: shares category + booking + location (sim 1.0), booked s2
        let mut close = UserBehavior::new("u2", "Lagos");
        close.preferences.categories = vec!["Cleaning".to_string()];
        close.booked_services = vec!["s1".to_string(), "s2".to_string()];

        // Neighbor: shares category + location (sim 0.5), viewed s2
        let mut viewer = UserBehavior::new("u3", "Lagos");
        viewer.preferences.categories = vec!["Cleaning".to_string()];
        viewer.viewed_services = vec!["s2".to_string()];

        // Not a neighbor: only shares location (sim 0.2)
        let mut stranger = UserBehavior::new("u4", "Lagos");
        stranger.booked_services = vec!["s2".to_string()];

        let population = vec![target.clone(), close, viewer, stranger];
        (target, population)
    }

    #[test]
    fn test_find_neighbors_excludes_self_and_strangers() {
        let (target, population) = create_test_population();
        let scorer = CollaborativeScorer::new();

        let neighbors = scorer.find_neighbors(&target, &population);
        let ids: Vec<&str> = neighbors.iter().map(|n| n.behavior.user_id.as_str()).collect();

        assert_eq!(ids, vec!["u2", "u3"]);
    }

    #[test]
    fn test_score_averages_over_neighbors() {
        let (target, population) = create_test_population();
        let scorer = CollaborativeScorer::new();

        // (0.5 booked + 0.2 viewed) / 2 neighbors
        let score = scorer.score(&target, "s2", &population);
        assert!((score - 0.35).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn test_booked_takes_precedence_over_viewed() {
        let mut target = UserBehavior::new("u1", "Lagos");
        target.booked_services = vec!["s1".to_string()];

        let mut both = UserBehavior::new("u2", "Lagos");
        both.booked_services = vec!["s1".to_string(), "s2".to_string()];
        both.viewed_services = vec!["s2".to_string()];

        let score = CollaborativeScorer::new().score(&target, "s2", &[both]);
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_population_scores_zero() {
        let (target, _) = create_test_population();
        assert_eq!(CollaborativeScorer::new().score(&target, "s2", &[]), 0.0);
    }

    #[test]
    fn test_threshold_is_strict() {
        let target = UserBehavior::new("u1", "Lagos");
        let mut other = UserBehavior::new("u2", "Lagos");
        other.booked_services = vec!["s9".to_string()];

        // Similarity 0.2 (same location): below the default threshold
        let scorer = CollaborativeScorer::new();
        assert!(scorer.find_neighbors(&target, std::slice::from_ref(&other)).is_empty());

        // Exactly at the threshold still does not qualify
        let scorer = CollaborativeScorer::new().with_neighbor_threshold(0.2);
        assert!(scorer.find_neighbors(&target, std::slice::from_ref(&other)).is_empty());

        let scorer = CollaborativeScorer::new().with_neighbor_threshold(0.1);
        assert_eq!(scorer.find_neighbors(&target, &[other]).len(), 1);
    }

    #[test]
    fn test_score_capped_at_one() {
        let mut target = UserBehavior::new("u1", "Lagos");
        target.booked_services = vec!["s1".to_string()];
        let mut other = UserBehavior::new("u2", "Lagos");
        other.booked_services = vec!["s1".to_string(), "s2".to_string()];

        let weights = CollaborativeWeights {
            booked: 3.0,
            ..CollaborativeWeights::default()
        };
        let score = CollaborativeScorer::new()
            .with_weights(weights)
            .score(&target, "s2", &[other]);
        assert_eq!(score, 1.0);
    }
}
