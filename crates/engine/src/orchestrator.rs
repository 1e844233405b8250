//! # Recommendation Engine
//!
//! Coordinates the recommendation pipeline for one customer:
//! 1. Drop services the customer already booked (plus the optional filters)
//! 2. Find the customer's neighbors once
//! 3. Compute content / collaborative / final scores per candidate (rayon)
//! 4. Stable sort by final score, highest first
//! 5. Truncate to the limit and attach reasons
//!
//! The four scoring operations take plain slices and never fail. The
//! `*_for` methods work over a [`MarketplaceIndex`] and report unknown ids
//! through `anyhow`.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, instrument};

use catalog::{MarketplaceIndex, RecommendationScore, ServiceData, ServiceId, UserBehavior, UserId};
use pipeline::filters::{AlreadyBookedFilter, MinimumRatingFilter, SameLocationFilter};
use pipeline::{FilterPipeline, HybridScorer, ReasonBuilder, ScoreBreakdown};
use scoring::{trending_among, trending_services};

use crate::config::EngineConfig;

/// A recommendation joined with the service it points at
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRecommendation {
    pub service_id: ServiceId,
    pub title: String,
    pub category: String,
    pub location: String,
    pub price: f64,
    pub rating: f32,
    pub score: f64,
    pub content_score: f64,
    pub collaborative_score: f64,
    pub reasons: Vec<String>,
}

/// A neighbor of some user and how similar they are
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarUser {
    pub user_id: UserId,
    pub location: String,
    pub similarity: f64,
}

/// A candidate that made the final cut
struct Ranked<'a> {
    service: &'a ServiceData,
    breakdown: ScoreBreakdown,
    reasons: Vec<String>,
}

/// Hybrid content + collaborative recommender for service bookings
#[derive(Clone)]
pub struct RecommendationEngine {
    config: EngineConfig,
    scorer: HybridScorer,
    reasons: ReasonBuilder,
    filter_pipeline: Arc<FilterPipeline>,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::from_config(EngineConfig::default())
    }
}

impl RecommendationEngine {
    /// Create an engine with the default weights and no optional filters
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine from a config
    ///
    /// The filter pipeline always starts with `AlreadyBookedFilter`; the
    /// rating and location filters are added only when configured.
    pub fn from_config(config: EngineConfig) -> Self {
        let mut filter_pipeline = FilterPipeline::new().add_filter(AlreadyBookedFilter);
        if let Some(min_rating) = config.min_rating {
            filter_pipeline = filter_pipeline.add_filter(MinimumRatingFilter::new(min_rating));
        }
        if config.same_location_only {
            filter_pipeline = filter_pipeline.add_filter(SameLocationFilter);
        }

        Self {
            scorer: HybridScorer::from_weights(&config.weights),
            reasons: ReasonBuilder::new().with_top_rated_threshold(config.top_rated_threshold),
            filter_pipeline: Arc::new(filter_pipeline),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Names of the active filters, in application order
    pub fn filter_names(&self) -> Vec<&str> {
        self.filter_pipeline.filter_names()
    }

    // =========================================================================
    // Scoring operations
    // =========================================================================

    /// How well `service` matches the stated preferences of `user`, in `0.0..=1.0`
    pub fn calculate_content_score(&self, user: &UserBehavior, service: &ServiceData) -> f64 {
        self.scorer.content().score(user, service)
    }

    /// Raw similarity of `b` to `a`; not normalized, may exceed 1.0
    pub fn calculate_user_similarity(&self, a: &UserBehavior, b: &UserBehavior) -> f64 {
        self.scorer.collaborative().similarity(a, b)
    }

    /// Booked/viewed signal of `user`'s neighbors for `service`, in `0.0..=1.0`
    pub fn calculate_collaborative_score(
        &self,
        user: &UserBehavior,
        service: &ServiceData,
        population: &[UserBehavior],
    ) -> f64 {
        self.scorer.collaborative().score(user, &service.id, population)
    }

    /// Rank the services `user` has not booked and return the top `limit`.
    ///
    /// # Returns
    /// At most `limit` scores sorted highest first; equal scores keep
    /// catalog order.
    #[instrument(skip_all, fields(user_id = %user.user_id, services = services.len(), limit = limit))]
    pub fn generate_recommendations(
        &self,
        user: &UserBehavior,
        services: &[ServiceData],
        population: &[UserBehavior],
        limit: usize,
    ) -> Vec<RecommendationScore> {
        self.rank(user, services, population, limit)
            .into_iter()
            .map(|ranked| RecommendationScore {
                service_id: ranked.breakdown.service_id,
                score: ranked.breakdown.final_score,
                reasons: ranked.reasons,
            })
            .collect()
    }

    /// `generate_recommendations` with the configured default limit
    pub fn recommend(
        &self,
        user: &UserBehavior,
        services: &[ServiceData],
        population: &[UserBehavior],
    ) -> Vec<RecommendationScore> {
        self.generate_recommendations(user, services, population, self.config.default_limit)
    }

    /// The `limit` catalog services most booked by customers in `location`
    pub fn get_trending_services<'a>(
        &self,
        location: &str,
        population: &[UserBehavior],
        services: &'a [ServiceData],
        limit: usize,
    ) -> Vec<&'a ServiceData> {
        trending_services(location, population, services, limit)
    }

    // =========================================================================
    // Index-backed operations
    // =========================================================================

    /// Enriched recommendations for a user known to `index`
    pub fn recommend_for(
        &self,
        index: &MarketplaceIndex,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<ServiceRecommendation>> {
        let start_time = Instant::now();

        let user = index
            .get_user(user_id)
            .with_context(|| format!("Unknown user {user_id}"))?;

        let recommendations: Vec<ServiceRecommendation> = self
            .rank(user, index.services(), index.behaviors(), limit)
            .into_iter()
            .map(|ranked| ServiceRecommendation {
                service_id: ranked.service.id.clone(),
                title: ranked.service.title.clone(),
                category: ranked.service.category.clone(),
                location: ranked.service.location.clone(),
                price: ranked.service.price,
                rating: ranked.service.rating,
                score: ranked.breakdown.final_score,
                content_score: ranked.breakdown.content_score,
                collaborative_score: ranked.breakdown.collaborative_score,
                reasons: ranked.reasons,
            })
            .collect();

        info!(
            "Recommended {} services for user {} in {:.2?}",
            recommendations.len(),
            user_id,
            start_time.elapsed()
        );
        Ok(recommendations)
    }

    /// Trending services in `location` using the configured default limit
    /// when `limit` is `None`
    pub fn trending_for<'a>(
        &self,
        index: &'a MarketplaceIndex,
        location: &str,
        limit: Option<usize>,
    ) -> Vec<&'a ServiceData> {
        let limit = limit.unwrap_or(self.config.trending_limit);
        let residents = index
            .get_users_by_location(location)
            .iter()
            .filter_map(|user_id| index.get_user(user_id));
        trending_among(residents, index.services(), limit)
    }

    /// Neighbors of `user_id`, most similar first
    #[instrument(skip(self, index))]
    pub fn neighbors_of(&self, index: &MarketplaceIndex, user_id: &str) -> Result<Vec<SimilarUser>> {
        let user = index
            .get_user(user_id)
            .with_context(|| format!("Unknown user {user_id}"))?;

        let mut similar: Vec<SimilarUser> = self
            .scorer
            .collaborative()
            .find_neighbors(user, index.behaviors())
            .into_iter()
            .map(|n| SimilarUser {
                user_id: n.behavior.user_id.clone(),
                location: n.behavior.location.clone(),
                similarity: n.similarity,
            })
            .collect();

        similar.sort_by(|a, b| b.similarity.partial_cmp(&a.similarity).unwrap_or(Ordering::Equal));
        Ok(similar)
    }

    // =========================================================================
    // Pipeline stages
    // =========================================================================

    fn rank<'a>(
        &self,
        user: &UserBehavior,
        services: &'a [ServiceData],
        population: &[UserBehavior],
        limit: usize,
    ) -> Vec<Ranked<'a>> {
        if limit == 0 || services.is_empty() {
            return Vec::new();
        }

        let candidates = self.apply_filters(services.iter().collect(), user);
        let breakdowns = self.scorer.compute_breakdowns(&candidates, user, population);
        debug!("Scored {} candidates", breakdowns.len());

        let mut scored: Vec<(&'a ServiceData, ScoreBreakdown)> =
            candidates.into_iter().zip(breakdowns).collect();

        // Stable: ties keep catalog order
        scored.sort_by(|a, b| {
            b.1.final_score
                .partial_cmp(&a.1.final_score)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(service, breakdown)| Ranked {
                reasons: self.reasons.reasons(user, service),
                service,
                breakdown,
            })
            .collect()
    }

    fn apply_filters<'a>(
        &self,
        candidates: Vec<&'a ServiceData>,
        user: &UserBehavior,
    ) -> Vec<&'a ServiceData> {
        let before = candidates.len();
        let filtered = self.filter_pipeline.apply(candidates, user);
        debug!("Filtering complete, {} of {} candidates remain", filtered.len(), before);
        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::PriceRange;
    use catalog::sample::demo_marketplace;

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    fn create_test_user() -> UserBehavior {
        let mut user = UserBehavior::new("u1", "Lagos");
        user.preferences.categories = vec!["Cleaning".to_string()];
        user.preferences.price_range = PriceRange::new(10_000.0, 20_000.0);
        user
    }

    fn create_test_services() -> Vec<ServiceData> {
        vec![
            ServiceData::new("s1", "Deep Cleaning", "Cleaning", 15_000.0, "Lagos", 5.0, "p1"),
            ServiceData::new("s2", "Pipe Repair", "Plumbing", 8_000.0, "Abuja", 4.0, "p2"),
            ServiceData::new("s3", "Office Cleaning", "Cleaning", 30_000.0, "Lagos", 4.0, "p3"),
        ]
    }

    // ============================================================================
    // Scoring operations
    // ============================================================================

    #[test]
    fn test_content_score_example() {
        let engine = RecommendationEngine::new();
        let services = create_test_services();

        let score = engine.calculate_content_score(&create_test_user(), &services[0]);
        assert!((score - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_similarity_is_not_normalized() {
        let engine = RecommendationEngine::new();

        let mut a = UserBehavior::new("a", "Lagos");
        a.preferences.categories = vec!["Cleaning".into(), "Plumbing".into()];
        a.booked_services = vec!["s1".into(), "s2".into()];
        let mut b = a.clone();
        b.user_id = "b".into();

        // 2 * 0.3 + 2 * 0.5 + 0.2
        assert!((engine.calculate_user_similarity(&a, &b) - 1.8).abs() < 1e-9);
    }

    #[test]
    fn test_collaborative_score_empty_population() {
        let engine = RecommendationEngine::new();
        let services = create_test_services();

        assert_eq!(
            engine.calculate_collaborative_score(&create_test_user(), &services[0], &[]),
            0.0
        );
    }

    #[test]
    fn test_generate_recommendations_ranks_content_matches_first() {
        let engine = RecommendationEngine::new();
        let services = create_test_services();

        let recs = engine.generate_recommendations(&create_test_user(), &services, &[], 5);
        let ids: Vec<&str> = recs.iter().map(|r| r.service_id.as_str()).collect();

        // s1: 0.3+0.2+0.2+0.1 = 0.8 -> 0.56
        // s3: 0.3+0.2+0.08 = 0.58 -> 0.406
        // s2: 0.08 -> 0.056
        assert_eq!(ids, vec!["s1", "s3", "s2"]);
        assert!((recs[0].score - 0.56).abs() < 1e-9);
        assert_eq!(recs[2].reasons, vec![pipeline::FALLBACK_REASON.to_string()]);
    }

    #[test]
    fn test_generate_recommendations_skips_booked_and_truncates() {
        let engine = RecommendationEngine::new();
        let services = create_test_services();
        let mut user = create_test_user();
        user.booked_services = vec!["s1".to_string()];

        let recs = engine.generate_recommendations(&user, &services, &[], 1);
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].service_id, "s3");

        assert!(engine.generate_recommendations(&user, &services, &[], 0).is_empty());
        assert!(engine.generate_recommendations(&user, &[], &[], 5).is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let engine = RecommendationEngine::new();
        let user = UserBehavior::new("u1", "Kano");
        let services: Vec<ServiceData> = (0..8)
            .map(|i| ServiceData::new(format!("s{i}"), "Same", "Beauty", 1.0, "Lagos", 4.0, "p1"))
            .collect();

        let recs = engine.generate_recommendations(&user, &services, &[], 8);
        let ids: Vec<String> = recs.into_iter().map(|r| r.service_id).collect();
        let expected: Vec<String> = (0..8).map(|i| format!("s{i}")).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_configured_filters() {
        let config = EngineConfig {
            min_rating: Some(4.5),
            same_location_only: true,
            ..EngineConfig::default()
        };
        let engine = RecommendationEngine::from_config(config);
        assert_eq!(
            engine.filter_names(),
            vec!["AlreadyBookedFilter", "MinimumRatingFilter", "SameLocationFilter"]
        );

        let services = create_test_services();
        let recs = engine.generate_recommendations(&create_test_user(), &services, &[], 5);
        let ids: Vec<&str> = recs.iter().map(|r| r.service_id.as_str()).collect();
        assert_eq!(ids, vec!["s1"]);
    }

    #[test]
    fn test_recommend_uses_default_limit() {
        let engine = RecommendationEngine::from_config(EngineConfig {
            default_limit: 2,
            ..EngineConfig::default()
        });
        let services = create_test_services();

        assert_eq!(engine.recommend(&create_test_user(), &services, &[]).len(), 2);
    }

    // ============================================================================
    // Index-backed operations
    // ============================================================================

    #[test]
    fn test_recommend_for_demo_user() {
        let index = demo_marketplace().unwrap();
        let engine = RecommendationEngine::new();

        let recs = engine.recommend_for(&index, "u1", 5).unwrap();
        assert_eq!(recs.len(), 5);
        assert!(recs.iter().all(|r| r.service_id != "svc-001"));
        for rec in &recs {
            let service = index.get_service(&rec.service_id).unwrap();
            assert_eq!(rec.title, service.title);
            assert!((rec.score - (0.7 * rec.content_score + 0.3 * rec.collaborative_score)).abs() < 1e-9);
            assert!(!rec.reasons.is_empty());
        }
    }

    #[test]
    fn test_recommend_for_unknown_user() {
        let index = demo_marketplace().unwrap();
        let err = RecommendationEngine::new().recommend_for(&index, "nobody", 5).unwrap_err();
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn test_trending_for_lagos() {
        let index = demo_marketplace().unwrap();
        let engine = RecommendationEngine::new();

        let trending: Vec<&str> = engine
            .trending_for(&index, "Lagos", None)
            .iter()
            .map(|s| s.id.as_str())
            .collect();

        // Lagos bookings: svc-001 x3, svc-005 x2, then svc-003 before svc-007
        assert_eq!(trending, vec!["svc-001", "svc-005", "svc-003"]);
        assert!(engine.trending_for(&index, "Kano", None).is_empty());
    }

    #[test]
    fn test_trending_for_matches_population_scan() {
        let index = demo_marketplace().unwrap();
        let engine = RecommendationEngine::new();

        for location in index.locations() {
            let from_index = engine.trending_for(&index, location, Some(10));
            let scanned =
                engine.get_trending_services(location, index.behaviors(), index.services(), 10);
            assert_eq!(from_index, scanned, "trending mismatch in {location}");
        }
    }

    #[test]
    fn test_neighbors_of_sorted_and_excludes_self() {
        let index = demo_marketplace().unwrap();
        let engine = RecommendationEngine::new();

        let neighbors = engine.neighbors_of(&index, "u1").unwrap();
        assert!(!neighbors.is_empty());
        assert!(neighbors.iter().all(|n| n.user_id != "u1"));
        assert!(neighbors.windows(2).all(|w| w[0].similarity >= w[1].similarity));
        assert_eq!(neighbors[0].user_id, "u2");

        assert!(engine.neighbors_of(&index, "nobody").is_err());
    }
}
