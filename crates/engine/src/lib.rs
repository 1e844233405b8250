//! Engine crate for the service marketplace recommender.
//!
//! Ties the catalog, the scorers and the filter pipeline together behind
//! [`RecommendationEngine`], configured by [`EngineConfig`].
//!
//! ## Example Usage
//! ```ignore
//! use catalog::sample::demo_marketplace;
//! use engine::RecommendationEngine;
//!
//! let index = demo_marketplace()?;
//! let engine = RecommendationEngine::new();
//!
//! for rec in engine.recommend_for(&index, "u1", 5)? {
//!     println!("{} {:.3} {:?}", rec.title, rec.score, rec.reasons);
//! }
//! let trending = engine.trending_for(&index, "Lagos", None);
//! ```

pub mod config;
pub mod orchestrator;
pub mod search;

pub use config::EngineConfig;
pub use orchestrator::{RecommendationEngine, ServiceRecommendation, SimilarUser};
pub use search::search_services;
