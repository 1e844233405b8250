//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config and
//! the defaults reproduce the stock marketplace behavior (no optional
//! filters, 5 recommendations, 3 trending services). Keys are camelCase,
//! matching the dataset files.

use anyhow::{Context, Result};
use scoring::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default number of recommendations returned
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

/// Default number of trending services returned
pub const DEFAULT_TRENDING_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub weights: ScoringWeights,
    pub default_limit: usize,
    pub trending_limit: usize,
    /// Rating at or above which a "highly rated" reason is attached
    pub top_rated_threshold: f32,
    /// Drop candidates rated below this
    pub min_rating: Option<f32>,
    /// Only recommend services in the user's own location
    pub same_location_only: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            default_limit: DEFAULT_RECOMMENDATION_LIMIT,
            trending_limit: DEFAULT_TRENDING_LIMIT,
            top_rated_threshold: pipeline::TOP_RATED_THRESHOLD,
            min_rating: None,
            same_location_only: false,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("Invalid engine config")
    }

    /// Load a config from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read engine config {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse engine config {}", path.display()))
    }
}
