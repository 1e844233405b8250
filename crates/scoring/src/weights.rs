//! Tunable weights and thresholds for every scorer.
//!
//! The defaults reproduce the marketplace's scoring formulas exactly. Each
//! group deserializes with `#[serde(default)]`, so a config file only needs
//! the values it overrides. Keys are camelCase, like the dataset files.

use serde::{Deserialize, Serialize};

/// Weights of the content-based score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentWeights {
    /// Service category is one of the user's preferred categories
    pub category: f64,
    /// Service price lies inside the user's price range
    pub price: f64,
    /// Service location equals the user's location
    pub location: f64,
    /// Service provider is one of the user's preferred providers
    pub provider: f64,
    /// Multiplier for the normalized rating (`rating / 5`)
    pub rating: f64,
}

impl Default for ContentWeights {
    fn default() -> Self {
        Self {
            category: 0.3,
            price: 0.2,
            location: 0.2,
            provider: 0.2,
            rating: 0.1,
        }
    }
}

/// Weights of the user-to-user similarity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SimilarityWeights {
    /// Per preferred category the two users share
    pub shared_category: f64,
    /// Per booked service the two users share
    pub shared_booking: f64,
    /// Both users have the same location
    pub same_location: f64,
}

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self {
            shared_category: 0.3,
            shared_booking: 0.5,
            same_location: 0.2,
        }
    }
}

/// Neighbor selection and per-neighbor contributions of the collaborative score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollaborativeWeights {
    /// Similarity must be strictly above this to count as a neighbor
    pub neighbor_threshold: f64,
    /// Contribution of a neighbor that booked the service
    pub booked: f64,
    /// Contribution of a neighbor that only viewed the service
    pub viewed: f64,
}

impl Default for CollaborativeWeights {
    fn default() -> Self {
        Self {
            neighbor_threshold: 0.3,
            booked: 0.5,
            viewed: 0.2,
        }
    }
}

/// How content and collaborative scores blend into the final score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlendWeights {
    pub content: f64,
    pub collaborative: f64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            content: 0.7,
            collaborative: 0.3,
        }
    }
}

impl BlendWeights {
    /// Weighted sum of the two component scores, clamped to `0.0..=1.0`
    pub fn blend(&self, content: f64, collaborative: f64) -> f64 {
        crate::clamp_unit(self.content * content + self.collaborative * collaborative)
    }
}

/// All scoring weights in one place
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoringWeights {
    pub content: ContentWeights,
    pub similarity: SimilarityWeights,
    pub collaborative: CollaborativeWeights,
    pub blend: BlendWeights,
}
