//! Pipeline for filtering, scoring and explaining candidate services.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - HybridScorer for content/collaborative score breakdowns
//! - ReasonBuilder for the reason strings shown with each recommendation
//!
//! ## Architecture
//! The pipeline processes candidates in stages:
//! 1. Filters remove unwanted candidates (already booked, optionally low rated or remote)
//! 2. HybridScorer computes a score breakdown for each remaining candidate
//! 3. ReasonBuilder explains each candidate that makes the final cut
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{FilterPipeline, HybridScorer, ReasonBuilder};
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(AlreadyBookedFilter)
//!     .add_filter(MinimumRatingFilter::new(4.0));
//!
//! let filtered = pipeline.apply(services.iter().collect(), &user);
//! let breakdowns = HybridScorer::new().compute_breakdowns(&filtered, &user, &population);
//! let reasons = ReasonBuilder::new().reasons(&user, filtered[0]);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod features;
pub mod reasons;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use features::{HybridScorer, ScoreBreakdown};
pub use reasons::{ReasonBuilder, FALLBACK_REASON, TOP_RATED_THRESHOLD};
