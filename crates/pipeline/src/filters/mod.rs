//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod already_booked;
pub mod minimum_rating;
pub mod same_location;

// Re-export for convenience
pub use already_booked::AlreadyBookedFilter;
pub use minimum_rating::MinimumRatingFilter;
pub use same_location::SameLocationFilter;
