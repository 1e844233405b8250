//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to candidate services.

use catalog::{ServiceData, UserBehavior};

/// Core trait for filtering candidate services.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across threads
/// - Candidates are borrowed from the caller's catalog; filters take the
///   Vec by value and return the survivors, so nothing is cloned
/// - Filtering cannot fail: a filter that cannot decide keeps the candidate
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership of the Vec)
    /// * `user` - Behavior profile of the user being served
    fn apply<'a>(
        &self,
        candidates: Vec<&'a ServiceData>,
        user: &UserBehavior,
    ) -> Vec<&'a ServiceData>;
}
