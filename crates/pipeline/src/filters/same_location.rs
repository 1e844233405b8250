//! Optional filter for location.
//!
//! Keeps only services offered in the user's own location. Off by default
//! in the engine; enabled through `EngineConfig::same_location_only`.

use crate::traits::Filter;
use catalog::{ServiceData, UserBehavior};

/// Keeps candidates whose location equals the user's location.
pub struct SameLocationFilter;

impl Filter for SameLocationFilter {
    fn name(&self) -> &str {
        "SameLocationFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a ServiceData>,
        user: &UserBehavior,
    ) -> Vec<&'a ServiceData> {
        candidates
            .into_iter()
            .filter(|service| service.location == user.location)
            .collect()
    }
}
