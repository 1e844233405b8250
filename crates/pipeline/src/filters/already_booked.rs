//! Filter to remove services the user has already booked.
//!
//! This is always the first filter in the pipeline: a booked service is
//! never recommended again.

use crate::traits::Filter;
use catalog::{ServiceData, UserBehavior};
use std::collections::HashSet;

/// Removes candidates whose id appears in the user's booked services.
///
/// ## Algorithm
/// Builds a HashSet of booked ids once, then does O(1) lookups per candidate.
pub struct AlreadyBookedFilter;

impl Filter for AlreadyBookedFilter {
    fn name(&self) -> &str {
        "AlreadyBookedFilter"
    }

    fn apply<'a>(
        &self,
        candidates: Vec<&'a ServiceData>,
        user: &UserBehavior,
    ) -> Vec<&'a ServiceData> {
        let booked: HashSet<&str> = user.booked_services.iter().map(String::as_str).collect();
        candidates
            .into_iter()
            .filter(|service| !booked.contains(service.id.as_str()))
            .collect()
    }
}
