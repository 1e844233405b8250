//! Free-text search over the service catalog.

use std::cmp::Ordering;

use catalog::ServiceData;
use tracing::debug;

/// Services whose title, category or one of whose tags contains `query`
/// (case-insensitive).
///
/// Exact title matches come first, the rest by rating, highest first.
/// A blank query matches nothing.
pub fn search_services<'a>(services: &'a [ServiceData], query: &str) -> Vec<&'a ServiceData> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(bool, &'a ServiceData)> = services
        .iter()
        .filter_map(|service| {
            let title = service.title.to_lowercase();
            let hit = title.contains(&needle)
                || service.category.to_lowercase().contains(&needle)
                || service.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            hit.then_some((title == needle, service))
        })
        .collect();

    matches.sort_by(|(a_exact, a), (b_exact, b)| {
        b_exact
            .cmp(a_exact)
            .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
    });

    debug!("Search {:?} matched {} services", query, matches.len());
    matches.into_iter().map(|(_, service)| service).collect()
}
