//! Trending services per location.
//!
//! Counts the bookings made by population members who live in a given
//! location, then reports the most-booked services that exist in the
//! catalog. Ties keep the order in which each service was first seen while
//! scanning the population.

use catalog::{ServiceData, ServiceId, UserBehavior};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Booking count of one service within a location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCount {
    pub service_id: ServiceId,
    pub bookings: u32,
}

/// Tally bookings by members whose location equals `location`.
///
/// Returned in descending booking order; equal counts keep first-seen order.
pub fn booking_counts(location: &str, population: &[UserBehavior]) -> Vec<BookingCount> {
    tally(population.iter().filter(|m| m.location == location))
}

fn tally<'u>(members: impl IntoIterator<Item = &'u UserBehavior>) -> Vec<BookingCount> {
    let mut counts: Vec<BookingCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for member in members {
        for service_id in &member.booked_services {
            match positions.get(service_id.as_str()) {
                Some(&pos) => counts[pos].bookings += 1,
                None => {
                    positions.insert(service_id.as_str(), counts.len());
                    counts.push(BookingCount {
                        service_id: service_id.clone(),
                        bookings: 1,
                    });
                }
            }
        }
    }

    // Stable sort keeps first-seen order among ties
    counts.sort_by(|a, b| b.bookings.cmp(&a.bookings));
    counts
}

/// The `limit` most-booked catalog services in `location`.
///
/// Booked ids missing from `services` are skipped, so the result can hold
/// fewer than `limit` entries only when fewer distinct catalog services were
/// booked there.
#[instrument(skip(population, services), fields(population = population.len(), catalog = services.len()))]
pub fn trending_services<'a>(
    location: &str,
    population: &[UserBehavior],
    services: &'a [ServiceData],
    limit: usize,
) -> Vec<&'a ServiceData> {
    top_services(booking_counts(location, population), services, limit)
}

/// The `limit` catalog services most booked by `members`, whatever their
/// location.
///
/// Callers holding a location index pass the residents of one location
/// here instead of scanning the whole population.
pub fn trending_among<'a, 'u>(
    members: impl IntoIterator<Item = &'u UserBehavior>,
    services: &'a [ServiceData],
    limit: usize,
) -> Vec<&'a ServiceData> {
    top_services(tally(members), services, limit)
}

fn top_services<'a>(
    counts: Vec<BookingCount>,
    services: &'a [ServiceData],
    limit: usize,
) -> Vec<&'a ServiceData> {
    let catalog: HashMap<&str, &'a ServiceData> =
        services.iter().map(|s| (s.id.as_str(), s)).collect();
    debug!("Tallied {} booked services", counts.len());

    counts
        .iter()
        .filter_map(|count| catalog.get(count.service_id.as_str()).copied())
        .take(limit)
        .collect()
}
