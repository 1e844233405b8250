//! Built-in demo marketplace.
//!
//! The same providers, services and customers as `data/marketplace/*.json`,
//! available without touching the filesystem. The CLI falls back to this
//! dataset when no `--data-dir` is given; tests and benches use it as a
//! realistic fixture.

use crate::error::Result;
use crate::types::{MarketplaceIndex, PriceRange, ServiceData, UserBehavior};

/// The demo service catalog
pub fn demo_services() -> Vec<ServiceData> {
    vec![
        ServiceData::new("svc-001", "Deep Home Cleaning", "Cleaning", 15_000.0, "Lagos", 4.8, "p1")
            .with_tags(["home", "deep-clean"]),
        ServiceData::new("svc-002", "Office Cleaning", "Cleaning", 25_000.0, "Lagos", 4.3, "p1")
            .with_tags(["office"]),
        ServiceData::new("svc-003", "Emergency Plumbing", "Plumbing", 12_000.0, "Lagos", 4.6, "p2")
            .with_tags(["emergency", "pipes"]),
        ServiceData::new(
            "svc-004",
            "Bathroom Fittings Installation",
            "Plumbing",
            30_000.0,
            "Abuja",
            4.2,
            "p2",
        )
        .with_tags(["bathroom"]),
        ServiceData::new("svc-005", "Generator Repair", "Electrical", 18_000.0, "Lagos", 4.7, "p3")
            .with_tags(["generator"]),
        ServiceData::new("svc-006", "House Wiring", "Electrical", 45_000.0, "Abuja", 4.4, "p3")
            .with_tags(["wiring"]),
        ServiceData::new("svc-007", "Bridal Makeup", "Beauty", 35_000.0, "Lagos", 4.9, "p4")
            .with_tags(["wedding", "makeup"]),
        ServiceData::new("svc-008", "Braiding at Home", "Beauty", 8_000.0, "Port Harcourt", 4.5, "p4")
            .with_tags(["hair"]),
        ServiceData::new("svc-009", "AC Servicing", "Appliance Repair", 10_000.0, "Abuja", 4.1, "p5")
            .with_tags(["ac", "cooling"]),
        ServiceData::new("svc-010", "Fridge Repair", "Appliance Repair", 9_000.0, "Lagos", 3.9, "p5")
            .with_tags(["fridge"]),
    ]
}

#[allow(clippy::too_many_arguments)]
fn customer(
    user_id: &str,
    location: &str,
    viewed: &[&str],
    booked: &[&str],
    searches: &[&str],
    price_range: (f64, f64),
    categories: &[&str],
    providers: &[&str],
) -> UserBehavior {
    let mut behavior = UserBehavior::new(user_id, location);
    behavior.viewed_services = viewed.iter().map(|s| s.to_string()).collect();
    behavior.booked_services = booked.iter().map(|s| s.to_string()).collect();
    behavior.search_history = searches.iter().map(|s| s.to_string()).collect();
    behavior.preferences.price_range = PriceRange::from(price_range);
    behavior.preferences.categories = categories.iter().map(|s| s.to_string()).collect();
    behavior.preferences.providers = providers.iter().map(|s| s.to_string()).collect();
    behavior
}

/// The demo customer behavior profiles
pub fn demo_behaviors() -> Vec<UserBehavior> {
    vec![
        customer(
            "u1",
            "Lagos",
            &["svc-002", "svc-005"],
            &["svc-001"],
            &["cleaner", "generator repair"],
            (10_000.0, 20_000.0),
            &["Cleaning", "Electrical"],
            &["p3"],
        ),
        customer(
            "u2",
            "Lagos",
            &["svc-003"],
            &["svc-001", "svc-005"],
            &["house cleaning"],
            (5_000.0, 25_000.0),
            &["Cleaning", "Electrical"],
            &["p1"],
        ),
        customer(
            "u3",
            "Lagos",
            &["svc-007", "svc-010"],
            &["svc-003", "svc-001"],
            &["plumber", "leaking pipe"],
            (8_000.0, 40_000.0),
            &["Plumbing", "Cleaning"],
            &[],
        ),
        customer(
            "u4",
            "Abuja",
            &["svc-009"],
            &["svc-006", "svc-004"],
            &["electrician"],
            (20_000.0, 50_000.0),
            &["Electrical", "Plumbing"],
            &["p2"],
        ),
        customer(
            "u5",
            "Port Harcourt",
            &["svc-007"],
            &["svc-008"],
            &["braids"],
            (5_000.0, 15_000.0),
            &["Beauty"],
            &["p4"],
        ),
        customer(
            "u6",
            "Lagos",
            &["svc-001"],
            &["svc-007", "svc-005"],
            &["makeup artist", "generator"],
            (10_000.0, 40_000.0),
            &["Beauty", "Electrical"],
            &["p4"],
        ),
    ]
}

/// The demo marketplace as a validated index
pub fn demo_marketplace() -> Result<MarketplaceIndex> {
    MarketplaceIndex::from_records(demo_services(), demo_behaviors())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_demo_marketplace_is_valid() {
        let index = demo_marketplace().unwrap();
        assert_eq!(index.counts(), (10, 6, 10));
        assert_eq!(index.get_users_by_location("Lagos").len(), 4);
    }

    #[test]
    fn test_demo_matches_shipped_dataset() {
        let data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/marketplace");

        if data_dir.exists() {
            let loaded = MarketplaceIndex::load_from_files(&data_dir).unwrap();
            assert_eq!(loaded.services(), demo_services().as_slice());
            assert_eq!(loaded.behaviors(), demo_behaviors().as_slice());
        }
    }
}
