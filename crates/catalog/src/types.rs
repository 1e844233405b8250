//! Core domain types for the service marketplace.
//!
//! This module defines the records the recommendation engine consumes and
//! produces. Every record is a fixed-field struct; the JSON shape uses
//! camelCase keys so the mock data of the booking front-end loads as-is.
//!
//! Key points:
//! - Type aliases for domain clarity (UserId, ServiceId, ProviderId)
//! - Construction-time clamping for out-of-range numeric fields
//! - `PriceRange` serializes as a `[min, max]` pair

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// Marketplace ids are opaque strings ("u1", "svc-cleaning-01", "p3")

/// Unique identifier for a customer
pub type UserId = String;

/// Unique identifier for a bookable service
pub type ServiceId = String;

/// Unique identifier for a service provider
pub type ProviderId = String;

/// Highest rating a service can carry
pub const MAX_RATING: f32 = 5.0;

// =============================================================================
// Service-related Types
// =============================================================================

/// A bookable service listed in the marketplace catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    pub id: ServiceId,
    pub title: String,
    /// Category label, e.g. "Cleaning" or "Plumbing"
    pub category: String,
    pub price: f64,
    /// Location label, compared by exact string equality
    pub location: String,
    /// Average rating from 0.0 to 5.0
    pub rating: f32,
    pub provider_id: ProviderId,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ServiceData {
    /// Create a service, clamping numeric fields into their valid ranges.
    ///
    /// - `rating` is clamped into `0.0..=5.0` (non-finite becomes 0.0)
    /// - `price` is floored at 0.0 (non-finite becomes 0.0)
    pub fn new(
        id: impl Into<ServiceId>,
        title: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        location: impl Into<String>,
        rating: f32,
        provider_id: impl Into<ProviderId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            category: category.into(),
            price: clamp_price(price),
            location: location.into(),
            rating: clamp_rating(rating),
            provider_id: provider_id.into(),
            tags: Vec::new(),
        }
    }

    /// Attach tags (builder style)
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Rating normalized to `0.0..=1.0`
    pub fn normalized_rating(&self) -> f64 {
        f64::from(clamp_rating(self.rating)) / f64::from(MAX_RATING)
    }
}

fn clamp_rating(rating: f32) -> f32 {
    if rating.is_finite() {
        rating.clamp(0.0, MAX_RATING)
    } else {
        0.0
    }
}

fn clamp_price(price: f64) -> f64 {
    if price.is_finite() { price.max(0.0) } else { 0.0 }
}

// =============================================================================
// User-related Types
// =============================================================================

/// Inclusive price window a customer is willing to pay.
///
/// A window with `min > max` is kept as-is and simply never matches.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `price` lies inside the window, bounds included
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: f64::MAX,
        }
    }
}

impl From<(f64, f64)> for PriceRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<PriceRange> for (f64, f64) {
    fn from(range: PriceRange) -> Self {
        (range.min, range.max)
    }
}

/// Stated preferences of a customer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceProfile {
    #[serde(default)]
    pub price_range: PriceRange,
    /// Preferred category labels
    #[serde(default)]
    pub categories: Vec<String>,
    /// Preferred provider ids
    #[serde(default)]
    pub providers: Vec<ProviderId>,
}

/// Browsing and booking behavior of one customer.
///
/// Viewed and booked lists are treated as sets; their order carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBehavior {
    pub user_id: UserId,
    #[serde(default)]
    pub viewed_services: Vec<ServiceId>,
    #[serde(default)]
    pub booked_services: Vec<ServiceId>,
    #[serde(default)]
    pub search_history: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub preferences: PreferenceProfile,
}

impl UserBehavior {
    /// Create a behavior profile with no history and open preferences
    pub fn new(user_id: impl Into<UserId>, location: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            viewed_services: Vec::new(),
            booked_services: Vec::new(),
            search_history: Vec::new(),
            location: location.into(),
            preferences: PreferenceProfile::default(),
        }
    }

    pub fn has_booked(&self, service_id: &str) -> bool {
        self.booked_services.iter().any(|id| id == service_id)
    }

    pub fn has_viewed(&self, service_id: &str) -> bool {
        self.viewed_services.iter().any(|id| id == service_id)
    }

    pub fn prefers_category(&self, category: &str) -> bool {
        self.preferences.categories.iter().any(|c| c == category)
    }

    pub fn prefers_provider(&self, provider_id: &str) -> bool {
        self.preferences.providers.iter().any(|p| p == provider_id)
    }
}

// =============================================================================
// Output Types
// =============================================================================

/// One ranked recommendation: a service id, its score in `0.0..=1.0`, and the
/// human-readable reasons shown next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationScore {
    pub service_id: ServiceId,
    pub score: f64,
    pub reasons: Vec<String>,
}

// =============================================================================
// MarketplaceIndex - The In-Memory Catalog
// =============================================================================

/// Holds every service and behavior profile plus lookup indices.
///
/// Records are kept in insertion order so that callers iterating the catalog
/// (and stable sorts over it) see a deterministic sequence. Id lookups go
/// through position maps.
#[derive(Debug, Default)]
pub struct MarketplaceIndex {
    // Primary data stores, in insertion order
    pub(crate) services: Vec<ServiceData>,
    pub(crate) behaviors: Vec<UserBehavior>,

    // Id -> position in the primary stores
    pub(crate) service_positions: HashMap<ServiceId, usize>,
    pub(crate) behavior_positions: HashMap<UserId, usize>,

    // Secondary indices
    /// Service ids grouped by category label
    pub(crate) category_index: HashMap<String, Vec<ServiceId>>,
    /// User ids grouped by location label
    pub(crate) location_index: HashMap<String, Vec<UserId>>,
}

impl MarketplaceIndex {
    /// Creates a new, empty index
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_service(&self, id: &str) -> Option<&ServiceData> {
        self.service_positions.get(id).map(|&pos| &self.services[pos])
    }

    pub fn get_user(&self, id: &str) -> Option<&UserBehavior> {
        self.behavior_positions.get(id).map(|&pos| &self.behaviors[pos])
    }

    /// The whole catalog, in insertion order
    pub fn services(&self) -> &[ServiceData] {
        &self.services
    }

    /// Every behavior profile, in insertion order
    pub fn behaviors(&self) -> &[UserBehavior] {
        &self.behaviors
    }

    /// Ids of services in a category (empty if none)
    pub fn get_services_by_category(&self, category: &str) -> &[ServiceId] {
        self.category_index
            .get(category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Ids of users living in a location (empty if none)
    pub fn get_users_by_location(&self, location: &str) -> &[UserId] {
        self.location_index
            .get(location)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Distinct location labels across services and users, sorted
    pub fn locations(&self) -> Vec<&str> {
        let mut locations: Vec<&str> = self
            .services
            .iter()
            .map(|s| s.location.as_str())
            .chain(self.behaviors.iter().map(|b| b.location.as_str()))
            .collect();
        locations.sort_unstable();
        locations.dedup();
        locations
    }

    /// Insert a service, replacing any existing service with the same id
    pub fn insert_service(&mut self, service: ServiceData) {
        match self.service_positions.get(&service.id) {
            Some(&pos) => self.services[pos] = service,
            None => {
                self.service_positions
                    .insert(service.id.clone(), self.services.len());
                self.services.push(service);
            }
        }
    }

    /// Insert a behavior profile, replacing any existing profile with the same user id
    pub fn insert_behavior(&mut self, behavior: UserBehavior) {
        match self.behavior_positions.get(&behavior.user_id) {
            Some(&pos) => self.behaviors[pos] = behavior,
            None => {
                self.behavior_positions
                    .insert(behavior.user_id.clone(), self.behaviors.len());
                self.behaviors.push(behavior);
            }
        }
    }

    /// Get counts for debugging/validation: (services, users, bookings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_bookings = self.behaviors.iter().map(|b| b.booked_services.len()).sum();
        (self.services.len(), self.behaviors.len(), total_bookings)
    }
}
