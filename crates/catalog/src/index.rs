//! MarketplaceIndex building and validation.
//!
//! Builds the index from parsed records:
//! - Reject duplicate ids
//! - Insert primary records in file order
//! - Build secondary indices (category, location)
//! - Validate numeric ranges

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

impl MarketplaceIndex {
    /// Load a marketplace dataset from a directory holding
    /// `services.json` and `behaviors.json`.
    ///
    /// Both files are parsed in parallel, then handed to [`Self::from_records`].
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        info!("Loading marketplace dataset from {:?}", data_dir);

        let services_path = data_dir.join(parser::SERVICES_FILE);
        let behaviors_path = data_dir.join(parser::BEHAVIORS_FILE);

        let (services, behaviors) = rayon::join(
            || parser::parse_services(&services_path),
            || parser::parse_behaviors(&behaviors_path),
        );
        let services = services?;
        let behaviors = behaviors?;

        info!(
            "Parsed {} services and {} behavior profiles",
            services.len(),
            behaviors.len()
        );

        Self::from_records(services, behaviors)
    }

    /// Build a validated index from in-memory records.
    ///
    /// Fails on duplicate ids or out-of-range numeric fields.
    pub fn from_records(services: Vec<ServiceData>, behaviors: Vec<UserBehavior>) -> Result<Self> {
        ensure_unique("service", services.iter().map(|s| s.id.as_str()))?;
        ensure_unique("user", behaviors.iter().map(|b| b.user_id.as_str()))?;

        let mut index = MarketplaceIndex::new();
        for service in services {
            index.insert_service(service);
        }
        for behavior in behaviors {
            index.insert_behavior(behavior);
        }

        index.build_secondary_indices();
        index.validate()?;

        let (services, users, bookings) = index.counts();
        info!(
            "Marketplace index ready: {} services, {} users, {} bookings",
            services, users, bookings
        );
        Ok(index)
    }

    /// Rebuild the category and location indices from the primary stores.
    ///
    /// Call after inserting records by hand.
    pub fn build_secondary_indices(&mut self) {
        self.category_index.clear();
        self.location_index.clear();

        for service in &self.services {
            self.category_index
                .entry(service.category.clone())
                .or_default()
                .push(service.id.clone());
        }

        for behavior in &self.behaviors {
            self.location_index
                .entry(behavior.location.clone())
                .or_default()
                .push(behavior.user_id.clone());
        }
    }

    /// Validate numeric fields.
    ///
    /// Check that:
    /// - service ratings lie in 0.0..=5.0
    /// - service prices are finite and non-negative
    /// - price range bounds are finite (an inverted range is allowed)
    ///
    /// Bookings of services missing from the catalog are allowed; they are
    /// simply never recommended or reported as trending.
    pub fn validate(&self) -> Result<()> {
        for service in &self.services {
            if !service.rating.is_finite() || !(0.0..=MAX_RATING).contains(&service.rating) {
                return Err(DataLoadError::InvalidValue {
                    field: format!("rating of service {}", service.id),
                    value: service.rating.to_string(),
                });
            }
            if !service.price.is_finite() || service.price < 0.0 {
                return Err(DataLoadError::InvalidValue {
                    field: format!("price of service {}", service.id),
                    value: service.price.to_string(),
                });
            }
        }

        for behavior in &self.behaviors {
            let range = behavior.preferences.price_range;
            if !range.min.is_finite() || !range.max.is_finite() {
                return Err(DataLoadError::InvalidValue {
                    field: format!("priceRange of user {}", behavior.user_id),
                    value: format!("[{}, {}]", range.min, range.max),
                });
            }
            if behavior.user_id.is_empty() {
                return Err(DataLoadError::ValidationError(
                    "behavior profile with empty userId".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn ensure_unique<'a>(entity: &str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataLoadError::DuplicateId {
                entity: entity.to_string(),
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
