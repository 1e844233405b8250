//! # Catalog Crate
//!
//! Data model and in-memory catalog for the service marketplace.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (ServiceData, UserBehavior, RecommendationScore, MarketplaceIndex)
//! - **parser**: Decode `services.json` / `behaviors.json`
//! - **index**: Build and validate the MarketplaceIndex
//! - **sample**: The built-in demo marketplace
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::MarketplaceIndex;
//! use std::path::Path;
//!
//! let index = MarketplaceIndex::load_from_files(Path::new("data/marketplace"))?;
//!
//! let user = index.get_user("u1").unwrap();
//! let service = index.get_service("svc-001").unwrap();
//! println!("{} booked {} services", user.user_id, user.booked_services.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;
pub mod sample;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases
    UserId,
    ServiceId,
    ProviderId,
    // Core types
    ServiceData,
    UserBehavior,
    PreferenceProfile,
    PriceRange,
    RecommendationScore,
    MarketplaceIndex,
    MAX_RATING,
};
