//! Core data model definitions shared across Marquee crates.
#![allow(missing_docs)]

pub mod error;
pub mod filters;
pub mod ids;
pub mod movie;
pub mod prelude;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use filters::{
    FilterPatch, MAX_RATING, MIN_RATING, MIN_YEAR, ScalarRange, SearchFilters,
    SortBy, SortOrder, current_year,
};
pub use ids::MovieId;
pub use movie::{CastMember, MovieRecord};
