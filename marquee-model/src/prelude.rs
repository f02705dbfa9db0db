//! Snapshot of the types surface for presentation layers.
//! Prefer importing from this module instead of individual tree nodes when
//! wiring a front end onto the search engine.

pub use super::error::{ModelError, Result as ModelResult};
pub use super::filters::{
    FilterPatch, ScalarRange, SearchFilters, SortBy, SortOrder,
};
pub use super::ids::MovieId;
pub use super::movie::{CastMember, MovieRecord};
