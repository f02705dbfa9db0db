//! Sorting for planned search results
//!
//! This module provides:
//! - Field marker types naming each sortable column
//! - Key extraction per field
//! - A stable field sort strategy and runtime dispatch from [`SortBy`]
//!
//! [`SortBy`]: marquee_model::SortBy

pub mod fields;
pub mod strategy;
pub mod traits;


pub use fields::*;
pub use strategy::*;
pub use traits::*;
