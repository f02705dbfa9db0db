//! Field marker types for sorting
//!
//! These zero-sized types represent the columns a search can be ordered by.

use super::traits::SortFieldMarker;
use crate::query::types::SearchResultItem;
use ordered_float::OrderedFloat;

/// Sort by relevance score (query score or rating fallback)
#[derive(Copy, Clone, Debug)]
pub struct RelevanceField;

impl SortFieldMarker for RelevanceField {
    type Key = OrderedFloat<f64>;
    const ID: &'static str = "relevance";

    fn key(&self, item: &SearchResultItem) -> Self::Key {
        OrderedFloat(item.relevance_score())
    }
}

/// Sort by catalog rating
#[derive(Copy, Clone, Debug)]
pub struct RatingField;

impl SortFieldMarker for RatingField {
    type Key = OrderedFloat<f32>;
    const ID: &'static str = "rating";

    fn key(&self, item: &SearchResultItem) -> Self::Key {
        OrderedFloat(item.movie.rating)
    }
}

/// Sort by release year
#[derive(Copy, Clone, Debug)]
pub struct YearField;

impl SortFieldMarker for YearField {
    type Key = u16;
    const ID: &'static str = "year";

    fn key(&self, item: &SearchResultItem) -> Self::Key {
        item.movie.year
    }
}

/// Sort by title, case-sensitive lexicographic
#[derive(Copy, Clone, Debug)]
pub struct TitleField;

impl SortFieldMarker for TitleField {
    type Key = String;
    const ID: &'static str = "title";

    fn key(&self, item: &SearchResultItem) -> Self::Key {
        item.movie.title.clone()
    }
}
