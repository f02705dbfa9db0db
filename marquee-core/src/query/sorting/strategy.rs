//! Stable single-field sorting and dispatch from the filter's sort settings.

use std::cmp::Reverse;

use marquee_model::{SortBy, SortOrder};

use super::fields::{RatingField, RelevanceField, TitleField, YearField};
use super::traits::{SortFieldMarker, SortStrategy};
use crate::query::types::SearchResultItem;

/// Single field sort strategy
#[derive(Debug, Clone, Copy)]
pub struct FieldSort<F: SortFieldMarker> {
    pub field: F,
    pub reverse: bool,
}

impl<F: SortFieldMarker> FieldSort<F> {
    /// Create a new field sort strategy
    pub fn new(field: F, reverse: bool) -> Self {
        Self { field, reverse }
    }
}

impl<F: SortFieldMarker> SortStrategy for FieldSort<F> {
    fn sort(&self, items: &mut [SearchResultItem]) {
        // `sort_by_cached_key` is stable and extracts each key once.
        if self.reverse {
            items.sort_by_cached_key(|item| Reverse(self.field.key(item)));
        } else {
            items.sort_by_cached_key(|item| self.field.key(item));
        }
    }
}

/// Sort `items` in place by `sort_by` / `order`. Equal keys keep their
/// incoming (catalog) order in both directions.
pub fn sort_results(items: &mut [SearchResultItem], sort_by: SortBy, order: SortOrder) {
    let reverse = order == SortOrder::Descending;
    match sort_by {
        SortBy::Relevance => FieldSort::new(RelevanceField, reverse).sort(items),
        SortBy::Rating => FieldSort::new(RatingField, reverse).sort(items),
        SortBy::Year => FieldSort::new(YearField, reverse).sort(items),
        SortBy::Title => FieldSort::new(TitleField, reverse).sort(items),
    }
}
