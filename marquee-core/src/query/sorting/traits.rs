//! Core traits for sortable search results

use crate::query::types::SearchResultItem;

/// Individual sort field with associated key type
///
/// Each field marker type implements this trait to specify its comparison
/// key and how that key is read from a result.
pub trait SortFieldMarker: Copy + Send + Sync + 'static {
    /// The type of key extracted for this field
    type Key: Ord;

    /// Unique identifier for this field
    const ID: &'static str;

    /// Extract the comparison key for `item`
    fn key(&self, item: &SearchResultItem) -> Self::Key;
}

/// A sorting strategy over planned results
pub trait SortStrategy: Send + Sync {
    /// Apply this sorting strategy to the given items. Implementations must
    /// be stable: items with equal keys keep their relative order.
    fn sort(&self, items: &mut [SearchResultItem]);
}
