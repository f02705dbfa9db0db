use chrono::Datelike;
use std::collections::BTreeSet;
use std::fmt;

/// Lower bound of the default year window.
pub const MIN_YEAR: u16 = 1900;
pub const MIN_RATING: f32 = 0.0;
pub const MAX_RATING: f32 = 10.0;

/// Current calendar year (UTC), used for the default year window and the
/// recency boost.
pub fn current_year() -> u16 {
    u16::try_from(chrono::Utc::now().year()).unwrap_or(u16::MAX)
}

/// Inclusive range for scalar filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScalarRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> ScalarRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

impl<T: PartialOrd> ScalarRange<T> {
    /// Inclusive on both ends.
    pub fn contains(&self, value: &T) -> bool {
        *value >= self.min && *value <= self.max
    }
}

impl ScalarRange<u16> {
    /// `[1900, reference_year]`
    pub fn default_years(reference_year: u16) -> Self {
        Self::new(MIN_YEAR, reference_year)
    }
}

impl ScalarRange<f32> {
    /// `[0, 10]`
    pub fn full_rating() -> Self {
        Self::new(MIN_RATING, MAX_RATING)
    }

    pub fn is_full_rating(&self) -> bool {
        self.min == MIN_RATING && self.max == MAX_RATING
    }
}

/// Fields available for sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortBy {
    #[default]
    Relevance,
    Rating,
    Year,
    Title,
}

impl SortBy {
    pub fn all() -> &'static [SortBy] {
        &[SortBy::Relevance, SortBy::Rating, SortBy::Year, SortBy::Title]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevance => "relevance",
            SortBy::Rating => "rating",
            SortBy::Year => "year",
            SortBy::Title => "title",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortOrder {
    #[cfg_attr(feature = "serde", serde(rename = "asc"))]
    Ascending,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "desc"))]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complete filter set of a search session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchFilters {
    /// Free-text query. Empty means "no text restriction".
    pub query: String,
    /// Selected genres; empty means every genre.
    pub genres: BTreeSet<String>,
    /// Selected actor-name fragments; empty means every cast.
    pub actors: BTreeSet<String>,
    pub year_range: ScalarRange<u16>,
    pub rating_range: ScalarRange<f32>,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self::for_year(current_year())
    }
}

impl SearchFilters {
    /// Defaults with the year window ending at `reference_year`.
    pub fn for_year(reference_year: u16) -> Self {
        Self {
            query: String::new(),
            genres: BTreeSet::new(),
            actors: BTreeSet::new(),
            year_range: ScalarRange::default_years(reference_year),
            rating_range: ScalarRange::full_rating(),
            sort_by: SortBy::default(),
            sort_order: SortOrder::default(),
        }
    }

    /// Trimmed query, or `None` when there is no text restriction.
    pub fn text_query(&self) -> Option<&str> {
        let trimmed = self.query.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn restricts_years(&self, reference_year: u16) -> bool {
        self.year_range != ScalarRange::default_years(reference_year)
    }

    pub fn restricts_rating(&self) -> bool {
        !self.rating_range.is_full_rating()
    }

    /// True when any field narrows the catalog.
    pub fn has_criteria(&self, reference_year: u16) -> bool {
        self.text_query().is_some()
            || !self.genres.is_empty()
            || !self.actors.is_empty()
            || self.restricts_years(reference_year)
            || self.restricts_rating()
    }
}

/// Partial update merged into [`SearchFilters`]; unset fields are retained.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterPatch {
    pub query: Option<String>,
    pub genres: Option<BTreeSet<String>>,
    pub actors: Option<BTreeSet<String>>,
    pub year_range: Option<ScalarRange<u16>>,
    pub rating_range: Option<ScalarRange<f32>>,
    pub sort_by: Option<SortBy>,
    pub sort_order: Option<SortOrder>,
}

impl FilterPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genres = Some(genres.into_iter().map(Into::into).collect());
        self
    }

    pub fn actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = Some(actors.into_iter().map(Into::into).collect());
        self
    }

    pub fn year_range(mut self, min: u16, max: u16) -> Self {
        self.year_range = Some(ScalarRange::new(min, max));
        self
    }

    pub fn rating_range(mut self, min: f32, max: f32) -> Self {
        self.rating_range = Some(ScalarRange::new(min, max));
        self
    }

    pub fn sort_by(mut self, field: SortBy, order: SortOrder) -> Self {
        self.sort_by = Some(field);
        self.sort_order = Some(order);
        self
    }

    pub fn sort_field(mut self, field: SortBy) -> Self {
        self.sort_by = Some(field);
        self
    }

    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.sort_order = Some(order);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Shallow merge into `filters`.
    pub fn apply_to(self, filters: &mut SearchFilters) {
        if let Some(query) = self.query {
            filters.query = query;
        }
        if let Some(genres) = self.genres {
            filters.genres = genres;
        }
        if let Some(actors) = self.actors {
            filters.actors = actors;
        }
        if let Some(range) = self.year_range {
            filters.year_range = range;
        }
        if let Some(range) = self.rating_range {
            filters.rating_range = range;
        }
        if let Some(sort_by) = self.sort_by {
            filters.sort_by = sort_by;
        }
        if let Some(order) = self.sort_order {
            filters.sort_order = order;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_browse_state() {
        let filters = SearchFilters::for_year(2026);
        assert_eq!(filters.year_range, ScalarRange::new(1900, 2026));
        assert_eq!(filters.rating_range, ScalarRange::new(0.0, 10.0));
        assert_eq!(filters.sort_by, SortBy::Relevance);
        assert_eq!(filters.sort_order, SortOrder::Descending);
        assert!(!filters.has_criteria(2026));
    }

    #[test]
    fn whitespace_query_is_not_a_criterion() {
        let mut filters = SearchFilters::for_year(2026);
        filters.query = "   ".into();
        assert_eq!(filters.text_query(), None);
        assert!(!filters.has_criteria(2026));

        filters.query = "  dune ".into();
        assert_eq!(filters.text_query(), Some("dune"));
        assert!(filters.has_criteria(2026));
    }

    #[test]
    fn patch_merges_only_specified_fields() {
        let mut filters = SearchFilters::for_year(2026);
        FilterPatch::new()
            .query("heat")
            .genres(["Crime"])
            .apply_to(&mut filters);
        FilterPatch::new().year_range(1990, 1999).apply_to(&mut filters);

        assert_eq!(filters.query, "heat");
        assert!(filters.genres.contains("Crime"));
        assert_eq!(filters.year_range, ScalarRange::new(1990, 1999));
        assert_eq!(filters.sort_by, SortBy::Relevance);
        assert!(filters.restricts_years(2026));
    }

    #[test]
    fn ranges_are_inclusive() {
        let years = ScalarRange::new(2023u16, 2024);
        assert!(years.contains(&2023));
        assert!(years.contains(&2024));
        assert!(!years.contains(&2022));

        let ratings = ScalarRange::new(7.0f32, 8.5);
        assert!(ratings.contains(&8.5));
        assert!(!ratings.contains(&8.6));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(FilterPatch::new().is_empty());
        assert!(!FilterPatch::new().sort_field(SortBy::Year).is_empty());
    }
}
