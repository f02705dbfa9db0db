//! Filter predicates and canonical cache keys derived from [`SearchFilters`].
//!
//! Predicates are built in a fixed order (genre, actor, year, rating, text)
//! and a predicate is only emitted when its filter narrows the catalog, so
//! default filters cost nothing at evaluation time.

use std::collections::BTreeSet;
use std::fmt;

use marquee_model::{MovieRecord, ScalarRange, SearchFilters, SortBy, SortOrder};
use serde::Serialize;

/// A single narrowing step. All text comparisons are case-insensitive; the
/// needles are lower-cased when the predicate is built.
#[derive(Debug, Clone, PartialEq)]
pub enum MoviePredicate {
    /// Some selected genre equals one of the movie's genres.
    Genre(Vec<String>),
    /// Some selected fragment is a substring of some cast member's name.
    Actor(Vec<String>),
    Year(ScalarRange<u16>),
    Rating(ScalarRange<f32>),
    /// Substring of title, any genre, any cast name, or director.
    Text(String),
}

impl MoviePredicate {
    pub fn matches(&self, movie: &MovieRecord) -> bool {
        match self {
            MoviePredicate::Genre(wanted) => movie
                .genre
                .iter()
                .map(|genre| genre.to_lowercase())
                .any(|genre| wanted.iter().any(|w| *w == genre)),
            MoviePredicate::Actor(fragments) => movie
                .cast_names()
                .map(str::to_lowercase)
                .any(|name| fragments.iter().any(|f| name.contains(f.as_str()))),
            MoviePredicate::Year(range) => range.contains(&movie.year),
            MoviePredicate::Rating(range) => range.contains(&movie.rating),
            MoviePredicate::Text(needle) => {
                movie.title.to_lowercase().contains(needle.as_str())
                    || movie
                        .genre
                        .iter()
                        .any(|genre| genre.to_lowercase().contains(needle.as_str()))
                    || movie
                        .cast_names()
                        .any(|name| name.to_lowercase().contains(needle.as_str()))
                    || movie.director.to_lowercase().contains(needle.as_str())
            }
        }
    }

    /// Narrowing steps for `filters`, skipping every filter left at its
    /// "no restriction" default.
    pub fn for_filters(filters: &SearchFilters, reference_year: u16) -> Vec<Self> {
        let mut predicates = Vec::with_capacity(5);

        if !filters.genres.is_empty() {
            predicates.push(MoviePredicate::Genre(lowercase_all(&filters.genres)));
        }
        if !filters.actors.is_empty() {
            predicates.push(MoviePredicate::Actor(lowercase_all(&filters.actors)));
        }
        if filters.restricts_years(reference_year) {
            predicates.push(MoviePredicate::Year(filters.year_range));
        }
        if filters.restricts_rating() {
            predicates.push(MoviePredicate::Rating(filters.rating_range));
        }
        if let Some(text) = filters.text_query() {
            predicates.push(MoviePredicate::Text(text.to_lowercase()));
        }

        predicates
    }
}

fn lowercase_all(values: &BTreeSet<String>) -> Vec<String> {
    let mut lowered: Vec<String> = values.iter().map(|v| v.to_lowercase()).collect();
    lowered.sort_unstable();
    lowered.dedup();
    lowered
}

/// Canonical, order-independent cache key for a filter set.
///
/// Matching is case-insensitive and ignores surrounding whitespace on the
/// query, so the key normalizes the same way: two filter sets that select
/// the same movies in the same order share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchKey(String);

#[derive(Debug, Serialize)]
struct CanonicalFilters<'a> {
    query: String,
    genres: BTreeSet<String>,
    actors: BTreeSet<String>,
    year_range: &'a ScalarRange<u16>,
    rating_range: &'a ScalarRange<f32>,
    sort_by: SortBy,
    sort_order: SortOrder,
}

impl SearchKey {
    pub fn from_filters(filters: &SearchFilters) -> Self {
        let canonical = CanonicalFilters {
            query: filters.query.trim().to_lowercase(),
            genres: filters.genres.iter().map(|g| g.to_lowercase()).collect(),
            actors: filters.actors.iter().map(|a| a.to_lowercase()).collect(),
            year_range: &filters.year_range,
            rating_range: &filters.rating_range,
            sort_by: filters.sort_by,
            sort_order: filters.sort_order,
        };

        // Plain strings, sets and numbers cannot fail to serialize.
        let encoded = serde_json::to_string(&canonical)
            .unwrap_or_else(|_| format!("{canonical:?}"));
        SearchKey(encoded)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&SearchFilters> for SearchKey {
    fn from(filters: &SearchFilters) -> Self {
        Self::from_filters(filters)
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::{FilterPatch, MovieId};

    const YEAR: u16 = 2026;

    fn heat() -> MovieRecord {
        MovieRecord::new(MovieId::new("1").unwrap(), "Heat", 1995, 8.3)
            .unwrap()
            .with_genres(["Crime", "Thriller"])
            .with_cast(["Al Pacino", "Robert De Niro"])
            .with_director("Michael Mann")
    }

    fn filters(patch: FilterPatch) -> SearchFilters {
        let mut filters = SearchFilters::for_year(YEAR);
        patch.apply_to(&mut filters);
        filters
    }

    #[test]
    fn default_filters_produce_no_predicates() {
        let defaults = SearchFilters::for_year(YEAR);
        assert!(MoviePredicate::for_filters(&defaults, YEAR).is_empty());
    }

    #[test]
    fn predicates_follow_fixed_order() {
        let f = filters(
            FilterPatch::new()
                .query("heat")
                .rating_range(5.0, 9.0)
                .year_range(1990, 1999)
                .actors(["pacino"])
                .genres(["crime"]),
        );
        let kinds: Vec<_> = MoviePredicate::for_filters(&f, YEAR)
            .iter()
            .map(|p| match p {
                MoviePredicate::Genre(_) => "genre",
                MoviePredicate::Actor(_) => "actor",
                MoviePredicate::Year(_) => "year",
                MoviePredicate::Rating(_) => "rating",
                MoviePredicate::Text(_) => "text",
            })
            .collect();
        assert_eq!(kinds, vec!["genre", "actor", "year", "rating", "text"]);
    }

    #[test]
    fn genre_requires_whole_tag_match() {
        let movie = heat();
        assert!(MoviePredicate::Genre(vec!["crime".into()]).matches(&movie));
        assert!(!MoviePredicate::Genre(vec!["crim".into()]).matches(&movie));
    }

    #[test]
    fn actor_matches_name_fragments() {
        let movie = heat();
        assert!(MoviePredicate::Actor(vec!["de niro".into()]).matches(&movie));
        assert!(!MoviePredicate::Actor(vec!["kilmer".into()]).matches(&movie));
    }

    #[test]
    fn text_searches_every_field() {
        let movie = heat();
        for needle in ["hea", "thrill", "pacino", "mann"] {
            assert!(
                MoviePredicate::Text(needle.into()).matches(&movie),
                "expected '{needle}' to match"
            );
        }
        assert!(!MoviePredicate::Text("collateral".into()).matches(&movie));
    }

    #[test]
    fn key_ignores_set_order_case_and_query_padding() {
        let a = filters(FilterPatch::new().query(" Dune ").genres(["Sci-Fi", "Drama"]));
        let b = filters(FilterPatch::new().query("dune").genres(["drama", "sci-fi"]));
        assert_eq!(SearchKey::from_filters(&a), SearchKey::from_filters(&b));
    }

    #[test]
    fn key_distinguishes_sort_and_ranges() {
        let base = filters(FilterPatch::new().query("dune"));
        let by_year = filters(
            FilterPatch::new()
                .query("dune")
                .sort_by(SortBy::Year, SortOrder::Descending),
        );
        let narrow = filters(FilterPatch::new().query("dune").rating_range(8.0, 10.0));
        let base_key = SearchKey::from_filters(&base);
        assert_ne!(base_key, SearchKey::from_filters(&by_year));
        assert_ne!(base_key, SearchKey::from_filters(&narrow));
    }
}
