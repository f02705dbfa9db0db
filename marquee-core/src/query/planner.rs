//! Pure, synchronous query evaluation: filter, score, sort.

use marquee_model::SearchFilters;
use tracing::trace;

use super::filtering::MoviePredicate;
use super::scoring::{RelevanceScorer, fallback_score};
use super::sorting::sort_results;
use super::types::{PlannedResults, RelevanceScore, SearchResultItem};
use crate::catalog::Catalog;

/// Plans against the current calendar year.
///
/// Equivalent to `QueryPlanner::default().plan(..)`.
pub fn plan(filters: &SearchFilters, catalog: &Catalog) -> PlannedResults {
    QueryPlanner::default().plan(filters, catalog)
}

/// Plans with the default year window and recency boost anchored at
/// `reference_year`.
pub fn plan_at(
    filters: &SearchFilters,
    catalog: &Catalog,
    reference_year: u16,
) -> PlannedResults {
    QueryPlanner::new(reference_year).plan(filters, catalog)
}

/// Evaluates [`SearchFilters`] over a [`Catalog`].
///
/// The planner never mutates the catalog. Output is the complete matching
/// list; pagination is the caller's concern.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryPlanner {
    scorer: RelevanceScorer,
}

impl QueryPlanner {
    pub fn new(reference_year: u16) -> Self {
        Self {
            scorer: RelevanceScorer::new(reference_year),
        }
    }

    pub fn reference_year(&self) -> u16 {
        self.scorer.reference_year()
    }

    pub fn plan(&self, filters: &SearchFilters, catalog: &Catalog) -> PlannedResults {
        let predicates =
            MoviePredicate::for_filters(filters, self.scorer.reference_year());
        let query = filters.text_query();

        let mut items: Vec<SearchResultItem> = catalog
            .movies()
            .iter()
            .filter(|movie| predicates.iter().all(|p| p.matches(movie)))
            .map(|movie| {
                let relevance = match query {
                    Some(query) => {
                        RelevanceScore::Query(self.scorer.score(movie, query))
                    }
                    None => RelevanceScore::Fallback(fallback_score(movie)),
                };
                SearchResultItem::new(movie.clone(), relevance)
            })
            .collect();

        sort_results(&mut items, filters.sort_by, filters.sort_order);

        trace!(
            "planned {} of {} movies with {} predicates",
            items.len(),
            catalog.len(),
            predicates.len()
        );
        PlannedResults::new(items)
    }
}
