use marquee_model::MovieRecord;
use std::sync::Arc;

/// Ranking score attached to a planned result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RelevanceScore {
    /// Produced by the relevance scorer for an active text query.
    Query(f64),
    /// Rating-derived stand-in used when no text query is active.
    Fallback(f64),
}

impl RelevanceScore {
    pub fn value(&self) -> f64 {
        match self {
            RelevanceScore::Query(score) | RelevanceScore::Fallback(score) => {
                *score
            }
        }
    }

    pub fn is_query_score(&self) -> bool {
        matches!(self, RelevanceScore::Query(_))
    }
}

/// A catalog record plus its ephemeral ranking score.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultItem {
    pub movie: Arc<MovieRecord>,
    pub relevance: RelevanceScore,
}

impl SearchResultItem {
    pub fn new(movie: Arc<MovieRecord>, relevance: RelevanceScore) -> Self {
        Self { movie, relevance }
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance.value()
    }
}

/// Full, unpaginated output of a plan.
#[derive(Debug, Clone, Default)]
pub struct PlannedResults {
    pub items: Arc<[SearchResultItem]>,
}

impl PlannedResults {
    pub fn new(items: Vec<SearchResultItem>) -> Self {
        Self {
            items: items.into(),
        }
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    /// 1-based page window of `page_size` items; empty past the end.
    pub fn page(&self, page: usize, page_size: usize) -> &[SearchResultItem] {
        page_window(&self.items, page, page_size)
    }
}

pub(crate) fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_slices_fixed_size_pages() {
        let items: Vec<u32> = (0..30).collect();
        assert_eq!(page_window(&items, 1, 12).len(), 12);
        assert_eq!(page_window(&items, 2, 12)[0], 12);
        assert_eq!(page_window(&items, 3, 12), &items[24..30]);
        assert!(page_window(&items, 4, 12).is_empty());
    }
}
