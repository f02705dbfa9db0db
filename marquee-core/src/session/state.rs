use std::fmt;

use chrono::{DateTime, Utc};
use marquee_model::SearchFilters;
use serde::{Deserialize, Serialize};

use crate::query::SearchResultItem;

/// Where the session is in its search lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Filters changed; a search is scheduled once the debounce window
    /// passes.
    Debouncing,
    /// A fresh search is waiting on the backend.
    Fetching,
    /// A further page is being loaded.
    LoadingMore,
    Settled,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchPhase::Idle => "idle",
            SearchPhase::Debouncing => "debouncing",
            SearchPhase::Fetching => "fetching",
            SearchPhase::LoadingMore => "loading_more",
            SearchPhase::Settled => "settled",
        };
        f.write_str(label)
    }
}

/// One completed search, as shown in the history list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub results_count: usize,
}

/// Immutable snapshot published after every session command.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSessionState {
    pub filters: SearchFilters,
    /// Materialized prefix of the full result list: pages `1..=page`.
    pub results: Vec<SearchResultItem>,
    /// Size of the full result list.
    pub total: usize,
    /// Last fully loaded page, 1-based.
    pub page: usize,
    pub has_more: bool,
    pub is_loading: bool,
    pub phase: SearchPhase,
    /// Most-recent-first, deduplicated.
    pub recent_searches: Vec<String>,
    /// Most-recent-first.
    pub history: Vec<HistoryEntry>,
    /// Message of the last failed fetch; cleared by the next successful one.
    pub last_error: Option<String>,
}

impl SearchSessionState {
    pub fn new(filters: SearchFilters) -> Self {
        Self {
            filters,
            results: Vec::new(),
            total: 0,
            page: 1,
            has_more: false,
            is_loading: false,
            phase: SearchPhase::Idle,
            recent_searches: Vec::new(),
            history: Vec::new(),
            last_error: None,
        }
    }

    pub(crate) fn clear_results(&mut self) {
        self.results.clear();
        self.total = 0;
        self.page = 1;
        self.has_more = false;
        self.is_loading = false;
    }
}
