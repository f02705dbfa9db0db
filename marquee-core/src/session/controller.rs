use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use marquee_model::{FilterPatch, SearchFilters, current_year};
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::backend::{LocalSearchBackend, SearchBackend};
use super::state::{HistoryEntry, SearchPhase, SearchSessionState};
use crate::cache::{CachedSearch, SearchCache};
use crate::catalog::Catalog;
use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::persistence::{SearchHistoryRepository, StoredHistory};
use crate::query::{PlannedResults, QueryPlanner, SearchKey};
use crate::suggest::suggest;

/// Search session controller.
///
/// Commands take `&self`; the session is shared by wrapping it in an `Arc`.
/// Dropping the session (or calling [`SearchSession::close`]) cancels the
/// pending debounce and discards any fetch still in flight.
pub struct SearchSession {
    inner: Arc<Inner>,
}

impl fmt::Debug for SearchSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchSession")
            .field("generation", &self.inner.generation.load(Ordering::Relaxed))
            .field("cached_searches", &self.inner.cache.len())
            .field("backend", &self.inner.backend)
            .field("config", &self.inner.config)
            .finish()
    }
}

/// Assembles a [`SearchSession`]; unset parts fall back to the local
/// planner backend, the current year and no history persistence.
#[derive(Debug)]
pub struct SearchSessionBuilder {
    catalog: Catalog,
    config: SearchConfig,
    reference_year: Option<u16>,
    backend: Option<Arc<dyn SearchBackend>>,
    history: Option<Arc<dyn SearchHistoryRepository>>,
}

impl SearchSessionBuilder {
    pub fn config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// Anchors the default year window and the recency boost.
    pub fn reference_year(mut self, year: u16) -> Self {
        self.reference_year = Some(year);
        self
    }

    pub fn backend(mut self, backend: Arc<dyn SearchBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn history_repository(
        mut self,
        repository: Arc<dyn SearchHistoryRepository>,
    ) -> Self {
        self.history = Some(repository);
        self
    }

    pub fn build(self) -> SearchSession {
        let reference_year = self.reference_year.unwrap_or_else(current_year);
        let backend = self.backend.unwrap_or_else(|| {
            Arc::new(
                LocalSearchBackend::new(
                    self.catalog.clone(),
                    QueryPlanner::new(reference_year),
                )
                .with_latency(self.config.simulated_latency),
            )
        });

        let initial =
            Arc::new(SearchSessionState::new(SearchFilters::for_year(reference_year)));
        let (publisher, _) = watch::channel(initial.clone());

        SearchSession {
            inner: Arc::new(Inner {
                cache: SearchCache::new(
                    self.config.cache_ttl(),
                    self.config.cache_capacity,
                ),
                catalog: self.catalog,
                backend,
                history: self.history,
                config: self.config,
                reference_year,
                generation: AtomicU64::new(0),
                state: Mutex::new(initial),
                publisher,
                debounce: Mutex::new(None),
                shutdown: CancellationToken::new(),
            }),
        }
    }
}

struct Inner {
    catalog: Catalog,
    backend: Arc<dyn SearchBackend>,
    history: Option<Arc<dyn SearchHistoryRepository>>,
    cache: SearchCache,
    config: SearchConfig,
    reference_year: u16,
    /// Bumped by every command that invalidates in-flight work. A fetch
    /// publishes only if the generation it started under is still current.
    generation: AtomicU64,
    state: Mutex<Arc<SearchSessionState>>,
    publisher: watch::Sender<Arc<SearchSessionState>>,
    debounce: Mutex<Option<JoinHandle<()>>>,
    shutdown: CancellationToken,
}

impl SearchSession {
    /// Session over `catalog` with the local planner backend.
    pub fn new(catalog: Catalog, config: SearchConfig) -> Self {
        Self::builder(catalog).config(config).build()
    }

    pub fn builder(catalog: Catalog) -> SearchSessionBuilder {
        SearchSessionBuilder {
            catalog,
            config: SearchConfig::default(),
            reference_year: None,
            backend: None,
            history: None,
        }
    }

    /// Latest published snapshot.
    pub fn state(&self) -> Arc<SearchSessionState> {
        self.inner.publisher.borrow().clone()
    }

    /// Stream of snapshots; the receiver starts at the current one.
    pub fn subscribe(&self) -> watch::Receiver<Arc<SearchSessionState>> {
        self.inner.publisher.subscribe()
    }

    pub fn filters(&self) -> SearchFilters {
        self.inner.state.lock().filters.clone()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn config(&self) -> &SearchConfig {
        &self.inner.config
    }

    pub fn reference_year(&self) -> u16 {
        self.inner.reference_year
    }

    /// Loads recent searches and history from the configured repository.
    /// Any failure leaves both lists empty; it never fails the session.
    pub async fn restore_history(&self) {
        let Some(repository) = self.inner.history.clone() else {
            return;
        };

        let stored = match repository.load().await {
            Ok(stored) => stored.truncated(
                self.inner.config.recent_searches_limit,
                self.inner.config.history_limit,
            ),
            Err(err) => {
                warn!("failed to restore search history, starting empty: {}", err);
                StoredHistory::default()
            }
        };

        debug!(
            "restored {} recent searches and {} history entries",
            stored.recent_searches.len(),
            stored.history.len()
        );
        self.inner.update(|state| {
            state.recent_searches = stored.recent_searches;
            state.history = stored.history;
        });
    }

    /// Writes the current recent searches and history and waits for the
    /// repository. Sessions already save after every recorded search; this
    /// is for callers that exit right after searching.
    pub async fn save_history(&self) -> Result<()> {
        let Some(repository) = self.inner.history.clone() else {
            return Ok(());
        };
        let state = self.state();
        repository
            .save(&StoredHistory {
                recent_searches: state.recent_searches.clone(),
                history: state.history.clone(),
            })
            .await
    }

    /// Merges `patch` into the filters, resets to page 1, invalidates any
    /// in-flight fetch and schedules a debounced search.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn set_filters(&self, patch: FilterPatch) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }

        self.inner.abort_debounce();
        self.inner.bump_generation();
        self.inner.update(|state| {
            patch.apply_to(&mut state.filters);
            state.page = 1;
            state.has_more = false;
            state.is_loading = false;
            state.phase = SearchPhase::Debouncing;
        });

        let inner = Arc::clone(&self.inner);
        let delay = self.inner.config.debounce();
        let handle = tokio::spawn(async move {
            tokio::select! {
                _ = inner.shutdown.cancelled() => {}
                _ = tokio::time::sleep(delay) => inner.fresh_search().await,
            }
        });
        *self.inner.debounce.lock() = Some(handle);
    }

    /// `load_more == false` runs a fresh search for the current filters,
    /// cancelling the debounce timer and any in-flight fetch.
    /// `load_more == true` appends the next page; it is a no-op while a
    /// fetch is running or when everything is loaded.
    pub async fn search(&self, load_more: bool) {
        if load_more {
            self.inner.load_more().await;
        } else {
            self.inner.abort_debounce();
            self.inner.fresh_search().await;
        }
    }

    pub async fn load_more(&self) {
        self.search(true).await;
    }

    /// Drops the materialized results. Filters, cache and recent searches
    /// are kept; a pending debounce and any in-flight fetch are discarded.
    pub fn clear_results(&self) {
        self.inner.abort_debounce();
        self.inner.bump_generation();
        self.inner.update(|state| {
            state.clear_results();
            state.phase = SearchPhase::Idle;
        });
    }

    /// Restores default filters and clears results. The cache, recent
    /// searches and history survive.
    pub fn reset(&self) {
        self.inner.abort_debounce();
        self.inner.bump_generation();
        let defaults = SearchFilters::for_year(self.inner.reference_year);
        self.inner.update(|state| {
            state.filters = defaults;
            state.clear_results();
            state.phase = SearchPhase::Idle;
            state.last_error = None;
        });
    }

    /// Autocomplete strings for a partial query.
    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        suggest(
            &self.inner.catalog,
            partial,
            self.inner.config.suggestion_limit,
        )
    }

    /// Non-expired cache entry for `filters`, if any.
    pub fn cached_results(&self, filters: &SearchFilters) -> Option<CachedSearch> {
        self.inner.cache.get(&SearchKey::from_filters(filters))
    }

    /// Stops the session: pending work is cancelled and later commands
    /// become no-ops.
    pub fn close(&self) {
        if self.inner.shutdown.is_cancelled() {
            return;
        }
        self.inner.shutdown.cancel();
        self.inner.abort_debounce();
        self.inner.bump_generation();
        debug!("search session closed");
    }

    pub fn is_closed(&self) -> bool {
        self.inner.shutdown.is_cancelled()
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        self.close();
    }
}

impl Inner {
    fn bump_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::Acquire) == generation
    }

    fn abort_debounce(&self) {
        if let Some(handle) = self.debounce.lock().take() {
            handle.abort();
        }
    }

    /// Applies `mutate` to a copy of the current state and publishes it.
    fn update(&self, mutate: impl FnOnce(&mut SearchSessionState)) {
        let mut guard = self.state.lock();
        let mut next = SearchSessionState::clone(&guard);
        mutate(&mut next);
        let next = Arc::new(next);
        *guard = Arc::clone(&next);
        self.publisher.send_replace(next);
    }

    /// Like [`Inner::update`] but only while `generation` is current. The
    /// check and the publish happen under the state lock so a concurrent
    /// command cannot slip in between.
    fn update_if_current(
        &self,
        generation: u64,
        mutate: impl FnOnce(&mut SearchSessionState),
    ) -> bool {
        let mut guard = self.state.lock();
        if !self.is_current(generation) {
            return false;
        }
        let mut next = SearchSessionState::clone(&guard);
        mutate(&mut next);
        let next = Arc::new(next);
        *guard = Arc::clone(&next);
        self.publisher.send_replace(next);
        true
    }

    async fn fetch(&self, filters: &SearchFilters) -> Result<PlannedResults> {
        tokio::select! {
            _ = self.shutdown.cancelled() => {
                Err(SearchError::Cancelled("search session closed".into()))
            }
            outcome = self.backend.fetch(filters) => outcome,
        }
    }

    async fn fresh_search(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }

        let generation = self.bump_generation();
        let filters = self.state.lock().filters.clone();

        if self.config.require_criteria && !filters.has_criteria(self.reference_year) {
            debug!("no search criteria, clearing results");
            self.update_if_current(generation, |state| {
                state.clear_results();
                state.phase = SearchPhase::Idle;
            });
            return;
        }

        let key = SearchKey::from_filters(&filters);
        if let Some(cached) = self.cache.get(&key) {
            debug!("cache hit for {}", key);
            self.update_if_current(generation, |state| {
                self.publish_first_page(state, &cached.results);
            });
            return;
        }

        debug!("cache miss for {}", key);
        if !self.update_if_current(generation, |state| {
            state.is_loading = true;
            state.phase = SearchPhase::Fetching;
        }) {
            return;
        }

        let outcome = self.fetch(&filters).await;
        if !self.is_current(generation) {
            debug!("discarding stale search for {}", key);
            return;
        }

        match outcome {
            Ok(results) => {
                self.cache.set(key, results.clone());
                let query = filters.text_query().map(str::to_owned);
                let mut persisted = None;
                let published = self.update_if_current(generation, |state| {
                    self.publish_first_page(state, &results);
                    if let Some(query) = query {
                        self.record_query(state, query, results.total());
                        persisted = Some(StoredHistory {
                            recent_searches: state.recent_searches.clone(),
                            history: state.history.clone(),
                        });
                    }
                });
                if published {
                    info!(
                        "search settled with {} results ({} shown)",
                        results.total(),
                        results.page(1, self.config.page_size).len()
                    );
                }
                if let Some(stored) = persisted {
                    self.persist_history(stored);
                }
            }
            Err(err) => self.record_failure(generation, err),
        }
    }

    async fn load_more(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }

        let generation = self.generation.load(Ordering::Acquire);
        let Some((filters, page)) = self.claim_next_page(generation) else {
            return;
        };

        let key = SearchKey::from_filters(&filters);
        let full = match self.cache.get(&key) {
            Some(cached) => cached.results,
            None => {
                debug!("cache entry for {} expired, refetching page {}", key, page + 1);
                match self.fetch(&filters).await {
                    Ok(results) if self.is_current(generation) => {
                        self.cache.set(key.clone(), results.clone());
                        results
                    }
                    Ok(_) => {
                        debug!("discarding stale page for {}", key);
                        return;
                    }
                    Err(err) => {
                        self.record_failure(generation, err);
                        return;
                    }
                }
            }
        };

        let page_size = self.config.page_size;
        let next = page + 1;
        let window = full.page(next, page_size);
        self.update_if_current(generation, |state| {
            state.results.extend_from_slice(window);
            state.page = next;
            state.total = full.total();
            state.has_more = has_more(window.len(), next, page_size, full.total());
            state.is_loading = false;
            state.phase = SearchPhase::Settled;
            state.last_error = None;
        });
    }

    /// Marks a page load as running if the settled results have more to
    /// show. Only one caller can win the claim for a given page.
    fn claim_next_page(&self, generation: u64) -> Option<(SearchFilters, usize)> {
        let mut guard = self.state.lock();
        if !self.is_current(generation)
            || guard.is_loading
            || !guard.has_more
            || guard.phase != SearchPhase::Settled
        {
            return None;
        }
        let mut next = SearchSessionState::clone(&guard);
        next.is_loading = true;
        next.phase = SearchPhase::LoadingMore;
        let claimed = (next.filters.clone(), next.page);
        let next = Arc::new(next);
        *guard = Arc::clone(&next);
        self.publisher.send_replace(next);
        Some(claimed)
    }

    fn publish_first_page(
        &self,
        state: &mut SearchSessionState,
        results: &PlannedResults,
    ) {
        let page_size = self.config.page_size;
        let first = results.page(1, page_size);
        state.results = first.to_vec();
        state.total = results.total();
        state.page = 1;
        state.has_more = has_more(first.len(), 1, page_size, results.total());
        state.is_loading = false;
        state.phase = SearchPhase::Settled;
        state.last_error = None;
    }

    fn record_query(
        &self,
        state: &mut SearchSessionState,
        query: String,
        results_count: usize,
    ) {
        state.recent_searches.retain(|recent| *recent != query);
        state.recent_searches.insert(0, query.clone());
        state
            .recent_searches
            .truncate(self.config.recent_searches_limit);

        state.history.insert(
            0,
            HistoryEntry {
                query,
                timestamp: Utc::now(),
                results_count,
            },
        );
        state.history.truncate(self.config.history_limit);
    }

    fn record_failure(&self, generation: u64, err: SearchError) {
        if matches!(err, SearchError::Cancelled(_)) {
            debug!("search cancelled: {}", err);
            return;
        }
        warn!("search backend failed: {}", err);
        let message = err.to_string();
        self.update_if_current(generation, |state| {
            state.is_loading = false;
            state.phase = SearchPhase::Settled;
            state.last_error = Some(message);
        });
    }

    fn persist_history(&self, stored: StoredHistory) {
        let Some(repository) = self.history.clone() else {
            return;
        };
        tokio::spawn(async move {
            if let Err(err) = repository.save(&stored).await {
                warn!("failed to persist search history: {}", err);
            }
        });
    }
}

fn has_more(window_len: usize, page: usize, page_size: usize, total: usize) -> bool {
    window_len == page_size && page.saturating_mul(page_size) < total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_requires_full_window_and_remaining_items() {
        assert!(has_more(12, 1, 12, 30));
        assert!(has_more(12, 2, 12, 30));
        assert!(!has_more(6, 3, 12, 30));
        assert!(!has_more(12, 1, 12, 12));
        assert!(!has_more(0, 1, 12, 0));
    }
}
