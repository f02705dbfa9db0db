//! # Marquee Core
//!
//! Search, filtering and ranking over an in-memory movie catalog.
//!
//! ## Overview
//!
//! - **Catalog**: immutable, shared movie records ([`catalog`])
//! - **Query**: pure filter/score/sort planning ([`query`])
//! - **Cache**: bounded FIFO result cache with a TTL ([`cache`])
//! - **Session**: debounced, cancellable, paginated search state
//!   ([`session`])
//! - **Suggestions**: autocomplete over titles, genres and people
//!   ([`suggest`])
//!
//! ## Feature Flags
//!
//! - `demo`: bundles a small sample catalog ([`demo`])
//!
//! ## Examples
//!
//! ```no_run
//! use marquee_core::{Catalog, SearchConfig, SearchSession};
//! use marquee_model::FilterPatch;
//!
//! async fn first_page(catalog: Catalog) {
//!     let session = SearchSession::new(catalog, SearchConfig::default());
//!     session.set_filters(FilterPatch::new().query("dune"));
//!     session.search(false).await;
//!     for item in &session.state().results {
//!         println!("{} ({:.0})", item.movie.title, item.relevance_score());
//!     }
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod cache;
pub mod catalog;
pub mod config;
#[cfg(feature = "demo")]
#[cfg_attr(docsrs, doc(cfg(feature = "demo")))]
pub mod demo;
pub mod error;
pub mod persistence;
pub mod query;
pub mod session;
pub mod suggest;

pub use cache::{CachedSearch, SearchCache};
pub use catalog::Catalog;
pub use config::{LatencyRange, SearchConfig, SearchConfigSource};
pub use error::{Result, SearchError};
pub use persistence::{
    InMemoryHistoryRepository, JsonFileHistoryRepository, SearchHistoryRepository,
    StoredHistory,
};
pub use query::{
    PlannedResults, QueryPlanner, RelevanceScore, RelevanceScorer, SearchKey,
    SearchResultItem, plan, plan_at,
};
pub use session::{
    HistoryEntry, LocalSearchBackend, SearchBackend, SearchPhase, SearchSession,
    SearchSessionBuilder, SearchSessionState,
};
pub use suggest::suggest;

/// Model types re-exported for convenience.
pub use marquee_model;
