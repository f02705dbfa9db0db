use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use marquee_model::SearchFilters;
use rand::Rng;
use tracing::trace;

use crate::catalog::Catalog;
use crate::config::LatencyRange;
use crate::error::Result;
use crate::query::{PlannedResults, QueryPlanner};

/// Evaluates filters on a cache miss.
///
/// Implementations return the complete, sorted result list; the session
/// slices pages from it.
#[async_trait]
pub trait SearchBackend: Send + Sync + fmt::Debug {
    async fn fetch(&self, filters: &SearchFilters) -> Result<PlannedResults>;
}

/// Runs the [`QueryPlanner`] over an in-memory catalog, optionally after a
/// random delay.
#[derive(Clone)]
pub struct LocalSearchBackend {
    catalog: Catalog,
    planner: QueryPlanner,
    latency: Option<LatencyRange>,
}

impl fmt::Debug for LocalSearchBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearchBackend")
            .field("movies", &self.catalog.len())
            .field("reference_year", &self.planner.reference_year())
            .field("latency", &self.latency)
            .finish()
    }
}

impl LocalSearchBackend {
    pub fn new(catalog: Catalog, planner: QueryPlanner) -> Self {
        Self {
            catalog,
            planner,
            latency: None,
        }
    }

    pub fn with_latency(mut self, latency: Option<LatencyRange>) -> Self {
        self.latency = latency;
        self
    }

    fn jitter(&self) -> Option<Duration> {
        let range = self.latency?;
        let millis = if range.min_ms >= range.max_ms {
            range.min_ms
        } else {
            rand::rng().random_range(range.min_ms..=range.max_ms)
        };
        Some(Duration::from_millis(millis))
    }
}

#[async_trait]
impl SearchBackend for LocalSearchBackend {
    async fn fetch(&self, filters: &SearchFilters) -> Result<PlannedResults> {
        if let Some(delay) = self.jitter() {
            trace!("simulating {:?} backend latency", delay);
            tokio::time::sleep(delay).await;
        }
        Ok(self.planner.plan(filters, &self.catalog))
    }
}
