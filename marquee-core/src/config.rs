//! Search session tuning and its loader.

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::{
    env, fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::cache::{DEFAULT_CACHE_CAPACITY, DEFAULT_CACHE_TTL};
use crate::suggest::DEFAULT_SUGGESTION_LIMIT;

/// Source that produced the search configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl fmt::Display for SearchConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchConfigSource::Default => f.write_str("built-in defaults"),
            SearchConfigSource::EnvPath(path) => {
                write!(f, "$MARQUEE_CONFIG_PATH ({})", path.display())
            }
            SearchConfigSource::EnvInline => f.write_str("$MARQUEE_CONFIG_JSON"),
            SearchConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Artificial backend delay, drawn uniformly from `[min_ms, max_ms]` per
/// fetch. Useful for exercising loading states against a local catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatencyRange {
    pub min_ms: u64,
    pub max_ms: u64,
}

/// Tuning for a search session. Every field has a default, so partial
/// files are valid.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Results materialized per page, both for the first page and for every
    /// "load more".
    pub page_size: usize,
    /// Quiet window (ms) after the last filter change before a search runs.
    /// Filter changes inside the window coalesce into one fetch.
    pub debounce_ms: u64,
    /// How long (s) a cached result list stays valid.
    pub cache_ttl_secs: u64,
    /// Distinct filter sets kept in the cache before the oldest is evicted.
    pub cache_capacity: usize,
    pub recent_searches_limit: usize,
    pub history_limit: usize,
    pub suggestion_limit: usize,
    /// When set, a search with a blank query and every filter at its default
    /// clears results instead of listing the whole catalog.
    pub require_criteria: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulated_latency: Option<LatencyRange>,
    /// JSON file for recent searches and history. In-memory only when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_path: Option<PathBuf>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: 12,
            debounce_ms: 250,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            recent_searches_limit: 10,
            history_limit: 50,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            require_criteria: true,
            simulated_latency: None,
            history_path: None,
        }
    }
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Rejects settings that would make pagination or caching meaningless.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.page_size == 0 {
            bail!("page_size must be at least 1");
        }
        if self.cache_capacity == 0 {
            bail!("cache_capacity must be at least 1");
        }
        if let Some(latency) = self.simulated_latency
            && latency.min_ms > latency.max_ms
        {
            bail!(
                "simulated_latency.min_ms ({}) exceeds max_ms ({})",
                latency.min_ms,
                latency.max_ms
            );
        }
        Ok(())
    }

    /// Load search configuration overrides using environment variables.
    /// Evaluation order:
    /// 1) `$MARQUEE_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$MARQUEE_CONFIG_JSON` (inline JSON),
    /// 3) `marquee.toml`, `marquee.json` or `config/marquee.toml` in the
    ///    working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, SearchConfigSource)> {
        let (config, source) = Self::resolve_from_env()?;
        config
            .validate()
            .with_context(|| format!("invalid search config from {source}"))?;
        Ok((config, source))
    }

    fn resolve_from_env() -> anyhow::Result<(Self, SearchConfigSource)> {
        if let Ok(path_str) = env::var("MARQUEE_CONFIG_PATH")
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, SearchConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var("MARQUEE_CONFIG_JSON")
            && !raw.trim().is_empty()
        {
            let parsed = serde_json::from_str(&raw)
                .context("failed to parse MARQUEE_CONFIG_JSON")?;
            return Ok((parsed, SearchConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file() {
            let config = Self::load_from_file(&path)?;
            return Ok((config, SearchConfigSource::File(path)));
        }

        Ok((Self::default(), SearchConfigSource::Default))
    }

    /// `.json` files are read as JSON, anything else as TOML.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!("failed to read search config from {}", path.display())
        })?;

        let parsed = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&contents).map_err(anyhow::Error::from),
            _ => toml::from_str(&contents).map_err(anyhow::Error::from),
        };
        parsed.with_context(|| format!("invalid search config {}", path.display()))
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("failed to render search config")
    }

    fn find_default_file() -> Option<PathBuf> {
        const CANDIDATES: &[&str] =
            &["marquee.toml", "marquee.json", "config/marquee.toml"];

        CANDIDATES
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Path::to_path_buf)
    }
}
