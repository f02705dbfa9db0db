//! Immutable in-memory movie catalog.
//!
//! The catalog is loaded once at startup and shared read-only by every
//! component. Cloning a [`Catalog`] is cheap: records live behind `Arc`s and
//! search results reference them instead of copying.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use marquee_model::{MovieId, MovieRecord};
use tracing::{debug, info};

use crate::error::{Result, SearchError};

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Arc<[Arc<MovieRecord>]>,
    genres: Arc<[String]>,
}

impl Catalog {
    /// Validates and freezes `records`. Ids must be unique.
    pub fn from_records(records: Vec<MovieRecord>) -> Result<Self> {
        let mut seen: HashSet<MovieId> = HashSet::with_capacity(records.len());
        let mut genres: Vec<String> = Vec::new();
        let mut seen_genres: HashSet<String> = HashSet::new();

        for record in &records {
            record.validate()?;
            if !seen.insert(record.id.clone()) {
                return Err(SearchError::InvalidCatalog(format!(
                    "duplicate movie id {}",
                    record.id
                )));
            }
            for genre in &record.genre {
                if seen_genres.insert(genre.clone()) {
                    genres.push(genre.clone());
                }
            }
        }

        debug!(
            "catalog frozen with {} movies and {} genres",
            records.len(),
            genres.len()
        );

        Ok(Self {
            movies: records.into_iter().map(Arc::new).collect(),
            genres: genres.into(),
        })
    }

    /// Parses a JSON array of movie records.
    pub fn from_json(raw: &str) -> Result<Self> {
        let records: Vec<MovieRecord> = serde_json::from_str(raw)?;
        Self::from_records(records)
    }

    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&raw)?;
        info!(
            "loaded {} movies from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn movies(&self) -> &[Arc<MovieRecord>] {
        &self.movies
    }

    pub fn get(&self, id: &MovieId) -> Option<&Arc<MovieRecord>> {
        self.movies.iter().find(|movie| &movie.id == id)
    }

    /// Distinct genre tags in first-seen order.
    pub fn genres(&self) -> &[String] {
        &self.genres
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str, title: &str, genres: &[&str]) -> MovieRecord {
        MovieRecord::new(MovieId::new(id).unwrap(), title, 2000, 7.0)
            .unwrap()
            .with_genres(genres.iter().copied())
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::from_records(vec![
            movie("1", "Alien", &["Horror"]),
            movie("1", "Aliens", &["Action"]),
        ])
        .unwrap_err();
        assert!(matches!(err, SearchError::InvalidCatalog(_)));
    }

    #[test]
    fn genres_are_distinct_in_first_seen_order() {
        let catalog = Catalog::from_records(vec![
            movie("1", "Alien", &["Horror", "Sci-Fi"]),
            movie("2", "Aliens", &["Action", "Sci-Fi"]),
        ])
        .unwrap();
        assert_eq!(catalog.genres(), &["Horror", "Sci-Fi", "Action"]);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn invalid_json_records_surface_model_errors() {
        let raw = r#"[{"id": "1", "title": "Broken", "year": 2000, "rating": 11.0}]"#;
        let err = Catalog::from_json(raw).unwrap_err();
        assert!(matches!(err, SearchError::InvalidRecord(_)));
    }

    #[test]
    fn lookup_by_id() {
        let catalog =
            Catalog::from_records(vec![movie("9", "Heat", &["Crime"])]).unwrap();
        let id = MovieId::new("9").unwrap();
        assert_eq!(catalog.get(&id).unwrap().title, "Heat");
    }
}
