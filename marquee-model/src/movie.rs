use crate::error::{ModelError, Result};
use crate::filters::{MAX_RATING, MIN_RATING};
use crate::ids::MovieId;

/// Credited cast member. Only the name participates in search; the role is
/// carried for display.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastMember {
    pub name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub role: Option<String>,
}

impl CastMember {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }
}

/// A single catalog entry.
///
/// Records are never edited once the catalog is loaded; search results hold
/// shared references to them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    /// Genre tags. Order is irrelevant for matching but is kept for display.
    #[cfg_attr(feature = "serde", serde(default))]
    pub genre: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cast: Vec<CastMember>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub director: String,
    pub year: u16,
    /// Average rating in `[0, 10]`.
    pub rating: f32,
}

impl MovieRecord {
    pub fn new(
        id: MovieId,
        title: impl Into<String>,
        year: u16,
        rating: f32,
    ) -> Result<Self> {
        let record = Self {
            id,
            title: title.into(),
            genre: Vec::new(),
            cast: Vec::new(),
            director: String::new(),
            year,
            rating,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.genre = genres.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cast<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cast = names.into_iter().map(CastMember::new).collect();
        self
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = director.into();
        self
    }

    /// Checks the invariants a deserialized record cannot enforce by type.
    pub fn validate(&self) -> Result<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(ModelError::InvalidId(format!(
                "record '{}' has an empty id",
                self.title
            )));
        }
        if self.title.trim().is_empty() {
            return Err(ModelError::InvalidRecord(format!(
                "movie {} has an empty title",
                self.id
            )));
        }
        if !self.rating.is_finite()
            || !(MIN_RATING..=MAX_RATING).contains(&self.rating)
        {
            return Err(ModelError::InvalidRating {
                id: self.id.to_string(),
                rating: self.rating,
            });
        }
        Ok(())
    }

    pub fn cast_names(&self) -> impl Iterator<Item = &str> {
        self.cast.iter().map(|member| member.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> MovieId {
        MovieId::new(raw).unwrap()
    }

    #[test]
    fn rating_outside_bounds_is_rejected() {
        let err = MovieRecord::new(id("1"), "Heat", 1995, 10.5).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRating { .. }));

        let err = MovieRecord::new(id("2"), "Heat", 1995, f32::NAN).unwrap_err();
        assert!(matches!(err, ModelError::InvalidRating { .. }));

        assert!(MovieRecord::new(id("3"), "Heat", 1995, 0.0).is_ok());
        assert!(MovieRecord::new(id("4"), "Heat", 1995, 10.0).is_ok());
    }

    #[test]
    fn builder_helpers_populate_search_fields() {
        let movie = MovieRecord::new(id("1"), "Oppenheimer", 2023, 8.3)
            .unwrap()
            .with_genres(["Drama", "History"])
            .with_cast(["Cillian Murphy", "Emily Blunt"])
            .with_director("Christopher Nolan");

        assert_eq!(movie.genre, vec!["Drama", "History"]);
        assert_eq!(
            movie.cast_names().collect::<Vec<_>>(),
            vec!["Cillian Murphy", "Emily Blunt"]
        );
        assert_eq!(movie.director, "Christopher Nolan");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_catalog_shape() {
        let raw = r#"{
            "id": "7",
            "title": "Dune",
            "genre": ["Sci-Fi"],
            "cast": [{"name": "Timothée Chalamet", "role": "Paul"}],
            "director": "Denis Villeneuve",
            "year": 2021,
            "rating": 8.5
        }"#;
        let movie: MovieRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(movie.id.as_str(), "7");
        assert_eq!(movie.cast[0].role.as_deref(), Some("Paul"));
        assert!(movie.validate().is_ok());
    }
}
