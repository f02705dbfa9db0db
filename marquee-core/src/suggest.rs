//! Autocomplete over catalog titles, genres, cast and directors.

use std::collections::HashSet;

use crate::catalog::Catalog;

pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Up to `limit` distinct strings containing `partial` (case-insensitive),
/// scanned titles first, then genres, cast names and directors. Blank input
/// yields nothing.
pub fn suggest(catalog: &Catalog, partial: &str, limit: usize) -> Vec<String> {
    let needle = partial.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let movies = catalog.movies();
    let titles = movies.iter().map(|m| m.title.as_str());
    let genres = catalog.genres().iter().map(String::as_str);
    let cast = movies.iter().flat_map(|m| m.cast_names());
    let directors = movies
        .iter()
        .map(|m| m.director.as_str())
        .filter(|d| !d.is_empty());

    let mut seen: HashSet<&str> = HashSet::new();
    titles
        .chain(genres)
        .chain(cast)
        .chain(directors)
        .filter(|candidate| candidate.to_lowercase().contains(&needle))
        .filter(|candidate| seen.insert(*candidate))
        .take(limit)
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::{MovieId, MovieRecord};

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            MovieRecord::new(MovieId::new("1").unwrap(), "Oppenheimer", 2023, 8.3)
                .unwrap()
                .with_genres(["Drama", "History"])
                .with_cast(["Cillian Murphy", "Emily Blunt"])
                .with_director("Christopher Nolan"),
            MovieRecord::new(MovieId::new("2").unwrap(), "Interstellar", 2014, 8.7)
                .unwrap()
                .with_genres(["Sci-Fi", "Drama"])
                .with_cast(["Matthew McConaughey"])
                .with_director("Christopher Nolan"),
        ])
        .unwrap()
    }

    #[test]
    fn literal_substring_only() {
        let catalog = Catalog::from_records(vec![
            MovieRecord::new(MovieId::new("1").unwrap(), "Oppenheimer", 2023, 8.3)
                .unwrap()
                .with_genres(["Drama"])
                .with_cast(["Cillian Murphy"])
                .with_director("Someone"),
        ])
        .unwrap();
        assert!(suggest(&catalog, "chr", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }

    #[test]
    fn deduplicates_across_movies() {
        assert_eq!(
            suggest(&catalog(), "nolan", DEFAULT_SUGGESTION_LIMIT),
            vec!["Christopher Nolan"]
        );
    }

    #[test]
    fn titles_come_before_people() {
        let found = suggest(&catalog(), "er", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(found[0], "Oppenheimer");
        assert_eq!(found[1], "Interstellar");
        assert!(found.contains(&"Christopher Nolan".to_string()));
    }

    #[test]
    fn respects_limit_and_blank_input() {
        assert_eq!(suggest(&catalog(), "e", 3).len(), 3);
        assert!(suggest(&catalog(), "   ", DEFAULT_SUGGESTION_LIMIT).is_empty());
    }
}
