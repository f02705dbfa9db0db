//! Additive relevance heuristic for free-text queries.
//!
//! Every comparison is case-insensitive. Title-level bonuses are mutually
//! exclusive (exact beats prefix beats substring); token-level bonuses stack
//! across every (query token, title token) pair.

use marquee_model::{MovieRecord, current_year};

const EXACT_TITLE: f64 = 1000.0;
const TITLE_PREFIX: f64 = 800.0;
const TITLE_CONTAINS: f64 = 600.0;

const TOKEN_EXACT: f64 = 400.0;
const TOKEN_PREFIX: f64 = 200.0;
const TOKEN_CONTAINS: f64 = 100.0;

const GENRE_MATCH: f64 = 300.0;
const CAST_MATCH: f64 = 250.0;
const DIRECTOR_MATCH: f64 = 200.0;

const POPULARITY_WEIGHT: f64 = 10.0;
const RECENCY_WINDOW_YEARS: i32 = 10;
const RECENCY_WEIGHT: f64 = 2.0;

/// Score used when no text query is active, so relevance ordering degrades
/// to rating ordering.
pub fn fallback_score(movie: &MovieRecord) -> f64 {
    f64::from(movie.rating) * POPULARITY_WEIGHT
}

/// Scores against the current calendar year.
pub fn score(movie: &MovieRecord, query: &str) -> f64 {
    RelevanceScorer::new(current_year()).score(movie, query)
}

/// Relevance scorer pinned to a reference year for the recency boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelevanceScorer {
    reference_year: u16,
}

impl Default for RelevanceScorer {
    fn default() -> Self {
        Self::new(current_year())
    }
}

impl RelevanceScorer {
    pub fn new(reference_year: u16) -> Self {
        Self { reference_year }
    }

    pub fn reference_year(&self) -> u16 {
        self.reference_year
    }

    /// Blank queries score with [`fallback_score`].
    pub fn score(&self, movie: &MovieRecord, query: &str) -> f64 {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return fallback_score(movie);
        }

        let title = movie.title.to_lowercase();
        let mut score = title_score(&title, &query) + token_score(&title, &query);

        score += movie
            .genre
            .iter()
            .filter(|genre| genre.to_lowercase().contains(&query))
            .count() as f64
            * GENRE_MATCH;

        score += movie
            .cast_names()
            .filter(|name| name.to_lowercase().contains(&query))
            .count() as f64
            * CAST_MATCH;

        if movie.director.to_lowercase().contains(&query) {
            score += DIRECTOR_MATCH;
        }

        score + fallback_score(movie) + self.recency_boost(movie)
    }

    /// Linear boost for releases inside the last ten years; zero before.
    pub fn recency_boost(&self, movie: &MovieRecord) -> f64 {
        let horizon = i32::from(self.reference_year) - RECENCY_WINDOW_YEARS;
        let years_inside = (i32::from(movie.year) - horizon).max(0);
        f64::from(years_inside) * RECENCY_WEIGHT
    }
}

fn title_score(title: &str, query: &str) -> f64 {
    if title == query {
        EXACT_TITLE
    } else if title.starts_with(query) {
        TITLE_PREFIX
    } else if title.contains(query) {
        TITLE_CONTAINS
    } else {
        0.0
    }
}

fn token_score(title: &str, query: &str) -> f64 {
    let mut score = 0.0;
    for query_token in query.split_whitespace() {
        for title_token in title.split_whitespace() {
            if title_token == query_token {
                score += TOKEN_EXACT;
            } else if title_token.starts_with(query_token) {
                score += TOKEN_PREFIX;
            } else if title_token.contains(query_token) {
                score += TOKEN_CONTAINS;
            }
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_model::MovieId;

    const YEAR: u16 = 2026;

    fn movie(title: &str, year: u16, rating: f32) -> MovieRecord {
        MovieRecord::new(MovieId::new(title).unwrap(), title, year, rating)
            .unwrap()
    }

    #[test]
    fn exact_title_beats_newer_prefix_match() {
        let scorer = RelevanceScorer::new(YEAR);
        let dune = movie("Dune", 2021, 8.5).with_genres(["Sci-Fi"]);
        let part_two = movie("Dune Part Two", 2024, 8.8).with_genres(["Sci-Fi"]);

        // 1000 + 400 + 85 + (2021 - 2016) * 2
        assert_eq!(scorer.score(&dune, "dune"), 1495.0);
        // 800 + 400 + 88 + (2024 - 2016) * 2
        assert!((scorer.score(&part_two, "dune") - 1304.0).abs() < 1e-3);
    }

    #[test]
    fn token_pairs_stack() {
        let scorer = RelevanceScorer::new(YEAR);
        let film = movie("Star Wars Star", 1977, 0.0);
        // title contains "star wars" at start: 800
        // tokens: star/star 400, star/wars 0, star/star 400,
        //         wars/star 0, wars/wars 400, wars/star 0
        assert_eq!(scorer.score(&film, "star wars"), 800.0 + 1200.0);
    }

    #[test]
    fn token_prefix_and_substring_bonuses() {
        let scorer = RelevanceScorer::new(YEAR);
        let film = movie("Interstellar", 2014, 0.0);
        // "stel" is inside the title: 600, token contains: 100
        assert_eq!(scorer.score(&film, "stel"), 700.0);
        // prefix of the title and of its only token: 800 + 200
        assert_eq!(scorer.score(&film, "inter"), 1000.0);
    }

    #[test]
    fn metadata_matches_add_per_hit() {
        let scorer = RelevanceScorer::new(YEAR);
        let film = movie("Untitled", 1990, 0.0)
            .with_genres(["Crime Drama", "Drama"])
            .with_cast(["Drama Queen", "Someone Else"])
            .with_director("Dramatic Director");
        // genres 2 * 300, cast 1 * 250, director 200
        assert_eq!(scorer.score(&film, "drama"), 600.0 + 250.0 + 200.0);
    }

    #[test]
    fn case_is_ignored() {
        let scorer = RelevanceScorer::new(YEAR);
        let film = movie("The Matrix", 1999, 8.7);
        assert_eq!(
            scorer.score(&film, "THE MATRIX"),
            scorer.score(&film, "the matrix")
        );
    }

    #[test]
    fn recency_boost_is_zero_outside_window() {
        let scorer = RelevanceScorer::new(YEAR);
        assert_eq!(scorer.recency_boost(&movie("Old", 2000, 5.0)), 0.0);
        assert_eq!(scorer.recency_boost(&movie("Edge", 2016, 5.0)), 0.0);
        assert_eq!(scorer.recency_boost(&movie("New", 2026, 5.0)), 20.0);
    }

    #[test]
    fn blank_query_uses_fallback() {
        let scorer = RelevanceScorer::new(YEAR);
        let film = movie("Heat", 1995, 8.3);
        assert_eq!(scorer.score(&film, "  "), fallback_score(&film));
    }

    #[test]
    fn scoring_is_deterministic() {
        let scorer = RelevanceScorer::new(YEAR);
        let film = movie("Blade Runner 2049", 2017, 8.0)
            .with_cast(["Ryan Gosling"])
            .with_director("Denis Villeneuve");
        let first = scorer.score(&film, "runner");
        let second = scorer.score(&film, "runner");
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
