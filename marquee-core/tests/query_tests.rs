use marquee_core::{Catalog, PlannedResults, plan_at, suggest};
use marquee_model::{FilterPatch, SearchFilters, SortBy, SortOrder};

const YEAR: u16 = 2026;

const CATALOG: &str = r#"[
  {"id": "1", "title": "Dune Part Two", "genre": ["Sci-Fi", "Adventure"],
   "cast": [{"name": "Timothée Chalamet"}, {"name": "Zendaya"}],
   "director": "Denis Villeneuve", "year": 2024, "rating": 8.8},
  {"id": "2", "title": "Oppenheimer", "genre": ["Drama", "History"],
   "cast": [{"name": "Cillian Murphy", "role": "J. Robert Oppenheimer"}],
   "director": "Christopher Nolan", "year": 2023, "rating": 8.3},
  {"id": "3", "title": "Dune", "genre": ["Sci-Fi", "Adventure"],
   "cast": [{"name": "Timothée Chalamet"}, {"name": "Rebecca Ferguson"}],
   "director": "Denis Villeneuve", "year": 2021, "rating": 8.5},
  {"id": "4", "title": "Past Lives", "genre": ["Drama", "Romance"],
   "cast": [{"name": "Greta Lee"}], "director": "Celine Song",
   "year": 2023, "rating": 7.8},
  {"id": "5", "title": "Arrival", "genre": ["Sci-Fi", "Drama"],
   "cast": [{"name": "Amy Adams"}], "director": "Denis Villeneuve",
   "year": 2016, "rating": 7.9},
  {"id": "6", "title": "Heat", "genre": ["Crime", "Thriller"],
   "cast": [{"name": "Al Pacino"}, {"name": "Robert De Niro"}],
   "director": "Michael Mann", "year": 1995, "rating": 8.3},
  {"id": "7", "title": "Barbie", "genre": ["Comedy"],
   "cast": [{"name": "Margot Robbie"}], "director": "Greta Gerwig",
   "year": 2023, "rating": 6.8}
]"#;

fn catalog() -> Catalog {
    Catalog::from_json(CATALOG).unwrap()
}

fn filters(patch: FilterPatch) -> SearchFilters {
    let mut filters = SearchFilters::for_year(YEAR);
    patch.apply_to(&mut filters);
    filters
}

fn ids(results: &PlannedResults) -> Vec<&str> {
    results.items.iter().map(|i| i.movie.id.as_str()).collect()
}

#[test]
fn exact_title_outranks_newer_sequel() {
    let results = plan_at(&filters(FilterPatch::new().query("dune")), &catalog(), YEAR);
    assert_eq!(ids(&results), vec!["3", "1"]);
    assert!(results.items[0].relevance_score() > results.items[1].relevance_score());
}

#[test]
fn year_window_without_query_orders_by_rating() {
    let f = filters(
        FilterPatch::new()
            .year_range(2023, 2024)
            .sort_by(SortBy::Rating, SortOrder::Descending),
    );
    assert_eq!(ids(&plan_at(&f, &catalog(), YEAR)), vec!["1", "2", "4", "7"]);
}

#[test]
fn every_added_filter_narrows_or_keeps() {
    let catalog = catalog();
    let steps = [
        FilterPatch::new().query("e"),
        FilterPatch::new().query("e").genres(["drama", "sci-fi"]),
        FilterPatch::new()
            .query("e")
            .genres(["drama", "sci-fi"])
            .year_range(2015, 2024),
        FilterPatch::new()
            .query("e")
            .genres(["drama", "sci-fi"])
            .year_range(2015, 2024)
            .rating_range(8.0, 10.0),
        FilterPatch::new()
            .query("e")
            .genres(["drama", "sci-fi"])
            .year_range(2015, 2024)
            .rating_range(8.0, 10.0)
            .actors(["murphy"]),
    ];

    let mut previous: Option<Vec<String>> = None;
    for patch in steps {
        let current: Vec<String> = ids(&plan_at(&filters(patch), &catalog, YEAR))
            .into_iter()
            .map(str::to_owned)
            .collect();
        if let Some(previous) = &previous {
            assert!(current.iter().all(|id| previous.contains(id)));
        }
        previous = Some(current);
    }
    assert_eq!(previous.unwrap(), vec!["2"]);
}

#[test]
fn title_sort_ascending_and_descending() {
    let by_title = |order| {
        filters(
            FilterPatch::new()
                .genres(["drama"])
                .sort_by(SortBy::Title, order),
        )
    };

    let asc = plan_at(&by_title(SortOrder::Ascending), &catalog(), YEAR);
    assert_eq!(ids(&asc), vec!["5", "2", "4"]);

    let desc = plan_at(&by_title(SortOrder::Descending), &catalog(), YEAR);
    assert_eq!(ids(&desc), vec!["4", "2", "5"]);
}

#[test]
fn director_text_match_pulls_in_all_films() {
    let results = plan_at(&filters(FilterPatch::new().query("villeneuve")), &catalog(), YEAR);
    let mut found = ids(&results);
    found.sort_unstable();
    assert_eq!(found, vec!["1", "3", "5"]);
}

#[test]
fn suggestions_cover_people_and_genres() {
    let catalog = catalog();
    assert!(suggest(&catalog, "chr", 8).contains(&"Christopher Nolan".to_string()));
    assert_eq!(suggest(&catalog, "sci", 8), vec!["Sci-Fi"]);
    assert_eq!(suggest(&catalog, "greta", 8), vec!["Greta Lee", "Greta Gerwig"]);
}
