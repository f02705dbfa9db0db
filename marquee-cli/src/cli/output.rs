use marquee_core::SearchSessionState;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SearchReport {
    pub query: String,
    pub total: usize,
    pub page: usize,
    pub has_more: bool,
    pub results: Vec<ResultRow>,
}

#[derive(Debug, Serialize)]
pub struct ResultRow {
    pub id: String,
    pub title: String,
    pub year: u16,
    pub rating: f32,
    pub genre: Vec<String>,
    pub director: String,
    pub score: f64,
}

impl SearchReport {
    pub fn from_state(state: &SearchSessionState) -> Self {
        Self {
            query: state.filters.query.clone(),
            total: state.total,
            page: state.page,
            has_more: state.has_more,
            results: state
                .results
                .iter()
                .map(|item| ResultRow {
                    id: item.movie.id.to_string(),
                    title: item.movie.title.clone(),
                    year: item.movie.year,
                    rating: item.movie.rating,
                    genre: item.movie.genre.clone(),
                    director: item.movie.director.clone(),
                    score: item.relevance_score(),
                })
                .collect(),
        }
    }
}

pub fn print_table(report: &SearchReport) {
    if report.results.is_empty() {
        println!("no results");
        return;
    }

    let width = report.results.len().to_string().len();
    for (index, row) in report.results.iter().enumerate() {
        println!(
            "{:>width$}. {} ({})  {:.1}/10  {}",
            index + 1,
            row.title,
            row.year,
            row.rating,
            row.genre.join(", "),
        );
    }
    println!(
        "showing {} of {} (page {}{})",
        report.results.len(),
        report.total,
        report.page,
        if report.has_more { ", more available" } else { "" }
    );
}
