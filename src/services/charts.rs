use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{ChartBar, EnrichedBook};

pub const TOP_BOOKS_MIN_RATINGS: usize = 20;
pub const TOP_BOOKS_LIMIT: usize = 10;
pub const TOP_AUTHORS_MIN_RATINGS: usize = 100;
pub const TOP_AUTHORS_LIMIT: usize = 5;

/// Highest average-rated books among those with at least `min_ratings` ratings.
pub fn top_rated_books(enriched: &[EnrichedBook], min_ratings: usize, limit: usize) -> Vec<ChartBar> {
    let bars = enriched
        .iter()
        .filter(|b| b.num_ratings >= min_ratings)
        .map(|b| ChartBar {
            label: b.title.clone(),
            value: b.average_rating,
        })
        .collect();
    top_bars(bars, limit)
}

/// Authors ranked by the mean of their books' average ratings, counting only
/// books with at least `min_ratings` ratings.
pub fn top_rated_authors(
    enriched: &[EnrichedBook],
    min_ratings: usize,
    limit: usize,
) -> Vec<ChartBar> {
    let mut by_author: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for book in enriched.iter().filter(|b| b.num_ratings >= min_ratings) {
        let entry = by_author.entry(book.author.as_str()).or_default();
        entry.0 += book.average_rating;
        entry.1 += 1;
    }

    let bars = by_author
        .into_iter()
        .map(|(author, (sum, count))| ChartBar {
            label: author.to_string(),
            value: sum / count as f64,
        })
        .collect();
    top_bars(bars, limit)
}

fn top_bars(mut bars: Vec<ChartBar>, limit: usize) -> Vec<ChartBar> {
    bars.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });
    bars.truncate(limit);
    bars
}
