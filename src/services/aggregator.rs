use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{BookRecord, BookStats, EnrichedBook, RatingRecord};

/// Books with fewer ratings than this are dropped from the catalog.
pub const DEFAULT_MIN_RATINGS: usize = 50;

/// Running count and mean for one ISBN.
#[derive(Debug, Default, Clone, Copy)]
struct RatingAccumulator {
    count: usize,
    mean: f64,
}

impl RatingAccumulator {
    fn push(&mut self, rating: i32) {
        self.count += 1;
        self.mean += (f64::from(rating) - self.mean) / self.count as f64;
    }
}

/// Computes rating count and mean per ISBN in a single pass.
///
/// Output is ordered by ISBN ascending.
pub fn compute_stats(ratings: &[RatingRecord]) -> Vec<BookStats> {
    let mut groups: BTreeMap<&str, RatingAccumulator> = BTreeMap::new();
    for rating in ratings {
        groups
            .entry(rating.isbn.as_str())
            .or_default()
            .push(rating.rating);
    }

    groups
        .into_iter()
        .map(|(isbn, acc)| BookStats {
            isbn: isbn.to_string(),
            num_ratings: acc.count,
            average_rating: acc.mean,
        })
        .collect()
}

/// Builds the enriched catalog: per-ISBN stats inner-joined with book rows,
/// filtered to `num_ratings >= min_ratings`, one row per distinct title.
///
/// Rows are produced in ascending ISBN order and, for an ISBN listed more than
/// once in `books`, in book file order. The first row seen for a title wins,
/// so duplicate titles resolve to their lowest ISBN.
pub fn aggregate(
    books: &[BookRecord],
    ratings: &[RatingRecord],
    min_ratings: usize,
) -> Vec<EnrichedBook> {
    let stats = compute_stats(ratings);

    let mut books_by_isbn: HashMap<&str, Vec<&BookRecord>> = HashMap::new();
    for book in books {
        books_by_isbn.entry(book.isbn.as_str()).or_default().push(book);
    }

    let mut seen_titles: HashSet<&str> = HashSet::new();
    let mut enriched = Vec::new();
    let mut joined = 0usize;

    for stat in stats.iter().filter(|s| s.num_ratings >= min_ratings) {
        let Some(matches) = books_by_isbn.get(stat.isbn.as_str()) else {
            continue;
        };
        for book in matches {
            joined += 1;
            if seen_titles.insert(book.title.as_str()) {
                enriched.push(EnrichedBook::from_parts(stat, book));
            }
        }
    }

    tracing::info!(
        rated_isbns = stats.len(),
        joined_rows = joined,
        catalog_size = enriched.len(),
        min_ratings,
        "Aggregated book statistics"
    );

    enriched
}
