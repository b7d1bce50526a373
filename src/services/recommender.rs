use std::collections::{HashMap, HashSet};

use crate::data::{BookTable, RatingTable};
use crate::models::BookRecord;

/// A user "liked" a book when they rated it strictly above this value.
pub const LIKED_THRESHOLD: i32 = 5;

/// Number of recommendations returned when the caller does not ask otherwise.
pub const DEFAULT_RECOMMENDATIONS: usize = 4;

/// A candidate book and how many liked-ratings it shares with the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoOccurrence<'a> {
    pub isbn: &'a str,
    pub count: usize,
}

/// Ranks books co-liked with `seed_isbn`.
///
/// Collects the users who rated the seed above [`LIKED_THRESHOLD`], then counts,
/// per other ISBN, the ratings above the threshold those users gave. Ordered by
/// count descending, then ISBN ascending.
pub fn co_occurrences<'a>(seed_isbn: &str, ratings: &'a RatingTable) -> Vec<CoOccurrence<'a>> {
    let fans: HashSet<u64> = ratings
        .for_isbn(seed_isbn)
        .filter(|r| r.rating > LIKED_THRESHOLD)
        .map(|r| r.user_id)
        .collect();

    let mut counts: HashMap<&'a str, usize> = HashMap::new();
    for &user_id in &fans {
        for rating in ratings.for_user(user_id) {
            if rating.rating > LIKED_THRESHOLD && rating.isbn != seed_isbn {
                *counts.entry(rating.isbn.as_str()).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<CoOccurrence<'a>> = counts
        .into_iter()
        .map(|(isbn, count)| CoOccurrence { isbn, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.isbn.cmp(b.isbn)));
    ranked
}

/// Recommends up to `n` books for readers of `seed_isbn`.
///
/// The top `n` ranked ISBNs are joined against `books`; an ISBN with no book
/// row is dropped rather than replaced, so the result may be shorter than `n`.
/// An unknown seed or one nobody liked yields an empty list.
pub fn recommend(
    seed_isbn: &str,
    ratings: &RatingTable,
    books: &BookTable,
    n: usize,
) -> Vec<BookRecord> {
    let ranked = co_occurrences(seed_isbn, ratings);
    let candidates = ranked.len();

    let recommendations: Vec<BookRecord> = ranked
        .into_iter()
        .take(n)
        .filter_map(|candidate| books.get(candidate.isbn).cloned())
        .collect();

    tracing::debug!(
        seed_isbn = %seed_isbn,
        candidates,
        returned = recommendations.len(),
        "Computed recommendations"
    );

    recommendations
}
