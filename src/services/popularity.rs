use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::EnrichedBook;

/// Minimum number of ratings (exclusive) for a book to count as popular.
pub const POPULAR_MIN_RATINGS: usize = 100;

/// Minimum average rating (exclusive) for a book to count as popular.
pub const POPULAR_MIN_AVERAGE: f64 = 4.0;

/// Number of featured books shown per page view.
pub const DEFAULT_SAMPLE_SIZE: usize = 4;

pub fn is_popular(book: &EnrichedBook) -> bool {
    book.num_ratings > POPULAR_MIN_RATINGS && book.average_rating > POPULAR_MIN_AVERAGE
}

/// Draws `k` distinct popular books uniformly at random.
///
/// When fewer than `k` books qualify, every qualifying book is returned in
/// random order and a warning is logged.
pub fn sample_popular<R: Rng + ?Sized>(
    enriched: &[EnrichedBook],
    k: usize,
    rng: &mut R,
) -> Vec<EnrichedBook> {
    let candidates: Vec<&EnrichedBook> = enriched.iter().filter(|b| is_popular(b)).collect();

    if candidates.len() < k {
        tracing::warn!(
            requested = k,
            available = candidates.len(),
            "Not enough popular books to fill the sample"
        );
    }

    candidates
        .choose_multiple(rng, k)
        .map(|&book| book.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn enriched(isbn: &str, num_ratings: usize, average_rating: f64) -> EnrichedBook {
        EnrichedBook {
            isbn: isbn.to_string(),
            title: format!("Title {isbn}"),
            author: "Author".to_string(),
            image_url: String::new(),
            num_ratings,
            average_rating,
        }
    }

    fn catalog() -> Vec<EnrichedBook> {
        let mut books: Vec<EnrichedBook> = (0..10)
            .map(|i| enriched(&format!("p{i}"), 150 + i, 7.5))
            .collect();
        books.push(enriched("few", 100, 9.0));
        books.push(enriched("low", 500, 4.0));
        books
    }

    #[test]
    fn test_is_popular_thresholds_are_exclusive() {
        assert!(is_popular(&enriched("a", 101, 4.01)));
        assert!(!is_popular(&enriched("b", 100, 9.0)));
        assert!(!is_popular(&enriched("c", 500, 4.0)));
    }

    #[test]
    fn test_sample_returns_k_distinct_popular_books() {
        let books = catalog();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let sample = sample_popular(&books, DEFAULT_SAMPLE_SIZE, &mut rng);
            assert_eq!(sample.len(), DEFAULT_SAMPLE_SIZE);
            assert!(sample.iter().all(is_popular));
            let isbns: HashSet<&str> = sample.iter().map(|b| b.isbn.as_str()).collect();
            assert_eq!(isbns.len(), sample.len());
        }
    }

    #[test]
    fn test_sample_varies_between_calls() {
        let books = catalog();
        let mut rng = StdRng::seed_from_u64(11);

        let draws: HashSet<Vec<String>> = (0..20)
            .map(|_| {
                sample_popular(&books, 2, &mut rng)
                    .into_iter()
                    .map(|b| b.isbn)
                    .collect()
            })
            .collect();
        assert!(draws.len() > 1);
    }

    #[test]
    fn test_sample_underflow_returns_all_candidates() {
        let books = vec![
            enriched("a", 200, 8.0),
            enriched("b", 300, 6.0),
            enriched("c", 20, 9.0),
        ];
        let mut rng = StdRng::seed_from_u64(3);

        let sample = sample_popular(&books, 4, &mut rng);

        let isbns: HashSet<&str> = sample.iter().map(|b| b.isbn.as_str()).collect();
        assert_eq!(isbns, HashSet::from(["a", "b"]));
    }

    #[test]
    fn test_sample_of_empty_catalog_is_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_popular(&[], 4, &mut rng).is_empty());
    }
}
