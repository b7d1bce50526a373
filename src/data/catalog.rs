use std::path::Path;

use chrono::{DateTime, Utc};

use crate::data::loader;
use crate::data::{BookTable, RatingTable};
use crate::error::DataLoadError;
use crate::models::{BookRecord, ChartBar, EnrichedBook, RatingRecord, RawBook, RawRating};
use crate::services::{aggregate, charts, Normalizer};

/// Immutable snapshot of everything the query path reads.
///
/// Built once before the server accepts requests and shared behind an `Arc`;
/// nothing mutates it afterwards.
#[derive(Debug)]
pub struct Catalog {
    books: BookTable,
    ratings: RatingTable,
    enriched: Vec<EnrichedBook>,
    top_books_chart: Vec<ChartBar>,
    top_authors_chart: Vec<ChartBar>,
    loaded_at: DateTime<Utc>,
}

impl Catalog {
    /// Builds a catalog from already-cleaned records.
    pub fn build(books: Vec<BookRecord>, ratings: Vec<RatingRecord>, min_ratings: usize) -> Self {
        let enriched = aggregate(&books, &ratings, min_ratings);
        let top_books_chart = charts::top_rated_books(
            &enriched,
            charts::TOP_BOOKS_MIN_RATINGS,
            charts::TOP_BOOKS_LIMIT,
        );
        let top_authors_chart = charts::top_rated_authors(
            &enriched,
            charts::TOP_AUTHORS_MIN_RATINGS,
            charts::TOP_AUTHORS_LIMIT,
        );

        Self {
            books: BookTable::new(books),
            ratings: RatingTable::new(ratings),
            enriched,
            top_books_chart,
            top_authors_chart,
            loaded_at: Utc::now(),
        }
    }

    /// Normalizes raw rows and builds a catalog from them.
    pub fn from_raw(
        normalizer: &Normalizer,
        raw_books: Vec<RawBook>,
        raw_ratings: Vec<RawRating>,
        min_ratings: usize,
    ) -> Self {
        let (books, ratings) = normalizer.normalize(raw_books, raw_ratings);
        Self::build(books, ratings, min_ratings)
    }

    /// Loads both CSV files and builds the catalog. Blocking.
    pub fn load(
        normalizer: &Normalizer,
        books_path: &Path,
        ratings_path: &Path,
        min_ratings: usize,
    ) -> Result<Self, DataLoadError> {
        let raw_books = loader::load_books(books_path)?;
        let raw_ratings = loader::load_ratings(ratings_path)?;
        let catalog = Self::from_raw(normalizer, raw_books, raw_ratings, min_ratings);

        tracing::info!(
            books = catalog.books.len(),
            ratings = catalog.ratings.len(),
            enriched = catalog.enriched.len(),
            "Catalog ready"
        );

        Ok(catalog)
    }

    pub fn books(&self) -> &BookTable {
        &self.books
    }

    pub fn ratings(&self) -> &RatingTable {
        &self.ratings
    }

    pub fn enriched(&self) -> &[EnrichedBook] {
        &self.enriched
    }

    pub fn top_books_chart(&self) -> &[ChartBar] {
        &self.top_books_chart
    }

    pub fn top_authors_chart(&self) -> &[ChartBar] {
        &self.top_authors_chart
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::aggregator::DEFAULT_MIN_RATINGS;

    #[test]
    fn test_from_raw_end_to_end() {
        let normalizer = Normalizer::new().unwrap();
        let raw_books = vec![RawBook {
            isbn: Some("111".to_string()),
            title: Some("Foo (Vol 1)".to_string()),
            author: Some("A".to_string()),
            image_url: Some("http://img/111.jpg".to_string()),
        }];
        let raw_ratings = (1..=60)
            .map(|user| RawRating {
                user_id: Some(user),
                isbn: Some("111".to_string()),
                rating: Some(8),
            })
            .collect();

        let catalog = Catalog::from_raw(&normalizer, raw_books, raw_ratings, DEFAULT_MIN_RATINGS);

        assert_eq!(catalog.enriched().len(), 1);
        let book = &catalog.enriched()[0];
        assert_eq!(book.title, "Foo ");
        assert_eq!(book.num_ratings, 60);
        assert!((book.average_rating - 8.0).abs() < 1e-9);
        assert_eq!(catalog.top_books_chart().len(), 1);
        assert!(catalog.top_authors_chart().is_empty());
    }
}
