use serde::{Deserialize, Serialize};

/// A cleaned book row.
///
/// ISBNs are alphanumeric only; several rows may still share an ISBN when the
/// source file carries duplicates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookRecord {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

/// A cleaned rating row. `rating` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRecord {
    pub user_id: u64,
    pub isbn: String,
    pub rating: i32,
}

/// Per-ISBN rating statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookStats {
    pub isbn: String,
    pub num_ratings: usize,
    pub average_rating: f64,
}

/// A book joined with its rating statistics, as served to the homepage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBook {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub image_url: String,
    pub num_ratings: usize,
    pub average_rating: f64,
}

impl EnrichedBook {
    pub fn from_parts(stats: &BookStats, book: &BookRecord) -> Self {
        Self {
            isbn: book.isbn.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            image_url: book.image_url.clone(),
            num_ratings: stats.num_ratings,
            average_rating: stats.average_rating,
        }
    }
}
