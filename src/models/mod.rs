use serde::{Deserialize, Serialize};

pub mod book;
pub mod chart;

pub use book::{BookRecord, BookStats, EnrichedBook, RatingRecord};
pub use chart::ChartBar;

// ============================================================================
// Raw CSV rows
// ============================================================================

/// A row of the books file as it appears on disk.
///
/// Every field is optional: the dataset has gaps, and rows with missing
/// required fields are dropped by the normalizer rather than failing the load.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawBook {
    #[serde(rename = "ISBN", default)]
    pub isbn: Option<String>,
    #[serde(rename = "Book-Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Book-Author", default)]
    pub author: Option<String>,
    #[serde(rename = "Image-URL-L", default)]
    pub image_url: Option<String>,
}

/// A row of the ratings file as it appears on disk.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawRating {
    #[serde(rename = "User-ID", default, deserialize_with = "csv::invalid_option")]
    pub user_id: Option<u64>,
    #[serde(rename = "ISBN", default)]
    pub isbn: Option<String>,
    #[serde(rename = "Book-Rating", default, deserialize_with = "csv::invalid_option")]
    pub rating: Option<i32>,
}

/// Column names the loader requires in the books file.
pub const BOOK_COLUMNS: [&str; 4] = ["ISBN", "Book-Title", "Book-Author", "Image-URL-L"];

/// Column names the loader requires in the ratings file.
pub const RATING_COLUMNS: [&str; 3] = ["User-ID", "ISBN", "Book-Rating"];
