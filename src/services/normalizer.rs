use regex::Regex;

use crate::models::{BookRecord, RatingRecord, RawBook, RawRating};

/// Ratings below this value mean "no rating given".
pub const MIN_VALID_RATING: i32 = 1;

/// Cleans raw book and rating rows into typed records.
///
/// Holds the compiled title and ISBN patterns so a single instance can be
/// reused for the startup load and for request-time ISBN cleanup.
pub struct Normalizer {
    title_suffix: Regex,
    isbn_parenthesized: Regex,
}

impl Normalizer {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // Greedy: everything from the first '(' to the last ')', or from the first ':' onwards
            title_suffix: Regex::new(r"\(.*\)|:.*")?,
            isbn_parenthesized: Regex::new(r"\(.*?\)")?,
        })
    }

    /// Cleans both tables, dropping rows that are missing required fields and
    /// ratings below [`MIN_VALID_RATING`].
    pub fn normalize(
        &self,
        raw_books: Vec<RawBook>,
        raw_ratings: Vec<RawRating>,
    ) -> (Vec<BookRecord>, Vec<RatingRecord>) {
        let raw_book_count = raw_books.len();
        let raw_rating_count = raw_ratings.len();

        let books: Vec<BookRecord> = raw_books
            .into_iter()
            .filter_map(|raw| self.normalize_book(raw))
            .collect();

        let ratings: Vec<RatingRecord> = raw_ratings
            .into_iter()
            .filter_map(normalize_rating)
            .collect();

        tracing::info!(
            books_kept = books.len(),
            books_dropped = raw_book_count - books.len(),
            ratings_kept = ratings.len(),
            ratings_dropped = raw_rating_count - ratings.len(),
            "Normalized raw records"
        );

        (books, ratings)
    }

    /// Returns `None` when any required field is missing or the ISBN is empty
    /// after cleaning.
    pub fn normalize_book(&self, raw: RawBook) -> Option<BookRecord> {
        let isbn = self.clean_book_isbn(&raw.isbn?);
        if isbn.is_empty() {
            return None;
        }

        Some(BookRecord {
            isbn,
            title: self.clean_title(&raw.title?),
            author: raw.author?,
            image_url: raw.image_url?,
        })
    }

    /// Strips parenthesized fragments, any `:` suffix and `amp;` artifacts.
    ///
    /// Surrounding whitespace is left untouched, so `"Foo (Vol 1)"` becomes `"Foo "`.
    pub fn clean_title(&self, title: &str) -> String {
        self.title_suffix.replace_all(title, "").replace("amp;", "")
    }

    pub fn clean_book_isbn(&self, isbn: &str) -> String {
        let without_parens = self.isbn_parenthesized.replace_all(isbn, "");
        keep_alphanumeric(&without_parens)
    }
}

/// Cleans an ISBN as it appears in the ratings file or in a request.
///
/// Keeps only ASCII letters and digits, then removes every `ISBN` literal,
/// including ones formed by an earlier removal.
pub fn clean_rating_isbn(isbn: &str) -> String {
    let mut cleaned = keep_alphanumeric(isbn);
    while cleaned.contains("ISBN") {
        cleaned = cleaned.replace("ISBN", "");
    }
    cleaned
}

fn normalize_rating(raw: RawRating) -> Option<RatingRecord> {
    let rating = raw.rating?;
    if rating < MIN_VALID_RATING {
        return None;
    }

    let isbn = clean_rating_isbn(&raw.isbn?);
    if isbn.is_empty() {
        return None;
    }

    Some(RatingRecord {
        user_id: raw.user_id?,
        isbn,
        rating,
    })
}

fn keep_alphanumeric(value: &str) -> String {
    value.chars().filter(char::is_ascii_alphanumeric).collect()
}
