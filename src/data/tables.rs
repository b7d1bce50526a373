use std::collections::HashMap;

use crate::models::{BookRecord, RatingRecord};

/// Cleaned book rows with a lookup from ISBN to the first row carrying it.
#[derive(Debug, Default)]
pub struct BookTable {
    rows: Vec<BookRecord>,
    first_by_isbn: HashMap<String, usize>,
}

impl BookTable {
    pub fn new(rows: Vec<BookRecord>) -> Self {
        let mut first_by_isbn = HashMap::with_capacity(rows.len());
        for (idx, book) in rows.iter().enumerate() {
            first_by_isbn.entry(book.isbn.clone()).or_insert(idx);
        }
        Self { rows, first_by_isbn }
    }

    pub fn get(&self, isbn: &str) -> Option<&BookRecord> {
        self.first_by_isbn.get(isbn).map(|&idx| &self.rows[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Cleaned rating rows indexed by ISBN and by user.
///
/// Index entries are positions into `rows`, so a query touches only the
/// ratings of the seed book and of the users who rated it.
#[derive(Debug, Default)]
pub struct RatingTable {
    rows: Vec<RatingRecord>,
    by_isbn: HashMap<String, Vec<usize>>,
    by_user: HashMap<u64, Vec<usize>>,
}

impl RatingTable {
    pub fn new(rows: Vec<RatingRecord>) -> Self {
        let mut by_isbn: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_user: HashMap<u64, Vec<usize>> = HashMap::new();
        for (idx, rating) in rows.iter().enumerate() {
            by_isbn.entry(rating.isbn.clone()).or_default().push(idx);
            by_user.entry(rating.user_id).or_default().push(idx);
        }
        Self {
            rows,
            by_isbn,
            by_user,
        }
    }

    /// Ratings of one book, in file order. Empty for an unknown ISBN.
    pub fn for_isbn<'a>(&'a self, isbn: &str) -> impl Iterator<Item = &'a RatingRecord> + 'a {
        self.by_isbn
            .get(isbn)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.rows[idx])
    }

    /// Ratings given by one user, in file order.
    pub fn for_user(&self, user_id: u64) -> impl Iterator<Item = &RatingRecord> + '_ {
        self.by_user
            .get(&user_id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.rows[idx])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
