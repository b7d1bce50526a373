use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::DataLoadError;
use crate::models::{RawBook, RawRating, BOOK_COLUMNS, RATING_COLUMNS};

/// Reads every row of the books file.
pub fn load_books(path: &Path) -> Result<Vec<RawBook>, DataLoadError> {
    read_rows(path, &BOOK_COLUMNS)
}

/// Reads every row of the ratings file.
pub fn load_ratings(path: &Path) -> Result<Vec<RawRating>, DataLoadError> {
    read_rows(path, &RATING_COLUMNS)
}

fn read_rows<T: DeserializeOwned>(
    path: &Path,
    required: &[&str],
) -> Result<Vec<T>, DataLoadError> {
    let file = File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let rows = parse_rows(file, path, required)?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Loaded CSV file");
    Ok(rows)
}

/// Parses CSV rows from `reader`, checking that every `required` column is
/// present in the header. `path` is only used for error reporting.
pub fn parse_rows<T: DeserializeOwned, R: Read>(
    reader: R,
    path: &Path,
    required: &[&str],
) -> Result<Vec<T>, DataLoadError> {
    let csv_error = |source: csv::Error| DataLoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    // Padded cells like " 5" must still parse as numbers
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?;
    if let Some(column) = required
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(DataLoadError::MissingColumn {
            path: PathBuf::from(path),
            column: column.to_string(),
        });
    }

    reader
        .deserialize()
        .collect::<Result<Vec<T>, _>>()
        .map_err(csv_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const BOOKS_CSV: &str = "\
ISBN,Book-Title,Book-Author,Year-Of-Publication,Publisher,Image-URL-S,Image-URL-M,Image-URL-L
0195153448,Classical Mythology,Mark P. O. Morford,2002,Oxford University Press,s,m,http://img/l1.jpg
0002005018,Clara Callan,Richard Bruce Wright,2001,HarperFlamingo Canada,s,m,
";

    #[test]
    fn test_parse_books_with_extra_columns_and_blank_fields() {
        let rows: Vec<RawBook> =
            parse_rows(BOOKS_CSV.as_bytes(), Path::new("Books.csv"), &BOOK_COLUMNS).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].isbn.as_deref(), Some("0195153448"));
        assert_eq!(rows[0].title.as_deref(), Some("Classical Mythology"));
        assert_eq!(rows[0].image_url.as_deref(), Some("http://img/l1.jpg"));
        assert_eq!(rows[1].image_url, None);
    }

    #[test]
    fn test_parse_ratings_treats_garbage_numbers_as_missing() {
        let csv = "User-ID,ISBN,Book-Rating\n276725,034545104X,0\nabc,0155061224,5\n276727,0446520802,x\n";

        let rows: Vec<RawRating> =
            parse_rows(csv.as_bytes(), Path::new("Ratings.csv"), &RATING_COLUMNS).unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].user_id, Some(276725));
        assert_eq!(rows[0].rating, Some(0));
        assert_eq!(rows[1].user_id, None);
        assert_eq!(rows[2].rating, None);
    }

    #[test]
    fn test_parse_ratings_trims_padded_cells() {
        let csv = "User-ID , ISBN ,Book-Rating\n 276725 , 034545104X , 5\n";

        let rows: Vec<RawRating> =
            parse_rows(csv.as_bytes(), Path::new("Ratings.csv"), &RATING_COLUMNS).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].user_id, Some(276725));
        assert_eq!(rows[0].isbn.as_deref(), Some("034545104X"));
        assert_eq!(rows[0].rating, Some(5));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let csv = "User-ID,ISBN\n1,111\n";

        let err = parse_rows::<RawRating, _>(csv.as_bytes(), Path::new("Ratings.csv"), &RATING_COLUMNS)
            .unwrap_err();

        assert!(matches!(
            err,
            DataLoadError::MissingColumn { ref column, .. } if column == "Book-Rating"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BOOKS_CSV.as_bytes()).unwrap();

        let rows = load_books(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_ratings(Path::new("/nonexistent/Ratings.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }
}
