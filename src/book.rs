//! Book - Catalog Domain Model
//!
//! TigerStyle: Explicit fields, storage-assigned identity.
//!
//! A book enters the system without an id; storage assigns a strictly
//! increasing positive id on first save. Title, author, and genre are
//! required to be non-blank at the API boundary only — the model itself
//! carries whatever it is given.

use serde::{Deserialize, Serialize};

/// A book in the catalog.
///
/// JSON shape: `{id, title, author, genre, isbn, publishedYear}` with
/// absent optionals serialized as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Storage-assigned identity; `None` before first save
    #[serde(default)]
    pub id: Option<i64>,
    /// Title (non-blank to pass API validation)
    pub title: String,
    /// Author (non-blank to pass API validation)
    pub author: String,
    /// Genre (non-blank to pass API validation)
    pub genre: String,
    /// Optional ISBN
    #[serde(default)]
    pub isbn: Option<String>,
    /// Optional publication year
    #[serde(default)]
    pub published_year: Option<i32>,
}

impl Book {
    /// Create an unsaved book with the required fields.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>, genre: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            isbn: None,
            published_year: None,
        }
    }

    /// Set the ISBN.
    #[must_use]
    pub fn with_isbn(mut self, isbn: impl Into<String>) -> Self {
        self.isbn = Some(isbn.into());
        self
    }

    /// Set the publication year.
    #[must_use]
    pub fn with_published_year(mut self, year: i32) -> Self {
        self.published_year = Some(year);
        self
    }

    /// Set the id, as storage does on save.
    #[must_use]
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// True if any required field is blank (empty after trimming).
    ///
    /// The request layer rejects such books with 400; storage accepts them.
    #[must_use]
    pub fn has_blank_required_field(&self) -> bool {
        self.title.trim().is_empty() || self.author.trim().is_empty() || self.genre.trim().is_empty()
    }

    /// Case-insensitive exact match on genre.
    #[must_use]
    pub fn genre_matches(&self, genre: &str) -> bool {
        self.genre.to_lowercase() == genre.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_new_has_no_id() {
        let book = Book::new("Dune", "Frank Herbert", "Science Fiction");

        assert_eq!(book.id, None);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.genre, "Science Fiction");
        assert!(book.isbn.is_none());
        assert!(book.published_year.is_none());
    }

    #[test]
    fn test_book_builder_chain() {
        let book = Book::new("Dune", "Frank Herbert", "Science Fiction")
            .with_isbn("978-0441172719")
            .with_published_year(1965)
            .with_id(7);

        assert_eq!(book.id, Some(7));
        assert_eq!(book.isbn.as_deref(), Some("978-0441172719"));
        assert_eq!(book.published_year, Some(1965));
    }

    #[test]
    fn test_blank_required_field_detection() {
        assert!(!Book::new("T", "A", "G").has_blank_required_field());
        assert!(Book::new("", "A", "G").has_blank_required_field());
        assert!(Book::new("T", "   ", "G").has_blank_required_field());
        assert!(Book::new("T", "A", "\t").has_blank_required_field());
    }

    #[test]
    fn test_genre_matches_ignores_case() {
        let book = Book::new("T", "A", "Fiction");

        assert!(book.genre_matches("fiction"));
        assert!(book.genre_matches("FICTION"));
        assert!(!book.genre_matches("Fantasy"));
        assert!(!book.genre_matches("fictio"));
    }

    #[test]
    fn test_json_shape_uses_published_year_camel_case() {
        let book = Book::new("1984", "George Orwell", "Dystopian")
            .with_id(4)
            .with_isbn("978-0451524935")
            .with_published_year(1949);

        let json = serde_json::to_value(&book).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["title"], "1984");
        assert_eq!(json["publishedYear"], 1949);
        assert!(json.get("published_year").is_none());
    }

    #[test]
    fn test_json_absent_optionals_are_null() {
        let book = Book::new("T", "A", "G");
        let json = serde_json::to_value(&book).unwrap();

        assert!(json["id"].is_null());
        assert!(json["isbn"].is_null());
        assert!(json["publishedYear"].is_null());
    }

    #[test]
    fn test_json_deserialize_without_id() {
        let book: Book =
            serde_json::from_str(r#"{"title":"T","author":"A","genre":"G"}"#).unwrap();

        assert_eq!(book.id, None);
        assert_eq!(book.title, "T");
    }
}
