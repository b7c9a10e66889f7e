//! MemoryRepository - In-Memory Catalog
//!
//! TigerStyle: Shared list behind an RwLock, atomic id assignment.
//!
//! The id counter is atomic so concurrent saves can never hand out the
//! same id; the list itself takes the write lock for the whole save so
//! upserts are not interleaved.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::book::Book;

use super::error::StorageResult;
use super::repository::BookRepository;

/// First id handed out by a fresh repository.
pub const BOOK_ID_FIRST: i64 = 1;

/// In-memory book repository.
#[derive(Debug)]
pub struct MemoryRepository {
    books: RwLock<Vec<Book>>,
    next_id: AtomicI64,
}

impl MemoryRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            books: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(BOOK_ID_FIRST),
        }
    }

    /// Create a repository pre-populated with the sample catalog.
    #[must_use]
    pub fn with_sample_catalog() -> Self {
        let next_id = AtomicI64::new(BOOK_ID_FIRST);
        let sample = [
            Book::new("The Kotlin Programming Language", "JetBrains", "Programming")
                .with_isbn("978-0123456789")
                .with_published_year(2023),
            Book::new("Clean Code", "Robert C. Martin", "Programming")
                .with_isbn("978-0132350884")
                .with_published_year(2008),
            Book::new("The Lord of the Rings", "J.R.R. Tolkien", "Fantasy")
                .with_isbn("978-0544003415")
                .with_published_year(1954),
            Book::new("1984", "George Orwell", "Dystopian")
                .with_isbn("978-0451524935")
                .with_published_year(1949),
            Book::new("To Kill a Mockingbird", "Harper Lee", "Fiction")
                .with_isbn("978-0061120084")
                .with_published_year(1960),
            Book::new("The Pragmatic Programmer", "David Thomas", "Programming")
                .with_isbn("978-0201616224")
                .with_published_year(1999),
        ];

        let books = sample
            .into_iter()
            .map(|book| {
                let id = next_id.fetch_add(1, Ordering::SeqCst);
                book.with_id(id)
            })
            .collect();

        Self {
            books: RwLock::new(books),
            next_id,
        }
    }
}

impl Default for MemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepository for MemoryRepository {
    async fn find_all(&self) -> StorageResult<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn save(&self, book: Book) -> StorageResult<Book> {
        let mut books = self.books.write().await;

        match book.id {
            None => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                // Postcondition: ids are positive
                assert!(id > 0, "assigned id must be positive, got {id}");

                let saved = book.with_id(id);
                books.push(saved.clone());
                Ok(saved)
            }
            Some(id) => {
                match books.iter_mut().find(|b| b.id == Some(id)) {
                    Some(slot) => *slot = book.clone(),
                    None => books.push(book.clone()),
                }
                Ok(book)
            }
        }
    }

    async fn find_by_genre(&self, genre: &str) -> StorageResult<Vec<Book>> {
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|b| b.genre_matches(genre))
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.id == Some(id)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_repository_is_empty() {
        let repo = MemoryRepository::new();
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sample_catalog_has_six_books() {
        let repo = MemoryRepository::with_sample_catalog();

        let books = repo.find_all().await.unwrap();
        assert_eq!(books.len(), 6);
        assert!(books.iter().all(|b| b.id.is_some()));
    }

    #[tokio::test]
    async fn test_save_assigns_increasing_ids() {
        let repo = MemoryRepository::new();

        let a = repo.save(Book::new("A", "X", "G")).await.unwrap();
        let b = repo.save(Book::new("B", "Y", "G")).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert_eq!(a.title, "A");
        assert_eq!(a.author, "X");
    }

    #[tokio::test]
    async fn test_save_with_known_id_updates_in_place() {
        let repo = MemoryRepository::new();
        let saved = repo.save(Book::new("Original", "A", "G")).await.unwrap();

        let mut updated = saved.clone();
        updated.title = "Revised".to_string();
        repo.save(updated).await.unwrap();

        let books = repo.find_all().await.unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Revised");
    }

    #[tokio::test]
    async fn test_save_with_unknown_id_appends() {
        let repo = MemoryRepository::new();

        let saved = repo.save(Book::new("T", "A", "G").with_id(99)).await.unwrap();

        assert_eq!(saved.id, Some(99));
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
        assert_eq!(repo.find_by_id(99).await.unwrap().unwrap().title, "T");
    }

    #[tokio::test]
    async fn test_find_by_genre_is_case_insensitive_exact() {
        let repo = MemoryRepository::new();
        repo.save(Book::new("A", "X", "Fiction")).await.unwrap();
        repo.save(Book::new("B", "Y", "fiction")).await.unwrap();
        repo.save(Book::new("C", "Z", "Fantasy")).await.unwrap();

        let fiction = repo.find_by_genre("FICTION").await.unwrap();
        assert_eq!(fiction.len(), 2);
        assert!(fiction.iter().all(|b| b.genre_matches("Fiction")));

        assert!(repo.find_by_genre("Fictio").await.unwrap().is_empty());
        assert!(repo.find_by_genre("Horror").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let repo = MemoryRepository::new();
        let saved = repo.save(Book::new("T", "A", "G")).await.unwrap();
        let id = saved.id.unwrap();

        assert_eq!(repo.find_by_id(id).await.unwrap(), Some(saved));
        assert_eq!(repo.find_by_id(id + 100).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_saves_yield_distinct_ids() {
        use std::collections::HashSet;
        use std::sync::Arc;

        let repo = Arc::new(MemoryRepository::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = Arc::clone(&repo);
            handles.push(tokio::spawn(async move {
                repo.save(Book::new(format!("Book {i}"), "A", "G"))
                    .await
                    .unwrap()
                    .id
                    .unwrap()
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            assert!(ids.insert(handle.await.unwrap()));
        }
        assert_eq!(ids.len(), 32);
    }
}
