//! BookRepository - Storage Contract
//!
//! TigerStyle: One trait, two implementations (in-memory and Postgres).
//!
//! The contract deliberately has no delete: books are created and
//! updated in place, never removed through this surface.

use async_trait::async_trait;

use crate::book::Book;

use super::error::StorageResult;

/// Persistence contract for the book catalog.
///
/// Implementations never fail for business reasons: an unknown genre or
/// id yields an empty vec or `None`, not an error.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// All books, in storage order.
    async fn find_all(&self) -> StorageResult<Vec<Book>>;

    /// Persist a book and return it with its id populated.
    ///
    /// A book without an id gets a fresh strictly increasing positive id.
    /// A book with an id replaces the record carrying that id, or is
    /// appended as-is when no such record exists.
    async fn save(&self, book: Book) -> StorageResult<Book>;

    /// Books whose genre matches case-insensitively; empty if none do.
    async fn find_by_genre(&self, genre: &str) -> StorageResult<Vec<Book>>;

    /// The book with the given id, if any.
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Book>>;
}
