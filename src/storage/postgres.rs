//! PostgresRepository - Relational Catalog
//!
//! TigerStyle: Real database storage behind the same repository contract.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS books (
//!     id BIGSERIAL PRIMARY KEY,
//!     title TEXT NOT NULL,
//!     author TEXT NOT NULL,
//!     genre TEXT NOT NULL,
//!     isbn TEXT,
//!     published_year INT
//! );
//! ```
//!
//! Transactional integrity is delegated to Postgres; this layer only
//! maps rows and upserts by id.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::book::Book;

use super::error::{StorageError, StorageResult};
use super::repository::BookRepository;

/// Maximum connections in the pool.
pub const PG_POOL_CONNECTIONS_MAX: u32 = 10;

/// PostgreSQL book repository.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Connect and initialize the schema.
    ///
    /// # Errors
    /// Returns error if the connection fails or the schema cannot be
    /// created.
    pub async fn new(connection_string: &str) -> StorageResult<Self> {
        // Preconditions
        assert!(
            !connection_string.is_empty(),
            "connection string cannot be empty"
        );
        assert!(
            connection_string.starts_with("postgres://")
                || connection_string.starts_with("postgresql://"),
            "connection string must be a postgres URL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_CONNECTIONS_MAX)
            .connect(connection_string)
            .await
            .map_err(|e| StorageError::connection(format!("failed to connect: {e}")))?;

        let repo = Self { pool };
        repo.init_schema().await?;

        Ok(repo)
    }

    /// Create from an existing pool.
    pub async fn from_pool(pool: PgPool) -> StorageResult<Self> {
        let repo = Self { pool };
        repo.init_schema().await?;
        Ok(repo)
    }

    /// Initialize the books table and genre index.
    async fn init_schema(&self) -> StorageResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS books (
                id BIGSERIAL PRIMARY KEY,
                title TEXT NOT NULL,
                author TEXT NOT NULL,
                genre TEXT NOT NULL,
                isbn TEXT,
                published_year INT
            );
            CREATE INDEX IF NOT EXISTS idx_books_genre ON books (LOWER(genre));
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::internal(format!("failed to create schema: {e}")))?;

        Ok(())
    }

    /// Get the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Parse a database row into a Book.
fn row_to_book(row: &PgRow) -> StorageResult<Book> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| StorageError::internal(e.to_string()))?;

    let title: String = row
        .try_get("title")
        .map_err(|e| StorageError::internal(e.to_string()))?;

    let author: String = row
        .try_get("author")
        .map_err(|e| StorageError::internal(e.to_string()))?;

    let genre: String = row
        .try_get("genre")
        .map_err(|e| StorageError::internal(e.to_string()))?;

    let isbn: Option<String> = row
        .try_get("isbn")
        .map_err(|e| StorageError::internal(e.to_string()))?;

    let published_year: Option<i32> = row
        .try_get("published_year")
        .map_err(|e| StorageError::internal(e.to_string()))?;

    Ok(Book {
        id: Some(id),
        title,
        author,
        genre,
        isbn,
        published_year,
    })
}

#[async_trait]
impl BookRepository for PostgresRepository {
    async fn find_all(&self) -> StorageResult<Vec<Book>> {
        let rows = sqlx::query("SELECT * FROM books ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::read(format!("failed to list books: {e}")))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in &rows {
            books.push(row_to_book(row)?);
        }

        Ok(books)
    }

    async fn save(&self, book: Book) -> StorageResult<Book> {
        match book.id {
            None => {
                let id: i64 = sqlx::query_scalar(
                    r#"
                    INSERT INTO books (title, author, genre, isbn, published_year)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                    "#,
                )
                .bind(&book.title)
                .bind(&book.author)
                .bind(&book.genre)
                .bind(&book.isbn)
                .bind(book.published_year)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| StorageError::write(format!("failed to insert book: {e}")))?;

                // Postcondition: ids are positive
                assert!(id > 0, "assigned id must be positive, got {id}");

                Ok(book.with_id(id))
            }
            Some(id) => {
                // Upsert by id: replace the record or append as-is.
                sqlx::query(
                    r#"
                    INSERT INTO books (id, title, author, genre, isbn, published_year)
                    VALUES ($1, $2, $3, $4, $5, $6)
                    ON CONFLICT (id) DO UPDATE SET
                        title = EXCLUDED.title,
                        author = EXCLUDED.author,
                        genre = EXCLUDED.genre,
                        isbn = EXCLUDED.isbn,
                        published_year = EXCLUDED.published_year
                    "#,
                )
                .bind(id)
                .bind(&book.title)
                .bind(&book.author)
                .bind(&book.genre)
                .bind(&book.isbn)
                .bind(book.published_year)
                .execute(&self.pool)
                .await
                .map_err(|e| StorageError::write(format!("failed to upsert book: {e}")))?;

                Ok(book)
            }
        }
    }

    async fn find_by_genre(&self, genre: &str) -> StorageResult<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM books
            WHERE LOWER(genre) = LOWER($1)
            ORDER BY id
            "#,
        )
        .bind(genre)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::read(format!("failed to filter by genre: {e}")))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in &rows {
            books.push(row_to_book(row)?);
        }

        Ok(books)
    }

    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Book>> {
        let row = sqlx::query("SELECT * FROM books WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StorageError::read(format!("failed to get book: {e}")))?;

        match row {
            Some(row) => {
                let book = row_to_book(&row)?;
                // Postcondition
                assert_eq!(book.id, Some(id), "returned book must match requested id");
                Ok(Some(book))
            }
            None => Ok(None),
        }
    }
}

// =============================================================================
// Tests (require running Postgres)
// =============================================================================
