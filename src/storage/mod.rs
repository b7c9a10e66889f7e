//! Storage - Repository Trait and Implementations
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    BookRepository Trait                      │
//! └─────────────────────────────────────────────────────────────┘
//!          ↑                              ↑
//!          │                              │
//! ┌────────┴────────┐           ┌────────┴────────┐
//! │MemoryRepository │           │PostgresRepository│
//! │  (default)      │           │ (feature flag)   │
//! └─────────────────┘           └─────────────────┘
//! ```

mod error;
mod memory;
mod repository;

#[cfg(feature = "postgres")]
mod postgres;

pub use error::{StorageError, StorageResult};
pub use memory::{MemoryRepository, BOOK_ID_FIRST};
pub use repository::BookRepository;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRepository;
