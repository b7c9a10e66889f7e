//! Biblio - Bookstore Catalog REST Service
//!
//! A small catalog service: list books, add a book, filter by genre, and
//! fetch a random recommendation. Backed by an in-memory catalog or,
//! with the `postgres` feature, a PostgreSQL table.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  Biblio                      │
//! ├─────────────────────────────────────────────┤
//! │  api        │ axum router, status mapping   │
//! │  service    │ pass-throughs + sampling      │
//! │  storage    │ BookRepository trait          │
//! │             │ memory / postgres backends    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Control flow: request → service → storage → service → response. Every
//! request is independent; the only shared state is the catalog itself.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api;
pub mod book;
pub mod service;
pub mod storage;

pub use book::Book;
pub use service::BookService;
pub use storage::{BookRepository, MemoryRepository, StorageError, StorageResult};

#[cfg(feature = "postgres")]
pub use storage::PostgresRepository;
