//! BookService - Catalog Operations
//!
//! Thin pass-throughs over the repository plus the one derived behavior:
//! a uniformly random recommendation drawn from the full catalog or a
//! genre-filtered subset.
//!
//! Sampling goes through a seedable ChaCha8 RNG so tests can pin a seed
//! and get reproducible picks; the default construction seeds from
//! entropy.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::Mutex;

use crate::book::Book;
use crate::storage::{BookRepository, StorageResult};

/// Catalog service over a shared repository.
pub struct BookService {
    repository: Arc<dyn BookRepository>,
    rng: Mutex<ChaCha8Rng>,
}

impl BookService {
    /// Create a service with entropy-seeded sampling.
    #[must_use]
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self {
            repository,
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Create a service with a fixed RNG seed for deterministic sampling.
    #[must_use]
    pub fn with_rng_seed(repository: Arc<dyn BookRepository>, seed: u64) -> Self {
        Self {
            repository,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// All books in the catalog.
    pub async fn get_all_books(&self) -> StorageResult<Vec<Book>> {
        self.repository.find_all().await
    }

    /// Persist a book. Validation lives one layer up, in the API.
    pub async fn add_book(&self, book: Book) -> StorageResult<Book> {
        let saved = self.repository.save(book).await?;

        // Postcondition: storage always hands back an id
        assert!(saved.id.is_some(), "saved book must have an id");

        Ok(saved)
    }

    /// Books matching the genre, case-insensitively.
    pub async fn get_books_by_genre(&self, genre: &str) -> StorageResult<Vec<Book>> {
        self.repository.find_by_genre(genre).await
    }

    /// A uniformly random book, optionally restricted to a genre.
    ///
    /// A missing or blank genre samples from the whole catalog. Returns
    /// `None` iff the candidate pool is empty.
    pub async fn get_recommendation(&self, genre: Option<&str>) -> StorageResult<Option<Book>> {
        let candidates = match genre {
            Some(g) if !g.trim().is_empty() => self.repository.find_by_genre(g).await?,
            _ => self.repository.find_all().await?,
        };

        let mut rng = self.rng.lock().await;
        Ok(candidates.choose(&mut *rng).cloned())
    }
}
