//! HTTP API - Router and Handlers
//!
//! Route map:
//! - `GET  /health`                        → 200 `{"status":"ok"}`
//! - `GET  /books[?genre=X]`               → 200 array of books
//! - `POST /books`                         → 201 saved book, 400 on blank field
//! - `GET  /books/recommendation[?genre=X]`→ 200 one book, 404 when none
//!
//! Handlers are stateless; the shared `BookService` arrives via `State`.
//! Validation (non-blank title/author/genre) lives here, not in storage.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::book::Book;
use crate::service::BookService;
use crate::storage::StorageError;

/// Shared application state.
pub type SharedService = Arc<BookService>;

/// Build the application router.
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/books", get(list_books).post(create_book))
        .route("/books/recommendation", get(recommend))
        .with_state(service)
}

// =============================================================================
// Errors
// =============================================================================

/// API-level errors mapped to status codes.
///
/// Per the error design there are two business kinds only: validation
/// failure (400, no body detail) and no recommendation candidates (404).
/// Storage failures surface as 500.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Blank required field on create
    #[error("blank required field")]
    Validation,

    /// No recommendation candidates for the requested genre
    #[error("no recommendation candidates")]
    NoRecommendation,

    /// Backend failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::NoRecommendation => StatusCode::NOT_FOUND,
            Self::Storage(e) => {
                tracing::error!("storage failure: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        status.into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Optional genre filter, shared by the list and recommendation routes.
#[derive(Debug, Deserialize)]
struct GenreQuery {
    genre: Option<String>,
}

impl GenreQuery {
    /// The genre, if present and non-blank.
    fn genre(&self) -> Option<&str> {
        self.genre.as_deref().filter(|g| !g.trim().is_empty())
    }
}

async fn list_books(
    State(service): State<SharedService>,
    Query(query): Query<GenreQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = match query.genre() {
        Some(genre) => service.get_books_by_genre(genre).await?,
        None => service.get_all_books().await?,
    };
    Ok(Json(books))
}

async fn create_book(
    State(service): State<SharedService>,
    payload: Result<Json<Book>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    // Malformed or non-conforming JSON is a plain 400, same as a blank
    // field.
    let Json(book) = payload.map_err(|_| ApiError::Validation)?;

    if book.has_blank_required_field() {
        return Err(ApiError::Validation);
    }

    let saved = service.add_book(book).await?;
    tracing::info!(id = saved.id, title = %saved.title, "book added");

    Ok((StatusCode::CREATED, Json(saved)))
}

async fn recommend(
    State(service): State<SharedService>,
    Query(query): Query<GenreQuery>,
) -> Result<Json<Book>, ApiError> {
    match service.get_recommendation(query.genre()).await? {
        Some(book) => Ok(Json(book)),
        None => Err(ApiError::NoRecommendation),
    }
}

// =============================================================================
// Tests
// =============================================================================
