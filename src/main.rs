//! Biblio server binary.
//!
//! Serves the bookstore catalog over HTTP, backed by the in-memory
//! sample catalog by default or by Postgres when a database URL is
//! given and the `postgres` feature is enabled.

use std::sync::Arc;

use clap::Parser;

use biblio::service::BookService;
use biblio::storage::{BookRepository, MemoryRepository};

// =============================================================================
// Constants
// =============================================================================

/// Default HTTP bind address
pub const HTTP_BIND_ADDRESS_DEFAULT: &str = "127.0.0.1:8080";

/// Application name
pub const APP_NAME: &str = "biblio";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// CLI
// =============================================================================

/// Biblio - bookstore catalog REST service
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Bookstore catalog REST service")]
#[command(version)]
struct Cli {
    /// HTTP bind address
    #[arg(short, long, default_value = HTTP_BIND_ADDRESS_DEFAULT)]
    bind: String,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Postgres connection URL (falls back to DATABASE_URL); in-memory
    /// catalog when absent
    #[arg(long)]
    database_url: Option<String>,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .init();

    tracing::info!("Biblio v{}", APP_VERSION);

    let database_url = cli
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok());

    let repository = build_repository(database_url.as_deref()).await?;
    let service = Arc::new(BookService::new(repository));

    let addr: std::net::SocketAddr = cli.bind.parse()?;
    let app = biblio::api::router(service);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Pick the storage backend from the (optional) database URL.
#[cfg(feature = "postgres")]
async fn build_repository(
    database_url: Option<&str>,
) -> anyhow::Result<Arc<dyn BookRepository>> {
    match database_url {
        Some(url) => {
            tracing::info!("Using Postgres catalog");
            let repo = biblio::storage::PostgresRepository::new(url).await?;
            Ok(Arc::new(repo))
        }
        None => {
            tracing::info!("Using in-memory sample catalog");
            Ok(Arc::new(MemoryRepository::with_sample_catalog()))
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn build_repository(
    database_url: Option<&str>,
) -> anyhow::Result<Arc<dyn BookRepository>> {
    if database_url.is_some() {
        anyhow::bail!("database URL given but the postgres feature is not enabled");
    }
    tracing::info!("Using in-memory sample catalog");
    Ok(Arc::new(MemoryRepository::with_sample_catalog()))
}
