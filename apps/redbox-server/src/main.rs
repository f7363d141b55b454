//! redbox server
//!
//! Accepts a PDF upload together with a rectangle given in top-left-origin
//! page coordinates, outlines that rectangle in red on the first page and
//! sends the modified document back as a download.
//!
//! ## Endpoints
//!
//! - `GET /health`
//! - `POST /upload` (multipart: `file`, `x`, `y`, `width`, `height`)
//!
//! Cross-origin requests are accepted from anywhere so browser-based PDF
//! viewers on other hosts can post to it directly.

use std::net::SocketAddr;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod api;
mod error;

use api::{handle_health, handle_upload};

/// Command-line arguments for the redbox server
#[derive(Parser, Debug)]
#[command(name = "redbox-server")]
#[command(about = "Outline a rectangle on the first page of an uploaded PDF")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5000")]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Largest accepted request body, in MiB
    #[arg(long, default_value = "50")]
    max_upload_mb: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Build the application router with all routes and middleware
pub fn build_router(max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handle_health))
        .route("/upload", post(handle_upload))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let max_upload_bytes = args.max_upload_mb * 1024 * 1024;
    let app = build_router(max_upload_bytes);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("Upload limit: {} MiB", args.max_upload_mb);

    axum::serve(listener, app).await?;

    Ok(())
}
