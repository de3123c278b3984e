//! HTTP server for the Folio site.
//!
//! Serves the splash pages, markdown articles rendered into the shared page
//! template, and every other asset in the content store byte-for-byte.
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     run_server(ServerConfig::default()).await.unwrap();
//! }
//! ```
//!
//! # Routing
//!
//! ```text
//! GET /                   ─► splash page
//! GET /articles/          ─► splash page
//! GET /articles/{slug}    ─► articles/{slug}.md rendered into the template
//!                            (*.png slugs are served as assets)
//! GET anything else       ─► asset layer (markdown rendered unless ?raw=true)
//!                            └─► 404 page when the store has nothing
//! ```
//!
//! With `html_rewrite` set, extensionless paths get `.html` appended before
//! routing, matching the CDN edge in front of the published bucket.

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use folio_renderer::RenderConfig;
use folio_site::{DEFAULT_TEMPLATE, PageRenderer};
use folio_storage::{FsStorage, Storage};
use state::AppState;

pub use error::ServerError;
pub use state::SiteSettings;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Content store root.
    pub content_dir: PathBuf,
    /// Page template resource inside the content store.
    pub template: String,
    /// Append `.html` to extensionless request paths.
    pub html_rewrite: bool,
    /// Site identity for the splash and 404 pages.
    pub site: SiteSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7980,
            content_dir: PathBuf::from("bucket"),
            template: DEFAULT_TEMPLATE.to_owned(),
            html_rewrite: false,
            site: SiteSettings {
                title: "jackbliss.co.uk".to_owned(),
                heading: "Jack Bliss".to_owned(),
                styles: "/bundles/splash.css".to_owned(),
            },
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.content_dir.clone()));
    let pages = PageRenderer::new(storage, Arc::new(RenderConfig::new()))
        .with_template(config.template.clone());

    let state = Arc::new(AppState::new(pages, &config.site, config.html_rewrite));
    let app = app::create_app(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        content_dir = %config.content_dir.display(),
        html_rewrite = config.html_rewrite,
        "Starting server"
    );

    axum::serve(
        listener,
        axum::ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Folio config.
#[must_use]
pub fn server_config_from_folio_config(config: &folio_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        content_dir: config.content_resolved.dir.clone(),
        template: config.content_resolved.template.clone(),
        html_rewrite: config.server.html_rewrite,
        site: SiteSettings {
            title: config.site.title.clone(),
            heading: config.site.heading.clone(),
            styles: config.site.styles.clone(),
        },
    }
}
