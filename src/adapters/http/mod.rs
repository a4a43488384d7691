//! REST API over the booking services.
//!
//! Resource routes live under `/api/airport/`, account routes under
//! `/api/user/`. Uploaded files are served from `/media/`.

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod pagination;

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;

use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::domain::models::{PaginationConfig, ServerConfig};
use crate::services::Services;

pub use error::{ApiError, ApiResult, ErrorResponse};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub pagination: PaginationConfig,
}

pub struct ApiServer {
    config: ServerConfig,
    state: AppState,
    media_root: PathBuf,
    max_image_bytes: u64,
}

impl ApiServer {
    pub fn new(
        config: ServerConfig,
        state: AppState,
        media_root: impl Into<PathBuf>,
        max_image_bytes: u64,
    ) -> Self {
        Self {
            config,
            state,
            media_root: media_root.into(),
            max_image_bytes,
        }
    }

    /// Build the router with every route and layer attached.
    pub fn build_router(&self) -> Router {
        let app = Router::new()
            .merge(handlers::fleet::routes(self.max_image_bytes))
            .merge(handlers::network::routes())
            .merge(handlers::crew::routes())
            .merge(handlers::flights::routes())
            .merge(handlers::orders::routes())
            .merge(handlers::users::routes())
            .route("/health", get(health_check))
            .nest_service("/media", ServeDir::new(&self.media_root))
            .with_state(self.state.clone());

        if self.config.enable_cors {
            app.layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
                .layer(TraceLayer::new_for_http())
        } else {
            app.layer(TraceLayer::new_for_http())
        }
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let local: SocketAddr = listener.local_addr()?;
        let router = self.build_router();

        tracing::info!(%local, "airport API listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

async fn health_check() -> &'static str {
    "OK"
}
