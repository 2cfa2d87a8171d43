#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod auth;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use aria_config::Config;
use tower_http::trace::TraceLayer;

pub use health::SERVICE_NAME;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the speech pipeline cannot be initialized
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let speech_state = speech::build_server(&config)?;

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Audio routes
        app = app.merge(speech::endpoint_router().with_state(speech_state));

        // Apply middleware layers (innermost first)

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // API key authentication
        if let Some(ref auth_config) = config.auth
            && auth_config.enabled
        {
            let gate = Arc::new(auth::AuthGate::new(auth_config));
            app = app.layer(axum::middleware::from_fn(move |req, next| {
                let gate = Arc::clone(&gate);
                async move { auth::auth_middleware(gate, req, next).await }
            }));
        }

        Ok(Self {
            router: app,
            listen_address,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
