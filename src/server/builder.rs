//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::AppState;
use super::router::{build_health_routes, build_label_routes, build_report_routes};
use crate::core::{ConfigError, OrderStore};
use crate::labels::LabelStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the dashboard HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_order_store(InMemoryOrderStore::new())
///     .with_label_store(InMemoryLabelStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    order_store: Option<Arc<dyn OrderStore>>,
    label_store: Option<Arc<dyn LabelStore>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            order_store: None,
            label_store: None,
            custom_routes: Vec::new(),
        }
    }

    /// Set the order store (required)
    pub fn with_order_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.order_store = Some(Arc::new(store));
        self
    }

    /// Set the label store (required)
    pub fn with_label_store(mut self, store: impl LabelStore + 'static) -> Self {
        self.label_store = Some(Arc::new(store));
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::get};
    ///
    /// let extra = Router::new().route("/version", get(|| async { "1.0" }));
    ///
    /// ServerBuilder::new()
    ///     .with_order_store(orders)
    ///     .with_label_store(labels)
    ///     .with_custom_routes(extra)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_state(&mut self) -> Result<AppState> {
        let orders = self
            .order_store
            .take()
            .ok_or_else(|| missing("OrderStore is required. Call .with_order_store()"))?;
        let labels = self
            .label_store
            .take()
            .ok_or_else(|| missing("LabelStore is required. Call .with_label_store()"))?;

        Ok(AppState { orders, labels })
    }

    /// Build the final router
    ///
    /// This generates:
    /// - Liveness and health routes
    /// - Report routes (orders, customers, dashboard)
    /// - Label routes
    /// - Custom routes
    ///
    /// Every route is wrapped in request tracing and a permissive CORS policy.
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = build_health_routes()
            .merge(build_report_routes(state.clone()))
            .merge(build_label_routes(state));

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_order_store(orders)
    ///     .with_label_store(labels)
    ///     .serve("0.0.0.0:4000").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(component: &str) -> anyhow::Error {
    ConfigError::MissingComponent {
        component: component.to_string(),
    }
    .into()
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
