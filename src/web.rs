use anyhow::{Context, Result};
use axum::{
    Router,
    body::Body,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::get,
};
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::actions;
use crate::db::PgPool;

// App state for sharing database pool
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool, // Diesel pool for reads and writes
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Middleware for request logging with correlation ID
async fn request_logging_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = Uuid::new_v4().simple().to_string()[..8].to_string();
    let start_time = Instant::now();

    info!("Started {} {} [{}]", method, path, request_id);

    let response = next.run(request).await;
    let duration_ms = start_time.elapsed().as_secs_f64() * 1000.0;
    let status = response.status();

    if status.is_server_error() {
        error!(
            "Completed {} {} [{}] {} in {:.2}ms",
            method,
            path,
            request_id,
            status.as_u16(),
            duration_ms
        );
    } else {
        info!(
            "Completed {} {} [{}] {} in {:.2}ms",
            method,
            path,
            request_id,
            status.as_u16(),
            duration_ms
        );
    }

    response
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(actions::index))
        .route("/flights", get(actions::list_flights))
        .route("/delay_flights", get(actions::delay_flights))
        .route("/delete_planet", get(actions::delete_planet))
        .with_state(state)
        .layer(middleware::from_fn(request_logging_middleware))
}

/// Serve until Ctrl+C or SIGTERM, then let in-flight requests finish.
pub async fn start_web_server(interface: String, port: u16, pool: PgPool) -> Result<()> {
    info!("Starting web server on {}:{}", interface, port);

    let app = app(AppState::new(pool));

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", interface, port))
        .await
        .with_context(|| format!("Failed to bind {}:{}", interface, port))?;
    info!("Web server listening on http://{}:{}", interface, port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT signal: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT (Ctrl+C), shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
