use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::api::{self, AppState};
use crate::config::{ServerConfig, YatraConfig};

/// Full application: API under `/api`, front-end assets as fallback
pub fn app(config: &ServerConfig, state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = usize::try_from(config.max_body_kb).unwrap_or(usize::MAX / 1024) * 1024;

    Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_seconds.into()),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run(config: &YatraConfig, state: AppState) -> Result<()> {
    let app = app(&config.server, state);
    let addr = config.bind_address();

    match (&config.server.tls_cert_path, &config.server.tls_key_path) {
        #[cfg(feature = "tls")]
        (Some(cert), Some(key)) => serve_tls(app, &addr, cert, key).await,
        #[cfg(not(feature = "tls"))]
        (Some(_), Some(_)) => {
            anyhow::bail!("TLS is configured but this build does not include the `tls` feature")
        }
        _ => serve_plain(app, &addr).await,
    }
}

async fn serve_plain(app: Router, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server failed")
}

#[cfg(feature = "tls")]
async fn serve_tls(app: Router, addr: &str, cert: &str, key: &str) -> Result<()> {
    use axum_server::tls_rustls::RustlsConfig;

    let socket: std::net::SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid bind address {addr}"))?;
    let tls = RustlsConfig::from_pem_file(cert, key)
        .await
        .with_context(|| format!("Failed to load TLS certificate {cert} and key {key}"))?;

    let handle = axum_server::Handle::new();
    let shutdown = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    tracing::info!("Web server running at https://{}", addr);
    axum_server::bind_rustls(socket, tls)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .context("Web server failed")
}
