pub mod auth;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod upstream;
pub mod util;

use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;
use tracing::{info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Upstream error: {0}")]
    Upstream(#[from] upstream::UpstreamError),
    #[error("Server error: {0}")]
    Server(String),
}

pub async fn run(config_path: &str, debug_logs: bool) -> Result<(), ServerError> {
    let config = config::Config::from_file(config_path)?;

    info!("Using config file: {}", config_path);
    info!("Upstream API: {}", config.upstream.base_url);
    if debug_logs {
        info!("Debug logging enabled");
    }
    if config.upstream.api_key.is_none() {
        warn!("No upstream API key configured, requests will likely be rejected");
    }

    let upstream = Arc::new(upstream::HttpUpstream::new(&config.upstream)?);
    let mut catalog = catalog::CatalogService::new(
        upstream,
        config.upstream.base_url.clone(),
        config.catalog.page_size,
    );
    if let Some(ttl) = config.cache_ttl() {
        info!("Caching catalog pages for {}s", ttl.as_secs());
        catalog = catalog.with_cache(catalog::QueryCache::new(ttl, config.catalog.cache_size));
    }

    let address = config.listen.address.as_deref().unwrap_or("[::]");
    let port = &config.listen.port;
    let addr: SocketAddr = format!("{}:{}", address, port)
        .parse()
        .map_err(|e| ServerError::Server(format!("Invalid address: {}", e)))?;

    let tls_files = config
        .listen
        .tlscert
        .clone()
        .zip(config.listen.tlskey.clone());

    let state = server::AppState::new(&config, catalog);
    let app = with_path_normalization(server::build_router(state));

    if let Some((cert_path, key_path)) = tls_files {
        info!("Loading TLS certificate from {}", cert_path);
        info!("Loading TLS key from {}", key_path);

        let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(&cert_path, &key_path)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to load TLS config: {}", e)))?;

        info!("Serving HTTPS on {}", addr);

        axum_server::bind_rustls(addr, tls_config)
            .serve(app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    } else {
        info!("Serving HTTP on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Server(format!("Failed to bind: {}", e)))?;

        axum::serve(listener, app.into_make_service())
            .await
            .map_err(|e| ServerError::Server(format!("Server error: {}", e)))?;
    }

    Ok(())
}

/// Path rewriting has to happen before routing, so it wraps the whole router.
pub fn with_path_normalization(router: Router) -> Router {
    let normalized = Layer::layer(&axum::middleware::from_fn(middleware::normalize_path), router);
    Router::new().fallback_service(normalized)
}
