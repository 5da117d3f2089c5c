use axum::{
    extract::Request,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenAuthority;
use crate::catalog::CatalogService;
use crate::config::Config;
use crate::handlers;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub auth: Arc<TokenAuthority>,
}

impl AppState {
    pub fn new(config: &Config, catalog: CatalogService) -> Self {
        let auth = TokenAuthority::new(config.auth.admin_tokens.iter().cloned());
        Self {
            catalog: Arc::new(catalog),
            auth: Arc::new(auth),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root_redirect))
        .route(
            "/home-page",
            get(handlers::get_catalog_page).post(handlers::post_catalog_filter),
        )
        .route("/movie/:id", get(handlers::get_movie))
        .route("/robots.txt", get(handlers::robots_txt_handler))
        .fallback(fallback_handler)
        .layer(axum::middleware::from_fn(crate::middleware::log_request))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn fallback_handler(req: Request<axum::body::Body>) -> impl IntoResponse {
    if req.method() == axum::http::Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    StatusCode::NOT_FOUND.into_response()
}
