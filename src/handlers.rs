use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use crate::auth::Caller;
use crate::catalog::pagination::CATALOG_PATH;
use crate::catalog::{CatalogError, CatalogPageView, MoviePageView};
use crate::server::AppState;
use crate::upstream::UpstreamError;
use crate::util::{PageParamError, QueryParams};

#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Page(#[from] PageParamError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match &self {
            HandlerError::Page(e) => {
                warn!(error = %e, "Rejected catalog request");
                StatusCode::BAD_REQUEST
            }
            HandlerError::Catalog(CatalogError::Upstream(UpstreamError::Status(404))) => {
                warn!(error = %self, "Upstream has no such item");
                StatusCode::NOT_FOUND
            }
            HandlerError::Catalog(e) => {
                error!(error = %e, "Catalog request failed");
                StatusCode::BAD_GATEWAY
            }
        };

        let body = json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}

pub async fn root_redirect() -> Redirect {
    Redirect::to(CATALOG_PATH)
}

pub async fn get_catalog_page(
    State(state): State<AppState>,
    caller: Caller,
    Query(params): Query<QueryParams>,
) -> Result<Json<CatalogPageView>, HandlerError> {
    let page = params.page()?;

    let view = state
        .catalog
        .assemble(params.get("genre"), params.get("year"), page, &caller)
        .await?;

    Ok(Json(view))
}

#[derive(Debug, Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub genre: String,
    #[serde(default, rename = "yearRange")]
    pub year_range: String,
}

/// Turn the filter form into a bookmarkable catalog URL.
pub async fn post_catalog_filter(Form(form): Form<FilterForm>) -> Redirect {
    let target = format!(
        "{}?genre={}&year={}",
        CATALOG_PATH,
        urlencoding::encode(&form.genre),
        urlencoding::encode(&form.year_range)
    );
    Redirect::to(&target)
}

pub async fn get_movie(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<i64>,
) -> Result<Json<MoviePageView>, HandlerError> {
    let page = state.catalog.movie_detail(id, &caller).await?;
    Ok(Json(page))
}

pub async fn robots_txt_handler() -> &'static str {
    "User-agent: *\nDisallow: /\n"
}
