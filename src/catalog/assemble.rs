use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use super::cache::QueryCache;
use super::detail::{parse_movie_detail, MoviePageView};
use super::filter::{normalize, year_ranges, GENRES};
use super::pagination::{compute_pagination, PaginationInfo};
use super::parse::{parse_response, MovieSummary, ParseError, UpstreamResponse};
use super::query::{build_movie_url, CatalogQuery};
use crate::auth::{role_name, Privilege};
use crate::upstream::{UpstreamClient, UpstreamError};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Everything the renderer needs for one catalog page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPageView {
    pub selected_genre: String,
    pub selected_year_range: String,
    pub genres: Vec<&'static str>,
    pub year_ranges: Vec<String>,
    pub movies: Vec<MovieSummary>,
    pub pagination: PaginationInfo,
    pub user_role: &'static str,
}

pub struct CatalogService {
    upstream: Arc<dyn UpstreamClient>,
    base_url: String,
    page_size: u32,
    cache: Option<QueryCache>,
}

impl CatalogService {
    pub fn new(upstream: Arc<dyn UpstreamClient>, base_url: impl Into<String>, page_size: u32) -> Self {
        Self {
            upstream,
            base_url: base_url.into(),
            page_size,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: QueryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Build the view for one catalog page. Any upstream or parse failure
    /// fails the whole page.
    pub async fn assemble(
        &self,
        raw_genre: Option<&str>,
        raw_year_range: Option<&str>,
        page: u32,
        caller: &dyn Privilege,
    ) -> Result<CatalogPageView, CatalogError> {
        let filter = normalize(raw_genre, raw_year_range);
        let query = CatalogQuery::new(page, self.page_size, filter);

        let response = self.load(&query).await?;
        let pagination = compute_pagination(response.total_count, self.page_size, page, &query.filter);

        info!(
            genre = %query.filter.genre,
            year = %query.filter.year_range,
            page = page,
            total = response.total_count,
            movies = response.records.len(),
            "Catalog page assembled"
        );

        let CatalogQuery { filter, .. } = query;
        Ok(CatalogPageView {
            selected_genre: filter.genre,
            selected_year_range: filter.year_range,
            genres: GENRES.to_vec(),
            year_ranges: year_ranges(),
            movies: response.records,
            pagination,
            user_role: role_name(caller.is_admin()),
        })
    }

    async fn load(&self, query: &CatalogQuery) -> Result<UpstreamResponse, CatalogError> {
        if let Some(ref cache) = self.cache {
            if let Some(hit) = cache.get(query).await {
                debug!(page = query.page, "Catalog cache hit");
                return Ok(hit);
            }
        }

        let url = query.to_url(&self.base_url);
        let doc = self.upstream.fetch(&url).await?;
        let response = parse_response(&doc)?;

        if let Some(ref cache) = self.cache {
            cache.insert(query.clone(), response.clone()).await;
        }
        Ok(response)
    }

    /// Look up a single movie by upstream id.
    pub async fn movie_detail(
        &self,
        id: i64,
        caller: &dyn Privilege,
    ) -> Result<MoviePageView, CatalogError> {
        let doc = self.upstream.fetch(&build_movie_url(&self.base_url, id)).await?;
        Ok(MoviePageView {
            movie: parse_movie_detail(&doc)?,
            user_role: role_name(caller.is_admin()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Serves a fixed document and records every requested URL.
    struct FakeUpstream {
        doc: Option<Value>,
        calls: AtomicUsize,
        urls: Mutex<Vec<String>>,
    }

    impl FakeUpstream {
        fn serving(doc: Value) -> Arc<Self> {
            Arc::new(Self {
                doc: Some(doc),
                calls: AtomicUsize::new(0),
                urls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                doc: None,
                calls: AtomicUsize::new(0),
                urls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl UpstreamClient for FakeUpstream {
        async fn fetch(&self, url: &str) -> Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.urls.lock().unwrap().push(url.to_string());
            self.doc.clone().ok_or(UpstreamError::Status(503))
        }
    }

    const BASE: &str = "https://api.example.test/v1.4";

    fn hundred_movies() -> Value {
        json!({
            "docs": [
                { "id": 1, "name": "First", "year": 2001, "poster": { "url": "p1" } },
                { "id": 2, "name": "Second", "year": 2002, "poster": { "url": "p2" } }
            ],
            "total": 100,
            "limit": 24,
            "page": 2,
            "pages": 5
        })
    }

    #[tokio::test]
    async fn test_assemble_genre_page_two() {
        let upstream = FakeUpstream::serving(hundred_movies());
        let service = CatalogService::new(upstream.clone(), BASE, 24);

        let view = service.assemble(Some("comedy"), Some("any"), 2, &false).await.unwrap();

        let urls = upstream.urls.lock().unwrap().clone();
        assert_eq!(urls.len(), 1);
        assert!(urls[0].contains("page=2&limit=24"));
        assert!(urls[0].contains("genres.name=comedy"));
        assert!(!urls[0].contains("&year="));

        assert_eq!(view.selected_genre, "comedy");
        assert_eq!(view.selected_year_range, "any");
        assert_eq!(view.movies.len(), 2);
        assert_eq!(view.pagination.current_page, 2);
        assert_eq!(view.pagination.base_url, "/home-page?genre=comedy&page=");
        assert_eq!(view.user_role, "guest");
    }

    #[tokio::test]
    async fn test_total_pages_truncates_hundred_by_24() {
        let service = CatalogService::new(FakeUpstream::serving(hundred_movies()), BASE, 24);
        let view = service.assemble(None, None, 1, &true).await.unwrap();
        // upstream itself reports 5 pages; truncation yields 4
        assert_eq!(view.pagination.total_pages, 4);
        assert_eq!(view.pagination.total_items, 100);
        assert_eq!(view.pagination.base_url, "/home-page?page=");
        assert_eq!(view.user_role, "admin");
        assert_eq!(view.genres.len(), GENRES.len());
        assert_eq!(view.year_ranges.len(), 8);
    }

    #[tokio::test]
    async fn test_upstream_error_propagates() {
        let upstream = FakeUpstream::failing();
        let service = CatalogService::new(upstream.clone(), BASE, 24);
        let result = service.assemble(None, None, 1, &false).await;
        assert!(matches!(result, Err(CatalogError::Upstream(UpstreamError::Status(503)))));
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_parse_error_propagates() {
        let service = CatalogService::new(FakeUpstream::serving(json!({ "docs": [] })), BASE, 24);
        let result = service.assemble(None, None, 1, &false).await;
        assert!(matches!(result, Err(CatalogError::Parse(ParseError::MissingField("total")))));
    }

    #[tokio::test]
    async fn test_cache_keyed_by_query() {
        let upstream = FakeUpstream::serving(hundred_movies());
        let service = CatalogService::new(upstream.clone(), BASE, 24)
            .with_cache(QueryCache::new(Duration::from_secs(60), 16));

        service.assemble(Some("drama"), None, 1, &false).await.unwrap();
        service.assemble(Some("drama"), Some(""), 1, &false).await.unwrap();
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 1);

        service.assemble(Some("drama"), None, 2, &false).await.unwrap();
        service.assemble(Some("war"), None, 1, &false).await.unwrap();
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_without_cache_every_request_fetches() {
        let upstream = FakeUpstream::serving(hundred_movies());
        let service = CatalogService::new(upstream.clone(), BASE, 24);
        service.assemble(None, None, 1, &false).await.unwrap();
        service.assemble(None, None, 1, &false).await.unwrap();
        assert_eq!(upstream.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_movie_detail() {
        let upstream = FakeUpstream::serving(json!({
            "id": 301,
            "name": "The Matrix",
            "description": "A hacker learns the truth.",
            "year": 1999,
            "rating": { "imdb": 8.7 },
            "poster": { "url": "poster.jpg" },
            "backdrop": { "url": "backdrop.jpg" },
            "genres": [{ "name": "action" }, { "name": "sci-fi" }]
        }));
        let service = CatalogService::new(upstream.clone(), BASE, 24);
        let page = service.movie_detail(301, &true).await.unwrap();
        assert_eq!(page.movie.title, "The Matrix");
        assert_eq!(page.user_role, "admin");
        assert_eq!(upstream.urls.lock().unwrap()[0], format!("{}/movie/301", BASE));
    }
}
