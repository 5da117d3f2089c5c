use serde::Serialize;

use super::filter::FilterSelection;

/// Path of the catalog page; navigation links are built against it.
pub const CATALOG_PATH: &str = "/home-page";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub total_pages: u64,
    pub page_size: u32,
    pub total_items: u64,
    /// Navigation link with the active filters, ending in `page=`.
    pub base_url: String,
}

/// Derive pagination metadata for one catalog page.
///
/// `total_pages` uses truncating division, so a trailing partial page is
/// not counted (100 items at 24 per page gives 4 pages, not 5).
/// `requested_page` is reported as-is even when it lies past `total_pages`.
pub fn compute_pagination(
    total_items: u64,
    page_size: u32,
    requested_page: u32,
    filter: &FilterSelection,
) -> PaginationInfo {
    debug_assert!(page_size > 0);

    PaginationInfo {
        current_page: requested_page,
        total_pages: total_items / u64::from(page_size),
        page_size,
        total_items,
        base_url: build_base_url(filter),
    }
}

/// `/home-page?` followed by the non-"any" filters, genre then year, and a
/// trailing `page=` for the caller to complete.
pub fn build_base_url(filter: &FilterSelection) -> String {
    let mut url = format!("{}?", CATALOG_PATH);
    if let Some(genre) = filter.genre() {
        url.push_str(&format!("genre={}&", urlencoding::encode(genre)));
    }
    if let Some(years) = filter.year_range() {
        url.push_str(&format!("year={}&", urlencoding::encode(years)));
    }
    url.push_str("page=");
    url
}
