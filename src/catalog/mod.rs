pub mod assemble;
pub mod cache;
pub mod detail;
pub mod filter;
pub mod pagination;
pub mod parse;
pub mod query;

pub use assemble::{CatalogError, CatalogPageView, CatalogService};
pub use cache::QueryCache;
pub use detail::{MovieDetail, MoviePageView};
pub use filter::{normalize, FilterSelection, ANY};
pub use pagination::{compute_pagination, PaginationInfo};
pub use parse::{MovieSummary, ParseError, UpstreamResponse};
pub use query::{build_query_url, CatalogQuery};

/// Movies per catalog page.
pub const PAGE_SIZE: u32 = 24;
