use super::filter::{FilterSelection, ANY};

/// Field selection, non-null requirements and sort order appended to every
/// catalog request.
pub const LIST_SUFFIX: &str = "&selectFields=id&selectFields=name&selectFields=year\
&selectFields=rating&selectFields=poster&selectFields=votes\
&notNullFields=name&notNullFields=poster.url\
&sortField=votes.imdb&sortType=-1";

/// One page of the catalog under a given filter. Doubles as the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogQuery {
    pub page: u32,
    pub page_size: u32,
    pub filter: FilterSelection,
}

impl CatalogQuery {
    pub fn new(page: u32, page_size: u32, filter: FilterSelection) -> Self {
        Self {
            page,
            page_size,
            filter,
        }
    }

    pub fn to_url(&self, base: &str) -> String {
        build_query_url(
            base,
            self.page,
            self.page_size,
            self.filter.genre(),
            self.filter.year_range(),
        )
    }
}

/// Build the upstream movie-list URL. `None` and "any" both leave the
/// dimension unfiltered.
pub fn build_query_url(
    base: &str,
    page: u32,
    page_size: u32,
    genre: Option<&str>,
    year_range: Option<&str>,
) -> String {
    let genre = genre.filter(|g| *g != ANY);
    let year_range = year_range.filter(|y| *y != ANY);

    let mut url = format!(
        "{}/movie?page={}&limit={}",
        base.trim_end_matches('/'),
        page,
        page_size
    );

    match (genre, year_range) {
        (None, None) => {}
        (Some(genre), None) => {
            url.push_str(&genre_param(genre));
        }
        (None, Some(years)) => {
            url.push_str(&year_param(years));
        }
        (Some(genre), Some(years)) => {
            url.push_str(&genre_param(genre));
            url.push_str(&year_param(years));
        }
    }

    url.push_str(LIST_SUFFIX);
    url
}

/// URL of a single movie by upstream id.
pub fn build_movie_url(base: &str, id: i64) -> String {
    format!("{}/movie/{}", base.trim_end_matches('/'), id)
}

fn genre_param(genre: &str) -> String {
    format!("&genres.name={}", urlencoding::encode(genre))
}

fn year_param(years: &str) -> String {
    format!("&year={}", urlencoding::encode(years))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::normalize;

    const BASE: &str = "https://api.example.test/v1.4";

    #[test]
    fn test_unfiltered() {
        let url = build_query_url(BASE, 1, 24, None, None);
        assert_eq!(
            url,
            format!("{}/movie?page=1&limit=24{}", BASE, LIST_SUFFIX)
        );
        assert_eq!(url, build_query_url(BASE, 1, 24, Some("any"), Some("any")));
        assert!(!url.contains("genres.name="));
        assert!(!url.contains("&year="));
    }

    #[test]
    fn test_genre_only() {
        let url = build_query_url(BASE, 2, 24, Some("comedy"), Some("any"));
        assert!(url.contains("page=2&limit=24"));
        assert!(url.contains("&genres.name=comedy"));
        assert!(!url.contains("&year="));
    }

    #[test]
    fn test_year_only() {
        let url = build_query_url(BASE, 1, 24, None, Some("1990-1999"));
        assert!(url.contains("&year=1990-1999"));
        assert!(!url.contains("genres.name="));
    }

    #[test]
    fn test_genre_and_year_order() {
        let url = build_query_url(BASE, 3, 10, Some("drama"), Some("1960-1969"));
        assert_eq!(
            url,
            format!(
                "{}/movie?page=3&limit=10&genres.name=drama&year=1960-1969{}",
                BASE, LIST_SUFFIX
            )
        );
    }

    #[test]
    fn test_filter_values_are_encoded() {
        let url = build_query_url(BASE, 1, 24, Some("film noir"), None);
        assert!(url.contains("&genres.name=film%20noir"));
        let url = build_query_url(BASE, 1, 24, Some("children's"), None);
        assert!(url.contains("&genres.name=children%27s"));
    }

    #[test]
    fn test_suffix_fields() {
        for field in ["id", "name", "year", "rating", "poster", "votes"] {
            assert!(LIST_SUFFIX.contains(&format!("selectFields={}", field)));
        }
        assert!(LIST_SUFFIX.contains("notNullFields=name"));
        assert!(LIST_SUFFIX.contains("notNullFields=poster.url"));
        assert!(LIST_SUFFIX.ends_with("sortField=votes.imdb&sortType=-1"));
    }

    #[test]
    fn test_catalog_query_url() {
        let query = CatalogQuery::new(2, 24, normalize(Some("comedy"), Some("any")));
        assert_eq!(
            query.to_url(&format!("{}/", BASE)),
            build_query_url(BASE, 2, 24, Some("comedy"), None)
        );
    }

    #[test]
    fn test_movie_url() {
        assert_eq!(build_movie_url(BASE, 301), format!("{}/movie/301", BASE));
    }
}
