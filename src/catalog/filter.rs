/// Sentinel meaning "no constraint" for either filter dimension.
pub const ANY: &str = "any";

pub const GENRES: &[&str] = &[
    "any", "action", "adventure", "adult", "anime", "biography", "cartoon", "ceremony",
    "children's", "comedy", "concert", "crime", "detective", "documentary", "drama", "family",
    "fantasy", "film noir", "game", "history", "horror", "melodrama", "music", "musical", "news",
    "reality TV", "short film", "sport", "talk show", "thriller", "war", "western",
];

const FIRST_DECADE: u32 = 1960;
const LAST_DECADE: u32 = 2020;

/// Year-range buckets offered to the user: "any" followed by each decade.
pub fn year_ranges() -> Vec<String> {
    let mut ranges = vec![ANY.to_string()];
    ranges.extend(
        (FIRST_DECADE..=LAST_DECADE)
            .step_by(10)
            .map(|start| format!("{}-{}", start, start + 9)),
    );
    ranges
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterSelection {
    pub genre: String,
    pub year_range: String,
}

impl FilterSelection {
    pub fn genre(&self) -> Option<&str> {
        active(&self.genre)
    }

    pub fn year_range(&self) -> Option<&str> {
        active(&self.year_range)
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            genre: ANY.to_string(),
            year_range: ANY.to_string(),
        }
    }
}

fn active(value: &str) -> Option<&str> {
    if value == ANY {
        None
    } else {
        Some(value)
    }
}

/// Default missing or empty filter values to "any". Anything else is kept
/// verbatim, even values outside GENRES or year_ranges().
pub fn normalize(raw_genre: Option<&str>, raw_year_range: Option<&str>) -> FilterSelection {
    FilterSelection {
        genre: or_any(raw_genre),
        year_range: or_any(raw_year_range),
    }
}

fn or_any(raw: Option<&str>) -> String {
    match raw {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => ANY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_empty_become_any() {
        assert_eq!(normalize(None, None), FilterSelection::default());
        assert_eq!(normalize(Some(""), Some("")), FilterSelection::default());
        let f = normalize(Some(""), Some("1990-1999"));
        assert_eq!(f.genre, "any");
        assert_eq!(f.year_range, "1990-1999");
    }

    #[test]
    fn test_values_pass_through() {
        let f = normalize(Some("comedy"), None);
        assert_eq!(f.genre, "comedy");
        assert_eq!(f.year_range, "any");

        // not in the genre table, still forwarded
        let f = normalize(Some("space opera"), Some("1800-1801"));
        assert_eq!(f.genre, "space opera");
        assert_eq!(f.year_range, "1800-1801");

        let f = normalize(Some(" "), None);
        assert_eq!(f.genre, " ");
    }

    #[test]
    fn test_active_filters() {
        let f = normalize(Some("drama"), Some("any"));
        assert_eq!(f.genre(), Some("drama"));
        assert_eq!(f.year_range(), None);
    }

    #[test]
    fn test_year_ranges() {
        let ranges = year_ranges();
        assert_eq!(ranges.len(), 8);
        assert_eq!(ranges[0], "any");
        assert_eq!(ranges[1], "1960-1969");
        assert_eq!(ranges[7], "2020-2029");
    }

    #[test]
    fn test_genre_table() {
        assert_eq!(GENRES[0], ANY);
        assert!(GENRES.contains(&"comedy"));
        assert!(GENRES.contains(&"film noir"));
    }
}
