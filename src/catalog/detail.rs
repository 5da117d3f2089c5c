use serde::Serialize;
use serde_json::Value;

use super::parse::{image_url, rating_of, title_of, year_of, ParseError};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    pub genres: Vec<String>,
}

/// A movie page: the detail record plus the caller's role.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePageView {
    #[serde(flatten)]
    pub movie: MovieDetail,
    pub user_role: &'static str,
}

pub fn parse_movie_detail(doc: &Value) -> Result<MovieDetail, ParseError> {
    let id = doc
        .get("id")
        .ok_or(ParseError::MissingField("id"))?
        .as_i64()
        .ok_or(ParseError::InvalidField("id"))?;
    let title = title_of(doc).ok_or(ParseError::MissingField("name"))?;

    let description = ["description", "shortDescription"]
        .iter()
        .filter_map(|key| doc.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(|s| s.to_string());

    let genres = doc
        .get("genres")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|g| g.get("name").and_then(Value::as_str))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();

    Ok(MovieDetail {
        id,
        title,
        description,
        year: year_of(doc),
        rating: rating_of(doc),
        poster_url: image_url(doc, "poster"),
        backdrop_url: image_url(doc, "backdrop"),
        genres,
    })
}
