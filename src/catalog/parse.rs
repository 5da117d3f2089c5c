use serde::Serialize;
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_count: Option<u64>,
}

impl MovieSummary {
    /// Project one upstream record. Returns None when the record has no
    /// usable id or title; optional fields of the wrong type are dropped.
    pub fn from_record(record: &Value) -> Option<Self> {
        let obj = record.as_object()?;
        let id = obj.get("id")?.as_i64()?;
        let title = title_of(record)?;

        Some(Self {
            id,
            title,
            year: year_of(record),
            rating: rating_of(record),
            poster_url: image_url(record, "poster"),
            vote_count: votes_of(record),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub total_count: u64,
    pub records: Vec<MovieSummary>,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Missing field in upstream response: {0}")]
    MissingField(&'static str),
    #[error("Invalid field in upstream response: {0}")]
    InvalidField(&'static str),
}

pub const TOTAL_FIELD: &str = "total";
pub const RECORDS_FIELD: &str = "docs";

/// Number of movies matching the query across all pages.
pub fn parse_total_count(doc: &Value) -> Result<u64, ParseError> {
    doc.get(TOTAL_FIELD)
        .ok_or(ParseError::MissingField(TOTAL_FIELD))?
        .as_u64()
        .ok_or(ParseError::InvalidField(TOTAL_FIELD))
}

/// Movie records of the current page, in upstream order. Malformed records
/// are skipped; the total count is not adjusted for them.
pub fn parse_records(doc: &Value) -> Result<Vec<MovieSummary>, ParseError> {
    let records = doc
        .get(RECORDS_FIELD)
        .ok_or(ParseError::MissingField(RECORDS_FIELD))?
        .as_array()
        .ok_or(ParseError::InvalidField(RECORDS_FIELD))?;

    let movies = records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let movie = MovieSummary::from_record(record);
            if movie.is_none() {
                debug!(index = idx, "Skipping malformed upstream record");
            }
            movie
        })
        .collect();

    Ok(movies)
}

/// Parse count and records from one document.
pub fn parse_response(doc: &Value) -> Result<UpstreamResponse, ParseError> {
    Ok(UpstreamResponse {
        total_count: parse_total_count(doc)?,
        records: parse_records(doc)?,
    })
}

pub(crate) fn title_of(record: &Value) -> Option<String> {
    ["name", "enName", "alternativeName"]
        .iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_str))
        .find(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

pub(crate) fn year_of(record: &Value) -> Option<i32> {
    record
        .get("year")
        .and_then(Value::as_i64)
        .and_then(|y| i32::try_from(y).ok())
}

// Upstream reports 0 for titles nobody has rated yet.
pub(crate) fn rating_of(record: &Value) -> Option<f64> {
    let rating = record.get("rating")?;
    let value = match rating {
        Value::Object(_) => ["imdb", "kp"]
            .iter()
            .filter_map(|key| rating.get(*key).and_then(Value::as_f64))
            .find(|r| *r > 0.0),
        other => other.as_f64(),
    };
    value.filter(|r| *r > 0.0)
}

pub(crate) fn votes_of(record: &Value) -> Option<u64> {
    let votes = record.get("votes")?;
    match votes {
        Value::Object(_) => ["imdb", "kp"]
            .iter()
            .find_map(|key| votes.get(*key).and_then(Value::as_u64)),
        other => other.as_u64(),
    }
}

pub(crate) fn image_url(record: &Value, field: &str) -> Option<String> {
    let image = record.get(field)?;
    ["url", "previewUrl"]
        .iter()
        .filter_map(|key| image.get(*key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}
