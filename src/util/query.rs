use std::collections::HashMap;

use serde::{Deserialize, Deserializer};

/// Raw query-string parameters, looked up by name.
#[derive(Debug, Default)]
pub struct QueryParams {
    map: HashMap<String, String>,
}

impl<'de> Deserialize<'de> for QueryParams {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = HashMap::<String, String>::deserialize(deserializer)?;
        Ok(QueryParams { map })
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PageParamError {
    #[error("page must be a number, got {0:?}")]
    NotANumber(String),
    #[error("page must be 1 or greater")]
    Zero,
}

impl QueryParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|v| v.as_str())
    }

    /// The 1-based page number; missing or empty means the first page.
    pub fn page(&self) -> Result<u32, PageParamError> {
        let raw = match self.get("page").map(str::trim) {
            None | Some("") => return Ok(1),
            Some(raw) => raw,
        };
        match raw.parse::<u32>() {
            Ok(0) => Err(PageParamError::Zero),
            Ok(page) => Ok(page),
            Err(_) => Err(PageParamError::NotANumber(raw.to_string())),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        QueryParams {
            map: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
