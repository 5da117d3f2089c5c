use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub listen: ListenConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListenConfig {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default = "default_port")]
    pub port: String,
    #[serde(default)]
    pub tlscert: Option<String>,
    #[serde(default)]
    pub tlskey: Option<String>,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: default_port(),
            tlscert: None,
            tlskey: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    #[serde(alias = "baseurl", rename = "baseurl")]
    #[serde(default = "default_upstream_url")]
    pub base_url: String,
    #[serde(alias = "apikey", rename = "apikey")]
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_upstream_url(),
            api_key: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    #[serde(alias = "pagesize", rename = "pagesize")]
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Seconds a catalog page stays cached. Unset or 0 disables the cache.
    #[serde(alias = "cachettl", rename = "cachettl")]
    #[serde(default)]
    pub cache_ttl: Option<u64>,
    #[serde(alias = "cachesize", rename = "cachesize")]
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            cache_ttl: None,
            cache_size: default_cache_size(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AuthConfig {
    #[serde(alias = "admintokens", rename = "admintokens")]
    #[serde(default)]
    pub admin_tokens: Vec<String>,
}

fn default_port() -> String {
    "8080".to_string()
}

fn default_upstream_url() -> String {
    "https://api.kinopoisk.dev/v1.4".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_page_size() -> u32 {
    crate::catalog::PAGE_SIZE
}

fn default_cache_size() -> usize {
    256
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(path.to_string(), e))?;

        Self::from_yaml(&content).map_err(|e| match e {
            ConfigError::ParseError(_, err) => ConfigError::ParseError(path.to_string(), err),
            other => other,
        })
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let mut config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError("<inline>".to_string(), e))?;

        if let Ok(key) = std::env::var("CINECAT_API_KEY") {
            if !key.is_empty() {
                config.upstream.api_key = Some(key);
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::Invalid("catalog.pagesize must be greater than 0".to_string()));
        }
        if self.upstream.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("upstream.baseurl must not be empty".to_string()));
        }
        Ok(())
    }

    /// Cache lifetime, if caching is enabled.
    pub fn cache_ttl(&self) -> Option<std::time::Duration> {
        self.catalog
            .cache_ttl
            .filter(|&secs| secs > 0)
            .map(std::time::Duration::from_secs)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    ReadError(String, std::io::Error),
    #[error("Failed to parse config file {0}: {1}")]
    ParseError(String, serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
