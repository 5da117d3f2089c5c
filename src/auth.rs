use std::collections::HashSet;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};

use crate::server::AppState;

/// The single capability the catalog asks about its caller.
pub trait Privilege: Send + Sync {
    fn is_admin(&self) -> bool;
}

impl Privilege for bool {
    fn is_admin(&self) -> bool {
        *self
    }
}

/// Resolves request tokens against the configured admin tokens.
#[derive(Debug, Default)]
pub struct TokenAuthority {
    admin_tokens: HashSet<String>,
}

impl TokenAuthority {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            admin_tokens: tokens
                .into_iter()
                .map(Into::into)
                .filter(|t: &String| !t.is_empty())
                .collect(),
        }
    }

    pub fn is_admin_token(&self, token: Option<&str>) -> bool {
        token.is_some_and(|t| self.admin_tokens.contains(t))
    }
}

/// Whoever issued the current request.
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    admin: bool,
}

impl Privilege for Caller {
    fn is_admin(&self) -> bool {
        self.admin
    }
}

pub fn role_name(admin: bool) -> &'static str {
    if admin {
        "admin"
    } else {
        "guest"
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for Caller {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts);
        Ok(Caller {
            admin: state.auth.is_admin_token(token.as_deref()),
        })
    }
}

/// Tokens are only read from headers so they never end up in URLs or
/// access logs.
fn extract_token(parts: &Parts) -> Option<String> {
    if let Some(auth_header) = parts.headers.get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(token) = auth_str.strip_prefix("Bearer ") {
                return Some(token.trim().to_string());
            }
        }
    }

    parts
        .headers
        .get("X-Api-Token")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim().to_string())
}
