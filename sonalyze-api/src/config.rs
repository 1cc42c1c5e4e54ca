use crate::token_store::{resolve_token, TokenStore};

/// Environment variable holding the backend base URL.
pub const BASE_URL_ENV: &str = "SONALYZE_BASE_URL";

/// Where the backend listens when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token: String,
}

impl ClientConfig {
    /// Build from explicit flags, falling back to the token store and the
    /// environment.
    pub fn resolve(
        base_url: Option<&str>,
        token: Option<&str>,
        store: Option<&TokenStore>,
    ) -> Result<Self, String> {
        let token = resolve_token(token, store).ok_or_else(|| {
            format!(
                "No API token: pass --token, run `sonalyze token set <TOKEN>`, or set {}",
                crate::token_store::TOKEN_ENV
            )
        })?;
        Ok(Self {
            base_url: resolve_base_url(base_url),
            token,
        })
    }
}

pub fn resolve_base_url(explicit: Option<&str>) -> String {
    explicit
        .map(str::to_string)
        .or_else(|| std::env::var(BASE_URL_ENV).ok())
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}
