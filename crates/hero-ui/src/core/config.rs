//! Build-time configuration for the console.
//!
//! # Design
//! - Values are baked in at compile time; the browser has no process environment.
//! - Every setting has a default that matches a local development backend.

/// Default backend origin.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
/// Default origin serving uploaded posters.
pub const DEFAULT_IMAGE_BASE_URL: &str = "http://localhost:6419";
/// Default tracing filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";
/// Storage key holding the bearer token.
pub const TOKEN_STORAGE_KEY: &str = "access_token";

/// Resolved console configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Backend origin without a trailing slash.
    pub api_base_url: String,
    /// Poster origin without a trailing slash.
    pub image_base_url: String,
    /// Tracing filter directive.
    pub log_level: String,
    /// Durable storage key for the session token.
    pub token_storage_key: &'static str,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

impl UiConfig {
    /// Read `HERO_API_BASE_URL`, `HERO_IMAGE_BASE_URL` and `HERO_LOG` as captured at build time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::resolve(
            option_env!("HERO_API_BASE_URL"),
            option_env!("HERO_IMAGE_BASE_URL"),
            option_env!("HERO_LOG"),
        )
    }

    /// Resolve configuration from optional overrides, falling back to defaults.
    #[must_use]
    pub fn resolve(api: Option<&str>, image: Option<&str>, log: Option<&str>) -> Self {
        let log_level = log
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_LOG_LEVEL)
            .to_string();
        Self {
            api_base_url: normalize_base(api, DEFAULT_API_BASE_URL),
            image_base_url: normalize_base(image, DEFAULT_IMAGE_BASE_URL),
            log_level,
            token_storage_key: TOKEN_STORAGE_KEY,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }

    /// Display URL for a stored poster file.
    #[must_use]
    pub fn poster_url(&self, img_name: &str) -> String {
        join_url(&self.image_base_url, img_name)
    }
}

fn normalize_base(value: Option<&str>, fallback: &str) -> String {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(fallback)
        .trim_end_matches('/')
        .to_string()
}

fn join_url(base: &str, path: &str) -> String {
    format!("{base}/{}", path.trim_start_matches('/'))
}
