use bitmap_core::locale::Locale;

/// Default API origin.
pub const DEFAULT_API_URL: &str = "https://api.prodbybitmap.com";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API origin without trailing slash.
    pub api_url: String,
    /// Bearer token for authenticated endpoints, if signed in.
    pub api_token: Option<String>,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Locale used when printing localized text (default: `ko`).
    pub locale: Locale,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                        |
    /// |------------------------|--------------------------------|
    /// | `BITMAP_API_URL`       | `https://api.prodbybitmap.com` |
    /// | `BITMAP_API_TOKEN`     | unset                          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                           |
    /// | `BITMAP_LOCALE`        | `ko`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through
    /// `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = lookup("BITMAP_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());

        let api_token = lookup("BITMAP_API_TOKEN")
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        let timeout_raw = lookup("REQUEST_TIMEOUT_SECS").unwrap_or_else(|| "30".into());
        let request_timeout_secs: u64 = timeout_raw
            .trim()
            .parse()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                expected: "a positive number of seconds",
                value: timeout_raw.clone(),
            })?;

        let locale_raw = lookup("BITMAP_LOCALE").unwrap_or_else(|| "ko".into());
        let locale = Locale::parse(locale_raw.trim()).map_err(|_| ConfigError::Invalid {
            name: "BITMAP_LOCALE",
            expected: "one of: ko, en",
            value: locale_raw.clone(),
        })?;

        Ok(Self {
            api_url,
            api_token,
            request_timeout_secs,
            locale,
        })
    }
}
