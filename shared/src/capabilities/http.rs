use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

const MAX_URL_LENGTH: usize = 2048;

/// An absolute http(s) URL with a host, checked once at configuration time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ValidatedUrl {
    url: String,
    scheme: String,
    host: String,
}

impl ValidatedUrl {
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        Self::validate(&url)?;

        let parsed = Url::parse(&url).map_err(|e| Self::invalid(&url, e.to_string()))?;

        let scheme = parsed.scheme().to_lowercase();
        if scheme != "https" && scheme != "http" {
            return Err(Self::invalid(&url, format!("unsupported scheme `{scheme}`")));
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| Self::invalid(&url, "missing host".to_string()))?
            .to_lowercase();

        Ok(Self {
            url: parsed.to_string(),
            scheme,
            host,
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }

    /// Appends `path` to this URL, keeping any path prefix the base carries.
    #[must_use]
    pub fn join_path(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn validate(url: &str) -> Result<(), ConfigError> {
        if url.trim().is_empty() {
            return Err(Self::invalid(url, "URL cannot be empty".to_string()));
        }
        if url.len() > MAX_URL_LENGTH {
            return Err(Self::invalid(
                url,
                format!("URL exceeds maximum length of {MAX_URL_LENGTH}"),
            ));
        }
        if url.chars().any(char::is_control) {
            return Err(Self::invalid(url, "URL contains control characters".to_string()));
        }
        Ok(())
    }

    fn invalid(url: &str, reason: String) -> ConfigError {
        let shown: String = url.chars().take(100).collect();
        ConfigError::InvalidUrl {
            field: "url",
            reason: format!("{reason} ({shown})"),
        }
    }
}

impl TryFrom<String> for ValidatedUrl {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ValidatedUrl> for String {
    fn from(value: ValidatedUrl) -> Self {
        value.url
    }
}

impl std::fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
