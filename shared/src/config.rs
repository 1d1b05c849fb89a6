//! Runtime configuration handed to the core by the shell at startup.
//!
//! The shell reads whatever source it likes (bundled JSON, build-time
//! environment, remote config) and sends the result in
//! [`Event::AppStarted`](crate::Event::AppStarted).

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use crate::capabilities::ValidatedUrl;
use crate::error::ConfigError;
use crate::location::Coordinate;
use crate::{
    DEFAULT_GATEWAY_BASE_URL, DEFAULT_GEOLOCATION_TIMEOUT_MS, DEFAULT_IMAGE_MODEL,
    DEFAULT_SHARE_URL, DEFAULT_STRUCTURED_MODEL, DEFAULT_TEXT_MODEL, FALLBACK_LOCATION,
    SPLASH_FALLBACK_IMAGE_URL,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    #[serde(serialize_with = "redact")]
    pub api_key: SecretString,
    /// Plain-text and maps-grounded requests.
    pub text_model: String,
    /// Requests that ask for a JSON response schema.
    pub structured_model: String,
    pub image_model: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_BASE_URL.to_string(),
            api_key: SecretString::new(String::new()),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            structured_model: DEFAULT_STRUCTURED_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

impl GatewayConfig {
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    pub fn validate(&self) -> Result<ValidatedUrl, ConfigError> {
        let base = ValidatedUrl::new(self.base_url.as_str()).map_err(|e| {
            ConfigError::InvalidUrl {
                field: "gateway.base_url",
                reason: e.to_string(),
            }
        })?;

        for (field, value) in [
            ("gateway.text_model", &self.text_model),
            ("gateway.structured_model", &self.structured_model),
            ("gateway.image_model", &self.image_model),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { field });
            }
        }

        Ok(base)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub fallback_location: Coordinate,
    /// Payload encoded into the share QR code.
    pub share_url: String,
    pub splash_fallback_image_url: String,
    pub geolocation_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            fallback_location: FALLBACK_LOCATION,
            share_url: DEFAULT_SHARE_URL.to_string(),
            splash_fallback_image_url: SPLASH_FALLBACK_IMAGE_URL.to_string(),
            geolocation_timeout_ms: DEFAULT_GEOLOCATION_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Parses and validates a JSON document. Missing fields take defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gateway.validate()?;

        for (field, value) in [
            ("share_url", &self.share_url),
            ("splash_fallback_image_url", &self.splash_fallback_image_url),
        ] {
            ValidatedUrl::new(value.as_str()).map_err(|e| ConfigError::InvalidUrl {
                field,
                reason: e.to_string(),
            })?;
        }

        Coordinate::new(self.fallback_location.lat, self.fallback_location.lng)
            .map_err(|e| ConfigError::FallbackLocation(e.to_string()))?;

        Ok(())
    }
}

fn redact<S: Serializer>(_: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("[REDACTED]")
}
