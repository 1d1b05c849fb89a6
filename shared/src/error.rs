use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Transient,
    Permanent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Network,
    Authentication,
    RateLimited,
    Backend,
    Deserialization,
    Validation,
    Location,
    LocationPermissionDenied,
    Configuration,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Network => "NETWORK_ERROR",
            Self::Authentication => "AUTH_ERROR",
            Self::RateLimited => "RATE_LIMITED",
            Self::Backend => "BACKEND_ERROR",
            Self::Deserialization => "DESERIALIZATION_ERROR",
            Self::Validation => "VALIDATION_ERROR",
            Self::Location => "LOCATION_ERROR",
            Self::LocationPermissionDenied => "LOCATION_PERMISSION_DENIED",
            Self::Configuration => "CONFIG_ERROR",
        }
    }

    #[must_use]
    pub const fn default_severity(self) -> ErrorSeverity {
        match self {
            Self::Network | Self::RateLimited | Self::Backend | Self::Location => {
                ErrorSeverity::Transient
            }
            Self::Authentication
            | Self::Deserialization
            | Self::Validation
            | Self::LocationPermissionDenied
            | Self::Configuration => ErrorSeverity::Permanent,
        }
    }

    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self.default_severity(), ErrorSeverity::Transient)
    }
}

/// Failure of a single AI gateway call.
///
/// Every variant ends in a log line at the result handler; none of them
/// clears state that is already on screen.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GatewayError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("gateway returned status {code}: {message}")]
    Status { code: u16, message: String },

    #[error("malformed gateway response: {0}")]
    Malformed(String),

    #[error("gateway response missing field `{0}`")]
    MissingField(String),

    #[error("gateway response contained no usable content")]
    EmptyResponse,

    #[error("invalid gateway request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    /// Builds a status error, preferring the backend's own `error.message`
    /// when the body carries one.
    #[must_use]
    pub fn from_status(code: u16, body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct Envelope {
            error: Detail,
        }
        #[derive(Deserialize)]
        struct Detail {
            message: String,
        }

        let message = serde_json::from_slice::<Envelope>(body)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| {
                String::from_utf8_lossy(body)
                    .chars()
                    .take(200)
                    .collect::<String>()
            });

        Self::Status { code, message }
    }

    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) => ErrorKind::Network,
            Self::Status { code, .. } => match *code {
                401 | 403 => ErrorKind::Authentication,
                429 => ErrorKind::RateLimited,
                400 | 404 => ErrorKind::Validation,
                _ => ErrorKind::Backend,
            },
            Self::Malformed(_) | Self::MissingField(_) | Self::EmptyResponse => {
                ErrorKind::Deserialization
            }
            Self::InvalidRequest(_) => ErrorKind::Validation,
        }
    }

    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

/// Reasons the device could not supply a position fix.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LocationUnavailable {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("location request timed out")]
    Timeout,

    #[error("no location sensor available")]
    NoSensor,

    #[error("location failed: {0}")]
    Failed(String),
}

impl LocationUnavailable {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied => ErrorKind::LocationPermissionDenied,
            Self::Timeout | Self::NoSensor | Self::Failed(_) => ErrorKind::Location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("coordinate is not finite")]
    NonFinite,

    #[error("latitude {0} out of range")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} out of range")]
    LongitudeOutOfRange(f64),
}

/// A submission blocked before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("destination is empty")]
    EmptyDestination,

    #[error("current location is not known yet")]
    LocationPending,

    #[error("another request is still in flight")]
    Busy,

    #[error("{field} is not a number")]
    NotANumber { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
}

impl ValidationError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(String),

    #[error("invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("fallback location invalid: {0}")]
    FallbackLocation(String),
}

impl ConfigError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        ErrorKind::Configuration
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
