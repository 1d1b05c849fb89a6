use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::capabilities::{DevicePosition, LocationResult};
use crate::error::CoordinateError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(CoordinateError::LongitudeOutOfRange(lng));
        }
        Ok(Self { lat, lng })
    }

    /// For compile-time constants known to be in range.
    #[must_use]
    pub const fn from_degrees(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `"lat, lng"` with four decimals, used when no place name is known.
    #[must_use]
    pub fn display_label(self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationSource {
    Device,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub source: LocationSource,
}

impl Location {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.lat,
            lng: self.lng,
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, LocationSource::Fallback)
    }
}

/// Turns a one-shot geolocation answer into a usable [`Location`].
///
/// Never fails: anything other than a valid device fix resolves to the
/// configured fallback.
#[derive(Debug, Clone, Copy)]
pub struct LocationProvider {
    fallback: Coordinate,
}

impl LocationProvider {
    #[must_use]
    pub const fn new(fallback: Coordinate) -> Self {
        Self { fallback }
    }

    #[must_use]
    pub fn resolve(&self, result: LocationResult) -> Location {
        match result {
            Ok(DevicePosition { lat, lng, accuracy_m }) => match Coordinate::new(lat, lng) {
                Ok(coordinate) => {
                    info!(accuracy_m = ?accuracy_m, "device location acquired");
                    Location {
                        lat: coordinate.lat,
                        lng: coordinate.lng,
                        source: LocationSource::Device,
                    }
                }
                Err(e) => {
                    warn!(error = %e, "device reported an invalid coordinate, using fallback");
                    self.fallback()
                }
            },
            Err(e) => {
                warn!(error = %e, code = e.kind().code(), "location unavailable, using fallback");
                self.fallback()
            }
        }
    }

    #[must_use]
    pub const fn fallback(&self) -> Location {
        Location {
            lat: self.fallback.lat,
            lng: self.fallback.lng,
            source: LocationSource::Fallback,
        }
    }
}
