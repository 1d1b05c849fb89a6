// lib.rs - BeamCheck shared core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod event;
pub mod gateway;
pub mod location;
pub mod model;
pub mod views;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{AppConfig, GatewayConfig};
pub use crux_core::{render::Render, App as CruxApp};
pub use error::{ErrorKind, GatewayError, LocationUnavailable, ValidationError};
pub use event::Event;
pub use location::{Coordinate, Location, LocationSource};
pub use model::{Model, Tab, Theme};
pub use views::ViewModel;

pub const APP_NAME: &str = "BeamCheck";
pub const APP_TAGLINE: &str = "เทคโนโลยีเพื่อทุกการขับขี่";

/// Bangkok city centre, used whenever the device cannot supply a fix.
pub const FALLBACK_LOCATION: Coordinate = Coordinate::from_degrees(13.7563, 100.5018);
pub const DEFAULT_GEOLOCATION_TIMEOUT_MS: u64 = 10_000;

pub const SPLASH_DURATION_MS: u64 = 3000;
pub const SPLASH_FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1558981403-c5f91cbba527?auto=format&fit=crop&q=80&w=1000";
pub const MAX_BRANDING_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub const DEFAULT_GATEWAY_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_STRUCTURED_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_SHARE_URL: &str = "https://beamcheck.app/";

pub const NO_ADDRESS_PLACEHOLDER: &str = "no address available";
