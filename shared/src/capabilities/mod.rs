//! Side-effect channels the shell fulfils: HTTP for the AI gateway,
//! key-value storage for preferences, device geolocation, and Crux's
//! built-in Render.

mod geolocation;
mod http;
mod kv;

pub use self::geolocation::{
    DevicePosition, Geolocation, GeolocationOperation, LocationResult,
};
pub use self::http::ValidatedUrl;
pub use self::kv::{KvCapability, ThemePreference, THEME_KEY};

pub use crux_core::render::Render;
pub use crux_http::Http;
pub use crux_kv::KeyValue;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub key_value: KeyValue<Event>,
    pub geolocation: Geolocation<Event>,
    pub render: Render<Event>,
}
