use crux_kv::KeyValue;
use tracing::{debug, warn};

use crate::event::Event;
use crate::model::Theme;

pub type KvCapability = KeyValue<Event>;

/// Storage key shared with earlier releases of the app; do not rename.
pub const THEME_KEY: &str = "beamcheck-theme";

/// Reads and writes the persisted theme choice.
///
/// The stored value is the bare ASCII word `dark` or `light`. Anything
/// else is treated as absent so the caller falls back to the default.
pub struct ThemePreference;

impl ThemePreference {
    #[must_use]
    pub fn encode(theme: Theme) -> Vec<u8> {
        theme.as_str().as_bytes().to_vec()
    }

    #[must_use]
    pub fn decode(raw: Option<&[u8]>) -> Option<Theme> {
        let raw = raw?;
        let value = match std::str::from_utf8(raw) {
            Ok(value) => value.trim(),
            Err(e) => {
                warn!(error = %e, "stored theme is not valid UTF-8");
                return None;
            }
        };
        let theme = Theme::parse(value);
        if theme.is_none() {
            debug!(value, "ignoring unrecognized stored theme");
        }
        theme
    }

    pub fn load(kv: &KvCapability) {
        kv.get(THEME_KEY.to_string(), |result| {
            Event::ThemeRestored(Self::decode(result.ok().flatten().as_deref()))
        });
    }

    pub fn store(kv: &KvCapability, theme: Theme) {
        kv.set(THEME_KEY.to_string(), Self::encode(theme), |result| {
            Event::ThemePersisted {
                ok: result.is_ok(),
            }
        });
    }
}
