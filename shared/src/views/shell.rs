//! Chrome around the tab content: tab bar, header, settings and QR modals,
//! the splash screen, and the colour palette for the current theme.

use serde::{Deserialize, Serialize};

use crate::model::{BrandingImage, Model, Tab, Theme};
use crate::{APP_NAME, APP_TAGLINE, SPLASH_DURATION_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub muted_text: &'static str,
    pub accent: &'static str,
    pub danger: &'static str,
}

pub const DARK_PALETTE: Palette = Palette {
    background: "#030712",
    surface: "#0f172a",
    text: "#f8fafc",
    muted_text: "#94a3b8",
    accent: "#4f46e5",
    danger: "#f43f5e",
};

pub const LIGHT_PALETTE: Palette = Palette {
    background: "#f8fafc",
    surface: "#ffffff",
    text: "#0f172a",
    muted_text: "#64748b",
    accent: "#4f46e5",
    danger: "#e11d48",
};

#[must_use]
pub const fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => DARK_PALETTE,
        Theme::Light => LIGHT_PALETTE,
    }
}

/// Tabs shown in the bottom bar. Calculator and About are reached from
/// links inside other screens.
pub const TAB_BAR: [(Tab, &str, &str); 5] = [
    (Tab::Home, "หน้าแรก", "🏠"),
    (Tab::Fuel, "น้ำมัน", "⛽"),
    (Tab::Map, "แผนที่", "🧭"),
    (Tab::Health, "แจ้งซ่อม", "🛠️"),
    (Tab::Emergency, "ฉุกเฉิน", "🆘"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabItem {
    pub tab: Tab,
    pub label: String,
    pub icon: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderView {
    pub title: String,
    pub tagline: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub theme: Theme,
    pub theme_options: Vec<Theme>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrView {
    pub payload: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplashImage {
    Generating,
    Bytes(#[serde(with = "serde_bytes")] Vec<u8>),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplashView {
    pub image: SplashImage,
    pub title: String,
    pub tagline: String,
    /// Set once an image is ready; the shell starts its timer then and
    /// sends `SplashFinished` when it fires.
    pub auto_dismiss_ms: Option<u64>,
}

#[must_use]
pub fn tab_bar(active: Tab) -> Vec<TabItem> {
    TAB_BAR
        .iter()
        .map(|(tab, label, icon)| TabItem {
            tab: *tab,
            label: (*label).to_string(),
            icon: (*icon).to_string(),
            active: *tab == active,
        })
        .collect()
}

#[must_use]
pub fn header() -> HeaderView {
    HeaderView {
        title: APP_NAME.to_string(),
        tagline: APP_TAGLINE.to_string(),
    }
}

#[must_use]
pub fn settings(model: &Model) -> Option<SettingsView> {
    model.settings_open.then(|| SettingsView {
        theme: model.theme,
        theme_options: vec![Theme::Light, Theme::Dark],
    })
}

#[must_use]
pub fn qr(model: &Model) -> Option<QrView> {
    model.qr_open.then(|| QrView {
        payload: model.config.share_url.clone(),
    })
}

#[must_use]
pub fn splash(model: &Model) -> Option<SplashView> {
    if !model.splash.visible {
        return None;
    }
    let (image, auto_dismiss_ms) = match &model.splash.image {
        BrandingImage::Pending => (SplashImage::Generating, None),
        BrandingImage::Generated(bytes) => (SplashImage::Bytes(bytes.clone()), Some(SPLASH_DURATION_MS)),
        BrandingImage::Fallback(url) => (SplashImage::Url(url.clone()), Some(SPLASH_DURATION_MS)),
    };
    Some(SplashView {
        image,
        title: APP_NAME.to_string(),
        tagline: APP_TAGLINE.to_string(),
        auto_dismiss_ms,
    })
}

/// The splash screen already covers startup work.
#[must_use]
pub fn show_loading_overlay(model: &Model) -> bool {
    model.is_loading() && !model.splash.visible
}
