//! Pure projections from [`Model`] to what the shell renders. Only the
//! active tab's screen is built.

pub mod calculator;
pub mod emergency;
pub mod fuel;
pub mod health;
pub mod map;
pub mod shell;

use serde::{Deserialize, Serialize};

use crate::model::{Model, Tab, Theme};
use crate::{APP_NAME, APP_TAGLINE};

pub use calculator::CalculatorView;
pub use emergency::EmergencyView;
pub use fuel::{FuelView, HomeAction, HomeView};
pub use health::HealthView;
pub use map::MapView;
pub use shell::{HeaderView, Palette, QrView, SettingsView, SplashView, TabItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutView {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Screen {
    Home(HomeView),
    Fuel(FuelView),
    Map(MapView),
    Health(HealthView),
    Calculator(CalculatorView),
    Emergency(EmergencyView),
    About(AboutView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub active_tab: Tab,
    pub theme: Theme,
    pub palette: Palette,
    pub header: HeaderView,
    pub tab_bar: Vec<TabItem>,
    pub loading: bool,
    pub show_loading_overlay: bool,
    pub splash: Option<SplashView>,
    pub settings: Option<SettingsView>,
    pub qr: Option<QrView>,
    pub screen: Screen,
}

#[must_use]
pub fn about() -> AboutView {
    AboutView {
        title: APP_NAME.to_string(),
        tagline: APP_TAGLINE.to_string(),
        description: "BeamCheck ผสานพลังของ AI เพื่อช่วยวิเคราะห์อาการรถ ค้นหาปั๊มน้ำมันและร้านซ่อม \
                      และวางแผนการเดินทางสำหรับทั้งรถยนต์และรถจักรยานยนต์"
            .to_string(),
        highlights: vec![
            "ความปลอดภัยเป็นหลัก: เชื่อมต่อเบอร์ฉุกเฉินและหน่วยกู้ภัยได้ทันที".to_string(),
            "AI Diagnostic: ตรวจสอบอาการผิดปกติของรถเบื้องต้น".to_string(),
            "Smart Map: ค้นหาปั๊ม ร้านซ่อม และสภาพจราจรรอบตัว".to_string(),
        ],
    }
}

#[must_use]
pub fn screen(model: &Model) -> Screen {
    match model.active_tab {
        Tab::Home => Screen::Home(fuel::home(model)),
        Tab::Fuel => Screen::Fuel(fuel::view(model)),
        Tab::Map => Screen::Map(map::view(model)),
        Tab::Health => Screen::Health(health::view(model)),
        Tab::Calculator => Screen::Calculator(calculator::view(&model.calculator)),
        Tab::Emergency => Screen::Emergency(emergency::view(&model.emergency_query)),
        Tab::About => Screen::About(about()),
    }
}

#[must_use]
pub fn build(model: &Model) -> ViewModel {
    ViewModel {
        active_tab: model.active_tab,
        theme: model.theme,
        palette: shell::palette(model.theme),
        header: shell::header(),
        tab_bar: shell::tab_bar(model.active_tab),
        loading: model.is_loading(),
        show_loading_overlay: shell::show_loading_overlay(model),
        splash: shell::splash(model),
        settings: shell::settings(model),
        qr: shell::qr(model),
        screen: screen(model),
    }
}
