use serde::{Deserialize, Serialize};

use crate::model::{Model, RequestKind, Tab};

/// Number of prices surfaced on the home screen.
pub const HOME_PRICE_PREVIEW: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPriceView {
    pub fuel_type: String,
    pub price: f64,
    /// Two decimals, no currency sign.
    pub price_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelView {
    pub prices: Vec<FuelPriceView>,
    pub refreshing: bool,
}

/// A home screen shortcut; tapping it sends `TabSelected(target)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeAction {
    pub label: String,
    pub target: Tab,
}

const HOME_ACTIONS: [(&str, Tab); 4] = [
    ("ค้นหาเส้นทาง", Tab::Map),
    ("คำนวณค่าน้ำมัน", Tab::Calculator),
    ("หาร้านซ่อม", Tab::Map),
    ("เกี่ยวกับเรา", Tab::About),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeView {
    pub actions: Vec<HomeAction>,
    pub price_preview: Vec<FuelPriceView>,
    pub refreshing: bool,
}

fn prices(model: &Model) -> impl Iterator<Item = FuelPriceView> + '_ {
    model.fuel_prices.iter().map(|p| FuelPriceView {
        fuel_type: p.fuel_type.clone(),
        price: p.price,
        price_label: format!("{:.2}", p.price),
    })
}

#[must_use]
pub fn view(model: &Model) -> FuelView {
    FuelView {
        prices: prices(model).collect(),
        refreshing: model.is_in_flight(RequestKind::FuelPrices),
    }
}

#[must_use]
pub fn home(model: &Model) -> HomeView {
    HomeView {
        actions: HOME_ACTIONS
            .iter()
            .map(|(label, target)| HomeAction {
                label: (*label).to_string(),
                target: *target,
            })
            .collect(),
        price_preview: prices(model).take(HOME_PRICE_PREVIEW).collect(),
        refreshing: model.is_in_flight(RequestKind::FuelPrices),
    }
}
