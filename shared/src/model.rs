use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::location::{Coordinate, Location};
use crate::views::calculator::{CalculatorForm, TripEstimate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tab {
    #[default]
    Home,
    Fuel,
    Map,
    Health,
    Calculator,
    Emergency,
    About,
}

impl Tab {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Fuel => "fuel",
            Self::Map => "map",
            Self::Health => "health",
            Self::Calculator => "calc",
            Self::Emergency => "emergency",
            Self::About => "about",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelPrice {
    #[serde(rename = "type")]
    pub fuel_type: String,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlaceKind {
    GasStation,
    RepairShop,
}

/// A gas station or repair shop surfaced by a maps-grounded search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub uri: Option<String>,
    pub rating: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Accepts the localized labels the backend is asked to answer with,
    /// plus the English words.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim().to_lowercase();
        match label.as_str() {
            "ต่ำ" | "low" => Some(Self::Low),
            "กลาง" | "ปานกลาง" | "medium" | "moderate" => Some(Self::Medium),
            "สูง" | "high" => Some(Self::High),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResult {
    pub analysis: String,
    pub possible_causes: Vec<String>,
    pub severity: Severity,
    pub advice: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLink {
    pub title: String,
    pub uri: String,
}

/// Narrative text plus map links, used for both trip and traffic panels.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteInfo {
    pub text: String,
    pub links: Vec<MapLink>,
}

impl RouteInfo {
    #[must_use]
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            links: Vec::new(),
        }
    }
}

/// Identifies a request that has been issued and not yet answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestKind {
    Location,
    FuelPrices,
    HealthTriage,
    ReverseGeocode,
    GasStations,
    RepairShops,
    RouteDetails,
    Traffic,
    Branding,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::FuelPrices => "fuel_prices",
            Self::HealthTriage => "health_triage",
            Self::ReverseGeocode => "reverse_geocode",
            Self::GasStations => "gas_stations",
            Self::RepairShops => "repair_shops",
            Self::RouteDetails => "route_details",
            Self::Traffic => "traffic",
            Self::Branding => "branding",
        }
    }

    /// Branding runs behind the splash screen and never drives the
    /// loading overlay.
    #[must_use]
    pub const fn counts_as_loading(self) -> bool {
        !matches!(self, Self::Branding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrandingImage {
    #[default]
    Pending,
    Generated(#[serde(with = "serde_bytes")] Vec<u8>),
    Fallback(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplashState {
    pub visible: bool,
    pub image: BrandingImage,
}

impl Default for SplashState {
    fn default() -> Self {
        Self {
            visible: true,
            image: BrandingImage::Pending,
        }
    }
}

#[derive(Debug, Default)]
pub struct Model {
    pub config: AppConfig,
    pub active_tab: Tab,
    pub theme: Theme,
    theme_chosen: bool,
    in_flight: Vec<RequestKind>,

    pub location: Option<Location>,
    pub fuel_prices: Vec<FuelPrice>,
    pub stations: Vec<Place>,
    pub repair_shops: Vec<Place>,

    pub health_query: String,
    pub health_result: Option<HealthResult>,

    pub destination: String,
    pub pending_selection: Option<Coordinate>,
    pub trip_info: Option<RouteInfo>,
    pub traffic_info: Option<RouteInfo>,
    pub traffic_active: bool,

    pub calculator: CalculatorForm,
    pub emergency_query: String,

    pub settings_open: bool,
    pub qr_open: bool,
    pub splash: SplashState,
}

impl Model {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Switching tabs never cancels work in flight. Leaving the map drops
    /// the tap marker.
    pub fn set_active_tab(&mut self, tab: Tab) {
        if self.active_tab == Tab::Map && tab != Tab::Map {
            self.pending_selection = None;
        }
        self.active_tab = tab;
    }

    /// A theme picked by the user in this session.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.theme_chosen = true;
    }

    /// Applies the stored theme unless the user already picked one. Returns
    /// whether it was applied.
    pub fn restore_theme(&mut self, theme: Theme) -> bool {
        if self.theme_chosen {
            return false;
        }
        self.theme = theme;
        true
    }

    pub fn begin_request(&mut self, kind: RequestKind) {
        self.in_flight.push(kind);
    }

    /// Clears one outstanding request of `kind`. Returns false when none
    /// was outstanding.
    pub fn finish_request(&mut self, kind: RequestKind) -> bool {
        match self.in_flight.iter().position(|k| *k == kind) {
            Some(index) => {
                self.in_flight.remove(index);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.in_flight.iter().any(|k| k.counts_as_loading())
    }

    #[must_use]
    pub fn is_in_flight(&self, kind: RequestKind) -> bool {
        self.in_flight.contains(&kind)
    }

    #[must_use]
    pub fn in_flight(&self) -> &[RequestKind] {
        &self.in_flight
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn set_fuel_prices(&mut self, prices: Vec<FuelPrice>) {
        self.fuel_prices = prices;
    }

    pub fn set_health_result(&mut self, result: HealthResult) {
        self.health_result = Some(result);
    }

    pub fn set_places(&mut self, kind: PlaceKind, places: Vec<Place>) {
        match kind {
            PlaceKind::GasStation => self.set_stations(places),
            PlaceKind::RepairShop => self.set_repair_shops(places),
        }
    }

    pub fn set_stations(&mut self, places: Vec<Place>) {
        self.stations = places;
    }

    pub fn set_repair_shops(&mut self, places: Vec<Place>) {
        self.repair_shops = places;
    }

    pub fn set_trip_info(&mut self, info: RouteInfo) {
        self.trip_info = Some(info);
    }

    /// A traffic report takes over the route panel until dismissed.
    pub fn set_traffic_info(&mut self, info: RouteInfo) {
        self.traffic_info = Some(info);
        self.traffic_active = true;
    }

    pub fn set_destination(&mut self, destination: impl Into<String>) {
        self.destination = destination.into();
    }

    pub fn set_pending_selection(&mut self, coordinate: Coordinate) {
        self.pending_selection = Some(coordinate);
    }

    pub fn set_branding(&mut self, image: BrandingImage) {
        self.splash.image = image;
    }

    pub fn set_trip_estimate(&mut self, estimate: TripEstimate) {
        self.calculator.estimate = Some(estimate);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let model = Model::default();
        assert_eq!(model.active_tab, Tab::Home);
        assert_eq!(model.theme, Theme::Dark);
        assert!(!model.is_loading());
        assert!(model.splash.visible);
        assert_eq!(model.splash.image, BrandingImage::Pending);
        assert!(model.location.is_none());
    }

    #[test]
    fn loading_tracks_each_request_independently() {
        let mut model = Model::default();
        model.begin_request(RequestKind::GasStations);
        model.begin_request(RequestKind::RepairShops);
        assert!(model.is_loading());

        assert!(model.finish_request(RequestKind::GasStations));
        assert!(model.is_loading());
        assert!(model.finish_request(RequestKind::RepairShops));
        assert!(!model.is_loading());
        assert!(!model.finish_request(RequestKind::RepairShops));
    }

    #[test]
    fn same_kind_can_be_in_flight_twice() {
        let mut model = Model::default();
        model.begin_request(RequestKind::ReverseGeocode);
        model.begin_request(RequestKind::ReverseGeocode);
        model.finish_request(RequestKind::ReverseGeocode);
        assert!(model.is_in_flight(RequestKind::ReverseGeocode));
    }

    #[test]
    fn branding_never_drives_loading() {
        let mut model = Model::default();
        model.begin_request(RequestKind::Branding);
        assert!(!model.is_loading());
        assert!(model.is_in_flight(RequestKind::Branding));
    }

    #[test]
    fn stored_theme_never_overrides_a_fresh_choice() {
        let mut model = Model::default();
        assert!(model.restore_theme(Theme::Light));
        assert_eq!(model.theme, Theme::Light);

        model.set_theme(Theme::Dark);
        assert!(!model.restore_theme(Theme::Light));
        assert_eq!(model.theme, Theme::Dark);
    }

    #[test]
    fn leaving_map_clears_pending_selection() {
        let mut model = Model::default();
        model.set_active_tab(Tab::Map);
        model.set_pending_selection(Coordinate::from_degrees(13.7, 100.5));
        model.set_active_tab(Tab::Map);
        assert!(model.pending_selection.is_some());
        model.set_active_tab(Tab::Fuel);
        assert!(model.pending_selection.is_none());
    }

    #[test]
    fn place_lists_are_independent() {
        let mut model = Model::default();
        let place = Place {
            name: "PTT".into(),
            address: "Rama IV".into(),
            uri: None,
            rating: None,
        };
        model.set_places(PlaceKind::GasStation, vec![place.clone()]);
        model.set_places(PlaceKind::RepairShop, vec![]);
        assert_eq!(model.stations, vec![place]);
        assert!(model.repair_shops.is_empty());
    }

    #[test]
    fn severity_labels() {
        assert_eq!(Severity::from_label("สูง"), Some(Severity::High));
        assert_eq!(Severity::from_label(" ปานกลาง "), Some(Severity::Medium));
        assert_eq!(Severity::from_label("LOW"), Some(Severity::Low));
        assert_eq!(Severity::from_label("critical"), None);
    }

    #[test]
    fn traffic_report_activates_panel() {
        let mut model = Model::default();
        model.set_traffic_info(RouteInfo::text_only("jammed"));
        assert!(model.traffic_active);
    }
}
