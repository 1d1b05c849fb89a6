use serde::{Deserialize, Serialize};

use crate::capabilities::LocationResult;
use crate::config::AppConfig;
use crate::error::GatewayError;
use crate::gateway::PlacesResult;
use crate::model::{FuelPrice, HealthResult, PlaceKind, RouteInfo, Tab, Theme};
use crate::location::Coordinate;
use crate::views::calculator::CalculatorField;

// --- Event enum: shell actions first, capability results after ---

#[derive(Serialize, Deserialize, Clone, Debug)]
pub enum Event {
    AppStarted(Box<AppConfig>),

    // Navigation shell
    TabSelected(Tab),
    ThemeSelected(Theme),
    SettingsOpened,
    SettingsClosed,
    QrRequested,
    QrClosed,
    AboutRequested,
    SplashFinished,

    // Fuel
    FuelPricesRequested,

    // Health
    HealthQueryChanged(String),
    HealthCheckRequested,

    // Map
    MapTapped { lat: f64, lng: f64 },
    DestinationChanged(String),
    TripPlanRequested,
    GasStationsRequested,
    RepairShopsRequested,
    TrafficRequested,
    TrafficDismissed,

    // Calculator
    CalculatorInputChanged { field: CalculatorField, value: String },
    TripCostRequested,

    // Emergency
    EmergencySearchChanged(String),

    // Capability results
    LocationResolved(LocationResult),
    ThemeRestored(Option<Theme>),
    ThemePersisted { ok: bool },
    FuelPricesFetched(Result<Vec<FuelPrice>, GatewayError>),
    HealthTriaged(Result<HealthResult, GatewayError>),
    DestinationGeocoded {
        at: Coordinate,
        result: Result<String, GatewayError>,
    },
    PlacesFound {
        kind: PlaceKind,
        result: Result<PlacesResult, GatewayError>,
    },
    RouteDetailsReceived(Result<RouteInfo, GatewayError>),
    TrafficReceived(Result<RouteInfo, GatewayError>),
    BrandingGenerated(Option<Vec<u8>>),
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppStarted(_) => "app_started",
            Self::TabSelected(_) => "tab_selected",
            Self::ThemeSelected(_) => "theme_selected",
            Self::SettingsOpened => "settings_opened",
            Self::SettingsClosed => "settings_closed",
            Self::QrRequested => "qr_requested",
            Self::QrClosed => "qr_closed",
            Self::AboutRequested => "about_requested",
            Self::SplashFinished => "splash_finished",
            Self::FuelPricesRequested => "fuel_prices_requested",
            Self::HealthQueryChanged(_) => "health_query_changed",
            Self::HealthCheckRequested => "health_check_requested",
            Self::MapTapped { .. } => "map_tapped",
            Self::DestinationChanged(_) => "destination_changed",
            Self::TripPlanRequested => "trip_plan_requested",
            Self::GasStationsRequested => "gas_stations_requested",
            Self::RepairShopsRequested => "repair_shops_requested",
            Self::TrafficRequested => "traffic_requested",
            Self::TrafficDismissed => "traffic_dismissed",
            Self::CalculatorInputChanged { .. } => "calculator_input_changed",
            Self::TripCostRequested => "trip_cost_requested",
            Self::EmergencySearchChanged(_) => "emergency_search_changed",
            Self::LocationResolved(_) => "location_resolved",
            Self::ThemeRestored(_) => "theme_restored",
            Self::ThemePersisted { .. } => "theme_persisted",
            Self::FuelPricesFetched(_) => "fuel_prices_fetched",
            Self::HealthTriaged(_) => "health_triaged",
            Self::DestinationGeocoded { .. } => "destination_geocoded",
            Self::PlacesFound { .. } => "places_found",
            Self::RouteDetailsReceived(_) => "route_details_received",
            Self::TrafficReceived(_) => "traffic_received",
            Self::BrandingGenerated(_) => "branding_generated",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::TabSelected(_)
                | Self::ThemeSelected(_)
                | Self::SettingsOpened
                | Self::SettingsClosed
                | Self::QrRequested
                | Self::QrClosed
                | Self::AboutRequested
                | Self::FuelPricesRequested
                | Self::HealthQueryChanged(_)
                | Self::HealthCheckRequested
                | Self::MapTapped { .. }
                | Self::DestinationChanged(_)
                | Self::TripPlanRequested
                | Self::GasStationsRequested
                | Self::RepairShopsRequested
                | Self::TrafficRequested
                | Self::TrafficDismissed
                | Self::CalculatorInputChanged { .. }
                | Self::TripCostRequested
                | Self::EmergencySearchChanged(_)
        )
    }

    /// True for events that only update a text field and need no logging
    /// beyond trace level.
    #[must_use]
    pub const fn is_keystroke(&self) -> bool {
        matches!(
            self,
            Self::HealthQueryChanged(_)
                | Self::DestinationChanged(_)
                | Self::CalculatorInputChanged { .. }
                | Self::EmergencySearchChanged(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_are_not_user_initiated() {
        assert!(!Event::BrandingGenerated(None).is_user_initiated());
        assert!(!Event::ThemePersisted { ok: true }.is_user_initiated());
        assert!(Event::MapTapped { lat: 1.0, lng: 2.0 }.is_user_initiated());
    }

    #[test]
    fn names_are_snake_case() {
        let events = [
            Event::SplashFinished,
            Event::TrafficDismissed,
            Event::HealthQueryChanged(String::new()),
            Event::FuelPricesFetched(Ok(vec![])),
        ];
        for event in &events {
            let name = event.name();
            assert!(name.chars().all(|c| c.is_ascii_lowercase() || c == '_'), "{name}");
        }
    }

    #[test]
    fn shell_events_round_trip_through_json() {
        let json = serde_json::to_string(&Event::MapTapped { lat: 13.75, lng: 100.5 }).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Event::MapTapped { lat, .. } if (lat - 13.75).abs() < 1e-9));
    }
}
