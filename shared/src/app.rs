use tracing::{debug, info, trace, warn};

use crate::capabilities::{Capabilities, ThemePreference};
use crate::error::{GatewayError, ValidationError};
use crate::event::Event;
use crate::gateway::Gateway;
use crate::location::{Coordinate, LocationProvider};
use crate::model::{BrandingImage, Model, PlaceKind, RequestKind, RouteInfo, Tab};
use crate::views::{self, ViewModel};

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        if event.is_keystroke() {
            trace!(event = event.name(), "dispatch");
        } else {
            debug!(
                event = event.name(),
                user = event.is_user_initiated(),
                "dispatch"
            );
        }

        match event {
            Event::AppStarted(config) => {
                if let Err(e) = config.validate() {
                    warn!(error = %e, code = e.kind().code(), "starting with invalid configuration");
                }
                model.config = *config;
                info!(
                    has_api_key = model.config.gateway.has_api_key(),
                    "app started"
                );

                ThemePreference::load(&caps.key_value);

                model.begin_request(RequestKind::Location);
                caps.geolocation.get_current_position(
                    model.config.geolocation_timeout_ms,
                    Event::LocationResolved,
                );

                if !issue(model, caps, RequestKind::Branding, |gw| gw.generate_branding()) {
                    let fallback = model.config.splash_fallback_image_url.clone();
                    model.set_branding(BrandingImage::Fallback(fallback));
                }
                issue(model, caps, RequestKind::FuelPrices, |gw| gw.fetch_fuel_prices());
            }

            // --- Navigation shell ---
            Event::TabSelected(tab) => model.set_active_tab(tab),
            Event::ThemeSelected(theme) => {
                info!(theme = theme.as_str(), "theme changed");
                model.set_theme(theme);
                ThemePreference::store(&caps.key_value, theme);
            }
            Event::SettingsOpened => model.settings_open = true,
            Event::SettingsClosed => model.settings_open = false,
            Event::QrRequested => {
                model.qr_open = true;
                model.settings_open = false;
            }
            Event::QrClosed => model.qr_open = false,
            Event::AboutRequested => {
                model.set_active_tab(Tab::About);
                model.settings_open = false;
            }
            Event::SplashFinished => model.splash.visible = false,

            // --- Fuel ---
            Event::FuelPricesRequested => {
                issue(model, caps, RequestKind::FuelPrices, |gw| gw.fetch_fuel_prices());
            }

            // --- Health ---
            Event::HealthQueryChanged(query) => model.health_query = query,
            Event::HealthCheckRequested => match health_submission(model) {
                Ok(query) => {
                    issue(model, caps, RequestKind::HealthTriage, |gw| {
                        gw.triage_symptoms(&query)
                    });
                }
                Err(e) => blocked("health_check", &e),
            },

            // --- Map ---
            Event::MapTapped { lat, lng } => match Coordinate::new(lat, lng) {
                Ok(at) => {
                    model.set_pending_selection(at);
                    if !issue(model, caps, RequestKind::ReverseGeocode, |gw| {
                        gw.reverse_geocode(at)
                    }) {
                        model.set_destination(at.display_label());
                    }
                }
                Err(e) => debug!(error = %e, "ignoring tap outside valid coordinates"),
            },
            Event::DestinationChanged(destination) => model.set_destination(destination),
            Event::TripPlanRequested => match trip_submission(model) {
                Ok((at, destination)) => {
                    issue(model, caps, RequestKind::RouteDetails, |gw| {
                        gw.route_details(at, &destination)
                    });
                }
                Err(e) => blocked("trip_plan", &e),
            },
            Event::GasStationsRequested => search_nearby(model, caps, PlaceKind::GasStation),
            Event::RepairShopsRequested => search_nearby(model, caps, PlaceKind::RepairShop),
            Event::TrafficRequested => match current_coordinate(model) {
                Ok(at) => {
                    issue(model, caps, RequestKind::Traffic, |gw| gw.traffic_analysis(at));
                }
                Err(e) => blocked("traffic", &e),
            },
            Event::TrafficDismissed => model.traffic_active = false,

            // --- Calculator ---
            Event::CalculatorInputChanged { field, value } => model.calculator.set(field, value),
            Event::TripCostRequested => match model.calculator.calculate() {
                Ok(estimate) => model.set_trip_estimate(estimate),
                Err(e) => blocked("trip_cost", &e),
            },

            // --- Emergency ---
            Event::EmergencySearchChanged(query) => model.emergency_query = query,

            // --- Capability results ---
            Event::LocationResolved(result) => {
                model.finish_request(RequestKind::Location);
                let location = LocationProvider::new(model.config.fallback_location).resolve(result);
                info!(
                    fallback = location.is_fallback(),
                    "location resolved"
                );
                model.set_location(location);
            }
            Event::ThemeRestored(theme) => {
                if let Some(theme) = theme {
                    if !model.restore_theme(theme) {
                        debug!(stored = theme.as_str(), "keeping theme chosen before restore");
                    }
                }
            }
            Event::ThemePersisted { ok } => {
                if !ok {
                    warn!("failed to persist theme preference");
                }
            }
            Event::FuelPricesFetched(result) => {
                if let Some(prices) = settle(model, RequestKind::FuelPrices, result) {
                    info!(count = prices.len(), "fuel prices updated");
                    model.set_fuel_prices(prices);
                }
            }
            Event::HealthTriaged(result) => {
                if let Some(triage) = settle(model, RequestKind::HealthTriage, result) {
                    model.set_health_result(triage);
                }
            }
            Event::DestinationGeocoded { at, result } => {
                let name = settle(model, RequestKind::ReverseGeocode, result)
                    .unwrap_or_else(|| at.display_label());
                model.set_destination(name);
            }
            Event::PlacesFound { kind, result } => {
                if let Some(found) = settle(model, request_kind_for(kind), result) {
                    info!(kind = ?kind, count = found.places.len(), "nearby places updated");
                    model.set_places(kind, found.places);
                    if !found.text.is_empty() {
                        model.set_trip_info(RouteInfo::text_only(found.text));
                    }
                }
            }
            Event::RouteDetailsReceived(result) => {
                if let Some(info) = settle(model, RequestKind::RouteDetails, result) {
                    model.set_trip_info(info);
                }
            }
            Event::TrafficReceived(result) => {
                if let Some(info) = settle(model, RequestKind::Traffic, result) {
                    model.set_traffic_info(info);
                }
            }
            Event::BrandingGenerated(image) => {
                model.finish_request(RequestKind::Branding);
                let image = match image {
                    Some(bytes) => BrandingImage::Generated(bytes),
                    None => BrandingImage::Fallback(model.config.splash_fallback_image_url.clone()),
                };
                model.set_branding(image);
            }
        }

        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        views::build(model)
    }
}

/// Marks `kind` in flight and sends it. A request that cannot even be
/// built is cleared again at once; returns whether it went out.
fn issue<F>(model: &mut Model, caps: &Capabilities, kind: RequestKind, send: F) -> bool
where
    F: FnOnce(&Gateway<'_>) -> Result<(), GatewayError>,
{
    model.begin_request(kind);
    let sent = send(&Gateway::new(&caps.http, &model.config.gateway));
    match sent {
        Ok(()) => true,
        Err(e) => {
            model.finish_request(kind);
            log_failure(kind, &e);
            false
        }
    }
}

/// Clears `kind` from the ledger and unwraps the result, logging failures.
/// Previously displayed data is never touched on the error path.
fn settle<T>(model: &mut Model, kind: RequestKind, result: Result<T, GatewayError>) -> Option<T> {
    if !model.finish_request(kind) {
        debug!(op = kind.as_str(), "result arrived with no matching request");
    }
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log_failure(kind, &e);
            None
        }
    }
}

fn log_failure(kind: RequestKind, e: &GatewayError) {
    warn!(
        op = kind.as_str(),
        code = e.kind().code(),
        retryable = e.is_retryable(),
        error = %e,
        "gateway request failed"
    );
}

fn blocked(action: &'static str, e: &ValidationError) {
    debug!(action, code = e.kind().code(), reason = %e, "submission blocked");
}

const fn request_kind_for(kind: PlaceKind) -> RequestKind {
    match kind {
        PlaceKind::GasStation => RequestKind::GasStations,
        PlaceKind::RepairShop => RequestKind::RepairShops,
    }
}

fn current_coordinate(model: &Model) -> Result<Coordinate, ValidationError> {
    model
        .location
        .map(|l| l.coordinate())
        .ok_or(ValidationError::LocationPending)
}

fn health_submission(model: &Model) -> Result<String, ValidationError> {
    let query = model.health_query.trim();
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }
    if model.is_loading() {
        return Err(ValidationError::Busy);
    }
    Ok(query.to_string())
}

fn trip_submission(model: &Model) -> Result<(Coordinate, String), ValidationError> {
    let at = current_coordinate(model)?;
    let destination = model.destination.trim();
    if destination.is_empty() {
        return Err(ValidationError::EmptyDestination);
    }
    if model.is_loading() {
        return Err(ValidationError::Busy);
    }
    Ok((at, destination.to_string()))
}

fn search_nearby(model: &mut Model, caps: &Capabilities, kind: PlaceKind) {
    match current_coordinate(model) {
        Ok(at) => {
            issue(model, caps, request_kind_for(kind), |gw| gw.find_nearby(kind, at));
        }
        Err(e) => blocked("nearby_search", &e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{Location, LocationSource};

    fn located(model: &mut Model) {
        model.set_location(Location {
            lat: 13.7563,
            lng: 100.5018,
            source: LocationSource::Device,
        });
    }

    #[test]
    fn health_submission_rules() {
        let mut model = Model::default();
        assert_eq!(health_submission(&model), Err(ValidationError::EmptyQuery));
        model.health_query = "  engine stalls  ".into();
        assert_eq!(health_submission(&model).as_deref(), Ok("engine stalls"));
        model.begin_request(RequestKind::GasStations);
        assert_eq!(health_submission(&model), Err(ValidationError::Busy));
    }

    #[test]
    fn trip_submission_rules() {
        let mut model = Model::default();
        model.set_destination("Siam");
        assert_eq!(
            trip_submission(&model).map(|_| ()),
            Err(ValidationError::LocationPending)
        );
        located(&mut model);
        model.set_destination("   ");
        assert_eq!(
            trip_submission(&model).map(|_| ()),
            Err(ValidationError::EmptyDestination)
        );
        model.set_destination(" Siam ");
        let (_, destination) = trip_submission(&model).unwrap();
        assert_eq!(destination, "Siam");
    }

    #[test]
    fn settle_keeps_ledger_balanced_on_failure() {
        let mut model = Model::default();
        model.begin_request(RequestKind::Traffic);
        let out: Option<RouteInfo> = settle(
            &mut model,
            RequestKind::Traffic,
            Err(GatewayError::EmptyResponse),
        );
        assert!(out.is_none());
        assert!(!model.is_loading());
    }
}
