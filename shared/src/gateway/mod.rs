//! Client for the generative-AI backend.
//!
//! Every operation is one `generateContent` call. The client is stateless:
//! it builds the request, hands it to the shell through [`crux_http`], and
//! decodes the body into a typed result carried back by an [`Event`].

pub mod decode;
pub mod requests;
pub mod wire;

use crux_http::Http;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::event::Event;
use crate::location::Coordinate;
use crate::model::{Place, PlaceKind, RequestKind};
use wire::GenerateContentRequest;

/// Narrative plus the places extracted from grounding citations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacesResult {
    pub text: String,
    pub places: Vec<Place>,
}

type HttpResult = crux_http::Result<crux_http::Response<Vec<u8>>>;

/// Collapses transport and status failures into [`GatewayError`], leaving
/// the raw body of a 2xx response for the decoders.
///
/// `crux_http` reports 4xx/5xx replies as `Error::Http` carrying the body,
/// so the backend's `error.message` is recovered from there.
pub fn into_body(result: HttpResult) -> Result<Vec<u8>, GatewayError> {
    let mut response = match result {
        Ok(response) => response,
        Err(crux_http::Error::Http(e)) => {
            let body = e.body.unwrap_or_default();
            return Err(GatewayError::from_status(u16::from(e.code), &body));
        }
        Err(e) => return Err(GatewayError::Network(e.to_string())),
    };
    let status = response.status();
    let body = response.take_body().unwrap_or_default();
    if !status.is_success() {
        return Err(GatewayError::from_status(u16::from(status), &body));
    }
    Ok(body)
}

pub struct Gateway<'a> {
    http: &'a Http<Event>,
    config: &'a GatewayConfig,
}

impl<'a> Gateway<'a> {
    #[must_use]
    pub const fn new(http: &'a Http<Event>, config: &'a GatewayConfig) -> Self {
        Self { http, config }
    }

    fn endpoint(&self, model: &str) -> Result<String, GatewayError> {
        let base = self
            .config
            .validate()
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        Ok(base.join_path(&format!("v1beta/models/{model}:generateContent")))
    }

    fn send<F>(
        &self,
        kind: RequestKind,
        model: &str,
        request: &GenerateContentRequest,
        make_event: F,
    ) -> Result<(), GatewayError>
    where
        F: FnOnce(Result<Vec<u8>, GatewayError>) -> Event + Send + 'static,
    {
        let url = self.endpoint(model)?;
        let body = serde_json::to_vec(request)
            .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        if !self.config.has_api_key() {
            warn!(op = kind.as_str(), "gateway API key is not configured");
        }

        let request_id = Uuid::new_v4();
        debug!(%request_id, op = kind.as_str(), model, "sending gateway request");

        self.http
            .post(url)
            .body(body)
            .header("content-type", "application/json")
            .header("x-goog-api-key", self.config.api_key.expose_secret().as_str())
            .header("x-request-id", request_id.to_string())
            .send(move |result| make_event(into_body(result)));
        Ok(())
    }

    pub fn fetch_fuel_prices(&self) -> Result<(), GatewayError> {
        self.send(
            RequestKind::FuelPrices,
            &self.config.structured_model,
            &requests::fuel_prices(),
            |body| Event::FuelPricesFetched(body.map(|b| decode::fuel_prices(&b))),
        )
    }

    pub fn triage_symptoms(&self, symptoms: &str) -> Result<(), GatewayError> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(GatewayError::InvalidRequest("symptoms are empty".into()));
        }
        self.send(
            RequestKind::HealthTriage,
            &self.config.structured_model,
            &requests::symptom_triage(symptoms),
            |body| Event::HealthTriaged(body.and_then(|b| decode::triage(&b))),
        )
    }

    pub fn reverse_geocode(&self, at: Coordinate) -> Result<(), GatewayError> {
        self.send(
            RequestKind::ReverseGeocode,
            &self.config.text_model,
            &requests::reverse_geocode(at),
            move |body| Event::DestinationGeocoded {
                at,
                result: body.and_then(|b| decode::place_name(&b)),
            },
        )
    }

    pub fn find_nearby(&self, kind: PlaceKind, at: Coordinate) -> Result<(), GatewayError> {
        let (request_kind, request) = match kind {
            PlaceKind::GasStation => (RequestKind::GasStations, requests::nearby_gas_stations(at)),
            PlaceKind::RepairShop => (RequestKind::RepairShops, requests::nearby_repair_shops(at)),
        };
        self.send(request_kind, &self.config.text_model, &request, move |body| {
            Event::PlacesFound {
                kind,
                result: body.and_then(|b| decode::places(&b)),
            }
        })
    }

    pub fn route_details(&self, at: Coordinate, destination: &str) -> Result<(), GatewayError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(GatewayError::InvalidRequest("destination is empty".into()));
        }
        self.send(
            RequestKind::RouteDetails,
            &self.config.text_model,
            &requests::route_details(at, destination),
            |body| Event::RouteDetailsReceived(body.and_then(|b| decode::route(&b))),
        )
    }

    pub fn traffic_analysis(&self, at: Coordinate) -> Result<(), GatewayError> {
        self.send(
            RequestKind::Traffic,
            &self.config.text_model,
            &requests::traffic_analysis(at),
            |body| Event::TrafficReceived(body.and_then(|b| decode::route(&b))),
        )
    }

    pub fn generate_branding(&self) -> Result<(), GatewayError> {
        self.send(
            RequestKind::Branding,
            &self.config.image_model,
            &requests::branding(),
            |body| {
                Event::BrandingGenerated(match body {
                    Ok(b) => decode::branding(&b),
                    Err(e) => {
                        warn!(error = %e, code = e.kind().code(), "branding generation failed");
                        None
                    }
                })
            },
        )
    }
}
