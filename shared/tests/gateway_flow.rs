use assert_matches::assert_matches;
use beamcheck_shared::model::{Place, RequestKind};
use beamcheck_shared::{
    AppConfig, Effect, Event, GatewayError, Location, LocationSource, Model,
    NO_ADDRESS_PLACEHOLDER,
};
use crux_core::testing::AppTester;
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use serde_json::{json, Value};

type Tester = AppTester<beamcheck_shared::App, Effect>;

const FUEL_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent";
const TEXT_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

fn config() -> AppConfig {
    AppConfig::from_json(br#"{"gateway":{"api_key":"test-key"}}"#).expect("valid config")
}

fn http_requests(effects: Vec<Effect>) -> Vec<Request<HttpRequest>> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .collect()
}

fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case(name))
        .map(|h| h.value.as_str())
}

/// Starts the app and returns the pending fuel price request.
fn started() -> (Tester, Model, Request<HttpRequest>) {
    let app = Tester::default();
    let mut model = Model::default();
    let update = app.update(Event::AppStarted(Box::new(config())), &mut model);
    let fuel = http_requests(update.effects)
        .into_iter()
        .find(|r| r.operation.url == FUEL_URL)
        .expect("fuel price request");
    (app, model, fuel)
}

/// Resolves `request` and returns the events it produced, without applying them.
fn respond(app: &Tester, request: &mut Request<HttpRequest>, response: HttpResponse) -> Vec<Event> {
    app.resolve(request, HttpResult::Ok(response))
        .expect("request resolves")
        .events
}

fn apply(app: &Tester, model: &mut Model, events: Vec<Event>) {
    for event in events {
        app.update(event, model);
    }
}

#[test]
fn fuel_request_posts_to_structured_model_with_key() {
    let (_app, _model, fuel) = started();
    let request = &fuel.operation;

    assert_eq!(request.method, "POST");
    assert_eq!(request.url, FUEL_URL);
    assert_eq!(header(request, "x-goog-api-key"), Some("test-key"));
    assert!(header(request, "x-request-id").is_some_and(|id| !id.is_empty()));

    let body: Value = serde_json::from_slice(&request.body).expect("json body");
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        json!("application/json")
    );
}

#[test]
fn server_error_surfaces_backend_message_and_keeps_prices() {
    let (app, mut model, mut fuel) = started();
    model.set_fuel_prices(vec![beamcheck_shared::model::FuelPrice {
        fuel_type: "E20".into(),
        price: 33.0,
    }]);

    let events = respond(
        &app,
        &mut fuel,
        HttpResponse::status(500)
            .json(json!({"error": {"code": 500, "message": "backend overloaded", "status": "INTERNAL"}}))
            .build(),
    );
    assert_matches!(
        &events[..],
        [Event::FuelPricesFetched(Err(GatewayError::Status { code: 500, message }))]
            if message == "backend overloaded"
    );

    apply(&app, &mut model, events);
    assert_eq!(model.fuel_prices.len(), 1);
    assert!(!model.is_in_flight(RequestKind::FuelPrices));
}

#[test]
fn malformed_fuel_body_empties_the_list() {
    let (app, mut model, mut fuel) = started();
    model.set_fuel_prices(vec![beamcheck_shared::model::FuelPrice {
        fuel_type: "E20".into(),
        price: 33.0,
    }]);

    let events = respond(
        &app,
        &mut fuel,
        HttpResponse::ok()
            .json(json!({"candidates": [{"content": {"parts": [{"text": "prices unavailable today"}]}}]}))
            .build(),
    );
    assert_matches!(&events[..], [Event::FuelPricesFetched(Ok(prices))] if prices.is_empty());

    apply(&app, &mut model, events);
    assert!(model.fuel_prices.is_empty());
}

#[test]
fn well_formed_fuel_body_replaces_the_list() {
    let (app, mut model, mut fuel) = started();
    let text = r#"[{"type":"แก๊สโซฮอล์ 95","price":35.45},{"type":"ดีเซล","price":32.94}]"#;

    let events = respond(
        &app,
        &mut fuel,
        HttpResponse::ok()
            .json(json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}))
            .build(),
    );
    apply(&app, &mut model, events);

    let types: Vec<_> = model.fuel_prices.iter().map(|p| p.fuel_type.as_str()).collect();
    assert_eq!(types, ["แก๊สโซฮอล์ 95", "ดีเซล"]);
}

#[test]
fn grounded_places_body_fills_station_list() {
    let app = Tester::default();
    let mut model = Model::new(config());
    model.set_location(Location {
        lat: 13.7563,
        lng: 100.5018,
        source: LocationSource::Device,
    });

    let update = app.update(Event::GasStationsRequested, &mut model);
    let mut requests = http_requests(update.effects);
    assert_eq!(requests.len(), 1);
    let mut search = requests.remove(0);

    assert_eq!(search.operation.url, TEXT_URL);
    let body: Value = serde_json::from_slice(&search.operation.body).expect("json body");
    assert_eq!(body["tools"], json!([{"googleMaps": {}}]));
    assert_eq!(
        body["toolConfig"]["retrievalConfig"]["latLng"],
        json!({"latitude": 13.7563, "longitude": 100.5018})
    );

    let events = respond(
        &app,
        &mut search,
        HttpResponse::ok()
            .json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "Two stations within 2 km"}]},
                    "groundingMetadata": {"groundingChunks": [
                        {"maps": {"title": "PTT Rama IV", "address": "Rama IV Rd", "uri": "https://maps.google.com/?cid=1"}},
                        {"maps": {"title": "Shell Silom"}},
                        {"web": {"title": "blog", "uri": "https://blog.invalid"}}
                    ]}
                }]
            }))
            .build(),
    );
    apply(&app, &mut model, events);

    assert_eq!(
        model.stations,
        vec![
            Place {
                name: "PTT Rama IV".into(),
                address: "Rama IV Rd".into(),
                uri: Some("https://maps.google.com/?cid=1".into()),
                rating: None,
            },
            Place {
                name: "Shell Silom".into(),
                address: NO_ADDRESS_PLACEHOLDER.into(),
                uri: None,
                rating: None,
            },
        ]
    );
    assert_eq!(
        model.trip_info.as_ref().map(|t| t.text.as_str()),
        Some("Two stations within 2 km")
    );
    assert!(!model.is_loading());
}
