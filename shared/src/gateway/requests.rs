use serde_json::{json, Value};

use super::wire::GenerateContentRequest;
use crate::location::Coordinate;

pub const SPLASH_ASPECT_RATIO: &str = "9:16";

/// Grades requested from the price lookup, in display order.
pub const FUEL_GRADES: [&str; 4] = ["Gasohol 95", "Gasohol 91", "E20", "Diesel"];

#[must_use]
pub fn fuel_prices() -> GenerateContentRequest {
    let prompt = format!(
        "Give the latest retail fuel prices in Thailand (Bangkok) in baht per litre for {}. \
         Answer as JSON; use the Thai grade names for `type`.",
        FUEL_GRADES.join(", ")
    );
    GenerateContentRequest::prompt(prompt).with_json_schema(fuel_price_schema())
}

fn fuel_price_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "type": {"type": "STRING"},
                "price": {"type": "NUMBER"}
            },
            "required": ["type", "price"]
        }
    })
}

#[must_use]
pub fn symptom_triage(symptoms: &str) -> GenerateContentRequest {
    let prompt = format!(
        "Analyse the following car or motorcycle symptoms and give first-line advice: \"{symptoms}\". \
         Answer in Thai as JSON with the likely causes, a severity of ต่ำ, กลาง or สูง, and what to do."
    );
    GenerateContentRequest::prompt(prompt).with_json_schema(triage_schema())
}

fn triage_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysis": {"type": "STRING"},
            "possibleCauses": {"type": "ARRAY", "items": {"type": "STRING"}},
            "severity": {"type": "STRING", "description": "ต่ำ, กลาง หรือ สูง"},
            "advice": {"type": "STRING"}
        },
        "required": ["analysis", "possibleCauses", "severity", "advice"]
    })
}

#[must_use]
pub fn reverse_geocode(at: Coordinate) -> GenerateContentRequest {
    GenerateContentRequest::prompt(
        "What place is at the current coordinates? Reply with a short place name only, in Thai.",
    )
    .grounded_at(at)
}

#[must_use]
pub fn nearby_gas_stations(at: Coordinate) -> GenerateContentRequest {
    GenerateContentRequest::prompt("Find the nearest petrol stations. Reply in Thai.")
        .grounded_at(at)
}

#[must_use]
pub fn nearby_repair_shops(at: Coordinate) -> GenerateContentRequest {
    GenerateContentRequest::prompt(
        "Find nearby car and motorcycle repair shops and service centres. Reply in Thai.",
    )
    .grounded_at(at)
}

#[must_use]
pub fn route_details(at: Coordinate, destination: &str) -> GenerateContentRequest {
    let prompt = format!(
        "Estimate the driving distance and ETA from the current position to \"{destination}\". Reply in Thai."
    );
    GenerateContentRequest::prompt(prompt).grounded_at(at)
}

#[must_use]
pub fn traffic_analysis(at: Coordinate) -> GenerateContentRequest {
    GenerateContentRequest::prompt(
        "Report the latest traffic conditions around this area. Summarise in Thai.",
    )
    .grounded_at(at)
}

#[must_use]
pub fn branding() -> GenerateContentRequest {
    GenerateContentRequest::prompt(
        "A sleek, modern, minimalist splash screen for a premium automotive assistant app called \
         'BeamCheck'. It must show BOTH a futuristic car silhouette AND a sleek motorcycle \
         silhouette together. Deep blue and glowing cyan palette. 4K quality.",
    )
    .with_aspect_ratio(SPLASH_ASPECT_RATIO)
}
