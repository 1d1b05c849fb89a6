use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;
use tracing::{debug, warn};

use super::wire::{GenerateContentResponse, GroundingChunk};
use super::PlacesResult;
use crate::error::GatewayError;
use crate::model::{FuelPrice, HealthResult, MapLink, Place, RouteInfo, Severity};
use crate::{MAX_BRANDING_IMAGE_BYTES, NO_ADDRESS_PLACEHOLDER};

const UNTITLED_LINK: &str = "Google Maps";

fn envelope(body: &[u8]) -> Result<GenerateContentResponse, GatewayError> {
    Ok(serde_json::from_slice(body)?)
}

/// Models occasionally wrap JSON in a Markdown fence even when asked not to.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Never fails: anything unparseable yields an empty list.
#[must_use]
pub fn fuel_prices(body: &[u8]) -> Vec<FuelPrice> {
    #[derive(Deserialize)]
    struct Entry {
        #[serde(rename = "type")]
        fuel_type: String,
        price: f64,
    }

    let text = match envelope(body).map(|r| r.text()) {
        Ok(Some(text)) => text,
        Ok(None) => {
            debug!("fuel price response carried no text");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "fuel price envelope unreadable");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Entry>>(strip_code_fence(&text)) {
        Ok(entries) => entries
            .into_iter()
            .filter(|e| e.price.is_finite() && e.price >= 0.0 && !e.fuel_type.trim().is_empty())
            .map(|e| FuelPrice {
                fuel_type: e.fuel_type.trim().to_string(),
                price: e.price,
            })
            .collect(),
        Err(e) => {
            warn!(error = %e, "fuel price payload did not match schema");
            Vec::new()
        }
    }
}

pub fn triage(body: &[u8]) -> Result<HealthResult, GatewayError> {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Wire {
        analysis: Option<String>,
        possible_causes: Option<Vec<String>>,
        severity: Option<String>,
        advice: Option<String>,
    }

    let text = envelope(body)?.text().ok_or(GatewayError::EmptyResponse)?;
    let wire: Wire = serde_json::from_str(strip_code_fence(&text))?;

    let missing = |field: &str| GatewayError::MissingField(field.to_string());
    let analysis = wire.analysis.ok_or_else(|| missing("analysis"))?;
    let possible_causes = wire.possible_causes.ok_or_else(|| missing("possibleCauses"))?;
    let label = wire.severity.ok_or_else(|| missing("severity"))?;
    let advice = wire.advice.ok_or_else(|| missing("advice"))?;

    let severity = Severity::from_label(&label)
        .ok_or_else(|| GatewayError::Malformed(format!("unknown severity `{label}`")))?;

    Ok(HealthResult {
        analysis,
        possible_causes,
        severity,
        advice,
    })
}

pub fn place_name(body: &[u8]) -> Result<String, GatewayError> {
    let text = envelope(body)?.text().ok_or(GatewayError::EmptyResponse)?;
    let name = text.trim();
    if name.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(name.to_string())
}

fn place_from_chunk(chunk: &GroundingChunk) -> Option<Place> {
    let maps = chunk.maps.as_ref()?;
    let name = maps.title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
    let address = maps
        .address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(NO_ADDRESS_PLACEHOLDER);

    Some(Place {
        name: name.to_string(),
        address: address.to_string(),
        uri: maps.uri.clone(),
        rating: maps.rating.filter(|r| r.is_finite()),
    })
}

pub fn places(body: &[u8]) -> Result<PlacesResult, GatewayError> {
    let response = envelope(body)?;
    let places = response
        .grounding_chunks()
        .iter()
        .filter_map(place_from_chunk)
        .collect();

    Ok(PlacesResult {
        text: response.text().unwrap_or_default().trim().to_string(),
        places,
    })
}

/// Route and traffic narratives. An answer with neither text nor links is
/// treated as a failure so the previous panel stays up.
pub fn route(body: &[u8]) -> Result<RouteInfo, GatewayError> {
    let response = envelope(body)?;
    let links: Vec<MapLink> = response
        .grounding_chunks()
        .iter()
        .filter_map(|chunk| {
            let maps = chunk.maps.as_ref()?;
            let uri = maps.uri.clone()?;
            Some(MapLink {
                title: maps
                    .title
                    .clone()
                    .unwrap_or_else(|| UNTITLED_LINK.to_string()),
                uri,
            })
        })
        .collect();
    let text = response.text().unwrap_or_default().trim().to_string();

    if text.is_empty() && links.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }
    Ok(RouteInfo { text, links })
}

/// Best effort: `None` for any failure.
#[must_use]
pub fn branding(body: &[u8]) -> Option<Vec<u8>> {
    let response = match envelope(body) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "branding envelope unreadable");
            return None;
        }
    };
    let inline = response.inline_data()?;

    let bytes = match BASE64.decode(inline.data.trim()) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "branding image is not valid base64");
            return None;
        }
    };
    if bytes.is_empty() || bytes.len() > MAX_BRANDING_IMAGE_BYTES {
        warn!(len = bytes.len(), "branding image size rejected");
        return None;
    }
    match image::guess_format(&bytes) {
        Ok(format) => {
            debug!(?format, len = bytes.len(), "branding image decoded");
            Some(bytes)
        }
        Err(e) => {
            warn!(error = %e, mime = %inline.mime_type, "branding payload is not an image");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn text_body(text: &str) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
        }))
        .unwrap()
    }

    fn grounded_body(text: Option<&str>, chunks: serde_json::Value) -> Vec<u8> {
        let parts = text.map_or_else(|| json!([]), |t| json!([{"text": t}]));
        serde_json::to_vec(&json!({
            "candidates": [{
                "content": {"parts": parts},
                "groundingMetadata": {"groundingChunks": chunks}
            }]
        }))
        .unwrap()
    }

    #[test]
    fn fuel_prices_parse_schema_array() {
        let body = text_body(r#"[{"type":"แก๊สโซฮอล์ 95","price":35.45},{"type":"ดีเซล","price":32.94}]"#);
        let prices = fuel_prices(&body);
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].fuel_type, "แก๊สโซฮอล์ 95");
        assert!((prices[1].price - 32.94).abs() < 1e-9);
    }

    #[test]
    fn fuel_prices_tolerate_code_fence() {
        let body = text_body("```json\n[{\"type\":\"E20\",\"price\":33.1}]\n```");
        assert_eq!(fuel_prices(&body).len(), 1);
    }

    #[test]
    fn malformed_fuel_prices_degrade_to_empty() {
        assert!(fuel_prices(&text_body("not json at all")).is_empty());
        assert!(fuel_prices(&text_body(r#"{"type":"E20","price":1}"#)).is_empty());
        assert!(fuel_prices(&text_body(r#"[{"type":"E20"}]"#)).is_empty());
        assert!(fuel_prices(b"<html>").is_empty());
        assert!(fuel_prices(b"{}").is_empty());
    }

    #[test]
    fn triage_maps_localized_severity() {
        let body = text_body(
            &json!({
                "analysis": "แบตเตอรี่เสื่อม",
                "possibleCauses": ["แบตเตอรี่หมดอายุ", "ไดชาร์จเสีย"],
                "severity": "กลาง",
                "advice": "ตรวจเช็คแบตเตอรี่"
            })
            .to_string(),
        );
        let result = triage(&body).unwrap();
        assert_eq!(result.severity, Severity::Medium);
        assert_eq!(result.possible_causes.len(), 2);
    }

    #[test]
    fn triage_missing_field_is_an_error() {
        let body = text_body(r#"{"analysis":"x","possibleCauses":[],"severity":"สูง"}"#);
        assert_matches!(triage(&body), Err(GatewayError::MissingField(f)) if f == "advice");
    }

    #[test]
    fn triage_unknown_severity_is_an_error() {
        let body = text_body(r#"{"analysis":"x","possibleCauses":[],"severity":"extreme","advice":"y"}"#);
        assert_matches!(triage(&body), Err(GatewayError::Malformed(_)));
    }

    #[test]
    fn triage_without_text_is_empty_response() {
        assert_matches!(triage(b"{}"), Err(GatewayError::EmptyResponse));
    }

    #[test]
    fn place_name_is_trimmed() {
        assert_eq!(place_name(&text_body("  อนุสาวรีย์ชัยสมรภูมิ \n")).unwrap(), "อนุสาวรีย์ชัยสมรภูมิ");
        assert_matches!(place_name(&text_body("   ")), Err(GatewayError::EmptyResponse));
    }

    #[test]
    fn places_keep_only_maps_chunks() {
        let body = grounded_body(
            Some("Nearby stations"),
            json!([
                {"maps": {"title": "PTT Rama 4", "uri": "https://maps.google.com/?cid=1", "address": "Rama IV Rd"}},
                {"web": {"title": "blog", "uri": "https://example.com"}},
                {"maps": {"title": "Shell Silom", "uri": "https://maps.google.com/?cid=2"}},
                {"maps": {"uri": "https://maps.google.com/?cid=3"}}
            ]),
        );
        let result = places(&body).unwrap();
        assert_eq!(result.text, "Nearby stations");
        assert_eq!(result.places.len(), 2);
        assert_eq!(result.places[0].address, "Rama IV Rd");
        assert_eq!(result.places[1].name, "Shell Silom");
        assert_eq!(result.places[1].address, NO_ADDRESS_PLACEHOLDER);
    }

    #[test]
    fn places_without_chunks_is_an_empty_list() {
        let result = places(&grounded_body(Some("none found"), json!([]))).unwrap();
        assert!(result.places.is_empty());
        assert_matches!(places(b"garbage"), Err(GatewayError::Malformed(_)));
    }

    #[test]
    fn route_links_are_ordered_maps_uris() {
        let body = grounded_body(
            Some("15 km, about 35 minutes"),
            json!([
                {"maps": {"title": "Central World", "uri": "https://maps.google.com/?cid=9"}},
                {"web": {"uri": "https://example.com"}},
                {"maps": {"uri": "https://maps.google.com/?cid=10"}}
            ]),
        );
        let info = route(&body).unwrap();
        assert_eq!(info.text, "15 km, about 35 minutes");
        assert_eq!(
            info.links.iter().map(|l| l.uri.as_str()).collect::<Vec<_>>(),
            ["https://maps.google.com/?cid=9", "https://maps.google.com/?cid=10"]
        );
        assert_eq!(info.links[1].title, UNTITLED_LINK);
    }

    #[test]
    fn route_with_text_and_no_links_is_valid() {
        let info = route(&grounded_body(Some("light traffic"), json!([]))).unwrap();
        assert!(info.links.is_empty());
        assert_matches!(route(&grounded_body(None, json!([]))), Err(GatewayError::EmptyResponse));
    }

    #[test]
    fn branding_decodes_png_inline_data() {
        let png = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0x0d];
        let body = serde_json::to_vec(&json!({
            "candidates": [{"content": {"parts": [
                {"text": "here you go"},
                {"inlineData": {"mimeType": "image/png", "data": BASE64.encode(png)}}
            ]}}]
        }))
        .unwrap();
        assert_eq!(branding(&body), Some(png.to_vec()));
    }

    #[test]
    fn branding_failures_are_none() {
        assert_eq!(branding(&text_body("no image")), None);
        let not_image = serde_json::to_vec(&json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": BASE64.encode(b"hello world")}}
            ]}}]
        }))
        .unwrap();
        assert_eq!(branding(&not_image), None);
        let bad_b64 = serde_json::to_vec(&json!({
            "candidates": [{"content": {"parts": [
                {"inlineData": {"mimeType": "image/png", "data": "%%%"}}
            ]}}]
        }))
        .unwrap();
        assert_eq!(branding(&bad_b64), None);
    }
}
