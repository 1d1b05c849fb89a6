use geojson::{Feature, FeatureCollection, Geometry, JsonObject, Value as GeoValue};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::location::{Coordinate, LocationSource};
use crate::model::{MapLink, Model, Place};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerKind {
    CurrentLocation,
    Selection,
    GasStation,
    RepairShop,
}

impl MarkerKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::CurrentLocation => "current_location",
            Self::Selection => "selection",
            Self::GasStation => "gas_station",
            Self::RepairShop => "repair_shop",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub kind: MarkerKind,
    pub lat: f64,
    pub lng: f64,
    pub label: String,
    pub detail: Option<String>,
    pub uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoutePanelKind {
    Trip,
    Traffic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePanel {
    pub kind: RoutePanelKind,
    pub text: String,
    pub links: Vec<MapLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center: Option<Coordinate>,
    pub using_fallback_location: bool,
    pub locating: bool,
    pub pending_selection: Option<Coordinate>,
    pub markers: Vec<MapMarker>,
    /// Same markers as a GeoJSON `FeatureCollection`, for web map widgets.
    pub markers_geojson: String,
    pub destination: String,
    pub can_plan_trip: bool,
    pub can_search_nearby: bool,
    pub stations: Vec<Place>,
    pub repair_shops: Vec<Place>,
    pub route_panel: Option<RoutePanel>,
}

// Grounded place results carry no coordinates, so their pins sit on the
// user's own position.
fn place_markers(kind: MarkerKind, places: &[Place], at: Coordinate) -> impl Iterator<Item = MapMarker> + '_ {
    places.iter().map(move |p| MapMarker {
        kind,
        lat: at.lat,
        lng: at.lng,
        label: p.name.clone(),
        detail: Some(p.address.clone()),
        uri: p.uri.clone(),
    })
}

#[must_use]
pub fn markers(model: &Model) -> Vec<MapMarker> {
    let mut out = Vec::new();
    let here = model.location.map(|l| l.coordinate());

    if let Some(at) = here {
        out.push(MapMarker {
            kind: MarkerKind::CurrentLocation,
            lat: at.lat,
            lng: at.lng,
            label: String::new(),
            detail: None,
            uri: None,
        });
        out.extend(place_markers(MarkerKind::GasStation, &model.stations, at));
        out.extend(place_markers(MarkerKind::RepairShop, &model.repair_shops, at));
    }

    if let Some(selection) = model.pending_selection {
        out.push(MapMarker {
            kind: MarkerKind::Selection,
            lat: selection.lat,
            lng: selection.lng,
            label: model.destination.clone(),
            detail: None,
            uri: None,
        });
    }

    out
}

#[must_use]
pub fn to_geojson(markers: &[MapMarker]) -> FeatureCollection {
    let features = markers
        .iter()
        .map(|m| {
            let mut properties = JsonObject::new();
            properties.insert("kind".to_string(), json!(m.kind.as_str()));
            properties.insert("label".to_string(), json!(m.label));
            if let Some(detail) = &m.detail {
                properties.insert("detail".to_string(), json!(detail));
            }
            if let Some(uri) = &m.uri {
                properties.insert("uri".to_string(), json!(uri));
            }
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(GeoValue::Point(vec![m.lng, m.lat]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn route_panel(model: &Model) -> Option<RoutePanel> {
    let (kind, info) = if model.traffic_active {
        (RoutePanelKind::Traffic, model.traffic_info.as_ref()?)
    } else {
        (RoutePanelKind::Trip, model.trip_info.as_ref()?)
    };
    Some(RoutePanel {
        kind,
        text: info.text.clone(),
        links: info.links.clone(),
    })
}

#[must_use]
pub fn view(model: &Model) -> MapView {
    let markers = markers(model);
    let markers_geojson = serde_json::to_string(&to_geojson(&markers)).unwrap_or_default();
    let idle_with_location = model.location.is_some() && !model.is_loading();

    MapView {
        center: model.location.map(|l| l.coordinate()),
        using_fallback_location: model
            .location
            .is_some_and(|l| l.source == LocationSource::Fallback),
        locating: model.location.is_none(),
        pending_selection: model.pending_selection,
        markers,
        markers_geojson,
        destination: model.destination.clone(),
        can_plan_trip: idle_with_location && !model.destination.trim().is_empty(),
        // Searches may overlap other requests; each writes its own list.
        can_search_nearby: model.location.is_some(),
        stations: model.stations.clone(),
        repair_shops: model.repair_shops.clone(),
        route_panel: route_panel(model),
    }
}
