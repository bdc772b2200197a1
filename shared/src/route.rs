//! Drawing and persisting routes from the map screen.
//!
//! The map's directions control reports computed routes; saving one
//! reverse-geocodes both waypoints into place names and posts
//! `{Origen, Destino, Distancia}` to the backend.

use serde::Deserialize;

use crate::error::{ApiError, RouteError};
use crate::models::{NuevaRuta, RutaCreada, RutaRechazada};

/// Longest place name accepted by the route table.
pub const MAX_PLACE_NAME: usize = 190;
/// Place names longer than this are shortened before anything else.
const LONG_PLACE_NAME: usize = 100;
/// How long the "saved" banner stays up.
pub const SAVED_MESSAGE_MS: u32 = 8_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// `25.6726, -108.2426`
    pub fn label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

// ============================================
// Directions payload
// ============================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RouteLeg {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DirectionsRoute {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// Payload of the directions control's `route` event.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RouteEvent {
    #[serde(default)]
    pub route: Vec<DirectionsRoute>,
}

impl RouteEvent {
    pub fn first_route(&self) -> Option<ComputedRoute> {
        self.route.first().map(ComputedRoute::from)
    }
}

/// Distance and duration of the route currently drawn on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedRoute {
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

impl From<&DirectionsRoute> for ComputedRoute {
    fn from(route: &DirectionsRoute) -> Self {
        match route.legs.first() {
            Some(leg) => Self {
                distance: leg.distance,
                duration: leg.duration,
            },
            None => Self {
                distance: route.distance,
                duration: route.duration,
            },
        }
    }
}

impl ComputedRoute {
    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }

    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.distance_km())
    }

    pub fn duration_label(&self) -> String {
        format!("{} min", (self.duration / 60.0).round())
    }
}

/// Kilometers rounded to two decimals, as stored by the backend.
pub fn round_distance(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

// ============================================
// State machine
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RouteState {
    #[default]
    Idle,
    Computed(ComputedRoute),
    Saving(ComputedRoute),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RouteAction {
    Computed(ComputedRoute),
    SaveStarted,
    SaveFinished { saved: bool },
    Cleared,
}

impl RouteState {
    pub fn route(&self) -> Option<&ComputedRoute> {
        match self {
            RouteState::Idle => None,
            RouteState::Computed(route) | RouteState::Saving(route) => Some(route),
        }
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, RouteState::Saving(_))
    }

    pub fn can_save(&self) -> bool {
        matches!(self, RouteState::Computed(_))
    }

    /// Route to persist, or why saving cannot start.
    pub fn savable(&self) -> Result<ComputedRoute, RouteError> {
        match self {
            RouteState::Idle => Err(RouteError::NoRoute),
            RouteState::Saving(_) => Err(RouteError::AlreadySaving),
            RouteState::Computed(route) => Ok(*route),
        }
    }

    /// Route events and clears that arrive while a save is running are
    /// dropped; a successful save returns to `Idle`, a failed one keeps the
    /// route.
    pub fn apply(self, action: RouteAction) -> Self {
        match (self, action) {
            (RouteState::Saving(route), RouteAction::Computed(_) | RouteAction::Cleared) => {
                RouteState::Saving(route)
            }
            (_, RouteAction::Computed(route)) => RouteState::Computed(route),
            (RouteState::Computed(route), RouteAction::SaveStarted) => RouteState::Saving(route),
            (RouteState::Saving(_), RouteAction::SaveFinished { saved: true }) => RouteState::Idle,
            (RouteState::Saving(route), RouteAction::SaveFinished { saved: false }) => {
                RouteState::Computed(route)
            }
            (_, RouteAction::Cleared) => RouteState::Idle,
            (state, _) => state,
        }
    }
}

// ============================================
// Reverse geocoding
// ============================================

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GeocodeFeature {
    #[serde(default)]
    pub place_name: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub features: Vec<GeocodeFeature>,
}

pub fn geocode_url(base_url: &str, access_token: &str, point: LngLat) -> String {
    format!(
        "{}/{},{}.json?access_token={}&limit=1&language=es&types=place,locality,neighborhood,address",
        base_url.trim_end_matches('/'),
        point.lng,
        point.lat,
        access_token
    )
}

/// Readable name for a geocoding feature.
///
/// Names over 100 characters fall back to the short `text`, and if that is
/// still too long to the first and last comma-separated parts of the full
/// name.
pub fn shorten_place_name(feature: &GeocodeFeature) -> String {
    let place_name = feature.place_name.as_deref().unwrap_or_default();
    let text = feature.text.as_deref().unwrap_or_default();

    let mut name = if place_name.is_empty() { text } else { place_name }.to_string();

    if name.chars().count() > LONG_PLACE_NAME {
        if !text.is_empty() {
            name = text.to_string();
        }
        if name.chars().count() > LONG_PLACE_NAME {
            let parts: Vec<&str> = place_name.split(',').collect();
            if let [first, .., last] = parts.as_slice() {
                name = format!("{}, {}", first.trim(), last.trim());
            }
        }
    }

    name.trim().to_string()
}

/// Cuts a place name to what the backend stores.
pub fn truncate_place_name(name: &str) -> String {
    name.chars().take(MAX_PLACE_NAME).collect()
}

// ============================================
// Saving
// ============================================

#[allow(async_fn_in_trait)]
pub trait Geocoder {
    async fn reverse(&self, point: LngLat) -> Result<GeocodeResponse, ApiError>;
}

#[allow(async_fn_in_trait)]
pub trait RouteSink {
    async fn create(&self, ruta: &NuevaRuta) -> Result<RutaCreada, RouteError>;
}

/// Place name for a waypoint, or its coordinates when the lookup fails or
/// finds nothing.
pub async fn resolve_place<G: Geocoder>(geocoder: &G, point: LngLat) -> String {
    match geocoder.reverse(point).await {
        Ok(response) => {
            let name = response
                .features
                .first()
                .map(shorten_place_name)
                .unwrap_or_default();
            if name.is_empty() {
                log::warn!("No place found for {}, using coordinates", point.label());
                point.label()
            } else {
                log::debug!("Resolved {} to {name}", point.label());
                name
            }
        }
        Err(e) => {
            log::warn!("Reverse geocoding failed for {}: {e}", point.label());
            point.label()
        }
    }
}

/// Error for a non-2xx answer from `Ruta/Nuevo`. Bodies that carry neither a
/// `mensaje` nor `errores` are reported verbatim.
pub fn rejection(body: &str) -> RouteError {
    let rechazo = serde_json::from_str::<RutaRechazada>(body)
        .ok()
        .filter(|r| r.mensaje.as_deref().is_some_and(|m| !m.trim().is_empty()) || !r.errores.is_empty())
        .unwrap_or_else(|| RutaRechazada {
            mensaje: (!body.trim().is_empty()).then(|| body.to_string()),
            errores: Vec::new(),
        });
    RouteError::Rejected {
        mensaje: rechazo.mensaje,
        errores: rechazo.errores,
    }
}

/// What the banner shows after a successful save.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedRoute {
    pub id: i64,
    pub ruta: NuevaRuta,
}

impl SavedRoute {
    pub fn message(&self) -> String {
        format!(
            "✅ Ruta guardada exitosamente (#{}): {} ➜ {} ({} km)",
            self.id, self.ruta.origen, self.ruta.destino, self.ruta.distancia
        )
    }
}

/// Builds the route record for a computed route and its waypoints.
pub async fn build_route<G: Geocoder>(
    geocoder: &G,
    route: &ComputedRoute,
    origin: Option<LngLat>,
    destination: Option<LngLat>,
) -> Result<NuevaRuta, RouteError> {
    let (Some(origin), Some(destination)) = (origin, destination) else {
        return Err(RouteError::MissingWaypoints);
    };

    let distancia = round_distance(route.distance_km());
    if distancia <= 0.0 {
        return Err(RouteError::InvalidDistance);
    }

    let (origen, destino) = futures::join!(
        resolve_place(geocoder, origin),
        resolve_place(geocoder, destination)
    );

    Ok(NuevaRuta {
        origen: truncate_place_name(&origen),
        destino: truncate_place_name(&destino),
        distancia,
    })
}

/// Geocodes the waypoints and persists the route.
pub async fn save_route<G: Geocoder, S: RouteSink>(
    geocoder: &G,
    sink: &S,
    route: &ComputedRoute,
    origin: Option<LngLat>,
    destination: Option<LngLat>,
) -> Result<SavedRoute, RouteError> {
    let ruta = build_route(geocoder, route, origin, destination).await?;
    log::info!(
        "Saving route {} -> {} ({} km)",
        ruta.origen,
        ruta.destino,
        ruta.distancia
    );
    let created = sink.create(&ruta).await?;
    Ok(SavedRoute {
        id: created.ruta_id,
        ruta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(place_name: &str, text: &str) -> GeocodeFeature {
        GeocodeFeature {
            place_name: Some(place_name.to_string()),
            text: Some(text.to_string()),
        }
    }

    #[test]
    fn short_names_are_kept() {
        let f = feature("Los Mochis, Sinaloa, México", "Los Mochis");
        assert_eq!(shorten_place_name(&f), "Los Mochis, Sinaloa, México");
    }

    #[test]
    fn long_names_fall_back_to_text() {
        let long = format!("Calle {}, Los Mochis, México", "x".repeat(120));
        let f = feature(&long, "Calle Independencia");
        assert_eq!(shorten_place_name(&f), "Calle Independencia");
    }

    #[test]
    fn long_text_uses_first_and_last_parts() {
        let long = format!("{}, Centro, Los Mochis, México", "y".repeat(40))
            + &", Sinaloa".repeat(10);
        let f = GeocodeFeature {
            place_name: Some(long.clone()),
            text: Some("z".repeat(101)),
        };
        assert_eq!(
            shorten_place_name(&f),
            format!("{}, Sinaloa", "y".repeat(40))
        );
    }

    #[test]
    fn coordinates_label_is_lat_first() {
        assert_eq!(LngLat::new(-108.242637, 25.672577).label(), "25.6726, -108.2426");
    }

    #[test]
    fn truncation_counts_characters() {
        let name = "ñ".repeat(200);
        assert_eq!(truncate_place_name(&name).chars().count(), MAX_PLACE_NAME);
    }

    #[test]
    fn computed_route_uses_first_leg() {
        let route = DirectionsRoute {
            distance: 99_999.0,
            duration: 1.0,
            legs: vec![RouteLeg {
                distance: 12_346.0,
                duration: 930.0,
            }],
        };
        let computed = ComputedRoute::from(&route);
        assert_eq!(computed.distance_label(), "12.35 km");
        assert_eq!(computed.duration_label(), "16 min");
    }

    #[test]
    fn route_events_are_ignored_while_saving() {
        let first = ComputedRoute {
            distance: 1000.0,
            duration: 60.0,
        };
        let second = ComputedRoute {
            distance: 5000.0,
            duration: 300.0,
        };
        let state = RouteState::Idle
            .apply(RouteAction::Computed(first))
            .apply(RouteAction::SaveStarted)
            .apply(RouteAction::Computed(second));
        assert_eq!(state, RouteState::Saving(first));
    }

    #[test]
    fn clearing_during_a_save_keeps_the_guard() {
        let first = ComputedRoute {
            distance: 1000.0,
            duration: 60.0,
        };
        let second = ComputedRoute {
            distance: 5000.0,
            duration: 300.0,
        };
        let state = RouteState::Idle
            .apply(RouteAction::Computed(first))
            .apply(RouteAction::SaveStarted)
            .apply(RouteAction::Cleared)
            .apply(RouteAction::Computed(second));
        assert_eq!(state, RouteState::Saving(first));
        assert!(!state.can_save());
        assert_eq!(state.savable(), Err(RouteError::AlreadySaving));

        let state = state.apply(RouteAction::SaveFinished { saved: true });
        assert_eq!(state, RouteState::Idle);
        assert_eq!(state.apply(RouteAction::Cleared), RouteState::Idle);
    }

    #[test]
    fn rejection_reads_backend_payload() {
        let err = rejection(r#"{"mensaje":"Datos inválidos","errores":["Origen requerido"]}"#);
        assert_eq!(err.to_string(), "Datos inválidos: Origen requerido");
    }

    #[test]
    fn rejection_keeps_unrecognised_bodies() {
        let body = r#"{"title":"One or more validation errors occurred.","status":400,"errors":{"Origen":["required"]}}"#;
        assert_eq!(
            rejection(body),
            RouteError::Rejected {
                mensaje: Some(body.to_string()),
                errores: Vec::new(),
            }
        );
        assert_eq!(rejection("Bad Gateway").to_string(), "Bad Gateway");
        assert_eq!(
            rejection("  "),
            RouteError::Rejected {
                mensaje: None,
                errores: Vec::new(),
            }
        );
    }

    #[test]
    fn save_cannot_start_without_route() {
        assert_eq!(RouteState::Idle.apply(RouteAction::SaveStarted), RouteState::Idle);
        assert_eq!(RouteState::Idle.savable(), Err(RouteError::NoRoute));
    }
}
