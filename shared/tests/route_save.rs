mod common;

use std::cell::RefCell;

use futures::executor::block_on;

use flores_shared::route::{
    ComputedRoute, GeocodeFeature, GeocodeResponse, Geocoder, LngLat, RouteAction, RouteSink,
    RouteState, save_route,
};
use flores_shared::{ApiError, NuevaRuta, RouteError, RutaCreada};

const ORIGIN: LngLat = LngLat {
    lng: -108.99,
    lat: 25.79,
};
const DESTINATION: LngLat = LngLat {
    lng: -108.46,
    lat: 25.57,
};

/// Answers every lookup from a fixed table keyed by longitude.
struct FakeGeocoder {
    places: Vec<(f64, Result<Option<String>, ApiError>)>,
}

impl Geocoder for FakeGeocoder {
    async fn reverse(&self, point: LngLat) -> Result<GeocodeResponse, ApiError> {
        let (_, answer) = self
            .places
            .iter()
            .find(|(lng, _)| *lng == point.lng)
            .expect("unexpected lookup");
        answer.clone().map(|name| GeocodeResponse {
            features: name
                .map(|name| GeocodeFeature {
                    place_name: Some(name),
                    text: None,
                })
                .into_iter()
                .collect(),
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    sent: RefCell<Vec<NuevaRuta>>,
    reject: bool,
}

impl RouteSink for RecordingSink {
    async fn create(&self, ruta: &NuevaRuta) -> Result<RutaCreada, RouteError> {
        self.sent.borrow_mut().push(ruta.clone());
        if self.reject {
            return Err(RouteError::Rejected {
                mensaje: Some("Ruta duplicada".into()),
                errores: vec![],
            });
        }
        Ok(RutaCreada { ruta_id: 17 })
    }
}

fn route(meters: f64) -> ComputedRoute {
    ComputedRoute {
        distance: meters,
        duration: 1_800.0,
    }
}

#[test]
fn saves_geocoded_names_and_rounded_distance() {
    common::init_test_logging();
    let geocoder = FakeGeocoder {
        places: vec![
            (ORIGIN.lng, Ok(Some("Los Mochis, Sinaloa, México".to_string()))),
            (DESTINATION.lng, Ok(Some("Guasave, Sinaloa, México".to_string()))),
        ],
    };
    let sink = RecordingSink::default();

    let saved = block_on(save_route(
        &geocoder,
        &sink,
        &route(60_456.0),
        Some(ORIGIN),
        Some(DESTINATION),
    ))
    .unwrap();

    assert_eq!(saved.id, 17);
    assert_eq!(
        sink.sent.borrow()[0],
        NuevaRuta {
            origen: "Los Mochis, Sinaloa, México".into(),
            destino: "Guasave, Sinaloa, México".into(),
            distancia: 60.46,
        }
    );
    assert_eq!(
        saved.message(),
        "✅ Ruta guardada exitosamente (#17): Los Mochis, Sinaloa, México ➜ Guasave, Sinaloa, México (60.46 km)"
    );
}

#[test]
fn geocoding_failures_fall_back_to_coordinates() {
    common::init_test_logging();
    let geocoder = FakeGeocoder {
        places: vec![
            (ORIGIN.lng, Err(ApiError::Network("offline".into()))),
            (DESTINATION.lng, Ok(None)),
        ],
    };
    let sink = RecordingSink::default();

    block_on(save_route(
        &geocoder,
        &sink,
        &route(10_000.0),
        Some(ORIGIN),
        Some(DESTINATION),
    ))
    .unwrap();

    let sent = sink.sent.borrow();
    assert_eq!(sent[0].origen, "25.7900, -108.9900");
    assert_eq!(sent[0].destino, "25.5700, -108.4600");
}

#[test]
fn long_names_are_cut_to_the_column_width() {
    let geocoder = FakeGeocoder {
        places: vec![
            (ORIGIN.lng, Ok(Some("Ñ".repeat(250)))),
            (DESTINATION.lng, Ok(Some("Guasave".to_string()))),
        ],
    };
    let sink = RecordingSink::default();

    block_on(save_route(
        &geocoder,
        &sink,
        &route(5_000.0),
        Some(ORIGIN),
        Some(DESTINATION),
    ))
    .unwrap();

    let sent = sink.sent.borrow();
    assert_eq!(sent[0].origen.chars().count(), 190);
    assert_eq!(sent[0].destino, "Guasave");
}

#[test]
fn zero_distance_is_rejected_before_posting() {
    let geocoder = FakeGeocoder { places: vec![] };
    let sink = RecordingSink::default();

    let err = block_on(save_route(
        &geocoder,
        &sink,
        &route(2.0),
        Some(ORIGIN),
        Some(DESTINATION),
    ))
    .unwrap_err();

    assert_eq!(err, RouteError::InvalidDistance);
    assert!(sink.sent.borrow().is_empty());
}

#[test]
fn missing_waypoint_is_an_error() {
    let geocoder = FakeGeocoder { places: vec![] };
    let sink = RecordingSink::default();

    let err = block_on(save_route(&geocoder, &sink, &route(5_000.0), Some(ORIGIN), None))
        .unwrap_err();
    assert_eq!(err, RouteError::MissingWaypoints);
}

#[test]
fn rejected_save_keeps_the_route_for_a_retry() {
    common::init_test_logging();
    let geocoder = FakeGeocoder {
        places: vec![
            (ORIGIN.lng, Ok(Some("Los Mochis".to_string()))),
            (DESTINATION.lng, Ok(Some("Guasave".to_string()))),
        ],
    };
    let sink = RecordingSink {
        reject: true,
        ..Default::default()
    };

    let computed = route(60_000.0);
    let state = RouteState::Idle
        .apply(RouteAction::Computed(computed))
        .apply(RouteAction::SaveStarted);
    assert!(state.is_saving());

    let to_save = RouteState::Computed(computed).savable().unwrap();
    let result = block_on(save_route(
        &geocoder,
        &sink,
        &to_save,
        Some(ORIGIN),
        Some(DESTINATION),
    ));
    assert_eq!(result.unwrap_err().to_string(), "Ruta duplicada");

    let state = state.apply(RouteAction::SaveFinished { saved: false });
    assert_eq!(state, RouteState::Computed(computed));
    assert!(state.can_save());
}

#[test]
fn successful_save_returns_to_idle() {
    let computed = route(60_000.0);
    let state = RouteState::Idle
        .apply(RouteAction::Computed(computed))
        .apply(RouteAction::SaveStarted)
        .apply(RouteAction::SaveFinished { saved: true });
    assert_eq!(state, RouteState::Idle);
    assert_eq!(state.savable(), Err(RouteError::NoRoute));
}

#[test]
fn clearing_discards_the_route() {
    let state = RouteState::Idle
        .apply(RouteAction::Computed(route(1_000.0)))
        .apply(RouteAction::Cleared);
    assert_eq!(state.route(), None);
}
