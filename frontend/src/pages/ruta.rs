// Rutas - driving directions on the map and saving the computed route

use std::rc::Rc;

use flores_shared::api::{ApiRequest, Method, RUTA_NUEVA_PATH};
use flores_shared::route::{
    ComputedRoute, GeocodeResponse, Geocoder, LngLat, RouteAction, RouteSink, RouteState, SAVED_MESSAGE_MS,
    geocode_url, rejection, save_route,
};
use flores_shared::{ApiError, NuevaRuta, RouteError, RutaCreada};
use gloo::dialogs::alert;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::layout::PageHeader;
use crate::config::app_config;
use crate::map::RouteMap;
use crate::services::ApiClient;

const MAP_CONTAINER: &str = "mapa-rutas";

/// Route screen state as a yew reducer.
#[derive(Default, PartialEq)]
struct RouteModel(RouteState);

impl Reducible for RouteModel {
    type Action = RouteAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new(RouteModel(self.0.apply(action)))
    }
}

struct MapboxGeocoder {
    base_url: String,
    access_token: String,
}

impl Geocoder for MapboxGeocoder {
    async fn reverse(&self, point: LngLat) -> Result<GeocodeResponse, ApiError> {
        let url = geocode_url(&self.base_url, &self.access_token, point);
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http { status, body });
        }

        response
            .json::<GeocodeResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
}

struct BackendRouteSink;

impl RouteSink for BackendRouteSink {
    async fn create(&self, ruta: &NuevaRuta) -> Result<RutaCreada, RouteError> {
        let body = serde_json::to_value(ruta).map_err(|e| ApiError::Serialize(e.to_string()))?;
        let request = ApiRequest::with_body(Method::Post, RUTA_NUEVA_PATH, body);

        match ApiClient::send(&request).await {
            Ok(response) => response
                .json::<RutaCreada>()
                .await
                .map_err(|e| RouteError::from(ApiError::Parse(e.to_string()))),
            Err(ApiError::Http { body, .. }) => Err(rejection(&body)),
            Err(e) => Err(e.into()),
        }
    }
}

#[function_component(RutaPage)]
pub fn ruta_page() -> Html {
    let config = use_memo((), |_| app_config());
    let route = use_reducer(RouteModel::default);
    let saved = use_state(|| None::<String>);
    let map = use_mut_ref(|| None::<RouteMap>);

    // Mount the map once; dropping the handle removes it.
    {
        let config = config.clone();
        let map = map.clone();
        let dispatcher = route.dispatcher();
        let saved = saved.setter();
        use_effect_with((), move |_| {
            if config.has_mapbox_token() {
                let on_route = {
                    let dispatcher = dispatcher.clone();
                    Callback::from(move |computed: ComputedRoute| {
                        saved.set(None);
                        dispatcher.dispatch(RouteAction::Computed(computed));
                    })
                };
                let on_clear = Callback::from(move |_: ()| dispatcher.dispatch(RouteAction::Cleared));
                match RouteMap::mount(MAP_CONTAINER, &config, on_route, on_clear) {
                    Ok(mounted) => *map.borrow_mut() = Some(mounted),
                    Err(e) => log::error!("No se pudo cargar el mapa: {:?}", e),
                }
            } else {
                log::warn!("MAPBOX_ACCESS_TOKEN no está configurado; el mapa está deshabilitado");
            }
            move || {
                map.borrow_mut().take();
            }
        });
    }

    // Hide the saved banner after a while.
    {
        let saved = saved.clone();
        use_effect_with((*saved).clone(), move |message| {
            let timeout = message
                .as_ref()
                .map(|_| Timeout::new(SAVED_MESSAGE_MS, move || saved.set(None)));
            move || drop(timeout)
        });
    }

    let on_save = {
        let config = config.clone();
        let map = map.clone();
        let route = route.clone();
        let saved = saved.clone();
        Callback::from(move |_: MouseEvent| {
            let computed = match route.0.savable() {
                Ok(computed) => computed,
                Err(e) => {
                    alert(&e.to_string());
                    return;
                }
            };
            let (origin, destination) = match map.borrow().as_ref() {
                Some(mounted) => (mounted.origin(), mounted.destination()),
                None => (None, None),
            };
            route.dispatch(RouteAction::SaveStarted);

            let geocoder = MapboxGeocoder {
                base_url: config.geocoding_url.clone(),
                access_token: config.mapbox_token.clone(),
            };
            let dispatcher = route.dispatcher();
            let saved = saved.clone();
            spawn_local(async move {
                match save_route(&geocoder, &BackendRouteSink, &computed, origin, destination).await {
                    Ok(ruta) => {
                        log::info!("Ruta #{} guardada", ruta.id);
                        dispatcher.dispatch(RouteAction::SaveFinished { saved: true });
                        saved.set(Some(ruta.message()));
                    }
                    Err(e) => {
                        log::error!("Error al guardar la ruta: {}", e);
                        dispatcher.dispatch(RouteAction::SaveFinished { saved: false });
                        alert(&format!("Error al guardar la ruta:\n\n{e}"));
                    }
                }
            });
        })
    };

    let on_clear = {
        let map = map.clone();
        let dispatcher = route.dispatcher();
        let saved = saved.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(mounted) = map.borrow().as_ref() {
                mounted.clear();
            }
            saved.set(None);
            dispatcher.dispatch(RouteAction::Cleared);
        })
    };

    let state = route.0;
    let can_save = state.can_save();
    let save_class = if can_save {
        "bg-green-600 hover:bg-green-700"
    } else {
        "bg-gray-500 opacity-60 cursor-not-allowed"
    };

    html! {
        <div class="p-6">
            <PageHeader title="Rutas" />

            <div class="relative rounded-lg shadow overflow-hidden" style="background-color: var(--bg-secondary);">
                <div class="flex flex-wrap items-center gap-3 px-5 py-3 border-b" style="border-color: var(--border-primary);">
                    <button
                        onclick={on_save}
                        disabled={!can_save}
                        class={classes!("px-4", "py-2", "rounded", "text-white", save_class)}
                    >
                        { if state.is_saving() { "🌍 Obteniendo lugares..." } else { "💾 Guardar ruta" } }
                    </button>
                    <button
                        onclick={on_clear}
                        disabled={state.is_saving()}
                        class="px-4 py-2 rounded bg-yellow-400 text-gray-900 hover:bg-yellow-500 disabled:opacity-50"
                    >
                        {"🗑️ Limpiar"}
                    </button>
                    if let Some(computed) = state.route() {
                        <div class="ml-auto flex space-x-4 text-sm" style="color: var(--fg-secondary);">
                            <span>{format!("📏 {}", computed.distance_label())}</span>
                            <span>{format!("⏱️ {}", computed.duration_label())}</span>
                        </div>
                    }
                </div>

                if !config.has_mapbox_token() {
                    <div class="px-5 py-3 bg-yellow-100 text-yellow-800 text-sm">
                        {"Configure MAPBOX_ACCESS_TOKEN para habilitar el mapa."}
                    </div>
                }

                <div id={MAP_CONTAINER} style="width: 100%; height: 600px;"></div>

                if let Some(message) = (*saved).clone() {
                    <div class="absolute right-3 top-20 z-30 w-96 p-4 rounded-lg border shadow text-sm bg-green-100 text-green-800 border-green-200">
                        {message}
                    </div>
                }

                if state.is_saving() {
                    <div class="absolute inset-0 z-20 flex items-center justify-center bg-black bg-opacity-30">
                        <div class="px-6 py-4 rounded-lg shadow bg-white text-gray-800">
                            {"🌍 Obteniendo nombres de lugares..."}
                        </div>
                    </div>
                }
            </div>
        </div>
    }
}
