// ============================================================================
// MAPBOX FFI
// ============================================================================
// Bindings for mapbox-gl and mapbox-gl-directions, loaded as globals by index.html
// ============================================================================

use flores_shared::AppConfig;
use flores_shared::route::{ComputedRoute, LngLat, RouteEvent};
use serde::Deserialize;
use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use yew::Callback;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = mapboxgl, js_name = Map)]
    pub type MapboxMap;

    #[wasm_bindgen(constructor, catch, js_namespace = mapboxgl, js_class = Map)]
    fn new(options: &JsValue) -> Result<MapboxMap, JsValue>;

    #[wasm_bindgen(method, js_name = addControl)]
    fn add_control(this: &MapboxMap, control: &JsValue, position: &str);

    #[wasm_bindgen(method)]
    fn remove(this: &MapboxMap);

    #[wasm_bindgen(js_name = MapboxDirections)]
    pub type Directions;

    #[wasm_bindgen(constructor, catch, js_class = MapboxDirections)]
    fn new(options: &JsValue) -> Result<Directions, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &Directions, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = getOrigin)]
    fn get_origin(this: &Directions) -> JsValue;

    #[wasm_bindgen(method, js_name = getDestination)]
    fn get_destination(this: &Directions) -> JsValue;

    #[wasm_bindgen(method, js_name = removeRoutes)]
    fn remove_routes(this: &Directions);
}

/// GeoJSON point feature as returned by `getOrigin`/`getDestination`.
/// An unset waypoint comes back as `{}`.
#[derive(Deserialize)]
struct WaypointFeature {
    geometry: Option<PointGeometry>,
}

#[derive(Deserialize)]
struct PointGeometry {
    coordinates: Vec<f64>,
}

fn to_json_string(value: &JsValue) -> Option<String> {
    js_sys::JSON::stringify(value).ok()?.as_string()
}

fn to_js(value: &serde_json::Value) -> Result<JsValue, JsValue> {
    js_sys::JSON::parse(&value.to_string())
}

fn waypoint(value: &JsValue) -> Option<LngLat> {
    let feature: WaypointFeature = serde_json::from_str(&to_json_string(value)?).ok()?;
    match feature.geometry?.coordinates.as_slice() {
        [lng, lat, ..] => Some(LngLat::new(*lng, *lat)),
        _ => None,
    }
}

fn route_from_event(event: &JsValue) -> Option<ComputedRoute> {
    let json = to_json_string(event)?;
    match serde_json::from_str::<RouteEvent>(&json) {
        Ok(event) => event.first_route(),
        Err(e) => {
            log::warn!("Unreadable directions route event: {e}");
            None
        }
    }
}

/// A mounted map with the driving directions control. The map is removed
/// from the page when this is dropped.
pub struct RouteMap {
    map: MapboxMap,
    directions: Directions,
    _on_route: Closure<dyn FnMut(JsValue)>,
    _on_clear: Closure<dyn FnMut(JsValue)>,
}

impl RouteMap {
    /// Mounts the map into `container`. `on_route` receives the first route of
    /// each recalculation; `on_clear` fires when the control drops its route.
    pub fn mount(
        container: &str,
        config: &AppConfig,
        on_route: Callback<ComputedRoute>,
        on_clear: Callback<()>,
    ) -> Result<Self, JsValue> {
        let mapboxgl = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("mapboxgl"))?;
        if mapboxgl.is_undefined() {
            return Err(JsValue::from_str("mapbox-gl is not loaded"));
        }
        js_sys::Reflect::set(
            &mapboxgl,
            &JsValue::from_str("accessToken"),
            &JsValue::from_str(&config.mapbox_token),
        )?;

        let map = MapboxMap::new(&to_js(&json!({
            "container": container,
            "style": config.map_style,
            "center": config.map_center,
            "zoom": config.map_zoom,
        }))?)?;

        let directions = Directions::new(&to_js(&json!({
            "accessToken": config.mapbox_token,
            "unit": "metric",
            "profile": "mapbox/driving",
            "language": "es",
        }))?)?;
        map.add_control(directions.as_ref(), "top-left");

        let on_route = Closure::<dyn FnMut(JsValue)>::new(move |event: JsValue| {
            if let Some(route) = route_from_event(&event) {
                on_route.emit(route);
            }
        });
        directions.on("route", on_route.as_ref().unchecked_ref());

        let on_clear = Closure::<dyn FnMut(JsValue)>::new(move |_: JsValue| on_clear.emit(()));
        directions.on("clear", on_clear.as_ref().unchecked_ref());

        log::info!("Map mounted in #{container}");

        Ok(Self {
            map,
            directions,
            _on_route: on_route,
            _on_clear: on_clear,
        })
    }

    pub fn origin(&self) -> Option<LngLat> {
        waypoint(&self.directions.get_origin())
    }

    pub fn destination(&self) -> Option<LngLat> {
        waypoint(&self.directions.get_destination())
    }

    pub fn clear(&self) {
        self.directions.remove_routes();
    }
}

impl Drop for RouteMap {
    fn drop(&mut self) {
        self.map.remove();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    fn parse(json: &str) -> JsValue {
        js_sys::JSON::parse(json).unwrap()
    }

    #[wasm_bindgen_test]
    fn reads_waypoint_coordinates() {
        let origin = parse(
            r#"{"type":"Feature","geometry":{"type":"Point","coordinates":[-108.242637,25.672577]},"properties":{}}"#,
        );
        assert_eq!(waypoint(&origin), Some(LngLat::new(-108.242637, 25.672577)));
    }

    #[wasm_bindgen_test]
    fn unset_waypoint_is_none() {
        assert_eq!(waypoint(&parse("{}")), None);
        assert_eq!(waypoint(&JsValue::UNDEFINED), None);
    }

    #[wasm_bindgen_test]
    fn takes_first_route_of_event() {
        let event = parse(
            r#"{"route":[{"distance":12500.0,"duration":900.0,"legs":[{"distance":12346.0,"duration":840.0}]}]}"#,
        );
        let route = route_from_event(&event).unwrap();
        assert_eq!(route.distance_label(), "12.35 km");
        assert_eq!(route.duration_label(), "14 min");
    }
}
