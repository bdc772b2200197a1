// Application configuration, resolved once per call from build-time
// environment and an optional LocalStorage override.

use flores_shared::AppConfig;
use gloo_storage::{LocalStorage, Storage};

/// LocalStorage key that points a deployed build at another backend.
const API_URL_OVERRIDE_KEY: &str = "flores_api_url";

/// Set at compile time through the environment or `frontend/.env`.
const API_URL: Option<&str> = option_env!("FLORES_API_URL");
const MAPBOX_ACCESS_TOKEN: Option<&str> = option_env!("MAPBOX_ACCESS_TOKEN");

pub fn app_config() -> AppConfig {
    let config = AppConfig::new(API_URL, MAPBOX_ACCESS_TOKEN);
    match LocalStorage::get::<String>(API_URL_OVERRIDE_KEY) {
        Ok(url) => config.with_api_url(&url),
        Err(_) => config,
    }
}
