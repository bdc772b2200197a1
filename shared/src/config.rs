use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:5226/api/";
pub const DEFAULT_GEOCODING_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";
pub const DEFAULT_MAP_STYLE: &str = "mapbox://styles/mapbox/streets-v12";

/// Runtime settings of the admin front-end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the REST backend, always ending in `/`.
    pub api_url: String,
    pub mapbox_token: String,
    pub geocoding_url: String,
    pub map_style: String,
    /// `[lng, lat]`
    pub map_center: [f64; 2],
    pub map_zoom: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            mapbox_token: String::new(),
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            map_style: DEFAULT_MAP_STYLE.to_string(),
            map_center: [-108.242637, 25.672577],
            map_zoom: 13.0,
        }
    }
}

impl AppConfig {
    pub fn new(api_url: Option<&str>, mapbox_token: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.filter(|url| !url.trim().is_empty()) {
            config.api_url = normalize_base_url(url);
        }
        if let Some(token) = mapbox_token {
            config.mapbox_token = token.trim().to_string();
        }
        config
    }

    pub fn with_api_url(mut self, api_url: &str) -> Self {
        if !api_url.trim().is_empty() {
            self.api_url = normalize_base_url(api_url);
        }
        self
    }

    /// Absolute URL of a backend path such as `Cliente/Lista`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path.trim_start_matches('/'))
    }

    pub fn has_mapbox_token(&self) -> bool {
        !self.mapbox_token.is_empty()
    }
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::new(None, None);
        assert_eq!(config.endpoint("Cliente/Lista"), "http://localhost:5226/api/Cliente/Lista");
        assert!(!config.has_mapbox_token());
    }

    #[test]
    fn base_url_gets_exactly_one_trailing_slash() {
        let config = AppConfig::new(Some("https://flores.example/api//"), Some(" pk.abc "));
        assert_eq!(config.api_url, "https://flores.example/api/");
        assert_eq!(config.endpoint("/Ruta/Nuevo"), "https://flores.example/api/Ruta/Nuevo");
        assert_eq!(config.mapbox_token, "pk.abc");
    }

    #[test]
    fn blank_override_keeps_current_url() {
        let config = AppConfig::default().with_api_url("  ");
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
