//! Configuration management

use anyhow::Result;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// `"mock"` (default) or `"nominatim"`.
    pub geocoder_backend: String,

    /// Nominatim API URL (for geocoding)
    pub nominatim_url: String,

    /// `"mock"` (default) or `"valhalla"`.
    pub router_backend: String,

    /// Valhalla routing engine URL
    pub valhalla_url: String,

    /// Directory for rolling log files
    pub logs_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let geocoder_backend =
            std::env::var("GEOCODER_BACKEND").unwrap_or_else(|_| "mock".to_string());

        let nominatim_url = std::env::var("NOMINATIM_URL")
            .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".to_string());

        let router_backend =
            std::env::var("ROUTER_BACKEND").unwrap_or_else(|_| "mock".to_string());

        let valhalla_url =
            std::env::var("VALHALLA_URL").unwrap_or_else(|_| "http://localhost:8002".to_string());

        let logs_dir = std::env::var("LOGS_DIR").unwrap_or_else(|_| "logs".to_string());

        Ok(Self {
            geocoder_backend,
            nominatim_url,
            router_backend,
            valhalla_url,
            logs_dir,
        })
    }
}
