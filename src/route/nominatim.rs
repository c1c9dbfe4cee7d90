//! Nominatim geocoding client: free-text query to coordinates.

use anyhow::{Context, Result};
use serde::Deserialize;

use super::Coordinates;

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Thin HTTP client over a Nominatim-compatible `/search` endpoint.
pub struct NominatimClient {
    base_url: String,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("hos-trip-planner/1.0")
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.to_string(),
            client,
        }
    }

    /// Geocode a free-text location string to coordinates. Returns `None`
    /// if nothing matched, never an error for a simple no-match.
    pub async fn geocode(&self, query: &str) -> Result<Option<Coordinates>> {
        let url = format!(
            "{}/search?q={}&format=json&limit=1",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("failed to send geocoding request")?;

        if !response.status().is_success() {
            return Ok(None);
        }

        let results: Vec<NominatimResult> = response
            .json()
            .await
            .context("failed to parse geocoding response")?;

        match results.first() {
            Some(result) => {
                let lat: f64 = result.lat.parse().context("invalid latitude")?;
                let lng: f64 = result.lon.parse().context("invalid longitude")?;
                Ok(Some(Coordinates { lat, lng }))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Hits the public Nominatim API; skipped by default.
    #[tokio::test]
    #[ignore]
    async fn geocodes_a_known_us_address() {
        let client = NominatimClient::new("https://nominatim.openstreetmap.org");
        let result = client.geocode("Denver, Colorado").await.unwrap();
        assert!(result.is_some());
        let coords = result.unwrap();
        assert!((coords.lat - 39.74).abs() < 0.5);
        assert!((coords.lng + 104.99).abs() < 0.5);
    }
}
