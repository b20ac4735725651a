//! Geocoding fallback for place names the static table does not cover.

use reqwest::Client;
use serde::Deserialize;

use crate::cities::Coord;

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    results: Option<Vec<GeocodeResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    latitude: f64,
    longitude: f64,
}

/// Resolve a place name through the Open-Meteo geocoding API, taking the
/// first hit. Any failure (network, status, shape, empty result set) is
/// logged and absorbed; the caller falls back to a default coordinate.
pub(crate) async fn geocode_first(client: &Client, base_url: &str, name: &str) -> Option<Coord> {
    let url = format!("{base_url}/v1/search");
    let response = client
        .get(&url)
        .query(&[("name", name), ("count", "1"), ("language", "zh"), ("format", "json")])
        .send()
        .await;

    let response = match response {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Geocoding request for '{}' failed: {}", name, e);
            return None;
        }
    };

    if !response.status().is_success() {
        tracing::warn!("Geocoding for '{}' returned {}", name, response.status());
        return None;
    }

    let body: GeocodeResponse = match response.json().await {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!("Malformed geocoding response for '{}': {}", name, e);
            return None;
        }
    };

    let hit = body.results.and_then(|mut r| {
        if r.is_empty() {
            None
        } else {
            Some(r.remove(0))
        }
    })?;

    tracing::debug!(
        "Geocoded '{}' to ({}, {})",
        name,
        hit.latitude,
        hit.longitude
    );
    Some(Coord {
        latitude: hit.latitude,
        longitude: hit.longitude,
    })
}
