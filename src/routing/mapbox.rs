//! Mapbox geocoding and directions client.
//!
//! API documentation:
//! https://docs.mapbox.com/api/search/geocoding-v5/
//! https://docs.mapbox.com/api/navigation/directions/

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use super::RouteProvider;
use crate::error::AppError;
use crate::models::route::{Coordinates, RouteMetrics};

const MILES_PER_METER: f64 = 0.000621371;
const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone)]
pub struct MapboxConfig {
    pub api_key: String,
    /// e.g. "https://api.mapbox.com"
    pub base_url: String,
    pub timeout_seconds: u64,
}

impl MapboxConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.mapbox.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

pub struct MapboxClient {
    client: Client,
    config: MapboxConfig,
}

impl MapboxClient {
    pub fn new(config: MapboxConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|err| AppError::Internal(format!("failed to build http client: {err}")))?;

        Ok(Self { client, config })
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    pub fn geocoding_url(&self, location: &str) -> String {
        format!(
            "{}/geocoding/v5/mapbox.places/{}.json",
            self.base_url(),
            urlencoding::encode(location)
        )
    }

    pub fn directions_url(&self, points: &[Coordinates]) -> String {
        let path = points
            .iter()
            .map(|p| format!("{},{}", p.lng, p.lat))
            .collect::<Vec<_>>()
            .join(";");

        format!("{}/directions/v5/mapbox/driving/{}", self.base_url(), path)
    }

    async fn get_json<T>(&self, url: &str, query: &[(&str, &str)]) -> Result<Option<T>, AppError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(url)
            .query(&[("access_token", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|err| AppError::Upstream(format!("mapbox request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| AppError::Upstream(format!("mapbox response unreadable: {err}")))?;

        if !status.is_success() {
            warn!(status = %status, url = %url, "mapbox returned an error status");
        }
        decode_body(status, &body)
    }
}

/// Error statuses mean "no result"; a success body that does not parse is an
/// upstream failure.
fn decode_body<T>(status: StatusCode, body: &str) -> Result<Option<T>, AppError>
where
    T: for<'de> Deserialize<'de>,
{
    if !status.is_success() {
        return Ok(None);
    }

    serde_json::from_str(body)
        .map(Some)
        .map_err(|err| AppError::Upstream(format!("invalid mapbox response: {err}")))
}

#[async_trait]
impl RouteProvider for MapboxClient {
    async fn resolve_coordinates(&self, location: &str) -> Result<Option<Coordinates>, AppError> {
        let url = self.geocoding_url(location);
        let body: Option<GeocodingResponse> = self.get_json(&url, &[("limit", "1")]).await?;

        let coordinates = body.and_then(GeocodingResponse::first_match);
        debug!(location = %location, found = coordinates.is_some(), "geocoded location");
        Ok(coordinates)
    }

    async fn resolve_route(
        &self,
        origin: Coordinates,
        waypoints: &[Coordinates],
        destination: Coordinates,
    ) -> Result<Option<RouteMetrics>, AppError> {
        let mut points = Vec::with_capacity(waypoints.len() + 2);
        points.push(origin);
        points.extend_from_slice(waypoints);
        points.push(destination);

        let url = self.directions_url(&points);
        let body: Option<DirectionsResponse> =
            self.get_json(&url, &[("overview", "false")]).await?;

        Ok(body.and_then(DirectionsResponse::first_route))
    }

    fn name(&self) -> &str {
        "mapbox"
    }
}

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON order: [lng, lat]
    coordinates: [f64; 2],
}

impl GeocodingResponse {
    fn first_match(self) -> Option<Coordinates> {
        self.features.into_iter().next().map(|feature| {
            let [lng, lat] = feature.geometry.coordinates;
            Coordinates { lat, lng }
        })
    }
}

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    #[serde(default)]
    routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct Route {
    /// seconds
    duration: f64,
    /// meters
    distance: f64,
}

impl DirectionsResponse {
    fn first_route(self) -> Option<RouteMetrics> {
        self.routes.into_iter().next().map(|route| RouteMetrics {
            duration_hours: route.duration / SECONDS_PER_HOUR,
            distance_miles: route.distance * MILES_PER_METER,
        })
    }
}
