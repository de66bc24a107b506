//! Geocoding and routing collaborator.
//!
//! The schedule generator only needs whole-route metrics. `RouteProvider`
//! hides where they come from so the planner can run against Mapbox in
//! production and a fixed stub in tests.

pub mod mapbox;

pub use mapbox::{MapboxClient, MapboxConfig};

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::route::{Coordinates, RouteMetrics};

#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Forward geocoding. `Ok(None)` when nothing matches.
    async fn resolve_coordinates(&self, location: &str) -> Result<Option<Coordinates>, AppError>;

    /// Driving summary through `waypoints` in order. `Ok(None)` when no route exists.
    async fn resolve_route(
        &self,
        origin: Coordinates,
        waypoints: &[Coordinates],
        destination: Coordinates,
    ) -> Result<Option<RouteMetrics>, AppError>;

    fn name(&self) -> &str;
}

/// Resolves `[origin, stops.., destination]` to route metrics.
///
/// Origin and destination must geocode; intermediate stops that do not, or
/// whose lookup fails, are dropped from the route.
pub async fn route_metrics(
    provider: &dyn RouteProvider,
    locations: &[String],
) -> Result<RouteMetrics, AppError> {
    let (origin_name, destination_name) = match locations {
        [first, .., last] => (first, last),
        _ => {
            return Err(AppError::InvalidTrip(format!(
                "a trip needs an origin and a destination, got {} location(s)",
                locations.len()
            )))
        }
    };
    let stop_names = &locations[1..locations.len() - 1];

    let origin = provider
        .resolve_coordinates(origin_name)
        .await?
        .ok_or_else(|| AppError::RouteUnavailable(format!("origin '{origin_name}' not found")))?;
    let destination = provider
        .resolve_coordinates(destination_name)
        .await?
        .ok_or_else(|| {
            AppError::RouteUnavailable(format!("destination '{destination_name}' not found"))
        })?;

    let resolved = join_all(stop_names.iter().map(|stop| provider.resolve_coordinates(stop))).await;

    let mut waypoints = Vec::with_capacity(stop_names.len());
    for (stop, outcome) in stop_names.iter().zip(resolved) {
        match outcome {
            Ok(Some(coordinates)) => waypoints.push(coordinates),
            Ok(None) => warn!(stop = %stop, "stop could not be geocoded; dropping it from the route"),
            Err(err) => warn!(
                stop = %stop,
                error = %err,
                "stop lookup failed; dropping it from the route"
            ),
        }
    }

    let metrics = provider
        .resolve_route(origin, &waypoints, destination)
        .await?
        .ok_or_else(|| {
            AppError::RouteUnavailable(format!(
                "no driving route from '{origin_name}' to '{destination_name}'"
            ))
        })?;

    info!(
        provider = provider.name(),
        origin = %origin_name,
        destination = %destination_name,
        waypoints = waypoints.len(),
        dropped = stop_names.len() - waypoints.len(),
        duration_hours = metrics.duration_hours,
        distance_miles = metrics.distance_miles,
        "route resolved"
    );

    Ok(metrics)
}
