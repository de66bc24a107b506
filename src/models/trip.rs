use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: Uuid,
    pub driver_name: String,
    pub vehicle_id: String,
    pub current_location: String,
    /// Comma-delimited list of intermediate pickup stops. May be empty.
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_used: u32,
    pub created_at: DateTime<Utc>,
}

impl Trip {
    pub fn stops(&self) -> Vec<String> {
        split_stops(&self.pickup_location)
    }

    pub fn to_request(&self) -> TripRequest {
        let stops = self.stops();
        let mut locations = Vec::with_capacity(stops.len() + 2);
        locations.push(self.current_location.clone());
        locations.extend(stops);
        locations.push(self.dropoff_location.clone());

        TripRequest {
            driver_name: self.driver_name.clone(),
            vehicle_id: self.vehicle_id.clone(),
            locations,
            cycle_used: self.cycle_used,
        }
    }
}

/// Blank pieces (`"Memphis,"`, `"a,,b"`) are not stops and are skipped.
pub fn split_stops(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|stop| !stop.is_empty())
        .map(str::to_string)
        .collect()
}

/// Input of a schedule generation: `[origin, stop_1, .., stop_k, destination]`.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRequest {
    pub driver_name: String,
    pub vehicle_id: String,
    pub locations: Vec<String>,
    /// Accepted but not used by the schedule math.
    pub cycle_used: u32,
}

impl TripRequest {
    pub fn stops_count(&self) -> usize {
        self.locations.len().saturating_sub(2)
    }
}
