use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Driving summary for a whole route, as reported by the routing service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteMetrics {
    pub duration_hours: f64,
    pub distance_miles: f64,
}

impl RouteMetrics {
    pub fn is_valid(&self) -> bool {
        self.duration_hours.is_finite()
            && self.distance_miles.is_finite()
            && self.duration_hours >= 0.0
            && self.distance_miles >= 0.0
    }
}
