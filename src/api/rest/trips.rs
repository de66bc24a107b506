use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::engine::planner::plan_trip;
use crate::error::AppError;
use crate::models::log::ScheduleResult;
use crate::models::trip::Trip;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trips", post(create_trip).get(list_trips))
        .route(
            "/trips/:id",
            get(get_trip).put(update_trip).delete(delete_trip),
        )
}

#[derive(Deserialize)]
pub struct TripPayload {
    pub driver_name: String,
    pub vehicle_id: String,
    pub current_location: String,
    #[serde(default)]
    pub pickup_location: String,
    pub dropoff_location: String,
    pub cycle_used: i64,
}

impl TripPayload {
    fn validate(&self) -> Result<u32, AppError> {
        let required = [
            ("driver_name", &self.driver_name),
            ("vehicle_id", &self.vehicle_id),
            ("current_location", &self.current_location),
            ("dropoff_location", &self.dropoff_location),
        ];

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::BadRequest(format!("{field} cannot be empty")));
            }
        }

        u32::try_from(self.cycle_used).map_err(|_| {
            AppError::BadRequest(format!(
                "cycle_used must be a non-negative number of hours, got {}",
                self.cycle_used
            ))
        })
    }

    fn into_trip(self, id: Uuid, cycle_used: u32, created_at: chrono::DateTime<Utc>) -> Trip {
        Trip {
            id,
            driver_name: self.driver_name.trim().to_string(),
            vehicle_id: self.vehicle_id.trim().to_string(),
            current_location: self.current_location.trim().to_string(),
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location.trim().to_string(),
            cycle_used,
            created_at,
        }
    }
}

#[derive(Serialize)]
pub struct TripSchedule {
    pub trip: Trip,
    pub eld_logs: ScheduleResult,
}

async fn create_trip(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<TripPayload>,
) -> Result<Json<TripSchedule>, AppError> {
    let cycle_used = payload.validate()?;

    let trip = payload.into_trip(Uuid::new_v4(), cycle_used, Utc::now());
    state.store.insert_trip(trip.clone());
    state.metrics.trips_stored.inc();

    info!(
        trip_id = %trip.id,
        driver = %trip.driver_name,
        stops = trip.stops().len(),
        "trip created"
    );

    let eld_logs = plan_trip(&state, &trip).await?;
    Ok(Json(TripSchedule { trip, eld_logs }))
}

async fn list_trips(State(state): State<Arc<AppState>>) -> Json<Vec<Trip>> {
    Json(state.store.list_trips())
}

async fn get_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TripSchedule>, AppError> {
    let trip = state
        .store
        .get_trip(id)
        .ok_or_else(|| AppError::NotFound(format!("trip {} not found", id)))?;

    let eld_logs = plan_trip(&state, &trip).await?;
    Ok(Json(TripSchedule { trip, eld_logs }))
}

async fn update_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TripPayload>,
) -> Result<Json<Trip>, AppError> {
    let cycle_used = payload.validate()?;

    let existing = state
        .store
        .get_trip(id)
        .ok_or_else(|| AppError::NotFound(format!("trip {} not found", id)))?;

    let trip = state
        .store
        .update_trip(payload.into_trip(id, cycle_used, existing.created_at))
        .ok_or_else(|| AppError::NotFound(format!("trip {} not found", id)))?;

    Ok(Json(trip))
}

async fn delete_trip(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_trip(id)
        .ok_or_else(|| AppError::NotFound(format!("trip {} not found", id)))?;
    state.metrics.trips_stored.dec();

    info!(trip_id = %id, "trip deleted");
    Ok(StatusCode::NO_CONTENT)
}
