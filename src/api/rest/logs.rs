use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Json;
use axum::Router;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::log::{DutyStatus, LogEntry};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logs", post(create_log_entry).get(list_log_entries))
        .route(
            "/logs/:id",
            get(get_log_entry)
                .put(update_log_entry)
                .delete(delete_log_entry),
        )
}

#[derive(Deserialize)]
pub struct LogEntryPayload {
    pub trip: Uuid,
    pub time: DateTime<Utc>,
    pub status: DutyStatus,
    #[serde(default)]
    pub remarks: String,
}

#[derive(Deserialize)]
pub struct LogFilter {
    pub trip: Option<Uuid>,
}

fn ensure_trip_exists(state: &AppState, trip_id: Uuid) -> Result<(), AppError> {
    if state.store.get_trip(trip_id).is_none() {
        return Err(AppError::BadRequest(format!("trip {} does not exist", trip_id)));
    }
    Ok(())
}

async fn create_log_entry(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LogEntryPayload>,
) -> Result<Json<LogEntry>, AppError> {
    ensure_trip_exists(&state, payload.trip)?;

    let entry = LogEntry {
        id: Uuid::new_v4(),
        trip_id: payload.trip,
        time: payload.time,
        status: payload.status,
        remarks: payload.remarks,
    };

    state.store.insert_log_entry(entry.clone());
    Ok(Json(entry))
}

async fn list_log_entries(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<LogFilter>,
) -> Json<Vec<LogEntry>> {
    Json(state.store.list_log_entries(filter.trip))
}

async fn get_log_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<LogEntry>, AppError> {
    let entry = state
        .store
        .get_log_entry(id)
        .ok_or_else(|| AppError::NotFound(format!("log entry {} not found", id)))?;

    Ok(Json(entry))
}

async fn update_log_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LogEntryPayload>,
) -> Result<Json<LogEntry>, AppError> {
    ensure_trip_exists(&state, payload.trip)?;

    let entry = state
        .store
        .update_log_entry(LogEntry {
            id,
            trip_id: payload.trip,
            time: payload.time,
            status: payload.status,
            remarks: payload.remarks,
        })
        .ok_or_else(|| AppError::NotFound(format!("log entry {} not found", id)))?;

    Ok(Json(entry))
}

async fn delete_log_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state
        .store
        .delete_log_entry(id)
        .ok_or_else(|| AppError::NotFound(format!("log entry {} not found", id)))?;

    Ok(StatusCode::NO_CONTENT)
}
