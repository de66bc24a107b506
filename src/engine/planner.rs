use std::time::Instant;

use tracing::{error, info};

use crate::engine::schedule::generate;
use crate::error::AppError;
use crate::models::log::ScheduleResult;
use crate::models::trip::Trip;
use crate::routing::route_metrics;
use crate::state::AppState;

/// Looks up the trip's route and builds its duty-status schedule.
pub async fn plan_trip(state: &AppState, trip: &Trip) -> Result<ScheduleResult, AppError> {
    let request = trip.to_request();

    let start = Instant::now();
    let lookup = route_metrics(state.routes.as_ref(), &request.locations).await;
    let outcome = if lookup.is_ok() { "success" } else { "error" };
    state
        .metrics
        .route_lookup_seconds
        .with_label_values(&[outcome])
        .observe(start.elapsed().as_secs_f64());

    let result = lookup.and_then(|metrics| generate(&request, metrics));

    match &result {
        Ok(schedule) => {
            state
                .metrics
                .schedules_generated_total
                .with_label_values(&["success"])
                .inc();
            state
                .metrics
                .daily_logs_per_schedule
                .observe(schedule.daily_logs.len() as f64);

            info!(
                trip_id = %trip.id,
                days = schedule.daily_logs.len(),
                events = schedule.events().count(),
                remaining_hours = schedule.remaining_hours,
                "schedule generated"
            );
        }
        Err(err) => {
            let label = match err {
                AppError::RouteUnavailable(_) => "route_unavailable",
                _ => "error",
            };
            state
                .metrics
                .schedules_generated_total
                .with_label_values(&[label])
                .inc();

            error!(trip_id = %trip.id, error = %err, "failed to generate schedule");
        }
    }

    result
}
