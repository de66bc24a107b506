//! Route-to-duty-log scheduling.
//!
//! Turns an ordered list of locations and the whole-route driving metrics into
//! a day-partitioned timeline of duty-status events under simplified
//! hours-of-service rules: an 11-hour driving cap, a 14-hour on-duty window and
//! a 10-hour reset between windows.

use chrono::{Duration, Local, NaiveDateTime};
use tracing::debug;

use crate::error::AppError;
use crate::models::log::{DailyLog, DutyEvent, DutyStatus, HoursSummary, ScheduleResult};
use crate::models::route::RouteMetrics;
use crate::models::trip::TripRequest;

pub const MAX_DRIVING_HOURS: f64 = 11.0;
pub const ON_DUTY_WINDOW_HOURS: f64 = 14.0;
pub const RESET_HOURS: f64 = 10.0;
/// Pickup/dropoff handling at the first and last location.
pub const TERMINAL_STOP_HOURS: f64 = 1.5;
pub const INTERMEDIATE_STOP_HOURS: f64 = 0.5;
pub const MILES_PER_FUEL_STOP: f64 = 1000.0;

pub const DRIVING_REMARKS: &str = "En route to next stop";

/// Generates a schedule starting at the current local time.
pub fn generate(trip: &TripRequest, metrics: RouteMetrics) -> Result<ScheduleResult, AppError> {
    generate_at(trip, metrics, Local::now().naive_local())
}

pub fn generate_at(
    trip: &TripRequest,
    metrics: RouteMetrics,
    start: NaiveDateTime,
) -> Result<ScheduleResult, AppError> {
    if trip.locations.len() < 2 {
        return Err(AppError::InvalidTrip(format!(
            "a trip needs an origin and a destination, got {} location(s)",
            trip.locations.len()
        )));
    }

    if !metrics.is_valid() {
        return Err(AppError::RouteUnavailable(format!(
            "route metrics are not usable: {} h, {} mi",
            metrics.duration_hours, metrics.distance_miles
        )));
    }

    let stops_count = trip.stops_count();
    let driving_hours = metrics.duration_hours.min(MAX_DRIVING_HOURS);
    // Summary overhead is pre-aggregated here and charged again per event below.
    let on_duty_hours =
        driving_hours + TERMINAL_STOP_HOURS + INTERMEDIATE_STOP_HOURS * stops_count as f64;
    let remaining_hours = (ON_DUTY_WINDOW_HOURS - on_duty_hours).max(0.0);
    let fuel_stops = (metrics.distance_miles / MILES_PER_FUEL_STOP).floor() as u64;

    let segments = (trip.locations.len() - 1).max(1) as f64;
    let segment_distance = metrics.distance_miles / segments;
    let segment_duration = driving_hours / segments;

    let daily_logs = simulate(&trip.locations, segment_distance, segment_duration, start);

    Ok(ScheduleResult {
        driver_name: trip.driver_name.clone(),
        vehicle_id: trip.vehicle_id.clone(),
        date: start.date(),
        remaining_hours,
        hours_summary: HoursSummary {
            total_driving_hours: driving_hours,
            total_on_duty_hours: on_duty_hours,
            fuel_stops,
        },
        daily_logs,
    })
}

fn simulate(
    locations: &[String],
    segment_distance: f64,
    segment_duration: f64,
    start: NaiveDateTime,
) -> Vec<DailyLog> {
    let last = locations.len() - 1;
    let mut clock = start;
    let mut odometer = 0.0;
    let mut window_hours = 0.0;
    let mut daily_logs = Vec::new();
    let mut current = DailyLog::default();

    for (i, location) in locations.iter().enumerate() {
        if window_hours >= ON_DUTY_WINDOW_HOURS {
            debug!(
                day = daily_logs.len() + 1,
                window_hours, "on-duty window exhausted, taking reset"
            );
            daily_logs.push(std::mem::take(&mut current));
            window_hours = 0.0;
            clock += hours(RESET_HOURS);
        }

        let terminal = i == 0 || i == last;
        let (status, dwell) = if terminal {
            (DutyStatus::OnDuty, TERMINAL_STOP_HOURS)
        } else {
            (DutyStatus::Stopped, INTERMEDIATE_STOP_HOURS)
        };

        current.events.push(DutyEvent {
            time: clock,
            status,
            remarks: format!("Stop at {location}"),
            odometer,
        });
        clock += hours(dwell);
        window_hours += dwell;

        if i < last {
            current.events.push(DutyEvent {
                time: clock,
                status: DutyStatus::Driving,
                remarks: DRIVING_REMARKS.to_string(),
                odometer: odometer + segment_distance,
            });
            odometer += segment_distance;
            clock += hours(segment_duration);
            window_hours += segment_duration;
        }
    }

    if !current.is_empty() {
        daily_logs.push(current);
    }

    daily_logs
}

fn hours(value: f64) -> Duration {
    Duration::microseconds((value * 3_600_000_000.0).round() as i64)
}
