use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Wall-clock format of event times on the wire, e.g. `07:30:00 PM`.
pub const CLOCK_FORMAT: &str = "%I:%M:%S %p";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DutyStatus {
    #[serde(rename = "ON DUTY")]
    OnDuty,
    #[serde(rename = "DRIVING")]
    Driving,
    #[serde(rename = "STOPPED")]
    Stopped,
}

#[derive(Debug, Clone, Serialize)]
pub struct DutyEvent {
    #[serde(serialize_with = "serialize_clock")]
    pub time: NaiveDateTime,
    pub status: DutyStatus,
    pub remarks: String,
    pub odometer: f64,
}

fn serialize_clock<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format(CLOCK_FORMAT))
}

/// Events of one 14-hour on-duty window.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DailyLog {
    pub events: Vec<DutyEvent>,
}

impl DailyLog {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HoursSummary {
    pub total_driving_hours: f64,
    pub total_on_duty_hours: f64,
    pub fuel_stops: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScheduleResult {
    pub driver_name: String,
    pub vehicle_id: String,
    pub date: NaiveDate,
    pub remaining_hours: f64,
    pub hours_summary: HoursSummary,
    pub daily_logs: Vec<DailyLog>,
}

impl ScheduleResult {
    pub fn events(&self) -> impl Iterator<Item = &DutyEvent> {
        self.daily_logs.iter().flat_map(|log| log.events.iter())
    }
}

/// A duty-status record stored against a trip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: Uuid,
    #[serde(rename = "trip")]
    pub trip_id: Uuid,
    pub time: DateTime<Utc>,
    pub status: DutyStatus,
    pub remarks: String,
}
