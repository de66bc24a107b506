//! Trip and log-entry persistence.

use dashmap::DashMap;
use uuid::Uuid;

use crate::models::log::LogEntry;
use crate::models::trip::Trip;

pub trait TripRepository: Send + Sync {
    fn insert_trip(&self, trip: Trip);
    fn get_trip(&self, id: Uuid) -> Option<Trip>;
    /// Oldest first.
    fn list_trips(&self) -> Vec<Trip>;
    /// Returns the stored trip, or `None` if no trip has that id.
    fn update_trip(&self, trip: Trip) -> Option<Trip>;
    /// Removes the trip and every log entry that belongs to it.
    fn delete_trip(&self, id: Uuid) -> Option<Trip>;
    fn trip_count(&self) -> usize;

    fn insert_log_entry(&self, entry: LogEntry);
    fn get_log_entry(&self, id: Uuid) -> Option<LogEntry>;
    /// Ordered by time; filtered to one trip when `trip_id` is given.
    fn list_log_entries(&self, trip_id: Option<Uuid>) -> Vec<LogEntry>;
    fn update_log_entry(&self, entry: LogEntry) -> Option<LogEntry>;
    fn delete_log_entry(&self, id: Uuid) -> Option<LogEntry>;
    fn log_entry_count(&self) -> usize;
}

#[derive(Default)]
pub struct MemoryStore {
    trips: DashMap<Uuid, Trip>,
    log_entries: DashMap<Uuid, LogEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TripRepository for MemoryStore {
    fn insert_trip(&self, trip: Trip) {
        self.trips.insert(trip.id, trip);
    }

    fn get_trip(&self, id: Uuid) -> Option<Trip> {
        self.trips.get(&id).map(|entry| entry.value().clone())
    }

    fn list_trips(&self) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self
            .trips
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        trips.sort_by_key(|trip| trip.created_at);
        trips
    }

    fn update_trip(&self, trip: Trip) -> Option<Trip> {
        let mut stored = self.trips.get_mut(&trip.id)?;
        *stored = trip;
        Some(stored.clone())
    }

    fn delete_trip(&self, id: Uuid) -> Option<Trip> {
        let (_, trip) = self.trips.remove(&id)?;
        self.log_entries.retain(|_, entry| entry.trip_id != id);
        Some(trip)
    }

    fn trip_count(&self) -> usize {
        self.trips.len()
    }

    fn insert_log_entry(&self, entry: LogEntry) {
        self.log_entries.insert(entry.id, entry);
    }

    fn get_log_entry(&self, id: Uuid) -> Option<LogEntry> {
        self.log_entries.get(&id).map(|entry| entry.value().clone())
    }

    fn list_log_entries(&self, trip_id: Option<Uuid>) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = self
            .log_entries
            .iter()
            .filter(|entry| trip_id.is_none_or(|id| entry.trip_id == id))
            .map(|entry| entry.value().clone())
            .collect();
        entries.sort_by_key(|entry| entry.time);
        entries
    }

    fn update_log_entry(&self, entry: LogEntry) -> Option<LogEntry> {
        let mut stored = self.log_entries.get_mut(&entry.id)?;
        *stored = entry;
        Some(stored.clone())
    }

    fn delete_log_entry(&self, id: Uuid) -> Option<LogEntry> {
        self.log_entries.remove(&id).map(|(_, entry)| entry)
    }

    fn log_entry_count(&self) -> usize {
        self.log_entries.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    use super::{MemoryStore, TripRepository};
    use crate::models::log::{DutyStatus, LogEntry};
    use crate::models::trip::Trip;

    fn trip(driver: &str) -> Trip {
        Trip {
            id: Uuid::new_v4(),
            driver_name: driver.to_string(),
            vehicle_id: "TRK-1".to_string(),
            current_location: "Reno, NV".to_string(),
            pickup_location: String::new(),
            dropoff_location: "Boise, ID".to_string(),
            cycle_used: 0,
            created_at: Utc::now(),
        }
    }

    fn entry(trip_id: Uuid, minutes: i64) -> LogEntry {
        LogEntry {
            id: Uuid::new_v4(),
            trip_id,
            time: Utc::now() + Duration::minutes(minutes),
            status: DutyStatus::Driving,
            remarks: String::new(),
        }
    }

    #[test]
    fn deleting_a_trip_removes_its_log_entries() {
        let store = MemoryStore::new();
        let kept = trip("Ann");
        let removed = trip("Bo");
        store.insert_trip(kept.clone());
        store.insert_trip(removed.clone());

        store.insert_log_entry(entry(kept.id, 0));
        store.insert_log_entry(entry(removed.id, 0));
        store.insert_log_entry(entry(removed.id, 5));

        assert!(store.delete_trip(removed.id).is_some());

        assert_eq!(store.trip_count(), 1);
        assert_eq!(store.log_entry_count(), 1);
        assert_eq!(store.list_log_entries(None)[0].trip_id, kept.id);
        assert!(store.delete_trip(removed.id).is_none());
    }

    #[test]
    fn log_entries_filter_by_trip_and_sort_by_time() {
        let store = MemoryStore::new();
        let a = trip("Ann");
        let b = trip("Bo");

        let late = entry(a.id, 30);
        let early = entry(a.id, -30);
        store.insert_log_entry(late.clone());
        store.insert_log_entry(entry(b.id, 0));
        store.insert_log_entry(early.clone());

        let for_a: Vec<Uuid> = store
            .list_log_entries(Some(a.id))
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(for_a, vec![early.id, late.id]);
        assert_eq!(store.list_log_entries(None).len(), 3);
    }

    #[test]
    fn update_requires_existing_record() {
        let store = MemoryStore::new();
        let mut stored = trip("Ann");
        store.insert_trip(stored.clone());

        stored.vehicle_id = "TRK-9".to_string();
        assert_eq!(store.update_trip(stored.clone()).unwrap().vehicle_id, "TRK-9");
        assert_eq!(store.get_trip(stored.id).unwrap().vehicle_id, "TRK-9");

        assert!(store.update_trip(trip("Ghost")).is_none());
        assert!(store.update_log_entry(entry(stored.id, 0)).is_none());
    }
}
