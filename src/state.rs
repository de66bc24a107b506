use std::sync::Arc;

use crate::observability::metrics::Metrics;
use crate::routing::RouteProvider;
use crate::store::{MemoryStore, TripRepository};

pub struct AppState {
    pub store: Arc<dyn TripRepository>,
    pub routes: Arc<dyn RouteProvider>,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(routes: Arc<dyn RouteProvider>) -> Self {
        Self::with_store(Arc::new(MemoryStore::new()), routes)
    }

    pub fn with_store(store: Arc<dyn TripRepository>, routes: Arc<dyn RouteProvider>) -> Self {
        let metrics = Metrics::new();
        metrics.trips_stored.set(store.trip_count() as i64);

        Self {
            store,
            routes,
            metrics,
        }
    }
}
