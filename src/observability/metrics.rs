use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub schedules_generated_total: IntCounterVec,
    pub route_lookup_seconds: HistogramVec,
    pub trips_stored: IntGauge,
    pub daily_logs_per_schedule: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let schedules_generated_total = IntCounterVec::new(
            Opts::new("schedules_generated_total", "Total schedule generations by outcome"),
            &["outcome"],
        )
        .expect("valid schedules_generated_total metric");

        let route_lookup_seconds = HistogramVec::new(
            HistogramOpts::new(
                "route_lookup_seconds",
                "Latency of geocoding and routing lookups in seconds",
            ),
            &["outcome"],
        )
        .expect("valid route_lookup_seconds metric");

        let trips_stored = IntGauge::new("trips_stored", "Current number of stored trips")
            .expect("valid trips_stored metric");

        let daily_logs_per_schedule = Histogram::with_opts(
            HistogramOpts::new(
                "daily_logs_per_schedule",
                "Number of on-duty windows in generated schedules",
            )
            .buckets(vec![1.0, 2.0, 3.0, 5.0, 8.0, 13.0]),
        )
        .expect("valid daily_logs_per_schedule metric");

        registry
            .register(Box::new(schedules_generated_total.clone()))
            .expect("register schedules_generated_total");
        registry
            .register(Box::new(route_lookup_seconds.clone()))
            .expect("register route_lookup_seconds");
        registry
            .register(Box::new(trips_stored.clone()))
            .expect("register trips_stored");
        registry
            .register(Box::new(daily_logs_per_schedule.clone()))
            .expect("register daily_logs_per_schedule");

        Self {
            registry,
            schedules_generated_total,
            route_lookup_seconds,
            trips_stored,
            daily_logs_per_schedule,
        }
    }

    pub fn encode(&self) -> Result<String, String> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();

        TextEncoder::new()
            .encode(&metric_families, &mut buffer)
            .map_err(|err| format!("failed to encode metrics: {err}"))?;

        String::from_utf8(buffer).map_err(|err| format!("metrics are not valid utf8: {err}"))
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
