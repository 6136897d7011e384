use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    pub orders_created_total: IntCounter,
    pub status_updates_total: IntCounterVec,
    pub optimize_runs_total: IntCounter,
    pub optimize_latency_seconds: Histogram,
    pub batched_orders: IntGauge,
    pub unbatched_orders: IntGauge,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let orders_created_total =
            IntCounter::new("orders_created_total", "Total orders placed")
                .expect("valid orders_created_total metric");

        let status_updates_total = IntCounterVec::new(
            Opts::new("status_updates_total", "Status updates by new status"),
            &["status"],
        )
        .expect("valid status_updates_total metric");

        let optimize_runs_total =
            IntCounter::new("optimize_runs_total", "Total batching passes computed")
                .expect("valid optimize_runs_total metric");

        let optimize_latency_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "optimize_latency_seconds",
                "Latency of a batching pass including the store read",
            )
            .buckets(vec![0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5]),
        )
        .expect("valid optimize_latency_seconds metric");

        let batched_orders = IntGauge::new(
            "batched_orders",
            "Orders assigned to a fleet by the latest batching pass",
        )
        .expect("valid batched_orders metric");

        let unbatched_orders = IntGauge::new(
            "unbatched_orders",
            "Placed orders left unbatched by the latest batching pass",
        )
        .expect("valid unbatched_orders metric");

        registry
            .register(Box::new(orders_created_total.clone()))
            .expect("register orders_created_total");
        registry
            .register(Box::new(status_updates_total.clone()))
            .expect("register status_updates_total");
        registry
            .register(Box::new(optimize_runs_total.clone()))
            .expect("register optimize_runs_total");
        registry
            .register(Box::new(optimize_latency_seconds.clone()))
            .expect("register optimize_latency_seconds");
        registry
            .register(Box::new(batched_orders.clone()))
            .expect("register batched_orders");
        registry
            .register(Box::new(unbatched_orders.clone()))
            .expect("register unbatched_orders");

        Self {
            registry,
            orders_created_total,
            status_updates_total,
            optimize_runs_total,
            optimize_latency_seconds,
            batched_orders,
            unbatched_orders,
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
