// Prometheus metrics definitions for the babbler.

use lazy_static::lazy_static;
use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // ── Gauges ───────────────────────────────────────────────────────

    /// Corpus chains loaded and published. 0 until the background load
    /// finishes, then stable for the process lifetime.
    pub static ref CHAINS_LOADED: IntGauge =
        IntGauge::new("babbler_chains_loaded", "Corpus chains loaded and published").unwrap();

    // ── Counters ─────────────────────────────────────────────────────

    /// Pages served, by kind (babble, status, loading, root).
    pub static ref PAGES_SERVED_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("babbler_pages_served_total", "Pages served"),
        &["kind"],
    )
    .unwrap();

    // ── Histograms ───────────────────────────────────────────────────

    /// Time spent loading one corpus file, in seconds.
    pub static ref CHAIN_LOAD_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new("babbler_chain_load_seconds", "Corpus file load time in seconds")
            .buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
    )
    .unwrap();
}

/// Register all metrics with the custom registry. Call once at startup.
pub fn register_metrics() {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CHAINS_LOADED.clone()),
        Box::new(PAGES_SERVED_TOTAL.clone()),
        Box::new(CHAIN_LOAD_SECONDS.clone()),
    ];

    for c in collectors {
        REGISTRY.register(c).expect("failed to register metric");
    }
}

/// Serialize all registered metrics to the Prometheus text exposition format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}
