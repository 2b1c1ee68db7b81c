use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct Metrics {
    started: Instant,
    pub requests_total: AtomicU64,
    pub simulated_failures_total: AtomicU64,
    pub fixture_misses_total: AtomicU64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            requests_total: AtomicU64::new(0),
            simulated_failures_total: AtomicU64::new(0),
            fixture_misses_total: AtomicU64::new(0),
        }
    }

    pub fn uptime_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    pub fn inc_request(&self) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_simulated_failure(&self) {
        self.simulated_failures_total.fetch_add(1, Ordering::Relaxed);
    }
    pub fn inc_fixture_miss(&self) {
        self.fixture_misses_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests_total.load(Ordering::Relaxed)
    }
    pub fn simulated_failures(&self) -> u64 {
        self.simulated_failures_total.load(Ordering::Relaxed)
    }
    pub fn fixture_misses(&self) -> u64 {
        self.fixture_misses_total.load(Ordering::Relaxed)
    }
}
