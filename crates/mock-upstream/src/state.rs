use std::sync::Arc;

use crate::config::{Settings, Variant};
use crate::metrics::Metrics;
use crate::services::{FailureGate, FixtureStore, Pacer};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub variant: Variant,
    pub settings: Arc<Settings>,
    pub fixtures: Arc<FixtureStore>,
    pub pacer: Arc<Pacer>,
    pub failures: FailureGate,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(settings: Settings, variant: Variant) -> Self {
        Self {
            variant,
            fixtures: Arc::new(FixtureStore::new(settings.fixtures.root.clone())),
            pacer: Arc::new(Pacer::from_config(&settings.pacing)),
            failures: FailureGate::new(settings.flaky.one_in),
            metrics: Arc::new(Metrics::new()),
            settings: Arc::new(settings),
        }
    }
}

