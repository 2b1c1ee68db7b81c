pub mod fixtures;
pub mod flaky;
pub mod pacing;

pub use fixtures::{Fixture, FixtureStore};
pub use flaky::FailureGate;
pub use pacing::{MarkerSink, Pacer};
