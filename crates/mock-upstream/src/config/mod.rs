pub mod settings;
pub mod variant;

pub use settings::{
    FixturesConfig, FlakyConfig, Http2Config, PacingConfig, ServerConfig, SessionConfig, Settings,
};
pub use variant::Variant;
