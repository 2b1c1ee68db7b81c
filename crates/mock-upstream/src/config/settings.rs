use anyhow::Result;
use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

use super::Variant;

/// Delay applied before paced responses, in milliseconds.
pub const DELAY_ENV: &str = "DELAY_MS";
/// Turns on per-request marker characters on stdout.
pub const OUTPUT_ENV: &str = "OUTPUT";

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub fixtures: FixturesConfig,
    pub session: SessionConfig,
    pub flaky: FlakyConfig,
    pub pacing: PacingConfig,
    pub http2: Http2Config,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FixturesConfig {
    pub root: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Drop sessions idle for this long. `None` keeps them for the process lifetime.
    #[serde(default)]
    pub idle_timeout_secs: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FlakyConfig {
    /// One failure per `one_in` draws on average; 0 disables failures.
    pub one_in: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PacingConfig {
    pub delay_ms: u64,
    pub output: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Http2Config {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    pub subject_alt_names: Vec<String>,
    pub body: String,
}

impl Settings {
    /// Layered load: variant defaults, `config/settings.*`, `MOCK__*` env,
    /// then the plain `DELAY_MS` / `OUTPUT` variables.
    pub fn load(variant: Variant) -> Result<Self> {
        let builder = defaults_builder(variant)?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("MOCK")
                    .separator("__")
                    .try_parsing(true),
            );

        let builder = with_plain_env(
            builder,
            std::env::var(DELAY_ENV).ok(),
            std::env::var(OUTPUT_ENV).ok(),
        )?;

        let settings: Settings = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Built-in defaults only, no file or environment lookups.
    pub fn defaults(variant: Variant) -> Result<Self, ConfigError> {
        defaults_builder(variant)?.build()?.try_deserialize()
    }
}

fn defaults_builder(variant: Variant) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let delay_ms = i64::try_from(variant.default_delay_ms()).unwrap_or(i64::MAX);

    Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", i64::from(variant.default_port()))?
        .set_default("fixtures.root", "responses")?
        .set_default("session.cookie_name", "connect.sid")?
        .set_default("flaky.one_in", 51_i64)?
        .set_default("pacing.delay_ms", delay_ms)?
        .set_default("pacing.output", false)?
        .set_default("http2.enabled", variant.serves_http2())?
        .set_default("http2.host", "0.0.0.0")?
        .set_default("http2.port", 9443_i64)?
        .set_default("http2.cert_path", "certs/localhost-cert.pem")?
        .set_default("http2.key_path", "certs/localhost-privkey.pem")?
        .set_default("http2.subject_alt_names", vec!["localhost", "127.0.0.1"])?
        .set_default("http2.body", "Hello from HTTP/2!")
}

fn with_plain_env(
    builder: ConfigBuilder<DefaultState>,
    delay_ms: Option<String>,
    output: Option<String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let delay_ms = delay_ms.as_deref().and_then(|raw| {
        let parsed = parse_delay_ms(raw);
        if parsed.is_none() {
            warn!("Ignoring {}={:?}: not a non-negative integer", DELAY_ENV, raw);
        }
        parsed
    });
    let output = output.as_deref().map(output_enabled);

    builder
        .set_override_option("pacing.delay_ms", delay_ms)?
        .set_override_option("pacing.output", output)
}

/// Parses a `DELAY_MS` value. Negative or non-numeric values are rejected.
pub fn parse_delay_ms(raw: &str) -> Option<i64> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .and_then(|ms| i64::try_from(ms).ok())
}

/// `OUTPUT` counts as set unless it is empty, `0` or `false`.
pub fn output_enabled(raw: &str) -> bool {
    let value = raw.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}
