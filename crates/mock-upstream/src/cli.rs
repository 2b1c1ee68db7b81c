use clap::Parser;
use std::path::PathBuf;

use crate::config::{Settings, Variant};

/// Mock HTTP upstream for benchmark runs
#[derive(Debug, Parser)]
#[command(name = "mock-upstream", version, about)]
pub struct Cli {
    /// Which set of routes to serve
    #[arg(value_enum, default_value_t = Variant::Api)]
    pub variant: Variant,

    /// Listen host (overrides configuration)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides the variant default)
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Directory holding the fixture files
    #[arg(long, value_name = "DIR")]
    pub fixtures: Option<PathBuf>,

    /// Do not start the HTTP/2 listener
    #[arg(long)]
    pub no_http2: bool,
}

impl Cli {
    /// Flags win over every other configuration source.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(dir) = &self.fixtures {
            settings.fixtures.root = dir.clone();
        }
        if self.no_http2 {
            settings.http2.enabled = false;
        }
    }
}
