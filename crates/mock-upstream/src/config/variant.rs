use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which flavour of mock upstream to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Cookie session counter routes only.
    Session,
    /// Session routes, `/api` fixtures and the HTTP/2 listener.
    Api,
    /// Every GET answers `{}` after a fixed delay.
    Delayed,
}

impl Variant {
    pub fn default_port(self) -> u16 {
        match self {
            Variant::Session => 3000,
            Variant::Api | Variant::Delayed => 9000,
        }
    }

    pub fn default_delay_ms(self) -> u64 {
        match self {
            Variant::Delayed => 200,
            Variant::Session | Variant::Api => 0,
        }
    }

    /// Only the api variant carries the TLS listener.
    pub fn serves_http2(self) -> bool {
        matches!(self, Variant::Api)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Session => "session",
            Variant::Api => "api",
            Variant::Delayed => "delayed",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
