//! HTTP/2-over-TLS side listener with an on-disk self-signed certificate.

pub mod cert;
pub mod h2;

pub use cert::{ensure_self_signed, server_config, CertError, CertPaths};
