//! # Mock Upstream
//!
//! A deliberately simple HTTP upstream for exercising a benchmark client:
//! canned fixtures, a cookie session counter, a flaky endpoint, artificial
//! latency and an optional HTTP/2-over-TLS listener.

pub mod cli;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod router;
pub mod server;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod tls;
pub mod utils;
