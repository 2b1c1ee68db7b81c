use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::PacingConfig;

/// Where markers go.
#[derive(Debug, Clone)]
pub enum MarkerSink {
    Stdout,
    /// In-memory capture, used when asserting which routes were hit.
    Buffer(Arc<Mutex<Vec<u8>>>),
}

impl MarkerSink {
    pub fn buffer() -> (Self, Arc<Mutex<Vec<u8>>>) {
        let buf = Arc::new(Mutex::new(Vec::new()));
        (Self::Buffer(buf.clone()), buf)
    }

    fn emit(&self, marker: char) {
        match self {
            MarkerSink::Stdout => write_marker(&mut std::io::stdout().lock(), marker),
            MarkerSink::Buffer(buf) => {
                if let Ok(mut buf) = buf.lock() {
                    write_marker(&mut *buf, marker);
                }
            }
        }
    }
}

/// Artificial latency plus the optional stdout marker the benchmark harness
/// counts to see which routes were hit.
#[derive(Debug, Clone)]
pub struct Pacer {
    delay: Duration,
    output: bool,
    sink: MarkerSink,
}

impl Pacer {
    pub fn new(delay: Duration, output: bool) -> Self {
        Self {
            delay,
            output,
            sink: MarkerSink::Stdout,
        }
    }

    pub fn with_sink(mut self, sink: MarkerSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn from_config(cfg: &PacingConfig) -> Self {
        Self::new(Duration::from_millis(cfg.delay_ms), cfg.output)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn output_enabled(&self) -> bool {
        self.output
    }

    /// Waits out the delay without blocking the worker, then emits `marker`.
    pub async fn pace(&self, marker: char) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if self.output {
            self.sink.emit(marker);
        }
    }
}

fn write_marker<W: Write>(out: &mut W, marker: char) {
    let mut buf = [0u8; 4];
    // stdout going away must not fail the request
    let _ = out.write_all(marker.encode_utf8(&mut buf).as_bytes());
    let _ = out.flush();
}
