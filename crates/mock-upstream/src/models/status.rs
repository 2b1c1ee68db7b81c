use serde::{Deserialize, Serialize};

/// Fixed `{"status": ...}` payloads shared by the canned routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    pub const ROOT: StatusBody = StatusBody { status: ":D" };
    pub const OK: StatusBody = StatusBody { status: ":)" };
    pub const FAILED: StatusBody = StatusBody { status: ":(" };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterBody {
    pub counter: u64,
}
