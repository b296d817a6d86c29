//! Shared test support.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::note::ParseEnv;

/// Fixed clock and sequential ids for deterministic assertions.
pub(crate) struct FixedEnv {
    pub now: DateTime<Utc>,
    pub counter: u128,
}

impl FixedEnv {
    pub(crate) fn new() -> Self {
        Self { now: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(), counter: 0 }
    }
}

impl ParseEnv for FixedEnv {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn next_id(&mut self) -> Uuid {
        self.counter += 1;
        Uuid::from_u128(self.counter)
    }
}
