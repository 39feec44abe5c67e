// tests/support/mocks/time.rs
use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Deterministic timestamp shared by the mocks.
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
        .expect("invalid RFC3339 in tests/support/mocks/time.rs")
        .with_timezone(&Utc)
}

/// Always reports [`fixed_now`].
#[derive(Clone, Debug, Default)]
pub struct DummyClock;

impl bazaar_core::application::ports::time::Clock for DummyClock {
    fn now(&self) -> DateTime<Utc> {
        fixed_now()
    }
}

/// Advances one second per call so created rows get distinct timestamps.
#[derive(Debug)]
pub struct TickingClock {
    current: Mutex<DateTime<Utc>>,
}

impl Default for TickingClock {
    fn default() -> Self {
        Self {
            current: Mutex::new(fixed_now()),
        }
    }
}

impl bazaar_core::application::ports::time::Clock for TickingClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap();
        *current += Duration::seconds(1);
        *current
    }
}
