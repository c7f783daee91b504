//! This provides testing functionality for building tests.
//!
//! **Feature:** `test` (*disabled by default*)
//!
//! If the crate has been compiled with the test feature this module becomes
//! available and provides a transport that captures events instead of
//! sending them, plus a clock that never moves.
//!
//! # Example usage
//!
//! ```
//! use std::sync::Arc;
//! use eventsd_metric::test::{FixedClock, TestTransport};
//! use eventsd_metric::{Metric, MetricOptions};
//!
//! let transport = TestTransport::new();
//! let metric = Metric::with_options(MetricOptions {
//!     client: Some(transport.clone()),
//!     clock: Arc::new(FixedClock::epoch()),
//!     ..Default::default()
//! });
//! metric.incr("requests").unwrap();
//!
//! let events = transport.fetch_and_clear_events();
//! assert_eq!(events.len(), 1);
//! assert_eq!(events[0].time, "1970-01-01T00:00:00.000Z");
//! ```

use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};

use crate::clock::Clock;
use crate::error::BoxError;
use crate::protocol::MetricEvent;
use crate::transport::{Receipt, Transport};

/// Collects events instead of sending them.
#[derive(Debug, Default)]
pub struct TestTransport {
    collected: Mutex<Vec<MetricEvent>>,
    failure: Mutex<Option<String>>,
}

impl TestTransport {
    /// Creates a new test transport.
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Arc<TestTransport> {
        Arc::new(TestTransport::default())
    }

    /// Makes every following send fail with the given message.
    ///
    /// Failed sends are not collected.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.lock().unwrap() = Some(message.into());
    }

    /// Fetches and clears the contained events.
    pub fn fetch_and_clear_events(&self) -> Vec<MetricEvent> {
        let mut guard = self.collected.lock().unwrap();
        std::mem::take(&mut *guard)
    }
}

impl Transport for TestTransport {
    fn send(&self, event: MetricEvent) -> Result<Receipt, BoxError> {
        if let Some(ref message) = *self.failure.lock().unwrap() {
            return Err(message.clone().into());
        }
        self.collected.lock().unwrap().push(event);
        Ok(Receipt::empty())
    }
}

/// A clock that always returns the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A clock stuck at the unix epoch.
    pub fn epoch() -> FixedClock {
        FixedClock(Utc.timestamp_opt(0, 0).unwrap())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
