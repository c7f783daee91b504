//! This crate provides a small facade for emitting application metrics to an
//! eventsD collection backend.
//!
//! The facade does not talk to the network itself. It standardizes a fixed
//! set of aggregation semantics (sum, min, max, mean, timing, gauge, unique)
//! and hands every recorded value as a [`MetricEvent`] to a pluggable
//! [`Transport`].
//!
//! # Quickstart
//!
//! ```
//! use std::sync::Arc;
//! use eventsd_metric::{BoxError, Metric, MetricEvent, MetricOptions};
//!
//! let metric = Metric::with_options(MetricOptions {
//!     client: Some(Arc::new(|event: MetricEvent| -> Result<(), BoxError> {
//!         println!("{}", serde_json::to_string(&event)?);
//!         Ok(())
//!     })),
//!     ..Default::default()
//! });
//!
//! metric.incr("requests").unwrap();
//! metric.decrement("queue_depth", 3.0, None).unwrap();
//! metric.gauge("cpu_pct", 42.5, None).unwrap();
//! ```
//!
//! # Configuration
//!
//! [`MetricOptions`] carries the transport (`client`), an optional `send`
//! override that replaces the client, an optional `format_args` hook that
//! reshapes each event before dispatch, an optional aggregation label
//! override ([`AggTypeMap`]) and the clock used for default event times.
//!
//! # Process-wide usage
//!
//! Applications that want a single facade for the whole process can bind one
//! with [`init`] and use the free functions:
//!
//! ```
//! use eventsd_metric::{BoxError, MetricEvent, MetricOptions};
//!
//! let _guard = eventsd_metric::init(MetricOptions::configure(|opts| {
//!     opts.set_send(|_: MetricEvent| -> Result<(), BoxError> { Ok(()) })
//! }));
//! eventsd_metric::timing("request.duration", 17.0, None).unwrap();
//! ```
//!
//! # Features
//!
//! - `feature = "test"`: Activates the [`test`] module with a transport that
//!   captures events and a fixed clock.
#![warn(missing_docs)]

// macros; these need to be first to be used by other modules
#[macro_use]
mod macros;

mod aggregation;
mod api;
mod client;
mod clientoptions;
mod clock;
mod constants;
mod defaults;
mod error;
mod init;
pub mod protocol;
mod transport;

// public api or exports from this crate
pub use crate::aggregation::{AggTypeMap, AggregationType};
pub use crate::api::{
    bind, current, decrement, gauge, increment, max, mean, min, send, timing, unique,
};
pub use crate::client::Metric;
pub use crate::clientoptions::{FormatArgsCallback, MetricOptions, SendCallback};
pub use crate::clock::{Clock, SystemClock};
pub use crate::constants::VERSION;
pub use crate::defaults::apply_defaults;
pub use crate::error::{AggTypeError, BoxError, Error, Result};
pub use crate::init::{init, InitGuard};
pub use crate::protocol::{EventOptions, MetricEvent};
pub use crate::transport::{Receipt, Transport};

// test utilities
#[cfg(any(test, feature = "test"))]
pub mod test;
