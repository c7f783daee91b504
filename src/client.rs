use std::fmt;
use std::time::Duration;

use crate::aggregation::{AggTypeMap, AggregationType};
use crate::error::{Error, Result};
use crate::protocol::{format_timestamp, EventOptions, MetricEvent};
use crate::transport::Receipt;
use crate::MetricOptions;

impl<T: Into<MetricOptions>> From<T> for Metric {
    fn from(o: T) -> Metric {
        Metric::with_options(o.into())
    }
}

/// The metric facade.
///
/// The facade turns typed recording calls (`increment`, `gauge`, `timing`,
/// ...) into a [`MetricEvent`] and hands it to the transport configured in
/// its [`MetricOptions`]. It keeps no state besides its options and the
/// aggregation label table that was finalized on creation.
///
/// # Examples
///
/// ```
/// use eventsd_metric::{BoxError, Metric, MetricEvent, MetricOptions};
///
/// let metric = Metric::with_options(MetricOptions::configure(|opts| {
///     opts.set_send(|event: MetricEvent| -> Result<(), BoxError> {
///         assert_eq!(event.agg_type, "gauge");
///         Ok(())
///     })
/// }));
/// metric.gauge("cpu_pct", 42.5, None).unwrap();
/// ```
pub struct Metric {
    options: MetricOptions,
    agg_type: AggTypeMap,
}

impl fmt::Debug for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metric")
            .field("enabled", &self.is_enabled())
            .field("agg_type", &self.agg_type)
            .field("options", &self.options)
            .finish()
    }
}

impl Metric {
    /// Creates a new facade for the given options.
    ///
    /// The aggregation label table is taken from `agg_type` or falls back to
    /// the built-in labels, and stays fixed for the lifetime of the facade.
    /// A missing transport is not an error here; it surfaces on the first
    /// recording call.
    pub fn with_options(options: MetricOptions) -> Metric {
        let agg_type = options.agg_type.clone().unwrap_or_default();
        metric_debug!(
            options,
            "creating metric facade: client={}, send_override={}, format_args={}",
            options.client.is_some(),
            options.send.is_some(),
            options.format_args.is_some()
        );
        Metric { options, agg_type }
    }

    /// Returns the options of this facade.
    pub fn options(&self) -> &MetricOptions {
        &self.options
    }

    /// Returns the finalized aggregation label table.
    pub fn agg_type(&self) -> &AggTypeMap {
        &self.agg_type
    }

    /// Quick check if a transport or send override is configured.
    pub fn is_enabled(&self) -> bool {
        self.options.send.is_some() || self.options.client.is_some()
    }

    /// Sends a metric with the given aggregation type.
    ///
    /// All typed recording methods funnel through here. The event time
    /// defaults to the current time of the configured clock.
    pub fn send(
        &self,
        name: &str,
        value: f64,
        agg_type: AggregationType,
        options: Option<EventOptions>,
    ) -> Result<Receipt> {
        let event = self.prepare_event(name, value, agg_type, options.unwrap_or_default());
        self.send_event(event)
    }

    /// Dispatches a prebuilt event.
    ///
    /// The event goes through `format_args` if configured and is then handed
    /// to the `send` override or, without one, to the client. The
    /// [`Receipt`] of the dispatch target is returned as is.
    pub fn send_event(&self, event: MetricEvent) -> Result<Receipt> {
        let event = match self.options.format_args {
            Some(ref format_args) => format_args(event),
            None => event,
        };

        let rv = if let Some(ref send) = self.options.send {
            metric_debug!(self.options, "dispatching {} via send override", event.name);
            send(event)
        } else if let Some(ref client) = self.options.client {
            metric_debug!(self.options, "dispatching {} via client", event.name);
            client.send(event)
        } else {
            metric_debug!(self.options, "dropping {}: no transport configured", event.name);
            return Err(Error::MissingTransport);
        };

        rv.map_err(|err| {
            metric_debug!(self.options, "transport failed: {}", err);
            Error::Transport(err)
        })
    }

    fn prepare_event(
        &self,
        name: &str,
        value: f64,
        agg_type: AggregationType,
        options: EventOptions,
    ) -> MetricEvent {
        let time = options.time.unwrap_or_else(|| self.options.clock.now());
        MetricEvent {
            name: name.to_string(),
            value,
            agg_type: self.agg_type.label(agg_type).to_string(),
            meta: options.meta,
            time: format_timestamp(&time),
            extra: options.extra,
        }
    }

    /// Increments a counter by one.
    pub fn incr(&self, name: &str) -> Result<Receipt> {
        self.increment(name, 1.0, None)
    }

    /// Increments a counter by `value`.
    pub fn increment(
        &self,
        name: &str,
        value: f64,
        options: Option<EventOptions>,
    ) -> Result<Receipt> {
        self.send(name, value, AggregationType::Sum, options)
    }

    /// Decrements a counter by one.
    pub fn decr(&self, name: &str) -> Result<Receipt> {
        self.decrement(name, 1.0, None)
    }

    /// Decrements a counter by `value`.
    ///
    /// This is an increment by the negated value.
    pub fn decrement(
        &self,
        name: &str,
        value: f64,
        options: Option<EventOptions>,
    ) -> Result<Receipt> {
        self.increment(name, -value, options)
    }

    impl_recorder! {
        /// Tracks the minimum value.
        min => Min
    }

    impl_recorder! {
        /// Tracks the maximum value.
        max => Max
    }

    impl_recorder! {
        /// Tracks the mean value.
        mean => Mean
    }

    /// Same as [`mean`](Self::mean), but discards the result.
    #[deprecated = "use `mean` instead"]
    pub fn average(&self, name: &str, value: f64, options: Option<EventOptions>) {
        let _ = self.mean(name, value, options);
    }

    impl_recorder! {
        /// Sets a gauge. The backend keeps the last value it receives.
        gauge => Gauge
    }

    impl_recorder! {
        /// Tracks mean, standard deviation, min, max and count of the values.
        timing => Timing
    }

    /// Records a timing from a `Duration`, in milliseconds.
    pub fn timing_duration(
        &self,
        name: &str,
        duration: Duration,
        options: Option<EventOptions>,
    ) -> Result<Receipt> {
        let millis =
            duration.as_secs() as f64 * 1000.0 + f64::from(duration.subsec_nanos()) / 1_000_000.0;
        self.timing(name, millis, options)
    }

    impl_recorder! {
        /// Tracks the count of unique values.
        unique => Unique
    }
}
