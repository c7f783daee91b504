use std::fmt;
use std::sync::Arc;

use crate::aggregation::AggTypeMap;
use crate::clock::{Clock, SystemClock};
use crate::error::BoxError;
use crate::protocol::MetricEvent;
use crate::transport::{Receipt, Transport};

/// Type alias for the hook that reshapes an event before dispatch.
pub type FormatArgsCallback = Arc<dyn Fn(MetricEvent) -> MetricEvent + Send + Sync>;

/// Type alias for the hook that replaces the client's send.
pub type SendCallback = Arc<dyn Fn(MetricEvent) -> Result<Receipt, BoxError> + Send + Sync>;

/// Configuration settings for the metric facade.
///
/// Every field has a documented default, so options are usually built with
/// struct update syntax:
///
/// ```
/// use std::sync::Arc;
/// use eventsd_metric::{MetricEvent, MetricOptions};
///
/// let options = MetricOptions {
///     debug: true,
///     format_args: Some(Arc::new(|mut event: MetricEvent| {
///         event.name = format!("api.{}", event.name);
///         event
///     })),
///     ..Default::default()
/// };
/// assert!(options.client.is_none());
/// ```
#[derive(Clone)]
pub struct MetricOptions {
    /// The transport metrics are sent to. (defaults to none)
    ///
    /// Sending fails with [`Error::MissingTransport`](crate::Error::MissingTransport)
    /// if neither this nor [`send`](Self::send) is set.
    pub client: Option<Arc<dyn Transport>>,
    /// Reshapes every event before it is dispatched. (defaults to none)
    pub format_args: Option<FormatArgsCallback>,
    /// Replaces dispatch to `client` entirely. (defaults to none)
    pub send: Option<SendCallback>,
    /// Overrides the aggregation labels. (defaults to the built-in labels)
    pub agg_type: Option<AggTypeMap>,
    /// The clock that supplies the default event time. (defaults to the system clock)
    pub clock: Arc<dyn Clock>,
    /// Enables debug logging through the `log` crate.
    pub debug: bool,
}

impl MetricOptions {
    /// Creates new Options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates new Options and immediately configures them.
    pub fn configure<F>(f: F) -> Self
    where
        F: FnOnce(&mut MetricOptions) -> &mut MetricOptions,
    {
        let mut opts = Self::new();
        f(&mut opts);
        opts
    }

    /// Set the transport metrics are sent to.
    pub fn set_client<T: Transport>(&mut self, client: T) -> &mut Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Whether a client has been set on these options.
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Set a hook that reshapes every event before dispatch.
    pub fn set_format_args<F>(&mut self, format_args: F) -> &mut Self
    where
        F: Fn(MetricEvent) -> MetricEvent + Send + Sync + 'static,
    {
        self.format_args = Some(Arc::new(format_args));
        self
    }

    /// Set a function that is called instead of the client.
    ///
    /// Whatever the function returns is handed back to the caller of the
    /// recording method as a [`Receipt`].
    pub fn set_send<F, R>(&mut self, send: F) -> &mut Self
    where
        F: Fn(MetricEvent) -> Result<R, BoxError> + Send + Sync + 'static,
        R: Into<Receipt>,
    {
        self.send = Some(Arc::new(
            move |event: MetricEvent| -> Result<Receipt, BoxError> { send(event).map(Into::into) },
        ));
        self
    }

    /// Override the aggregation labels.
    pub fn set_agg_type(&mut self, agg_type: Option<AggTypeMap>) -> &mut Self {
        self.agg_type = agg_type;
        self
    }

    /// The aggregation label override, if any.
    pub fn agg_type(&self) -> Option<&AggTypeMap> {
        self.agg_type.as_ref()
    }

    /// Set the clock used for default event times.
    pub fn set_clock<C: Clock>(&mut self, clock: C) -> &mut Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Enables/disables debug logging.
    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    /// Whether debug logging is enabled.
    pub fn debug(&self) -> bool {
        self.debug
    }
}

impl fmt::Debug for MetricOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Debug)]
        struct Client;
        let client = self.client.as_ref().map(|_| Client);
        #[derive(Debug)]
        struct FormatArgs;
        let format_args = self.format_args.as_ref().map(|_| FormatArgs);
        #[derive(Debug)]
        struct SendOverride;
        let send = self.send.as_ref().map(|_| SendOverride);
        #[derive(Debug)]
        struct Clock;

        f.debug_struct("MetricOptions")
            .field("client", &client)
            .field("format_args", &format_args)
            .field("send", &send)
            .field("agg_type", &self.agg_type)
            .field("clock", &Clock)
            .field("debug", &self.debug)
            .finish()
    }
}

impl Default for MetricOptions {
    fn default() -> MetricOptions {
        MetricOptions {
            client: None,
            format_args: None,
            send: None,
            agg_type: None,
            clock: Arc::new(SystemClock),
            debug: false,
        }
    }
}
