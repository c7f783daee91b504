use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::protocol::MetricEvent;

/// The value a transport hands back for a dispatched event.
///
/// Fire-and-forget transports return an empty receipt; `()` converts into
/// one. Transports that queue events can return a ticket or a completion
/// handle instead, which reaches the caller of the recording method
/// unchanged and is recovered with [`downcast`](Receipt::downcast).
pub struct Receipt(Option<Box<dyn Any + Send>>);

impl Receipt {
    /// Wraps a value produced by a transport.
    pub fn new<T: Any + Send>(value: T) -> Receipt {
        Receipt(Some(Box::new(value)))
    }

    /// A receipt that carries nothing.
    pub fn empty() -> Receipt {
        Receipt(None)
    }

    /// Whether the transport returned no value.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// Returns a reference to the carried value if it is a `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        match self.0 {
            Some(ref value) => value.downcast_ref::<T>(),
            None => None,
        }
    }

    /// Takes the carried value out if it is a `T`.
    ///
    /// The receipt is handed back unchanged on a type mismatch.
    pub fn downcast<T: Any>(self) -> Result<T, Receipt> {
        match self.0 {
            Some(value) => match value.downcast::<T>() {
                Ok(value) => Ok(*value),
                Err(value) => Err(Receipt(Some(value))),
            },
            None => Err(Receipt(None)),
        }
    }
}

impl Default for Receipt {
    fn default() -> Receipt {
        Receipt::empty()
    }
}

impl From<()> for Receipt {
    fn from(_: ()) -> Receipt {
        Receipt::empty()
    }
}

impl fmt::Debug for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receipt")
            .field("empty", &self.is_empty())
            .finish()
    }
}

/// The trait for transports.
///
/// A transport is responsible for getting a [`MetricEvent`] to the eventsD
/// backend. The facade calls [`send`](Transport::send) exactly once per
/// recording operation and returns whatever the transport returns. Queueing,
/// retries and backpressure are up to the implementation.
///
/// Closures of the shape `Fn(MetricEvent) -> Result<R, BoxError>` are
/// transports as well, as long as `R` converts into a [`Receipt`]:
///
/// ```
/// use std::sync::Arc;
/// use eventsd_metric::{BoxError, Metric, MetricEvent, MetricOptions};
///
/// let metric = Metric::with_options(MetricOptions {
///     client: Some(Arc::new(|event: MetricEvent| -> Result<(), BoxError> {
///         println!("{} {}", event.name, event.value);
///         Ok(())
///     })),
///     ..Default::default()
/// });
/// assert!(metric.incr("requests").unwrap().is_empty());
/// ```
pub trait Transport: Send + Sync + 'static {
    /// Sends a metric event.
    fn send(&self, event: MetricEvent) -> Result<Receipt, BoxError>;
}

impl<F, R> Transport for F
where
    F: Fn(MetricEvent) -> Result<R, BoxError> + Send + Sync + 'static,
    R: Into<Receipt>,
{
    fn send(&self, event: MetricEvent) -> Result<Receipt, BoxError> {
        self(event).map(Into::into)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, event: MetricEvent) -> Result<Receipt, BoxError> {
        (**self).send(event)
    }
}
