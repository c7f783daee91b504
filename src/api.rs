use std::sync::{Arc, RwLock};

use crate::aggregation::AggregationType;
use crate::client::Metric;
use crate::error::{Error, Result};
use crate::protocol::EventOptions;
use crate::transport::Receipt;

lazy_static::lazy_static! {
    static ref PROCESS_METRIC: RwLock<Option<Arc<Metric>>> = RwLock::new(None);
}

/// Binds a facade for the process-wide functions and returns the previous one.
///
/// Passing `None` unbinds the current facade.
pub fn bind(metric: Option<Arc<Metric>>) -> Option<Arc<Metric>> {
    let mut guard = PROCESS_METRIC
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    std::mem::replace(&mut *guard, metric)
}

/// Returns the currently bound facade if there is one.
pub fn current() -> Option<Arc<Metric>> {
    PROCESS_METRIC
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Unbinds `metric` if it is still the bound facade.
pub(crate) fn unbind(metric: &Arc<Metric>) {
    let mut guard = PROCESS_METRIC
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.as_ref().map_or(false, |bound| Arc::ptr_eq(bound, metric)) {
        *guard = None;
    }
}

fn with_metric<F>(f: F) -> Result<Receipt>
where
    F: FnOnce(&Metric) -> Result<Receipt>,
{
    match current() {
        Some(metric) => f(&metric),
        None => Err(Error::NotInitialized),
    }
}

/// Sends a metric through the bound facade.
///
/// See [`Metric::send`].
pub fn send(
    name: &str,
    value: f64,
    agg_type: AggregationType,
    options: Option<EventOptions>,
) -> Result<Receipt> {
    with_metric(|metric| metric.send(name, value, agg_type, options))
}

/// Increments a counter on the bound facade.
///
/// # Examples
///
/// ```
/// use eventsd_metric::{BoxError, MetricEvent, MetricOptions};
///
/// let _guard = eventsd_metric::init(MetricOptions::configure(|opts| {
///     opts.set_send(|_: MetricEvent| -> Result<(), BoxError> { Ok(()) })
/// }));
/// eventsd_metric::increment("requests", 1.0, None).unwrap();
/// ```
pub fn increment(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.increment(name, value, options))
}

/// Decrements a counter on the bound facade.
pub fn decrement(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.decrement(name, value, options))
}

/// Tracks a minimum on the bound facade.
pub fn min(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.min(name, value, options))
}

/// Tracks a maximum on the bound facade.
pub fn max(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.max(name, value, options))
}

/// Tracks a mean on the bound facade.
pub fn mean(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.mean(name, value, options))
}

/// Sets a gauge on the bound facade.
pub fn gauge(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.gauge(name, value, options))
}

/// Records a timing on the bound facade.
pub fn timing(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.timing(name, value, options))
}

/// Tracks a unique value on the bound facade.
pub fn unique(name: &str, value: f64, options: Option<EventOptions>) -> Result<Receipt> {
    with_metric(|metric| metric.unique(name, value, options))
}
