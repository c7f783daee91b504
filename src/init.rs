use std::sync::Arc;

use crate::api::{bind, unbind};
use crate::client::Metric;
use crate::defaults::apply_defaults;
use crate::MetricOptions;

/// Helper struct that is returned from `init`.
///
/// When this is dropped the facade is unbound again, unless another facade
/// was bound in the meantime.
#[must_use = "when the init guard is dropped the facade is unbound and the process-wide \
              functions fail.  If you do want to ignore this use mem::forget on it."]
pub struct InitGuard(Arc<Metric>);

impl InitGuard {
    /// Quick check if the bound facade has a transport.
    pub fn is_enabled(&self) -> bool {
        self.0.is_enabled()
    }

    /// Returns the facade this guard keeps bound.
    pub fn metric(&self) -> &Arc<Metric> {
        &self.0
    }
}

impl Drop for InitGuard {
    fn drop(&mut self) {
        metric_debug!(self.0.options(), "dropping init guard -> unbinding facade");
        unbind(&self.0);
    }
}

/// Creates the metric facade for the given options and binds it process-wide.
///
/// Environment defaults are applied to the options first (see
/// [`apply_defaults`](crate::apply_defaults)). The returned guard keeps the
/// facade bound; the free functions like [`increment`](crate::increment)
/// forward to it.
///
/// # Examples
///
/// ```
/// let _metric = eventsd_metric::init(eventsd_metric::MetricOptions::default());
/// assert!(eventsd_metric::current().is_some());
/// ```
pub fn init<O: Into<MetricOptions>>(options: O) -> InitGuard {
    let metric = Arc::new(Metric::with_options(apply_defaults(options.into())));
    bind(Some(metric.clone()));
    if metric.is_enabled() {
        metric_debug!(metric.options(), "bound metric facade");
    } else {
        metric_debug!(
            metric.options(),
            "bound metric facade without transport; sends will fail"
        );
    }
    InitGuard(metric)
}
