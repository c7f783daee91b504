use std::env;

use crate::constants::DEBUG_ENV_VAR;
use crate::MetricOptions;

/// Fills in options from the environment.
///
/// Debug logging is turned on if `EVENTSD_METRIC_DEBUG` is set to `1`,
/// `true` or `yes`. Options that were set explicitly are left alone.
pub fn apply_defaults(mut opts: MetricOptions) -> MetricOptions {
    if !opts.debug {
        opts.debug = env::var(DEBUG_ENV_VAR)
            .map(|value| is_truthy(&value))
            .unwrap_or(false);
    }
    opts
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
