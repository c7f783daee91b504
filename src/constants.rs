/// The version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The `log` target all internal diagnostics are emitted under.
pub const LOG_TARGET: &str = "eventsd_metric";

/// Environment variable that turns on debug logging when set to a truthy value.
pub const DEBUG_ENV_VAR: &str = "EVENTSD_METRIC_DEBUG";
