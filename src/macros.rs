/// Logs a debug message under the crate's log target.
///
/// The first argument is the `MetricOptions` (or anything with a `debug()`
/// accessor) that decides whether debug output is wanted at all.
macro_rules! metric_debug {
    ($options:expr, $($arg:tt)*) => {
        if $options.debug() {
            ::log::debug!(target: $crate::constants::LOG_TARGET, $($arg)*);
        }
    };
}

/// Generates a typed recording method that forwards to `Metric::send` with a
/// fixed aggregation type.
macro_rules! impl_recorder {
    ($(#[$attr:meta])* $name:ident => $agg:ident) => {
        $(#[$attr])*
        pub fn $name(
            &self,
            name: &str,
            value: f64,
            options: Option<$crate::EventOptions>,
        ) -> $crate::Result<$crate::Receipt> {
            self.send(name, value, $crate::AggregationType::$agg, options)
        }
    };
}
