use std::sync::Arc;
use std::time::Duration;

use eventsd_metric::protocol::Map;
use eventsd_metric::{BoxError, EventOptions, MetricEvent, MetricOptions};
use log::info;

fn main() {
    let mut log_builder = pretty_env_logger::formatted_builder();
    log_builder.parse_filters("debug");
    log_builder.init();

    let _metric = eventsd_metric::init(MetricOptions {
        client: Some(Arc::new(|event: MetricEvent| -> Result<(), BoxError> {
            info!("would send {}", serde_json::to_string(&event)?);
            Ok(())
        })),
        format_args: Some(Arc::new(|mut event: MetricEvent| {
            event.name = format!("demo.{}", event.name);
            event
        })),
        debug: true,
        ..Default::default()
    });

    let mut meta = Map::new();
    meta.insert("route".into(), "/users".into());

    eventsd_metric::increment("requests", 1.0, Some(EventOptions::with_meta(meta))).unwrap();
    eventsd_metric::decrement("queue_depth", 3.0, None).unwrap();
    eventsd_metric::gauge("cpu_pct", 42.5, None).unwrap();

    if let Some(metric) = eventsd_metric::current() {
        metric
            .timing_duration("request.duration", Duration::from_millis(17), None)
            .unwrap();
    }
}
