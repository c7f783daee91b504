use std::sync::Arc;

use chrono::{DateTime, Utc};
use eventsd_metric::protocol::Map;
use eventsd_metric::test::TestTransport;
use eventsd_metric::{AggTypeMap, AggregationType, EventOptions, Metric, MetricEvent, MetricOptions};
use serde_json::json;

fn recording_metric() -> (Metric, Arc<TestTransport>) {
    let transport = TestTransport::new();
    let metric = Metric::with_options(MetricOptions {
        client: Some(transport.clone()),
        ..Default::default()
    });
    (metric, transport)
}

fn assert_recent(event: &MetricEvent, before: DateTime<Utc>) {
    let time = event.timestamp().expect("event time is not ISO 8601");
    let after = Utc::now();
    // millisecond precision truncates, so allow the lower bound to slip
    assert!(time >= before - chrono::Duration::milliseconds(1));
    assert!(time <= after);
    assert!(after - time < chrono::Duration::milliseconds(500));
}

#[test]
fn test_increment_defaults() {
    let (metric, transport) = recording_metric();
    let before = Utc::now();
    metric.incr("requests").unwrap();

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 1);
    let event = &events[0];
    assert_eq!(event.name, "requests");
    assert_eq!(event.value, 1.0);
    assert_eq!(event.agg_type, "sum");
    assert_eq!(event.meta, Some(Map::new()));
    assert!(event.extra.is_empty());
    assert_recent(event, before);
}

#[test]
fn test_decrement_negates() {
    let (metric, transport) = recording_metric();
    metric.decrement("queue_depth", 3.0, None).unwrap();
    metric.decr("queue_depth").unwrap();

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].name, "queue_depth");
    assert_eq!(events[0].value, -3.0);
    assert_eq!(events[0].agg_type, "sum");
    assert_eq!(events[1].value, -1.0);
    assert_eq!(events[1].agg_type, "sum");
}

#[test]
fn test_decrement_matches_increment_of_negated_value() {
    let (metric, transport) = recording_metric();
    let time = Utc::now();
    for value in [0.5, 2.0, -7.0, 1e6] {
        metric
            .decrement("x", value, Some(EventOptions::at(time)))
            .unwrap();
        metric
            .increment("x", -value, Some(EventOptions::at(time)))
            .unwrap();
    }

    let events = transport.fetch_and_clear_events();
    for pair in events.chunks(2) {
        assert_eq!(pair[0], pair[1]);
    }
}

#[test]
fn test_gauge() {
    let (metric, transport) = recording_metric();
    metric.gauge("cpu_pct", 42.5, None).unwrap();

    let events = transport.fetch_and_clear_events();
    assert_eq!(events[0].name, "cpu_pct");
    assert_eq!(events[0].value, 42.5);
    assert_eq!(events[0].agg_type, "gauge");
    assert_eq!(events[0].meta, Some(Map::new()));
}

#[test]
fn test_typed_operations_use_their_tag() {
    let (metric, transport) = recording_metric();
    let time: DateTime<Utc> = "2020-03-01T12:30:00Z".parse().unwrap();
    let mut meta = Map::new();
    meta.insert("host".into(), json!("web-1"));
    let mut extra = Map::new();
    extra.insert("region".into(), json!("eu"));
    let options = EventOptions {
        meta: Some(meta.clone()),
        time: Some(time),
        extra: extra.clone(),
    };

    metric.increment("a", 2.0, Some(options.clone())).unwrap();
    metric.min("b", 3.0, Some(options.clone())).unwrap();
    metric.max("c", 4.0, Some(options.clone())).unwrap();
    metric.mean("d", 5.0, Some(options.clone())).unwrap();
    metric.gauge("e", 6.0, Some(options.clone())).unwrap();
    metric.timing("f", 7.0, Some(options.clone())).unwrap();
    metric.unique("g", 8.0, Some(options.clone())).unwrap();

    let events = transport.fetch_and_clear_events();
    let tags: Vec<_> = events.iter().map(|e| e.agg_type.as_str()).collect();
    assert_eq!(
        tags,
        vec!["sum", "min", "max", "mean", "gauge", "timing", "unique"]
    );
    for (event, (name, value)) in events.iter().zip([
        ("a", 2.0),
        ("b", 3.0),
        ("c", 4.0),
        ("d", 5.0),
        ("e", 6.0),
        ("f", 7.0),
        ("g", 8.0),
    ]) {
        assert_eq!(event.name, name);
        assert_eq!(event.value, value);
        assert_eq!(event.meta.as_ref(), Some(&meta));
        assert_eq!(event.time, "2020-03-01T12:30:00.000Z");
        assert_eq!(event.extra, extra);
    }
}

#[test]
#[allow(deprecated)]
fn test_average_is_mean() {
    let (metric, transport) = recording_metric();
    let time = Utc::now();
    metric.average("latency", 12.5, Some(EventOptions::at(time)));
    metric
        .mean("latency", 12.5, Some(EventOptions::at(time)))
        .unwrap();

    let events = transport.fetch_and_clear_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], events[1]);
    assert_eq!(events[0].agg_type, "mean");
}

#[test]
#[allow(deprecated)]
fn test_average_discards_errors() {
    let metric = Metric::with_options(MetricOptions::default());
    metric.average("latency", 1.0, None);
}

#[test]
fn test_null_meta() {
    let (metric, transport) = recording_metric();
    metric
        .unique(
            "visitors",
            42.0,
            Some(EventOptions {
                meta: None,
                ..Default::default()
            }),
        )
        .unwrap();

    let events = transport.fetch_and_clear_events();
    assert_eq!(events[0].meta, None);
    assert_eq!(serde_json::to_value(&events[0]).unwrap()["meta"], json!(null));
}

#[test]
fn test_custom_agg_type() {
    let transport = TestTransport::new();
    let agg_type = AggTypeMap::from_pairs(vec![
        ("SUM", "s"),
        ("MIN", "mn"),
        ("MAX", "mx"),
        ("MEAN", "avg"),
        ("TIMING", "ms"),
        ("GAUGE", "g"),
        ("UNIQUE", "u"),
    ])
    .unwrap();
    let metric = Metric::with_options(MetricOptions {
        client: Some(transport.clone()),
        agg_type: Some(agg_type),
        ..Default::default()
    });

    metric.incr("x").unwrap();
    metric.timing("y", 3.0, None).unwrap();
    metric
        .send("z", 1.0, AggregationType::Unique, None)
        .unwrap();

    let tags: Vec<_> = transport.fetch_and_clear_events().into_iter().map(|e| e.agg_type).collect();
    assert_eq!(tags, vec!["s", "ms", "u"]);
}

#[test]
fn test_agg_type_from_config_file() {
    let agg_type: AggTypeMap = serde_json::from_value(json!({
        "SUM": "count",
        "MIN": "min",
        "MAX": "max",
        "MEAN": "avg",
        "TIMING": "histogram",
        "GAUGE": "gauge",
        "UNIQUE": "set",
    }))
    .unwrap();
    let transport = TestTransport::new();
    let metric = Metric::with_options(MetricOptions {
        client: Some(transport.clone()),
        agg_type: Some(agg_type),
        ..Default::default()
    });

    metric.timing("db.query", 3.0, None).unwrap();
    assert_eq!(transport.fetch_and_clear_events()[0].agg_type, "histogram");
}

#[test]
fn test_incomplete_agg_type_is_rejected() {
    let rv = AggTypeMap::from_pairs(vec![("SUM", "s"), ("MIN", "mn")]);
    assert!(rv.is_err());
    assert!(serde_json::from_value::<AggTypeMap>(json!({"SUM": "s"})).is_err());
}
