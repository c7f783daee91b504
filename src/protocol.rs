//! The event shape handed to transports.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use serde_json::Value;

/// A string keyed map of JSON values, used for `meta` and `extra`.
pub type Map = serde_json::Map<String, Value>;

/// Formats a timestamp the way eventsD expects it.
///
/// This is ISO 8601 in UTC with millisecond precision, for instance
/// `2020-03-01T12:30:00.250Z`.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A single metric event as passed to a [`Transport`](crate::Transport).
///
/// Events are created per recording call and are not retained by the
/// facade once the transport returns.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricEvent {
    /// The metric name.
    pub name: String,
    /// The reported value. Decrements are negative.
    pub value: f64,
    /// The aggregation label, already resolved through the facade's label table.
    #[serde(rename = "aggType")]
    pub agg_type: String,
    /// Metadata attached to the event. `None` is sent as `null`.
    pub meta: Option<Map>,
    /// ISO 8601 time of the event.
    pub time: String,
    /// Extra data appended to the eventsD message.
    #[serde(default)]
    pub extra: Map,
}

impl MetricEvent {
    /// Parses the event time back into a `DateTime`.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.time)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Optional per-call fields of a recording operation.
///
/// The defaults match an omitted argument: an empty `meta` map, the current
/// time and an empty `extra` map. Set `meta` to `None` to send `null`.
///
/// # Examples
///
/// ```
/// use eventsd_metric::EventOptions;
///
/// let mut meta = eventsd_metric::protocol::Map::new();
/// meta.insert("route".into(), "/users".into());
/// let options = EventOptions {
///     meta: Some(meta),
///     ..Default::default()
/// };
/// assert!(options.time.is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EventOptions {
    /// Metadata to attach to the event.
    pub meta: Option<Map>,
    /// The time of the event. Defaults to the facade clock's current time.
    pub time: Option<DateTime<Utc>>,
    /// Extra data to append to the eventsD message.
    pub extra: Map,
}

impl EventOptions {
    /// Creates options carrying the given metadata.
    pub fn with_meta(meta: Map) -> Self {
        EventOptions {
            meta: Some(meta),
            ..Default::default()
        }
    }

    /// Creates options for an event at the given time.
    pub fn at(time: DateTime<Utc>) -> Self {
        EventOptions {
            time: Some(time),
            ..Default::default()
        }
    }
}

impl Default for EventOptions {
    fn default() -> Self {
        EventOptions {
            meta: Some(Map::new()),
            time: None,
            extra: Map::new(),
        }
    }
}
