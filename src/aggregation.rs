use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AggTypeError;

/// How the backend combines repeated values reported for the same metric name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AggregationType {
    /// Values are summed up. Used by counters.
    Sum,
    /// The minimum value is kept.
    Min,
    /// The maximum value is kept.
    Max,
    /// The mean of all values is tracked.
    Mean,
    /// Mean, standard deviation, min, max and count of the values are tracked.
    Timing,
    /// The last reported value wins.
    Gauge,
    /// The number of distinct values is counted.
    Unique,
}

impl AggregationType {
    /// All aggregation types in declaration order.
    pub const ALL: [AggregationType; 7] = [
        AggregationType::Sum,
        AggregationType::Min,
        AggregationType::Max,
        AggregationType::Mean,
        AggregationType::Timing,
        AggregationType::Gauge,
        AggregationType::Unique,
    ];

    /// Returns the built-in label that is sent to the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::Min => "min",
            AggregationType::Max => "max",
            AggregationType::Mean => "mean",
            AggregationType::Timing => "timing",
            AggregationType::Gauge => "gauge",
            AggregationType::Unique => "unique",
        }
    }

    /// Returns the key used for this type in label overrides.
    pub fn key(self) -> &'static str {
        match self {
            AggregationType::Sum => "SUM",
            AggregationType::Min => "MIN",
            AggregationType::Max => "MAX",
            AggregationType::Mean => "MEAN",
            AggregationType::Timing => "TIMING",
            AggregationType::Gauge => "GAUGE",
            AggregationType::Unique => "UNIQUE",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregationType {
    type Err = AggTypeError;

    /// Parses either the override key (`SUM`) or the built-in label (`sum`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AggregationType::ALL
            .iter()
            .copied()
            .find(|ty| ty.key() == s || ty.as_str() == s)
            .ok_or(AggTypeError::InvalidType)
    }
}

/// Maps every [`AggregationType`] to the label handed to the transport.
///
/// The default map uses the built-in labels (`sum`, `min`, ...). Overrides
/// must cover exactly the keys `SUM`, `MIN`, `MAX`, `MEAN`, `TIMING`, `GAUGE`
/// and `UNIQUE`; anything else is rejected when the map is built, so a facade
/// can never hold a partial table.
///
/// # Examples
///
/// ```
/// use eventsd_metric::{AggTypeMap, AggregationType};
///
/// let map = AggTypeMap::from_pairs(vec![
///     ("SUM", "s"),
///     ("MIN", "mn"),
///     ("MAX", "mx"),
///     ("MEAN", "avg"),
///     ("TIMING", "t"),
///     ("GAUGE", "g"),
///     ("UNIQUE", "u"),
/// ])
/// .unwrap();
/// assert_eq!(map.label(AggregationType::Sum), "s");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<String, String>",
    into = "BTreeMap<String, String>"
)]
pub struct AggTypeMap {
    labels: [Cow<'static, str>; 7],
}

impl AggTypeMap {
    /// The built-in label table.
    pub fn builtin() -> AggTypeMap {
        AggTypeMap {
            labels: AggregationType::ALL.map(|ty| Cow::Borrowed(ty.as_str())),
        }
    }

    /// Builds an override table from `(key, label)` pairs.
    ///
    /// Keys are the upper-case aggregation names. Every key must be present
    /// exactly once and no other keys are allowed.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<AggTypeMap, AggTypeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut labels: [Option<Cow<'static, str>>; 7] = Default::default();
        let mut unknown = vec![];
        let mut duplicate = vec![];

        for (key, label) in pairs {
            let key = key.as_ref();
            match AggregationType::ALL.iter().find(|ty| ty.key() == key) {
                Some(ty) if labels[ty.index()].is_some() => duplicate.push(*ty),
                Some(ty) => labels[ty.index()] = Some(Cow::Owned(label.into())),
                None => unknown.push(key.to_string()),
            }
        }

        if !unknown.is_empty() {
            unknown.sort();
            return Err(AggTypeError::UnknownKeys(unknown));
        }

        if !duplicate.is_empty() {
            duplicate.sort();
            duplicate.dedup();
            let keys = duplicate.into_iter().map(AggregationType::key).collect();
            return Err(AggTypeError::DuplicateKeys(keys));
        }

        let missing: Vec<_> = AggregationType::ALL
            .iter()
            .filter(|ty| labels[ty.index()].is_none())
            .map(|ty| ty.key())
            .collect();
        if !missing.is_empty() {
            return Err(AggTypeError::MissingKeys(missing));
        }

        Ok(AggTypeMap {
            labels: labels.map(Option::unwrap_or_default),
        })
    }

    /// Replaces the label of a single aggregation type.
    pub fn with_label(mut self, ty: AggregationType, label: impl Into<Cow<'static, str>>) -> Self {
        self.labels[ty.index()] = label.into();
        self
    }

    /// Returns the label for the given aggregation type.
    pub fn label(&self, ty: AggregationType) -> &str {
        &self.labels[ty.index()]
    }

    /// Iterates over all types and their labels.
    pub fn iter(&self) -> impl Iterator<Item = (AggregationType, &str)> {
        AggregationType::ALL
            .into_iter()
            .map(move |ty| (ty, self.label(ty)))
    }
}

impl Default for AggTypeMap {
    fn default() -> AggTypeMap {
        AggTypeMap::builtin()
    }
}

impl TryFrom<BTreeMap<String, String>> for AggTypeMap {
    type Error = AggTypeError;

    fn try_from(map: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        AggTypeMap::from_pairs(map)
    }
}

impl From<AggTypeMap> for BTreeMap<String, String> {
    fn from(map: AggTypeMap) -> Self {
        map.iter()
            .map(|(ty, label)| (ty.key().to_string(), label.to_string()))
            .collect()
    }
}
