use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sampling window attached to an aggregator. The server expects `value`
/// as a numeric string, not a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sampling {
    pub value: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregator {
    pub name: String,
    pub align_sampling: bool,
    pub sampling: Sampling,
}

impl Aggregator {
    /// A "count" aggregator with a sampling window large enough to cover
    /// all stored history, used as a full-range existence/count probe.
    pub fn count_all() -> Self {
        Aggregator {
            name: "count".to_string(),
            align_sampling: true,
            sampling: Sampling {
                value: "999999".to_string(),
                unit: "years".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grouper {
    pub name: String,
    pub tags: Vec<String>,
}

impl Grouper {
    pub fn by_tags(tags: Vec<String>) -> Self {
        Grouper {
            name: "tag".to_string(),
            tags,
        }
    }
}

/// One metric clause inside a query or delete request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetric {
    pub name: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub tags: HashMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_by: Vec<Grouper>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregators: Vec<Aggregator>,
}

impl QueryMetric {
    pub fn new(name: &str) -> Self {
        QueryMetric {
            name: name.to_string(),
            tags: HashMap::new(),
            group_by: Vec::new(),
            aggregators: Vec::new(),
        }
    }
}

/// A full query/delete request body. Field names follow the wire contract
/// exactly; optional fields are omitted from the JSON when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub cache_time: i64,
    pub start_absolute: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_absolute: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    pub metrics: Vec<QueryMetric>,
}

impl QueryRequest {
    /// One-metric request covering all history: `cache_time = 0`,
    /// `start_absolute = 1`, optional tag filter.
    pub fn simple(metric: &str, tags: HashMap<String, Vec<String>>) -> Self {
        QueryRequest {
            cache_time: 0,
            start_absolute: 1,
            end_absolute: None,
            time_zone: None,
            metrics: vec![QueryMetric {
                tags,
                ..QueryMetric::new(metric)
            }],
        }
    }
}

/// One time/value sample, serialized as the two-element array
/// `[timestamp_ms, value]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint(pub i64, pub f64);

impl DataPoint {
    pub fn timestamp(&self) -> i64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

/// One metric's slice of a query response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub name: String,
    #[serde(default)]
    pub tags: HashMap<String, Vec<String>>,
    #[serde(default)]
    pub values: Vec<DataPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome {
    pub sample_size: u64,
    #[serde(default)]
    pub results: Vec<QueryResult>,
}

/// Decoded body of the query endpoints. A non-empty `errors` list means
/// the operation failed server-side even under HTTP 200.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub queries: Vec<QueryOutcome>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Body of the metric-name listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricNames {
    pub results: Vec<String>,
}

/// One ingest record for the write endpoint. The server requires at least
/// one tag per record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoints {
    pub name: String,
    pub tags: HashMap<String, String>,
    pub datapoints: Vec<DataPoint>,
}

/// Parameters for the long-range backward count scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountingSettings {
    /// Window size in milliseconds, must exceed 1.
    pub interval_ms: i64,
    /// Scan stops once this many milliseconds have passed since the last
    /// window that produced a non-zero count.
    pub dead_interval_ms: i64,
}

/// Order-sensitive deep equality over two datapoint sequences.
pub fn items_equal(left: &[DataPoint], right: &[DataPoint]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|(a, b)| a.0 == b.0 && a.1 == b.1)
}
