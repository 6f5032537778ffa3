//! Typed client for a KairosDB-compatible time-series HTTP API.
//!
//! [`ReadOnlyClient`] covers metric-name listing, tag listing, datapoint
//! queries and the two counting helpers; [`Client`] wraps a read-only core
//! and adds write, delete and delete-metric. Request and response bodies
//! are the serde types in [`models`], matching the server's JSON field
//! names exactly.
//!
//! No operation retries: transport failures, decode failures, embedded
//! query errors and unexpected statuses all propagate to the caller as
//! [`ClientError`].

pub mod client;
pub mod error;
pub mod models;

pub use client::{Client, ClientConfig, ReadOnlyClient};
pub use error::{ClientError, Result};
pub use models::{
    items_equal, Aggregator, CountingSettings, DataPoint, DataPoints, Grouper, MetricNames,
    QueryMetric, QueryOutcome, QueryRequest, QueryResponse, QueryResult, Sampling,
};
