use reqwest::Url;
use std::collections::HashMap;
use tracing::{debug, info};

use super::{decode, endpoint, ClientConfig};
use crate::models::{
    Aggregator, CountingSettings, MetricNames, QueryRequest, QueryResponse,
};
use crate::{ClientError, Result};

/// Client for the read-only half of the API. Never issues a request that
/// could mutate or delete stored data.
#[derive(Debug, Clone)]
pub struct ReadOnlyClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: Url,
}

impl ReadOnlyClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Ok(ReadOnlyClient {
            http: config.build_http()?,
            base_url: config.parse_base()?,
        })
    }

    pub(crate) fn from_parts(http: reqwest::Client, base_url: Url) -> Self {
        ReadOnlyClient { http, base_url }
    }

    /// Lists stored metric names, optionally restricted to a prefix.
    pub async fn metric_names(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        let mut url = endpoint(&self.base_url, &["metricnames"])?;
        if let Some(prefix) = prefix {
            url.query_pairs_mut().append_pair("prefix", prefix);
        }
        debug!(%url, "listing metric names");
        let response = self.http.get(url).send().await?;
        let names: MetricNames = decode(response).await?;
        Ok(names.results)
    }

    /// Lists the tag keys and values recorded for one metric.
    pub async fn metric_tags(&self, metric: &str) -> Result<HashMap<String, Vec<String>>> {
        let mut request = QueryRequest::simple(metric, HashMap::new());
        request.start_absolute = 0;

        let url = endpoint(&self.base_url, &["datapoints", "query", "tags"])?;
        debug!(%url, metric, "listing metric tags");
        let response = self.http.post(url).json(&request).send().await?;
        let response: QueryResponse = decode(response).await?;

        let result = response
            .queries
            .into_iter()
            .next()
            .and_then(|query| query.results.into_iter().next())
            .ok_or_else(|| {
                ClientError::MalformedResponse(format!("no tag results for metric {metric}"))
            })?;
        Ok(result.tags)
    }

    /// Runs one datapoint query. Server-side errors embedded in an HTTP 200
    /// body are surfaced as `ClientError::Query`.
    pub async fn query(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let url = endpoint(&self.base_url, &["datapoints", "query"])?;
        debug!(%url, metrics = request.metrics.len(), "querying datapoints");
        let response = self.http.post(url).json(request).send().await?;
        let response: QueryResponse = decode(response).await?;
        if !response.errors.is_empty() {
            return Err(ClientError::Query(response.errors.join("; ")));
        }
        Ok(response)
    }

    /// Counts the datapoints matching a request by attaching a full-range
    /// "count" aggregator to every metric clause. Returns 0 when nothing
    /// matched.
    pub async fn count(&self, request: &QueryRequest) -> Result<u64> {
        let mut probe = request.clone();
        for metric in &mut probe.metrics {
            metric.aggregators.push(Aggregator::count_all());
        }
        let response = self.query(&probe).await?;
        count_from_response(&response)
    }

    /// Estimates the total historical count for one metric by scanning
    /// backward from now in windows of `interval_ms`, stopping once
    /// `dead_interval_ms` milliseconds of windows in a row produced no data
    /// (or the scan reaches the epoch).
    ///
    /// This is a heuristic: it assumes data is contiguous enough that a
    /// dead stretch of that length means nothing older exists. Each window
    /// request still carries the full-range count aggregator that `count`
    /// uses; see DESIGN.md for why that quirk is kept.
    pub async fn count_long(
        &self,
        metric: &str,
        tags: HashMap<String, Vec<String>>,
        settings: &CountingSettings,
    ) -> Result<u64> {
        if settings.interval_ms <= 1 {
            return Err(ClientError::InvalidArgument(format!(
                "counting interval must exceed 1ms, got {}",
                settings.interval_ms
            )));
        }

        let mut request = QueryRequest::simple(metric, tags);
        for clause in &mut request.metrics {
            clause.aggregators.push(Aggregator::count_all());
        }

        let mut current = chrono::Utc::now().timestamp_millis();
        let mut non_zero = current;
        let mut total: u64 = 0;

        while current > 0 && (current - non_zero).abs() <= settings.dead_interval_ms {
            request.end_absolute = Some(current);
            request.start_absolute = (current - settings.interval_ms + 1).max(0);

            let response = self.query(&request).await?;
            let window_count = count_from_response(&response)?;
            if window_count > 0 {
                non_zero = current;
            }
            total += window_count;
            current -= settings.interval_ms;
        }

        info!(metric, total, "finished backward count scan");
        Ok(total)
    }
}

/// Extracts a count the way the counting endpoints report it: zero
/// `sample_size` means zero, otherwise the first value of the first result
/// carries the aggregated count.
fn count_from_response(response: &QueryResponse) -> Result<u64> {
    let first = response
        .queries
        .first()
        .ok_or_else(|| ClientError::MalformedResponse("response contained no queries".into()))?;
    if first.sample_size == 0 {
        return Ok(0);
    }
    let point = first
        .results
        .first()
        .and_then(|result| result.values.first())
        .ok_or_else(|| {
            ClientError::MalformedResponse("non-zero sample_size with no values".into())
        })?;
    Ok(point.1 as u64)
}
