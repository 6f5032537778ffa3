mod read;
mod write;

pub use read::ReadOnlyClient;
pub use write::Client;

use crate::{ClientError, Result};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connection settings shared by both client flavors. One configured
/// client owns one `reqwest::Client`, so all its calls reuse the same
/// keep-alive connection pool.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ClientConfig {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn build_http(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    pub(crate) fn parse_base(&self) -> Result<Url> {
        Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidArgument(format!("invalid base url {}: {}", self.base_url, e))
        })
    }
}

/// Builds `<base>/api/v1/<segments...>`, percent-encoding each segment.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            ClientError::InvalidArgument(format!("base url {} cannot carry a path", base))
        })?;
        path.pop_if_empty();
        path.extend(["api", "v1"]);
        path.extend(segments);
    }
    Ok(url)
}

/// Reads the full body and decodes it, so a shape mismatch surfaces as
/// `Decode` rather than a transport failure.
pub(crate) async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Mutating endpoints signal success with 204 and nothing else; any other
/// status is an error carrying the raw body text.
pub(crate) async fn expect_no_content(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    if status == reqwest::StatusCode::NO_CONTENT {
        return Ok(());
    }
    let body = response.text().await?;
    Err(ClientError::UnexpectedStatus { status, body })
}
