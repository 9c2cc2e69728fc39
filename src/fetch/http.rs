use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;

use crate::config::ServiceConfig;
use crate::fetch::{Fetch, FetchError, FetchFuture};

/// Fetch capability backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetch {
    client: Client,
}

impl HttpFetch {
    pub fn new(service: &ServiceConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(service.user_agent.clone())
            .timeout(Duration::from_secs(u64::from(service.timeout_seconds)))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client })
    }

    async fn get_json(client: Client, url: String) -> Result<Value, FetchError> {
        let response = client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url = %url, status = status.as_u16(), "Fetch returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
            });
        }

        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
            return Ok(Value::Null);
        }

        response
            .json::<Value>()
            .await
            .map_err(|source| FetchError::Decode { url, source })
    }
}

impl Fetch for HttpFetch {
    fn fetch(&self, url: &str) -> FetchFuture {
        tracing::trace!(url = %url, "Fetching");
        Box::pin(Self::get_json(self.client.clone(), url.to_string()))
    }
}
