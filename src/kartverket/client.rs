use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::Endpoints;
use crate::config::ApiConfig;
use crate::KvseekError;

/// HTTP client for the registries
pub struct KartverketClient {
    client: Client,
    endpoints: Endpoints,
}

impl KartverketClient {
    pub fn new(api: &ApiConfig) -> Result<Self, KvseekError> {
        let client = Client::builder()
            .user_agent(api.user_agent.as_str())
            .timeout(Duration::from_secs(api.timeout_secs))
            .build()
            .map_err(KvseekError::Client)?;

        Self::with_client(client, api)
    }

    /// Use a prepared `reqwest` client; only the endpoints are read from `api`.
    pub fn with_client(client: Client, api: &ApiConfig) -> Result<Self, KvseekError> {
        Ok(Self {
            client,
            endpoints: Endpoints::from_config(api)?,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET `url` with `params` and decode the body as JSON.
    ///
    /// Invalid UTF-8 in the body is replaced rather than rejected.
    pub async fn get_json(&self, url: &Url, params: &[(&str, String)]) -> Result<Value, KvseekError> {
        let mut url = url.clone();
        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
        }
        let url_text = url.to_string();

        debug!("GET {}", url_text);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| KvseekError::Http {
                url: url_text.clone(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(KvseekError::Status {
                url: url_text,
                status: response.status(),
            });
        }

        let bytes = response.bytes().await.map_err(|source| KvseekError::Http {
            url: url_text.clone(),
            source,
        })?;
        let body = String::from_utf8_lossy(&bytes);

        serde_json::from_str(&body).map_err(|source| KvseekError::Json {
            url: url_text,
            source,
        })
    }

    /// Try each URL in order and return the first successful response.
    pub async fn get_json_any(
        &self,
        urls: &[Url],
        params: &[(&str, String)],
    ) -> Result<Value, KvseekError> {
        let mut last_err = None;

        for url in urls {
            match self.get_json(url, params).await {
                Ok(data) => return Ok(data),
                Err(e) => {
                    warn!("Request to {} failed: {}", url, e);
                    last_err = Some(e);
                }
            }
        }

        Err(match last_err {
            Some(e) => KvseekError::AllEndpointsFailed(Box::new(e)),
            None => KvseekError::InvalidQuery("no endpoints to try".to_string()),
        })
    }
}
