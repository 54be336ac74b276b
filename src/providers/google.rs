use async_trait::async_trait;
use log::{debug, error};
use parking_lot::Mutex;
use reqwest::{Client, Proxy, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use super::{LanguagePair, ProxyRoute, Translator};
use crate::errors::ProviderError;

/// Public endpoint of the Google Translate web client
pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Google Translate client using the keyless `client=gtx` endpoint
#[derive(Debug)]
pub struct GoogleTranslator {
    /// Endpoint URL
    endpoint: String,
    /// Request timeout
    timeout: Duration,
    /// One HTTP client per proxy route, built on first use
    clients: Mutex<HashMap<ProxyRoute, Client>>,
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, Duration::from_secs(30))
    }
}

impl GoogleTranslator {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        let endpoint = if endpoint.trim().is_empty() {
            DEFAULT_ENDPOINT.to_string()
        } else {
            endpoint
        };

        Self {
            endpoint,
            timeout,
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn client_for(&self, route: &ProxyRoute) -> Result<Client, ProviderError> {
        let mut clients = self.clients.lock();
        if let Some(client) = clients.get(route) {
            return Ok(client.clone());
        }

        let mut builder = Client::builder().timeout(self.timeout);
        if let Some(proxy_url) = route.proxy_url() {
            let proxy = Proxy::all(&proxy_url)
                .map_err(|e| ProviderError::ProxyError(format!("{}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }
        let client = builder
            .build()
            .map_err(|e| ProviderError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created HTTP client for {}", route);
        clients.insert(route.clone(), client.clone());
        Ok(client)
    }

    /// Concatenate the translated sentences of a `translate_a/single` response
    ///
    /// The response is a nested array whose first element lists sentence
    /// pairs `[translated, original, ...]`.
    pub fn parse_response(body: &str) -> Result<String, ProviderError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| ProviderError::ParseError(format!("Invalid JSON: {}", e)))?;

        let sentences = value
            .get(0)
            .and_then(Value::as_array)
            .ok_or_else(|| ProviderError::ParseError("Missing sentence list".to_string()))?;

        let translated: String = sentences
            .iter()
            .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
            .collect();

        if translated.is_empty() {
            return Err(ProviderError::ParseError("Response contains no translation".to_string()));
        }
        Ok(translated)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        pair: &LanguagePair,
        route: &ProxyRoute,
    ) -> Result<String, ProviderError> {
        let client = self.client_for(route)?;

        let response = client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", pair.from.as_str()),
                ("tl", pair.to.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    ProviderError::ConnectionError(e.to_string())
                } else {
                    ProviderError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimitExceeded(format!(
                "Google Translate throttled the request ({})",
                status
            )));
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Google Translate error ({}): {}", status, error_text);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to read response body: {}", e)))?;
        Self::parse_response(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}
