use std::time::Duration;

use serde_json::Value;
use storefront_config::{ClientConfig, ConfigUpdate, SharedConfig};
use storefront_search::{ApiType, SearchCriteria, convert_with_diagnostics};
use tracing::debug;

use crate::error::ClientApiError;
use crate::logging::set_log_level;

const ACCESS_KEY_HEADER: &str = "sw-access-key";
const CONTEXT_TOKEN_HEADER: &str = "sw-context-token";
const LANGUAGE_ID_HEADER: &str = "sw-language-id";

pub struct StorefrontClient {
    http: reqwest::Client,
    config: SharedConfig,
}

impl StorefrontClient {
    /// Create a client sharing the given configuration handle.
    pub fn new(config: SharedConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn from_config(config: ClientConfig) -> storefront_config::Result<Self> {
        Ok(Self::new(SharedConfig::new(config)?))
    }

    pub fn config(&self) -> &SharedConfig {
        &self.config
    }

    /// Change settings for all following requests. A new logging level is
    /// also applied to the active subscriber.
    pub fn update_config(&self, update: &ConfigUpdate) -> storefront_config::Result<()> {
        let next = self.config.update(update)?;
        if update.logging_level.is_some() && !set_log_level(&next.logging.level) {
            debug!(level = %next.logging.level, "log level stored but not applied");
        }
        Ok(())
    }

    /// Run a search against `path` with criteria converted for `api_type`.
    ///
    /// Store API criteria are sent as query parameters of a GET, full API
    /// criteria as the JSON body of a POST.
    pub async fn search(
        &self,
        path: &str,
        criteria: &SearchCriteria,
        api_type: ApiType,
    ) -> Result<Value, ClientApiError> {
        let snapshot = self.config.load();
        let (params, diagnostics) =
            convert_with_diagnostics(criteria, api_type, &snapshot.converter_config());
        if !diagnostics.is_empty() {
            debug!(?diagnostics, path, "search criteria partially converted");
        }

        match api_type {
            ApiType::Store => {
                let query = params.to_query_pairs();
                self.send(&snapshot, reqwest::Method::GET, path, Some(&query), None)
                    .await
            }
            ApiType::Default => {
                let body = Value::from(params);
                self.send(&snapshot, reqwest::Method::POST, path, None, Some(&body))
                    .await
            }
        }
    }

    pub async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, ClientApiError> {
        let snapshot = self.config.load();
        self.send(&snapshot, reqwest::Method::GET, path, Some(query), None)
            .await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientApiError> {
        let snapshot = self.config.load();
        self.send(&snapshot, reqwest::Method::POST, path, None, Some(body))
            .await
    }

    async fn send(
        &self,
        config: &ClientConfig,
        method: reqwest::Method,
        path: &str,
        query: Option<&[(String, String)]>,
        body: Option<&Value>,
    ) -> Result<Value, ClientApiError> {
        let url = format!(
            "{}/{}",
            config.api.endpoint.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        debug!(%method, %url, "sending storefront request");

        let mut req = self
            .http
            .request(method, &url)
            .timeout(Duration::from_millis(config.api.timeout_ms))
            .header("Accept", "application/json")
            .header(ACCESS_KEY_HEADER, &config.api.access_token);
        if let Some(token) = &config.api.context_token {
            req = req.header(CONTEXT_TOKEN_HEADER, token);
        }
        if let Some(language_id) = &config.api.language_id {
            req = req.header(LANGUAGE_ID_HEADER, language_id);
        }
        if let Some(query) = query {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        handle_response(resp).await
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<Value, ClientApiError> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let err = ClientApiError::from_response(
            status.as_u16(),
            &body,
            format!("Request failed with status code {}", status.as_u16()),
        );
        debug!(status = status.as_u16(), kind = ?err.kind(), "storefront request failed");
        return Err(err);
    }

    if body.is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(&body).map_err(|e| {
        ClientApiError::transport(
            format!("Failed to parse response JSON: {e}"),
            Some(status.as_u16()),
        )
    })
}
