use serde::{Deserialize, Serialize};
use storefront_search::{ConverterConfig, PaginationLimit};
use url::Url;

use crate::{ConfigError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    pub fn validate(&self) -> Result<()> {
        // API validations
        let endpoint = Url::parse(&self.api.endpoint)
            .map_err(|e| ConfigError::validation(format!("api.endpoint is not a valid URL: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::validation("api.endpoint must use http or https"));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::validation("api.timeout_ms must be > 0"));
        }
        // Search validations
        if self.search.default_pagination_limit == 0 {
            return Err(ConfigError::validation(
                "search.default_pagination_limit must be > 0",
            ));
        }
        if self.search.pagination_limits.is_empty() {
            return Err(ConfigError::validation(
                "search.pagination_limits must not be empty",
            ));
        }
        if self.search.pagination_limits.contains(&0) {
            return Err(ConfigError::validation(
                "search.pagination_limits must only contain values > 0",
            ));
        }
        if !self
            .search
            .pagination_limits
            .contains(&self.search.default_pagination_limit)
        {
            return Err(ConfigError::validation(format!(
                "search.default_pagination_limit {} is not one of search.pagination_limits {:?}",
                self.search.default_pagination_limit, self.search.pagination_limits
            )));
        }
        // Logging validation
        let lvl = self.logging.level.to_ascii_lowercase();
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !valid_levels.contains(&lvl.as_str()) {
            return Err(ConfigError::validation(format!(
                "logging.level must be one of {valid_levels:?}"
            )));
        }
        Ok(())
    }

    /// Converter settings derived from the search section.
    pub fn converter_config(&self) -> ConverterConfig {
        self.search.converter_config()
    }

    /// Apply a partial update in place.
    pub fn apply(&mut self, update: &ConfigUpdate) {
        if let Some(endpoint) = &update.endpoint {
            self.api.endpoint = endpoint.clone();
        }
        if let Some(access_token) = &update.access_token {
            self.api.access_token = access_token.clone();
        }
        if let Some(context_token) = &update.context_token {
            self.api.context_token = Some(context_token.clone());
        }
        if let Some(language_id) = &update.language_id {
            self.api.language_id = Some(language_id.clone());
        }
        if let Some(timeout_ms) = update.timeout_ms {
            self.api.timeout_ms = timeout_ms;
        }
        if let Some(limit) = update.default_pagination_limit {
            self.search.default_pagination_limit = limit;
        }
        if let Some(level) = &update.logging_level {
            self.logging.level = level.clone();
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Sales channel access key, sent as `sw-access-key`.
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub context_token: Option<String>,
    #[serde(default)]
    pub language_id: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}
fn default_endpoint() -> String {
    "http://localhost:8000".into()
}
fn default_timeout_ms() -> u64 {
    10_000
}
impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_token: String::new(),
            context_token: None,
            language_id: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    #[serde(default = "default_pagination_limit")]
    pub default_pagination_limit: u32,
    #[serde(default = "default_pagination_limits")]
    pub pagination_limits: Vec<u32>,
}
fn default_pagination_limit() -> u32 {
    PaginationLimit::Ten.value()
}
fn default_pagination_limits() -> Vec<u32> {
    PaginationLimit::values()
}
impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_pagination_limit: default_pagination_limit(),
            pagination_limits: default_pagination_limits(),
        }
    }
}

impl SearchSettings {
    pub fn converter_config(&self) -> ConverterConfig {
        ConverterConfig {
            default_pagination_limit: self.default_pagination_limit,
            pagination_limits: self.pagination_limits.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}
fn default_log_level() -> String {
    "info".into()
}
impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Partial settings change applied through [`crate::SharedConfig::update`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigUpdate {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub context_token: Option<String>,
    #[serde(default)]
    pub language_id: Option<String>,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub default_pagination_limit: Option<u32>,
    #[serde(default)]
    pub logging_level: Option<String>,
}

impl ConfigUpdate {
    pub fn default_pagination_limit(limit: u32) -> Self {
        Self {
            default_pagination_limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn logging_level(level: impl Into<String>) -> Self {
        Self {
            logging_level: Some(level.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = ClientConfig::default();
        cfg.validate().expect("default config should validate");
        assert_eq!(cfg.converter_config(), ConverterConfig::default());
    }

    #[test]
    fn rejects_bad_endpoint_and_limits() {
        let mut cfg = ClientConfig::default();
        cfg.api.endpoint = "not a url".into();
        assert!(matches!(cfg.validate(), Err(ConfigError::Validation(_))));

        let mut cfg = ClientConfig::default();
        cfg.api.endpoint = "ftp://shop.example.com".into();
        assert!(cfg.validate().is_err());

        let mut cfg = ClientConfig::default();
        cfg.search.default_pagination_limit = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = ClientConfig::default();
        cfg.search.pagination_limits.clear();
        assert!(cfg.validate().is_err());

        let mut cfg = ClientConfig::default();
        cfg.search.default_pagination_limit = 7;
        let err = cfg.validate().expect_err("default outside accepted limits");
        assert!(err.to_string().contains("search.default_pagination_limit 7"));

        let mut cfg = ClientConfig::default();
        cfg.search.pagination_limits = vec![5, 25];
        assert!(cfg.validate().is_err());
        cfg.search.default_pagination_limit = 25;
        assert!(cfg.validate().is_ok());

        let mut cfg = ClientConfig::default();
        cfg.logging.level = "loud".into();
        let err = cfg.validate().expect_err("invalid level");
        assert!(err.to_string().contains("logging.level"));
    }

    #[test]
    fn apply_only_touches_given_fields() {
        let mut cfg = ClientConfig::default();
        cfg.api.access_token = "key".into();
        cfg.apply(&ConfigUpdate::default_pagination_limit(50));

        assert_eq!(cfg.search.default_pagination_limit, 50);
        assert_eq!(cfg.api.access_token, "key");
        assert_eq!(cfg.converter_config().default_pagination_limit, 50);
    }
}
