//! Process-wide client configuration with lock-free reads.
//!
//! Readers take a snapshot with [`SharedConfig::load`] and keep using it for
//! the whole request. Updates swap the pointer atomically; a reader racing
//! an update sees either the old or the new settings, never a mix.

use arc_swap::ArcSwap;
use std::sync::Arc;
use storefront_search::ConverterConfig;
use tracing::info;

use crate::{ClientConfig, ConfigUpdate, Result};

#[derive(Debug, Clone)]
pub struct SharedConfig {
    inner: Arc<ArcSwap<ClientConfig>>,
}

impl SharedConfig {
    /// Wrap a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        })
    }

    /// Current configuration snapshot.
    pub fn load(&self) -> Arc<ClientConfig> {
        self.inner.load_full()
    }

    /// Converter settings from the current snapshot.
    pub fn converter_config(&self) -> ConverterConfig {
        self.inner.load().converter_config()
    }

    /// Apply a partial update. Invalid results are rejected and the current
    /// configuration stays in place.
    pub fn update(&self, update: &ConfigUpdate) -> Result<Arc<ClientConfig>> {
        let mut next = ClientConfig::clone(&self.inner.load());
        next.apply(update);
        next.validate()?;

        let next = Arc::new(next);
        self.inner.store(Arc::clone(&next));
        info!(
            endpoint = %next.api.endpoint,
            default_pagination_limit = next.search.default_pagination_limit,
            "client configuration updated"
        );
        Ok(next)
    }

    /// Replace the whole configuration.
    pub fn replace(&self, config: ClientConfig) -> Result<()> {
        config.validate()?;
        self.inner.store(Arc::new(config));
        info!("client configuration replaced");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigError;

    #[test]
    fn update_is_visible_to_next_snapshot() {
        let shared = SharedConfig::new(ClientConfig::default()).unwrap();
        let before = shared.load();

        shared
            .update(&ConfigUpdate::default_pagination_limit(50))
            .unwrap();

        assert_eq!(before.search.default_pagination_limit, 10);
        assert_eq!(shared.converter_config().default_pagination_limit, 50);
    }

    #[test]
    fn invalid_update_keeps_current_config() {
        let shared = SharedConfig::new(ClientConfig::default()).unwrap();
        let result = shared.update(&ConfigUpdate::default_pagination_limit(0));

        assert!(result.is_err());
        assert_eq!(shared.load().search.default_pagination_limit, 10);
    }

    #[test]
    fn default_limit_outside_accepted_set_is_rejected() {
        let shared = SharedConfig::new(ClientConfig::default()).unwrap();
        let result = shared.update(&ConfigUpdate::default_pagination_limit(7));

        assert!(matches!(result, Err(ConfigError::Validation(_))));
        assert_eq!(shared.load().search.default_pagination_limit, 10);
        assert_eq!(shared.converter_config().default_pagination_limit, 10);
    }

    #[test]
    fn clones_share_state() {
        let shared = SharedConfig::new(ClientConfig::default()).unwrap();
        let other = shared.clone();
        other
            .update(&ConfigUpdate {
                access_token: Some("SWSC".into()),
                ..ConfigUpdate::default()
            })
            .unwrap();
        assert_eq!(shared.load().api.access_token, "SWSC");
    }
}
