//! Configuration for the storefront API client.
//!
//! Settings are read from a TOML file and `STOREFRONT__*` environment
//! overrides ([`loader`]), validated, and then held in a [`SharedConfig`]
//! that can be updated at runtime without blocking readers.
//!
//! ```toml
//! [api]
//! endpoint = "https://shop.example.com"
//! access_token = "SWSCXXXXXXXXXXXX"
//!
//! [search]
//! default_pagination_limit = 25
//!
//! [logging]
//! level = "debug"
//! ```

pub mod loader;
pub mod settings;
pub mod shared;

pub use loader::{load_config, save_config};
pub use settings::{ApiSettings, ClientConfig, ConfigUpdate, LoggingConfig, SearchSettings};
pub use shared::SharedConfig;

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Load error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;
