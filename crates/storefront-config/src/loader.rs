use std::fs;
use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use tracing::debug;

use crate::{ClientConfig, Result};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

/// Load configuration from a TOML file plus environment overrides.
///
/// A missing file is not an error; defaults fill in. Environment variables
/// win over the file, e.g. `STOREFRONT__SEARCH__DEFAULT_PAGINATION_LIMIT=25`.
pub fn load_config(path: Option<&Path>) -> Result<ClientConfig> {
    let mut builder = Config::builder();
    let file = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    if file.exists() {
        debug!(path = %file.display(), "loading client configuration");
        builder = builder.add_source(File::from(file));
    }
    builder = builder.add_source(
        Environment::with_prefix("STOREFRONT")
            .try_parsing(true)
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("search.pagination_limits"),
    );
    let merged: ClientConfig = builder.build()?.try_deserialize()?;
    merged.validate()?;
    Ok(merged)
}

/// Write configuration as TOML, creating parent directories as needed.
pub fn save_config(path: &Path, config: &ClientConfig) -> Result<()> {
    config.validate()?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
