//! Tandem configuration system.
//!
//! TOML-based configuration with full validation. Every section uses
//! serde defaults so a partial file works out of the box.

pub mod keybinds;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::TandemConfig;

use std::path::Path;
use tandem_common::ConfigError;

/// Load and validate config from the platform default path.
///
/// Creates a default `config.toml` in the OS config directory when none
/// exists.
pub fn load_config() -> Result<TandemConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    validation::validate(&config)?;
    Ok(config)
}

/// Load and validate config from an explicit path.
pub fn load_config_from(path: &Path) -> Result<TandemConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.to_path_buf()));
    }
    let config = toml_loader::load_from_path(path)?;
    validation::validate(&config)?;
    Ok(config)
}
