//! Terminal panel configuration: scrollback and character cell geometry.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Bytes of output kept per session (valid range: 4096-67_108_864).
    pub scrollback_bytes: u32,
    /// Character cell width in pixels (valid range: 1.0-100.0).
    pub cell_width: f64,
    /// Character cell height in pixels (valid range: 1.0-100.0).
    pub cell_height: f64,
    /// Inner padding of the terminal panel on each side (valid range: 0.0-100.0).
    pub padding: f64,
    /// Grid used before the first viewport is known (valid range: 1-1000).
    pub default_cols: u32,
    pub default_rows: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            scrollback_bytes: 1_048_576,
            cell_width: 8.0,
            cell_height: 17.0,
            padding: 4.0,
            default_cols: 80,
            default_rows: 24,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_config_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.scrollback_bytes, 1_048_576);
        assert_eq!(config.default_cols, 80);
        assert_eq!(config.default_rows, 24);
    }

    #[test]
    fn terminal_config_partial_toml() {
        let config: TerminalConfig = toml::from_str("cell_width = 9.5\npadding = 0.0").unwrap();
        assert_eq!(config.cell_width, 9.5);
        assert_eq!(config.padding, 0.0);
        assert_eq!(config.cell_height, 17.0);
    }
}
