//! Project defaults: accent palette and naming.

use serde::{Deserialize, Serialize};

/// Accent colors cycled through by project id.
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#89b4fa", "#a6e3a1", "#fab387", "#cba6f7", "#f38ba8", "#f9e2af", "#94e2d5", "#f5c2e7",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsConfig {
    /// Hex colors; project `n` gets `palette[(n - 1) % len]`.
    pub palette: Vec<String>,
    /// Default names are `"<prefix> <id>"`.
    pub name_prefix: String,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            name_prefix: "Project".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projects_config_defaults() {
        let config = ProjectsConfig::default();
        assert_eq!(config.palette.len(), 8);
        assert_eq!(config.palette[0], "#89b4fa");
        assert_eq!(config.name_prefix, "Project");
    }

    #[test]
    fn palette_can_be_replaced() {
        let config: ProjectsConfig = toml::from_str("palette = [\"#ffffff\"]").unwrap();
        assert_eq!(config.palette, vec!["#ffffff"]);
    }
}
