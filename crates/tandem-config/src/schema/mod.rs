//! Configuration schema types for Tandem.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod content;
mod keybind_config;
mod layout;
mod projects;
mod shell;
mod system;
mod terminal;

pub use content::*;
pub use keybind_config::*;
pub use layout::*;
pub use projects::*;
pub use shell::*;
pub use system::*;
pub use terminal::*;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TandemConfig {
    pub shell: ShellConfig,
    pub terminal: TerminalConfig,
    pub layout: LayoutConfig,
    pub content: ContentConfig,
    pub projects: ProjectsConfig,
    pub keybinds: KeybindConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_common::LayoutMode;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: TandemConfig = toml::from_str("").unwrap();
        assert_eq!(config.layout.default_mode, LayoutMode::Split);
        assert_eq!(config.projects.palette.len(), 8);
        assert_eq!(config.keybinds.new_project, "Ctrl+Shift+P");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn sections_are_independent() {
        let config: TandemConfig = toml::from_str(
            r#"
[shell]
program = "/bin/zsh"

[projects]
name_prefix = "Workspace"
"#,
        )
        .unwrap();
        assert_eq!(config.shell.program, "/bin/zsh");
        assert_eq!(config.projects.name_prefix, "Workspace");
        assert_eq!(config.terminal.default_cols, 80);
        assert_eq!(config.content.blank_page, "about:blank");
    }

    #[test]
    fn default_config_serializes_to_toml() {
        let text = toml::to_string_pretty(&TandemConfig::default()).unwrap();
        assert!(text.contains("[keybinds]"));
        assert!(text.contains("[terminal]"));
        let back: TandemConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.terminal.scrollback_bytes, 1_048_576);
    }
}
