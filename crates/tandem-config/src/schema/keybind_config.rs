//! Keyboard shortcuts configuration types.
//!
//! Named `keybind_config` to avoid clash with the crate-level `keybinds` module.

use serde::{Deserialize, Serialize};

/// Keyboard shortcuts.
///
/// Format: "Modifier+Key" where Modifier is one of Ctrl, Alt, Shift, Cmd.
/// A binding written with Ctrl also fires with Cmd and vice versa. An empty
/// string leaves the action unbound.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeybindConfig {
    pub new_project: String,
    pub close_project: String,
    pub next_project: String,
    pub prev_project: String,
    pub new_terminal: String,
    pub new_tab: String,
    pub close_tab: String,
    pub next_tab: String,
    pub prev_tab: String,
    pub focus_address_bar: String,
    pub reload: String,
    pub go_back: String,
    pub go_forward: String,
    pub toggle_devtools: String,
    pub layout_split: String,
    pub layout_terminal_only: String,
    pub layout_content_only: String,
    pub layout_split_vertical: String,
}

impl Default for KeybindConfig {
    fn default() -> Self {
        Self {
            new_project: "Ctrl+Shift+P".into(),
            close_project: "Ctrl+Shift+W".into(),
            next_project: "Ctrl+PageDown".into(),
            prev_project: "Ctrl+PageUp".into(),
            new_terminal: "Ctrl+Shift+T".into(),
            new_tab: "Ctrl+T".into(),
            close_tab: "Ctrl+W".into(),
            next_tab: "Ctrl+Tab".into(),
            prev_tab: "Ctrl+Shift+Tab".into(),
            focus_address_bar: "Ctrl+L".into(),
            reload: "Ctrl+R".into(),
            go_back: "Alt+Left".into(),
            go_forward: "Alt+Right".into(),
            toggle_devtools: "Ctrl+Shift+I".into(),
            layout_split: "Ctrl+1".into(),
            layout_terminal_only: "Ctrl+2".into(),
            layout_content_only: "Ctrl+3".into(),
            layout_split_vertical: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keybind_defaults() {
        let config = KeybindConfig::default();
        assert_eq!(config.new_terminal, "Ctrl+Shift+T");
        assert_eq!(config.new_tab, "Ctrl+T");
        assert_eq!(config.layout_content_only, "Ctrl+3");
        assert!(config.layout_split_vertical.is_empty());
    }

    #[test]
    fn keybind_partial_override() {
        let config: KeybindConfig = toml::from_str("reload = \"F5\"").unwrap();
        assert_eq!(config.reload, "F5");
        assert_eq!(config.close_tab, "Ctrl+W");
    }
}
