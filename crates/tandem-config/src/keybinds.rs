//! Keybind validation utilities.

use crate::schema::KeybindConfig;
use std::collections::HashMap;
use tandem_common::ConfigError;

/// Returns all keybinds as `(name, binding)` pairs.
pub fn all_keybinds(config: &KeybindConfig) -> Vec<(&str, &str)> {
    vec![
        ("new_project", &config.new_project),
        ("close_project", &config.close_project),
        ("next_project", &config.next_project),
        ("prev_project", &config.prev_project),
        ("new_terminal", &config.new_terminal),
        ("new_tab", &config.new_tab),
        ("close_tab", &config.close_tab),
        ("next_tab", &config.next_tab),
        ("prev_tab", &config.prev_tab),
        ("focus_address_bar", &config.focus_address_bar),
        ("reload", &config.reload),
        ("go_back", &config.go_back),
        ("go_forward", &config.go_forward),
        ("toggle_devtools", &config.toggle_devtools),
        ("layout_split", &config.layout_split),
        ("layout_terminal_only", &config.layout_terminal_only),
        ("layout_content_only", &config.layout_content_only),
        ("layout_split_vertical", &config.layout_split_vertical),
    ]
}

/// Validate that no two keybinds are mapped to the same key combination.
///
/// Unbound (empty) entries are ignored. Comparison is case-insensitive.
pub fn validate_no_duplicates(config: &KeybindConfig) -> Result<(), ConfigError> {
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (name, binding) in all_keybinds(config) {
        let key = binding.trim().to_ascii_lowercase();
        if key.is_empty() {
            continue;
        }
        if let Some(existing_name) = seen.get(&key) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate keybind '{binding}': assigned to both '{existing_name}' and '{name}'"
            )));
        }
        seen.insert(key, name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keybinds_have_no_duplicates() {
        assert!(validate_no_duplicates(&KeybindConfig::default()).is_ok());
    }

    #[test]
    fn all_keybinds_returns_18_entries() {
        assert_eq!(all_keybinds(&KeybindConfig::default()).len(), 18);
    }

    #[test]
    fn detects_duplicate_keybinds() {
        let config = KeybindConfig {
            reload: "Ctrl+T".into(),
            ..Default::default()
        };
        let err = validate_no_duplicates(&config).unwrap_err().to_string();
        assert!(err.contains("duplicate keybind"));
        assert!(err.contains("new_tab"));
        assert!(err.contains("reload"));
    }

    #[test]
    fn duplicate_check_ignores_case() {
        let config = KeybindConfig {
            reload: "ctrl+t".into(),
            ..Default::default()
        };
        assert!(validate_no_duplicates(&config).is_err());
    }

    #[test]
    fn several_unbound_entries_are_fine() {
        let config = KeybindConfig {
            go_back: String::new(),
            go_forward: String::new(),
            ..Default::default()
        };
        assert!(validate_no_duplicates(&config).is_ok());
    }
}
