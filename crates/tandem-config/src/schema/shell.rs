//! Shell process configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Which shell each terminal session launches, and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Shell program path. Empty means detect from `$SHELL`.
    pub program: String,
    /// Extra arguments passed to the shell.
    pub args: Vec<String>,
    /// Working directory for new projects. `None` means the home directory.
    pub working_directory: Option<String>,
    /// Launch as a login shell (`-l`).
    pub login_shell: bool,
    /// Pass only a minimal allow-list of the parent environment instead of
    /// all of it.
    pub isolate_env: bool,
    /// Extra environment variables injected into every shell.
    pub env: HashMap<String, String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            working_directory: None,
            login_shell: false,
            isolate_env: false,
            env: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_config_defaults() {
        let config = ShellConfig::default();
        assert!(config.program.is_empty());
        assert!(config.args.is_empty());
        assert!(config.working_directory.is_none());
        assert!(!config.login_shell);
        assert!(!config.isolate_env);
    }

    #[test]
    fn shell_config_partial_toml() {
        let config: ShellConfig = toml::from_str(
            r#"
program = "/bin/zsh"
login_shell = true

[env]
EDITOR = "nvim"
"#,
        )
        .unwrap();
        assert_eq!(config.program, "/bin/zsh");
        assert!(config.login_shell);
        assert_eq!(config.env.get("EDITOR").map(String::as_str), Some("nvim"));
        assert!(config.args.is_empty());
    }
}
