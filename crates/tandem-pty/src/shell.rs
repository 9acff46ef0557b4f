//! Shell detection and command construction.

use std::collections::HashMap;
use std::path::Path;

use portable_pty::CommandBuilder;
use tandem_config::schema::ShellConfig;

/// Environment variables kept when `isolate_env` is set.
pub const ALLOWED_ENV_VARS: &[&str] = &[
    "HOME",
    "USER",
    "LOGNAME",
    "SHELL",
    "PATH",
    "LANG",
    "LC_ALL",
    "LC_CTYPE",
    "DISPLAY",
    "WAYLAND_DISPLAY",
    "XDG_RUNTIME_DIR",
    "TMPDIR",
    "TMP",
    "TEMP",
    // Windows
    "USERPROFILE",
    "APPDATA",
    "LOCALAPPDATA",
    "SYSTEMROOT",
    "COMSPEC",
    "HOMEDRIVE",
    "HOMEPATH",
];

/// The user's default shell: `$SHELL`, else `/bin/bash` on Unix and
/// `powershell.exe` on Windows.
pub fn default_shell() -> String {
    match std::env::var("SHELL") {
        Ok(shell) if !shell.trim().is_empty() => shell,
        _ if cfg!(windows) => "powershell.exe".to_string(),
        _ => "/bin/bash".to_string(),
    }
}

/// The program's file name, used for tab titles.
pub fn shell_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.to_string())
}

/// How every session's shell is launched.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellCommand {
    pub program: String,
    pub args: Vec<String>,
    pub login_shell: bool,
    pub isolate_env: bool,
    pub env: HashMap<String, String>,
}

impl ShellCommand {
    pub fn from_config(config: &ShellConfig) -> Self {
        let program = if config.program.trim().is_empty() {
            default_shell()
        } else {
            config.program.clone()
        };
        Self {
            program,
            args: config.args.clone(),
            login_shell: config.login_shell,
            isolate_env: config.isolate_env,
            env: config.env.clone(),
        }
    }

    pub fn name(&self) -> String {
        shell_name(&self.program)
    }

    /// Build the command for one spawn. The shell inherits the parent
    /// environment (or its allow-listed part), then the terminal variables,
    /// then the configured extras.
    pub(crate) fn build(&self, cwd: &Path) -> CommandBuilder {
        let mut cmd = CommandBuilder::new(&self.program);
        if self.login_shell && cfg!(unix) {
            cmd.arg("-l");
        }
        cmd.args(&self.args);

        if self.isolate_env {
            cmd.env_clear();
            for key in ALLOWED_ENV_VARS {
                if let Ok(val) = std::env::var(key) {
                    cmd.env(key, val);
                }
            }
        }
        cmd.env("TERM", "xterm-256color");
        cmd.env("COLORTERM", "truecolor");
        for (key, val) in &self.env {
            cmd.env(key, val);
        }

        cmd.cwd(cwd);
        cmd
    }
}

impl Default for ShellCommand {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default())
    }
}
