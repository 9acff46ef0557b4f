//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Tandem Configuration
# Only override what you want to change -- missing fields use defaults.

[shell]
# program = ""             # empty: use $SHELL, else /bin/bash
# args = []
# working_directory = "~"  # default: home directory
# login_shell = false
# isolate_env = false      # true: pass only a minimal allow-list of the environment
# [shell.env]
# EDITOR = "nvim"

[terminal]
# scrollback_bytes = 1048576   # 4096-67108864
# cell_width = 8.0             # 1.0-100.0
# cell_height = 17.0           # 1.0-100.0
# padding = 4.0                # 0.0-100.0
# default_cols = 80            # 1-1000
# default_rows = 24            # 1-1000

[layout]
# default_mode = "split"       # split | terminal-only | content-only | split-vertical
# divider_width = 4.0          # 0.0-40.0

[content]
# start_page = "https://duckduckgo.com"
# blank_page = "about:blank"
# search_endpoint = "https://duckduckgo.com/?q="

[projects]
# name_prefix = "Project"
# palette = ["#89b4fa", "#a6e3a1", "#fab387", "#cba6f7", "#f38ba8", "#f9e2af", "#94e2d5", "#f5c2e7"]

[keybinds]
# new_project = "Ctrl+Shift+P"
# close_project = "Ctrl+Shift+W"
# next_project = "Ctrl+PageDown"
# prev_project = "Ctrl+PageUp"
# new_terminal = "Ctrl+Shift+T"
# new_tab = "Ctrl+T"
# close_tab = "Ctrl+W"
# next_tab = "Ctrl+Tab"
# prev_tab = "Ctrl+Shift+Tab"
# focus_address_bar = "Ctrl+L"
# reload = "Ctrl+R"
# go_back = "Alt+Left"
# go_forward = "Alt+Right"
# toggle_devtools = "Ctrl+Shift+I"
# layout_split = "Ctrl+1"
# layout_terminal_only = "Ctrl+2"
# layout_content_only = "Ctrl+3"
# layout_split_vertical = ""

[logging]
# level = "info"               # trace | debug | info | warn | error
"##
    .to_string()
}
