use serde::{Deserialize, Serialize};
use tandem_common::InputError;

/// A keyboard modifier key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modifier {
    Ctrl,
    /// Alt, or Option on macOS.
    Alt,
    Shift,
    /// Cmd on macOS, Win on Windows, Super on Linux.
    Super,
}

/// Zero or more modifiers plus a normalized key name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBind {
    pub modifiers: Vec<Modifier>,
    pub key: String,
}

/// Parses a keybind string like `"Ctrl+Shift+T"` or `"Alt+Left"`.
///
/// - `"Cmd"` / `"Command"` become `Super` on macOS and `Ctrl` elsewhere
/// - `"Option"` / `"Opt"` become `Alt`
/// - `"Win"` / `"Meta"` become `Super`
///
/// The last token is the key even if it names a modifier, so `"Shift"`
/// alone binds the Shift key itself. Repeated modifiers collapse.
pub fn parse_keybind(s: &str) -> Result<KeyBind, InputError> {
    let tokens: Vec<&str> = s.split('+').map(str::trim).collect();
    let Some((last, mods)) = tokens.split_last() else {
        return Err(InputError::InvalidKeybind("empty keybind string".into()));
    };
    if last.is_empty() {
        return Err(InputError::InvalidKeybind(format!(
            "keybind '{s}' has no key component"
        )));
    }

    let mut modifiers = Vec::new();
    for token in mods {
        let modifier = normalize_modifier(token).ok_or_else(|| {
            InputError::InvalidKeybind(format!("unrecognized modifier '{token}' in '{s}'"))
        })?;
        if !modifiers.contains(&modifier) {
            modifiers.push(modifier);
        }
    }

    Ok(KeyBind {
        modifiers,
        key: normalize_key_name(last),
    })
}

fn normalize_modifier(token: &str) -> Option<Modifier> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifier::Ctrl),
        "alt" | "option" | "opt" => Some(Modifier::Alt),
        "shift" => Some(Modifier::Shift),
        "cmd" | "command" => {
            if cfg!(target_os = "macos") {
                Some(Modifier::Super)
            } else {
                Some(Modifier::Ctrl)
            }
        }
        "super" | "win" | "meta" => Some(Modifier::Super),
        _ => None,
    }
}

/// Canonical spelling of a key name, shared by config parsing and runtime
/// key events.
pub(crate) fn normalize_key_name(token: &str) -> String {
    let lower = token.to_ascii_lowercase();
    match lower.as_str() {
        "period" => ".".into(),
        "comma" => ",".into(),
        "slash" => "/".into(),
        "space" => "Space".into(),
        "enter" | "return" => "Enter".into(),
        "escape" | "esc" => "Escape".into(),
        "tab" => "Tab".into(),
        "backspace" => "Backspace".into(),
        "delete" | "del" => "Delete".into(),
        "up" | "arrowup" => "Up".into(),
        "down" | "arrowdown" => "Down".into(),
        "left" | "arrowleft" => "Left".into(),
        "right" | "arrowright" => "Right".into(),
        "pageup" | "pgup" => "PageUp".into(),
        "pagedown" | "pgdn" => "PageDown".into(),
        _ if token.chars().count() == 1 => token.to_uppercase(),
        _ => {
            let mut chars = lower.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().chain(chars).collect(),
                None => lower,
            }
        }
    }
}
