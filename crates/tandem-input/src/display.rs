use crate::keymap::{KeyBind, Modifier};

/// Platform-appropriate label for a keybind, e.g. `Ctrl+Shift+T` or `⌃⇧T`.
pub fn keybind_to_display(kb: &KeyBind) -> String {
    let mac = cfg!(target_os = "macos");
    let mut parts: Vec<&str> = kb
        .modifiers
        .iter()
        .map(|m| match (m, mac) {
            (Modifier::Ctrl, true) => "\u{2303}",
            (Modifier::Alt, true) => "\u{2325}",
            (Modifier::Shift, true) => "\u{21E7}",
            (Modifier::Super, true) => "\u{2318}",
            (Modifier::Ctrl, false) => "Ctrl",
            (Modifier::Alt, false) => "Alt",
            (Modifier::Shift, false) => "Shift",
            (Modifier::Super, false) if cfg!(target_os = "windows") => "Win",
            (Modifier::Super, false) => "Super",
        })
        .collect();
    parts.push(&kb.key);
    parts.join(if mac { "" } else { "+" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::parse_keybind;

    #[test]
    fn display_multi_modifier() {
        let display = keybind_to_display(&parse_keybind("Ctrl+Shift+T").unwrap());
        if cfg!(target_os = "macos") {
            assert_eq!(display, "\u{2303}\u{21E7}T");
        } else {
            assert_eq!(display, "Ctrl+Shift+T");
        }
    }

    #[test]
    fn display_plain_key() {
        assert_eq!(keybind_to_display(&parse_keybind("F5").unwrap()), "F5");
    }
}
