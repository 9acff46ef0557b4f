//! Keybind registry: maps key chords to runtime `Action`s.

use indexmap::IndexMap;
use tandem_common::{Action, LayoutMode};
use tandem_config::schema::KeybindConfig;

use crate::combo::KeyCombo;

/// Maps key chords to [`Action`]s, in config order.
#[derive(Debug, Clone, Default)]
pub struct KeybindRegistry {
    bindings: IndexMap<KeyCombo, Action>,
}

impl KeybindRegistry {
    /// Build the registry from the config keybind section.
    ///
    /// Empty entries are unbound. Invalid strings are logged and skipped.
    pub fn from_config(config: &KeybindConfig) -> Self {
        let mappings: [(&str, Action); 18] = [
            (&config.new_project, Action::NewProject),
            (&config.close_project, Action::CloseProject),
            (&config.next_project, Action::NextProject),
            (&config.prev_project, Action::PrevProject),
            (&config.new_terminal, Action::NewSession),
            (&config.new_tab, Action::NewContentTab),
            (&config.close_tab, Action::CloseActiveTab),
            (&config.next_tab, Action::NextTab),
            (&config.prev_tab, Action::PrevTab),
            (&config.focus_address_bar, Action::FocusAddressBar),
            (&config.reload, Action::Reload),
            (&config.go_back, Action::GoBack),
            (&config.go_forward, Action::GoForward),
            (&config.toggle_devtools, Action::ToggleDevTools),
            (&config.layout_split, Action::SetLayout(LayoutMode::Split)),
            (
                &config.layout_terminal_only,
                Action::SetLayout(LayoutMode::TerminalOnly),
            ),
            (
                &config.layout_content_only,
                Action::SetLayout(LayoutMode::ContentOnly),
            ),
            (
                &config.layout_split_vertical,
                Action::SetLayout(LayoutMode::SplitVertical),
            ),
        ];

        let mut registry = Self::default();
        for (binding, action) in mappings {
            if binding.trim().is_empty() {
                continue;
            }
            match KeyCombo::parse(binding) {
                Ok(combo) => registry.bind(combo, action),
                Err(e) => tracing::warn!(binding, error = %e, "skipping invalid keybind"),
            }
        }
        registry
    }

    /// Bind a chord, replacing any previous binding for it.
    pub fn bind(&mut self, combo: KeyCombo, action: Action) {
        self.bindings.insert(combo, action);
    }

    /// Look up the action for a chord.
    ///
    /// An exact match wins. Otherwise a chord using Super falls back to the
    /// Ctrl binding and vice versa, so every default works with either
    /// Ctrl or Cmd.
    pub fn lookup(&self, combo: &KeyCombo) -> Option<Action> {
        if let Some(action) = self.bindings.get(combo) {
            return Some(*action);
        }
        let swapped = combo.with_primary_swapped()?;
        self.bindings.get(&swapped).copied()
    }

    /// The first chord bound to `action`, for menus and help text.
    pub fn combo_for_action(&self, action: Action) -> Option<&KeyCombo> {
        self.bindings
            .iter()
            .find_map(|(combo, a)| (*a == action).then_some(combo))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&KeyCombo, &Action)> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
