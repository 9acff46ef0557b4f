use serde::{Deserialize, Serialize};

use crate::types::LayoutMode;

/// Every user-triggerable action in the application.
///
/// Keybinds and the headless driver both resolve to an `Action`. The
/// workspace dispatcher turns an action into a command scoped to the
/// active project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // -- Projects --
    NewProject,
    CloseProject,
    NextProject,
    PrevProject,

    // -- Tabs --
    NewSession,
    NewContentTab,
    CloseActiveTab,
    NextTab,
    PrevTab,

    // -- Content --
    FocusAddressBar,
    Reload,
    GoBack,
    GoForward,
    ToggleDevTools,

    // -- Layout --
    SetLayout(LayoutMode),

    // -- Noop --
    None,
}

impl Action {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Action::NewProject => "New Project",
            Action::CloseProject => "Close Project",
            Action::NextProject => "Next Project",
            Action::PrevProject => "Previous Project",
            Action::NewSession => "New Terminal",
            Action::NewContentTab => "New Tab",
            Action::CloseActiveTab => "Close Tab",
            Action::NextTab => "Next Tab",
            Action::PrevTab => "Previous Tab",
            Action::FocusAddressBar => "Focus Address Bar",
            Action::Reload => "Reload",
            Action::GoBack => "Back",
            Action::GoForward => "Forward",
            Action::ToggleDevTools => "Toggle DevTools",
            Action::SetLayout(LayoutMode::Split) => "Layout: Split",
            Action::SetLayout(LayoutMode::TerminalOnly) => "Layout: Terminal Only",
            Action::SetLayout(LayoutMode::ContentOnly) => "Layout: Content Only",
            Action::SetLayout(LayoutMode::SplitVertical) => "Layout: Split Vertical",
            Action::None => "None",
        }
    }

    /// Whether the action touches state outside the active project.
    pub fn is_global(&self) -> bool {
        matches!(
            self,
            Action::NewProject | Action::NextProject | Action::PrevProject
        )
    }

    /// All actions a user can invoke by name.
    pub fn all() -> Vec<Action> {
        vec![
            Action::NewProject,
            Action::CloseProject,
            Action::NextProject,
            Action::PrevProject,
            Action::NewSession,
            Action::NewContentTab,
            Action::CloseActiveTab,
            Action::NextTab,
            Action::PrevTab,
            Action::FocusAddressBar,
            Action::Reload,
            Action::GoBack,
            Action::GoForward,
            Action::ToggleDevTools,
            Action::SetLayout(LayoutMode::Split),
            Action::SetLayout(LayoutMode::TerminalOnly),
            Action::SetLayout(LayoutMode::ContentOnly),
            Action::SetLayout(LayoutMode::SplitVertical),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_actions_have_labels() {
        for action in Action::all() {
            assert!(!action.label().is_empty(), "action {:?} has empty label", action);
        }
    }

    #[test]
    fn all_excludes_none() {
        assert!(!Action::all().contains(&Action::None));
    }

    #[test]
    fn global_actions() {
        assert!(Action::NewProject.is_global());
        assert!(Action::NextProject.is_global());
        assert!(Action::PrevProject.is_global());
        assert!(!Action::CloseProject.is_global());
        assert!(!Action::NewSession.is_global());
        assert!(!Action::SetLayout(LayoutMode::Split).is_global());
    }

    #[test]
    fn layout_labels_are_distinct() {
        let labels: std::collections::HashSet<_> = [
            LayoutMode::Split,
            LayoutMode::TerminalOnly,
            LayoutMode::ContentOnly,
            LayoutMode::SplitVertical,
        ]
        .into_iter()
        .map(|m| Action::SetLayout(m).label())
        .collect();
        assert_eq!(labels.len(), 4);
    }

    #[test]
    fn action_serde_roundtrip() {
        let json = serde_json::to_string(&Action::SetLayout(LayoutMode::ContentOnly)).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Action::SetLayout(LayoutMode::ContentOnly));
    }
}
