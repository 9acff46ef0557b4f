use std::fmt;

use tandem_common::{LayoutMode, ProjectId};
use tandem_pty::ProcessHost;
use tandem_surface::SurfaceFactory;

use super::Workspace;
use crate::project::InputFocus;

/// What the status bar shows for the active project.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBar {
    pub project: ProjectId,
    pub project_name: String,
    /// `#rrggbb` accent.
    pub project_color: String,
    /// `"zsh (pty:3)"`, `"Exited"`, or `"No terminal"`.
    pub terminal: String,
    /// `"80x24"` whenever there is a session; after exit, its last grid.
    pub grid: Option<String>,
    pub layout: LayoutMode,
    pub focus: InputFocus,
    pub content_title: Option<String>,
    pub content_url: Option<String>,
    /// The active content tab is loading.
    pub loading: bool,
}

impl fmt::Display for StatusBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.project_name, self.terminal)?;
        if let Some(grid) = &self.grid {
            write!(f, " {grid}")?;
        }
        write!(f, " | {}", self.layout.label())?;
        if let Some(url) = &self.content_url {
            write!(f, " | {url}")?;
        }
        if self.loading {
            write!(f, " (loading)")?;
        }
        Ok(())
    }
}

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    pub fn status(&self) -> Option<StatusBar> {
        let p = self.active_project()?;
        let (terminal, grid) = match p.sessions.active() {
            None => ("No terminal".to_string(), None),
            Some(s) if !s.alive => ("Exited".to_string(), Some(s.grid.to_string())),
            Some(s) => (
                format!("{} (pty:{})", s.shell_name, s.process.0),
                Some(s.grid.to_string()),
            ),
        };
        let tab = p.contents.active();
        Some(StatusBar {
            project: p.id,
            project_name: p.name.clone(),
            project_color: p.color.to_hex(),
            terminal,
            grid,
            layout: p.layout.mode(),
            focus: p.input_focus,
            content_title: tab.map(|t| t.title.clone()),
            content_url: tab.map(|t| t.url.clone()),
            loading: tab.is_some_and(|t| t.loading),
        })
    }
}
