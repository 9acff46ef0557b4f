//! One project: its tabs, layout, and focus.

use std::path::PathBuf;

use tandem_common::{Color, GridSize, Panel, ProjectId};
use tandem_layout::LayoutState;

use crate::content::ContentRegistry;
use crate::session::SessionRegistry;

/// Where keyboard input goes inside a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    Terminal,
    AddressBar,
    Content,
}

impl InputFocus {
    /// The panel this focus lives in.
    pub fn panel(self) -> Panel {
        match self {
            InputFocus::Terminal => Panel::Terminal,
            InputFocus::AddressBar | InputFocus::Content => Panel::Content,
        }
    }
}

#[derive(Debug)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub color: Color,
    pub layout: LayoutState,
    pub focused_panel: Panel,
    pub input_focus: InputFocus,
    pub sessions: SessionRegistry,
    pub contents: ContentRegistry,
    /// Working directory new sessions start in.
    pub cwd: PathBuf,
    /// Last grid fitted to the terminal panel.
    pub grid: GridSize,
    pub(crate) pending_refit: bool,
}

impl Project {
    pub(crate) fn focus(&mut self, focus: InputFocus) {
        self.input_focus = focus;
        self.focused_panel = focus.panel();
    }

    /// Whether geometry must be recomputed at the next pump.
    pub fn needs_refit(&self) -> bool {
        self.pending_refit
    }
}
