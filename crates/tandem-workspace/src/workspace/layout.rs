//! Layout mode, divider drag, and viewport changes.

use tandem_common::{Event, LayoutMode, Panel, ProjectId, Rect};
use tandem_layout::{PanelRects, Point};
use tandem_pty::ProcessHost;
use tandem_surface::SurfaceFactory;

use super::Workspace;
use crate::project::InputFocus;

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    /// Switch a project's layout. Focus moves to a panel that stays visible.
    pub fn set_layout(&mut self, project: ProjectId, mode: LayoutMode) -> bool {
        let Some(p) = self.projects.get_mut(&project) else {
            return false;
        };
        p.layout.set_mode(mode);
        match p.focused_panel {
            Panel::Terminal if !mode.shows_terminal() => p.focus(InputFocus::Content),
            Panel::Content if !mode.shows_content() => p.focus(InputFocus::Terminal),
            _ => {}
        }
        p.pending_refit = true;
        self.sync_visibility();
        tracing::debug!(project = %project, mode = mode.label(), "layout changed");
        self.publish(Event::LayoutChanged { project, mode });
        true
    }

    /// Start dragging the active project's divider. Only split layouts
    /// have one.
    pub fn begin_divider_drag(&mut self) -> bool {
        self.projects
            .get_mut(&self.active)
            .is_some_and(|p| p.layout.begin_drag())
    }

    /// Move the divider to follow the pointer. Returns the new ratio while a
    /// drag is active.
    pub fn drag_divider(&mut self, pointer: Point) -> Option<f64> {
        let viewport = self.viewport;
        self.projects
            .get_mut(&self.active)?
            .layout
            .drag_to(pointer, viewport)
    }

    /// Release the divider. The terminal is refit on the next pump.
    pub fn end_divider_drag(&mut self) -> bool {
        let Some(p) = self.projects.get_mut(&self.active) else {
            return false;
        };
        if !p.layout.end_drag() {
            return false;
        }
        p.pending_refit = true;
        tracing::debug!(project = %p.id, ratio = p.layout.effective_ratio(), "divider released");
        true
    }

    /// The window content area changed. Every project refits when next
    /// shown.
    pub fn set_viewport(&mut self, viewport: Rect) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        for project in self.projects.values_mut() {
            project.pending_refit = true;
        }
    }

    /// Where a project's panels sit in the current viewport.
    pub fn panel_rects(&self, project: ProjectId) -> Option<PanelRects> {
        let p = self.projects.get(&project)?;
        Some(
            p.layout
                .panel_rects(self.viewport, self.settings.divider_width),
        )
    }
}
