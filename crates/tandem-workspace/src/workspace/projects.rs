use tandem_common::{Event, Notification, Panel, ProjectId};
use tandem_layout::LayoutState;
use tandem_pty::ProcessHost;
use tandem_surface::SurfaceFactory;

use super::Workspace;
use crate::content::ContentRegistry;
use crate::project::{InputFocus, Project};
use crate::session::SessionRegistry;

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    /// Create a project with one session and one content tab, and make it
    /// active.
    ///
    /// Always succeeds: a shell or surface that fails to start is reported
    /// through the notification queue and the project keeps an empty list.
    pub fn create_project(&mut self, name: Option<&str>) -> ProjectId {
        let id = self.next_project;
        self.next_project = id.next();

        let name = name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{} {}", self.settings.name_prefix, id.0));
        let project = Project {
            id,
            name,
            color: self.settings.color_for(id),
            layout: LayoutState::new(self.settings.default_layout),
            focused_panel: Panel::Terminal,
            input_focus: InputFocus::Terminal,
            sessions: SessionRegistry::new(self.settings.scrollback),
            contents: ContentRegistry::new(id, self.sink.clone()),
            cwd: self.settings.cwd.clone(),
            grid: self.settings.default_grid,
            pending_refit: true,
        };
        tracing::info!(project = %id, name = %project.name, "project created");
        self.projects.insert(id, project);
        self.active = id;
        self.publish(Event::ProjectCreated(id));

        if let Err(e) = self.new_session(id) {
            self.notify(Notification::error("Shell failed to start", e.to_string()));
        }
        let start_page = self.settings.start_page.clone();
        if let Err(e) = self.open_content(id, &start_page) {
            self.notify(Notification::error("Content tab failed to open", e.to_string()));
        }
        if let Some(project) = self.projects.get_mut(&id) {
            project.focus(InputFocus::Terminal);
        }
        self.sync_visibility();
        id
    }

    /// Tear a project down. Closing the last project opens a fresh one.
    ///
    /// Returns `false` for unknown ids.
    pub fn close_project(&mut self, id: ProjectId) -> bool {
        let Some((index, _, mut project)) = self.projects.shift_remove_full(&id) else {
            return false;
        };
        let killed = project.sessions.dispose_all(&mut self.host);
        for process in &killed {
            self.routes.remove(process);
        }
        let surfaces = project.contents.dispose_all();
        tracing::info!(
            project = %id,
            killed = killed.len(),
            surfaces,
            "project closed"
        );
        self.publish(Event::ProjectClosed(id));

        if self.projects.is_empty() {
            self.create_project(None);
            return true;
        }
        if self.active == id {
            let next = index.min(self.projects.len() - 1);
            if let Some(next_id) = self.projects.get_index(next).map(|(id, _)| *id) {
                self.activate_project(next_id);
            }
        }
        true
    }

    /// Make `id` the active project. Returns `false` for unknown ids.
    pub fn switch_project(&mut self, id: ProjectId) -> bool {
        if !self.projects.contains_key(&id) {
            return false;
        }
        if self.active != id {
            self.activate_project(id);
        }
        true
    }

    /// Activate the next (or previous) project, wrapping around. Does
    /// nothing with a single project.
    pub fn cycle_project(&mut self, forward: bool) -> Option<ProjectId> {
        let len = self.projects.len();
        if len < 2 {
            return None;
        }
        let current = self.projects.get_index_of(&self.active).unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        let id = self.projects.get_index(next).map(|(id, _)| *id)?;
        self.activate_project(id);
        Some(id)
    }

    /// Rename a project. Blank names are ignored.
    pub fn rename_project(&mut self, id: ProjectId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        match self.projects.get_mut(&id) {
            Some(project) => {
                tracing::debug!(project = %id, name, "project renamed");
                project.name = name.to_string();
                true
            }
            None => false,
        }
    }

    fn activate_project(&mut self, id: ProjectId) {
        self.active = id;
        self.sync_visibility();
        self.request_refit(id);
        tracing::debug!(project = %id, "project switched");
        self.publish(Event::ProjectSwitched(id));
    }
}
