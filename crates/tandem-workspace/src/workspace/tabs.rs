//! Session and content tab operations, scoped to one project.

use tandem_common::{ContentId, Event, Notification, ProjectId, Result, SessionId, TandemError};
use tandem_pty::{ProcessHost, SpawnRequest};
use tandem_surface::SurfaceFactory;

use super::Workspace;
use crate::project::InputFocus;

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    // =========================================================================
    // Sessions
    // =========================================================================

    /// Spawn a shell sized to the project's terminal grid and activate it.
    pub fn new_session(&mut self, project: ProjectId) -> Result<SessionId> {
        let p = self
            .projects
            .get_mut(&project)
            .ok_or(TandemError::UnknownProject(project))?;
        let request = SpawnRequest {
            cwd: p.cwd.clone(),
            size: p.grid,
        };
        let session = match p.sessions.add_session(&mut self.host, &request) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(project = %project, error = %e, "shell failed to start");
                return Err(e.into());
            }
        };
        p.focus(InputFocus::Terminal);
        p.pending_refit = true;
        self.register_session(project, session);
        Ok(session)
    }

    /// Close a session, killing its process if still running.
    ///
    /// The last session of a project is replaced by a fresh one; if that
    /// spawn fails the project is left without sessions and a notification
    /// is queued.
    pub fn close_session(&mut self, project: ProjectId, session: SessionId) -> bool {
        let Some(p) = self.projects.get_mut(&project) else {
            return false;
        };
        let Some(closing) = p.sessions.get(session) else {
            return false;
        };
        let process = closing.alive.then_some(closing.process);
        let request = SpawnRequest {
            cwd: p.cwd.clone(),
            size: p.grid,
        };
        let replacement = p
            .sessions
            .close_session(&mut self.host, session, &request)
            .and_then(|outcome| outcome.replacement);
        p.focus(InputFocus::Terminal);
        p.pending_refit = true;

        if let Some(process) = process {
            self.routes.remove(&process);
        }
        tracing::info!(project = %project, session = %session, "session closed");
        self.publish(Event::SessionClosed { project, session });

        match replacement {
            Some(Ok(new)) => self.register_session(project, new),
            Some(Err(e)) => {
                self.notify(Notification::error("Shell failed to start", e.to_string()));
            }
            None => {}
        }
        true
    }

    pub fn switch_session(&mut self, project: ProjectId, session: SessionId) -> bool {
        let Some(p) = self.projects.get_mut(&project) else {
            return false;
        };
        if !p.sessions.switch_session(session) {
            return false;
        }
        p.focus(InputFocus::Terminal);
        p.pending_refit = true;
        true
    }

    pub fn cycle_sessions(&mut self, project: ProjectId, forward: bool) -> Option<SessionId> {
        let p = self.projects.get_mut(&project)?;
        let session = p.sessions.cycle(forward)?;
        p.focus(InputFocus::Terminal);
        p.pending_refit = true;
        Some(session)
    }

    /// Send keyboard input to the project's active session.
    ///
    /// Returns `false` when there is no live session to receive it.
    pub fn write_input(&mut self, project: ProjectId, bytes: &[u8]) -> bool {
        let Some(session) = self
            .projects
            .get(&project)
            .and_then(|p| p.sessions.active())
        else {
            return false;
        };
        if !session.alive {
            return false;
        }
        self.host.write(session.process, bytes);
        true
    }

    fn register_session(&mut self, project: ProjectId, session: SessionId) {
        let Some(s) = self
            .projects
            .get(&project)
            .and_then(|p| p.sessions.get(session))
        else {
            return;
        };
        self.routes.insert(s.process, (project, session));
        tracing::info!(
            project = %project,
            session = %session,
            pty = %s.process,
            shell = %s.shell_name,
            grid = %s.grid,
            "session opened"
        );
        self.publish(Event::SessionOpened { project, session });
    }

    // =========================================================================
    // Content tabs
    // =========================================================================

    /// Open a content tab (blank page by default) and focus its address
    /// field.
    pub fn new_content_tab(&mut self, project: ProjectId, url: Option<&str>) -> Result<ContentId> {
        let url = url.unwrap_or(self.settings.blank_page.as_str()).to_string();
        let content = self.open_content(project, &url)?;
        if let Some(p) = self.projects.get_mut(&project) {
            p.focus(InputFocus::AddressBar);
        }
        Ok(content)
    }

    pub(super) fn open_content(&mut self, project: ProjectId, url: &str) -> Result<ContentId> {
        let p = self
            .projects
            .get_mut(&project)
            .ok_or(TandemError::UnknownProject(project))?;
        let content = match p.contents.add_content(&mut self.surfaces, url) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(project = %project, url, error = %e, "content tab failed to open");
                return Err(e.into());
            }
        };
        p.pending_refit = true;
        tracing::debug!(project = %project, content = %content, url, "content tab opened");
        self.publish(Event::ContentOpened { project, content });
        Ok(content)
    }

    /// Close a content tab. The last tab is replaced by a blank one.
    pub fn close_content(&mut self, project: ProjectId, content: ContentId) -> bool {
        let blank = self.settings.blank_page.clone();
        let Some(p) = self.projects.get_mut(&project) else {
            return false;
        };
        let Some(outcome) = p.contents.close_content(&mut self.surfaces, content, &blank) else {
            return false;
        };
        p.focus(InputFocus::Content);
        tracing::debug!(project = %project, content = %content, "content tab closed");
        self.publish(Event::ContentClosed { project, content });

        match outcome.replacement {
            Some(Ok(new)) => self.publish(Event::ContentOpened {
                project,
                content: new,
            }),
            Some(Err(e)) => {
                self.notify(Notification::error("Content tab failed to open", e.to_string()));
            }
            None => {}
        }
        true
    }

    pub fn switch_content(&mut self, project: ProjectId, content: ContentId) -> bool {
        let Some(p) = self.projects.get_mut(&project) else {
            return false;
        };
        if !p.contents.switch_content(content) {
            return false;
        }
        p.focus(InputFocus::Content);
        true
    }

    pub fn cycle_content(&mut self, project: ProjectId, forward: bool) -> Option<ContentId> {
        let p = self.projects.get_mut(&project)?;
        let content = p.contents.cycle(forward)?;
        p.focus(InputFocus::Content);
        Some(content)
    }

    /// Load address-field input in the active content tab.
    ///
    /// Returns the normalized URL, or `None` when nothing was loaded.
    pub fn navigate(&mut self, project: ProjectId, input: &str) -> Option<String> {
        let p = self.projects.get_mut(&project)?;
        let ctx = Self::address_context(&self.settings, &p.cwd);
        let url = p.contents.navigate_active(input, &ctx)?;
        p.focus(InputFocus::Content);
        tracing::debug!(project = %project, url = %url, "navigate");
        Some(url)
    }

    /// Put keyboard focus in the address field. Fails when the content
    /// panel is hidden.
    pub fn focus_address_bar(&mut self, project: ProjectId) -> bool {
        match self.projects.get_mut(&project) {
            Some(p) if p.layout.mode().shows_content() => {
                p.focus(InputFocus::AddressBar);
                true
            }
            _ => false,
        }
    }

    pub fn reload(&mut self, project: ProjectId) -> bool {
        match self.projects.get_mut(&project) {
            Some(p) if !p.contents.is_empty() => {
                p.contents.reload();
                true
            }
            _ => false,
        }
    }

    pub fn go_back(&mut self, project: ProjectId) -> bool {
        self.projects
            .get_mut(&project)
            .is_some_and(|p| p.contents.go_back())
    }

    pub fn go_forward(&mut self, project: ProjectId) -> bool {
        self.projects
            .get_mut(&project)
            .is_some_and(|p| p.contents.go_forward())
    }

    /// Returns whether developer tools are now open.
    pub fn toggle_devtools(&mut self, project: ProjectId) -> bool {
        self.projects
            .get_mut(&project)
            .is_some_and(|p| p.contents.toggle_devtools())
    }
}
