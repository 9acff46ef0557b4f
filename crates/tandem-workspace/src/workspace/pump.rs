//! One UI-loop turn: route process output, surface reports, and refits.

use tandem_common::{Event, ProjectId};
use tandem_pty::{ProcessEvent, ProcessHost};
use tandem_surface::SurfaceFactory;

use super::{Output, Workspace};

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    /// Drain the process host and surface sink, route everything to its
    /// owner, then apply pending refits.
    ///
    /// Returns the output chunks in arrival order, including exit notices.
    pub fn pump(&mut self) -> Vec<Output> {
        let mut output = Vec::new();

        for event in self.host.drain_events() {
            match event {
                ProcessEvent::Data { id, bytes } => {
                    let Some(&(project, session)) = self.routes.get(&id) else {
                        tracing::trace!(pty = %id, len = bytes.len(), "output for unrouted process");
                        continue;
                    };
                    if let Some(p) = self.projects.get_mut(&project) {
                        p.sessions.apply_output(session, &bytes);
                    }
                    output.push(Output {
                        project,
                        session,
                        bytes,
                    });
                }
                ProcessEvent::Exit { id, code } => {
                    let Some((project, session)) = self.routes.remove(&id) else {
                        tracing::trace!(pty = %id, code, "exit for unrouted process");
                        continue;
                    };
                    let notice = self
                        .projects
                        .get_mut(&project)
                        .and_then(|p| p.sessions.mark_exited(session, code));
                    if let Some(notice) = notice {
                        tracing::info!(project = %project, session = %session, pty = %id, code, "session exited");
                        output.push(Output {
                            project,
                            session,
                            bytes: notice.into_bytes(),
                        });
                        self.publish(Event::SessionExited {
                            project,
                            session,
                            code,
                        });
                    }
                }
            }
        }

        for (key, event) in self.sink.drain() {
            let applied = self
                .projects
                .get_mut(&key.project)
                .is_some_and(|p| p.contents.apply_event(key.content, event));
            if !applied {
                tracing::trace!(project = %key.project, content = %key.content, "event for closed surface");
            }
        }

        self.flush_refits();
        output
    }

    /// Refit the active project if it asked for it. Inactive projects keep
    /// their request until they are shown.
    fn flush_refits(&mut self) {
        let active = self.active;
        if self
            .projects
            .get(&active)
            .is_some_and(|p| p.pending_refit)
        {
            self.refit(active);
        }
    }

    fn refit(&mut self, project: ProjectId) {
        let viewport = self.viewport;
        let divider = self.settings.divider_width;
        let metrics = self.settings.metrics;
        let Some(p) = self.projects.get_mut(&project) else {
            return;
        };
        p.pending_refit = false;
        if viewport.is_empty() {
            return;
        }

        let rects = p.layout.panel_rects(viewport, divider);
        if let Some(content) = rects.content {
            p.contents.set_bounds(content);
        }
        // A hidden terminal keeps its last grid.
        let Some(terminal) = rects.terminal else {
            return;
        };
        let grid = metrics.fit(terminal);
        p.grid = grid;

        let Some(active) = p.sessions.active_id() else {
            return;
        };
        if let Some(session) = p.sessions.get_mut(active) {
            if session.alive && session.grid != grid {
                tracing::debug!(project = %project, session = %active, grid = %grid, "resize");
                self.host.resize(session.process, grid);
                session.grid = grid;
            }
        }
    }
}
