//! Input dispatch: key chord to action, action to a command scoped to the
//! active project, command applied to the workspace.

use tandem_common::{Action, ContentId, LayoutMode, Panel, ProjectId, Result, SessionId};
use tandem_input::{KeyCombo, KeybindRegistry};
use tandem_pty::ProcessHost;
use tandem_surface::SurfaceFactory;

use crate::project::Project;
use crate::workspace::Workspace;

/// A workspace operation with its target resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    CreateProject,
    CloseProject(ProjectId),
    CycleProject { forward: bool },
    NewSession(ProjectId),
    CloseSession(ProjectId, SessionId),
    CycleSessions { project: ProjectId, forward: bool },
    NewContentTab(ProjectId),
    CloseContent(ProjectId, ContentId),
    CycleContent { project: ProjectId, forward: bool },
    FocusAddressBar(ProjectId),
    Reload(ProjectId),
    GoBack(ProjectId),
    GoForward(ProjectId),
    ToggleDevTools(ProjectId),
    SetLayout(ProjectId, LayoutMode),
    Noop,
}

/// The parts of workspace state that decide what an action targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchContext {
    pub project: ProjectId,
    pub project_count: usize,
    pub focused: Panel,
    pub session: Option<SessionId>,
    pub session_count: usize,
    pub content: Option<ContentId>,
    pub content_count: usize,
}

impl DispatchContext {
    pub fn for_project(project: &Project, project_count: usize) -> Self {
        Self {
            project: project.id,
            project_count,
            focused: project.focused_panel,
            session: project.sessions.active_id(),
            session_count: project.sessions.len(),
            content: project.contents.active_id(),
            content_count: project.contents.len(),
        }
    }
}

/// Map an action onto the workspace state it applies to.
///
/// Closing and cycling tabs follow the focused panel. Cycling needs at
/// least two entries.
pub fn resolve(action: Action, ctx: &DispatchContext) -> Command {
    let project = ctx.project;
    match action {
        Action::NewProject => Command::CreateProject,
        Action::CloseProject => Command::CloseProject(project),
        Action::NextProject | Action::PrevProject if ctx.project_count > 1 => {
            Command::CycleProject {
                forward: action == Action::NextProject,
            }
        }
        Action::NewSession => Command::NewSession(project),
        Action::NewContentTab => Command::NewContentTab(project),
        Action::CloseActiveTab => match ctx.focused {
            Panel::Terminal => ctx
                .session
                .map_or(Command::Noop, |s| Command::CloseSession(project, s)),
            Panel::Content => ctx
                .content
                .map_or(Command::Noop, |c| Command::CloseContent(project, c)),
        },
        Action::NextTab | Action::PrevTab => {
            let forward = action == Action::NextTab;
            match ctx.focused {
                Panel::Terminal if ctx.session_count > 1 => {
                    Command::CycleSessions { project, forward }
                }
                Panel::Content if ctx.content_count > 1 => {
                    Command::CycleContent { project, forward }
                }
                _ => Command::Noop,
            }
        }
        Action::FocusAddressBar => Command::FocusAddressBar(project),
        Action::Reload => Command::Reload(project),
        Action::GoBack => Command::GoBack(project),
        Action::GoForward => Command::GoForward(project),
        Action::ToggleDevTools => Command::ToggleDevTools(project),
        Action::SetLayout(mode) => Command::SetLayout(project, mode),
        Action::NextProject | Action::PrevProject | Action::None => Command::Noop,
    }
}

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    pub fn dispatch_context(&self) -> Option<DispatchContext> {
        self.active_project()
            .map(|p| DispatchContext::for_project(p, self.project_count()))
    }

    /// Apply a resolved command.
    pub fn execute(&mut self, command: Command) -> Result<()> {
        tracing::debug!(?command, "execute");
        match command {
            Command::CreateProject => {
                self.create_project(None);
            }
            Command::CloseProject(id) => {
                self.close_project(id);
            }
            Command::CycleProject { forward } => {
                self.cycle_project(forward);
            }
            Command::NewSession(project) => {
                self.new_session(project)?;
            }
            Command::CloseSession(project, session) => {
                self.close_session(project, session);
            }
            Command::CycleSessions { project, forward } => {
                self.cycle_sessions(project, forward);
            }
            Command::NewContentTab(project) => {
                self.new_content_tab(project, None)?;
            }
            Command::CloseContent(project, content) => {
                self.close_content(project, content);
            }
            Command::CycleContent { project, forward } => {
                self.cycle_content(project, forward);
            }
            Command::FocusAddressBar(project) => {
                self.focus_address_bar(project);
            }
            Command::Reload(project) => {
                self.reload(project);
            }
            Command::GoBack(project) => {
                self.go_back(project);
            }
            Command::GoForward(project) => {
                self.go_forward(project);
            }
            Command::ToggleDevTools(project) => {
                self.toggle_devtools(project);
            }
            Command::SetLayout(project, mode) => {
                self.set_layout(project, mode);
            }
            Command::Noop => {}
        }
        Ok(())
    }

    /// Resolve an action against the active project and apply it.
    pub fn perform(&mut self, action: Action) -> Result<Command> {
        let Some(ctx) = self.dispatch_context() else {
            return Ok(Command::Noop);
        };
        let command = resolve(action, &ctx);
        self.execute(command)?;
        Ok(command)
    }
}

/// Turns key chords into workspace commands.
#[derive(Debug, Clone, Default)]
pub struct InputDispatcher {
    registry: KeybindRegistry,
}

impl InputDispatcher {
    pub fn new(registry: KeybindRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &KeybindRegistry {
        &self.registry
    }

    /// Handle a chord. Returns the action it triggered, or `None` when the
    /// chord is unbound and should go to the focused panel instead.
    pub fn handle_chord<H: ProcessHost, S: SurfaceFactory>(
        &self,
        workspace: &mut Workspace<H, S>,
        combo: &KeyCombo,
    ) -> Result<Option<Action>> {
        let Some(action) = self.registry.lookup(combo) else {
            return Ok(None);
        };
        tracing::debug!(chord = %combo, action = action.label(), "keybind");
        workspace.perform(action)?;
        Ok(Some(action))
    }
}
