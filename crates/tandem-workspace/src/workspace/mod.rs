//! The workspace manager: projects, their tabs, and the UI-loop pump.
//!
//! `Workspace` owns the process host and the surface factory. Every
//! process-affecting operation goes through the registries of one project;
//! output coming back from the host is routed by process id through
//! `routes`, which holds exactly the alive sessions.

mod invariants;
mod layout;
mod projects;
mod pump;
mod status;
mod tabs;


use std::collections::HashMap;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tandem_common::{
    Color, Event, EventBus, GridSize, LayoutMode, Notification, NotificationQueue, ProcessId,
    ProjectId, Rect, SessionId,
};
use tandem_config::schema::DEFAULT_PALETTE;
use tandem_config::TandemConfig;
use tandem_layout::CellMetrics;
use tandem_pty::ProcessHost;
use tandem_surface::{SurfaceFactory, SurfaceSink};
use tokio::sync::broadcast;

use crate::address::AddressContext;
use crate::project::Project;

pub use status::StatusBar;

/// Everything the workspace needs from configuration.
#[derive(Debug, Clone)]
pub struct WorkspaceSettings {
    /// Working directory for new projects.
    pub cwd: PathBuf,
    pub home: Option<PathBuf>,
    pub palette: Vec<Color>,
    pub name_prefix: String,
    pub default_layout: LayoutMode,
    pub divider_width: f64,
    pub metrics: CellMetrics,
    /// Grid used before any viewport is known.
    pub default_grid: GridSize,
    pub scrollback: usize,
    pub start_page: String,
    pub blank_page: String,
    pub search_endpoint: String,
}

impl WorkspaceSettings {
    pub fn from_config(config: &TandemConfig, cwd: PathBuf) -> Self {
        let mut palette: Vec<Color> = config
            .projects
            .palette
            .iter()
            .filter_map(|hex| Color::from_hex(hex))
            .collect();
        if palette.is_empty() {
            palette = DEFAULT_PALETTE
                .iter()
                .filter_map(|hex| Color::from_hex(hex))
                .collect();
        }
        let clamp_u16 = |v: u32| u16::try_from(v).unwrap_or(u16::MAX).max(1);

        Self {
            cwd,
            home: dirs::home_dir(),
            palette,
            name_prefix: config.projects.name_prefix.clone(),
            default_layout: config.layout.default_mode,
            divider_width: config.layout.divider_width,
            metrics: CellMetrics::from(&config.terminal),
            default_grid: GridSize::new(
                clamp_u16(config.terminal.default_cols),
                clamp_u16(config.terminal.default_rows),
            ),
            scrollback: config.terminal.scrollback_bytes as usize,
            start_page: config.content.start_page.clone(),
            blank_page: config.content.blank_page.clone(),
            search_endpoint: config.content.search_endpoint.clone(),
        }
    }

    fn color_for(&self, id: ProjectId) -> Color {
        if self.palette.is_empty() {
            return Color::from_rgba(255, 255, 255, 255);
        }
        let index = (id.0.saturating_sub(1) as usize) % self.palette.len();
        self.palette[index]
    }
}

/// A chunk of process output routed to its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub project: ProjectId,
    pub session: SessionId,
    pub bytes: Vec<u8>,
}

/// All projects of one window.
pub struct Workspace<H: ProcessHost, S: SurfaceFactory> {
    settings: WorkspaceSettings,
    host: H,
    surfaces: S,
    sink: SurfaceSink,
    projects: IndexMap<ProjectId, Project>,
    active: ProjectId,
    next_project: ProjectId,
    routes: HashMap<ProcessId, (ProjectId, SessionId)>,
    viewport: Rect,
    events: EventBus,
    notifications: NotificationQueue,
}

impl<H: ProcessHost, S: SurfaceFactory> Workspace<H, S> {
    /// Create the workspace with one default project.
    pub fn new(settings: WorkspaceSettings, host: H, surfaces: S) -> Self {
        let mut workspace = Self {
            settings,
            host,
            surfaces,
            sink: SurfaceSink::new(),
            projects: IndexMap::new(),
            active: ProjectId(1),
            next_project: ProjectId(1),
            routes: HashMap::new(),
            viewport: Rect::zero(),
            events: EventBus::default(),
            notifications: NotificationQueue::default(),
        };
        workspace.create_project(None);
        workspace
    }

    // -- Accessors --

    pub fn settings(&self) -> &WorkspaceSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    pub fn active_project_id(&self) -> ProjectId {
        self.active
    }

    pub fn active_project(&self) -> Option<&Project> {
        self.projects.get(&self.active)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id)
    }

    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.values()
    }

    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.projects.keys().copied().collect()
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Which session a live process belongs to.
    pub fn route(&self, process: ProcessId) -> Option<(ProjectId, SessionId)> {
        self.routes.get(&process).copied()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn notifications(&mut self) -> &mut NotificationQueue {
        &mut self.notifications
    }

    // -- Shared helpers --

    fn publish(&self, event: Event) {
        self.events.publish(event);
    }

    fn notify(&mut self, notification: Notification) {
        tracing::warn!(title = %notification.title, body = %notification.body, "notification");
        self.notifications.push(notification);
    }

    /// Schedule a geometry refit for the next pump.
    fn request_refit(&mut self, project: ProjectId) {
        if let Some(p) = self.projects.get_mut(&project) {
            p.pending_refit = true;
        }
    }

    /// Show the content surfaces of the active project only, and only when
    /// its layout has a content panel.
    fn sync_visibility(&mut self) {
        let active = self.active;
        for project in self.projects.values_mut() {
            let shown = project.id == active && project.layout.mode().shows_content();
            if project.contents.is_shown() != shown {
                project.contents.set_shown(shown);
            }
        }
    }

    fn address_context<'a>(settings: &'a WorkspaceSettings, cwd: &'a Path) -> AddressContext<'a> {
        AddressContext {
            cwd,
            home: settings.home.as_deref(),
            search_endpoint: &settings.search_endpoint,
        }
    }

    /// Kill every process and dispose every surface. Projects stay listed
    /// with empty tab lists.
    pub fn shutdown(&mut self) {
        for project in self.projects.values_mut() {
            project.sessions.dispose_all(&mut self.host);
            project.contents.dispose_all();
        }
        self.host.kill_all();
        self.routes.clear();
        self.publish(Event::Shutdown);
        tracing::info!(projects = self.projects.len(), "workspace shut down");
    }
}
