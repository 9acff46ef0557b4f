//! Content tabs of one project.

use std::fmt;

use indexmap::IndexMap;
use tandem_common::{ContentId, ProjectId, Rect, SurfaceError};
use tandem_surface::{RenderSurface, SurfaceEvent, SurfaceFactory, SurfaceKey, SurfaceSink};

use crate::address::{normalize_address, AddressContext};
use crate::session::CloseOutcome;

pub const NEW_TAB_TITLE: &str = "New Tab";
pub const UNTITLED: &str = "Untitled";

/// One content tab and the render surface it owns.
pub struct ContentTab {
    pub id: ContentId,
    pub title: String,
    pub url: String,
    /// Between `DidStartLoading` and `DidStopLoading`.
    pub loading: bool,
    surface: Box<dyn RenderSurface>,
}

impl ContentTab {
    pub fn surface(&self) -> &dyn RenderSurface {
        self.surface.as_ref()
    }

    pub fn can_go_back(&self) -> bool {
        self.surface.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.surface.can_go_forward()
    }

    pub fn is_devtools_open(&self) -> bool {
        self.surface.is_devtools_open()
    }
}

impl fmt::Debug for ContentTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentTab")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("loading", &self.loading)
            .finish_non_exhaustive()
    }
}

/// Insertion-ordered content tabs of one project.
///
/// Only the active tab's surface is visible, and only while the registry is
/// shown (its project is active and the layout has a content panel).
#[derive(Debug)]
pub struct ContentRegistry {
    project: ProjectId,
    sink: SurfaceSink,
    tabs: IndexMap<ContentId, ContentTab>,
    active: Option<ContentId>,
    next_id: ContentId,
    shown: bool,
    bounds: Option<Rect>,
}

impl ContentRegistry {
    pub fn new(project: ProjectId, sink: SurfaceSink) -> Self {
        Self {
            project,
            sink,
            tabs: IndexMap::new(),
            active: None,
            next_id: ContentId(1),
            shown: false,
            bounds: None,
        }
    }

    // -- Queries --

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, id: ContentId) -> Option<&ContentTab> {
        self.tabs.get(&id)
    }

    pub fn active_id(&self) -> Option<ContentId> {
        self.active
    }

    pub fn active(&self) -> Option<&ContentTab> {
        self.active.and_then(|id| self.tabs.get(&id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentTab> {
        self.tabs.values()
    }

    pub fn ids(&self) -> Vec<ContentId> {
        self.tabs.keys().copied().collect()
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    // -- Tabs --

    /// Create a tab with its own surface navigated to `url`, and activate it.
    pub fn add_content<F: SurfaceFactory + ?Sized>(
        &mut self,
        factory: &mut F,
        url: &str,
    ) -> Result<ContentId, SurfaceError> {
        let id = self.next_id;
        let key = SurfaceKey::new(self.project, id);
        let mut surface = factory.create(key, url, self.sink.clone())?;
        self.next_id = id.next();

        if let Some(bounds) = self.bounds {
            surface.set_bounds(bounds);
        }
        self.tabs.insert(
            id,
            ContentTab {
                id,
                title: NEW_TAB_TITLE.to_string(),
                url: url.to_string(),
                loading: false,
                surface,
            },
        );
        self.activate(id);
        Ok(id)
    }

    /// Make `id` the active tab. Returns `false` for unknown ids.
    pub fn switch_content(&mut self, id: ContentId) -> bool {
        if !self.tabs.contains_key(&id) {
            return false;
        }
        self.activate(id);
        true
    }

    /// Dispose and remove a tab, keeping at least one tab open.
    ///
    /// A replacement navigated to `blank_url` is created when the last tab
    /// closes. Returns `None` for unknown ids.
    pub fn close_content<F: SurfaceFactory + ?Sized>(
        &mut self,
        factory: &mut F,
        id: ContentId,
        blank_url: &str,
    ) -> Option<CloseOutcome<ContentId, SurfaceError>> {
        let index = self.tabs.get_index_of(&id)?;
        let (_, mut tab) = self.tabs.shift_remove_index(index)?;
        tab.surface.dispose();

        if self.tabs.is_empty() {
            self.active = None;
            return Some(CloseOutcome {
                replacement: Some(self.add_content(factory, blank_url)),
            });
        }
        if self.active == Some(id) {
            let next = index.min(self.tabs.len() - 1);
            if let Some(next_id) = self.tabs.get_index(next).map(|(id, _)| *id) {
                self.activate(next_id);
            }
        }
        Some(CloseOutcome { replacement: None })
    }

    /// Activate the next (or previous) tab, wrapping around. Does nothing
    /// with fewer than two tabs.
    pub fn cycle(&mut self, forward: bool) -> Option<ContentId> {
        let len = self.tabs.len();
        if len < 2 {
            return None;
        }
        let current = self
            .active
            .and_then(|id| self.tabs.get_index_of(&id))
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        let id = self.tabs.get_index(next).map(|(id, _)| *id)?;
        self.activate(id);
        Some(id)
    }

    fn activate(&mut self, id: ContentId) {
        let shown = self.shown;
        for (tab_id, tab) in self.tabs.iter_mut() {
            tab.surface.set_visible(shown && *tab_id == id);
        }
        self.active = Some(id);
    }

    // -- Navigation --

    /// Normalize `input` and load it in the active tab.
    ///
    /// Returns the URL navigated to, or `None` for empty input or when
    /// there is no active tab.
    pub fn navigate_active(&mut self, input: &str, ctx: &AddressContext<'_>) -> Option<String> {
        let url = normalize_address(input, ctx)?;
        let tab = self.active_mut()?;
        tab.surface.navigate(&url);
        Some(url)
    }

    pub fn reload(&mut self) {
        if let Some(tab) = self.active_mut() {
            tab.surface.reload();
        }
    }

    /// Returns whether the tab could go back.
    pub fn go_back(&mut self) -> bool {
        match self.active_mut() {
            Some(tab) if tab.surface.can_go_back() => {
                tab.surface.go_back();
                true
            }
            _ => false,
        }
    }

    /// Returns whether the tab could go forward.
    pub fn go_forward(&mut self) -> bool {
        match self.active_mut() {
            Some(tab) if tab.surface.can_go_forward() => {
                tab.surface.go_forward();
                true
            }
            _ => false,
        }
    }

    /// Open or close developer tools. Returns the new state.
    pub fn toggle_devtools(&mut self) -> bool {
        let Some(tab) = self.active_mut() else {
            return false;
        };
        if tab.surface.is_devtools_open() {
            tab.surface.close_devtools();
        } else {
            tab.surface.open_devtools();
        }
        tab.surface.is_devtools_open()
    }

    fn active_mut(&mut self) -> Option<&mut ContentTab> {
        let id = self.active?;
        self.tabs.get_mut(&id)
    }

    // -- Surface events --

    /// Apply a surface report to its tab. Returns `false` for unknown tabs.
    pub fn apply_event(&mut self, id: ContentId, event: SurfaceEvent) -> bool {
        let Some(tab) = self.tabs.get_mut(&id) else {
            return false;
        };
        match event {
            SurfaceEvent::DidNavigate(url) | SurfaceEvent::DidNavigateInPage(url) => tab.url = url,
            SurfaceEvent::TitleUpdated(title) => {
                tab.title = if title.trim().is_empty() {
                    UNTITLED.to_string()
                } else {
                    title
                };
            }
            SurfaceEvent::DidStartLoading => tab.loading = true,
            SurfaceEvent::DidStopLoading => tab.loading = false,
        }
        true
    }

    // -- Placement --

    /// Show or hide the registry as a whole.
    pub fn set_shown(&mut self, shown: bool) {
        self.shown = shown;
        if let Some(id) = self.active {
            self.activate(id);
        }
    }

    /// Place every surface in the content panel.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
        for tab in self.tabs.values_mut() {
            tab.surface.set_bounds(bounds);
        }
    }

    /// Dispose every surface. Returns how many were disposed.
    pub fn dispose_all(&mut self) -> usize {
        let count = self.tabs.len();
        for (_, mut tab) in self.tabs.drain(..) {
            tab.surface.dispose();
        }
        self.active = None;
        count
    }

    /// Structural invariants; panics on violation.
    pub(crate) fn check_invariants(&self) {
        match self.active {
            None => assert!(self.tabs.is_empty(), "content tabs non-empty with no active id"),
            Some(id) => assert!(
                self.tabs.contains_key(&id),
                "active content {id} is not in the registry"
            ),
        }
        for (key, tab) in &self.tabs {
            assert_eq!(*key, tab.id);
            assert!(tab.id < self.next_id, "content id {} not allocated", tab.id);
        }
    }
}
