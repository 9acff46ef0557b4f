//! In-memory surface with synchronous load events.

use tandem_common::{Rect, SurfaceError};

use crate::events::{SurfaceEvent, SurfaceKey, SurfaceSink};
use crate::history::NavigationHistory;
use crate::surface::{RenderSurface, SurfaceFactory};

/// A surface with no view behind it.
///
/// Every navigation completes immediately: the sink receives
/// `DidStartLoading`, `DidNavigate`, an optional `TitleUpdated`, then
/// `DidStopLoading`. A change of fragment alone reports
/// `DidNavigateInPage` without load events.
#[derive(Debug)]
pub struct HeadlessSurface {
    key: SurfaceKey,
    sink: SurfaceSink,
    history: NavigationHistory,
    devtools: bool,
    visible: bool,
    bounds: Rect,
    disposed: bool,
}

impl HeadlessSurface {
    pub fn new(key: SurfaceKey, url: &str, sink: SurfaceSink) -> Self {
        let mut surface = Self {
            key,
            sink,
            history: NavigationHistory::new(),
            devtools: false,
            visible: true,
            bounds: Rect::zero(),
            disposed: false,
        };
        surface.navigate(url);
        surface
    }

    pub fn current_url(&self) -> Option<&str> {
        self.history.current()
    }

    pub fn history(&self) -> &[String] {
        self.history.entries()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn emit(&self, event: SurfaceEvent) {
        self.sink.push(self.key, event);
    }

    fn load(&self, url: &str) {
        self.emit(SurfaceEvent::DidStartLoading);
        self.emit(SurfaceEvent::DidNavigate(url.to_string()));
        if let Some(title) = document_title(url) {
            self.emit(SurfaceEvent::TitleUpdated(title));
        }
        self.emit(SurfaceEvent::DidStopLoading);
    }

    /// Commit `url` as the view would and report it: a full load, or just
    /// the in-page event.
    fn commit(&mut self, url: &str) {
        match self.history.commit(url, false) {
            Some(SurfaceEvent::DidNavigate(url)) => self.load(&url),
            Some(event) => self.emit(event),
            None => {}
        }
    }
}

/// Title a headless document would have: the host for web pages, the file
/// name for local files, nothing for `about:` pages.
fn document_title(url: &str) -> Option<String> {
    if url.starts_with("about:") {
        return None;
    }
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let title = if url.starts_with("file://") {
        rest.trim_end_matches('/').rsplit('/').next().unwrap_or(rest)
    } else {
        rest.split(['/', '?', '#']).next().unwrap_or(rest)
    };
    Some(title.to_string())
}

impl RenderSurface for HeadlessSurface {
    fn navigate(&mut self, url: &str) {
        if !self.disposed {
            self.commit(url);
        }
    }

    fn reload(&mut self) {
        if self.disposed || self.history.current().is_none() {
            return;
        }
        self.emit(SurfaceEvent::DidStartLoading);
        self.emit(SurfaceEvent::DidStopLoading);
    }

    fn go_back(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(url) = self.history.back().map(str::to_owned) {
            self.commit(&url);
        }
    }

    fn go_forward(&mut self) {
        if self.disposed {
            return;
        }
        if let Some(url) = self.history.forward().map(str::to_owned) {
            self.commit(&url);
        }
    }

    fn can_go_back(&self) -> bool {
        !self.disposed && self.history.can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        !self.disposed && self.history.can_go_forward()
    }

    fn open_devtools(&mut self) {
        if !self.disposed {
            self.devtools = true;
        }
    }

    fn close_devtools(&mut self) {
        self.devtools = false;
    }

    fn is_devtools_open(&self) -> bool {
        self.devtools
    }

    fn set_visible(&mut self, visible: bool) {
        if !self.disposed {
            self.visible = visible;
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if !self.disposed {
            self.bounds = bounds;
        }
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.visible = false;
        self.devtools = false;
    }
}

/// Factory for [`HeadlessSurface`]s.
#[derive(Debug, Default)]
pub struct HeadlessFactory;

impl SurfaceFactory for HeadlessFactory {
    fn create(
        &mut self,
        key: SurfaceKey,
        url: &str,
        sink: SurfaceSink,
    ) -> Result<Box<dyn RenderSurface>, SurfaceError> {
        tracing::debug!(project = %key.project, content = %key.content, url, "headless surface created");
        Ok(Box::new(HeadlessSurface::new(key, url, sink)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_common::{ContentId, ProjectId};

    fn key() -> SurfaceKey {
        SurfaceKey::new(ProjectId(1), ContentId(1))
    }

    fn events(sink: &SurfaceSink) -> Vec<SurfaceEvent> {
        sink.drain().into_iter().map(|(_, e)| e).collect()
    }

    #[test]
    fn creation_loads_initial_url() {
        let sink = SurfaceSink::new();
        let s = HeadlessSurface::new(key(), "https://duckduckgo.com", sink.clone());
        assert_eq!(s.current_url(), Some("https://duckduckgo.com"));
        assert_eq!(
            events(&sink),
            vec![
                SurfaceEvent::DidStartLoading,
                SurfaceEvent::DidNavigate("https://duckduckgo.com".into()),
                SurfaceEvent::TitleUpdated("duckduckgo.com".into()),
                SurfaceEvent::DidStopLoading,
            ]
        );
    }

    #[test]
    fn about_blank_has_no_title() {
        let sink = SurfaceSink::new();
        HeadlessSurface::new(key(), "about:blank", sink.clone());
        assert!(!events(&sink)
            .iter()
            .any(|e| matches!(e, SurfaceEvent::TitleUpdated(_))));
    }

    #[test]
    fn history_back_and_forward() {
        let sink = SurfaceSink::new();
        let mut s = HeadlessSurface::new(key(), "about:blank", sink.clone());
        assert!(!s.can_go_back());
        s.navigate("https://a.test");
        s.navigate("https://b.test");
        assert!(s.can_go_back());
        assert!(!s.can_go_forward());

        s.go_back();
        assert_eq!(s.current_url(), Some("https://a.test"));
        assert!(s.can_go_forward());

        s.go_forward();
        assert_eq!(s.current_url(), Some("https://b.test"));

        s.go_back();
        s.navigate("https://c.test");
        assert!(!s.can_go_forward());
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn fragment_change_is_in_page() {
        let sink = SurfaceSink::new();
        let mut s = HeadlessSurface::new(key(), "https://a.test/doc", sink.clone());
        sink.drain();
        s.navigate("https://a.test/doc#intro");
        assert_eq!(
            events(&sink),
            vec![SurfaceEvent::DidNavigateInPage(
                "https://a.test/doc#intro".into()
            )]
        );
    }

    #[test]
    fn file_title_is_file_name() {
        assert_eq!(
            document_title("file:///home/me/app/index.html"),
            Some("index.html".into())
        );
        assert_eq!(
            document_title("https://example.com/path?q=1"),
            Some("example.com".into())
        );
    }

    #[test]
    fn dispose_silences_surface() {
        let sink = SurfaceSink::new();
        let mut s = HeadlessSurface::new(key(), "https://a.test", sink.clone());
        s.open_devtools();
        s.dispose();
        sink.drain();

        s.navigate("https://b.test");
        s.reload();
        s.open_devtools();
        assert!(sink.is_empty());
        assert!(s.is_disposed());
        assert!(!s.is_devtools_open());
        assert!(!s.can_go_back());
    }

    #[test]
    fn factory_creates_boxed_surface() {
        let sink = SurfaceSink::new();
        let mut surface = HeadlessFactory
            .create(key(), "about:blank", sink.clone())
            .unwrap();
        surface.set_visible(false);
        surface.open_devtools();
        assert!(surface.is_devtools_open());
        surface.close_devtools();
        assert!(!surface.is_devtools_open());
        assert!(!sink.is_empty());
    }
}
