//! System web view surface, backed by `wry`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Deserialize;
use tandem_common::{Rect, SurfaceError};
use tracing::{debug, warn};
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::raw_window_handle::HasWindowHandle;
use wry::{PageLoadEvent, WebView, WebViewBuilder};

use crate::events::{SurfaceEvent, SurfaceKey, SurfaceSink};
use crate::history::NavigationHistory;
use crate::surface::{RenderSurface, SurfaceFactory};

/// Reports same-document navigations, which fire no page-load event.
const IN_PAGE_NAV_SCRIPT: &str = r#"
(function() {
    var report = function() {
        window.ipc.postMessage(JSON.stringify({ kind: "navigated", url: location.href }));
    };
    window.addEventListener("hashchange", report);
    window.addEventListener("popstate", report);
})();
"#;

/// Messages the page script sends over IPC.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum PageMessage {
    Navigated { url: String },
}

fn parse_page_message(body: &str) -> Option<PageMessage> {
    serde_json::from_str(body).ok()
}

type SharedHistory = Arc<Mutex<NavigationHistory>>;

fn lock(history: &SharedHistory) -> MutexGuard<'_, NavigationHistory> {
    history.lock().unwrap_or_else(PoisonError::into_inner)
}

fn wry_rect(bounds: Rect) -> wry::Rect {
    wry::Rect {
        position: LogicalPosition::new(bounds.x, bounds.y).into(),
        size: LogicalSize::new(bounds.width, bounds.height).into(),
    }
}

/// A content tab rendered by a child web view of the main window.
///
/// `wry` exposes no history query, so the view's handlers record every
/// committed URL into a history shared with the surface.
pub struct WrySurface {
    key: SurfaceKey,
    webview: Option<WebView>,
    history: SharedHistory,
}

impl WrySurface {
    fn log_err(&self, op: &str, result: Result<(), wry::Error>) {
        if let Err(e) = result {
            warn!(project = %self.key.project, content = %self.key.content, op, error = %e, "web view operation failed");
        }
    }

    fn script(&self, js: &str) {
        if let Some(webview) = &self.webview {
            self.log_err("evaluate_script", webview.evaluate_script(js));
        }
    }
}

impl RenderSurface for WrySurface {
    fn navigate(&mut self, url: &str) {
        if let Some(webview) = &self.webview {
            self.log_err("load_url", webview.load_url(url));
        }
    }

    fn reload(&mut self) {
        if let Some(webview) = &self.webview {
            self.log_err("reload", webview.reload());
        }
    }

    fn go_back(&mut self) {
        if self.webview.is_some() && lock(&self.history).back().is_some() {
            self.script("history.back()");
        }
    }

    fn go_forward(&mut self) {
        if self.webview.is_some() && lock(&self.history).forward().is_some() {
            self.script("history.forward()");
        }
    }

    fn can_go_back(&self) -> bool {
        self.webview.is_some() && lock(&self.history).can_go_back()
    }

    fn can_go_forward(&self) -> bool {
        self.webview.is_some() && lock(&self.history).can_go_forward()
    }

    fn open_devtools(&mut self) {
        if let Some(webview) = &self.webview {
            webview.open_devtools();
        }
    }

    fn close_devtools(&mut self) {
        if let Some(webview) = &self.webview {
            webview.close_devtools();
        }
    }

    fn is_devtools_open(&self) -> bool {
        self.webview
            .as_ref()
            .is_some_and(|webview| webview.is_devtools_open())
    }

    fn set_visible(&mut self, visible: bool) {
        if let Some(webview) = &self.webview {
            self.log_err("set_visible", webview.set_visible(visible));
        }
    }

    fn set_bounds(&mut self, bounds: Rect) {
        if let Some(webview) = &self.webview {
            self.log_err("set_bounds", webview.set_bounds(wry_rect(bounds)));
        }
    }

    fn dispose(&mut self) {
        if self.webview.take().is_some() {
            debug!(project = %self.key.project, content = %self.key.content, "web view disposed");
        }
    }
}

/// Creates [`WrySurface`]s as children of one window.
pub struct WryFactory<W> {
    window: Arc<W>,
}

impl<W: HasWindowHandle> WryFactory<W> {
    pub fn new(window: Arc<W>) -> Self {
        Self { window }
    }
}

impl<W: HasWindowHandle> SurfaceFactory for WryFactory<W> {
    fn create(
        &mut self,
        key: SurfaceKey,
        url: &str,
        sink: SurfaceSink,
    ) -> Result<Box<dyn RenderSurface>, SurfaceError> {
        let history: SharedHistory = Arc::default();

        let load_sink = sink.clone();
        let load_history = Arc::clone(&history);
        let ipc_sink = sink.clone();
        let ipc_history = Arc::clone(&history);
        let title_sink = sink;

        let webview = WebViewBuilder::new()
            .with_url(url)
            .with_devtools(true)
            .with_focused(false)
            .with_initialization_script(IN_PAGE_NAV_SCRIPT)
            .with_on_page_load_handler(move |event, url| match event {
                PageLoadEvent::Started => {
                    load_sink.push(key, SurfaceEvent::DidStartLoading);
                    if let Some(event) = lock(&load_history).commit(&url, false) {
                        load_sink.push(key, event);
                    }
                }
                PageLoadEvent::Finished => load_sink.push(key, SurfaceEvent::DidStopLoading),
            })
            .with_ipc_handler(move |request| {
                let Some(PageMessage::Navigated { url }) = parse_page_message(request.body()) else {
                    warn!(project = %key.project, content = %key.content, "IPC message rejected");
                    return;
                };
                if let Some(event) = lock(&ipc_history).commit(&url, true) {
                    ipc_sink.push(key, event);
                }
            })
            .with_document_title_changed_handler(move |title| {
                title_sink.push(key, SurfaceEvent::TitleUpdated(title));
            })
            .build_as_child(self.window.as_ref())
            .map_err(|e| SurfaceError::Create(e.to_string()))?;

        debug!(project = %key.project, content = %key.content, url, "web view created");
        Ok(Box::new(WrySurface {
            key,
            webview: Some(webview),
            history,
        }))
    }
}
