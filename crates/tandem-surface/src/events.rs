use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tandem_common::{ContentId, ProjectId};

/// Which content tab a surface belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceKey {
    pub project: ProjectId,
    pub content: ContentId,
}

impl SurfaceKey {
    pub fn new(project: ProjectId, content: ContentId) -> Self {
        Self { project, content }
    }
}

/// Something a surface observed about its document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// A navigation committed to a new document.
    DidNavigate(String),
    /// Same document, new fragment or history entry.
    DidNavigateInPage(String),
    TitleUpdated(String),
    DidStartLoading,
    DidStopLoading,
}

/// Shared event queue all surfaces push into.
///
/// Cloning is cheap; every clone feeds the same queue.
#[derive(Debug, Clone, Default)]
pub struct SurfaceSink {
    events: Arc<Mutex<Vec<(SurfaceKey, SurfaceEvent)>>>,
}

impl SurfaceSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, key: SurfaceKey, event: SurfaceEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((key, event));
    }

    /// Take every pending event, oldest first.
    pub fn drain(&self) -> Vec<(SurfaceKey, SurfaceEvent)> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *events)
    }

    pub fn is_empty(&self) -> bool {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
