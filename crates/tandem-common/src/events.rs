use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::id::{ContentId, ProjectId, SessionId};
use crate::types::LayoutMode;

/// Workspace lifecycle events, published for observers such as a renderer
/// or the headless driver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    ProjectCreated(ProjectId),
    ProjectClosed(ProjectId),
    ProjectSwitched(ProjectId),
    SessionOpened {
        project: ProjectId,
        session: SessionId,
    },
    SessionClosed {
        project: ProjectId,
        session: SessionId,
    },
    SessionExited {
        project: ProjectId,
        session: SessionId,
        code: u32,
    },
    ContentOpened {
        project: ProjectId,
        content: ContentId,
    },
    ContentClosed {
        project: ProjectId,
        content: ContentId,
    },
    LayoutChanged {
        project: ProjectId,
        mode: LayoutMode,
    },
    Shutdown,
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}
