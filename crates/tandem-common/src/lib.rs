pub mod actions;
pub mod errors;
pub mod events;
pub mod id;
pub mod notifications;
pub mod types;

pub use actions::Action;
pub use errors::{ConfigError, InputError, SpawnError, SurfaceError, TandemError};
pub use events::{Event, EventBus};
pub use id::{ContentId, ProcessId, ProjectId, SessionId};
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
pub use types::{Color, GridSize, LayoutMode, Panel, Rect};

pub type Result<T> = std::result::Result<T, TandemError>;
