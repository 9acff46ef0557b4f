//! Multi-project workspace: terminal sessions and content tabs grouped into
//! switchable projects, each with its own split layout.
//!
//! The [`Workspace`] owns a [`ProcessHost`](tandem_pty::ProcessHost) and a
//! [`SurfaceFactory`](tandem_surface::SurfaceFactory). Call
//! [`Workspace::pump`] once per UI-loop turn to route process output,
//! surface reports, and geometry refits.

pub mod address;
pub mod content;
pub mod dispatch;
pub mod display;
pub mod project;
pub mod session;
mod workspace;

#[cfg(test)]
mod test_support;

pub use address::{normalize_address, AddressContext};
pub use content::{ContentRegistry, ContentTab};
pub use dispatch::{resolve, Command, DispatchContext, InputDispatcher};
pub use display::DisplayBuffer;
pub use project::{InputFocus, Project};
pub use session::{exit_notice, CloseOutcome, Session, SessionRegistry};
pub use workspace::{Output, StatusBar, Workspace, WorkspaceSettings};
