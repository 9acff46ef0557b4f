//! Render surfaces for content tabs.
//!
//! A [`RenderSurface`] displays one navigable document. Surfaces report
//! navigation, title, and loading changes into a shared [`SurfaceSink`]
//! keyed by `(project, content)`; the workspace drains the sink once per
//! loop turn.
//!
//! Both implementations track back/forward through [`NavigationHistory`].
//! [`HeadlessSurface`] emits its events synchronously. With the `webview`
//! feature, [`WrySurface`] embeds a real system web view through `wry`.

mod events;
mod headless;
mod history;
mod surface;
#[cfg(feature = "webview")]
mod wry_surface;

pub use events::{SurfaceEvent, SurfaceKey, SurfaceSink};
pub use headless::{HeadlessFactory, HeadlessSurface};
pub use history::NavigationHistory;
pub use surface::{RenderSurface, SurfaceFactory};
#[cfg(feature = "webview")]
pub use wry_surface::{WryFactory, WrySurface};
