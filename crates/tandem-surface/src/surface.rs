use tandem_common::{Rect, SurfaceError};

use crate::events::{SurfaceKey, SurfaceSink};

/// One navigable document view, owned by a content tab.
///
/// Navigation failures belong to the surface; callers only see the load
/// signals it pushes into its sink. Every method is a no-op once
/// [`dispose`](RenderSurface::dispose) has been called.
pub trait RenderSurface {
    fn navigate(&mut self, url: &str);
    fn reload(&mut self);
    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn can_go_back(&self) -> bool;
    fn can_go_forward(&self) -> bool;
    fn open_devtools(&mut self);
    fn close_devtools(&mut self);
    fn is_devtools_open(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    /// Place the surface inside the window.
    fn set_bounds(&mut self, bounds: Rect);
    /// Release the underlying view.
    fn dispose(&mut self);
}

/// Creates surfaces for new content tabs.
pub trait SurfaceFactory {
    /// Create a surface for `key`, navigated to `url`, reporting into `sink`.
    fn create(
        &mut self,
        key: SurfaceKey,
        url: &str,
        sink: SurfaceSink,
    ) -> Result<Box<dyn RenderSurface>, SurfaceError>;
}
