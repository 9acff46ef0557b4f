//! Layout state of one project.

use tandem_common::{LayoutMode, Rect};

use crate::ratio::{split_ratio, DEFAULT_RATIO};
use crate::rects::{PanelRects, Point};

/// Mode, explicit drag ratio, and whether a divider drag is in progress.
///
/// An unset ratio means the even split.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutState {
    mode: LayoutMode,
    ratio: Option<f64>,
    dragging: bool,
}

impl LayoutState {
    pub fn new(mode: LayoutMode) -> Self {
        Self {
            mode,
            ratio: None,
            dragging: false,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    /// The explicit drag ratio, if one was set since the last mode change.
    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    /// The ratio panels are laid out with.
    pub fn effective_ratio(&self) -> f64 {
        self.ratio.unwrap_or(DEFAULT_RATIO)
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Switch mode. Clears any drag ratio and cancels a drag in progress.
    pub fn set_mode(&mut self, mode: LayoutMode) {
        self.mode = mode;
        self.ratio = None;
        self.dragging = false;
    }

    /// Start a divider drag. Only split modes have a divider.
    pub fn begin_drag(&mut self) -> bool {
        if self.mode.is_split() {
            self.dragging = true;
        }
        self.dragging
    }

    /// Update the ratio from the pointer position during a drag.
    ///
    /// Returns the new ratio, or `None` when no drag is active.
    pub fn drag_to(&mut self, pointer: Point, container: Rect) -> Option<f64> {
        if !self.dragging {
            return None;
        }
        let (offset, extent) = match self.mode {
            LayoutMode::SplitVertical => (pointer.y - container.y, container.height),
            _ => (pointer.x - container.x, container.width),
        };
        let ratio = split_ratio(offset, extent);
        self.ratio = Some(ratio);
        Some(ratio)
    }

    /// Finish a drag. Returns whether one was active.
    pub fn end_drag(&mut self) -> bool {
        std::mem::replace(&mut self.dragging, false)
    }

    pub fn panel_rects(&self, container: Rect, divider_width: f64) -> PanelRects {
        PanelRects::compute(
            self.mode,
            self.effective_ratio(),
            container,
            divider_width.max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ratio::{MAX_RATIO, MIN_RATIO};

    fn container() -> Rect {
        Rect::new(100.0, 50.0, 1000.0, 800.0)
    }

    #[test]
    fn new_state_has_even_split() {
        let s = LayoutState::new(LayoutMode::Split);
        assert_eq!(s.ratio(), None);
        assert_eq!(s.effective_ratio(), 0.5);
        assert!(!s.is_dragging());
    }

    #[test]
    fn drag_along_x_in_split() {
        let mut s = LayoutState::new(LayoutMode::Split);
        assert!(s.begin_drag());
        let r = s.drag_to(Point::new(400.0, 0.0), container()).unwrap();
        assert!((r - 0.3).abs() < 1e-9);
        assert!(s.end_drag());
        assert!(!s.is_dragging());
        assert_eq!(s.ratio(), Some(r));
    }

    #[test]
    fn drag_along_y_in_split_vertical() {
        let mut s = LayoutState::new(LayoutMode::SplitVertical);
        s.begin_drag();
        let r = s.drag_to(Point::new(0.0, 650.0), container()).unwrap();
        assert!((r - 0.75).abs() < 1e-9);
    }

    #[test]
    fn drag_is_clamped() {
        let mut s = LayoutState::new(LayoutMode::Split);
        s.begin_drag();
        assert_eq!(s.drag_to(Point::new(0.0, 0.0), container()), Some(MIN_RATIO));
        assert_eq!(
            s.drag_to(Point::new(5000.0, 0.0), container()),
            Some(MAX_RATIO)
        );
    }

    #[test]
    fn no_drag_in_single_panel_modes() {
        let mut s = LayoutState::new(LayoutMode::TerminalOnly);
        assert!(!s.begin_drag());
        assert_eq!(s.drag_to(Point::new(400.0, 0.0), container()), None);
        assert!(!s.end_drag());
        assert_eq!(s.ratio(), None);
    }

    #[test]
    fn drag_without_begin_is_ignored() {
        let mut s = LayoutState::new(LayoutMode::Split);
        assert_eq!(s.drag_to(Point::new(400.0, 0.0), container()), None);
        assert_eq!(s.ratio(), None);
    }

    #[test]
    fn set_mode_clears_ratio_and_drag() {
        let mut s = LayoutState::new(LayoutMode::Split);
        s.begin_drag();
        s.drag_to(Point::new(300.0, 0.0), container());
        s.set_mode(LayoutMode::Split);
        assert_eq!(s.ratio(), None);
        assert!(!s.is_dragging());
    }

    #[test]
    fn panel_rects_follow_ratio() {
        let mut s = LayoutState::new(LayoutMode::Split);
        s.begin_drag();
        s.drag_to(Point::new(350.0, 0.0), container());
        s.end_drag();
        let rects = s.panel_rects(container(), 0.0);
        let t = rects.terminal.unwrap();
        assert!((t.width - 250.0).abs() < 1e-9);
        assert_eq!(t.x, 100.0);
    }

    #[test]
    fn divider_lands_under_pointer() {
        let mut s = LayoutState::new(LayoutMode::Split);
        s.begin_drag();
        s.drag_to(Point::new(400.0, 0.0), container());
        let rects = s.panel_rects(container(), 6.0);
        assert!((rects.divider.unwrap().x - 400.0).abs() < 1e-9);
        assert!((rects.terminal.unwrap().width - 300.0).abs() < 1e-9);

        let mut s = LayoutState::new(LayoutMode::SplitVertical);
        s.begin_drag();
        s.drag_to(Point::new(0.0, 650.0), container());
        let rects = s.panel_rects(container(), 6.0);
        assert!((rects.divider.unwrap().y - 650.0).abs() < 1e-9);
        let c = rects.content.unwrap();
        assert!((c.y + c.height - 850.0).abs() < 1e-9);
    }
}
