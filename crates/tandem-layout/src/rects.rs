use serde::{Deserialize, Serialize};
use tandem_common::{LayoutMode, Rect};

/// A pointer position in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where each panel of a project sits inside the container.
///
/// Hidden panels, and the divider outside split modes, are `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelRects {
    pub terminal: Option<Rect>,
    pub content: Option<Rect>,
    pub divider: Option<Rect>,
}

impl PanelRects {
    /// Half-width of the grab zone on each side of the divider.
    const HIT_HALF_WIDTH: f64 = 6.0;

    /// `ratio` is the terminal's share of the whole container extent, so the
    /// divider's leading edge sits where the pointer left it.
    pub(crate) fn compute(mode: LayoutMode, ratio: f64, container: Rect, divider: f64) -> Self {
        let Rect {
            x,
            y,
            width,
            height,
        } = container;
        match mode {
            LayoutMode::TerminalOnly => Self {
                terminal: Some(container),
                content: None,
                divider: None,
            },
            LayoutMode::ContentOnly => Self {
                terminal: None,
                content: Some(container),
                divider: None,
            },
            LayoutMode::Split => {
                let avail = (width - divider).max(0.0);
                let first = (width * ratio).clamp(0.0, avail);
                Self {
                    terminal: Some(Rect::new(x, y, first, height)),
                    divider: Some(Rect::new(x + first, y, divider.min(width), height)),
                    content: Some(Rect::new(x + first + divider, y, avail - first, height)),
                }
            }
            LayoutMode::SplitVertical => {
                let avail = (height - divider).max(0.0);
                let first = (height * ratio).clamp(0.0, avail);
                Self {
                    terminal: Some(Rect::new(x, y, width, first)),
                    divider: Some(Rect::new(x, y + first, width, divider.min(height))),
                    content: Some(Rect::new(x, y + first + divider, width, avail - first)),
                }
            }
        }
    }

    /// Whether `point` is close enough to the divider to start a drag.
    pub fn divider_hit(&self, point: Point) -> bool {
        let Some(d) = self.divider else {
            return false;
        };
        let within = |v: f64, start: f64, len: f64| {
            v >= start - Self::HIT_HALF_WIDTH && v <= start + len + Self::HIT_HALF_WIDTH
        };
        within(point.x, d.x, d.width) && within(point.y, d.y, d.height)
    }
}
