//! Per-project panel layout: split modes, divider drag, panel rectangles,
//! and fitting a terminal grid into a pixel area.

mod metrics;
mod ratio;
mod rects;
mod state;

pub use metrics::CellMetrics;
pub use ratio::{split_ratio, DEFAULT_RATIO, MAX_RATIO, MIN_RATIO};
pub use rects::{PanelRects, Point};
pub use state::LayoutState;
