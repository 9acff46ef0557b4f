//! Layout configuration types.

use serde::{Deserialize, Serialize};
use tandem_common::LayoutMode;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Mode new projects start in.
    pub default_mode: LayoutMode,
    /// Width of the draggable divider in pixels (valid range: 0.0-40.0).
    pub divider_width: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            default_mode: LayoutMode::Split,
            divider_width: 4.0,
        }
    }
}
