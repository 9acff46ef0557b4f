//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;

#[test]
fn default_config_validates() {
    assert!(validate(&TandemConfig::default()).is_ok());
}

#[test]
fn catches_scrollback_too_small() {
    let mut config = TandemConfig::default();
    config.terminal.scrollback_bytes = 10;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.scrollback_bytes"));
}

#[test]
fn catches_nan_cell_height() {
    let mut config = TandemConfig::default();
    config.terminal.cell_height = f64::NAN;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.cell_height"));
}

#[test]
fn catches_divider_too_wide() {
    let mut config = TandemConfig::default();
    config.layout.divider_width = 100.0;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("layout.divider_width"));
}

#[test]
fn catches_empty_search_endpoint() {
    let mut config = TandemConfig::default();
    config.content.search_endpoint = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("content.search_endpoint"));
}

#[test]
fn catches_bad_palette_entries() {
    let mut config = TandemConfig::default();
    config.projects.palette = vec!["#89b4fa".into(), "blue".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("projects.palette[1]"));

    config.projects.palette.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("at least one color"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = TandemConfig::default();
    config.terminal.default_cols = 0;
    config.terminal.default_rows = 5000;
    config.keybinds.reload = "Ctrl+W".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("terminal.default_cols"));
    assert!(err.contains("terminal.default_rows"));
    assert!(err.contains("duplicate keybind"));
}
