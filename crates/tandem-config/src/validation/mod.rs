//! Full configuration validation.
//!
//! Checks numeric ranges, palette colors, content addresses and keybind
//! uniqueness, collecting every error into a single `ConfigError`.

mod helpers;

#[cfg(test)]
mod tests;

use crate::keybinds;
use crate::schema::TandemConfig;
use helpers::{validate_non_empty, validate_range, validate_range_f64};
use tandem_common::{Color, ConfigError};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TandemConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    if let Err(e) = keybinds::validate_no_duplicates(&config.keybinds) {
        errors.push(e.to_string());
    }

    validate_terminal(&mut errors, config);
    validate_layout(&mut errors, config);
    validate_content(&mut errors, config);
    validate_projects(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_terminal(errors: &mut Vec<String>, config: &TandemConfig) {
    let t = &config.terminal;
    validate_range(
        errors,
        "terminal.scrollback_bytes",
        t.scrollback_bytes,
        4096,
        67_108_864,
    );
    validate_range_f64(errors, "terminal.cell_width", t.cell_width, 1.0, 100.0);
    validate_range_f64(errors, "terminal.cell_height", t.cell_height, 1.0, 100.0);
    validate_range_f64(errors, "terminal.padding", t.padding, 0.0, 100.0);
    validate_range(errors, "terminal.default_cols", t.default_cols, 1, 1000);
    validate_range(errors, "terminal.default_rows", t.default_rows, 1, 1000);
}

fn validate_layout(errors: &mut Vec<String>, config: &TandemConfig) {
    validate_range_f64(
        errors,
        "layout.divider_width",
        config.layout.divider_width,
        0.0,
        40.0,
    );
}

fn validate_content(errors: &mut Vec<String>, config: &TandemConfig) {
    let c = &config.content;
    validate_non_empty(errors, "content.start_page", &c.start_page);
    validate_non_empty(errors, "content.blank_page", &c.blank_page);
    validate_non_empty(errors, "content.search_endpoint", &c.search_endpoint);
}

fn validate_projects(errors: &mut Vec<String>, config: &TandemConfig) {
    let p = &config.projects;
    if p.palette.is_empty() {
        errors.push("projects.palette must contain at least one color".into());
    }
    for (i, color) in p.palette.iter().enumerate() {
        if Color::from_hex(color).is_none() {
            errors.push(format!("projects.palette[{i}] = '{color}' is not a hex color"));
        }
    }
    validate_non_empty(errors, "projects.name_prefix", &p.name_prefix);
}
