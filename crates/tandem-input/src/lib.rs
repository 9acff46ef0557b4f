//! Keyboard input: keybind parsing, key chords, and the chord to action
//! registry.

mod combo;
mod display;
mod keymap;
mod registry;

pub use combo::KeyCombo;
pub use display::keybind_to_display;
pub use keymap::{parse_keybind, KeyBind, Modifier};
pub use registry::KeybindRegistry;
