use std::fmt;

use tandem_common::InputError;

use crate::display::keybind_to_display;
use crate::keymap::{normalize_key_name, parse_keybind, KeyBind, Modifier};

pub(crate) const MOD_CTRL: u8 = 0b0001;
pub(crate) const MOD_ALT: u8 = 0b0010;
pub(crate) const MOD_SHIFT: u8 = 0b0100;
pub(crate) const MOD_SUPER: u8 = 0b1000;

/// A key chord in canonical form for hash lookup.
///
/// Modifiers are a bitmask so comparing chords never sorts a list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    /// Ctrl=1, Alt=2, Shift=4, Super=8.
    pub mods: u8,
    /// Normalized key name ("T", "Tab", "PageDown").
    pub key: String,
}

impl KeyCombo {
    pub fn from_keybind(kb: &KeyBind) -> Self {
        let mods = kb.modifiers.iter().fold(0u8, |acc, m| {
            acc | match m {
                Modifier::Ctrl => MOD_CTRL,
                Modifier::Alt => MOD_ALT,
                Modifier::Shift => MOD_SHIFT,
                Modifier::Super => MOD_SUPER,
            }
        });
        Self {
            mods,
            key: kb.key.clone(),
        }
    }

    /// Build from a key event's modifier state and key name.
    pub fn new(ctrl: bool, alt: bool, shift: bool, super_key: bool, key: &str) -> Self {
        let mut mods = 0u8;
        if ctrl {
            mods |= MOD_CTRL;
        }
        if alt {
            mods |= MOD_ALT;
        }
        if shift {
            mods |= MOD_SHIFT;
        }
        if super_key {
            mods |= MOD_SUPER;
        }
        Self {
            mods,
            key: normalize_key_name(key),
        }
    }

    /// Parse a chord string such as `"Ctrl+Shift+T"`.
    pub fn parse(s: &str) -> Result<Self, InputError> {
        parse_keybind(s).map(|kb| Self::from_keybind(&kb))
    }

    /// The same chord with Ctrl and Super exchanged, or `None` when the
    /// chord uses both or neither.
    pub fn with_primary_swapped(&self) -> Option<Self> {
        let primary = self.mods & (MOD_CTRL | MOD_SUPER);
        if primary != MOD_CTRL && primary != MOD_SUPER {
            return None;
        }
        Some(Self {
            mods: self.mods ^ (MOD_CTRL | MOD_SUPER),
            key: self.key.clone(),
        })
    }

    pub fn to_keybind(&self) -> KeyBind {
        let modifiers = [
            (MOD_CTRL, Modifier::Ctrl),
            (MOD_ALT, Modifier::Alt),
            (MOD_SHIFT, Modifier::Shift),
            (MOD_SUPER, Modifier::Super),
        ]
        .into_iter()
        .filter(|(bit, _)| self.mods & bit != 0)
        .map(|(_, m)| m)
        .collect();
        KeyBind {
            modifiers,
            key: self.key.clone(),
        }
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&keybind_to_display(&self.to_keybind()))
    }
}
