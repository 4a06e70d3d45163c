//! Key Map for Calcdesk.
//!
//! Translates keyboard key names into calculator input events. Digits,
//! operator characters and the decimal separators are fixed; named keys
//! (`Enter`, `Escape`, `Backspace`, `c`, ...) come from a rebindable table.

use std::collections::HashMap;

use crate::types::input::{InputEvent, Operator};

/// Modifier keys held while a key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
    };
}

/// Trait defining key mapping operations.
pub trait KeyMapTrait {
    fn translate(&self, key: &str, modifiers: Modifiers) -> Option<InputEvent>;
    fn bind(&mut self, key: &str, event: InputEvent);
    fn unbind(&mut self, key: &str) -> Option<InputEvent>;
    fn reset_to_defaults(&mut self);
    fn default_bindings(&self) -> HashMap<String, InputEvent>;
}

/// Key map with an in-memory table of named bindings.
pub struct KeyMap {
    bindings: HashMap<String, InputEvent>,
}

impl KeyMap {
    pub fn new() -> Self {
        let mut map = Self {
            bindings: HashMap::new(),
        };
        map.bindings = map.default_bindings();
        map
    }

    pub fn bindings(&self) -> &HashMap<String, InputEvent> {
        &self.bindings
    }

    /// Handles keys whose meaning never changes: digits, operators, separators.
    fn translate_fixed(key: &str) -> Option<InputEvent> {
        let mut chars = key.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }

        if c.is_ascii_digit() {
            return Some(InputEvent::Digit(c));
        }
        if let Some(op) = Operator::from_char(c) {
            return Some(InputEvent::Operator(op));
        }
        if c == '.' || c == ',' {
            return Some(InputEvent::Decimal);
        }
        None
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMapTrait for KeyMap {
    /// Returns the event for `key`, or `None` for unmapped keys and for any
    /// key pressed with Ctrl or Meta held (those belong to the host).
    fn translate(&self, key: &str, modifiers: Modifiers) -> Option<InputEvent> {
        if modifiers.ctrl || modifiers.meta {
            return None;
        }
        Self::translate_fixed(key).or_else(|| self.bindings.get(key).copied())
    }

    fn bind(&mut self, key: &str, event: InputEvent) {
        self.bindings.insert(key.to_string(), event);
    }

    fn unbind(&mut self, key: &str) -> Option<InputEvent> {
        self.bindings.remove(key)
    }

    fn reset_to_defaults(&mut self) {
        self.bindings = self.default_bindings();
    }

    fn default_bindings(&self) -> HashMap<String, InputEvent> {
        let defaults = vec![
            ("Enter", InputEvent::Equals),
            ("=", InputEvent::Equals),
            ("c", InputEvent::Clear),
            ("C", InputEvent::Clear),
            ("Escape", InputEvent::ClearAll),
            ("Backspace", InputEvent::Backspace),
        ];

        defaults
            .into_iter()
            .map(|(k, e)| (k.to_string(), e))
            .collect()
    }
}
