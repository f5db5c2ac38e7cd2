//! Dial pad input shaping
//!
//! The dialed number only ever holds ASCII digits and never more than
//! [`MAX_DIGITS`] of them, whichever way the input arrives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest number the dial pad accepts
pub const MAX_DIGITS: usize = 10;

/// Keyboard input relevant to the dial pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialPadKey {
    Digit(char),
    Backspace,
    Delete,
    Other,
}

impl DialPadKey {
    /// Map a DOM-style key name ("7", "Backspace", ...) to a dial pad key
    pub fn from_key_name(key: &str) -> Self {
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_digit() => DialPadKey::Digit(c),
            _ => match key {
                "Backspace" => DialPadKey::Backspace,
                "Delete" => DialPadKey::Delete,
                _ => DialPadKey::Other,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DialPad {
    digits: String,
}

impl DialPad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pad from arbitrary text, keeping digits only
    pub fn from_text(text: &str) -> Self {
        let mut pad = Self::new();
        pad.replace(text);
        pad
    }

    /// Append one digit; returns false when the input was ignored
    pub fn push_digit(&mut self, digit: char) -> bool {
        if !digit.is_ascii_digit() || self.digits.len() >= MAX_DIGITS {
            return false;
        }
        self.digits.push(digit);
        true
    }

    /// Apply a keyboard key
    pub fn press(&mut self, key: DialPadKey) -> bool {
        match key {
            DialPadKey::Digit(d) => self.push_digit(d),
            DialPadKey::Backspace | DialPadKey::Delete => self.backspace(),
            DialPadKey::Other => false,
        }
    }

    /// Append pasted text, stripped to digits and capped
    pub fn paste(&mut self, text: &str) {
        let room = MAX_DIGITS.saturating_sub(self.digits.len());
        self.digits
            .extend(text.chars().filter(char::is_ascii_digit).take(room));
    }

    /// Replace the whole number, as when the input field is edited directly
    pub fn replace(&mut self, text: &str) {
        self.digits = text
            .chars()
            .filter(char::is_ascii_digit)
            .take(MAX_DIGITS)
            .collect();
    }

    /// Remove the last digit; returns false when already empty
    pub fn backspace(&mut self) -> bool {
        self.digits.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// A number is dialable once it has all of its digits
    pub fn is_complete(&self) -> bool {
        self.digits.len() == MAX_DIGITS
    }
}

impl fmt::Display for DialPad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}
