use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Positional identifier of an answer choice within the current question.
///
/// Labels are assigned after shuffling, starting at 0. The presentation layer
/// maps them to letters with [`ChoiceLabel::letter`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChoiceLabel(usize);

impl ChoiceLabel {
    /// Creates a new `ChoiceLabel`
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying position
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }

    /// Display letter for this label: 0 -> `A`, 1 -> `B`, ...
    ///
    /// Returns `None` past `Z`.
    #[must_use]
    pub fn letter(&self) -> Option<char> {
        u8::try_from(self.0)
            .ok()
            .filter(|offset| *offset < 26)
            .map(|offset| char::from(b'A' + offset))
    }

    /// Inverse of [`ChoiceLabel::letter`], case-insensitive.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        if upper.is_ascii_uppercase() {
            Some(Self(usize::from(upper as u8 - b'A')))
        } else {
            None
        }
    }
}

impl fmt::Debug for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChoiceLabel({})", self.0)
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.letter() {
            Some(letter) => write!(f, "{letter}"),
            None => write!(f, "#{}", self.0),
        }
    }
}

/// Error type for parsing a label from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLabelError {
    raw: String,
}

impl fmt::Display for ParseLabelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse choice label from {:?}", self.raw)
    }
}

impl std::error::Error for ParseLabelError {}

/// Accepts a single letter (`b`, `B`) or a 1-based number (`2`).
impl FromStr for ChoiceLabel {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let err = || ParseLabelError {
            raw: s.to_string(),
        };

        if let Ok(number) = trimmed.parse::<usize>() {
            return number.checked_sub(1).map(ChoiceLabel::new).ok_or_else(err);
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => ChoiceLabel::from_letter(letter).ok_or_else(err),
            _ => Err(err()),
        }
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
