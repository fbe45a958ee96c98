//! Weekday canonicalization.
//!
//! Feeds label weekdays inconsistently: full Russian names, two-letter
//! abbreviations in any case, English names, and numeric indices in either
//! 0- or 1-based conventions. Everything maps to `1` (Monday) ..= `7`
//! (Sunday).
//!
//! The mapping is total. Input that matches nothing falls back to
//! `(position mod 7) + 1`, where `position` is the item's index in the input
//! sequence, so every item still gets a deterministic slot.
//! [`classify_weekday`] tells callers whether that fallback was taken.

use lens_core::value::as_integer;
use lens_core::{Degradation, IndexConvention};
use serde_json::Value;

const WEEKDAY_LABELS: &[(&str, u8)] = &[
    ("понедельник", 1),
    ("пн", 1),
    ("вторник", 2),
    ("вт", 2),
    ("среда", 3),
    ("ср", 3),
    ("четверг", 4),
    ("чт", 4),
    ("пятница", 5),
    ("пт", 5),
    ("суббота", 6),
    ("сб", 6),
    ("воскресенье", 7),
    ("вс", 7),
    ("monday", 1),
    ("mon", 1),
    ("mo", 1),
    ("tuesday", 2),
    ("tue", 2),
    ("tu", 2),
    ("wednesday", 3),
    ("wed", 3),
    ("we", 3),
    ("thursday", 4),
    ("thu", 4),
    ("th", 4),
    ("friday", 5),
    ("fri", 5),
    ("fr", 5),
    ("saturday", 6),
    ("sat", 6),
    ("sa", 6),
    ("sunday", 7),
    ("sun", 7),
    ("su", 7),
];

/// A weekday as it appears in source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayInput<'a> {
    Label(&'a str),
    Index(i64),
    /// A value with no weekday reading (null, float, array, ...).
    Unreadable,
}

impl<'a> From<&'a str> for WeekdayInput<'a> {
    fn from(label: &'a str) -> Self {
        Self::Label(label)
    }
}

impl<'a> From<&'a String> for WeekdayInput<'a> {
    fn from(label: &'a String) -> Self {
        Self::Label(label)
    }
}

impl From<i64> for WeekdayInput<'_> {
    fn from(index: i64) -> Self {
        Self::Index(index)
    }
}

impl From<i32> for WeekdayInput<'_> {
    fn from(index: i32) -> Self {
        Self::Index(i64::from(index))
    }
}

impl From<u8> for WeekdayInput<'_> {
    fn from(index: u8) -> Self {
        Self::Index(i64::from(index))
    }
}

impl<'a> From<&'a Value> for WeekdayInput<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::String(label) => Self::Label(label),
            Value::Number(_) => as_integer(value).map_or(Self::Unreadable, Self::Index),
            _ => Self::Unreadable,
        }
    }
}

/// Outcome of canonicalizing one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekdayMatch {
    Recognized(u8),
    /// Positional fallback for unrecognized input.
    Fallback(u8),
}

impl WeekdayMatch {
    /// Canonical index, `1` (Monday) ..= `7` (Sunday).
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Recognized(i) | Self::Fallback(i) => i,
        }
    }

    #[must_use]
    pub const fn is_recognized(self) -> bool {
        matches!(self, Self::Recognized(_))
    }
}

/// Table-driven weekday mapper for one numeric index convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayNormalizer {
    convention: IndexConvention,
}

impl WeekdayNormalizer {
    #[must_use]
    pub const fn new(convention: IndexConvention) -> Self {
        Self { convention }
    }

    #[must_use]
    pub const fn convention(&self) -> IndexConvention {
        self.convention
    }

    /// Canonicalize `input`, reporting whether the positional fallback was used.
    pub fn classify<'a>(
        &self,
        input: impl Into<WeekdayInput<'a>>,
        position: usize,
    ) -> WeekdayMatch {
        let input = input.into();
        let recognized = match input {
            WeekdayInput::Label(label) => self.lookup_label(label),
            WeekdayInput::Index(index) => self.convention.to_canonical(index),
            WeekdayInput::Unreadable => None,
        };

        recognized.map_or_else(
            || {
                let slot = fallback_slot(position);
                Degradation::UnrecognizedWeekday
                    .report(&format!("{input:?} at position {position} mapped to {slot}"));
                WeekdayMatch::Fallback(slot)
            },
            WeekdayMatch::Recognized,
        )
    }

    /// Canonical index in `1..=7`.
    pub fn normalize<'a>(&self, input: impl Into<WeekdayInput<'a>>, position: usize) -> u8 {
        self.classify(input, position).index()
    }

    fn lookup_label(&self, label: &str) -> Option<u8> {
        let cleaned = label.trim().trim_end_matches('.').trim().to_lowercase();
        if cleaned.is_empty() {
            return None;
        }
        if let Ok(index) = cleaned.parse::<i64>() {
            return self.convention.to_canonical(index);
        }
        WEEKDAY_LABELS
            .iter()
            .find(|(name, _)| *name == cleaned)
            .map(|(_, index)| *index)
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn fallback_slot(position: usize) -> u8 {
    (position % 7) as u8 + 1
}

/// Canonicalize a weekday with the default index convention.
///
/// Always returns a value in `1..=7`; see [`classify_weekday`] to detect the
/// positional fallback.
pub fn normalize_weekday<'a>(input: impl Into<WeekdayInput<'a>>, position: usize) -> u8 {
    WeekdayNormalizer::default().normalize(input, position)
}

/// Like [`normalize_weekday`] but exposes whether the input was recognized.
pub fn classify_weekday<'a>(input: impl Into<WeekdayInput<'a>>, position: usize) -> WeekdayMatch {
    WeekdayNormalizer::default().classify(input, position)
}
