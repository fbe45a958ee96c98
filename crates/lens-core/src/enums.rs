//! Direction and convention enums shared across Marketlens crates.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and parse from the same strings, so config files, CLI flags and JSON view
//! configs spell them identically.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// SortDirection
// ---------------------------------------------------------------------------

/// Sort direction for table views.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction '{other}' (expected asc or desc)")),
        }
    }
}

// ---------------------------------------------------------------------------
// TextCase
// ---------------------------------------------------------------------------

/// Case handling for text comparison in sorts.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TextCase {
    /// Codepoint order, `"B" < "a"`.
    #[default]
    Sensitive,
    /// Compare lowercased text.
    Insensitive,
}

// ---------------------------------------------------------------------------
// IndexConvention
// ---------------------------------------------------------------------------

/// How a numeric weekday index is interpreted.
///
/// ```text
/// monday_zero  0=Mon .. 6=Sun
/// sunday_zero  0=Sun, 1=Mon .. 6=Sat   (JavaScript Date#getDay)
/// monday_one   1=Mon .. 7=Sun          (ISO 8601)
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum IndexConvention {
    MondayZero,
    #[default]
    SundayZero,
    MondayOne,
}

impl IndexConvention {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MondayZero => "monday_zero",
            Self::SundayZero => "sunday_zero",
            Self::MondayOne => "monday_one",
        }
    }

    /// Map a raw index to the canonical `1` (Monday) .. `7` (Sunday) range.
    /// Returns `None` when the index is out of range for this convention.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn to_canonical(self, index: i64) -> Option<u8> {
        match self {
            Self::MondayZero if 0 <= index && index <= 6 => Some(index as u8 + 1),
            Self::SundayZero if index == 0 => Some(7),
            Self::SundayZero if 1 <= index && index <= 6 => Some(index as u8),
            Self::MondayOne if 1 <= index && index <= 7 => Some(index as u8),
            _ => None,
        }
    }
}

impl fmt::Display for IndexConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndexConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "monday_zero" => Ok(Self::MondayZero),
            "sunday_zero" => Ok(Self::SundayZero),
            "monday_one" => Ok(Self::MondayOne),
            other => Err(format!("unknown weekday index convention '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// MonthConvention
// ---------------------------------------------------------------------------

/// How a numeric month is interpreted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MonthConvention {
    /// `0` = January .. `11` = December.
    ZeroBased,
    /// `1` = January .. `12` = December.
    #[default]
    OneBased,
}

impl MonthConvention {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ZeroBased => "zero_based",
            Self::OneBased => "one_based",
        }
    }

    /// Map a raw month number to a `0..=11` matrix row.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn to_index(self, month: i64) -> Option<u8> {
        match self {
            Self::ZeroBased if 0 <= month && month <= 11 => Some(month as u8),
            Self::OneBased if 1 <= month && month <= 12 => Some(month as u8 - 1),
            _ => None,
        }
    }
}

impl fmt::Display for MonthConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
