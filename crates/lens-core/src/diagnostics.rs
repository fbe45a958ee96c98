//! Non-fatal degradation taxonomy.
//!
//! Nothing in the derivation engine fails toward the UI. When input is
//! incomplete the responsible stage absorbs it, produces an empty or neutral
//! result, and reports the condition through [`Degradation::report`].

use std::fmt;

use serde::Serialize;

/// A recoverable condition absorbed by a derivation stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Degradation {
    /// A referenced field is absent on some records.
    SchemaMismatch,
    /// Zero records to derive from.
    EmptyInput,
    /// Date and value arrays are missing or of unequal length.
    MalformedSeries,
    /// A weekday label fell back to its input position.
    UnrecognizedWeekday,
    /// A fetch response was superseded by a later request.
    StaleResponse,
}

impl Degradation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SchemaMismatch => "schema_mismatch",
            Self::EmptyInput => "empty_input",
            Self::MalformedSeries => "malformed_series",
            Self::UnrecognizedWeekday => "unrecognized_weekday",
            Self::StaleResponse => "stale_response",
        }
    }

    /// Emit a debug-level diagnostic for this condition.
    pub fn report(self, detail: &str) {
        tracing::debug!(
            degradation = self.as_str(),
            detail,
            "degraded input absorbed"
        );
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
