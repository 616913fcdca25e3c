//! Errors from exactly-one lookups such as "domain by name".

use thiserror::Error;

/// A filtered search that was expected to match exactly one record did not.
///
/// Zero matches and several matches are separate variants so callers can
/// tell "does not exist" apart from "name is not unique".
#[derive(Debug, Error)]
pub enum LookupError {
    /// No record matched.
    #[error("{field} {value:?} did not match any {kind}")]
    NotFound {
        /// The resource kind that was searched (e.g. `domain`).
        kind: &'static str,
        /// The field that was compared.
        field: &'static str,
        /// The value that was looked up.
        value: String,
    },

    /// More than one record matched.
    #[error("{field} {value:?} matched {count} records of kind {kind}")]
    Ambiguous {
        /// The resource kind that was searched.
        kind: &'static str,
        /// The field that was compared.
        field: &'static str,
        /// The value that was looked up.
        value: String,
        /// How many records matched.
        count: usize,
    },
}

impl LookupError {
    /// Returns `true` for the zero-match case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
