// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was absent or blank.
    MissingField {
        /// The form field name.
        field: &'static str,
    },
    /// An identifier could not be parsed as a positive integer.
    InvalidIdentifier {
        /// The form field name.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },
    /// A calendar date could not be parsed.
    InvalidDate {
        /// The form field name.
        field: &'static str,
        /// The rejected raw value.
        value: String,
    },
    /// A stored timestamp could not be parsed or formatted.
    InvalidTimestamp(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "Missing required field: {field}"),
            Self::InvalidIdentifier { field, value } => {
                write!(f, "Invalid identifier for {field}: '{value}'")
            }
            Self::InvalidDate { field, value } => {
                write!(f, "Invalid date for {field}: '{value}' (expected YYYY-MM-DD)")
            }
            Self::InvalidTimestamp(msg) => write!(f, "Invalid timestamp: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
