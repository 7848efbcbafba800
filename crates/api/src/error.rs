// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use slopesense_domain::DomainError;
use slopesense_persistence::PersistenceError;

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credentials or session were rejected.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The session store could not be read or written.
    StoreUnavailable {
        /// A description of the storage failure.
        message: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::StoreUnavailable { message } => {
                write!(f, "Session store unavailable: {message}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// contract handlers translate into responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The authenticated user may not perform this action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Why it was refused.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The text shown to the user when a form is re-rendered.
    ///
    /// Internal errors get a generic message; the detail is logged.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationFailed { reason } | Self::Unauthorized { reason, .. } => {
                reason.clone()
            }
            Self::DomainRuleViolation { message, .. }
            | Self::InvalidInput { message, .. }
            | Self::ResourceNotFound { message, .. } => message.clone(),
            Self::Internal { .. } => String::from("Something went wrong. Please try again."),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { action, reason } => {
                write!(f, "Unauthorized: '{action}': {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::StoreUnavailable { message } => Self::Internal { message },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::MissingField { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{} is required", field_label(field)),
        },
        DomainError::InvalidIdentifier { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{} must be a positive number (got '{value}')", field_label(field)),
        },
        DomainError::InvalidDate { field, value } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("{} must be a date like 1990-02-14 (got '{value}')", field_label(field)),
        },
        DomainError::InvalidTimestamp(message) => ApiError::Internal { message },
    }
}

/// Translates a persistence error into an API error.
///
/// Constraint violations become the same failures the pre-checks produce,
/// so a lost check-then-write race never surfaces as an internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    if err.violates_unique("users.username") {
        return username_taken();
    }
    if err.violates_unique("users.email") {
        return email_taken();
    }

    match err {
        PersistenceError::UniqueViolation(message) => ApiError::DomainRuleViolation {
            rule: String::from("unique"),
            message,
        },
        PersistenceError::ForeignKeyViolation(message) => ApiError::InvalidInput {
            field: String::from("reference"),
            message: format!("Referenced record does not exist ({message})"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}

/// The failure for a username held by another user.
#[must_use]
pub fn username_taken() -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from("unique_username"),
        message: String::from("That username is already taken"),
    }
}

/// The failure for an email held by another user.
#[must_use]
pub fn email_taken() -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from("unique_email"),
        message: String::from("That email is already taken"),
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "username" => "Username",
        "email" => "Email",
        "password" => "Password",
        "first_name" => "First name",
        "last_name" => "Last name",
        "birthday" => "Birthday",
        "fav_resort" => "Favorite resort",
        "resort_id" => "Resort",
        "area_id" => "Area",
        "run_id" => "Run",
        "report_id" => "Report",
        other => other,
    }
}
