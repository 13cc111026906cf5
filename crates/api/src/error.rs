// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use efetivo::CoreError;
use efetivo_domain::DomainError;
use thiserror::Error;

use crate::request_response::ConflictingAbsenceInfo;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Errors raised while turning request fields into typed values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    /// A required field is missing or blank.
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),
    /// The claimed role is not known.
    #[error("Unknown role '{0}'")]
    UnknownRole(String),
    /// A date field is not `YYYY-MM-DD`.
    #[error("Field '{field}' is not a YYYY-MM-DD date: '{value}'")]
    InvalidDate {
        /// The offending field.
        field: &'static str,
        /// The value received.
        value: String,
    },
    /// An enumerated field holds an unknown value.
    #[error("Invalid value for '{field}': '{value}'")]
    InvalidValue {
        /// The offending field.
        field: &'static str,
        /// The value received.
        value: String,
    },
    /// A look-ahead window is too long.
    #[error("A window of {days} days exceeds the maximum of {max}")]
    WindowTooLong {
        /// The requested number of days.
        days: u32,
        /// The maximum permitted number of days.
        max: u32,
    },
}

impl InputError {
    /// Returns the request field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field)
            | Self::InvalidDate { field, .. }
            | Self::InvalidValue { field, .. } => field,
            Self::UnknownRole(_) => "actor_role",
            Self::WindowTooLong { .. } => "days",
        }
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
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
    /// The write raised warnings that the caller has not confirmed.
    ConfirmationRequired {
        /// The warning messages.
        warnings: Vec<String>,
        /// The absences behind the warnings.
        conflicting_absences: Vec<ConflictingAbsenceInfo>,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
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
            Self::ConfirmationRequired { warnings, .. } => {
                write!(f, "Confirmation required: {}", warnings.join("; "))
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
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

fn invalid_input(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidRange { .. } => invalid_input("end_date", message),
        DomainError::UnknownPerson(_) | DomainError::PersonNotFound(_) => {
            not_found("Person", message)
        }
        DomainError::AbsenceNotFound(_) => not_found("Absence", message),
        DomainError::OverlappingAbsence { .. } => ApiError::DomainRuleViolation {
            rule: String::from("no_overlapping_absence"),
            message,
        },
        DomainError::InvalidName(_) => invalid_input("name", message),
        DomainError::NoteTooLong { .. } => invalid_input("note", message),
        DomainError::ExceptionOutOfRange { .. } | DomainError::DuplicateException { .. } => {
            invalid_input("exceptions", message)
        }
        DomainError::InvalidRank(_) => invalid_input("rank", message),
        DomainError::InvalidCategory(_) => invalid_input("category", message),
        DomainError::InvalidShift(_) => invalid_input("shift", message),
        DomainError::InvalidReason(_) => invalid_input("reason", message),
        DomainError::DateParseError { .. } => invalid_input("date", message),
        DomainError::MissingIdentifier(_) => invalid_input("id", message),
    }
}

/// Translates a core error into an API error.
///
/// Store failures keep their detail here; the server decides how much of it
/// reaches the client.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ConfirmationRequired {
            warnings,
            conflicting_absences,
        } => ApiError::ConfirmationRequired {
            warnings,
            conflicting_absences: conflicting_absences
                .iter()
                .map(ConflictingAbsenceInfo::from)
                .collect(),
        },
        CoreError::Store(msg) => ApiError::Internal { message: msg },
    }
}
