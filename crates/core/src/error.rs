// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use efetivo_domain::{ConflictingAbsence, DomainError};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The write raised understaffing warnings that were not confirmed.
    ConfirmationRequired {
        /// The warning messages.
        warnings: Vec<String>,
        /// The absences behind the warnings.
        conflicting_absences: Vec<ConflictingAbsence>,
    },
    /// The store failed to read or write.
    Store(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ConfirmationRequired { warnings, .. } => {
                write!(f, "Confirmation required: {}", warnings.join("; "))
            }
            Self::Store(msg) => write!(f, "Store error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
