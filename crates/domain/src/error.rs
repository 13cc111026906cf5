// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AbsenceId, PersonId};
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The end date of a range precedes its start date.
    InvalidRange {
        /// The start of the range.
        start: Date,
        /// The end of the range.
        end: Date,
    },
    /// The referenced person does not exist in the roster.
    UnknownPerson(PersonId),
    /// The person already has an absence covering the same shift on a shared date.
    OverlappingAbsence {
        /// The display name of the double-booked person.
        person_name: String,
        /// The first date on which the shifts collide.
        date: Date,
    },
    /// Person name is empty or invalid.
    InvalidName(String),
    /// The free-text note exceeds the maximum length.
    NoteTooLong {
        /// The note length in characters.
        length: usize,
        /// The maximum permitted length in characters.
        max: usize,
    },
    /// A shift exception falls outside its absence's date range.
    ExceptionOutOfRange {
        /// The exception date.
        date: Date,
        /// The absence start date.
        start: Date,
        /// The absence end date.
        end: Date,
    },
    /// Two shift exceptions of the same absence share a date.
    DuplicateException {
        /// The repeated date.
        date: Date,
    },
    /// Rank code is not recognized.
    InvalidRank(String),
    /// Category code is not recognized.
    InvalidCategory(String),
    /// Shift code is not recognized.
    InvalidShift(String),
    /// Absence reason is not recognized.
    InvalidReason(String),
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The person to update or delete does not exist.
    PersonNotFound(PersonId),
    /// The absence to update or delete does not exist.
    AbsenceNotFound(AbsenceId),
    /// A record that must already be persisted carries no identifier.
    MissingIdentifier(&'static str),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRange { start, end } => {
                write!(f, "End date {end} must not precede start date {start}")
            }
            Self::UnknownPerson(person_id) => {
                write!(f, "Person {person_id} does not exist in the roster")
            }
            Self::OverlappingAbsence { person_name, date } => {
                write!(f, "Conflicting absence for {person_name} on {date}")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::NoteTooLong { length, max } => {
                write!(f, "Note is {length} characters long. Maximum is {max}")
            }
            Self::ExceptionOutOfRange { date, start, end } => {
                write!(
                    f,
                    "Shift exception on {date} falls outside the absence period {start}..{end}"
                )
            }
            Self::DuplicateException { date } => {
                write!(f, "More than one shift exception on {date}")
            }
            Self::InvalidRank(value) => write!(f, "Invalid rank: '{value}'"),
            Self::InvalidCategory(value) => write!(f, "Invalid category: '{value}'"),
            Self::InvalidShift(value) => write!(f, "Invalid shift: '{value}'"),
            Self::InvalidReason(value) => write!(f, "Invalid absence reason: '{value}'"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::PersonNotFound(person_id) => write!(f, "Person {person_id} not found"),
            Self::AbsenceNotFound(absence_id) => write!(f, "Absence {absence_id} not found"),
            Self::MissingIdentifier(kind) => {
                write!(f, "{kind} has no identifier; it must be persisted first")
            }
        }
    }
}

impl std::error::Error for DomainError {}
