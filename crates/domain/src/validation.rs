// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Absence, Person};
use std::collections::HashSet;
use time::Date;

/// Maximum length of an absence note, in characters.
pub const MAX_NOTE_LENGTH: usize = 200;

/// Validates that a person's basic field constraints are met.
///
/// # Arguments
///
/// * `person` - The person to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty after trimming.
pub fn validate_person_fields(person: &Person) -> Result<(), DomainError> {
    // Rule: name must not be blank
    if person.name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    Ok(())
}

/// Validates the shape of an absence record.
///
/// This does NOT look at other absences; see [`crate::validate_absence`].
///
/// # Arguments
///
/// * `absence` - The absence to validate
///
/// # Errors
///
/// Returns an error if:
/// - The end date precedes the start date
/// - The note is longer than [`MAX_NOTE_LENGTH`] characters
/// - An exception falls outside the absence
/// - Two exceptions share a date
pub fn validate_absence_fields(absence: &Absence) -> Result<(), DomainError> {
    absence.range()?;

    // Rule: note length is counted in characters, not bytes
    if let Some(note) = &absence.note {
        let length: usize = note.chars().count();
        if length > MAX_NOTE_LENGTH {
            return Err(DomainError::NoteTooLong {
                length,
                max: MAX_NOTE_LENGTH,
            });
        }
    }

    let mut seen: HashSet<Date> = HashSet::new();
    for exception in &absence.exceptions {
        if !absence.is_active_on(exception.date) {
            return Err(DomainError::ExceptionOutOfRange {
                date: exception.date,
                start: absence.start_date,
                end: absence.end_date,
            });
        }
        if !seen.insert(exception.date) {
            return Err(DomainError::DuplicateException {
                date: exception.date,
            });
        }
    }

    Ok(())
}

/// Returns the seniority order for the next person added to the roster.
///
/// # Returns
///
/// One more than the highest existing order, or 1 for an empty roster.
#[must_use]
pub fn next_seniority_order(roster: &[Person]) -> u32 {
    roster
        .iter()
        .map(|person| person.seniority_order)
        .max()
        .map_or(1, |highest| highest.saturating_add(1))
}
