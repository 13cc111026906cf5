// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod availability;
mod calendar;
mod conflict;
mod error;
mod filter;
mod shift;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use availability::{
    AvailabilitySnapshot, CategoryAvailability, DailyAbsence, absences_by_date, absences_on_date,
    calculate_availability,
};
pub use calendar::{DateRange, Days, format_iso_date, iso_date, parse_iso_date};
pub use conflict::{ConflictingAbsence, ValidationVerdict, validate_absence};
pub use error::DomainError;
pub use filter::{AbsenceFilter, AbsenceMatch, filter_absences};
pub use shift::effective_shift;

// Re-export public types
pub use types::{
    Absence, AbsenceId, Category, Person, PersonId, Rank, Reason, Shift, ShiftException,
};
pub use validation::{
    MAX_NOTE_LENGTH, next_seniority_order, validate_absence_fields, validate_person_fields,
};
