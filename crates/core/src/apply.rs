// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Mutation, State, TransitionResult};
use efetivo_domain::{
    Absence, AbsenceId, DomainError, Person, ValidationVerdict, next_seniority_order,
    validate_absence_fields, validate_person_fields,
};

/// Applies a command to the current state, producing the write to perform.
///
/// This function is pure: it reads the snapshot and decides. Nothing is
/// written until the result is passed to [`crate::commit`].
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the mutation and any confirmed warnings
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A field is invalid (blank name, long note, stray exception)
/// - The target person or absence does not exist
/// - The absence double-books its person
/// - The absence raises warnings and `confirm_warnings` is false
pub fn apply(state: &State, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreatePerson {
            name,
            rank,
            seniority_order,
        } => {
            let order: u32 =
                seniority_order.unwrap_or_else(|| next_seniority_order(&state.people));
            let person: Person = Person::new(name.trim().to_string(), rank, order);
            validate_person_fields(&person)?;

            Ok(TransitionResult::new(Mutation::SavePerson(person)))
        }
        Command::UpdatePerson {
            person_id,
            name,
            rank,
            seniority_order,
        } => {
            let existing: &Person = state
                .person(person_id)
                .ok_or(DomainError::PersonNotFound(person_id))?;

            let mut person: Person = existing.clone();
            person.name = name.trim().to_string();
            person.rank = rank;
            person.seniority_order = seniority_order;
            validate_person_fields(&person)?;

            Ok(TransitionResult::new(Mutation::SavePerson(person)))
        }
        Command::SetPersonActive { person_id, active } => {
            let mut person: Person = state
                .person(person_id)
                .cloned()
                .ok_or(DomainError::PersonNotFound(person_id))?;
            person.active = active;

            Ok(TransitionResult::new(Mutation::SavePerson(person)))
        }
        Command::DeletePerson { person_id } => {
            if state.person(person_id).is_none() {
                return Err(CoreError::DomainViolation(DomainError::PersonNotFound(
                    person_id,
                )));
            }
            Ok(TransitionResult::new(Mutation::DeletePerson(person_id)))
        }
        Command::CreateAbsence {
            mut absence,
            confirm_warnings,
        } => {
            // Rule: the store assigns identifiers
            absence.absence_id = None;
            gate_absence(state, absence.normalize(), None, confirm_warnings)
        }
        Command::UpdateAbsence {
            absence,
            confirm_warnings,
        } => {
            let absence_id: AbsenceId = absence
                .absence_id
                .ok_or(DomainError::MissingIdentifier("Absence"))?;
            if state.absence(absence_id).is_none() {
                return Err(CoreError::DomainViolation(DomainError::AbsenceNotFound(
                    absence_id,
                )));
            }
            gate_absence(state, absence.normalize(), Some(absence_id), confirm_warnings)
        }
        Command::DeleteAbsence { absence_id } => {
            if state.absence(absence_id).is_none() {
                return Err(CoreError::DomainViolation(DomainError::AbsenceNotFound(
                    absence_id,
                )));
            }
            Ok(TransitionResult::new(Mutation::DeleteAbsence(absence_id)))
        }
    }
}

/// Runs the field checks and the validator for an absence write.
fn gate_absence(
    state: &State,
    absence: Absence,
    exclude_id: Option<AbsenceId>,
    confirm_warnings: bool,
) -> Result<TransitionResult, CoreError> {
    let verdict: ValidationVerdict = state.validate(&absence, exclude_id);
    if let Some(err) = verdict.error {
        return Err(CoreError::DomainViolation(err));
    }

    // Rule: field checks follow the range, person and overlap checks
    validate_absence_fields(&absence)?;

    // Rule: warnings block the write until the caller confirms them
    if !verdict.warnings.is_empty() && !confirm_warnings {
        return Err(CoreError::ConfirmationRequired {
            warnings: verdict.warnings,
            conflicting_absences: verdict.conflicting_absences,
        });
    }

    Ok(TransitionResult {
        mutation: Mutation::SaveAbsence(absence),
        warnings: verdict.warnings,
        conflicting_absences: verdict.conflicting_absences,
    })
}
