// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Absence mutations.
//!
//! Shift exceptions are kept as a JSON array in `shift_exceptions_json`.

use diesel::SqliteConnection;
use diesel::prelude::*;
use efetivo_domain::{Absence, AbsenceId, format_iso_date};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::absences;
use crate::error::PersistenceError;

/// Inserts a new absence and returns it with its assigned ID.
///
/// Any ID already on `absence` is ignored.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the person does
/// not exist.
pub fn insert_absence(
    conn: &mut SqliteConnection,
    absence: &Absence,
) -> Result<Absence, PersistenceError> {
    let exceptions_json: String = serde_json::to_string(&absence.exceptions)?;

    let absence_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(absences::table)
            .values((
                absences::person_id.eq(absence.person_id.value()),
                absences::reason.eq(absence.reason.code()),
                absences::start_date.eq(format_iso_date(absence.start_date)),
                absences::end_date.eq(format_iso_date(absence.end_date)),
                absences::default_shift.eq(absence.default_shift.as_str()),
                absences::shift_exceptions_json.eq(&exceptions_json),
                absences::note.eq(absence.note.as_deref()),
            ))
            .execute(conn)?;
        conn.get_last_insert_rowid()
    })?;

    info!(
        absence_id,
        person_id = absence.person_id.value(),
        reason = absence.reason.code(),
        "Absence created"
    );
    Ok(absence.clone().with_id(AbsenceId::new(absence_id)))
}

/// Replaces the stored fields of an existing absence.
///
/// # Errors
///
/// Returns `PersistenceError::AbsenceNotFound` if no row has this ID.
pub fn update_absence(
    conn: &mut SqliteConnection,
    absence_id: i64,
    absence: &Absence,
) -> Result<Absence, PersistenceError> {
    let exceptions_json: String = serde_json::to_string(&absence.exceptions)?;

    let updated: usize = diesel::update(absences::table)
        .filter(absences::absence_id.eq(absence_id))
        .set((
            absences::person_id.eq(absence.person_id.value()),
            absences::reason.eq(absence.reason.code()),
            absences::start_date.eq(format_iso_date(absence.start_date)),
            absences::end_date.eq(format_iso_date(absence.end_date)),
            absences::default_shift.eq(absence.default_shift.as_str()),
            absences::shift_exceptions_json.eq(&exceptions_json),
            absences::note.eq(absence.note.as_deref()),
            absences::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::AbsenceNotFound(absence_id));
    }

    debug!(absence_id, "Absence updated");
    Ok(absence.clone().with_id(AbsenceId::new(absence_id)))
}

/// Deletes an absence.
///
/// # Errors
///
/// Returns `PersistenceError::AbsenceNotFound` if no row has this ID.
pub fn delete_absence(conn: &mut SqliteConnection, absence_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(absences::table.filter(absences::absence_id.eq(absence_id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::AbsenceNotFound(absence_id));
    }

    info!(absence_id, "Absence deleted");
    Ok(())
}

/// Deletes every absence owned by a person.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_absences_for_person(
    conn: &mut SqliteConnection,
    person_id: i64,
) -> Result<usize, PersistenceError> {
    let deleted: usize =
        diesel::delete(absences::table.filter(absences::person_id.eq(person_id)))
            .execute(conn)?;

    debug!(person_id, deleted, "Absences deleted for person");
    Ok(deleted)
}
