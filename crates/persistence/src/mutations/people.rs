// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use efetivo_domain::{Person, PersonId};
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::data_models::seniority_column;
use crate::diesel_schema::people;
use crate::error::PersistenceError;

/// Inserts a new person and returns it with its assigned ID.
///
/// Any ID already on `person` is ignored.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_person(
    conn: &mut SqliteConnection,
    person: &Person,
) -> Result<Person, PersistenceError> {
    let seniority_order: i32 = seniority_column(person.seniority_order)?;

    let person_id: i64 = conn.transaction::<_, PersistenceError, _>(|conn| {
        diesel::insert_into(people::table)
            .values((
                people::name.eq(&person.name),
                people::rank.eq(person.rank.as_str()),
                people::seniority_order.eq(seniority_order),
                people::is_active.eq(i32::from(person.active)),
            ))
            .execute(conn)?;
        conn.get_last_insert_rowid()
    })?;

    info!(person_id, rank = %person.rank, "Person created");
    Ok(person.clone().with_id(PersonId::new(person_id)))
}

/// Replaces the stored fields of an existing person.
///
/// # Errors
///
/// Returns `PersistenceError::PersonNotFound` if no row has this ID.
pub fn update_person(
    conn: &mut SqliteConnection,
    person_id: i64,
    person: &Person,
) -> Result<Person, PersistenceError> {
    let seniority_order: i32 = seniority_column(person.seniority_order)?;

    let updated: usize = diesel::update(people::table)
        .filter(people::person_id.eq(person_id))
        .set((
            people::name.eq(&person.name),
            people::rank.eq(person.rank.as_str()),
            people::seniority_order.eq(seniority_order),
            people::is_active.eq(i32::from(person.active)),
            people::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::PersonNotFound(person_id));
    }

    debug!(person_id, active = person.active, "Person updated");
    Ok(person.clone().with_id(PersonId::new(person_id)))
}

/// Deletes a person. Their absences go with them through the foreign key.
///
/// # Errors
///
/// Returns `PersistenceError::PersonNotFound` if no row has this ID.
pub fn delete_person(conn: &mut SqliteConnection, person_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(people::table.filter(people::person_id.eq(person_id)))
        .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::PersonNotFound(person_id));
    }

    info!(person_id, "Person deleted");
    Ok(())
}
