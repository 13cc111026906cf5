// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Roster queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use efetivo_domain::Person;
use tracing::debug;

use crate::data_models::PersonRow;
use crate::diesel_schema::people;
use crate::error::PersistenceError;

/// Lists every person in seniority order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_people(conn: &mut SqliteConnection) -> Result<Vec<Person>, PersistenceError> {
    let rows: Vec<PersonRow> = people::table
        .order((people::seniority_order.asc(), people::person_id.asc()))
        .select(PersonRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded people");
    rows.into_iter().map(Person::try_from).collect()
}
