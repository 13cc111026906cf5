// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Absence queries.
//!
//! Dates are stored as `YYYY-MM-DD` text, so ordering by the column
//! matches calendar order.

use diesel::SqliteConnection;
use diesel::prelude::*;
use efetivo_domain::Absence;
use tracing::debug;

use crate::data_models::AbsenceRow;
use crate::diesel_schema::absences;
use crate::error::PersistenceError;

/// Lists every absence, earliest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_absences(conn: &mut SqliteConnection) -> Result<Vec<Absence>, PersistenceError> {
    let rows: Vec<AbsenceRow> = absences::table
        .order((absences::start_date.asc(), absences::absence_id.asc()))
        .select(AbsenceRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded absences");
    rows.into_iter().map(Absence::try_from).collect()
}
