// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes and their conversion to domain values.

use diesel::prelude::*;
use efetivo_domain::{
    Absence, AbsenceId, Person, PersonId, Rank, Reason, Shift, ShiftException, parse_iso_date,
};
use num_traits::ToPrimitive;
use std::str::FromStr;

use crate::diesel_schema::{absences, people};
use crate::error::PersistenceError;

/// Diesel Queryable struct for person rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = people)]
pub struct PersonRow {
    pub person_id: i64,
    pub name: String,
    pub rank: String,
    pub seniority_order: i32,
    pub is_active: i32,
}

impl TryFrom<PersonRow> for Person {
    type Error = PersistenceError;

    fn try_from(row: PersonRow) -> Result<Self, Self::Error> {
        let rank: Rank = Rank::from_str(&row.rank)?;
        let seniority_order: u32 = row.seniority_order.to_u32().ok_or_else(|| {
            PersistenceError::CorruptRow(format!(
                "person {} has negative seniority {}",
                row.person_id, row.seniority_order
            ))
        })?;

        Ok(Self {
            person_id: Some(PersonId::new(row.person_id)),
            name: row.name,
            rank,
            seniority_order,
            active: row.is_active != 0,
        })
    }
}

/// Diesel Queryable struct for absence rows.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = absences)]
pub struct AbsenceRow {
    pub absence_id: i64,
    pub person_id: i64,
    pub reason: String,
    pub start_date: String,
    pub end_date: String,
    pub default_shift: String,
    pub shift_exceptions_json: String,
    pub note: Option<String>,
}

impl TryFrom<AbsenceRow> for Absence {
    type Error = PersistenceError;

    fn try_from(row: AbsenceRow) -> Result<Self, Self::Error> {
        let exceptions: Vec<ShiftException> = serde_json::from_str(&row.shift_exceptions_json)?;

        Ok(Self {
            absence_id: Some(AbsenceId::new(row.absence_id)),
            person_id: PersonId::new(row.person_id),
            reason: Reason::from_str(&row.reason)?,
            start_date: parse_iso_date(&row.start_date)?,
            end_date: parse_iso_date(&row.end_date)?,
            default_shift: Shift::from_str(&row.default_shift)?,
            exceptions,
            note: row.note,
        })
    }
}

/// Converts a seniority order to its column type.
///
/// # Errors
///
/// Returns an error if the value does not fit in the column.
pub fn seniority_column(order: u32) -> Result<i32, PersistenceError> {
    order.to_i32().ok_or_else(|| {
        PersistenceError::SerializationError(format!("Seniority order {order} is too large"))
    })
}
