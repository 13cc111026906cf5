// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::iso_date;
use crate::types::{Absence, Category, Person, PersonId, Reason};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::Date;

/// Search criteria for absences. Every field is optional; set fields are
/// combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceFilter {
    /// Case-insensitive substring of the person's name.
    #[serde(default)]
    pub name: Option<String>,
    /// Exact category of the person.
    #[serde(default)]
    pub category: Option<Category>,
    /// Exact reason.
    #[serde(default)]
    pub reason: Option<Reason>,
    /// Keep absences ending on or after this day.
    #[serde(default, with = "iso_date::option")]
    pub start: Option<Date>,
    /// Keep absences starting on or before this day.
    #[serde(default, with = "iso_date::option")]
    pub end: Option<Date>,
}

/// An absence together with the person it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceMatch {
    /// The absence record.
    pub absence: Absence,
    /// The absent person.
    pub person: Person,
}

impl AbsenceFilter {
    fn matches(&self, absence: &Absence, person: &Person, needle: Option<&str>) -> bool {
        if needle.is_some_and(|needle| !person.name.to_lowercase().contains(needle)) {
            return false;
        }
        if self
            .category
            .is_some_and(|category| person.category() != category)
        {
            return false;
        }
        if self.reason.is_some_and(|reason| absence.reason != reason) {
            return false;
        }
        // Rule: open-ended bounds; a missing side never excludes
        if self.start.is_some_and(|start| absence.end_date < start) {
            return false;
        }
        if self.end.is_some_and(|end| absence.start_date > end) {
            return false;
        }
        true
    }
}

/// Runs a search over the absences.
///
/// # Arguments
///
/// * `absences` - Every known absence
/// * `roster` - Every known person, active or not
/// * `filter` - The criteria
///
/// # Returns
///
/// The matching absences joined with their person, most recent start first.
/// Absences whose person is not in the roster are skipped.
#[must_use]
pub fn filter_absences(
    absences: &[Absence],
    roster: &[Person],
    filter: &AbsenceFilter,
) -> Vec<AbsenceMatch> {
    let people: HashMap<PersonId, &Person> = roster
        .iter()
        .filter_map(|person| person.person_id.map(|id| (id, person)))
        .collect();

    let needle: Option<String> = filter
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_lowercase);

    let mut matches: Vec<AbsenceMatch> = absences
        .iter()
        .filter_map(|absence| {
            let person: &Person = people.get(&absence.person_id)?;
            filter
                .matches(absence, person, needle.as_deref())
                .then(|| AbsenceMatch {
                    absence: absence.clone(),
                    person: person.clone(),
                })
        })
        .collect();

    matches.sort_by(|a, b| b.absence.start_date.cmp(&a.absence.start_date));
    matches
}
