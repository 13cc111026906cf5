// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff availability aggregation.
//!
//! This module provides read-only views over a roster and its absences:
//! per-category head counts for a day, and the list of who is away.

use crate::calendar::{DateRange, iso_date};
use crate::shift::effective_shift;
use crate::types::{Absence, Category, Person, PersonId, Shift};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use time::Date;

/// Head counts for a single category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAvailability {
    /// The category these counts apply to.
    pub category: Category,
    /// Active people in the category.
    pub total: u32,
    /// Active people in the category who are away.
    pub absent: u32,
    /// `total - absent`. Signed so that an inconsistent input shows up
    /// as a negative value instead of being masked.
    pub available: i64,
}

impl CategoryAvailability {
    const fn empty(category: Category) -> Self {
        Self {
            category,
            total: 0,
            absent: 0,
            available: 0,
        }
    }
}

/// Availability for one day and optional shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySnapshot {
    /// The day the counts apply to.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The shift filter, if any.
    pub shift: Option<Shift>,
    /// One entry per category, in [`Category::ALL`] order.
    pub categories: Vec<CategoryAvailability>,
}

impl AvailabilitySnapshot {
    /// Returns the counts for `category`.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<&CategoryAvailability> {
        self.categories
            .iter()
            .find(|entry| entry.category == category)
    }

    /// Categories whose available count went negative.
    #[must_use]
    pub fn integrity_violations(&self) -> Vec<Category> {
        self.categories
            .iter()
            .filter(|entry| entry.available < 0)
            .map(|entry| entry.category)
            .collect()
    }
}

/// One absence occurring on a specific day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAbsence {
    /// The absent person.
    pub person: Person,
    /// The absence record.
    pub absence: Absence,
    /// The shift the absence occupies that day.
    pub shift: Shift,
}

fn active_people(roster: &[Person]) -> HashMap<PersonId, &Person> {
    roster
        .iter()
        .filter(|person| person.active)
        .filter_map(|person| person.person_id.map(|id| (id, person)))
        .collect()
}

/// Calculates per-category availability for a day.
///
/// # Arguments
///
/// * `roster` - Every known person
/// * `absences` - Every known absence
/// * `date` - The day to evaluate
/// * `shift` - Optional shift filter
///
/// # Returns
///
/// A snapshot with an entry for every category, including categories with
/// nobody in them.
///
/// Only active people are counted. A person is absent when one of their
/// absences includes `date` and either no shift filter is given, the
/// effective shift is `INTEGRAL`, or the effective shift equals the filter.
/// Each person is counted at most once.
#[must_use]
pub fn calculate_availability(
    roster: &[Person],
    absences: &[Absence],
    date: Date,
    shift: Option<Shift>,
) -> AvailabilitySnapshot {
    let active: HashMap<PersonId, &Person> = active_people(roster);

    let mut counts: BTreeMap<Category, CategoryAvailability> = Category::ALL
        .into_iter()
        .map(|category| (category, CategoryAvailability::empty(category)))
        .collect();

    for person in active.values() {
        if let Some(entry) = counts.get_mut(&person.category()) {
            entry.total += 1;
        }
    }

    let mut counted: HashSet<PersonId> = HashSet::new();
    for absence in absences {
        // Rule: only active, known people are counted as absent
        let Some(person) = active.get(&absence.person_id) else {
            continue;
        };
        if !absence.is_active_on(date) {
            continue;
        }
        let occupied: Shift = effective_shift(absence, date);
        let matches_filter: bool = shift.is_none_or(|requested| occupied.covers(requested));
        if !matches_filter {
            continue;
        }
        // Rule: a person is counted once even with several matching records
        if !counted.insert(absence.person_id) {
            continue;
        }
        if let Some(entry) = counts.get_mut(&person.category()) {
            entry.absent += 1;
        }
    }

    let categories: Vec<CategoryAvailability> = counts
        .into_values()
        .map(|mut entry| {
            entry.available = i64::from(entry.total) - i64::from(entry.absent);
            entry
        })
        .collect();

    AvailabilitySnapshot {
        date,
        shift,
        categories,
    }
}

/// Lists the absences of active people that include `date`.
///
/// # Returns
///
/// One entry per absence record, `GRADUADO` first, then by name.
#[must_use]
pub fn absences_on_date(roster: &[Person], absences: &[Absence], date: Date) -> Vec<DailyAbsence> {
    let active: HashMap<PersonId, &Person> = active_people(roster);

    let mut daily: Vec<DailyAbsence> = absences
        .iter()
        .filter(|absence| absence.is_active_on(date))
        .filter_map(|absence| {
            active.get(&absence.person_id).map(|person| DailyAbsence {
                person: (*person).clone(),
                absence: absence.clone(),
                shift: effective_shift(absence, date),
            })
        })
        .collect();

    daily.sort_by(|a, b| {
        a.person
            .category()
            .cmp(&b.person.category())
            .then_with(|| a.person.name.cmp(&b.person.name))
            .then_with(|| a.absence.start_date.cmp(&b.absence.start_date))
    });
    daily
}

/// Groups absences by day over a range.
///
/// Only days with at least one absence appear in the result.
#[must_use]
pub fn absences_by_date(
    roster: &[Person],
    absences: &[Absence],
    range: DateRange,
) -> BTreeMap<Date, Vec<DailyAbsence>> {
    range
        .days()
        .filter_map(|date| {
            let daily: Vec<DailyAbsence> = absences_on_date(roster, absences, date);
            (!daily.is_empty()).then_some((date, daily))
        })
        .collect()
}
