// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use efetivo_domain::{
    Absence, AbsenceFilter, AbsenceId, AbsenceMatch, AvailabilitySnapshot, ConflictingAbsence,
    DailyAbsence, DateRange, Person, PersonId, Shift, ValidationVerdict, absences_by_date,
    absences_on_date, calculate_availability, filter_absences, validate_absence,
};
use std::collections::BTreeMap;
use time::Date;

/// An immutable snapshot of the roster and its absences.
///
/// People are kept in seniority order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// Every known person, active or not.
    pub people: Vec<Person>,
    /// Every stored absence.
    pub absences: Vec<Absence>,
}

impl State {
    /// Creates a snapshot from loaded records.
    ///
    /// # Arguments
    ///
    /// * `people` - Every known person
    /// * `absences` - Every stored absence
    #[must_use]
    pub fn new(people: Vec<Person>, absences: Vec<Absence>) -> Self {
        let mut state: Self = Self { people, absences };
        state.sort_people();
        state
    }

    fn sort_people(&mut self) {
        self.people.sort_by(|a, b| {
            a.seniority_order
                .cmp(&b.seniority_order)
                .then_with(|| b.rank.cmp(&a.rank))
                .then_with(|| a.name.cmp(&b.name))
        });
    }

    /// Looks up a person by id.
    #[must_use]
    pub fn person(&self, person_id: PersonId) -> Option<&Person> {
        self.people
            .iter()
            .find(|person| person.person_id == Some(person_id))
    }

    /// Looks up an absence by id.
    #[must_use]
    pub fn absence(&self, absence_id: AbsenceId) -> Option<&Absence> {
        self.absences
            .iter()
            .find(|absence| absence.absence_id == Some(absence_id))
    }

    /// Per-category availability for a day.
    #[must_use]
    pub fn availability(&self, date: Date, shift: Option<Shift>) -> AvailabilitySnapshot {
        calculate_availability(&self.people, &self.absences, date, shift)
    }

    /// Absences of active people on a day.
    #[must_use]
    pub fn absences_on(&self, date: Date) -> Vec<DailyAbsence> {
        absences_on_date(&self.people, &self.absences, date)
    }

    /// Absences of active people grouped by day.
    #[must_use]
    pub fn absences_between(&self, range: DateRange) -> BTreeMap<Date, Vec<DailyAbsence>> {
        absences_by_date(&self.people, &self.absences, range)
    }

    /// Searches absences.
    #[must_use]
    pub fn search(&self, filter: &AbsenceFilter) -> Vec<AbsenceMatch> {
        filter_absences(&self.absences, &self.people, filter)
    }

    /// Validates a candidate absence without writing anything.
    #[must_use]
    pub fn validate(
        &self,
        candidate: &Absence,
        exclude_id: Option<AbsenceId>,
    ) -> ValidationVerdict {
        validate_absence(candidate, &self.absences, &self.people, exclude_id)
    }

    /// Returns a new snapshot with a stored mutation applied.
    ///
    /// Deleting a person also drops their absences.
    #[must_use]
    pub fn with_mutation(&self, mutation: &Mutation) -> Self {
        let mut next: Self = self.clone();
        match mutation {
            Mutation::SavePerson(person) => {
                next.people
                    .retain(|existing| existing.person_id != person.person_id);
                next.people.push(person.clone());
                next.sort_people();
            }
            Mutation::DeletePerson(person_id) => {
                next.people
                    .retain(|person| person.person_id != Some(*person_id));
                next.absences
                    .retain(|absence| absence.person_id != *person_id);
            }
            Mutation::SaveAbsence(absence) => {
                next.absences
                    .retain(|existing| existing.absence_id != absence.absence_id);
                next.absences.push(absence.clone());
            }
            Mutation::DeleteAbsence(absence_id) => {
                next.absences
                    .retain(|absence| absence.absence_id != Some(*absence_id));
            }
        }
        next
    }
}

/// A single write to perform against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert or replace a person.
    SavePerson(Person),
    /// Delete a person and their absences.
    DeletePerson(PersonId),
    /// Insert or replace an absence.
    SaveAbsence(Absence),
    /// Delete an absence.
    DeleteAbsence(AbsenceId),
}

/// The result of a successful, not yet committed, transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The write to perform.
    pub mutation: Mutation,
    /// Confirmed understaffing warnings, if any.
    pub warnings: Vec<String>,
    /// The absences behind the warnings.
    pub conflicting_absences: Vec<ConflictingAbsence>,
}

impl TransitionResult {
    /// A transition without warnings.
    #[must_use]
    pub const fn new(mutation: Mutation) -> Self {
        Self {
            mutation,
            warnings: Vec::new(),
            conflicting_absences: Vec::new(),
        }
    }
}

/// The result of writing a transition through a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResult {
    /// The snapshot after the write.
    pub new_state: State,
    /// The mutation as stored, with identifiers assigned.
    pub stored: Mutation,
    /// Confirmed understaffing warnings, if any.
    pub warnings: Vec<String>,
}
