// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The persistence collaborator and the commit step.

use crate::error::CoreError;
use crate::state::{CommitResult, Mutation, State, TransitionResult};
use efetivo_domain::{Absence, AbsenceId, Person, PersonId};
use std::collections::BTreeMap;

/// Storage for the roster and its absences.
///
/// Write operations return the record as stored, so callers never need to
/// reload to learn an assigned identifier.
pub trait Store {
    /// The error raised by this store.
    type Error: std::fmt::Display;

    /// Lists every person, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_people(&mut self) -> Result<Vec<Person>, Self::Error>;

    /// Inserts a person without an id, or replaces the person with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the id is unknown.
    fn upsert_person(&mut self, person: &Person) -> Result<Person, Self::Error>;

    /// Deletes a person.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_person(&mut self, person_id: PersonId) -> Result<(), Self::Error>;

    /// Lists every absence.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_absences(&mut self) -> Result<Vec<Absence>, Self::Error>;

    /// Inserts an absence without an id, or replaces the absence with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails, the id is unknown, or the person
    /// does not exist.
    fn upsert_absence(&mut self, absence: &Absence) -> Result<Absence, Self::Error>;

    /// Deletes an absence.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_absence(&mut self, absence_id: AbsenceId) -> Result<(), Self::Error>;

    /// Deletes every absence owned by a person, returning how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn delete_absences_for_person(&mut self, person_id: PersonId) -> Result<usize, Self::Error>;
}

fn store_error<E: std::fmt::Display>(err: E) -> CoreError {
    CoreError::Store(err.to_string())
}

/// Builds a snapshot from a store.
///
/// # Errors
///
/// Returns `CoreError::Store` if the store cannot be read.
pub fn load_state<S: Store>(store: &mut S) -> Result<State, CoreError> {
    let people: Vec<Person> = store.list_people().map_err(store_error)?;
    let absences: Vec<Absence> = store.list_absences().map_err(store_error)?;
    Ok(State::new(people, absences))
}

/// Writes a transition through a store.
///
/// # Arguments
///
/// * `store` - The store to write to
/// * `state` - The snapshot the transition was computed from
/// * `result` - The transition returned by [`crate::apply`]
///
/// # Returns
///
/// The snapshot after the write and the mutation as stored.
///
/// # Errors
///
/// Returns `CoreError::Store` if the write fails.
pub fn commit<S: Store>(
    store: &mut S,
    state: &State,
    result: TransitionResult,
) -> Result<CommitResult, CoreError> {
    let stored: Mutation = match result.mutation {
        Mutation::SavePerson(person) => {
            Mutation::SavePerson(store.upsert_person(&person).map_err(store_error)?)
        }
        Mutation::DeletePerson(person_id) => {
            // Rule: a person never outlives their absences
            store
                .delete_absences_for_person(person_id)
                .map_err(store_error)?;
            store.delete_person(person_id).map_err(store_error)?;
            Mutation::DeletePerson(person_id)
        }
        Mutation::SaveAbsence(absence) => {
            Mutation::SaveAbsence(store.upsert_absence(&absence).map_err(store_error)?)
        }
        Mutation::DeleteAbsence(absence_id) => {
            store.delete_absence(absence_id).map_err(store_error)?;
            Mutation::DeleteAbsence(absence_id)
        }
    };

    Ok(CommitResult {
        new_state: state.with_mutation(&stored),
        stored,
        warnings: result.warnings,
    })
}

/// Errors raised by [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InMemoryStoreError {
    /// No person with this id.
    PersonNotFound(PersonId),
    /// No absence with this id.
    AbsenceNotFound(AbsenceId),
}

impl std::fmt::Display for InMemoryStoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonNotFound(id) => write!(f, "Person {id} not found"),
            Self::AbsenceNotFound(id) => write!(f, "Absence {id} not found"),
        }
    }
}

impl std::error::Error for InMemoryStoreError {}

/// A [`Store`] kept entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    people: BTreeMap<PersonId, Person>,
    absences: BTreeMap<AbsenceId, Absence>,
    next_person_id: i64,
    next_absence_id: i64,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Store for InMemoryStore {
    type Error = InMemoryStoreError;

    fn list_people(&mut self) -> Result<Vec<Person>, Self::Error> {
        Ok(self.people.values().cloned().collect())
    }

    fn upsert_person(&mut self, person: &Person) -> Result<Person, Self::Error> {
        let person_id: PersonId = match person.person_id {
            Some(id) if self.people.contains_key(&id) => id,
            Some(id) => return Err(InMemoryStoreError::PersonNotFound(id)),
            None => {
                self.next_person_id += 1;
                PersonId::new(self.next_person_id)
            }
        };
        let stored: Person = person.clone().with_id(person_id);
        self.people.insert(person_id, stored.clone());
        Ok(stored)
    }

    fn delete_person(&mut self, person_id: PersonId) -> Result<(), Self::Error> {
        self.people
            .remove(&person_id)
            .ok_or(InMemoryStoreError::PersonNotFound(person_id))?;
        self.absences
            .retain(|_, absence| absence.person_id != person_id);
        Ok(())
    }

    fn list_absences(&mut self) -> Result<Vec<Absence>, Self::Error> {
        Ok(self.absences.values().cloned().collect())
    }

    fn upsert_absence(&mut self, absence: &Absence) -> Result<Absence, Self::Error> {
        if !self.people.contains_key(&absence.person_id) {
            return Err(InMemoryStoreError::PersonNotFound(absence.person_id));
        }
        let absence_id: AbsenceId = match absence.absence_id {
            Some(id) if self.absences.contains_key(&id) => id,
            Some(id) => return Err(InMemoryStoreError::AbsenceNotFound(id)),
            None => {
                self.next_absence_id += 1;
                AbsenceId::new(self.next_absence_id)
            }
        };
        let stored: Absence = absence.clone().with_id(absence_id);
        self.absences.insert(absence_id, stored.clone());
        Ok(stored)
    }

    fn delete_absence(&mut self, absence_id: AbsenceId) -> Result<(), Self::Error> {
        self.absences
            .remove(&absence_id)
            .map(|_| ())
            .ok_or(InMemoryStoreError::AbsenceNotFound(absence_id))
    }

    fn delete_absences_for_person(&mut self, person_id: PersonId) -> Result<usize, Self::Error> {
        let before: usize = self.absences.len();
        self.absences
            .retain(|_, absence| absence.person_id != person_id);
        Ok(before - self.absences.len())
    }
}
