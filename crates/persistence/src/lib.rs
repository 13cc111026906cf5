// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the staff availability system.
//!
//! This crate stores the roster and its absences in `SQLite` through Diesel
//! and implements the core [`Store`] trait on top of it.
//!
//! ## Schema
//!
//! - `people`: one row per person; the category is derived from `rank`
//!   and never stored
//! - `absences`: one row per absence with ISO-8601 dates and a JSON array
//!   of per-day shift exceptions; rows are removed with their person via
//!   `ON DELETE CASCADE`
//!
//! Migrations are embedded in the binary and run on every open.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use efetivo::Store;
use efetivo_domain::{Absence, AbsenceId, Person, PersonId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use backend::PersistenceBackend;
use backend::sqlite::JournalMode;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `SQLite`-backed store for the roster and its absences.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:efetivo_mem_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection =
            backend::sqlite::open_database(&shared_memory_url, JournalMode::Default)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open_database(path_str, JournalMode::Wal)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // People
    // ========================================================================

    /// Lists every person in seniority order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_people(&mut self) -> Result<Vec<Person>, PersistenceError> {
        queries::list_people(&mut self.conn)
    }

    /// Inserts a person without an ID, or updates the person with this ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or the ID is unknown.
    pub fn save_person(&mut self, person: &Person) -> Result<Person, PersistenceError> {
        match person.person_id {
            Some(person_id) => mutations::update_person(&mut self.conn, person_id.value(), person),
            None => mutations::insert_person(&mut self.conn, person),
        }
    }

    /// Deletes a person and, through the foreign key, their absences.
    ///
    /// # Errors
    ///
    /// Returns an error if the person does not exist or the delete fails.
    pub fn delete_person(&mut self, person_id: PersonId) -> Result<(), PersistenceError> {
        mutations::delete_person(&mut self.conn, person_id.value())
    }

    // ========================================================================
    // Absences
    // ========================================================================

    /// Lists every absence, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_absences(&mut self) -> Result<Vec<Absence>, PersistenceError> {
        queries::list_absences(&mut self.conn)
    }

    /// Inserts an absence without an ID, or updates the absence with this ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails, the ID is unknown, or the
    /// person does not exist.
    pub fn save_absence(&mut self, absence: &Absence) -> Result<Absence, PersistenceError> {
        match absence.absence_id {
            Some(absence_id) => {
                mutations::update_absence(&mut self.conn, absence_id.value(), absence)
            }
            None => mutations::insert_absence(&mut self.conn, absence),
        }
    }

    /// Deletes an absence.
    ///
    /// # Errors
    ///
    /// Returns an error if the absence does not exist or the delete fails.
    pub fn delete_absence(&mut self, absence_id: AbsenceId) -> Result<(), PersistenceError> {
        mutations::delete_absence(&mut self.conn, absence_id.value())
    }
}

impl Store for Persistence {
    type Error = PersistenceError;

    fn list_people(&mut self) -> Result<Vec<Person>, Self::Error> {
        Self::list_people(self)
    }

    fn upsert_person(&mut self, person: &Person) -> Result<Person, Self::Error> {
        self.save_person(person)
    }

    fn delete_person(&mut self, person_id: PersonId) -> Result<(), Self::Error> {
        Self::delete_person(self, person_id)
    }

    fn list_absences(&mut self) -> Result<Vec<Absence>, Self::Error> {
        Self::list_absences(self)
    }

    fn upsert_absence(&mut self, absence: &Absence) -> Result<Absence, Self::Error> {
        self.save_absence(absence)
    }

    fn delete_absence(&mut self, absence_id: AbsenceId) -> Result<(), Self::Error> {
        Self::delete_absence(self, absence_id)
    }

    fn delete_absences_for_person(&mut self, person_id: PersonId) -> Result<usize, Self::Error> {
        debug!(person_id = person_id.value(), "Deleting absences for person");
        mutations::delete_absences_for_person(&mut self.conn, person_id.value())
    }
}
