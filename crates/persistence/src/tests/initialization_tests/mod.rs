// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use crate::tests::{create_test_persistence, create_test_person};
use crate::{Persistence, PersistenceError};
use efetivo_domain::Rank;

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1: Persistence = create_test_persistence();
    let mut db2: Persistence = create_test_persistence();

    create_test_person(&mut db1, "Silva", Rank::Suboficial);

    assert_eq!(db1.list_people().unwrap().len(), 1);
    assert!(db2.list_people().unwrap().is_empty());
}

#[test]
fn test_file_database_survives_reopen() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "efetivo_reopen_{}.sqlite3",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    {
        let mut persistence: Persistence = Persistence::new_with_file(&path).unwrap();
        create_test_person(&mut persistence, "Silva", Rank::Suboficial);
    }

    let mut reopened: Persistence = Persistence::new_with_file(&path).unwrap();
    let people: Vec<efetivo_domain::Person> = reopened.list_people().unwrap();
    assert_eq!(people.len(), 1);
    assert_eq!(people[0].name, "Silva");

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
