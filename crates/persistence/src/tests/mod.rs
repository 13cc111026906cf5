// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::Persistence;
use efetivo_domain::{Absence, Person, PersonId, Rank, Reason, Shift};
use time::Date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn create_test_person(persistence: &mut Persistence, name: &str, rank: Rank) -> Person {
    let order: u32 = u32::try_from(persistence.list_people().unwrap().len()).unwrap() + 1;
    persistence
        .save_person(&Person::new(String::from(name), rank, order))
        .unwrap()
}

pub fn create_test_absence(person_id: PersonId, start: Date, end: Date, shift: Shift) -> Absence {
    Absence::new(person_id, Reason::Ferias, start, end, shift)
}
