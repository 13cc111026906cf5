// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::State;
use efetivo_domain::{Absence, AbsenceId, Person, PersonId, Rank, Reason, Shift};
use time::Date;
use time::macros::date;

pub fn create_test_person(id: i64, name: &str, rank: Rank) -> Person {
    Person::new(String::from(name), rank, u32::try_from(id).unwrap()).with_id(PersonId::new(id))
}

pub fn create_test_absence(id: i64, person_id: i64, start: Date, end: Date) -> Absence {
    Absence::new(
        PersonId::new(person_id),
        Reason::Ferias,
        start,
        end,
        Shift::Integral,
    )
    .with_id(AbsenceId::new(id))
}

/// Three GRADUADO and two CABO_SOLDADO, two GRADUADO away 2024-01-10..12.
pub fn create_test_state() -> State {
    State::new(
        vec![
            create_test_person(1, "Silva", Rank::Suboficial),
            create_test_person(2, "Souza", Rank::PrimeiroSargento),
            create_test_person(3, "Costa", Rank::SegundoSargento),
            create_test_person(4, "Lima", Rank::Cabo),
            create_test_person(5, "Alves", Rank::SoldadoPrimeira),
        ],
        vec![
            create_test_absence(1, 1, date!(2024 - 01 - 10), date!(2024 - 01 - 12)),
            create_test_absence(2, 2, date!(2024 - 01 - 10), date!(2024 - 01 - 12)),
        ],
    )
}
