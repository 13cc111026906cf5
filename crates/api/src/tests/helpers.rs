// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use efetivo::InMemoryStore;

use crate::{
    AbsenceRequest, AbsenceResponse, AuthenticatedActor, CreatePersonRequest, Role,
    create_absence, create_person,
};

pub fn create_test_encarregado() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("enc-001"), Role::Encarregado)
}

pub fn create_test_funcionario() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("func-002"), Role::Funcionario)
}

pub fn seed_person(store: &mut InMemoryStore, name: &str, rank: &str) -> i64 {
    create_person(
        store,
        CreatePersonRequest {
            name: String::from(name),
            rank: String::from(rank),
            seniority_order: None,
        },
        &create_test_encarregado(),
    )
    .unwrap()
    .person
    .person_id
}

pub fn absence_request(person_id: i64, start: &str, end: &str, shift: &str) -> AbsenceRequest {
    AbsenceRequest {
        person_id,
        reason: String::from("FERIAS"),
        start_date: String::from(start),
        end_date: String::from(end),
        default_shift: String::from(shift),
        exceptions: Vec::new(),
        note: None,
        confirm_warnings: false,
    }
}

pub fn seed_absence(
    store: &mut InMemoryStore,
    person_id: i64,
    start: &str,
    end: &str,
    shift: &str,
) -> AbsenceResponse {
    let mut request: AbsenceRequest = absence_request(person_id, start, end, shift);
    request.confirm_warnings = true;
    create_absence(store, &request, &create_test_encarregado()).unwrap()
}

/// Three `GRADUADO` people, two of them away all day 2024-01-10..12.
pub fn create_saturated_store() -> (InMemoryStore, [i64; 3]) {
    let mut store: InMemoryStore = InMemoryStore::new();
    let silva: i64 = seed_person(&mut store, "Silva", "SO");
    let souza: i64 = seed_person(&mut store, "Souza", "1S");
    let costa: i64 = seed_person(&mut store, "Costa", "2S");
    seed_absence(&mut store, silva, "2024-01-10", "2024-01-12", "INTEGRAL");
    seed_absence(&mut store, souza, "2024-01-10", "2024-01-12", "INTEGRAL");
    (store, [silva, souza, costa])
}
