// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use efetivo::InMemoryStore;

use crate::tests::helpers::{
    absence_request, create_test_encarregado, create_test_funcionario, seed_absence, seed_person,
};
use crate::{
    AbsenceResponse, ApiError, AuthError, AuthenticatedActor, AuthorizationService,
    CreatePersonRequest, InputError, PersonInfo, PersonResponse, Role, SetPersonActiveRequest,
    create_absence, create_person, delete_absence, delete_person, list_people, set_person_active,
};

#[test]
fn test_encarregado_may_write() {
    let actor: AuthenticatedActor = create_test_encarregado();
    assert!(AuthorizationService::authorize_write(&actor, "create_person").is_ok());
}

#[test]
fn test_funcionario_may_not_write() {
    let actor: AuthenticatedActor = create_test_funcionario();
    let result: Result<(), AuthError> =
        AuthorizationService::authorize_write(&actor, "delete_absence");

    assert_eq!(
        result,
        Err(AuthError::Unauthorized {
            action: String::from("delete_absence"),
            required_role: String::from("encarregado"),
        })
    );
}

#[test]
fn test_role_parsing() {
    assert_eq!("Encarregado".parse::<Role>(), Ok(Role::Encarregado));
    assert_eq!(" funcionario ".parse::<Role>(), Ok(Role::Funcionario));
    assert_eq!(
        "admin".parse::<Role>(),
        Err(InputError::UnknownRole(String::from("admin")))
    );
}

#[test]
fn test_actor_from_claims() {
    let actor: AuthenticatedActor =
        AuthenticatedActor::from_claims("enc-001", "encarregado").unwrap();
    assert_eq!(actor, create_test_encarregado());

    assert_eq!(
        AuthenticatedActor::from_claims("  ", "encarregado"),
        Err(InputError::MissingField("actor_id"))
    );
}

#[test]
fn test_funcionario_writes_change_nothing() {
    let mut store: InMemoryStore = InMemoryStore::new();
    let person_id: i64 = seed_person(&mut store, "Silva", "SO");
    let absence_id: i64 =
        seed_absence(&mut store, person_id, "2024-03-01", "2024-03-02", "INTEGRAL")
            .absence
            .absence_id;
    let reader: AuthenticatedActor = create_test_funcionario();

    let created: Result<PersonResponse, ApiError> = create_person(
        &mut store,
        CreatePersonRequest {
            name: String::from("Lima"),
            rank: String::from("CB"),
            seniority_order: None,
        },
        &reader,
    );
    assert!(matches!(created, Err(ApiError::Unauthorized { .. })));

    let deactivated: Result<PersonResponse, ApiError> = set_person_active(
        &mut store,
        person_id,
        SetPersonActiveRequest { active: false },
        &reader,
    );
    assert!(matches!(deactivated, Err(ApiError::Unauthorized { .. })));

    let absence: Result<AbsenceResponse, ApiError> = create_absence(
        &mut store,
        &absence_request(person_id, "2024-04-01", "2024-04-01", "MATUTINO"),
        &reader,
    );
    assert!(matches!(absence, Err(ApiError::Unauthorized { .. })));

    assert!(matches!(
        delete_absence(&mut store, absence_id, &reader),
        Err(ApiError::Unauthorized { .. })
    ));
    assert!(matches!(
        delete_person(&mut store, person_id, &reader),
        Err(ApiError::Unauthorized { .. })
    ));

    let people: Vec<PersonInfo> = list_people(&mut store).unwrap().people;
    assert_eq!(people.len(), 1);
    assert!(people[0].active);
}
