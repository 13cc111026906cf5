// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Absence, AbsenceId, Category, DomainError, Person, PersonId, Rank, Reason, Shift,
    ShiftException,
};
use std::str::FromStr;
use time::macros::date;

#[test]
fn test_rank_ordering_follows_seniority() {
    let mut ranks: Vec<Rank> = Rank::ALL.to_vec();
    ranks.sort();
    assert_eq!(
        ranks,
        vec![
            Rank::SoldadoSegunda,
            Rank::SoldadoPrimeira,
            Rank::Cabo,
            Rank::TerceiroSargento,
            Rank::SegundoSargento,
            Rank::PrimeiroSargento,
            Rank::Suboficial,
        ]
    );
    assert!(Rank::Suboficial > Rank::PrimeiroSargento);
    assert!(Rank::TerceiroSargento > Rank::Cabo);
}

#[test]
fn test_category_is_derived_from_rank() {
    for rank in [
        Rank::Suboficial,
        Rank::PrimeiroSargento,
        Rank::SegundoSargento,
        Rank::TerceiroSargento,
    ] {
        assert_eq!(rank.category(), Category::Graduado);
    }
    for rank in [Rank::Cabo, Rank::SoldadoPrimeira, Rank::SoldadoSegunda] {
        assert_eq!(rank.category(), Category::CaboSoldado);
    }
}

#[test]
fn test_rank_codes_round_trip_through_from_str() {
    for rank in Rank::ALL {
        assert_eq!(Rank::from_str(rank.as_str()).unwrap(), rank);
    }
    assert_eq!(Rank::from_str(" 1s ").unwrap(), Rank::PrimeiroSargento);
    assert_eq!(
        Rank::from_str("CAP"),
        Err(DomainError::InvalidRank(String::from("CAP")))
    );
}

#[test]
fn test_reason_accepts_code_and_label() {
    assert_eq!(Reason::from_str("DISPENSA_MEDICA").unwrap(), Reason::DispensaMedica);
    assert_eq!(Reason::from_str("Dispensa Médica").unwrap(), Reason::DispensaMedica);
    assert_eq!(Reason::from_str("férias").unwrap(), Reason::Ferias);
    assert!(Reason::from_str("Folga").is_err());
    assert_eq!(Reason::ALL.len(), 13);
}

#[test]
fn test_serde_uses_wire_codes() {
    assert_eq!(serde_json::to_string(&Rank::PrimeiroSargento).unwrap(), "\"1S\"");
    assert_eq!(
        serde_json::to_string(&Category::CaboSoldado).unwrap(),
        "\"CABO_SOLDADO\""
    );
    assert_eq!(
        serde_json::to_string(&Reason::LicencaNupcias).unwrap(),
        "\"LICENCA_NUPCIAS\""
    );
    assert_eq!(serde_json::to_string(&Shift::Integral).unwrap(), "\"INTEGRAL\"");
    let reason: Reason = serde_json::from_str("\"DISPENSADO_PELA_CHEFIA\"").unwrap();
    assert_eq!(reason, Reason::DispensadoPelaChefia);
}

#[test]
fn test_person_new_is_active_without_id() {
    let person: Person = Person::new(String::from("Silva"), Rank::Cabo, 4);
    assert!(person.active);
    assert_eq!(person.person_id, None);
    assert_eq!(person.category(), Category::CaboSoldado);
    assert_eq!(
        person.with_id(PersonId::new(9)).person_id,
        Some(PersonId::new(9))
    );
}

#[test]
fn test_set_exception_replaces_and_sorts() {
    let mut absence: Absence = Absence::new(
        PersonId::new(1),
        Reason::Servico,
        date!(2024 - 03 - 01),
        date!(2024 - 03 - 10),
        Shift::Integral,
    );
    absence.set_exception(date!(2024 - 03 - 05), Shift::Matutino).unwrap();
    absence.set_exception(date!(2024 - 03 - 02), Shift::Vespertino).unwrap();
    absence.set_exception(date!(2024 - 03 - 05), Shift::Vespertino).unwrap();

    assert_eq!(
        absence.exceptions,
        vec![
            ShiftException::new(date!(2024 - 03 - 02), Shift::Vespertino),
            ShiftException::new(date!(2024 - 03 - 05), Shift::Vespertino),
        ]
    );
    assert!(absence.set_exception(date!(2024 - 03 - 11), Shift::Matutino).is_err());
    assert!(absence.remove_exception(date!(2024 - 03 - 02)));
    assert!(!absence.remove_exception(date!(2024 - 03 - 02)));
}

#[test]
fn test_normalize_prunes_sorts_and_dedups() {
    let mut absence: Absence = Absence::new(
        PersonId::new(1),
        Reason::Ferias,
        date!(2024 - 03 - 01),
        date!(2024 - 03 - 03),
        Shift::Matutino,
    )
    .with_id(AbsenceId::new(5));
    absence.exceptions = vec![
        ShiftException::new(date!(2024 - 03 - 03), Shift::Integral),
        ShiftException::new(date!(2024 - 02 - 28), Shift::Integral),
        ShiftException::new(date!(2024 - 03 - 01), Shift::Vespertino),
        ShiftException::new(date!(2024 - 03 - 03), Shift::Vespertino),
    ];
    absence.note = Some(String::from("   "));

    let normalized: Absence = absence.normalize();

    assert_eq!(
        normalized.exceptions,
        vec![
            ShiftException::new(date!(2024 - 03 - 01), Shift::Vespertino),
            ShiftException::new(date!(2024 - 03 - 03), Shift::Vespertino),
        ]
    );
    assert_eq!(normalized.note, None);
    assert_eq!(normalized.absence_id, Some(AbsenceId::new(5)));
}

#[test]
fn test_absence_json_shape() {
    let json: &str = r#"{
        "absence_id": null,
        "person_id": 3,
        "reason": "FERIAS",
        "start_date": "2024-01-10",
        "end_date": "2024-01-12",
        "default_shift": "INTEGRAL",
        "exceptions": [{"date": "2024-01-11", "shift": "MATUTINO"}]
    }"#;
    let absence: Absence = serde_json::from_str(json).unwrap();

    assert_eq!(absence.person_id, PersonId::new(3));
    assert_eq!(absence.start_date, date!(2024 - 01 - 10));
    assert_eq!(absence.exception_for(date!(2024 - 01 - 11)), Some(Shift::Matutino));
    assert_eq!(absence.note, None);
}
