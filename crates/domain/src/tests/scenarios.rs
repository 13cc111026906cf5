// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end checks over the validator, aggregator and filter.

use crate::{
    Absence, AbsenceFilter, AbsenceId, AbsenceMatch, AvailabilitySnapshot, Category, DomainError,
    Person, PersonId, Rank, Reason, Shift, ValidationVerdict, calculate_availability,
    effective_shift, filter_absences, validate_absence,
};
use time::Date;
use time::macros::date;

fn person(id: i64, name: &str, rank: Rank) -> Person {
    Person::new(name.to_string(), rank, u32::try_from(id).unwrap()).with_id(PersonId::new(id))
}

fn stored(id: i64, person_id: i64, start: Date, end: Date, shift: Shift) -> Absence {
    Absence::new(PersonId::new(person_id), Reason::Ferias, start, end, shift)
        .with_id(AbsenceId::new(id))
}

#[test]
fn test_graduado_saturation_warns_without_blocking() {
    let roster: Vec<Person> = vec![
        person(1, "Silva", Rank::Suboficial),
        person(2, "Souza", Rank::PrimeiroSargento),
        person(3, "Costa", Rank::SegundoSargento),
    ];
    let existing: Vec<Absence> = vec![
        stored(1, 1, date!(2024 - 01 - 10), date!(2024 - 01 - 12), Shift::Integral),
        stored(2, 2, date!(2024 - 01 - 10), date!(2024 - 01 - 12), Shift::Integral),
    ];
    let candidate: Absence = Absence::new(
        PersonId::new(3),
        Reason::Missao,
        date!(2024 - 01 - 11),
        date!(2024 - 01 - 11),
        Shift::Integral,
    );

    let verdict: ValidationVerdict = validate_absence(&candidate, &existing, &roster, None);

    assert_eq!(verdict.error, None);
    assert_eq!(verdict.warnings.len(), 1);
    assert!(verdict.warnings[0].contains("2024-01-11"));
    let mut names: Vec<&str> = verdict
        .conflicting_absences
        .iter()
        .map(|c| c.person_name.as_str())
        .collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Silva", "Souza"]);
}

#[test]
fn test_half_shift_overlap_scenarios() {
    let roster: Vec<Person> = vec![person(1, "Silva", Rank::Cabo)];
    let existing: Vec<Absence> = vec![stored(
        1,
        1,
        date!(2024 - 02 - 01),
        date!(2024 - 02 - 05),
        Shift::Matutino,
    )];

    let afternoon: Absence = Absence::new(
        PersonId::new(1),
        Reason::Servico,
        date!(2024 - 02 - 03),
        date!(2024 - 02 - 03),
        Shift::Vespertino,
    );
    let verdict: ValidationVerdict = validate_absence(&afternoon, &existing, &roster, None);
    assert_eq!(verdict.error, None);

    let full_day: Absence = Absence::new(
        PersonId::new(1),
        Reason::Servico,
        date!(2024 - 02 - 03),
        date!(2024 - 02 - 03),
        Shift::Integral,
    );
    let verdict: ValidationVerdict = validate_absence(&full_day, &existing, &roster, None);
    assert_eq!(
        verdict.error,
        Some(DomainError::OverlappingAbsence {
            person_name: String::from("Silva"),
            date: date!(2024 - 02 - 03),
        })
    );
}

#[test]
fn test_disjoint_ranges_never_overlap() {
    let roster: Vec<Person> = vec![person(1, "Silva", Rank::Suboficial)];
    let existing: Vec<Absence> = vec![stored(
        1,
        1,
        date!(2024 - 01 - 01),
        date!(2024 - 01 - 09),
        Shift::Integral,
    )];
    for (start, end) in [
        (date!(2024 - 01 - 10), date!(2024 - 01 - 10)),
        (date!(2023 - 12 - 01), date!(2023 - 12 - 31)),
        (date!(2024 - 01 - 10), date!(2024 - 03 - 01)),
    ] {
        let candidate: Absence =
            Absence::new(PersonId::new(1), Reason::Ferias, start, end, Shift::Integral);
        let verdict: ValidationVerdict = validate_absence(&candidate, &existing, &roster, None);
        assert!(
            !matches!(verdict.error, Some(DomainError::OverlappingAbsence { .. })),
            "unexpected overlap for {start}..{end}"
        );
    }
}

#[test]
fn test_editing_never_conflicts_with_itself() {
    let roster: Vec<Person> = vec![person(1, "Silva", Rank::Suboficial)];
    let original: Absence = stored(
        4,
        1,
        date!(2024 - 01 - 10),
        date!(2024 - 01 - 20),
        Shift::Integral,
    );
    let mut edited: Absence = original.clone();
    edited.end_date = date!(2024 - 01 - 25);

    let verdict: ValidationVerdict = validate_absence(
        &edited,
        std::slice::from_ref(&original),
        &roster,
        original.absence_id,
    );
    assert!(verdict.is_clean());
}

#[test]
fn test_effective_shift_property() {
    let mut absence: Absence = stored(
        1,
        1,
        date!(2024 - 05 - 01),
        date!(2024 - 05 - 31),
        Shift::Vespertino,
    );
    absence
        .set_exception(date!(2024 - 05 - 15), Shift::Integral)
        .unwrap();

    for date in absence.range().unwrap().days() {
        let expected: Shift = if date == date!(2024 - 05 - 15) {
            Shift::Integral
        } else {
            Shift::Vespertino
        };
        assert_eq!(effective_shift(&absence, date), expected);
    }
}

#[test]
fn test_inactive_absence_leaves_availability_unchanged() {
    let mut inactive: Person = person(2, "Souza", Rank::Cabo);
    inactive.active = false;
    let roster: Vec<Person> = vec![person(1, "Silva", Rank::Cabo), inactive];

    let before: AvailabilitySnapshot =
        calculate_availability(&roster, &[], date!(2024 - 01 - 10), Some(Shift::Matutino));
    let after: AvailabilitySnapshot = calculate_availability(
        &roster,
        &[stored(1, 2, date!(2024 - 01 - 01), date!(2024 - 01 - 31), Shift::Integral)],
        date!(2024 - 01 - 10),
        Some(Shift::Matutino),
    );

    assert_eq!(before, after);
    assert_eq!(after.get(Category::CaboSoldado).map(|c| c.total), Some(1));
}

#[test]
fn test_category_filter_with_open_start() {
    let roster: Vec<Person> = vec![
        person(1, "Silva", Rank::Suboficial),
        person(2, "Souza", Rank::TerceiroSargento),
        person(3, "Lima", Rank::SoldadoPrimeira),
    ];
    let absences: Vec<Absence> = vec![
        stored(1, 1, date!(2023 - 12 - 01), date!(2023 - 12 - 31), Shift::Integral),
        stored(2, 1, date!(2024 - 01 - 05), date!(2024 - 01 - 06), Shift::Integral),
        stored(3, 2, date!(2023 - 12 - 30), date!(2024 - 01 - 01), Shift::Integral),
        stored(4, 3, date!(2024 - 01 - 10), date!(2024 - 01 - 11), Shift::Integral),
    ];
    let filter: AbsenceFilter = AbsenceFilter {
        category: Some(Category::Graduado),
        start: Some(date!(2024 - 01 - 01)),
        ..AbsenceFilter::default()
    };

    let result: Vec<AbsenceMatch> = filter_absences(&absences, &roster, &filter);

    let ids: Vec<Option<AbsenceId>> = result.iter().map(|m| m.absence.absence_id).collect();
    assert_eq!(ids, vec![Some(AbsenceId::new(2)), Some(AbsenceId::new(3))]);
    assert!(
        result
            .iter()
            .all(|m| m.person.category() == Category::Graduado
                && m.absence.end_date >= date!(2024 - 01 - 01))
    );
}

#[test]
fn test_multi_day_saturation_lists_each_record_once() {
    let roster: Vec<Person> = vec![
        person(1, "Lima", Rank::Cabo),
        person(2, "Alves", Rank::SoldadoSegunda),
    ];
    let existing: Vec<Absence> = vec![stored(
        1,
        1,
        date!(2024 - 01 - 01),
        date!(2024 - 01 - 05),
        Shift::Integral,
    )];
    let candidate: Absence = Absence::new(
        PersonId::new(2),
        Reason::DispensaMedica,
        date!(2024 - 01 - 02),
        date!(2024 - 01 - 04),
        Shift::Integral,
    );

    let verdict: ValidationVerdict = validate_absence(&candidate, &existing, &roster, None);

    assert_eq!(verdict.error, None);
    assert_eq!(verdict.warnings.len(), 1);
    assert!(
        verdict.warnings[0].contains("2024-01-02, 2024-01-03, 2024-01-04"),
        "unexpected warning: {}",
        verdict.warnings[0]
    );
    assert!(!verdict.warnings[0].contains("2024-01-01"));
    assert!(!verdict.warnings[0].contains("2024-01-05"));
    assert_eq!(verdict.conflicting_absences.len(), 1);
    assert_eq!(verdict.conflicting_absences[0].person_name, "Lima");
    assert_eq!(
        verdict.conflicting_absences[0].start_date,
        date!(2024 - 01 - 01)
    );

    let again: ValidationVerdict = validate_absence(&candidate, &existing, &roster, None);
    assert_eq!(again, verdict);
}
