// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use efetivo::CoreError;
use efetivo_domain::{ConflictingAbsence, DomainError, PersonId, Rank, Reason, format_iso_date};
use time::macros::date;

use crate::{ApiError, InputError, translate_core_error, translate_domain_error};

#[test]
fn test_field_errors_become_invalid_input() {
    let cases: Vec<(DomainError, &str)> = vec![
        (
            DomainError::InvalidRange {
                start: date!(2024 - 02 - 05),
                end: date!(2024 - 02 - 01),
            },
            "end_date",
        ),
        (DomainError::InvalidName(String::from("blank")), "name"),
        (DomainError::NoteTooLong { length: 250, max: 200 }, "note"),
        (
            DomainError::DuplicateException {
                date: date!(2024 - 02 - 02),
            },
            "exceptions",
        ),
        (DomainError::InvalidRank(String::from("CAP")), "rank"),
        (DomainError::InvalidReason(String::from("X")), "reason"),
    ];

    for (err, expected_field) in cases {
        match translate_domain_error(err) {
            ApiError::InvalidInput { field, .. } => assert_eq!(field, expected_field),
            other => panic!("expected InvalidInput for {expected_field}, got {other:?}"),
        }
    }
}

#[test]
fn test_missing_records_become_not_found() {
    let err: ApiError = translate_domain_error(DomainError::UnknownPerson(PersonId::new(9)));
    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Person"),
            message: String::from("Person 9 does not exist in the roster"),
        }
    );
}

#[test]
fn test_overlap_is_a_rule_violation() {
    let err: ApiError = translate_domain_error(DomainError::OverlappingAbsence {
        person_name: String::from("Silva"),
        date: date!(2024 - 02 - 03),
    });
    assert_eq!(
        err.to_string(),
        "Domain rule violation (no_overlapping_absence): Conflicting absence for Silva on 2024-02-03"
    );
}

#[test]
fn test_core_errors_translate() {
    let conflict: ConflictingAbsence = ConflictingAbsence {
        person_id: PersonId::new(1),
        person_name: String::from("Silva"),
        rank: Rank::Suboficial,
        reason: Reason::Ferias,
        start_date: date!(2024 - 01 - 10),
        end_date: date!(2024 - 01 - 12),
    };
    let translated: ApiError = translate_core_error(CoreError::ConfirmationRequired {
        warnings: vec![String::from("too many")],
        conflicting_absences: vec![conflict],
    });
    match translated {
        ApiError::ConfirmationRequired {
            warnings,
            conflicting_absences,
        } => {
            assert_eq!(warnings, vec!["too many"]);
            assert_eq!(conflicting_absences[0].rank, "SO");
            assert_eq!(conflicting_absences[0].reason, "Férias");
            assert_eq!(
                conflicting_absences[0].end_date,
                format_iso_date(date!(2024 - 01 - 12))
            );
        }
        other => panic!("expected ConfirmationRequired, got {other:?}"),
    }

    assert_eq!(
        translate_core_error(CoreError::Store(String::from("disk full"))),
        ApiError::Internal {
            message: String::from("disk full"),
        }
    );
}

#[test]
fn test_input_errors_name_their_field() {
    let err: InputError = InputError::InvalidDate {
        field: "start_date",
        value: String::from("ontem"),
    };
    assert_eq!(err.field(), "start_date");
    assert_eq!(
        err.to_string(),
        "Field 'start_date' is not a YYYY-MM-DD date: 'ontem'"
    );

    let api: ApiError = InputError::UnknownRole(String::from("root")).into();
    assert_eq!(
        api,
        ApiError::InvalidInput {
            field: String::from("actor_role"),
            message: String::from("Unknown role 'root'"),
        }
    );
}
