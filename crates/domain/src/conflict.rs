// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Absence conflict and understaffing checks.
//!
//! Validation never fails with `Err`. Structural problems and double
//! bookings come back as the verdict's `error`; understaffing comes back as
//! advisory warnings that a caller may choose to confirm.

use crate::calendar::{DateRange, format_iso_date, iso_date};
use crate::error::DomainError;
use crate::shift::effective_shift;
use crate::types::{Absence, AbsenceId, Category, Person, PersonId, Rank, Reason, Shift};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use time::Date;

/// An existing absence that contributes to an understaffing warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingAbsence {
    /// The absent person.
    pub person_id: PersonId,
    /// The absent person's display name.
    pub person_name: String,
    /// The absent person's rank.
    pub rank: Rank,
    /// The reason recorded on the absence.
    pub reason: Reason,
    /// First day of the absence.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the absence.
    #[serde(with = "iso_date")]
    pub end_date: Date,
}

/// Outcome of validating a candidate absence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationVerdict {
    /// A blocking error. When present, warnings are not computed.
    pub error: Option<DomainError>,
    /// Advisory messages that require confirmation before saving.
    pub warnings: Vec<String>,
    /// The absences that caused the warnings.
    pub conflicting_absences: Vec<ConflictingAbsence>,
}

impl ValidationVerdict {
    const fn blocked(error: DomainError) -> Self {
        Self {
            error: Some(error),
            warnings: Vec::new(),
            conflicting_absences: Vec::new(),
        }
    }

    /// No error and no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.error.is_none() && self.warnings.is_empty()
    }

    /// The candidate must not be saved.
    #[must_use]
    pub const fn blocks_save(&self) -> bool {
        self.error.is_some()
    }

    /// The candidate may be saved only after the warnings are confirmed.
    #[must_use]
    pub fn requires_confirmation(&self) -> bool {
        self.error.is_none() && !self.warnings.is_empty()
    }
}

/// Validates a new or edited absence against the existing records.
///
/// # Arguments
///
/// * `candidate` - The absence about to be saved
/// * `existing` - Every stored absence
/// * `roster` - Every known person
/// * `exclude_id` - The stored id of the absence being edited, so it is
///   not compared with itself
///
/// # Returns
///
/// A verdict. Checks run in order and stop at the first error:
///
/// 1. The range must not be reversed
/// 2. The person must exist in the roster
/// 3. The person must not already be away on a colliding shift on any shared day
/// 4. Understaffing in the person's category produces warnings
#[must_use]
pub fn validate_absence(
    candidate: &Absence,
    existing: &[Absence],
    roster: &[Person],
    exclude_id: Option<AbsenceId>,
) -> ValidationVerdict {
    // Rule: end date must not precede start date
    let range: DateRange = match candidate.range() {
        Ok(range) => range,
        Err(e) => return ValidationVerdict::blocked(e),
    };

    // Rule: the person must exist
    let Some(person) = roster
        .iter()
        .find(|person| person.person_id == Some(candidate.person_id))
    else {
        return ValidationVerdict::blocked(DomainError::UnknownPerson(candidate.person_id));
    };

    let others: Vec<&Absence> = existing
        .iter()
        .filter(|absence| exclude_id.is_none_or(|id| absence.absence_id != Some(id)))
        .collect();

    // Rule: a person cannot be away twice on the same shift
    if let Some(date) = first_double_booking(candidate, range, &others) {
        return ValidationVerdict::blocked(DomainError::OverlappingAbsence {
            person_name: person.name.clone(),
            date,
        });
    }

    saturation_warnings(candidate, range, person.category(), &others, roster)
}

fn first_double_booking(candidate: &Absence, range: DateRange, others: &[&Absence]) -> Option<Date> {
    others
        .iter()
        .filter(|absence| absence.person_id == candidate.person_id)
        // Rule: the first conflicting record in store order wins
        .find_map(|absence| {
            let shared: DateRange = absence.range().ok()?.intersection(&range)?;
            shared.days().find(|date| {
                let theirs: Shift = effective_shift(absence, *date);
                let ours: Shift = effective_shift(candidate, *date);
                ours.conflicts_with(theirs)
            })
        })
}

fn saturation_warnings(
    candidate: &Absence,
    range: DateRange,
    category: Category,
    others: &[&Absence],
    roster: &[Person],
) -> ValidationVerdict {
    let peers: HashMap<PersonId, &Person> = roster
        .iter()
        .filter(|person| person.active && person.category() == category)
        .filter_map(|person| person.person_id.map(|id| (id, person)))
        .filter(|(id, _)| *id != candidate.person_id)
        .collect();

    let peer_absences: Vec<(&Absence, &Person)> = others
        .iter()
        .filter_map(|absence| {
            peers
                .get(&absence.person_id)
                .map(|person| (*absence, *person))
        })
        .collect();

    let ceiling: usize = category.warning_ceiling();
    let mut excess_dates: Vec<Date> = Vec::new();
    let mut conflicting: Vec<ConflictingAbsence> = Vec::new();
    let mut seen: HashSet<(PersonId, Date)> = HashSet::new();

    for date in range.days() {
        let active_that_day: Vec<&(&Absence, &Person)> = peer_absences
            .iter()
            .filter(|(absence, _)| absence.is_active_on(date))
            .collect();
        let distinct_people: usize = active_that_day
            .iter()
            .map(|(absence, _)| absence.person_id)
            .collect::<HashSet<PersonId>>()
            .len();

        // Rule: the candidate itself is the +1
        if distinct_people + 1 < ceiling {
            continue;
        }
        excess_dates.push(date);

        for (absence, person) in active_that_day {
            if seen.insert((absence.person_id, absence.start_date)) {
                conflicting.push(ConflictingAbsence {
                    person_id: absence.person_id,
                    person_name: person.name.clone(),
                    rank: person.rank,
                    reason: absence.reason,
                    start_date: absence.start_date,
                    end_date: absence.end_date,
                });
            }
        }
    }

    if excess_dates.is_empty() {
        return ValidationVerdict::default();
    }

    let dates: Vec<String> = excess_dates.into_iter().map(format_iso_date).collect();
    let warning: String = format!(
        "This absence reaches the recommended ceiling of {ceiling} simultaneous {category} absences on {}",
        dates.join(", ")
    );

    ValidationVerdict {
        error: None,
        warnings: vec![warning],
        conflicting_absences: conflicting,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use time::macros::date;

    fn person(id: i64, name: &str, rank: Rank) -> Person {
        Person::new(name.to_string(), rank, u32::try_from(id).unwrap()).with_id(PersonId::new(id))
    }

    fn absence(id: i64, person_id: i64, start: Date, end: Date, shift: Shift) -> Absence {
        Absence::new(PersonId::new(person_id), Reason::Ferias, start, end, shift)
            .with_id(AbsenceId::new(id))
    }

    fn candidate(person_id: i64, start: Date, end: Date, shift: Shift) -> Absence {
        Absence::new(PersonId::new(person_id), Reason::Missao, start, end, shift)
    }

    #[test]
    fn test_reversed_range_blocks() {
        let roster: Vec<Person> = vec![person(1, "Silva", Rank::Suboficial)];
        let verdict: ValidationVerdict = validate_absence(
            &candidate(1, date!(2024 - 01 - 12), date!(2024 - 01 - 10), Shift::Integral),
            &[],
            &roster,
            None,
        );
        assert!(matches!(verdict.error, Some(DomainError::InvalidRange { .. })));
        assert!(verdict.blocks_save());
    }

    #[test]
    fn test_unknown_person_blocks() {
        let verdict: ValidationVerdict = validate_absence(
            &candidate(99, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral),
            &[],
            &[],
            None,
        );
        assert_eq!(verdict.error, Some(DomainError::UnknownPerson(PersonId::new(99))));
    }

    #[test]
    fn test_first_overlapping_date_is_reported() {
        let roster: Vec<Person> = vec![person(1, "Silva", Rank::Suboficial)];
        let existing: Vec<Absence> = vec![absence(
            1,
            1,
            date!(2024 - 01 - 05),
            date!(2024 - 01 - 20),
            Shift::Integral,
        )];
        let verdict: ValidationVerdict = validate_absence(
            &candidate(1, date!(2024 - 01 - 10), date!(2024 - 01 - 25), Shift::Integral),
            &existing,
            &roster,
            None,
        );
        assert_eq!(
            verdict.error,
            Some(DomainError::OverlappingAbsence {
                person_name: String::from("Silva"),
                date: date!(2024 - 01 - 10),
            })
        );
    }

    #[test]
    fn test_first_conflicting_record_wins() {
        let roster: Vec<Person> = vec![person(1, "Silva", Rank::Suboficial)];
        let mut morning: Absence = absence(
            1,
            1,
            date!(2024 - 01 - 01),
            date!(2024 - 01 - 20),
            Shift::Matutino,
        );
        morning
            .set_exception(date!(2024 - 01 - 15), Shift::Integral)
            .unwrap();
        let existing: Vec<Absence> = vec![
            morning,
            absence(
                2,
                1,
                date!(2024 - 01 - 10),
                date!(2024 - 01 - 10),
                Shift::Vespertino,
            ),
        ];

        let verdict: ValidationVerdict = validate_absence(
            &candidate(1, date!(2024 - 01 - 05), date!(2024 - 01 - 20), Shift::Vespertino),
            &existing,
            &roster,
            None,
        );
        assert_eq!(
            verdict.error,
            Some(DomainError::OverlappingAbsence {
                person_name: String::from("Silva"),
                date: date!(2024 - 01 - 15),
            })
        );
    }

    #[test]
    fn test_other_people_never_double_book() {
        let roster: Vec<Person> = vec![
            person(1, "Silva", Rank::Cabo),
            person(2, "Souza", Rank::SegundoSargento),
        ];
        let existing: Vec<Absence> = vec![absence(
            1,
            2,
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 10),
            Shift::Integral,
        )];
        let verdict: ValidationVerdict = validate_absence(
            &candidate(1, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral),
            &existing,
            &roster,
            None,
        );
        assert!(verdict.is_clean());
    }

    #[test]
    fn test_exception_avoids_collision() {
        let roster: Vec<Person> = vec![person(1, "Silva", Rank::Suboficial)];
        let existing: Vec<Absence> = vec![absence(
            1,
            1,
            date!(2024 - 02 - 03),
            date!(2024 - 02 - 03),
            Shift::Matutino,
        )];
        let mut new_absence: Absence =
            candidate(1, date!(2024 - 02 - 02), date!(2024 - 02 - 04), Shift::Integral);
        new_absence
            .set_exception(date!(2024 - 02 - 03), Shift::Vespertino)
            .unwrap();

        let verdict: ValidationVerdict = validate_absence(&new_absence, &existing, &roster, None);
        assert!(verdict.error.is_none());
    }

    #[test]
    fn test_saturation_below_ceiling_is_clean() {
        let roster: Vec<Person> = vec![
            person(1, "Silva", Rank::Suboficial),
            person(2, "Souza", Rank::PrimeiroSargento),
            person(3, "Costa", Rank::TerceiroSargento),
        ];
        let existing: Vec<Absence> = vec![absence(
            1,
            1,
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 12),
            Shift::Integral,
        )];
        let verdict: ValidationVerdict = validate_absence(
            &candidate(3, date!(2024 - 01 - 11), date!(2024 - 01 - 11), Shift::Integral),
            &existing,
            &roster,
            None,
        );
        assert!(verdict.is_clean());
    }

    #[test]
    fn test_cabo_soldado_ceiling_is_two() {
        let roster: Vec<Person> = vec![
            person(1, "Lima", Rank::Cabo),
            person(2, "Alves", Rank::SoldadoSegunda),
        ];
        let existing: Vec<Absence> = vec![absence(
            1,
            1,
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 10),
            Shift::Matutino,
        )];
        let verdict: ValidationVerdict = validate_absence(
            &candidate(2, date!(2024 - 01 - 09), date!(2024 - 01 - 10), Shift::Integral),
            &existing,
            &roster,
            None,
        );
        assert!(verdict.requires_confirmation());
        assert_eq!(verdict.warnings.len(), 1);
        assert!(verdict.warnings[0].contains("2024-01-10"));
        assert!(!verdict.warnings[0].contains("2024-01-09"));
        assert_eq!(verdict.conflicting_absences.len(), 1);
        assert_eq!(verdict.conflicting_absences[0].person_name, "Lima");
    }

    #[test]
    fn test_split_records_count_one_person_once() {
        let roster: Vec<Person> = vec![
            person(1, "Silva", Rank::Suboficial),
            person(2, "Costa", Rank::TerceiroSargento),
        ];
        let existing: Vec<Absence> = vec![
            absence(1, 1, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Matutino),
            absence(2, 1, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Vespertino),
        ];
        let verdict: ValidationVerdict = validate_absence(
            &candidate(2, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral),
            &existing,
            &roster,
            None,
        );
        assert!(verdict.is_clean());
    }

    #[test]
    fn test_inactive_and_other_category_absences_ignored() {
        let mut inactive: Person = person(2, "Souza", Rank::PrimeiroSargento);
        inactive.active = false;
        let roster: Vec<Person> = vec![
            person(1, "Silva", Rank::Suboficial),
            inactive,
            person(3, "Lima", Rank::Cabo),
            person(4, "Costa", Rank::TerceiroSargento),
        ];
        let existing: Vec<Absence> = vec![
            absence(1, 1, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral),
            absence(2, 2, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral),
            absence(3, 3, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral),
        ];
        let verdict: ValidationVerdict = validate_absence(
            &candidate(4, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral),
            &existing,
            &roster,
            None,
        );
        assert!(verdict.is_clean());
    }

    #[test]
    fn test_excluded_record_is_not_counted() {
        let roster: Vec<Person> = vec![
            person(1, "Lima", Rank::Cabo),
            person(2, "Alves", Rank::SoldadoSegunda),
        ];
        let existing: Vec<Absence> = vec![absence(
            7,
            1,
            date!(2024 - 01 - 10),
            date!(2024 - 01 - 10),
            Shift::Integral,
        )];
        let edited: Absence = absence(7, 2, date!(2024 - 01 - 10), date!(2024 - 01 - 10), Shift::Integral);
        let verdict: ValidationVerdict =
            validate_absence(&edited, &existing, &roster, Some(AbsenceId::new(7)));
        assert!(verdict.is_clean());
    }
}
