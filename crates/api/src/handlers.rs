// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler loads a fresh snapshot from the store. Writes then run the
//! core `apply` gate and commit the resulting mutation through the same store.

use efetivo::{Command, CommitResult, Mutation, State, Store, TransitionResult, apply, commit};
use efetivo_domain::{
    Absence, AbsenceFilter, AbsenceId, AvailabilitySnapshot, Category, DailyAbsence, DateRange,
    Person, PersonId, Rank, Reason, Shift, ShiftException, ValidationVerdict, format_iso_date,
    parse_iso_date, validate_absence_fields,
};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::{Date, Duration};
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, InputError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AbsenceInfo, AbsenceRequest, AbsenceResponse, AvailabilityRequest, AvailabilityResponse,
    ConflictingAbsenceInfo, CreatePersonRequest, DailyAbsenceInfo, DailyAbsencesResponse,
    DeleteResponse, ListPeopleResponse, PersonInfo, PersonResponse, SearchAbsencesRequest,
    SearchAbsencesResponse, SetPersonActiveRequest, UpcomingAbsencesRequest,
    UpcomingAbsencesResponse, UpdatePersonRequest, ValidateAbsenceRequest,
    ValidateAbsenceResponse,
};

/// Days shown by the upcoming-absences view when the caller does not say.
pub const DEFAULT_UPCOMING_DAYS: u32 = 7;

/// Longest look-ahead window accepted by the upcoming-absences view.
pub const MAX_UPCOMING_DAYS: u32 = 366;

// ============================================================================
// Input parsing
// ============================================================================

fn parse_date(field: &'static str, value: &str) -> Result<Date, InputError> {
    parse_iso_date(value).map_err(|_| InputError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_optional_date(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Date>, InputError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_date(field, v))
        .transpose()
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T, InputError> {
    T::from_str(value).map_err(|_| InputError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_optional_field<T: FromStr>(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<T>, InputError> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| parse_field(field, v))
        .transpose()
}

/// Translates an absence request into a domain absence without an identifier.
///
/// # Errors
///
/// Returns an error if a date, reason or shift cannot be parsed.
pub fn absence_from_request(request: &AbsenceRequest) -> Result<Absence, InputError> {
    let reason: Reason = parse_field("reason", &request.reason)?;
    let start_date: Date = parse_date("start_date", &request.start_date)?;
    let end_date: Date = parse_date("end_date", &request.end_date)?;
    let default_shift: Shift = parse_field("default_shift", &request.default_shift)?;

    let mut absence: Absence = Absence::new(
        PersonId::new(request.person_id),
        reason,
        start_date,
        end_date,
        default_shift,
    );
    for exception in &request.exceptions {
        absence.exceptions.push(ShiftException::new(
            parse_date("exceptions", &exception.date)?,
            parse_field("exceptions", &exception.shift)?,
        ));
    }
    absence.note.clone_from(&request.note);
    Ok(absence)
}

// ============================================================================
// Shared plumbing
// ============================================================================

fn load<S: Store>(store: &mut S) -> Result<State, ApiError> {
    efetivo::load_state(store).map_err(translate_core_error)
}

fn execute<S: Store>(
    store: &mut S,
    actor: &AuthenticatedActor,
    command: Command,
) -> Result<CommitResult, ApiError> {
    let state: State = load(store)?;
    let command_name: &'static str = command.name();

    let transition: TransitionResult = apply(&state, command).map_err(|err| {
        debug!(command = command_name, actor = %actor.id, error = %err, "Command rejected");
        translate_core_error(err)
    })?;

    let committed: CommitResult = commit(store, &state, transition).map_err(|err| {
        warn!(command = command_name, actor = %actor.id, error = %err, "Commit failed");
        translate_core_error(err)
    })?;

    info!(
        command = command_name,
        actor = %actor.id,
        warnings = committed.warnings.len(),
        "Command committed"
    );
    Ok(committed)
}

fn unexpected_mutation(mutation: &Mutation) -> ApiError {
    ApiError::Internal {
        message: format!("Unexpected stored mutation: {mutation:?}"),
    }
}

fn stored_person(committed: &CommitResult) -> Result<&Person, ApiError> {
    match &committed.stored {
        Mutation::SavePerson(person) => Ok(person),
        other => Err(unexpected_mutation(other)),
    }
}

fn stored_absence(committed: &CommitResult) -> Result<AbsenceInfo, ApiError> {
    let Mutation::SaveAbsence(absence) = &committed.stored else {
        return Err(unexpected_mutation(&committed.stored));
    };
    let person: &Person = committed
        .new_state
        .person(absence.person_id)
        .ok_or_else(|| ApiError::Internal {
            message: format!("Stored absence refers to missing person {}", absence.person_id),
        })?;
    Ok(AbsenceInfo::new(absence, person))
}

// ============================================================================
// People
// ============================================================================

/// Lists the roster, most senior first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn list_people<S: Store>(store: &mut S) -> Result<ListPeopleResponse, ApiError> {
    let state: State = load(store)?;
    Ok(ListPeopleResponse {
        people: state.people.iter().map(PersonInfo::from_person).collect(),
    })
}

/// Adds a person to the roster.
///
/// # Arguments
///
/// * `store` - The store to write to
/// * `request` - The person to add
/// * `actor` - The actor performing the write
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not write
/// - The rank is unknown or the name is blank
/// - The store fails
pub fn create_person<S: Store>(
    store: &mut S,
    request: CreatePersonRequest,
    actor: &AuthenticatedActor,
) -> Result<PersonResponse, ApiError> {
    AuthorizationService::authorize_write(actor, "create_person")?;
    let rank: Rank = parse_field("rank", &request.rank)?;

    let committed: CommitResult = execute(
        store,
        actor,
        Command::CreatePerson {
            name: request.name,
            rank,
            seniority_order: request.seniority_order,
        },
    )?;

    let person: &Person = stored_person(&committed)?;
    Ok(PersonResponse {
        person: PersonInfo::from_person(person),
        message: format!("Added {} {} to the roster", person.rank, person.name),
    })
}

/// Changes a person's name, rank and seniority.
///
/// # Errors
///
/// Returns an error if the actor may not write, the input is invalid,
/// the person does not exist, or the store fails.
pub fn update_person<S: Store>(
    store: &mut S,
    person_id: i64,
    request: UpdatePersonRequest,
    actor: &AuthenticatedActor,
) -> Result<PersonResponse, ApiError> {
    AuthorizationService::authorize_write(actor, "update_person")?;
    let rank: Rank = parse_field("rank", &request.rank)?;

    let committed: CommitResult = execute(
        store,
        actor,
        Command::UpdatePerson {
            person_id: PersonId::new(person_id),
            name: request.name,
            rank,
            seniority_order: request.seniority_order,
        },
    )?;

    let person: &Person = stored_person(&committed)?;
    Ok(PersonResponse {
        person: PersonInfo::from_person(person),
        message: format!("Updated {} {}", person.rank, person.name),
    })
}

/// Activates or deactivates a person.
///
/// Inactive people stay on the roster but no longer count toward availability.
///
/// # Errors
///
/// Returns an error if the actor may not write, the person does not exist,
/// or the store fails.
pub fn set_person_active<S: Store>(
    store: &mut S,
    person_id: i64,
    request: SetPersonActiveRequest,
    actor: &AuthenticatedActor,
) -> Result<PersonResponse, ApiError> {
    AuthorizationService::authorize_write(actor, "set_person_active")?;

    let committed: CommitResult = execute(
        store,
        actor,
        Command::SetPersonActive {
            person_id: PersonId::new(person_id),
            active: request.active,
        },
    )?;

    let person: &Person = stored_person(&committed)?;
    let verb: &str = if person.active { "Activated" } else { "Deactivated" };
    Ok(PersonResponse {
        person: PersonInfo::from_person(person),
        message: format!("{verb} {} {}", person.rank, person.name),
    })
}

/// Deletes a person and every absence they own.
///
/// # Errors
///
/// Returns an error if the actor may not write, the person does not exist,
/// or the store fails.
pub fn delete_person<S: Store>(
    store: &mut S,
    person_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_write(actor, "delete_person")?;

    execute(
        store,
        actor,
        Command::DeletePerson {
            person_id: PersonId::new(person_id),
        },
    )?;

    Ok(DeleteResponse {
        message: format!("Deleted person {person_id} and their absences"),
    })
}

// ============================================================================
// Absences
// ============================================================================

/// Searches absences. Criteria are combined with AND.
///
/// # Errors
///
/// Returns an error if a criterion cannot be parsed or the store cannot be read.
pub fn search_absences<S: Store>(
    store: &mut S,
    request: &SearchAbsencesRequest,
) -> Result<SearchAbsencesResponse, ApiError> {
    let filter: AbsenceFilter = AbsenceFilter {
        name: request.name.clone(),
        category: parse_optional_field::<Category>("category", request.category.as_deref())?,
        reason: parse_optional_field::<Reason>("reason", request.reason.as_deref())?,
        start: parse_optional_date("start", request.start.as_deref())?,
        end: parse_optional_date("end", request.end.as_deref())?,
    };

    let state: State = load(store)?;
    Ok(SearchAbsencesResponse {
        absences: state
            .search(&filter)
            .iter()
            .map(|found| AbsenceInfo::new(&found.absence, &found.person))
            .collect(),
    })
}

/// Records a new absence through the conflict validator.
///
/// # Errors
///
/// Returns an error if:
/// - The actor may not write
/// - The input is invalid or the person does not exist
/// - The person is already away for an overlapping shift
/// - The absence raises understaffing warnings and `confirm_warnings` is not set
/// - The store fails
pub fn create_absence<S: Store>(
    store: &mut S,
    request: &AbsenceRequest,
    actor: &AuthenticatedActor,
) -> Result<AbsenceResponse, ApiError> {
    AuthorizationService::authorize_write(actor, "create_absence")?;
    let absence: Absence = absence_from_request(request)?;

    let committed: CommitResult = execute(
        store,
        actor,
        Command::CreateAbsence {
            absence,
            confirm_warnings: request.confirm_warnings,
        },
    )?;

    let info: AbsenceInfo = stored_absence(&committed)?;
    Ok(AbsenceResponse {
        message: format!(
            "Recorded {} for {} from {} to {}",
            info.reason_label, info.person_name, info.start_date, info.end_date
        ),
        absence: info,
        warnings: committed.warnings,
    })
}

/// Replaces an existing absence through the conflict validator.
///
/// The absence never conflicts with its own stored version.
///
/// # Errors
///
/// Returns the same errors as [`create_absence`], plus not-found when the
/// absence does not exist.
pub fn update_absence<S: Store>(
    store: &mut S,
    absence_id: i64,
    request: &AbsenceRequest,
    actor: &AuthenticatedActor,
) -> Result<AbsenceResponse, ApiError> {
    AuthorizationService::authorize_write(actor, "update_absence")?;
    let absence: Absence = absence_from_request(request)?.with_id(AbsenceId::new(absence_id));

    let committed: CommitResult = execute(
        store,
        actor,
        Command::UpdateAbsence {
            absence,
            confirm_warnings: request.confirm_warnings,
        },
    )?;

    let info: AbsenceInfo = stored_absence(&committed)?;
    Ok(AbsenceResponse {
        message: format!("Updated absence {absence_id} for {}", info.person_name),
        absence: info,
        warnings: committed.warnings,
    })
}

/// Deletes an absence.
///
/// # Errors
///
/// Returns an error if the actor may not write, the absence does not exist,
/// or the store fails.
pub fn delete_absence<S: Store>(
    store: &mut S,
    absence_id: i64,
    actor: &AuthenticatedActor,
) -> Result<DeleteResponse, ApiError> {
    AuthorizationService::authorize_write(actor, "delete_absence")?;

    execute(
        store,
        actor,
        Command::DeleteAbsence {
            absence_id: AbsenceId::new(absence_id),
        },
    )?;

    Ok(DeleteResponse {
        message: format!("Deleted absence {absence_id}"),
    })
}

/// Runs the conflict validator without writing anything.
///
/// Blocking problems are reported in the verdict rather than as an error.
///
/// # Errors
///
/// Returns an error only if the request cannot be parsed or the store
/// cannot be read.
pub fn validate_absence<S: Store>(
    store: &mut S,
    request: &ValidateAbsenceRequest,
) -> Result<ValidateAbsenceResponse, ApiError> {
    let candidate: Absence = absence_from_request(&request.absence)?.normalize();
    let exclude_id: Option<AbsenceId> = request.exclude_id.map(AbsenceId::new);

    let state: State = load(store)?;
    let verdict: ValidationVerdict = state.validate(&candidate, exclude_id);
    // Rule: field checks follow the range, person and overlap checks
    if let (None, Err(err)) = (&verdict.error, validate_absence_fields(&candidate)) {
        return Ok(ValidateAbsenceResponse {
            blocked: true,
            error: Some(err.to_string()),
            warnings: Vec::new(),
            conflicting_absences: Vec::new(),
        });
    }

    Ok(ValidateAbsenceResponse {
        blocked: verdict.blocks_save(),
        error: verdict.error.as_ref().map(ToString::to_string),
        conflicting_absences: verdict
            .conflicting_absences
            .iter()
            .map(ConflictingAbsenceInfo::from)
            .collect(),
        warnings: verdict.warnings,
    })
}

// ============================================================================
// Availability
// ============================================================================

/// Computes per-category availability for a day.
///
/// # Errors
///
/// Returns an error if the date or shift cannot be parsed or the store
/// cannot be read.
pub fn get_availability<S: Store>(
    store: &mut S,
    request: &AvailabilityRequest,
) -> Result<AvailabilityResponse, ApiError> {
    let date: Date = parse_date("date", &request.date)?;
    let shift: Option<Shift> = parse_optional_field("shift", request.shift.as_deref())?;

    let state: State = load(store)?;
    let snapshot: AvailabilitySnapshot = state.availability(date, shift);

    let violations: Vec<Category> = snapshot.integrity_violations();
    if !violations.is_empty() {
        warn!(date = %date, ?violations, "More absences than people in category");
    }

    Ok(AvailabilityResponse::from(&snapshot))
}

/// Lists the absences covering one day.
///
/// # Errors
///
/// Returns an error if the date cannot be parsed or the store cannot be read.
pub fn get_daily_absences<S: Store>(
    store: &mut S,
    date: &str,
) -> Result<DailyAbsencesResponse, ApiError> {
    let date: Date = parse_date("date", date)?;
    let state: State = load(store)?;
    Ok(daily_response(date, &state.absences_on(date)))
}

fn daily_response(date: Date, absences: &[DailyAbsence]) -> DailyAbsencesResponse {
    DailyAbsencesResponse {
        date: format_iso_date(date),
        absences: absences.iter().map(DailyAbsenceInfo::from).collect(),
    }
}

/// Lists the absences of the coming days, grouped by day.
///
/// # Errors
///
/// Returns an error if the start date cannot be parsed, the window is
/// empty or too long, or the store cannot be read.
pub fn get_upcoming_absences<S: Store>(
    store: &mut S,
    request: &UpcomingAbsencesRequest,
) -> Result<UpcomingAbsencesResponse, ApiError> {
    let from: Date = parse_date("from", &request.from)?;
    let days: u32 = request.days.unwrap_or(DEFAULT_UPCOMING_DAYS);
    if days == 0 {
        return Err(InputError::InvalidValue {
            field: "days",
            value: days.to_string(),
        }
        .into());
    }
    if days > MAX_UPCOMING_DAYS {
        return Err(InputError::WindowTooLong {
            days,
            max: MAX_UPCOMING_DAYS,
        }
        .into());
    }

    let to: Date = from
        .checked_add(Duration::days(i64::from(days - 1)))
        .ok_or_else(|| InputError::InvalidValue {
            field: "days",
            value: days.to_string(),
        })?;
    let range: DateRange = DateRange::new(from, to).map_err(translate_domain_error)?;

    let state: State = load(store)?;
    let by_date: BTreeMap<Date, Vec<DailyAbsence>> = state.absences_between(range);
    Ok(UpcomingAbsencesResponse {
        from: format_iso_date(from),
        to: format_iso_date(to),
        days: by_date
            .iter()
            .map(|(date, absences)| daily_response(*date, absences))
            .collect(),
    })
}
