// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the staff availability system.
//!
//! Requests arrive as plain DTOs with string-typed dates and codes. Handlers
//! parse them, enforce the actor's role, and drive the core write gate
//! against any [`efetivo::Store`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use error::{ApiError, AuthError, InputError, translate_core_error, translate_domain_error};
pub use handlers::{
    DEFAULT_UPCOMING_DAYS, MAX_UPCOMING_DAYS, absence_from_request, create_absence,
    create_person, delete_absence, delete_person, get_availability, get_daily_absences,
    get_upcoming_absences, list_people, search_absences, set_person_active, update_absence,
    update_person, validate_absence,
};
pub use request_response::{
    AbsenceInfo, AbsenceRequest, AbsenceResponse, AvailabilityRequest, AvailabilityResponse,
    CategoryAvailabilityInfo, ConflictingAbsenceInfo, CreatePersonRequest, DailyAbsenceInfo,
    DailyAbsencesResponse, DeleteResponse, ListPeopleResponse, PersonInfo, PersonResponse,
    SearchAbsencesRequest, SearchAbsencesResponse, SetPersonActiveRequest, ShiftExceptionInfo,
    ShiftExceptionInput, UpcomingAbsencesRequest, UpcomingAbsencesResponse, UpdatePersonRequest,
    ValidateAbsenceRequest, ValidateAbsenceResponse,
};
