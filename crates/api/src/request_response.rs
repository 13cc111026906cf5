// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates cross this boundary as `YYYY-MM-DD` strings and enumerations as
//! their wire codes.

use efetivo_domain::{
    Absence, AvailabilitySnapshot, CategoryAvailability, ConflictingAbsence, DailyAbsence,
    Person, ShiftException, format_iso_date,
};
use serde::{Deserialize, Serialize};

// ============================================================================
// People
// ============================================================================

/// API request to add a person to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatePersonRequest {
    /// The person's display name.
    pub name: String,
    /// The rank code (`SO`, `1S`, `2S`, `3S`, `CB`, `S1`, `S2`).
    pub rank: String,
    /// Seniority order. The next free number is used when absent.
    #[serde(default)]
    pub seniority_order: Option<u32>,
}

/// API request to edit a person.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdatePersonRequest {
    /// The person's display name.
    pub name: String,
    /// The rank code.
    pub rank: String,
    /// Seniority order, lower is more senior.
    pub seniority_order: u32,
}

/// API request to activate or deactivate a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SetPersonActiveRequest {
    /// Whether the person counts toward availability.
    pub active: bool,
}

/// A person as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonInfo {
    /// The person's identifier.
    pub person_id: i64,
    /// The person's display name.
    pub name: String,
    /// The rank code.
    pub rank: String,
    /// The category derived from the rank.
    pub category: String,
    /// Seniority order.
    pub seniority_order: u32,
    /// Whether the person is active.
    pub active: bool,
}

impl PersonInfo {
    /// Builds the API view of a stored person.
    ///
    /// Unsaved people report an identifier of 0.
    #[must_use]
    pub fn from_person(person: &Person) -> Self {
        Self {
            person_id: person.person_id.map_or(0, efetivo_domain::PersonId::value),
            name: person.name.clone(),
            rank: person.rank.as_str().to_string(),
            category: person.category().as_str().to_string(),
            seniority_order: person.seniority_order,
            active: person.active,
        }
    }
}

/// API response for listing the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPeopleResponse {
    /// Every person, most senior first.
    pub people: Vec<PersonInfo>,
}

/// API response for a person write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
    /// The person as stored.
    pub person: PersonInfo,
    /// A success message.
    pub message: String,
}

/// API response for a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// A success message.
    pub message: String,
}

// ============================================================================
// Absences
// ============================================================================

/// A per-day shift override as received by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShiftExceptionInput {
    /// The day, `YYYY-MM-DD`.
    pub date: String,
    /// The shift code for that day.
    pub shift: String,
}

/// API request body describing an absence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AbsenceRequest {
    /// The absent person.
    pub person_id: i64,
    /// Reason code or label.
    pub reason: String,
    /// First day, `YYYY-MM-DD`.
    pub start_date: String,
    /// Last day, `YYYY-MM-DD`.
    pub end_date: String,
    /// Shift code applied to days without an exception.
    pub default_shift: String,
    /// Per-day shift overrides.
    #[serde(default)]
    pub exceptions: Vec<ShiftExceptionInput>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
    /// Save despite understaffing warnings.
    #[serde(default)]
    pub confirm_warnings: bool,
}

/// API request to check an absence without saving it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValidateAbsenceRequest {
    /// The candidate absence.
    #[serde(flatten)]
    pub absence: AbsenceRequest,
    /// The absence being edited, ignored by the conflict scan.
    #[serde(default)]
    pub exclude_id: Option<i64>,
}

/// A shift exception as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftExceptionInfo {
    /// The day.
    pub date: String,
    /// The shift code.
    pub shift: String,
}

impl From<&ShiftException> for ShiftExceptionInfo {
    fn from(exception: &ShiftException) -> Self {
        Self {
            date: format_iso_date(exception.date),
            shift: exception.shift.as_str().to_string(),
        }
    }
}

/// An absence as returned by the API, with its person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceInfo {
    /// The absence identifier.
    pub absence_id: i64,
    /// The absent person.
    pub person_id: i64,
    /// The absent person's display name.
    pub person_name: String,
    /// The absent person's rank code.
    pub rank: String,
    /// The absent person's category.
    pub category: String,
    /// Reason code.
    pub reason: String,
    /// Reason label.
    pub reason_label: String,
    /// First day.
    pub start_date: String,
    /// Last day.
    pub end_date: String,
    /// Shift applied to days without an exception.
    pub default_shift: String,
    /// Per-day overrides, by date.
    pub exceptions: Vec<ShiftExceptionInfo>,
    /// Free-text note.
    pub note: Option<String>,
}

impl AbsenceInfo {
    /// Builds the API view of a stored absence.
    #[must_use]
    pub fn new(absence: &Absence, person: &Person) -> Self {
        Self {
            absence_id: absence
                .absence_id
                .map_or(0, efetivo_domain::AbsenceId::value),
            person_id: absence.person_id.value(),
            person_name: person.name.clone(),
            rank: person.rank.as_str().to_string(),
            category: person.category().as_str().to_string(),
            reason: absence.reason.code().to_string(),
            reason_label: absence.reason.label().to_string(),
            start_date: format_iso_date(absence.start_date),
            end_date: format_iso_date(absence.end_date),
            default_shift: absence.default_shift.as_str().to_string(),
            exceptions: absence
                .exceptions
                .iter()
                .map(ShiftExceptionInfo::from)
                .collect(),
            note: absence.note.clone(),
        }
    }
}

/// API response for an absence write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbsenceResponse {
    /// The absence as stored.
    pub absence: AbsenceInfo,
    /// Warnings the caller confirmed.
    pub warnings: Vec<String>,
    /// A success message.
    pub message: String,
}

/// Query criteria for searching absences. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SearchAbsencesRequest {
    /// Case-insensitive fragment of the person's name.
    #[serde(default)]
    pub name: Option<String>,
    /// Category code.
    #[serde(default)]
    pub category: Option<String>,
    /// Reason code or label.
    #[serde(default)]
    pub reason: Option<String>,
    /// Only absences ending on or after this day.
    #[serde(default)]
    pub start: Option<String>,
    /// Only absences starting on or before this day.
    #[serde(default)]
    pub end: Option<String>,
}

/// API response for an absence search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchAbsencesResponse {
    /// Matching absences, latest start first.
    pub absences: Vec<AbsenceInfo>,
}

/// An absence behind an understaffing warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictingAbsenceInfo {
    /// The absent person.
    pub person_id: i64,
    /// The absent person's display name.
    pub person_name: String,
    /// The absent person's rank code.
    pub rank: String,
    /// Reason label.
    pub reason: String,
    /// First day.
    pub start_date: String,
    /// Last day.
    pub end_date: String,
}

impl From<&ConflictingAbsence> for ConflictingAbsenceInfo {
    fn from(conflict: &ConflictingAbsence) -> Self {
        Self {
            person_id: conflict.person_id.value(),
            person_name: conflict.person_name.clone(),
            rank: conflict.rank.as_str().to_string(),
            reason: conflict.reason.label().to_string(),
            start_date: format_iso_date(conflict.start_date),
            end_date: format_iso_date(conflict.end_date),
        }
    }
}

/// API response for a dry-run validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateAbsenceResponse {
    /// Whether saving would be refused.
    pub blocked: bool,
    /// The blocking error, if any.
    pub error: Option<String>,
    /// Understaffing warnings.
    pub warnings: Vec<String>,
    /// The absences behind the warnings.
    pub conflicting_absences: Vec<ConflictingAbsenceInfo>,
}

// ============================================================================
// Availability
// ============================================================================

/// Query for an availability snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AvailabilityRequest {
    /// The day, `YYYY-MM-DD`.
    pub date: String,
    /// Optional shift code to restrict the count to.
    #[serde(default)]
    pub shift: Option<String>,
}

/// Availability of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAvailabilityInfo {
    /// Category code.
    pub category: String,
    /// Active people in the category.
    pub total: u32,
    /// Active people absent.
    pub absent: u32,
    /// `total - absent`.
    pub available: i64,
}

impl From<&CategoryAvailability> for CategoryAvailabilityInfo {
    fn from(entry: &CategoryAvailability) -> Self {
        Self {
            category: entry.category.as_str().to_string(),
            total: entry.total,
            absent: entry.absent,
            available: entry.available,
        }
    }
}

/// API response for an availability snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// The day.
    pub date: String,
    /// The shift filter applied, if any.
    pub shift: Option<String>,
    /// One entry per category.
    pub categories: Vec<CategoryAvailabilityInfo>,
    /// Categories with more absences than people.
    pub integrity_violations: Vec<String>,
}

impl From<&AvailabilitySnapshot> for AvailabilityResponse {
    fn from(snapshot: &AvailabilitySnapshot) -> Self {
        Self {
            date: format_iso_date(snapshot.date),
            shift: snapshot.shift.map(|shift| shift.as_str().to_string()),
            categories: snapshot
                .categories
                .iter()
                .map(CategoryAvailabilityInfo::from)
                .collect(),
            integrity_violations: snapshot
                .integrity_violations()
                .iter()
                .map(|category| category.as_str().to_string())
                .collect(),
        }
    }
}

/// One absence on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAbsenceInfo {
    /// The absence.
    pub absence: AbsenceInfo,
    /// The shift the person is away for on that day.
    pub shift: String,
}

impl From<&DailyAbsence> for DailyAbsenceInfo {
    fn from(entry: &DailyAbsence) -> Self {
        Self {
            absence: AbsenceInfo::new(&entry.absence, &entry.person),
            shift: entry.shift.as_str().to_string(),
        }
    }
}

/// API response for the absences of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAbsencesResponse {
    /// The day.
    pub date: String,
    /// Absences, `GRADUADO` first then by name.
    pub absences: Vec<DailyAbsenceInfo>,
}

/// Query for the absences of the coming days.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpcomingAbsencesRequest {
    /// First day of the window, `YYYY-MM-DD`.
    pub from: String,
    /// Number of days in the window. Defaults to seven.
    #[serde(default)]
    pub days: Option<u32>,
}

/// API response for the absences of the coming days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingAbsencesResponse {
    /// First day of the window.
    pub from: String,
    /// Last day of the window.
    pub to: String,
    /// Days with at least one absence, earliest first.
    pub days: Vec<DailyAbsencesResponse>,
}
