// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use efetivo_domain::{Absence, AbsenceId, PersonId, Rank};

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a person to the roster.
    CreatePerson {
        /// The display name.
        name: String,
        /// The rank.
        rank: Rank,
        /// The seniority order. The next free number is used when absent.
        seniority_order: Option<u32>,
    },
    /// Change a person's name, rank or seniority.
    UpdatePerson {
        /// The person to update.
        person_id: PersonId,
        /// The new display name.
        name: String,
        /// The new rank.
        rank: Rank,
        /// The new seniority order.
        seniority_order: u32,
    },
    /// Activate or deactivate a person.
    SetPersonActive {
        /// The person to update.
        person_id: PersonId,
        /// The new flag.
        active: bool,
    },
    /// Remove a person and every absence they own.
    DeletePerson {
        /// The person to remove.
        person_id: PersonId,
    },
    /// Record a new absence.
    CreateAbsence {
        /// The absence. Any identifier it carries is ignored.
        absence: Absence,
        /// Save even if the absence raises understaffing warnings.
        confirm_warnings: bool,
    },
    /// Replace an existing absence.
    UpdateAbsence {
        /// The absence. Must carry the identifier of the stored record.
        absence: Absence,
        /// Save even if the absence raises understaffing warnings.
        confirm_warnings: bool,
    },
    /// Remove an absence.
    DeleteAbsence {
        /// The absence to remove.
        absence_id: AbsenceId,
    },
}

impl Command {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreatePerson { .. } => "CreatePerson",
            Self::UpdatePerson { .. } => "UpdatePerson",
            Self::SetPersonActive { .. } => "SetPersonActive",
            Self::DeletePerson { .. } => "DeletePerson",
            Self::CreateAbsence { .. } => "CreateAbsence",
            Self::UpdateAbsence { .. } => "UpdateAbsence",
            Self::DeleteAbsence { .. } => "DeleteAbsence",
        }
    }
}
