// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{DateRange, iso_date};
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use time::Date;

/// Canonical identifier of a person in the roster.
///
/// Identifiers are assigned by the store when a person is first saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(i64);

impl PersonId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Canonical identifier of an absence record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbsenceId(i64);

impl AbsenceId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for AbsenceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Personnel category.
///
/// Categories are never stored; they are always derived from a [`Rank`].
/// Ordering places `Graduado` before `CaboSoldado`, which is the order
/// used by every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Non-commissioned officers (`SO`, `1S`, `2S`, `3S`).
    #[serde(rename = "GRADUADO")]
    Graduado,
    /// Corporals and privates (`CB`, `S1`, `S2`).
    #[serde(rename = "CABO_SOLDADO")]
    CaboSoldado,
}

impl Category {
    /// Every category, in listing order.
    pub const ALL: [Self; 2] = [Self::Graduado, Self::CaboSoldado];

    /// Converts this category to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Graduado => "GRADUADO",
            Self::CaboSoldado => "CABO_SOLDADO",
        }
    }

    /// Number of simultaneous absences in this category at which a new
    /// absence triggers an understaffing warning.
    #[must_use]
    pub const fn warning_ceiling(&self) -> usize {
        match self {
            Self::Graduado => 3,
            Self::CaboSoldado => 2,
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GRADUADO" => Ok(Self::Graduado),
            "CABO_SOLDADO" => Ok(Self::CaboSoldado),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Military rank (`graduação`).
///
/// Ranks compare by seniority: `SO > 1S > 2S > 3S > CB > S1 > S2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Suboficial.
    #[serde(rename = "SO")]
    Suboficial,
    /// Primeiro-sargento.
    #[serde(rename = "1S")]
    PrimeiroSargento,
    /// Segundo-sargento.
    #[serde(rename = "2S")]
    SegundoSargento,
    /// Terceiro-sargento.
    #[serde(rename = "3S")]
    TerceiroSargento,
    /// Cabo.
    #[serde(rename = "CB")]
    Cabo,
    /// Soldado de primeira classe.
    #[serde(rename = "S1")]
    SoldadoPrimeira,
    /// Soldado de segunda classe.
    #[serde(rename = "S2")]
    SoldadoSegunda,
}

impl Rank {
    /// Every rank, most senior first.
    pub const ALL: [Self; 7] = [
        Self::Suboficial,
        Self::PrimeiroSargento,
        Self::SegundoSargento,
        Self::TerceiroSargento,
        Self::Cabo,
        Self::SoldadoPrimeira,
        Self::SoldadoSegunda,
    ];

    /// Converts this rank to its short code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Suboficial => "SO",
            Self::PrimeiroSargento => "1S",
            Self::SegundoSargento => "2S",
            Self::TerceiroSargento => "3S",
            Self::Cabo => "CB",
            Self::SoldadoPrimeira => "S1",
            Self::SoldadoSegunda => "S2",
        }
    }

    /// Returns the category this rank belongs to.
    ///
    /// This is the only place where category membership is decided.
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Suboficial
            | Self::PrimeiroSargento
            | Self::SegundoSargento
            | Self::TerceiroSargento => Category::Graduado,
            Self::Cabo | Self::SoldadoPrimeira | Self::SoldadoSegunda => Category::CaboSoldado,
        }
    }

    /// Position in the seniority ladder (0 = most senior).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Suboficial => 0,
            Self::PrimeiroSargento => 1,
            Self::SegundoSargento => 2,
            Self::TerceiroSargento => 3,
            Self::Cabo => 4,
            Self::SoldadoPrimeira => 5,
            Self::SoldadoSegunda => 6,
        }
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        // Lower precedence is more senior, and more senior compares greater.
        other.precedence().cmp(&self.precedence())
    }
}

impl FromStr for Rank {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|rank| rank.as_str() == normalized)
            .ok_or_else(|| DomainError::InvalidRank(s.to_string()))
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Work shift (`turno`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// Morning.
    #[serde(rename = "MATUTINO")]
    Matutino,
    /// Afternoon.
    #[serde(rename = "VESPERTINO")]
    Vespertino,
    /// Full day; covers both half-shifts.
    #[serde(rename = "INTEGRAL")]
    Integral,
}

impl Shift {
    /// Every shift.
    pub const ALL: [Self; 3] = [Self::Matutino, Self::Vespertino, Self::Integral];

    /// Converts this shift to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Matutino => "MATUTINO",
            Self::Vespertino => "VESPERTINO",
            Self::Integral => "INTEGRAL",
        }
    }

    /// Returns whether an absence on this shift makes the person unavailable
    /// for `requested`.
    #[must_use]
    pub const fn covers(&self, requested: Self) -> bool {
        matches!(
            (self, requested),
            (Self::Integral, _)
                | (Self::Matutino, Self::Matutino)
                | (Self::Vespertino, Self::Vespertino)
        )
    }

    /// Returns whether two absences of the same person on these shifts would
    /// double-book them on the same day.
    #[must_use]
    pub const fn conflicts_with(&self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Integral, _)
                | (_, Self::Integral)
                | (Self::Matutino, Self::Matutino)
                | (Self::Vespertino, Self::Vespertino)
        )
    }
}

impl FromStr for Shift {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MATUTINO" => Ok(Self::Matutino),
            "VESPERTINO" => Ok(Self::Vespertino),
            "INTEGRAL" => Ok(Self::Integral),
            _ => Err(DomainError::InvalidShift(s.to_string())),
        }
    }
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reason for an absence (`motivo`).
///
/// This is a closed set. Each reason has a stable ASCII code used for
/// storage and a display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reason {
    Missao,
    Comissao,
    Servico,
    Ferias,
    DispensaMedica,
    DispensadoPelaChefia,
    LicencaPaternidade,
    LicencaMaternidade,
    LicencaLuto,
    DispensaDeServico,
    Transito,
    Instalacao,
    LicencaNupcias,
}

impl Reason {
    /// Every reason, in display order.
    pub const ALL: [Self; 13] = [
        Self::Missao,
        Self::Comissao,
        Self::Servico,
        Self::Ferias,
        Self::DispensaMedica,
        Self::DispensadoPelaChefia,
        Self::LicencaPaternidade,
        Self::LicencaMaternidade,
        Self::LicencaLuto,
        Self::DispensaDeServico,
        Self::Transito,
        Self::Instalacao,
        Self::LicencaNupcias,
    ];

    /// Stable storage code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Missao => "MISSAO",
            Self::Comissao => "COMISSAO",
            Self::Servico => "SERVICO",
            Self::Ferias => "FERIAS",
            Self::DispensaMedica => "DISPENSA_MEDICA",
            Self::DispensadoPelaChefia => "DISPENSADO_PELA_CHEFIA",
            Self::LicencaPaternidade => "LICENCA_PATERNIDADE",
            Self::LicencaMaternidade => "LICENCA_MATERNIDADE",
            Self::LicencaLuto => "LICENCA_LUTO",
            Self::DispensaDeServico => "DISPENSA_DE_SERVICO",
            Self::Transito => "TRANSITO",
            Self::Instalacao => "INSTALACAO",
            Self::LicencaNupcias => "LICENCA_NUPCIAS",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Missao => "Missão",
            Self::Comissao => "Comissão",
            Self::Servico => "Serviço",
            Self::Ferias => "Férias",
            Self::DispensaMedica => "Dispensa Médica",
            Self::DispensadoPelaChefia => "Dispensado pela chefia",
            Self::LicencaPaternidade => "Licença Paternidade",
            Self::LicencaMaternidade => "Licença Maternidade",
            Self::LicencaLuto => "Licença Luto",
            Self::DispensaDeServico => "Dispensa de serviço",
            Self::Transito => "Trânsito",
            Self::Instalacao => "Instalação",
            Self::LicencaNupcias => "Licença Núpcias",
        }
    }
}

impl FromStr for Reason {
    type Err = DomainError;

    /// Parses either the storage code or the display label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed: &str = s.trim();
        Self::ALL
            .into_iter()
            .find(|reason| {
                reason.code().eq_ignore_ascii_case(trimmed)
                    || reason.label().to_lowercase() == trimmed.to_lowercase()
            })
            .ok_or_else(|| DomainError::InvalidReason(s.to_string()))
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A member of the roster (`funcionário`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// The canonical identifier. `None` until the store saves the person.
    pub person_id: Option<PersonId>,
    /// Display name.
    pub name: String,
    /// Military rank. The category is derived from it.
    pub rank: Rank,
    /// Seniority order (lower is more senior).
    pub seniority_order: u32,
    /// Inactive people are kept for history but excluded from every count.
    pub active: bool,
}

impl Person {
    /// Creates a new, not yet persisted, active person.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `rank` - The rank
    /// * `seniority_order` - The seniority order (lower is more senior)
    #[must_use]
    pub const fn new(name: String, rank: Rank, seniority_order: u32) -> Self {
        Self {
            person_id: None,
            name,
            rank,
            seniority_order,
            active: true,
        }
    }

    /// Returns a copy carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, person_id: PersonId) -> Self {
        self.person_id = Some(person_id);
        self
    }

    /// Returns the category derived from the person's rank.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.rank.category()
    }
}

/// A per-day shift override inside an absence (`exceção por dia`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShiftException {
    /// The day being overridden.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The shift that applies on that day.
    pub shift: Shift,
}

impl ShiftException {
    /// Creates a new shift exception.
    #[must_use]
    pub const fn new(date: Date, shift: Shift) -> Self {
        Self { date, shift }
    }
}

/// An absence record (`ausência`).
///
/// The date range is inclusive on both ends. Exceptions are kept sorted
/// and unique by date by [`Absence::normalize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    /// The canonical identifier. `None` until the store saves the absence.
    pub absence_id: Option<AbsenceId>,
    /// The absent person.
    pub person_id: PersonId,
    /// Why the person is absent.
    pub reason: Reason,
    /// First day of the absence.
    #[serde(with = "iso_date")]
    pub start_date: Date,
    /// Last day of the absence (inclusive).
    #[serde(with = "iso_date")]
    pub end_date: Date,
    /// Shift applied on every day without an exception.
    pub default_shift: Shift,
    /// Per-day shift overrides.
    #[serde(default)]
    pub exceptions: Vec<ShiftException>,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

impl Absence {
    /// Creates a new, not yet persisted, absence without exceptions.
    ///
    /// # Arguments
    ///
    /// * `person_id` - The absent person
    /// * `reason` - The reason for the absence
    /// * `start_date` - First day (inclusive)
    /// * `end_date` - Last day (inclusive)
    /// * `default_shift` - The shift applied on every day
    #[must_use]
    pub const fn new(
        person_id: PersonId,
        reason: Reason,
        start_date: Date,
        end_date: Date,
        default_shift: Shift,
    ) -> Self {
        Self {
            absence_id: None,
            person_id,
            reason,
            start_date,
            end_date,
            default_shift,
            exceptions: Vec::new(),
            note: None,
        }
    }

    /// Returns a copy carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, absence_id: AbsenceId) -> Self {
        self.absence_id = Some(absence_id);
        self
    }

    /// Returns the validated date range of this absence.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRange` if the end date precedes the start date.
    pub fn range(&self) -> Result<DateRange, DomainError> {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Returns whether `date` falls within `[start_date, end_date]`.
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Returns the exception shift for `date`, if one exists.
    #[must_use]
    pub fn exception_for(&self, date: Date) -> Option<Shift> {
        self.exceptions
            .iter()
            .find(|exception| exception.date == date)
            .map(|exception| exception.shift)
    }

    /// Sets the shift for a single day, replacing any existing exception.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ExceptionOutOfRange` if `date` is outside the absence.
    pub fn set_exception(&mut self, date: Date, shift: Shift) -> Result<(), DomainError> {
        if !self.is_active_on(date) {
            return Err(DomainError::ExceptionOutOfRange {
                date,
                start: self.start_date,
                end: self.end_date,
            });
        }

        self.exceptions.retain(|exception| exception.date != date);
        self.exceptions.push(ShiftException::new(date, shift));
        self.exceptions.sort_by_key(|exception| exception.date);
        Ok(())
    }

    /// Removes the exception for `date`, returning whether one existed.
    pub fn remove_exception(&mut self, date: Date) -> bool {
        let before: usize = self.exceptions.len();
        self.exceptions.retain(|exception| exception.date != date);
        before != self.exceptions.len()
    }

    /// Brings the record into canonical form.
    ///
    /// - Exceptions outside `[start_date, end_date]` are dropped
    /// - When several exceptions share a date, the last one wins
    /// - Exceptions are sorted by date
    /// - A blank note becomes `None`; other notes are trimmed
    #[must_use]
    pub fn normalize(mut self) -> Self {
        let mut canonical: Vec<ShiftException> = Vec::with_capacity(self.exceptions.len());
        for exception in self.exceptions.drain(..) {
            if exception.date < self.start_date || exception.date > self.end_date {
                continue;
            }
            canonical.retain(|kept: &ShiftException| kept.date != exception.date);
            canonical.push(exception);
        }
        canonical.sort_by_key(|exception| exception.date);
        self.exceptions = canonical;

        self.note = self
            .note
            .as_deref()
            .map(str::trim)
            .filter(|note| !note.is_empty())
            .map(String::from);

        self
    }
}
