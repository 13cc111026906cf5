// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor roles and write authorization.
//!
//! Identity is supplied by the caller. This layer only decides whether the
//! claimed role may change the roster or its absences.

use std::str::FromStr;

use crate::error::{AuthError, InputError};

/// Actor roles for authorization.
///
/// Everyone may read. Only `Encarregado` may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The person in charge of the roster: may create, edit and delete
    /// people and absences.
    Encarregado,
    /// A regular staff member: read-only access.
    Funcionario,
}

impl Role {
    /// Returns the wire name of this role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Encarregado => "encarregado",
            Self::Funcionario => "funcionario",
        }
    }

    /// Returns whether this role may write.
    #[must_use]
    pub const fn can_write(&self) -> bool {
        matches!(self, Self::Encarregado)
    }
}

impl FromStr for Role {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "encarregado" => Ok(Self::Encarregado),
            "funcionario" => Ok(Self::Funcionario),
            _ => Err(InputError::UnknownRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Builds an actor from the identity fields carried by a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or the role is unknown.
    pub fn from_claims(actor_id: &str, actor_role: &str) -> Result<Self, InputError> {
        let id: &str = actor_id.trim();
        if id.is_empty() {
            return Err(InputError::MissingField("actor_id"));
        }
        let role: Role = actor_role.parse()?;
        Ok(Self::new(id.to_string(), role))
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may perform a write.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    /// * `action` - The action being attempted, for the error message
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `Encarregado` role.
    pub fn authorize_write(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        if actor.role.can_write() {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: Role::Encarregado.to_string(),
        })
    }
}
