// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::score_input::ScoreInputError;
use matchday::{CoreError, StoreError};
use matchday_domain::{DomainError, ErrorKind};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The operation is not allowed in the tournament's current state.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The tournament is finished and accepts no further changes.
    TournamentLocked {
        /// The locked tournament.
        tournament_id: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Classifies this error, for mapping onto a transport status.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::DomainRuleViolation { .. } => ErrorKind::Precondition,
            Self::ResourceNotFound { .. } => ErrorKind::NotFound,
            Self::TournamentLocked { .. } => ErrorKind::Locked,
            Self::Internal { .. } => ErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::TournamentLocked { tournament_id } => {
                write!(
                    f,
                    "Tournament '{tournament_id}' is finished and can no longer be changed"
                )
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<ScoreInputError> for ApiError {
    fn from(err: ScoreInputError) -> Self {
        match err {
            ScoreInputError::Missing { field } => Self::InvalidInput {
                field: field.to_string(),
                message: String::from("A score is required"),
            },
            ScoreInputError::Rejected(domain_err) => translate_domain_error(domain_err),
        }
    }
}

fn rule_violation(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidIdentifier { kind, .. } => invalid_input(kind, &err),
        DomainError::ReservedIdentifier(_) | DomainError::DuplicateParticipant(_) => {
            invalid_input("participants", &err)
        }
        DomainError::EmptyRoster
        | DomainError::RosterTooSmall { .. }
        | DomainError::RosterTooLarge { .. } => invalid_input("roster", &err),
        DomainError::DuplicateTeam(_) => invalid_input("teams", &err),
        DomainError::InvalidTournamentName(_) => invalid_input("name", &err),
        DomainError::InvalidFormat(_) => invalid_input("format", &err),
        DomainError::InvalidLifecycleState(_) => invalid_input("status", &err),
        DomainError::InvalidScore { field, .. } => invalid_input(field, &err),
        DomainError::InsufficientPool { .. } => rule_violation("pool_covers_roster", &err),
        DomainError::DrawRequired { .. } => rule_violation("draw_before_fixtures", &err),
        DomainError::DrawNotApplicable { .. } => rule_violation("lottery_format_only", &err),
        DomainError::FixturesAlreadyGenerated { .. } => {
            rule_violation("fixtures_generated_once", &err)
        }
        DomainError::InvalidStatusTransition { .. } => {
            rule_violation("valid_status_transition", &err)
        }
        DomainError::SetupClosed { .. } => rule_violation("setup_while_upcoming", &err),
        DomainError::ResultsNotOpen { .. } => rule_violation("results_while_active", &err),
        DomainError::ResetOnFinished { .. } => rule_violation("no_reset_after_finish", &err),
        DomainError::IncompleteTournament { .. } => {
            rule_violation("all_matches_completed", &err)
        }
        DomainError::TournamentLocked { tournament_id } => ApiError::TournamentLocked {
            tournament_id: tournament_id.clone(),
        },
        DomainError::TournamentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Tournament"),
            message: format!("Tournament '{id}' does not exist"),
        },
        DomainError::MatchNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Match"),
            message: format!("Match '{id}' does not exist"),
        },
        DomainError::InconsistentMatch { .. } => ApiError::Internal {
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Store(StoreError::NotFound { entity, id }) => ApiError::ResourceNotFound {
            resource_type: entity.to_string(),
            message: format!("{entity} '{id}' does not exist"),
        },
        CoreError::Store(store_err) => ApiError::Internal {
            message: format!("Store error: {store_err}"),
        },
    }
}
