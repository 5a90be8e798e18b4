// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::TournamentStatus;

/// Broad classification of a rule violation.
///
/// Callers use the kind to decide how to present a failure; the engine
/// never retries on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed input (scores, identifiers, roster shape).
    Validation,
    /// The operation is not allowed in the current tournament state.
    Precondition,
    /// An identifier does not refer to an existing record.
    NotFound,
    /// The tournament is finished and frozen.
    Locked,
    /// Stored data violates an invariant, or the store failed.
    Internal,
}

impl ErrorKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Precondition => "precondition",
            Self::NotFound => "not_found",
            Self::Locked => "locked",
            Self::Internal => "internal",
        }
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier is empty or malformed.
    InvalidIdentifier {
        /// What the identifier names (e.g. "participant").
        kind: &'static str,
        /// Why it was rejected.
        reason: String,
    },
    /// A participant identifier collides with the scheduling placeholder.
    ReservedIdentifier(String),
    /// Tournament name is empty or invalid.
    InvalidTournamentName(String),
    /// Unknown tournament format.
    InvalidFormat(String),
    /// Unknown lifecycle state.
    InvalidLifecycleState(String),
    /// A participant appears more than once on a roster.
    DuplicateParticipant(String),
    /// A team appears more than once in a draw pool.
    DuplicateTeam(String),
    /// The roster has no participants.
    EmptyRoster,
    /// The roster is too small to schedule.
    RosterTooSmall {
        /// Minimum roster size.
        required: usize,
        /// Actual roster size.
        actual: usize,
    },
    /// The roster is too large to schedule.
    RosterTooLarge {
        /// Maximum roster size.
        max: usize,
        /// Actual roster size.
        actual: usize,
    },
    /// A score is negative, fractional, or not a number.
    InvalidScore {
        /// Which side the score belongs to.
        field: String,
        /// Why it was rejected.
        reason: String,
    },
    /// The draw pool cannot cover the roster.
    InsufficientPool {
        /// Teams needed (roster size).
        required: usize,
        /// Distinct teams in the pool.
        available: usize,
    },
    /// A lottery tournament has participants without a drawn team.
    DrawRequired {
        /// The tournament.
        tournament_id: String,
        /// Participants missing an assignment.
        missing: Vec<String>,
    },
    /// The tournament format has no team draw.
    DrawNotApplicable {
        /// The tournament.
        tournament_id: String,
    },
    /// Fixtures already exist for this lifecycle.
    FixturesAlreadyGenerated {
        /// The tournament.
        tournament_id: String,
        /// How many matches already exist.
        existing: usize,
    },
    /// A lifecycle transition is not permitted.
    InvalidStatusTransition {
        /// Current state.
        from: TournamentStatus,
        /// Requested state.
        to: TournamentStatus,
    },
    /// Setup changes are only allowed while the tournament is upcoming.
    SetupClosed {
        /// The tournament.
        tournament_id: String,
        /// Current state.
        status: TournamentStatus,
    },
    /// Results can only be entered while the tournament is active.
    ResultsNotOpen {
        /// The tournament.
        tournament_id: String,
        /// Current state.
        status: TournamentStatus,
    },
    /// A finished tournament cannot be reset.
    ResetOnFinished {
        /// The tournament.
        tournament_id: String,
    },
    /// Not every match is completed.
    IncompleteTournament {
        /// The tournament.
        tournament_id: String,
        /// Completed matches.
        completed: usize,
        /// Total matches.
        total: usize,
    },
    /// The tournament is finished; no further mutation is allowed.
    TournamentLocked {
        /// The tournament.
        tournament_id: String,
    },
    /// Tournament does not exist.
    TournamentNotFound(String),
    /// Match does not exist.
    MatchNotFound(String),
    /// A stored match violates the score/completion invariant.
    InconsistentMatch {
        /// The match.
        match_id: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl DomainError {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIdentifier { .. }
            | Self::ReservedIdentifier(_)
            | Self::InvalidTournamentName(_)
            | Self::InvalidFormat(_)
            | Self::InvalidLifecycleState(_)
            | Self::DuplicateParticipant(_)
            | Self::DuplicateTeam(_)
            | Self::EmptyRoster
            | Self::RosterTooSmall { .. }
            | Self::RosterTooLarge { .. }
            | Self::InvalidScore { .. } => ErrorKind::Validation,
            Self::InsufficientPool { .. }
            | Self::DrawRequired { .. }
            | Self::DrawNotApplicable { .. }
            | Self::FixturesAlreadyGenerated { .. }
            | Self::InvalidStatusTransition { .. }
            | Self::SetupClosed { .. }
            | Self::ResultsNotOpen { .. }
            | Self::ResetOnFinished { .. }
            | Self::IncompleteTournament { .. } => ErrorKind::Precondition,
            Self::TournamentNotFound(_) | Self::MatchNotFound(_) => ErrorKind::NotFound,
            Self::TournamentLocked { .. } => ErrorKind::Locked,
            Self::InconsistentMatch { .. } => ErrorKind::Internal,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidIdentifier { kind, reason } => {
                write!(f, "Invalid {kind} identifier: {reason}")
            }
            Self::ReservedIdentifier(id) => {
                write!(f, "Participant identifier '{id}' is reserved")
            }
            Self::InvalidTournamentName(msg) => write!(f, "Invalid tournament name: {msg}"),
            Self::InvalidFormat(value) => {
                write!(
                    f,
                    "Invalid tournament format '{value}'. Must be 'lottery' or 'users_only'"
                )
            }
            Self::InvalidLifecycleState(value) => {
                write!(f, "Invalid tournament status '{value}'")
            }
            Self::DuplicateParticipant(id) => {
                write!(f, "Participant '{id}' appears more than once on the roster")
            }
            Self::DuplicateTeam(id) => {
                write!(f, "Team '{id}' appears more than once in the draw pool")
            }
            Self::EmptyRoster => write!(f, "Roster is empty"),
            Self::RosterTooSmall { required, actual } => {
                write!(
                    f,
                    "Roster has {actual} participant(s); at least {required} are required"
                )
            }
            Self::RosterTooLarge { max, actual } => {
                write!(
                    f,
                    "Roster has {actual} participants; at most {max} can be scheduled"
                )
            }
            Self::InvalidScore { field, reason } => {
                write!(f, "Invalid score for {field}: {reason}")
            }
            Self::InsufficientPool {
                required,
                available,
            } => {
                write!(
                    f,
                    "Draw pool has {available} team(s) but {required} are required (short by {})",
                    required.saturating_sub(*available)
                )
            }
            Self::DrawRequired {
                tournament_id,
                missing,
            } => {
                write!(
                    f,
                    "Tournament {tournament_id} requires a draw before fixtures; unassigned: {}",
                    missing.join(", ")
                )
            }
            Self::DrawNotApplicable { tournament_id } => {
                write!(
                    f,
                    "Tournament {tournament_id} is users_only; there is no team draw"
                )
            }
            Self::FixturesAlreadyGenerated {
                tournament_id,
                existing,
            } => {
                write!(
                    f,
                    "Fixtures already generated for tournament {tournament_id} ({existing} matches)"
                )
            }
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Cannot move tournament from {from} to {to}")
            }
            Self::SetupClosed {
                tournament_id,
                status,
            } => {
                write!(
                    f,
                    "Tournament {tournament_id} is {status}; setup changes require upcoming"
                )
            }
            Self::ResultsNotOpen {
                tournament_id,
                status,
            } => {
                write!(
                    f,
                    "Tournament {tournament_id} is {status}; results can only be entered while active"
                )
            }
            Self::ResetOnFinished { tournament_id } => {
                write!(
                    f,
                    "Tournament {tournament_id} is finished and cannot be reset"
                )
            }
            Self::IncompleteTournament {
                tournament_id,
                completed,
                total,
            } => {
                write!(
                    f,
                    "Tournament {tournament_id} has {completed} of {total} matches completed"
                )
            }
            Self::TournamentLocked { tournament_id } => {
                write!(f, "Tournament {tournament_id} is finished and locked")
            }
            Self::TournamentNotFound(id) => write!(f, "Tournament '{id}' not found"),
            Self::MatchNotFound(id) => write!(f, "Match '{id}' not found"),
            Self::InconsistentMatch { match_id, reason } => {
                write!(f, "Match '{match_id}' is inconsistent: {reason}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
