// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixture readiness and tournament progress.
//!
//! Both are **computed**, not stored. They are pure functions of the current
//! tournament, its assignments and its matches.

use crate::error::DomainError;
use crate::types::{Assignment, Match, ParticipantId, Tournament, TournamentStatus};
use crate::validation::MIN_ROSTER_SIZE;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Whether fixtures can be generated for a tournament, and if not, why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureReadiness {
    /// True when there are no blocking reasons.
    pub is_ready: bool,
    /// Human-readable reasons generation would be rejected.
    pub blocking_reasons: Vec<String>,
    /// Roster members without a drawn team (lottery tournaments only).
    pub unassigned_participants: Vec<ParticipantId>,
    /// Matches that already exist.
    pub existing_matches: usize,
}

/// Completion of a tournament's fixtures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchProgress {
    /// Completed matches.
    pub completed: usize,
    /// All matches.
    pub total: usize,
    /// `completed / total * 100`, rounded down. Zero without matches.
    pub percent: u8,
}

impl MatchProgress {
    /// Returns whether every match is completed. False without matches.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Lists roster members with no assignment, in roster order.
#[must_use]
pub fn unassigned_participants(
    roster: &[ParticipantId],
    assignments: &[Assignment],
) -> Vec<ParticipantId> {
    let assigned: HashSet<&ParticipantId> = assignments.iter().map(|a| &a.participant_id).collect();
    roster
        .iter()
        .filter(|participant_id| !assigned.contains(participant_id))
        .cloned()
        .collect()
}

/// Evaluates whether fixtures can be generated.
///
/// Generation requires all of:
/// - status `Upcoming`
/// - at least two roster members
/// - a team for every roster member when the format requires a draw
/// - no existing matches
///
/// # Arguments
///
/// * `tournament` - The tournament
/// * `assignments` - Its current assignments
/// * `existing_matches` - How many matches it currently has
#[must_use]
pub fn evaluate_fixture_readiness(
    tournament: &Tournament,
    assignments: &[Assignment],
    existing_matches: usize,
) -> FixtureReadiness {
    let mut blocking_reasons: Vec<String> = Vec::new();

    if tournament.status != TournamentStatus::Upcoming {
        blocking_reasons.push(format!(
            "Tournament is {}; fixtures can only be generated while upcoming",
            tournament.status
        ));
    }

    if tournament.roster.len() < MIN_ROSTER_SIZE {
        blocking_reasons.push(format!(
            "Roster has {} participant(s); at least {MIN_ROSTER_SIZE} are required",
            tournament.roster.len()
        ));
    }

    let unassigned: Vec<ParticipantId> = if tournament.format.requires_draw() {
        unassigned_participants(&tournament.roster, assignments)
    } else {
        Vec::new()
    };
    if !unassigned.is_empty() {
        blocking_reasons.push(format!(
            "{} participant(s) have no drawn team",
            unassigned.len()
        ));
    }

    if existing_matches > 0 {
        blocking_reasons.push(format!("{existing_matches} matches already exist"));
    }

    FixtureReadiness {
        is_ready: blocking_reasons.is_empty(),
        blocking_reasons,
        unassigned_participants: unassigned,
        existing_matches,
    }
}

/// Computes completion progress over a tournament's matches.
#[must_use]
pub fn compute_progress(matches: &[Match]) -> MatchProgress {
    let total: usize = matches.len();
    let completed: usize = matches.iter().filter(|m| m.completed).count();
    let percent: u8 = if total == 0 {
        0
    } else {
        // completed <= total, so the quotient is at most 100
        u8::try_from(completed * 100 / total).unwrap_or(100)
    };
    MatchProgress {
        completed,
        total,
        percent,
    }
}

/// Checks that a tournament can be finished.
///
/// # Errors
///
/// Returns `TournamentLocked` if already finished, `InvalidStatusTransition`
/// if not active, or `IncompleteTournament` if any match is open.
pub fn ensure_finishable(tournament: &Tournament, progress: &MatchProgress) -> Result<(), DomainError> {
    if tournament.status.is_locked() {
        return Err(DomainError::TournamentLocked {
            tournament_id: tournament.id.as_str().to_string(),
        });
    }
    if !tournament
        .status
        .can_transition_to(TournamentStatus::Finished)
    {
        return Err(DomainError::InvalidStatusTransition {
            from: tournament.status,
            to: TournamentStatus::Finished,
        });
    }
    if !progress.is_complete() {
        return Err(DomainError::IncompleteTournament {
            tournament_id: tournament.id.as_str().to_string(),
            completed: progress.completed,
            total: progress.total,
        });
    }
    Ok(())
}
