// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Random team draw for lottery tournaments.
//!
//! The draw pool is deduplicated (first occurrence wins), shuffled with the
//! caller's random source, and dealt to the roster in roster order.
//! Surplus teams stay undrawn.

use crate::error::DomainError;
use crate::types::{ParticipantId, TeamId};
use rand::seq::SliceRandom;
use std::collections::HashSet;

/// A single participant-to-team pairing produced by a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnTeam {
    /// The participant.
    pub participant_id: ParticipantId,
    /// The team dealt to the participant.
    pub team_id: TeamId,
}

/// Removes repeated teams from a pool, keeping first occurrences in order.
#[must_use]
pub fn distinct_teams(pool: &[TeamId]) -> Vec<TeamId> {
    let mut seen: HashSet<&TeamId> = HashSet::with_capacity(pool.len());
    pool.iter()
        .filter(|team_id| seen.insert(*team_id))
        .cloned()
        .collect()
}

/// Draws one distinct team for every roster member.
///
/// # Arguments
///
/// * `roster` - Participants in roster order
/// * `pool` - Candidate teams; duplicates are ignored
/// * `rng` - Random source used to shuffle the pool
///
/// # Returns
///
/// One pairing per roster member, in roster order. No team is dealt twice.
///
/// # Errors
///
/// Returns `InsufficientPool` if the pool has fewer distinct teams than the
/// roster has members.
pub fn draw_teams<R: rand::Rng + ?Sized>(
    roster: &[ParticipantId],
    pool: &[TeamId],
    rng: &mut R,
) -> Result<Vec<DrawnTeam>, DomainError> {
    let mut candidates: Vec<TeamId> = distinct_teams(pool);
    if candidates.len() < roster.len() {
        return Err(DomainError::InsufficientPool {
            required: roster.len(),
            available: candidates.len(),
        });
    }

    candidates.shuffle(rng);

    Ok(roster
        .iter()
        .zip(candidates)
        .map(|(participant_id, team_id)| DrawnTeam {
            participant_id: participant_id.clone(),
            team_id,
        })
        .collect())
}
