// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Double round-robin fixture generation.
//!
//! Fixtures are produced with the circle method:
//!
//! 1. The roster is placed in a rotation. An odd roster is padded with a
//!    `Participant::Bye` so the rotation size is even.
//! 2. For each of `size - 1` rounds, position `i` is paired with position
//!    `size - 1 - i` for `i` in `0..size / 2`.
//! 3. After each round, every element except the first is rotated by one
//!    (the last element is reinserted at index 1).
//! 4. Within a round, the pairing is flipped when `round + pair_index` is
//!    even so the fixed element does not always play at home.
//!
//! The second leg mirrors the first with sides swapped, offset by the
//! number of first-leg rounds.
//!
//! ## Invariants
//!
//! - Every unordered pair meets exactly twice, once on each side
//! - Each participant plays at most once per matchday
//! - Matchdays run `1..=2 * (size - 1)` with no gaps
//! - Pairings involving the bye are never emitted

use crate::error::DomainError;
use crate::types::{ParticipantId, TeamId};
use crate::validation::validate_roster_size;
use std::collections::HashMap;

/// A seat in the scheduling rotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Participant {
    /// A roster member.
    Real(ParticipantId),
    /// Padding for an odd roster. Never persisted or displayed.
    Bye,
}

/// A roster member entering the schedule, with their drawn team if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entrant {
    /// The participant.
    pub participant_id: ParticipantId,
    /// The team drawn for the participant, for lottery tournaments.
    pub team_id: Option<TeamId>,
}

impl Entrant {
    /// Creates an entrant.
    #[must_use]
    pub const fn new(participant_id: ParticipantId, team_id: Option<TeamId>) -> Self {
        Self {
            participant_id,
            team_id,
        }
    }
}

/// A generated pairing, before it is given an identity and persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    /// 1-based round number.
    pub matchday: u32,
    /// Home participant.
    pub player_a: ParticipantId,
    /// Away participant.
    pub player_b: ParticipantId,
    /// Home team.
    pub team_a: Option<TeamId>,
    /// Away team.
    pub team_b: Option<TeamId>,
}

impl Fixture {
    /// Returns the reverse fixture for the second leg.
    #[must_use]
    fn reversed(&self, matchday_offset: u32) -> Self {
        Self {
            matchday: self.matchday + matchday_offset,
            player_a: self.player_b.clone(),
            player_b: self.player_a.clone(),
            team_a: self.team_b.clone(),
            team_b: self.team_a.clone(),
        }
    }
}

/// Returns the number of rounds in one leg for a roster of `roster_len`.
///
/// An odd roster is padded to the next even size first.
#[must_use]
pub const fn rounds_per_leg(roster_len: usize) -> usize {
    let size: usize = roster_len + roster_len % 2;
    size.saturating_sub(1)
}

/// Returns the number of real matches in a double round-robin.
#[must_use]
pub const fn expected_match_count(roster_len: usize) -> usize {
    roster_len * roster_len.saturating_sub(1)
}

/// Generates a double round-robin schedule.
///
/// # Arguments
///
/// * `entrants` - Roster members in roster order, with their drawn teams
///
/// # Returns
///
/// Fixtures ordered by matchday: the first leg followed by the mirrored second leg.
///
/// # Errors
///
/// Returns an error if the roster has fewer than two entrants or is too large.
pub fn generate_double_round_robin(entrants: &[Entrant]) -> Result<Vec<Fixture>, DomainError> {
    validate_roster_size(entrants.len())?;

    let teams: HashMap<&ParticipantId, Option<&TeamId>> = entrants
        .iter()
        .map(|e| (&e.participant_id, e.team_id.as_ref()))
        .collect();

    let mut rotation: Vec<Participant> = entrants
        .iter()
        .map(|e| Participant::Real(e.participant_id.clone()))
        .collect();
    if rotation.len() % 2 == 1 {
        rotation.push(Participant::Bye);
    }

    let size: usize = rotation.len();
    let rounds: usize = size - 1;
    let leg_offset: u32 = u32::try_from(rounds).map_err(|_| DomainError::RosterTooLarge {
        max: crate::validation::MAX_ROSTER_SIZE,
        actual: entrants.len(),
    })?;

    let mut first_leg: Vec<Fixture> = Vec::with_capacity(expected_match_count(entrants.len()) / 2);

    for (round, matchday) in (0..rounds).zip(1..=leg_offset) {
        for pair_index in 0..size / 2 {
            let left: &Participant = &rotation[pair_index];
            let right: &Participant = &rotation[size - 1 - pair_index];

            let (home, away) = if (round + pair_index) % 2 == 0 {
                (right, left)
            } else {
                (left, right)
            };

            // Pairings against the bye are rest days, not fixtures
            if let (Participant::Real(home_id), Participant::Real(away_id)) = (home, away) {
                first_leg.push(Fixture {
                    matchday,
                    player_a: home_id.clone(),
                    player_b: away_id.clone(),
                    team_a: teams.get(home_id).copied().flatten().cloned(),
                    team_b: teams.get(away_id).copied().flatten().cloned(),
                });
            }
        }

        if let Some(last) = rotation.pop() {
            rotation.insert(1, last);
        }
    }

    let second_leg: Vec<Fixture> = first_leg
        .iter()
        .map(|fixture| fixture.reversed(leg_offset))
        .collect();

    let mut fixtures: Vec<Fixture> = first_leg;
    fixtures.extend(second_leg);
    Ok(fixtures)
}
