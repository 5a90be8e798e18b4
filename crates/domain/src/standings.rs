// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! League table derived from recorded results.
//!
//! Standings are **computed**, not stored. They are a pure function of the
//! roster, the matches, and a directory that resolves display names.
//!
//! Ranking: points, then goal difference, then goals for, all descending.
//! Exact ties keep roster order.

use crate::types::{Match, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Points awarded for a win.
pub const POINTS_FOR_WIN: u32 = 3;

/// Points awarded to each side for a draw.
pub const POINTS_FOR_DRAW: u32 = 1;

/// Points awarded for a loss. Losses add nothing to the tally.
pub const POINTS_FOR_LOSS: u32 = 0;

/// Display name used when the directory does not know a participant.
pub const UNKNOWN_PARTICIPANT_NAME: &str = "Unknown participant";

/// Resolves participant identities to display names.
///
/// The user directory lives outside the engine; any lookup that can answer
/// "what is this participant called" can back the standings.
pub trait ParticipantDirectory {
    /// Returns the display name for a participant, if known.
    fn display_name(&self, participant_id: &ParticipantId) -> Option<String>;
}

impl ParticipantDirectory for HashMap<ParticipantId, String> {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<String> {
        self.get(participant_id).cloned()
    }
}

impl ParticipantDirectory for BTreeMap<ParticipantId, String> {
    fn display_name(&self, participant_id: &ParticipantId) -> Option<String> {
        self.get(participant_id).cloned()
    }
}

/// A directory that knows nobody. Every row gets the placeholder name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyDirectory;

impl ParticipantDirectory for EmptyDirectory {
    fn display_name(&self, _participant_id: &ParticipantId) -> Option<String> {
        None
    }
}

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    /// 1-based rank.
    pub position: usize,
    /// The participant.
    pub participant_id: ParticipantId,
    /// Resolved display name.
    pub display_name: String,
    /// Completed matches played.
    pub played: u32,
    /// Matches won.
    pub won: u32,
    /// Matches drawn.
    pub drawn: u32,
    /// Matches lost.
    pub lost: u32,
    /// Goals scored.
    pub goals_for: u32,
    /// Goals conceded.
    pub goals_against: u32,
    /// `goals_for - goals_against`.
    pub goal_difference: i64,
    /// League points.
    pub points: u32,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    played: u32,
    won: u32,
    drawn: u32,
    lost: u32,
    goals_for: u32,
    goals_against: u32,
    points: u32,
}

impl Tally {
    const fn record(&mut self, scored: u32, conceded: u32) {
        self.played += 1;
        self.goals_for = self.goals_for.saturating_add(scored);
        self.goals_against = self.goals_against.saturating_add(conceded);
        if scored > conceded {
            self.won += 1;
            self.points += POINTS_FOR_WIN;
        } else if scored == conceded {
            self.drawn += 1;
            self.points += POINTS_FOR_DRAW;
        } else {
            self.lost += 1;
        }
    }

    fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }
}

/// Computes the standings table.
///
/// # Arguments
///
/// * `roster` - Participants in roster order; exactly one row each
/// * `matches` - Matches of the tournament, in any order
/// * `directory` - Display name lookup
///
/// # Returns
///
/// Rows ranked by points, goal difference and goals for. Only completed
/// matches between two roster members count.
#[must_use]
pub fn compute_standings<D: ParticipantDirectory + ?Sized>(
    roster: &[ParticipantId],
    matches: &[Match],
    directory: &D,
) -> Vec<StandingRow> {
    let mut tallies: HashMap<&ParticipantId, Tally> =
        roster.iter().map(|id| (id, Tally::default())).collect();

    for m in matches {
        let Some(score) = m.recorded_score() else {
            continue;
        };
        if !tallies.contains_key(&m.player_a) || !tallies.contains_key(&m.player_b) {
            continue;
        }

        if let Some(home) = tallies.get_mut(&m.player_a) {
            home.record(score.a, score.b);
        }
        if let Some(away) = tallies.get_mut(&m.player_b) {
            away.record(score.b, score.a);
        }
    }

    let mut ranked: Vec<(&ParticipantId, Tally)> = roster
        .iter()
        .map(|id| (id, tallies.get(id).copied().unwrap_or_default()))
        .collect();

    // sort_by is stable, so exact ties keep roster order
    ranked.sort_by(|(_, left), (_, right)| {
        right
            .points
            .cmp(&left.points)
            .then_with(|| right.goal_difference().cmp(&left.goal_difference()))
            .then_with(|| right.goals_for.cmp(&left.goals_for))
    });

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, (participant_id, tally))| StandingRow {
            position: index + 1,
            participant_id: participant_id.clone(),
            display_name: directory
                .display_name(participant_id)
                .unwrap_or_else(|| UNKNOWN_PARTICIPANT_NAME.to_string()),
            played: tally.played,
            won: tally.won,
            drawn: tally.drawn,
            lost: tally.lost,
            goals_for: tally.goals_for,
            goals_against: tally.goals_against,
            goal_difference: tally.goal_difference(),
            points: tally.points,
        })
        .collect()
}
