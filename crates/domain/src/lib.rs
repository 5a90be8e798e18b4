// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod fixtures;
mod lottery;
mod readiness;
mod standings;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use fixtures::{
    Entrant, Fixture, Participant, expected_match_count, generate_double_round_robin,
    rounds_per_leg,
};
pub use lottery::{DrawnTeam, distinct_teams, draw_teams};
pub use readiness::{
    FixtureReadiness, MatchProgress, compute_progress, ensure_finishable,
    evaluate_fixture_readiness, unassigned_participants,
};
pub use standings::{
    EmptyDirectory, POINTS_FOR_DRAW, POINTS_FOR_LOSS, POINTS_FOR_WIN, ParticipantDirectory,
    StandingRow, UNKNOWN_PARTICIPANT_NAME, compute_standings,
};

// Re-export public types
pub use error::{DomainError, ErrorKind};
pub use types::{
    Assignment, AssignmentId, ChatMessage, ChatMessageId, Match, MatchId, MatchOutcome,
    MatchState, ParticipantId, Scoreline, TeamId, Tournament, TournamentFormat, TournamentId,
    TournamentStatus,
};
pub use validation::{
    MAX_ROSTER_SIZE, MAX_SCORE, MIN_ROSTER_SIZE, RESERVED_BYE_IDENTIFIER, validate_draw_pool,
    validate_participant_id, validate_raw_score, validate_roster, validate_roster_capacity,
    validate_roster_size, validate_score, validate_tournament_name,
};
