// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Declares an opaque string identifier newtype.
///
/// Identifiers carry no structure; the engine only relies on uniqueness.
/// Freshly generated identifiers are UUID v4 strings.
macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier value.
            #[must_use]
            pub fn new(value: &str) -> Self {
                Self(value.to_string())
            }

            /// Generates a fresh, unique identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Returns the identifier value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

identifier! {
    /// Identifies a tournament.
    TournamentId
}

identifier! {
    /// Identifies a participant (a manager on a tournament roster).
    ///
    /// Participant identities belong to the external user directory.
    ParticipantId
}

identifier! {
    /// Identifies a team asset that can be drawn in a lottery.
    TeamId
}

identifier! {
    /// Identifies a single fixture.
    MatchId
}

identifier! {
    /// Identifies a participant-to-team assignment.
    AssignmentId
}

identifier! {
    /// Identifies a tournament-scoped chat message.
    ChatMessageId
}

/// How teams are attached to participants in a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Every participant receives a team from a random draw before fixtures exist.
    Lottery,
    /// Participants play without drawn teams.
    UsersOnly,
}

impl TournamentFormat {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lottery => "lottery",
            Self::UsersOnly => "users_only",
        }
    }

    /// Returns whether fixtures require a completed draw.
    #[must_use]
    pub const fn requires_draw(&self) -> bool {
        matches!(self, Self::Lottery)
    }
}

impl FromStr for TournamentFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lottery" => Ok(Self::Lottery),
            "users_only" => Ok(Self::UsersOnly),
            _ => Err(DomainError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for TournamentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a tournament.
///
/// Explicit lifecycle states govern which operations are permitted:
/// setup (roster, draw pool, lottery, fixtures) only while `Upcoming`,
/// result entry only while `Active`, nothing once `Finished`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    /// Created, roster and draw being prepared. No fixtures exist.
    #[default]
    Upcoming,
    /// Fixtures generated. Results are being entered.
    Active,
    /// Every fixture completed and the tournament closed. Read-only.
    Finished,
}

impl TournamentStatus {
    /// Converts this lifecycle state to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `Upcoming` → `Active` (fixture generation)
    /// - `Active` → `Finished` (finish)
    /// - `Upcoming` → `Upcoming` and `Active` → `Upcoming` (reset)
    ///
    /// Nothing leaves `Finished`.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Upcoming | Self::Active, Self::Upcoming)
                | (Self::Upcoming, Self::Active)
                | (Self::Active, Self::Finished)
        )
    }

    /// Returns whether the tournament is frozen against all mutation.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Returns whether roster, draw pool, lottery and fixture generation are allowed.
    #[must_use]
    pub const fn allows_setup_changes(&self) -> bool {
        matches!(self, Self::Upcoming)
    }

    /// Returns whether match results may be recorded or undone.
    #[must_use]
    pub const fn accepts_results(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl FromStr for TournamentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            _ => Err(DomainError::InvalidLifecycleState(s.to_string())),
        }
    }
}

impl std::fmt::Display for TournamentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A head-to-head tournament among a fixed roster of participants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    /// The tournament identifier.
    pub id: TournamentId,
    /// Display name.
    pub name: String,
    /// Whether a team draw is part of the setup.
    pub format: TournamentFormat,
    /// Current lifecycle state.
    pub status: TournamentStatus,
    /// Participants in roster order. No duplicates.
    pub roster: Vec<ParticipantId>,
    /// Teams eligible for the draw. Only meaningful for `Lottery` tournaments.
    pub draw_pool: Vec<TeamId>,
    /// When the tournament was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Tournament {
    /// Creates a new `Upcoming` tournament with an empty roster and draw pool.
    ///
    /// # Arguments
    ///
    /// * `name` - The display name
    /// * `format` - The tournament format
    #[must_use]
    pub fn new(name: &str, format: TournamentFormat) -> Self {
        Self {
            id: TournamentId::generate(),
            name: name.trim().to_string(),
            format,
            status: TournamentStatus::Upcoming,
            roster: Vec::new(),
            draw_pool: Vec::new(),
            created_at: OffsetDateTime::now_utc(),
        }
    }

    /// Checks whether a participant is on the roster.
    #[must_use]
    pub fn has_participant(&self, participant_id: &ParticipantId) -> bool {
        self.roster.contains(participant_id)
    }
}

/// Maps one participant to one team within a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    /// The assignment identifier.
    pub id: AssignmentId,
    /// The owning tournament.
    pub tournament_id: TournamentId,
    /// The participant receiving the team.
    pub participant_id: ParticipantId,
    /// The drawn team.
    pub team_id: TeamId,
}

impl Assignment {
    /// Creates a new assignment with a fresh identifier.
    #[must_use]
    pub fn new(tournament_id: TournamentId, participant_id: ParticipantId, team_id: TeamId) -> Self {
        Self {
            id: AssignmentId::generate(),
            tournament_id,
            participant_id,
            team_id,
        }
    }
}

/// The result of a head-to-head match, from side A's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchOutcome {
    /// Side A scored strictly more.
    WinA,
    /// Both sides scored the same.
    Draw,
    /// Side B scored strictly more.
    WinB,
}

/// A validated pair of non-negative scores.
///
/// Both scores are always present together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreline {
    /// Goals scored by side A (home).
    pub a: u32,
    /// Goals scored by side B (away).
    pub b: u32,
}

impl Scoreline {
    /// Creates a scoreline.
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        Self { a, b }
    }

    /// Returns the outcome of this scoreline.
    #[must_use]
    pub const fn outcome(&self) -> MatchOutcome {
        if self.a > self.b {
            MatchOutcome::WinA
        } else if self.a < self.b {
            MatchOutcome::WinB
        } else {
            MatchOutcome::Draw
        }
    }
}

/// Ledger state of a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchState {
    /// No result counts towards standings.
    Scheduled,
    /// A result is recorded and counts towards standings.
    Recorded,
}

/// A fixture between two participants on a given matchday.
///
/// Side A is the home side, side B the away side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// The match identifier.
    pub id: MatchId,
    /// The owning tournament.
    pub tournament_id: TournamentId,
    /// 1-based round number.
    pub matchday: u32,
    /// Home participant.
    pub player_a: ParticipantId,
    /// Away participant.
    pub player_b: ParticipantId,
    /// Home team, copied from the draw at generation time.
    pub team_a: Option<TeamId>,
    /// Away team, copied from the draw at generation time.
    pub team_b: Option<TeamId>,
    /// Last entered scores. Kept when a result is undone.
    pub score: Option<Scoreline>,
    /// Whether the result counts.
    pub completed: bool,
}

impl Match {
    /// Returns the ledger state of this match.
    #[must_use]
    pub const fn state(&self) -> MatchState {
        if self.completed {
            MatchState::Recorded
        } else {
            MatchState::Scheduled
        }
    }

    /// Returns the scoreline only if the result currently counts.
    #[must_use]
    pub const fn recorded_score(&self) -> Option<Scoreline> {
        if self.completed { self.score } else { None }
    }

    /// Checks whether a participant plays in this match.
    #[must_use]
    pub fn involves(&self, participant_id: &ParticipantId) -> bool {
        &self.player_a == participant_id || &self.player_b == participant_id
    }

    /// Records a result, moving the match to `Recorded`.
    pub const fn record(&mut self, scoreline: Scoreline) {
        self.score = Some(scoreline);
        self.completed = true;
    }

    /// Moves the match back to `Scheduled`, keeping the last scores for re-editing.
    pub const fn reopen(&mut self) {
        self.completed = false;
    }

    /// Checks the score/completion invariant.
    ///
    /// # Errors
    ///
    /// Returns an error if the match is completed without scores.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.completed && self.score.is_none() {
            return Err(DomainError::InconsistentMatch {
                match_id: self.id.as_str().to_string(),
                reason: String::from("completed match has no scores"),
            });
        }
        if self.player_a == self.player_b {
            return Err(DomainError::InconsistentMatch {
                match_id: self.id.as_str().to_string(),
                reason: String::from("participant plays against themselves"),
            });
        }
        Ok(())
    }
}

/// A tournament-scoped chat record.
///
/// Chat itself is provided elsewhere; records are only tracked here so that
/// deleting a tournament can remove them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The message identifier.
    pub id: ChatMessageId,
    /// The tournament the message was posted in, if any.
    pub tournament_id: Option<TournamentId>,
    /// Who posted the message.
    pub author: ParticipantId,
    /// Message text.
    pub body: String,
    /// When the message was posted.
    #[serde(with = "time::serde::rfc3339")]
    pub posted_at: OffsetDateTime,
}

impl ChatMessage {
    /// Creates a message posted now.
    #[must_use]
    pub fn new(tournament_id: Option<TournamentId>, author: ParticipantId, body: &str) -> Self {
        Self {
            id: ChatMessageId::generate(),
            tournament_id,
            author,
            body: body.to_string(),
            posted_at: OffsetDateTime::now_utc(),
        }
    }
}
