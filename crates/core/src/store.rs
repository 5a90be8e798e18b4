// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The repository seam between the engine and storage.
//!
//! Reads are plain queries. Every mutation is expressed as a batch of
//! [`StoreWrite`]s plus the [`AuditEvent`] that records it; a store applies
//! the whole batch atomically or not at all.

use matchday_audit::AuditEvent;
use matchday_domain::{
    Assignment, AssignmentId, ChatMessage, Match, MatchId, ParticipantId, Scoreline, TeamId,
    Tournament, TournamentId, TournamentStatus,
};

/// A single storage mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    /// Insert a new tournament, including its roster and draw pool.
    CreateTournament(Tournament),
    /// Change a tournament's lifecycle state.
    SetStatus {
        /// The tournament.
        tournament_id: TournamentId,
        /// The new state.
        status: TournamentStatus,
    },
    /// Replace a tournament's roster.
    SetRoster {
        /// The tournament.
        tournament_id: TournamentId,
        /// Participants in roster order.
        participants: Vec<ParticipantId>,
    },
    /// Replace a tournament's draw pool.
    SetDrawPool {
        /// The tournament.
        tournament_id: TournamentId,
        /// Teams in pool order.
        teams: Vec<TeamId>,
    },
    /// Replace every assignment of a tournament.
    ReplaceAssignments {
        /// The tournament.
        tournament_id: TournamentId,
        /// The new assignments. Empty clears them.
        assignments: Vec<Assignment>,
    },
    /// Insert generated matches, in order.
    InsertMatches(Vec<Match>),
    /// Record scores and mark a match completed.
    SetMatchResult {
        /// The match.
        match_id: MatchId,
        /// The scores.
        score: Scoreline,
    },
    /// Clear the completed flag of a match. Scores are kept.
    ClearMatchResult {
        /// The match.
        match_id: MatchId,
    },
    /// Delete every match of a tournament.
    DeleteMatchesForTournament {
        /// The tournament.
        tournament_id: TournamentId,
    },
    /// Delete a tournament and everything scoped to it.
    DeleteTournament {
        /// The tournament.
        tournament_id: TournamentId,
    },
    /// Delete matches by identifier.
    DeleteMatches(Vec<MatchId>),
    /// Delete assignments by identifier.
    DeleteAssignments(Vec<AssignmentId>),
    /// Insert a chat record.
    PostChatMessage(ChatMessage),
}

impl StoreWrite {
    /// Returns a short name for logging.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateTournament(_) => "create_tournament",
            Self::SetStatus { .. } => "set_status",
            Self::SetRoster { .. } => "set_roster",
            Self::SetDrawPool { .. } => "set_draw_pool",
            Self::ReplaceAssignments { .. } => "replace_assignments",
            Self::InsertMatches(_) => "insert_matches",
            Self::SetMatchResult { .. } => "set_match_result",
            Self::ClearMatchResult { .. } => "clear_match_result",
            Self::DeleteMatchesForTournament { .. } => "delete_matches_for_tournament",
            Self::DeleteTournament { .. } => "delete_tournament",
            Self::DeleteMatches(_) => "delete_matches",
            Self::DeleteAssignments(_) => "delete_assignments",
            Self::PostChatMessage(_) => "post_chat_message",
        }
    }
}

/// Errors reported by a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A write targeted a record that does not exist.
    NotFound {
        /// What kind of record.
        entity: &'static str,
        /// Its identifier.
        id: String,
    },
    /// A write would break a uniqueness or consistency constraint.
    Conflict(String),
    /// The storage backend failed.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, id } => write!(f, "{entity} '{id}' not found in store"),
            Self::Conflict(msg) => write!(f, "Store conflict: {msg}"),
            Self::Backend(msg) => write!(f, "Store backend failure: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Storage for tournaments, fixtures, assignments and the audit trail.
///
/// Matches are returned ordered by matchday, then in generation order.
/// Assignments are returned in roster order where the store can tell,
/// otherwise in insertion order.
pub trait TournamentStore {
    /// Lists every tournament, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_tournaments(&mut self) -> Result<Vec<Tournament>, StoreError>;

    /// Loads one tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_tournament(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Option<Tournament>, StoreError>;

    /// Lists the matches of one tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_matches(&mut self, tournament_id: &TournamentId) -> Result<Vec<Match>, StoreError>;

    /// Loads one match.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_match(&mut self, match_id: &MatchId) -> Result<Option<Match>, StoreError>;

    /// Lists the assignments of one tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_assignments(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<Assignment>, StoreError>;

    /// Lists every match, including those whose tournament is gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_all_matches(&mut self) -> Result<Vec<Match>, StoreError>;

    /// Lists every assignment, including those whose tournament is gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_all_assignments(&mut self) -> Result<Vec<Assignment>, StoreError>;

    /// Lists the chat records of one tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_chat_messages(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<ChatMessage>, StoreError>;

    /// Lists audit events, oldest first.
    ///
    /// # Arguments
    ///
    /// * `tournament_id` - Only events for this tournament, or every event when `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_audit_events(
        &mut self,
        tournament_id: Option<&TournamentId>,
    ) -> Result<Vec<AuditEvent>, StoreError>;

    /// Applies a batch of writes and records its audit event, atomically.
    ///
    /// # Returns
    ///
    /// The identifier assigned to the audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails. Nothing is applied in that case.
    fn persist_transition(
        &mut self,
        writes: &[StoreWrite],
        audit_event: &AuditEvent,
    ) -> Result<i64, StoreError>;
}
