// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreWrite;
use matchday_audit::{AuditEvent, StateSnapshot};
use matchday_domain::{Assignment, ChatMessage, Match, MatchId, Tournament};

/// Everything scoped to one tournament.
///
/// Commands are applied against this state; the store is not consulted
/// while a transition is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentState {
    /// The tournament, with roster and draw pool.
    pub tournament: Tournament,
    /// Its matches, ordered by matchday.
    pub matches: Vec<Match>,
    /// Its participant-to-team assignments.
    pub assignments: Vec<Assignment>,
    /// Its chat records.
    pub chat_messages: Vec<ChatMessage>,
}

impl TournamentState {
    /// Creates a state for a tournament with nothing attached yet.
    #[must_use]
    pub const fn new(tournament: Tournament) -> Self {
        Self {
            tournament,
            matches: Vec::new(),
            assignments: Vec::new(),
            chat_messages: Vec::new(),
        }
    }

    /// Finds a match by identifier.
    #[must_use]
    pub fn find_match(&self, match_id: &MatchId) -> Option<&Match> {
        self.matches.iter().find(|m| &m.id == match_id)
    }

    /// Converts the state to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "status={},roster={},draw_pool={},assignments={},matches={},completed={}",
            self.tournament.status,
            self.tournament.roster.len(),
            self.tournament.draw_pool.len(),
            self.assignments.len(),
            self.matches.len(),
            self.matches.iter().filter(|m| m.completed).count()
        ))
    }
}

/// Every record in the store, used for cross-tournament maintenance.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TournamentCatalog {
    /// Live tournaments.
    pub tournaments: Vec<Tournament>,
    /// All matches, live or orphaned.
    pub matches: Vec<Match>,
    /// All assignments, live or orphaned.
    pub assignments: Vec<Assignment>,
}

impl TournamentCatalog {
    /// Converts the catalog to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(format!(
            "tournaments={},matches={},assignments={}",
            self.tournaments.len(),
            self.matches.len(),
            self.assignments.len()
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: the writes and the audit event are persisted
/// together or not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: TournamentState,
    /// Storage mutations that realise the new state.
    pub writes: Vec<StoreWrite>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// The result of an operation on the catalog rather than one tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogResult<T> {
    /// What the operation produced.
    pub outcome: T,
    /// Storage mutations to apply.
    pub writes: Vec<StoreWrite>,
    /// The audit event recording this operation.
    pub audit_event: AuditEvent,
}
