// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Referential integrity across tournaments.
//!
//! Matches and assignments carry a tournament identifier but are not
//! otherwise tied to a live tournament, so records can outlive a tournament
//! removed outside the engine. These are orphans: they are found by
//! scanning and removed in one atomic purge.

use crate::state::{TournamentCatalog, TournamentState};
use matchday_domain::{AssignmentId, MatchId, TournamentId};
use std::collections::HashSet;

/// Counts of records removed with a tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeReport {
    /// The deleted tournament.
    pub tournament_id: TournamentId,
    /// Matches removed.
    pub matches: usize,
    /// Assignments removed.
    pub assignments: usize,
    /// Chat records removed.
    pub chat_messages: usize,
    /// Roster entries removed.
    pub roster_entries: usize,
    /// Draw pool entries removed.
    pub draw_pool_entries: usize,
}

impl CascadeReport {
    /// Builds the report for deleting everything in `state`.
    #[must_use]
    pub fn for_state(state: &TournamentState) -> Self {
        Self {
            tournament_id: state.tournament.id.clone(),
            matches: state.matches.len(),
            assignments: state.assignments.len(),
            chat_messages: state.chat_messages.len(),
            roster_entries: state.tournament.roster.len(),
            draw_pool_entries: state.tournament.draw_pool.len(),
        }
    }
}

/// Records whose tournament no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OrphanReport {
    /// Orphaned matches.
    pub match_ids: Vec<MatchId>,
    /// Orphaned assignments.
    pub assignment_ids: Vec<AssignmentId>,
}

impl OrphanReport {
    /// Total orphaned records.
    #[must_use]
    pub fn total(&self) -> usize {
        self.match_ids.len() + self.assignment_ids.len()
    }

    /// Returns whether nothing is orphaned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Finds matches and assignments that reference no live tournament.
#[must_use]
pub fn scan_orphans(catalog: &TournamentCatalog) -> OrphanReport {
    let live: HashSet<&TournamentId> = catalog.tournaments.iter().map(|t| &t.id).collect();

    OrphanReport {
        match_ids: catalog
            .matches
            .iter()
            .filter(|m| !live.contains(&m.tournament_id))
            .map(|m| m.id.clone())
            .collect(),
        assignment_ids: catalog
            .assignments
            .iter()
            .filter(|a| !live.contains(&a.tournament_id))
            .map(|a| a.id.clone())
            .collect(),
    }
}
