// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A store held entirely in memory.
//!
//! Each batch is applied to a copy of the current contents and swapped in
//! only when every write succeeded.

use crate::store::{StoreError, StoreWrite, TournamentStore};
use matchday_audit::AuditEvent;
use matchday_domain::{Assignment, ChatMessage, Match, MatchId, Tournament, TournamentId};

/// In-memory implementation of [`TournamentStore`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tournaments: Vec<Tournament>,
    matches: Vec<Match>,
    assignments: Vec<Assignment>,
    chat_messages: Vec<ChatMessage>,
    audit_events: Vec<AuditEvent>,
    next_event_id: i64,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tournament_mut(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<&mut Tournament, StoreError> {
        self.tournaments
            .iter_mut()
            .find(|t| &t.id == tournament_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "tournament",
                id: tournament_id.as_str().to_string(),
            })
    }

    fn match_mut(&mut self, match_id: &MatchId) -> Result<&mut Match, StoreError> {
        self.matches
            .iter_mut()
            .find(|m| &m.id == match_id)
            .ok_or_else(|| StoreError::NotFound {
                entity: "match",
                id: match_id.as_str().to_string(),
            })
    }

    fn apply_write(&mut self, write: &StoreWrite) -> Result<(), StoreError> {
        match write {
            StoreWrite::CreateTournament(tournament) => {
                if self.tournaments.iter().any(|t| t.id == tournament.id) {
                    return Err(StoreError::Conflict(format!(
                        "tournament '{}' already exists",
                        tournament.id
                    )));
                }
                self.tournaments.push(tournament.clone());
            }
            StoreWrite::SetStatus {
                tournament_id,
                status,
            } => {
                self.tournament_mut(tournament_id)?.status = *status;
            }
            StoreWrite::SetRoster {
                tournament_id,
                participants,
            } => {
                self.tournament_mut(tournament_id)?
                    .roster
                    .clone_from(participants);
            }
            StoreWrite::SetDrawPool {
                tournament_id,
                teams,
            } => {
                self.tournament_mut(tournament_id)?.draw_pool.clone_from(teams);
            }
            StoreWrite::ReplaceAssignments {
                tournament_id,
                assignments,
            } => {
                self.assignments.retain(|a| &a.tournament_id != tournament_id);
                for assignment in assignments {
                    let taken: bool = self.assignments.iter().any(|a| {
                        a.tournament_id == assignment.tournament_id
                            && (a.participant_id == assignment.participant_id
                                || a.team_id == assignment.team_id)
                    });
                    if taken {
                        return Err(StoreError::Conflict(format!(
                            "assignment {} duplicates a participant or team",
                            assignment.id
                        )));
                    }
                    self.assignments.push(assignment.clone());
                }
            }
            StoreWrite::InsertMatches(matches) => {
                for m in matches {
                    if self.matches.iter().any(|existing| existing.id == m.id) {
                        return Err(StoreError::Conflict(format!(
                            "match '{}' already exists",
                            m.id
                        )));
                    }
                    self.matches.push(m.clone());
                }
            }
            StoreWrite::SetMatchResult { match_id, score } => {
                self.match_mut(match_id)?.record(*score);
            }
            StoreWrite::ClearMatchResult { match_id } => {
                self.match_mut(match_id)?.reopen();
            }
            StoreWrite::DeleteMatchesForTournament { tournament_id } => {
                self.matches.retain(|m| &m.tournament_id != tournament_id);
            }
            StoreWrite::DeleteTournament { tournament_id } => {
                self.tournament_mut(tournament_id)?;
                self.tournaments.retain(|t| &t.id != tournament_id);
                self.matches.retain(|m| &m.tournament_id != tournament_id);
                self.assignments.retain(|a| &a.tournament_id != tournament_id);
                self.chat_messages
                    .retain(|c| c.tournament_id.as_ref() != Some(tournament_id));
            }
            StoreWrite::DeleteMatches(match_ids) => {
                self.matches.retain(|m| !match_ids.contains(&m.id));
            }
            StoreWrite::DeleteAssignments(assignment_ids) => {
                self.assignments.retain(|a| !assignment_ids.contains(&a.id));
            }
            StoreWrite::PostChatMessage(message) => {
                self.chat_messages.push(message.clone());
            }
        }
        Ok(())
    }
}

impl TournamentStore for InMemoryStore {
    fn list_tournaments(&mut self) -> Result<Vec<Tournament>, StoreError> {
        Ok(self.tournaments.clone())
    }

    fn get_tournament(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Option<Tournament>, StoreError> {
        Ok(self
            .tournaments
            .iter()
            .find(|t| &t.id == tournament_id)
            .cloned())
    }

    fn list_matches(&mut self, tournament_id: &TournamentId) -> Result<Vec<Match>, StoreError> {
        let mut matches: Vec<Match> = self
            .matches
            .iter()
            .filter(|m| &m.tournament_id == tournament_id)
            .cloned()
            .collect();
        // Stable, so generation order is kept within a matchday
        matches.sort_by_key(|m| m.matchday);
        Ok(matches)
    }

    fn get_match(&mut self, match_id: &MatchId) -> Result<Option<Match>, StoreError> {
        Ok(self.matches.iter().find(|m| &m.id == match_id).cloned())
    }

    fn list_assignments(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| &a.tournament_id == tournament_id)
            .cloned()
            .collect())
    }

    fn list_all_matches(&mut self) -> Result<Vec<Match>, StoreError> {
        Ok(self.matches.clone())
    }

    fn list_all_assignments(&mut self) -> Result<Vec<Assignment>, StoreError> {
        Ok(self.assignments.clone())
    }

    fn list_chat_messages(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(self
            .chat_messages
            .iter()
            .filter(|c| c.tournament_id.as_ref() == Some(tournament_id))
            .cloned()
            .collect())
    }

    fn list_audit_events(
        &mut self,
        tournament_id: Option<&TournamentId>,
    ) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(self
            .audit_events
            .iter()
            .filter(|e| tournament_id.is_none() || e.tournament_id.as_ref() == tournament_id)
            .cloned()
            .collect())
    }

    fn persist_transition(
        &mut self,
        writes: &[StoreWrite],
        audit_event: &AuditEvent,
    ) -> Result<i64, StoreError> {
        let mut staged: Self = self.clone();
        for write in writes {
            staged.apply_write(write)?;
        }

        staged.next_event_id += 1;
        let event_id: i64 = staged.next_event_id;
        staged
            .audit_events
            .push(audit_event.clone().with_event_id(event_id));

        *self = staged;
        Ok(event_id)
    }
}
