// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The engine: loads state from a store, applies commands, persists the
//! resulting batch, and answers read-only questions.

use crate::apply::{apply, apply_create, apply_delete, apply_lottery, apply_purge};
use crate::command::Command;
use crate::error::CoreError;
use crate::integrity::{CascadeReport, OrphanReport, scan_orphans};
use crate::state::{CatalogResult, TournamentCatalog, TournamentState, TransitionResult};
use crate::store::{StoreError, TournamentStore};
use matchday_audit::{Actor, AuditEvent, Cause};
use matchday_domain::{
    Assignment, ChatMessage, DomainError, FixtureReadiness, Match, MatchId, MatchProgress,
    ParticipantDirectory, ParticipantId, Scoreline, StandingRow, TeamId, Tournament,
    TournamentFormat, TournamentId, compute_progress, compute_standings,
    evaluate_fixture_readiness, validate_score,
};
use tracing::{debug, info};

/// Tournament engine over an injected store.
///
/// The engine takes `&mut self` for every call, so one engine serves one
/// writer at a time. Shared use goes through a mutex.
#[derive(Debug)]
pub struct Engine<S: TournamentStore> {
    store: S,
}

impl<S: TournamentStore> Engine<S> {
    /// Creates an engine over a store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the underlying store mutably.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    // ========================================================================
    // Catalog
    // ========================================================================

    /// Creates an upcoming tournament with an empty roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or the store fails.
    pub fn create_tournament(
        &mut self,
        name: &str,
        format: TournamentFormat,
        actor: Actor,
        cause: Cause,
    ) -> Result<Tournament, CoreError> {
        let tournament: Tournament =
            self.commit_catalog(apply_create(name, format, actor, cause)?)?;
        info!(
            tournament_id = %tournament.id,
            name = %tournament.name,
            format = %tournament.format,
            "Created tournament"
        );
        Ok(tournament)
    }

    /// Lists every tournament.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn list_tournaments(&mut self) -> Result<Vec<Tournament>, CoreError> {
        Ok(self.store.list_tournaments()?)
    }

    /// Loads one tournament.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn get_tournament(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Tournament, CoreError> {
        self.store.get_tournament(tournament_id)?.ok_or_else(|| {
            CoreError::DomainViolation(DomainError::TournamentNotFound(
                tournament_id.as_str().to_string(),
            ))
        })
    }

    /// Deletes a tournament with its matches, assignments, chat records,
    /// roster and draw pool in one atomic write.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn delete_tournament(
        &mut self,
        tournament_id: &TournamentId,
        actor: Actor,
        cause: Cause,
    ) -> Result<CascadeReport, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let report: CascadeReport = self.commit_catalog(apply_delete(&state, actor, cause))?;
        info!(
            tournament_id = %report.tournament_id,
            matches = report.matches,
            assignments = report.assignments,
            chat_messages = report.chat_messages,
            "Deleted tournament"
        );
        Ok(report)
    }

    /// Finds matches and assignments whose tournament no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn scan_orphans(&mut self) -> Result<OrphanReport, CoreError> {
        let catalog: TournamentCatalog = self.load_catalog()?;
        Ok(scan_orphans(&catalog))
    }

    /// Deletes every orphaned match and assignment atomically.
    ///
    /// # Returns
    ///
    /// The number of records deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails. Nothing is deleted in that case.
    pub fn purge_orphans(&mut self, actor: Actor, cause: Cause) -> Result<usize, CoreError> {
        let catalog: TournamentCatalog = self.load_catalog()?;
        let report: OrphanReport = self.commit_catalog(apply_purge(&catalog, actor, cause))?;
        info!(
            matches = report.match_ids.len(),
            assignments = report.assignment_ids.len(),
            "Purged orphaned records"
        );
        Ok(report.total())
    }

    // ========================================================================
    // Setup
    // ========================================================================

    /// Replaces the roster of an upcoming tournament.
    ///
    /// Assignments of participants no longer on the roster are removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is invalid or setup is closed.
    pub fn set_roster(
        &mut self,
        tournament_id: &TournamentId,
        participants: Vec<ParticipantId>,
        actor: Actor,
        cause: Cause,
    ) -> Result<Tournament, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let transition: TransitionResult =
            apply(&state, Command::SetRoster { participants }, actor, cause)?;
        let new_state: TournamentState = self.commit(transition)?;
        Ok(new_state.tournament)
    }

    /// Replaces the draw pool of an upcoming tournament.
    ///
    /// Assignments to teams no longer in the pool are removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is invalid or setup is closed.
    pub fn set_draw_pool(
        &mut self,
        tournament_id: &TournamentId,
        teams: Vec<TeamId>,
        actor: Actor,
        cause: Cause,
    ) -> Result<Tournament, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let transition: TransitionResult =
            apply(&state, Command::SetDrawPool { teams }, actor, cause)?;
        let new_state: TournamentState = self.commit(transition)?;
        Ok(new_state.tournament)
    }

    /// Draws a distinct team for every roster member, replacing any earlier draw.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is too small, the tournament is not a
    /// lottery, or setup is closed.
    pub fn run_lottery<R: rand::Rng + ?Sized>(
        &mut self,
        tournament_id: &TournamentId,
        rng: &mut R,
        actor: Actor,
        cause: Cause,
    ) -> Result<Vec<Assignment>, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let transition: TransitionResult = apply_lottery(&state, rng, actor, cause)?;
        let new_state: TournamentState = self.commit(transition)?;
        Ok(new_state.assignments)
    }

    /// Lists the assignments of a tournament.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn list_assignments(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<Assignment>, CoreError> {
        Ok(self.load_state(tournament_id)?.assignments)
    }

    /// Reports whether fixtures can be generated and what blocks them.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn fixture_readiness(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<FixtureReadiness, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        Ok(evaluate_fixture_readiness(
            &state.tournament,
            &state.assignments,
            state.matches.len(),
        ))
    }

    /// Generates the double round-robin and moves the tournament to active.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster is too small, a lottery draw is
    /// missing, fixtures already exist, or setup is closed.
    pub fn generate_fixtures(
        &mut self,
        tournament_id: &TournamentId,
        actor: Actor,
        cause: Cause,
    ) -> Result<Vec<Match>, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let transition: TransitionResult = apply(&state, Command::GenerateFixtures, actor, cause)?;
        let new_state: TournamentState = self.commit(transition)?;
        Ok(new_state.matches)
    }

    // ========================================================================
    // Results
    // ========================================================================

    /// Lists the matches of a tournament, ordered by matchday.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn list_matches(&mut self, tournament_id: &TournamentId) -> Result<Vec<Match>, CoreError> {
        Ok(self.load_state(tournament_id)?.matches)
    }

    /// Records or overwrites a result.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A score is negative or out of range
    /// - The match does not exist
    /// - The tournament is not active, or is finished
    pub fn set_result(
        &mut self,
        match_id: &MatchId,
        score_a: i64,
        score_b: i64,
        actor: Actor,
        cause: Cause,
    ) -> Result<Match, CoreError> {
        let score: Scoreline = Scoreline::new(
            validate_score("score_a", score_a)?,
            validate_score("score_b", score_b)?,
        );
        let state: TournamentState = self.load_state_for_match(match_id)?;
        let command: Command = Command::SetResult {
            match_id: match_id.clone(),
            score,
        };
        let new_state: TournamentState = self.commit(apply(&state, command, actor, cause)?)?;
        find_match(&new_state, match_id)
    }

    /// Moves a recorded match back to scheduled. Scores are kept.
    ///
    /// Undoing a match that is already scheduled succeeds without change.
    ///
    /// # Errors
    ///
    /// Returns an error if the match does not exist or the tournament is
    /// not active, or is finished.
    pub fn undo_result(
        &mut self,
        match_id: &MatchId,
        actor: Actor,
        cause: Cause,
    ) -> Result<Match, CoreError> {
        let state: TournamentState = self.load_state_for_match(match_id)?;
        let command: Command = Command::UndoResult {
            match_id: match_id.clone(),
        };
        let new_state: TournamentState = self.commit(apply(&state, command, actor, cause)?)?;
        find_match(&new_state, match_id)
    }

    /// Computes the standings table.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn compute_standings<D: ParticipantDirectory + ?Sized>(
        &mut self,
        tournament_id: &TournamentId,
        directory: &D,
    ) -> Result<Vec<StandingRow>, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        Ok(compute_standings(
            &state.tournament.roster,
            &state.matches,
            directory,
        ))
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Reports completed and total matches.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn progress(&mut self, tournament_id: &TournamentId) -> Result<MatchProgress, CoreError> {
        Ok(compute_progress(&self.load_state(tournament_id)?.matches))
    }

    /// Completed matches as a whole percentage, rounded down.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn progress_percent(&mut self, tournament_id: &TournamentId) -> Result<u8, CoreError> {
        Ok(self.progress(tournament_id)?.percent)
    }

    /// Closes an active tournament whose matches are all completed.
    ///
    /// # Errors
    ///
    /// Returns an error if the tournament is not active or any match is open.
    pub fn finish_tournament(
        &mut self,
        tournament_id: &TournamentId,
        actor: Actor,
        cause: Cause,
    ) -> Result<Tournament, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let transition: TransitionResult = apply(&state, Command::FinishTournament, actor, cause)?;
        Ok(self.commit(transition)?.tournament)
    }

    /// Deletes every match and assignment and returns the tournament to upcoming.
    ///
    /// # Errors
    ///
    /// Returns `ResetOnFinished` for a finished tournament.
    pub fn reset_tournament(
        &mut self,
        tournament_id: &TournamentId,
        actor: Actor,
        cause: Cause,
    ) -> Result<Tournament, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let transition: TransitionResult = apply(&state, Command::ResetTournament, actor, cause)?;
        Ok(self.commit(transition)?.tournament)
    }

    /// Attaches a chat record to a tournament so it is removed with it.
    ///
    /// # Errors
    ///
    /// Returns `TournamentNotFound` for an unknown identifier.
    pub fn record_chat_message(
        &mut self,
        tournament_id: &TournamentId,
        author: ParticipantId,
        body: &str,
        actor: Actor,
        cause: Cause,
    ) -> Result<ChatMessage, CoreError> {
        let state: TournamentState = self.load_state(tournament_id)?;
        let command: Command = Command::RecordChatMessage {
            author,
            body: body.to_string(),
        };
        let mut new_state: TournamentState = self.commit(apply(&state, command, actor, cause)?)?;
        new_state
            .chat_messages
            .pop()
            .ok_or_else(|| {
                CoreError::Store(StoreError::Backend(String::from(
                    "chat message missing after commit",
                )))
            })
    }

    /// Lists the audit trail, oldest first.
    ///
    /// # Arguments
    ///
    /// * `tournament_id` - Only this tournament's events, or all when `None`
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn audit_trail(
        &mut self,
        tournament_id: Option<&TournamentId>,
    ) -> Result<Vec<AuditEvent>, CoreError> {
        Ok(self.store.list_audit_events(tournament_id)?)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn load_state(&mut self, tournament_id: &TournamentId) -> Result<TournamentState, CoreError> {
        let tournament: Tournament = self.get_tournament(tournament_id)?;
        let matches: Vec<Match> = self.store.list_matches(tournament_id)?;
        for m in &matches {
            m.validate()?;
        }
        let assignments: Vec<Assignment> = self.store.list_assignments(tournament_id)?;
        let chat_messages: Vec<ChatMessage> = self.store.list_chat_messages(tournament_id)?;

        Ok(TournamentState {
            tournament,
            matches,
            assignments,
            chat_messages,
        })
    }

    fn load_state_for_match(&mut self, match_id: &MatchId) -> Result<TournamentState, CoreError> {
        let m: Match = self.store.get_match(match_id)?.ok_or_else(|| {
            CoreError::DomainViolation(DomainError::MatchNotFound(match_id.as_str().to_string()))
        })?;
        self.load_state(&m.tournament_id)
    }

    fn load_catalog(&mut self) -> Result<TournamentCatalog, CoreError> {
        Ok(TournamentCatalog {
            tournaments: self.store.list_tournaments()?,
            matches: self.store.list_all_matches()?,
            assignments: self.store.list_all_assignments()?,
        })
    }

    fn commit(&mut self, transition: TransitionResult) -> Result<TournamentState, CoreError> {
        let event_id: i64 = self
            .store
            .persist_transition(&transition.writes, &transition.audit_event)?;

        for write in &transition.writes {
            debug!(event_id, write = write.name(), "Applied store write");
        }
        info!(
            event_id,
            tournament_id = %transition.new_state.tournament.id,
            action = %transition.audit_event.action.name,
            actor = %transition.audit_event.actor.id,
            status = %transition.new_state.tournament.status,
            "Committed transition"
        );

        Ok(transition.new_state)
    }

    fn commit_catalog<T>(&mut self, result: CatalogResult<T>) -> Result<T, CoreError> {
        let event_id: i64 = self
            .store
            .persist_transition(&result.writes, &result.audit_event)?;

        info!(
            event_id,
            action = %result.audit_event.action.name,
            actor = %result.audit_event.actor.id,
            writes = result.writes.len(),
            "Committed catalog change"
        );

        Ok(result.outcome)
    }
}

fn find_match(state: &TournamentState, match_id: &MatchId) -> Result<Match, CoreError> {
    state.find_match(match_id).cloned().ok_or_else(|| {
        CoreError::DomainViolation(DomainError::MatchNotFound(match_id.as_str().to_string()))
    })
}
