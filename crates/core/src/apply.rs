// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::integrity::{CascadeReport, OrphanReport, scan_orphans};
use crate::state::{CatalogResult, TournamentCatalog, TournamentState, TransitionResult};
use crate::store::StoreWrite;
use matchday_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use matchday_domain::{
    Assignment, ChatMessage, DomainError, Entrant, Fixture, Match, MatchId, ParticipantId,
    Scoreline, TeamId, Tournament, TournamentFormat, TournamentId, TournamentStatus,
    compute_progress, draw_teams, ensure_finishable, generate_double_round_robin,
    unassigned_participants, validate_draw_pool, validate_roster, validate_roster_capacity,
    validate_roster_size, validate_tournament_name,
};
use std::collections::HashMap;

/// New state, the writes that realise it, and the action that names it.
type Outcome = (TournamentState, Vec<StoreWrite>, Action);

/// Applies a command to the current tournament state, producing a new state,
/// the writes that persist it, and an audit event.
///
/// # Arguments
///
/// * `state` - The current tournament state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state, writes and audit event
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if the command violates a domain rule or is not
/// permitted in the tournament's current lifecycle state.
pub fn apply(
    state: &TournamentState,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let (new_state, writes, action): Outcome = match command {
        Command::SetRoster { participants } => set_roster(state, participants)?,
        Command::SetDrawPool { teams } => set_draw_pool(state, teams)?,
        Command::GenerateFixtures => generate_fixtures(state)?,
        Command::SetResult { match_id, score } => set_result(state, &match_id, score)?,
        Command::UndoResult { match_id } => undo_result(state, &match_id)?,
        Command::FinishTournament => finish(state)?,
        Command::ResetTournament => reset(state)?,
        Command::RecordChatMessage { author, body } => record_chat_message(state, author, &body),
    };

    Ok(transition(state, new_state, writes, action, actor, cause))
}

/// Runs the team lottery for a tournament.
///
/// Each roster member receives one distinct team from the draw pool. Any
/// previous assignments are replaced.
///
/// # Arguments
///
/// * `state` - The current tournament state
/// * `rng` - Random source for the shuffle
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The tournament is finished or no longer upcoming
/// - The tournament format has no draw
/// - The roster is empty
/// - The draw pool is smaller than the roster
pub fn apply_lottery<R: rand::Rng + ?Sized>(
    state: &TournamentState,
    rng: &mut R,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let tournament: &Tournament = &state.tournament;
    ensure_setup_open(tournament)?;
    if !tournament.format.requires_draw() {
        return Err(CoreError::DomainViolation(DomainError::DrawNotApplicable {
            tournament_id: tournament.id.as_str().to_string(),
        }));
    }
    if tournament.roster.is_empty() {
        return Err(CoreError::DomainViolation(DomainError::EmptyRoster));
    }

    let assignments: Vec<Assignment> = draw_teams(&tournament.roster, &tournament.draw_pool, rng)?
        .into_iter()
        .map(|drawn| Assignment::new(tournament.id.clone(), drawn.participant_id, drawn.team_id))
        .collect();

    let mut new_state: TournamentState = state.clone();
    new_state.assignments.clone_from(&assignments);

    let action: Action = Action::new(
        String::from("RunLottery"),
        Some(format!(
            "Drew {} teams from a pool of {}",
            assignments.len(),
            tournament.draw_pool.len()
        )),
    );
    let writes: Vec<StoreWrite> = vec![StoreWrite::ReplaceAssignments {
        tournament_id: tournament.id.clone(),
        assignments,
    }];

    Ok(transition(state, new_state, writes, action, actor, cause))
}

/// Creates an upcoming tournament with an empty roster and draw pool.
///
/// # Arguments
///
/// * `name` - Display name; surrounding whitespace is trimmed
/// * `format` - Lottery or users only
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the name is blank.
pub fn apply_create(
    name: &str,
    format: TournamentFormat,
    actor: Actor,
    cause: Cause,
) -> Result<CatalogResult<Tournament>, CoreError> {
    validate_tournament_name(name)?;

    let tournament: Tournament = Tournament::new(name, format);
    let after: StateSnapshot = TournamentState::new(tournament.clone()).to_snapshot();
    let action: Action = Action::new(
        String::from("CreateTournament"),
        Some(format!("Created '{}' ({format})", tournament.name)),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        Some(tournament.id.clone()),
        actor,
        cause,
        action,
        StateSnapshot::absent(),
        after,
    );

    Ok(CatalogResult {
        writes: vec![StoreWrite::CreateTournament(tournament.clone())],
        outcome: tournament,
        audit_event,
    })
}

/// Deletes a tournament and everything scoped to it.
///
/// # Arguments
///
/// * `state` - The tournament to delete, with its matches, assignments and chat
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
#[must_use]
pub fn apply_delete(
    state: &TournamentState,
    actor: Actor,
    cause: Cause,
) -> CatalogResult<CascadeReport> {
    let report: CascadeReport = CascadeReport::for_state(state);

    let action: Action = Action::new(
        String::from("DeleteTournament"),
        Some(format!(
            "Deleted '{}' with {} matches, {} assignments and {} chat messages",
            state.tournament.name, report.matches, report.assignments, report.chat_messages
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(
        Some(state.tournament.id.clone()),
        actor,
        cause,
        action,
        state.to_snapshot(),
        StateSnapshot::absent(),
    );

    CatalogResult {
        writes: vec![StoreWrite::DeleteTournament {
            tournament_id: state.tournament.id.clone(),
        }],
        outcome: report,
        audit_event,
    }
}

/// Deletes every match and assignment whose tournament no longer exists.
///
/// Live tournaments are never touched: only the records found by
/// [`scan_orphans`] are deleted.
///
/// # Arguments
///
/// * `catalog` - Every tournament, match and assignment in the store
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
#[must_use]
pub fn apply_purge(
    catalog: &TournamentCatalog,
    actor: Actor,
    cause: Cause,
) -> CatalogResult<OrphanReport> {
    let report: OrphanReport = scan_orphans(catalog);

    let mut writes: Vec<StoreWrite> = Vec::new();
    if !report.match_ids.is_empty() {
        writes.push(StoreWrite::DeleteMatches(report.match_ids.clone()));
    }
    if !report.assignment_ids.is_empty() {
        writes.push(StoreWrite::DeleteAssignments(report.assignment_ids.clone()));
    }

    let after: StateSnapshot = StateSnapshot::new(format!(
        "tournaments={},matches={},assignments={}",
        catalog.tournaments.len(),
        catalog.matches.len() - report.match_ids.len(),
        catalog.assignments.len() - report.assignment_ids.len()
    ));
    let action: Action = Action::new(
        String::from("PurgeOrphans"),
        Some(format!(
            "Removed {} orphaned matches and {} orphaned assignments",
            report.match_ids.len(),
            report.assignment_ids.len()
        )),
    );
    let audit_event: AuditEvent =
        AuditEvent::new(None, actor, cause, action, catalog.to_snapshot(), after);

    CatalogResult {
        writes,
        outcome: report,
        audit_event,
    }
}

fn transition(
    state: &TournamentState,
    new_state: TournamentState,
    writes: Vec<StoreWrite>,
    action: Action,
    actor: Actor,
    cause: Cause,
) -> TransitionResult {
    let audit_event: AuditEvent = AuditEvent::new(
        Some(state.tournament.id.clone()),
        actor,
        cause,
        action,
        state.to_snapshot(),
        new_state.to_snapshot(),
    );
    TransitionResult {
        new_state,
        writes,
        audit_event,
    }
}

fn ensure_setup_open(tournament: &Tournament) -> Result<(), DomainError> {
    if tournament.status.is_locked() {
        return Err(DomainError::TournamentLocked {
            tournament_id: tournament.id.as_str().to_string(),
        });
    }
    if !tournament.status.allows_setup_changes() {
        return Err(DomainError::SetupClosed {
            tournament_id: tournament.id.as_str().to_string(),
            status: tournament.status,
        });
    }
    Ok(())
}

fn ensure_results_open(tournament: &Tournament) -> Result<(), DomainError> {
    if tournament.status.is_locked() {
        return Err(DomainError::TournamentLocked {
            tournament_id: tournament.id.as_str().to_string(),
        });
    }
    if !tournament.status.accepts_results() {
        return Err(DomainError::ResultsNotOpen {
            tournament_id: tournament.id.as_str().to_string(),
            status: tournament.status,
        });
    }
    Ok(())
}

fn match_index(state: &TournamentState, match_id: &MatchId) -> Result<usize, DomainError> {
    state
        .matches
        .iter()
        .position(|m| &m.id == match_id)
        .ok_or_else(|| DomainError::MatchNotFound(match_id.as_str().to_string()))
}

fn set_roster(
    state: &TournamentState,
    participants: Vec<ParticipantId>,
) -> Result<Outcome, DomainError> {
    ensure_setup_open(&state.tournament)?;
    validate_roster(&participants)?;
    validate_roster_capacity(participants.len())?;

    let tournament_id: TournamentId = state.tournament.id.clone();
    let mut new_state: TournamentState = state.clone();
    // Assignments of removed participants would block the next draw
    new_state
        .assignments
        .retain(|a| participants.contains(&a.participant_id));
    let pruned: usize = state.assignments.len() - new_state.assignments.len();
    new_state.tournament.roster.clone_from(&participants);

    let action: Action = Action::new(
        String::from("SetRoster"),
        Some(format!(
            "{} participants, {pruned} assignments pruned",
            participants.len()
        )),
    );

    let mut writes: Vec<StoreWrite> = vec![StoreWrite::SetRoster {
        tournament_id: tournament_id.clone(),
        participants,
    }];
    if pruned > 0 {
        writes.push(StoreWrite::ReplaceAssignments {
            tournament_id,
            assignments: new_state.assignments.clone(),
        });
    }

    Ok((new_state, writes, action))
}

fn set_draw_pool(state: &TournamentState, teams: Vec<TeamId>) -> Result<Outcome, DomainError> {
    ensure_setup_open(&state.tournament)?;
    validate_draw_pool(&teams)?;

    let tournament_id: TournamentId = state.tournament.id.clone();
    let mut new_state: TournamentState = state.clone();
    new_state
        .assignments
        .retain(|a| teams.contains(&a.team_id));
    let pruned: usize = state.assignments.len() - new_state.assignments.len();
    new_state.tournament.draw_pool.clone_from(&teams);

    let action: Action = Action::new(
        String::from("SetDrawPool"),
        Some(format!("{} teams, {pruned} assignments pruned", teams.len())),
    );

    let mut writes: Vec<StoreWrite> = vec![StoreWrite::SetDrawPool {
        tournament_id: tournament_id.clone(),
        teams,
    }];
    if pruned > 0 {
        writes.push(StoreWrite::ReplaceAssignments {
            tournament_id,
            assignments: new_state.assignments.clone(),
        });
    }

    Ok((new_state, writes, action))
}

fn generate_fixtures(state: &TournamentState) -> Result<Outcome, DomainError> {
    let tournament: &Tournament = &state.tournament;
    if tournament.status.is_locked() {
        return Err(DomainError::TournamentLocked {
            tournament_id: tournament.id.as_str().to_string(),
        });
    }
    if !state.matches.is_empty() {
        return Err(DomainError::FixturesAlreadyGenerated {
            tournament_id: tournament.id.as_str().to_string(),
            existing: state.matches.len(),
        });
    }
    ensure_setup_open(tournament)?;
    validate_roster_size(tournament.roster.len())?;

    if tournament.format.requires_draw() {
        let missing: Vec<ParticipantId> =
            unassigned_participants(&tournament.roster, &state.assignments);
        if !missing.is_empty() {
            return Err(DomainError::DrawRequired {
                tournament_id: tournament.id.as_str().to_string(),
                missing: missing.iter().map(|p| p.as_str().to_string()).collect(),
            });
        }
    }

    let teams: HashMap<&ParticipantId, &TeamId> = state
        .assignments
        .iter()
        .map(|a| (&a.participant_id, &a.team_id))
        .collect();
    let entrants: Vec<Entrant> = tournament
        .roster
        .iter()
        .map(|p| Entrant::new(p.clone(), teams.get(p).map(|team| (*team).clone())))
        .collect();

    let fixtures: Vec<Fixture> = generate_double_round_robin(&entrants)?;
    let matches: Vec<Match> = fixtures
        .into_iter()
        .map(|fixture| Match {
            id: MatchId::generate(),
            tournament_id: tournament.id.clone(),
            matchday: fixture.matchday,
            player_a: fixture.player_a,
            player_b: fixture.player_b,
            team_a: fixture.team_a,
            team_b: fixture.team_b,
            score: None,
            completed: false,
        })
        .collect();

    let mut new_state: TournamentState = state.clone();
    new_state.matches.clone_from(&matches);
    new_state.tournament.status = TournamentStatus::Active;

    let action: Action = Action::new(
        String::from("GenerateFixtures"),
        Some(format!(
            "Generated {} matches for {} participants",
            matches.len(),
            tournament.roster.len()
        )),
    );
    let writes: Vec<StoreWrite> = vec![
        StoreWrite::InsertMatches(matches),
        StoreWrite::SetStatus {
            tournament_id: tournament.id.clone(),
            status: TournamentStatus::Active,
        },
    ];

    Ok((new_state, writes, action))
}

fn set_result(
    state: &TournamentState,
    match_id: &MatchId,
    score: Scoreline,
) -> Result<Outcome, DomainError> {
    ensure_results_open(&state.tournament)?;
    let index: usize = match_index(state, match_id)?;

    let mut new_state: TournamentState = state.clone();
    let previous: Option<Scoreline> = new_state.matches[index].recorded_score();
    new_state.matches[index].record(score);

    let details: String = match previous {
        Some(old) => format!("{match_id}: {}-{} (was {}-{})", score.a, score.b, old.a, old.b),
        None => format!("{match_id}: {}-{}", score.a, score.b),
    };
    let action: Action = Action::new(String::from("SetResult"), Some(details));
    let writes: Vec<StoreWrite> = vec![StoreWrite::SetMatchResult {
        match_id: match_id.clone(),
        score,
    }];

    Ok((new_state, writes, action))
}

fn undo_result(state: &TournamentState, match_id: &MatchId) -> Result<Outcome, DomainError> {
    ensure_results_open(&state.tournament)?;
    let index: usize = match_index(state, match_id)?;

    let mut new_state: TournamentState = state.clone();
    if !new_state.matches[index].completed {
        let action: Action = Action::new(
            String::from("UndoResult"),
            Some(format!("{match_id}: already scheduled")),
        );
        return Ok((new_state, Vec::new(), action));
    }

    new_state.matches[index].reopen();
    let action: Action = Action::new(
        String::from("UndoResult"),
        Some(format!("{match_id}: reopened")),
    );
    let writes: Vec<StoreWrite> = vec![StoreWrite::ClearMatchResult {
        match_id: match_id.clone(),
    }];

    Ok((new_state, writes, action))
}

fn finish(state: &TournamentState) -> Result<Outcome, DomainError> {
    ensure_finishable(&state.tournament, &compute_progress(&state.matches))?;

    let mut new_state: TournamentState = state.clone();
    new_state.tournament.status = TournamentStatus::Finished;

    let action: Action = Action::new(
        String::from("FinishTournament"),
        Some(format!("All {} matches completed", state.matches.len())),
    );
    let writes: Vec<StoreWrite> = vec![StoreWrite::SetStatus {
        tournament_id: state.tournament.id.clone(),
        status: TournamentStatus::Finished,
    }];

    Ok((new_state, writes, action))
}

fn reset(state: &TournamentState) -> Result<Outcome, DomainError> {
    let tournament_id: TournamentId = state.tournament.id.clone();
    if !state
        .tournament
        .status
        .can_transition_to(TournamentStatus::Upcoming)
    {
        return Err(DomainError::ResetOnFinished {
            tournament_id: tournament_id.as_str().to_string(),
        });
    }

    let mut new_state: TournamentState = state.clone();
    new_state.matches.clear();
    new_state.assignments.clear();
    new_state.tournament.status = TournamentStatus::Upcoming;

    let action: Action = Action::new(
        String::from("ResetTournament"),
        Some(format!(
            "Removed {} matches and {} assignments",
            state.matches.len(),
            state.assignments.len()
        )),
    );
    let writes: Vec<StoreWrite> = vec![
        StoreWrite::DeleteMatchesForTournament {
            tournament_id: tournament_id.clone(),
        },
        StoreWrite::ReplaceAssignments {
            tournament_id: tournament_id.clone(),
            assignments: Vec::new(),
        },
        StoreWrite::SetStatus {
            tournament_id,
            status: TournamentStatus::Upcoming,
        },
    ];

    Ok((new_state, writes, action))
}

fn record_chat_message(state: &TournamentState, author: ParticipantId, body: &str) -> Outcome {
    let message: ChatMessage = ChatMessage::new(Some(state.tournament.id.clone()), author, body);

    let mut new_state: TournamentState = state.clone();
    new_state.chat_messages.push(message.clone());

    let action: Action = Action::new(
        String::from("RecordChatMessage"),
        Some(format!("Message {} by {}", message.id, message.author)),
    );

    (new_state, vec![StoreWrite::PostChatMessage(message)], action)
}
