// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Handlers translate request DTOs into engine calls and engine results into
//! response DTOs. They never touch the store directly, so they work over any
//! [`TournamentStore`].

use matchday::{CascadeReport, Engine, OrphanReport, TournamentStore};
use matchday_audit::{Actor, AuditEvent, Cause};
use matchday_domain::{
    Assignment, FixtureReadiness, Match, MatchId, MatchProgress, ParticipantDirectory,
    ParticipantId, StandingRow, TeamId, Tournament, TournamentFormat, TournamentId,
};

use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AssignmentInfo, AuditEventInfo, AuditTrailResponse, CreateTournamentRequest,
    DeleteTournamentResponse, GenerateFixturesResponse, ListMatchesResponse,
    ListTournamentsResponse, MatchInfo, MatchResultResponse, MatchdayInfo, OrphanScanResponse,
    PurgeOrphansResponse, RequestContext, RunLotteryResponse, SetDrawPoolRequest,
    SetResultRequest, SetRosterRequest, StandingsResponse, TournamentDetailResponse,
    TournamentInfo, TournamentResponse,
};
use crate::score_input::parse_score_pair;

/// Actor type recorded for every operator request.
const OPERATOR_ACTOR_TYPE: &str = "operator";

/// Converts a request context into the audit actor and cause.
///
/// # Errors
///
/// Returns an error if the actor identifier is blank.
fn attribution(context: &RequestContext) -> Result<(Actor, Cause), ApiError> {
    let actor_id: &str = context.actor_id.trim();
    if actor_id.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("actor_id"),
            message: String::from("An actor is required for every write"),
        });
    }

    Ok((
        Actor::new(actor_id.to_string(), String::from(OPERATOR_ACTOR_TYPE)),
        Cause::new(
            context.cause_id.clone(),
            context.cause_description.clone(),
        ),
    ))
}

/// Converts a tournament into its API representation.
#[must_use]
pub fn tournament_to_info(tournament: &Tournament) -> TournamentInfo {
    TournamentInfo {
        tournament_id: tournament.id.to_string(),
        name: tournament.name.clone(),
        format: tournament.format.to_string(),
        status: tournament.status.to_string(),
        roster: tournament.roster.iter().map(ToString::to_string).collect(),
        draw_pool: tournament.draw_pool.iter().map(ToString::to_string).collect(),
        created_at: tournament.created_at,
    }
}

/// Converts a match into its API representation.
#[must_use]
pub fn match_to_info(m: &Match) -> MatchInfo {
    MatchInfo {
        match_id: m.id.to_string(),
        matchday: m.matchday,
        player_a: m.player_a.to_string(),
        player_b: m.player_b.to_string(),
        team_a: m.team_a.as_ref().map(ToString::to_string),
        team_b: m.team_b.as_ref().map(ToString::to_string),
        score_a: m.score.map(|s| s.a),
        score_b: m.score.map(|s| s.b),
        completed: m.completed,
    }
}

fn audit_event_to_info(event: &AuditEvent) -> AuditEventInfo {
    AuditEventInfo {
        event_id: event.event_id,
        tournament_id: event.tournament_id.as_ref().map(ToString::to_string),
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action: event.action.name.clone(),
        details: event.action.details.clone(),
        before: event.before.data.clone(),
        after: event.after.data.clone(),
    }
}

/// Groups matches by matchday, keeping generation order within a day.
fn group_by_matchday(matches: &[Match]) -> Vec<MatchdayInfo> {
    let mut matchdays: Vec<MatchdayInfo> = Vec::new();
    for m in matches {
        match matchdays.last_mut() {
            Some(day) if day.matchday == m.matchday => day.matches.push(match_to_info(m)),
            _ => matchdays.push(MatchdayInfo {
                matchday: m.matchday,
                matches: vec![match_to_info(m)],
            }),
        }
    }
    matchdays
}

// ============================================================================
// Catalog
// ============================================================================

/// Creates a tournament.
///
/// # Arguments
///
/// * `engine` - The engine to apply the operation with
/// * `request` - The name and format of the new tournament
/// * `context` - Who is creating it, and why
///
/// # Errors
///
/// Returns an error if:
/// - The actor is blank
/// - The format is not `lottery` or `users_only`
/// - The name is blank
pub fn create_tournament<S: TournamentStore>(
    engine: &mut Engine<S>,
    request: &CreateTournamentRequest,
    context: &RequestContext,
) -> Result<TournamentResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let format: TournamentFormat = request
        .format
        .trim()
        .parse::<TournamentFormat>()
        .map_err(translate_domain_error)?;

    let tournament: Tournament = engine
        .create_tournament(&request.name, format, actor, cause)
        .map_err(translate_core_error)?;

    Ok(TournamentResponse {
        message: format!("Created tournament '{}'", tournament.name),
        tournament: tournament_to_info(&tournament),
    })
}

/// Lists every tournament, oldest first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_tournaments<S: TournamentStore>(
    engine: &mut Engine<S>,
) -> Result<ListTournamentsResponse, ApiError> {
    let tournaments: Vec<Tournament> = engine.list_tournaments().map_err(translate_core_error)?;
    Ok(ListTournamentsResponse {
        tournaments: tournaments.iter().map(tournament_to_info).collect(),
    })
}

/// Describes one tournament with its progress and fixture readiness.
///
/// # Errors
///
/// Returns an error if the tournament does not exist.
pub fn get_tournament_detail<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
) -> Result<TournamentDetailResponse, ApiError> {
    let id: TournamentId = TournamentId::new(tournament_id);
    let tournament: Tournament = engine.get_tournament(&id).map_err(translate_core_error)?;
    let progress: MatchProgress = engine.progress(&id).map_err(translate_core_error)?;
    let readiness: FixtureReadiness = engine.fixture_readiness(&id).map_err(translate_core_error)?;

    Ok(TournamentDetailResponse {
        tournament: tournament_to_info(&tournament),
        progress,
        readiness,
    })
}

/// Deletes a tournament with everything scoped to it.
///
/// # Errors
///
/// Returns an error if the actor is blank or the tournament does not exist.
pub fn delete_tournament<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    context: &RequestContext,
) -> Result<DeleteTournamentResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let report: CascadeReport = engine
        .delete_tournament(&TournamentId::new(tournament_id), actor, cause)
        .map_err(translate_core_error)?;

    Ok(DeleteTournamentResponse {
        tournament_id: report.tournament_id.to_string(),
        matches_removed: report.matches,
        assignments_removed: report.assignments,
        chat_messages_removed: report.chat_messages,
        message: format!("Deleted tournament '{}'", report.tournament_id),
    })
}

// ============================================================================
// Setup
// ============================================================================

/// Replaces a tournament's roster.
///
/// # Errors
///
/// Returns an error if the roster is invalid or the tournament is past setup.
pub fn set_roster<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    request: &SetRosterRequest,
    context: &RequestContext,
) -> Result<TournamentResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let participants: Vec<ParticipantId> = request
        .participants
        .iter()
        .map(|p| ParticipantId::new(p.trim()))
        .collect();

    let tournament: Tournament = engine
        .set_roster(&TournamentId::new(tournament_id), participants, actor, cause)
        .map_err(translate_core_error)?;

    Ok(TournamentResponse {
        message: format!(
            "Roster set to {} participant(s)",
            tournament.roster.len()
        ),
        tournament: tournament_to_info(&tournament),
    })
}

/// Replaces a tournament's draw pool.
///
/// # Errors
///
/// Returns an error if the pool is invalid or the tournament is past setup.
pub fn set_draw_pool<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    request: &SetDrawPoolRequest,
    context: &RequestContext,
) -> Result<TournamentResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let teams: Vec<TeamId> = request.teams.iter().map(|t| TeamId::new(t.trim())).collect();

    let tournament: Tournament = engine
        .set_draw_pool(&TournamentId::new(tournament_id), teams, actor, cause)
        .map_err(translate_core_error)?;

    Ok(TournamentResponse {
        message: format!("Draw pool set to {} team(s)", tournament.draw_pool.len()),
        tournament: tournament_to_info(&tournament),
    })
}

/// Draws a team for every roster member, replacing any earlier draw.
///
/// # Errors
///
/// Returns an error if the tournament is not a lottery, is past setup, or
/// its pool cannot cover the roster.
pub fn run_lottery<S: TournamentStore, R: rand::Rng + ?Sized>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    rng: &mut R,
    context: &RequestContext,
) -> Result<RunLotteryResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let assignments: Vec<Assignment> = engine
        .run_lottery(&TournamentId::new(tournament_id), rng, actor, cause)
        .map_err(translate_core_error)?;

    Ok(RunLotteryResponse {
        tournament_id: tournament_id.to_string(),
        message: format!("Drew teams for {} participant(s)", assignments.len()),
        assignments: assignments
            .iter()
            .map(|a| AssignmentInfo {
                participant_id: a.participant_id.to_string(),
                team_id: a.team_id.to_string(),
            })
            .collect(),
    })
}

/// Generates the double round-robin schedule and activates the tournament.
///
/// # Errors
///
/// Returns an error if the tournament is not ready for fixtures.
pub fn generate_fixtures<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    context: &RequestContext,
) -> Result<GenerateFixturesResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let id: TournamentId = TournamentId::new(tournament_id);
    let matches: Vec<Match> = engine
        .generate_fixtures(&id, actor, cause)
        .map_err(translate_core_error)?;
    let tournament: Tournament = engine.get_tournament(&id).map_err(translate_core_error)?;
    let matchday_count: u32 = matches.iter().map(|m| m.matchday).max().unwrap_or(0);

    Ok(GenerateFixturesResponse {
        tournament_id: tournament_id.to_string(),
        match_count: matches.len(),
        matchday_count,
        status: tournament.status.to_string(),
        message: format!(
            "Generated {} matches over {matchday_count} matchdays",
            matches.len()
        ),
    })
}

// ============================================================================
// Results
// ============================================================================

/// Lists a tournament's fixtures grouped by matchday.
///
/// # Errors
///
/// Returns an error if the tournament does not exist.
pub fn list_matches<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
) -> Result<ListMatchesResponse, ApiError> {
    let matches: Vec<Match> = engine
        .list_matches(&TournamentId::new(tournament_id))
        .map_err(translate_core_error)?;

    Ok(ListMatchesResponse {
        tournament_id: tournament_id.to_string(),
        matchdays: group_by_matchday(&matches),
    })
}

/// Records or overwrites a match result.
///
/// # Errors
///
/// Returns an error if:
/// - Either score is missing, fractional, negative or not a number
/// - The match does not exist
/// - The tournament is not active
pub fn set_result<S: TournamentStore>(
    engine: &mut Engine<S>,
    match_id: &str,
    request: &SetResultRequest,
    context: &RequestContext,
) -> Result<MatchResultResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let (score_a, score_b): (i64, i64) = parse_score_pair(request).map_err(|e| {
        tracing::debug!(match_id, error = %e, "Rejected score input");
        ApiError::from(e)
    })?;

    let updated: Match = engine
        .set_result(&MatchId::new(match_id), score_a, score_b, actor, cause)
        .map_err(translate_core_error)?;
    let progress_percent: u8 = engine
        .progress_percent(&updated.tournament_id)
        .map_err(translate_core_error)?;

    Ok(MatchResultResponse {
        message: format!("Recorded {score_a}-{score_b}"),
        match_info: match_to_info(&updated),
        progress_percent,
    })
}

/// Removes a match result from the standings, keeping the scores for re-editing.
///
/// # Errors
///
/// Returns an error if the match does not exist or the tournament is not active.
pub fn undo_result<S: TournamentStore>(
    engine: &mut Engine<S>,
    match_id: &str,
    context: &RequestContext,
) -> Result<MatchResultResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let updated: Match = engine
        .undo_result(&MatchId::new(match_id), actor, cause)
        .map_err(translate_core_error)?;
    let progress_percent: u8 = engine
        .progress_percent(&updated.tournament_id)
        .map_err(translate_core_error)?;

    Ok(MatchResultResponse {
        message: String::from("Result undone"),
        match_info: match_to_info(&updated),
        progress_percent,
    })
}

/// Computes the current standings table.
///
/// # Errors
///
/// Returns an error if the tournament does not exist.
pub fn get_standings<S: TournamentStore, D: ParticipantDirectory + ?Sized>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    directory: &D,
) -> Result<StandingsResponse, ApiError> {
    let rows: Vec<StandingRow> = engine
        .compute_standings(&TournamentId::new(tournament_id), directory)
        .map_err(translate_core_error)?;

    Ok(StandingsResponse {
        tournament_id: tournament_id.to_string(),
        rows,
    })
}

// ============================================================================
// Lifecycle
// ============================================================================

/// Finishes a tournament whose matches are all completed.
///
/// # Errors
///
/// Returns an error if the tournament is not active or has open matches.
pub fn finish_tournament<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    context: &RequestContext,
) -> Result<TournamentResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let tournament: Tournament = engine
        .finish_tournament(&TournamentId::new(tournament_id), actor, cause)
        .map_err(translate_core_error)?;

    Ok(TournamentResponse {
        message: format!("Tournament '{}' finished", tournament.name),
        tournament: tournament_to_info(&tournament),
    })
}

/// Returns a tournament to setup, discarding fixtures and the draw.
///
/// # Errors
///
/// Returns an error if the tournament is finished or does not exist.
pub fn reset_tournament<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: &str,
    context: &RequestContext,
) -> Result<TournamentResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let tournament: Tournament = engine
        .reset_tournament(&TournamentId::new(tournament_id), actor, cause)
        .map_err(translate_core_error)?;

    Ok(TournamentResponse {
        message: format!("Tournament '{}' reset to upcoming", tournament.name),
        tournament: tournament_to_info(&tournament),
    })
}

// ============================================================================
// Integrity and audit
// ============================================================================

/// Lists matches and assignments whose tournament no longer exists.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn scan_orphans<S: TournamentStore>(
    engine: &mut Engine<S>,
) -> Result<OrphanScanResponse, ApiError> {
    let report: OrphanReport = engine.scan_orphans().map_err(translate_core_error)?;
    Ok(OrphanScanResponse {
        total: report.total(),
        match_ids: report.match_ids.iter().map(ToString::to_string).collect(),
        assignment_ids: report
            .assignment_ids
            .iter()
            .map(ToString::to_string)
            .collect(),
    })
}

/// Deletes every orphaned match and assignment.
///
/// # Errors
///
/// Returns an error if the actor is blank or the store fails.
pub fn purge_orphans<S: TournamentStore>(
    engine: &mut Engine<S>,
    context: &RequestContext,
) -> Result<PurgeOrphansResponse, ApiError> {
    let (actor, cause): (Actor, Cause) = attribution(context)?;
    let removed: usize = engine
        .purge_orphans(actor, cause)
        .map_err(translate_core_error)?;

    Ok(PurgeOrphansResponse {
        removed,
        message: format!("Removed {removed} orphaned record(s)"),
    })
}

/// Returns the audit trail, for one tournament or globally.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn get_audit_trail<S: TournamentStore>(
    engine: &mut Engine<S>,
    tournament_id: Option<&str>,
) -> Result<AuditTrailResponse, ApiError> {
    let id: Option<TournamentId> = tournament_id.map(TournamentId::new);
    let events: Vec<AuditEvent> = engine
        .audit_trail(id.as_ref())
        .map_err(translate_core_error)?;

    Ok(AuditTrailResponse {
        events: events.iter().map(audit_event_to_info).collect(),
    })
}
