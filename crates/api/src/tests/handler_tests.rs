// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashMap;

use matchday::{Engine, InMemoryStore};
use matchday_domain::{ErrorKind, ParticipantId};
use matchday_persistence::SqlitePersistence;

use super::helpers::{
    complete_all, create_test_active, create_test_context, create_test_drawn_lottery,
    create_test_engine, create_test_rng, create_test_tournament, create_test_users_only, score,
};
use crate::{
    ApiError, AuditTrailResponse, CreateTournamentRequest, DeleteTournamentResponse,
    GenerateFixturesResponse, ListMatchesResponse, MatchResultResponse, RequestContext,
    RunLotteryResponse, SetRosterRequest, StandingsResponse, TournamentDetailResponse,
    TournamentResponse, create_tournament, delete_tournament, generate_fixtures,
    get_audit_trail, get_standings, get_tournament_detail, list_matches, list_tournaments,
    run_lottery, set_result, set_roster, undo_result,
};

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_create_tournament_returns_upcoming() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();

    let response: TournamentResponse = create_tournament(
        &mut engine,
        &CreateTournamentRequest {
            name: String::from("  Winter Cup "),
            format: String::from("lottery"),
        },
        &create_test_context(),
    )
    .unwrap();

    assert_eq!(response.tournament.name, "Winter Cup");
    assert_eq!(response.tournament.format, "lottery");
    assert_eq!(response.tournament.status, "upcoming");
    assert_eq!(
        list_tournaments(&mut engine).unwrap().tournaments,
        vec![response.tournament]
    );
}

#[test]
fn test_create_tournament_unknown_format() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();

    let err: ApiError = create_tournament(
        &mut engine,
        &CreateTournamentRequest {
            name: String::from("Winter Cup"),
            format: String::from("knockout"),
        },
        &create_test_context(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "format"));
    assert!(list_tournaments(&mut engine).unwrap().tournaments.is_empty());
}

#[test]
fn test_blank_actor_rejected_before_any_write() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let context: RequestContext = RequestContext {
        actor_id: String::from("   "),
        ..create_test_context()
    };

    let err: ApiError = create_tournament(
        &mut engine,
        &CreateTournamentRequest {
            name: String::from("Winter Cup"),
            format: String::from("users_only"),
        },
        &context,
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "actor_id"));
    assert!(get_audit_trail(&mut engine, None).unwrap().events.is_empty());
}

#[test]
fn test_detail_reports_readiness_and_progress() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String = create_test_tournament(&mut engine, "lottery");
    set_roster(
        &mut engine,
        &tournament_id,
        &SetRosterRequest {
            participants: vec![String::from("alice"), String::from("bob")],
        },
        &create_test_context(),
    )
    .unwrap();

    let detail: TournamentDetailResponse =
        get_tournament_detail(&mut engine, &tournament_id).unwrap();

    assert!(!detail.readiness.is_ready);
    assert_eq!(detail.readiness.unassigned_participants.len(), 2);
    assert_eq!(detail.progress.total, 0);
    assert_eq!(detail.progress.percent, 0);
}

#[test]
fn test_detail_unknown_tournament() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let err: ApiError = get_tournament_detail(&mut engine, "missing").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_delete_reports_cascade() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, match_ids): (String, Vec<String>) =
        create_test_active(&mut engine, &["alice", "bob", "carol"]);

    let response: DeleteTournamentResponse =
        delete_tournament(&mut engine, &tournament_id, &create_test_context()).unwrap();

    assert_eq!(response.matches_removed, match_ids.len());
    assert_eq!(response.assignments_removed, 0);
    assert!(list_tournaments(&mut engine).unwrap().tournaments.is_empty());
}

// ============================================================================
// Setup
// ============================================================================

#[test]
fn test_roster_identifiers_are_trimmed() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String = create_test_tournament(&mut engine, "users_only");

    let response: TournamentResponse = set_roster(
        &mut engine,
        &tournament_id,
        &SetRosterRequest {
            participants: vec![String::from(" alice "), String::from("bob")],
        },
        &create_test_context(),
    )
    .unwrap();

    assert_eq!(response.tournament.roster, vec!["alice", "bob"]);
}

#[test]
fn test_reserved_participant_rejected() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String = create_test_tournament(&mut engine, "users_only");

    let err: ApiError = set_roster(
        &mut engine,
        &tournament_id,
        &SetRosterRequest {
            participants: vec![String::from("alice"), String::from("BYE")],
        },
        &create_test_context(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "participants"));
}

#[test]
fn test_lottery_response_in_roster_order() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String =
        create_test_drawn_lottery(&mut engine, &["carol", "alice"], &["ars", "che", "liv"]);

    let response: RunLotteryResponse = run_lottery(
        &mut engine,
        &tournament_id,
        &mut create_test_rng(),
        &create_test_context(),
    )
    .unwrap();

    let participants: Vec<&str> = response
        .assignments
        .iter()
        .map(|a| a.participant_id.as_str())
        .collect();
    assert_eq!(participants, vec!["carol", "alice"]);
    assert_ne!(
        response.assignments[0].team_id,
        response.assignments[1].team_id
    );
}

#[test]
fn test_lottery_on_users_only_is_precondition() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String = create_test_users_only(&mut engine, &["alice", "bob"]);

    let err: ApiError = run_lottery(
        &mut engine,
        &tournament_id,
        &mut create_test_rng(),
        &create_test_context(),
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Precondition);
}

// ============================================================================
// Fixtures and results
// ============================================================================

#[test]
fn test_generate_fixtures_response() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String = create_test_users_only(&mut engine, &["a", "b", "c", "d"]);

    let response: GenerateFixturesResponse =
        generate_fixtures(&mut engine, &tournament_id, &create_test_context()).unwrap();

    assert_eq!(response.match_count, 12);
    assert_eq!(response.matchday_count, 6);
    assert_eq!(response.status, "active");
}

#[test]
fn test_matches_grouped_by_matchday() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, _): (String, Vec<String>) =
        create_test_active(&mut engine, &["a", "b", "c", "d"]);

    let response: ListMatchesResponse = list_matches(&mut engine, &tournament_id).unwrap();

    let days: Vec<u32> = response.matchdays.iter().map(|d| d.matchday).collect();
    assert_eq!(days, vec![1, 2, 3, 4, 5, 6]);
    assert!(response.matchdays.iter().all(|d| d.matches.len() == 2));
}

#[test]
fn test_set_result_reports_progress() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (_, match_ids): (String, Vec<String>) = create_test_active(&mut engine, &["a", "b"]);

    let response: MatchResultResponse =
        set_result(&mut engine, &match_ids[0], &score(2.0, 2.0), &create_test_context())
            .unwrap();

    assert!(response.match_info.completed);
    assert_eq!(response.match_info.score_a, Some(2));
    assert_eq!(response.match_info.score_b, Some(2));
    assert_eq!(response.progress_percent, 50);
}

#[test]
fn test_fractional_score_leaves_match_untouched() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, match_ids): (String, Vec<String>) =
        create_test_active(&mut engine, &["a", "b"]);

    let err: ApiError =
        set_result(&mut engine, &match_ids[0], &score(1.5, 0.0), &create_test_context())
            .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    let listed: ListMatchesResponse = list_matches(&mut engine, &tournament_id).unwrap();
    assert!(!listed.matchdays[0].matches[0].completed);
}

#[test]
fn test_undo_keeps_scores_for_editing() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (_, match_ids): (String, Vec<String>) = create_test_active(&mut engine, &["a", "b"]);
    set_result(&mut engine, &match_ids[0], &score(3.0, 1.0), &create_test_context()).unwrap();

    let response: MatchResultResponse =
        undo_result(&mut engine, &match_ids[0], &create_test_context()).unwrap();

    assert!(!response.match_info.completed);
    assert_eq!(response.match_info.score_a, Some(3));
    assert_eq!(response.progress_percent, 0);
}

#[test]
fn test_result_for_unknown_match() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let err: ApiError =
        set_result(&mut engine, "nope", &score(1.0, 0.0), &create_test_context()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_standings_with_directory_names() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, match_ids): (String, Vec<String>) =
        create_test_active(&mut engine, &["alice", "bob"]);
    complete_all(&mut engine, &match_ids);
    let directory: HashMap<ParticipantId, String> =
        HashMap::from([(ParticipantId::new("bob"), String::from("Bob B."))]);

    let response: StandingsResponse =
        get_standings(&mut engine, &tournament_id, &directory).unwrap();

    assert_eq!(response.rows.len(), 2);
    assert!(response.rows.iter().all(|row| row.points == 3));
    assert!(response.rows.iter().any(|row| row.display_name == "Bob B."));
    assert!(
        response
            .rows
            .iter()
            .any(|row| row.display_name == "Unknown participant")
    );
}

#[test]
fn test_audit_trail_attributes_operator() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String = create_test_users_only(&mut engine, &["a", "b"]);

    let trail: AuditTrailResponse = get_audit_trail(&mut engine, Some(&tournament_id)).unwrap();

    let actions: Vec<&str> = trail.events.iter().map(|e| e.action.as_str()).collect();
    assert_eq!(actions, vec!["CreateTournament", "SetRoster"]);
    assert!(trail.events.iter().all(|e| e.actor_id == "admin-123"
        && e.actor_type == "operator"
        && e.cause_id == "api-req-456"));
}

// ============================================================================
// SQLite-backed engine
// ============================================================================

#[test]
fn test_handlers_over_sqlite() {
    let mut engine: Engine<SqlitePersistence> =
        Engine::new(SqlitePersistence::new_in_memory().unwrap());

    let created: TournamentResponse = create_tournament(
        &mut engine,
        &CreateTournamentRequest {
            name: String::from("Persisted League"),
            format: String::from("users_only"),
        },
        &create_test_context(),
    )
    .unwrap();
    let tournament_id: String = created.tournament.tournament_id;
    set_roster(
        &mut engine,
        &tournament_id,
        &SetRosterRequest {
            participants: vec![String::from("alice"), String::from("bob")],
        },
        &create_test_context(),
    )
    .unwrap();
    generate_fixtures(&mut engine, &tournament_id, &create_test_context()).unwrap();

    let listed: ListMatchesResponse = list_matches(&mut engine, &tournament_id).unwrap();
    assert_eq!(listed.matchdays.len(), 2);

    let json: String = serde_json::to_string(&listed).unwrap();
    let parsed: ListMatchesResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, listed);
}
