// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    complete_all_matches, create_active_tournament, create_lottery_tournament, create_test_actor,
    create_test_cause, create_test_engine, create_test_rng, create_users_only_tournament, ids,
};
use crate::{CoreError, Engine, InMemoryStore};
use matchday_audit::AuditEvent;
use matchday_domain::{
    Assignment, ChatMessage, DomainError, EmptyDirectory, ErrorKind, FixtureReadiness, Match,
    MatchId, MatchState, ParticipantId, Scoreline, StandingRow, TeamId, Tournament,
    TournamentFormat, TournamentId, TournamentStatus, UNKNOWN_PARTICIPANT_NAME,
};
use std::collections::{HashMap, HashSet};

// ============================================================================
// Catalog
// ============================================================================

#[test]
fn test_create_and_list_tournaments() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let created: Tournament = engine
        .create_tournament(
            "  Spring Cup  ",
            TournamentFormat::Lottery,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(created.name, "Spring Cup");
    assert_eq!(created.status, TournamentStatus::Upcoming);
    assert!(created.roster.is_empty());
    assert_eq!(engine.list_tournaments().unwrap(), vec![created.clone()]);
    assert_eq!(engine.get_tournament(&created.id).unwrap(), created);
}

#[test]
fn test_get_unknown_tournament() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let err: CoreError = engine
        .get_tournament(&TournamentId::new("missing"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::TournamentNotFound(String::from("missing")))
    );
}

// ============================================================================
// Lottery
// ============================================================================

#[test]
fn test_lottery_assigns_distinct_pool_teams() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament = create_lottery_tournament(
        &mut engine,
        &["alice", "bob", "carol"],
        &["ars", "che", "liv", "mci"],
    );

    let assignments: Vec<Assignment> = engine
        .run_lottery(
            &tournament.id,
            &mut create_test_rng(),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(assignments.len(), 3);
    let participants: HashSet<&ParticipantId> =
        assignments.iter().map(|a| &a.participant_id).collect();
    let drawn: HashSet<&TeamId> = assignments.iter().map(|a| &a.team_id).collect();
    assert_eq!(participants.len(), 3);
    assert_eq!(drawn.len(), 3);
    assert!(drawn.iter().all(|t| tournament.draw_pool.contains(t)));
    assert_eq!(engine.list_assignments(&tournament.id).unwrap(), assignments);
}

#[test]
fn test_second_lottery_replaces_first() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament =
        create_lottery_tournament(&mut engine, &["alice", "bob"], &["ars", "che", "liv"]);

    let mut rng = create_test_rng();
    engine
        .run_lottery(&tournament.id, &mut rng, create_test_actor(), create_test_cause())
        .unwrap();
    let second: Vec<Assignment> = engine
        .run_lottery(&tournament.id, &mut rng, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(engine.list_assignments(&tournament.id).unwrap(), second);
}

#[test]
fn test_lottery_short_pool_leaves_assignments_untouched() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament =
        create_lottery_tournament(&mut engine, &["alice", "bob", "carol"], &["ars", "che"]);

    let err: CoreError = engine
        .run_lottery(
            &tournament.id,
            &mut create_test_rng(),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Precondition);
    assert!(engine.list_assignments(&tournament.id).unwrap().is_empty());
}

#[test]
fn test_lottery_empty_roster() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament = create_lottery_tournament(&mut engine, &[], &["ars", "che"]);

    let err: CoreError = engine
        .run_lottery(
            &tournament.id,
            &mut create_test_rng(),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap_err();
    assert_eq!(err, CoreError::DomainViolation(DomainError::EmptyRoster));
}

// ============================================================================
// Fixture readiness and generation
// ============================================================================

#[test]
fn test_readiness_reports_missing_draw() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament =
        create_lottery_tournament(&mut engine, &["alice", "bob"], &["ars", "che"]);

    let before: FixtureReadiness = engine.fixture_readiness(&tournament.id).unwrap();
    assert!(!before.is_ready);
    assert_eq!(before.unassigned_participants, ids(&["alice", "bob"]));
    assert!(!before.blocking_reasons.is_empty());

    engine
        .run_lottery(
            &tournament.id,
            &mut create_test_rng(),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    let after: FixtureReadiness = engine.fixture_readiness(&tournament.id).unwrap();
    assert!(after.is_ready);
    assert!(after.blocking_reasons.is_empty());
    assert_eq!(after.existing_matches, 0);
}

#[test]
fn test_generate_fixtures_for_drawn_lottery() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament = create_lottery_tournament(
        &mut engine,
        &["alice", "bob", "carol", "dave"],
        &["ars", "che", "liv", "mci"],
    );
    let assignments: Vec<Assignment> = engine
        .run_lottery(
            &tournament.id,
            &mut create_test_rng(),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    let team_of: HashMap<&ParticipantId, &TeamId> = assignments
        .iter()
        .map(|a| (&a.participant_id, &a.team_id))
        .collect();

    let matches: Vec<Match> = engine
        .generate_fixtures(&tournament.id, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(matches.len(), 12);
    for m in &matches {
        assert_eq!(m.team_a.as_ref(), team_of.get(&m.player_a).copied());
        assert_eq!(m.team_b.as_ref(), team_of.get(&m.player_b).copied());
        assert_eq!(m.state(), MatchState::Scheduled);
    }
    assert_eq!(
        engine.get_tournament(&tournament.id).unwrap().status,
        TournamentStatus::Active
    );
}

#[test]
fn test_three_participants_get_six_matches() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (_, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob", "carol"]);

    assert_eq!(matches.len(), 6);
    let matchdays: Vec<u32> = matches.iter().map(|m| m.matchday).collect();
    assert_eq!(matchdays, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_list_matches_ordered_by_matchday() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament, generated): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["a", "b", "c", "d", "e", "f"]);

    let listed: Vec<Match> = engine.list_matches(&tournament.id).unwrap();
    assert_eq!(listed, generated);
    assert!(listed.windows(2).all(|w| w[0].matchday <= w[1].matchday));
}

#[test]
fn test_generate_twice_is_rejected() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament, _): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob"]);

    let err: CoreError = engine
        .generate_fixtures(&tournament.id, create_test_actor(), create_test_cause())
        .unwrap_err();
    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::FixturesAlreadyGenerated { existing: 2, .. })
    ));
    assert_eq!(engine.list_matches(&tournament.id).unwrap().len(), 2);
}

// ============================================================================
// Results
// ============================================================================

#[test]
fn test_set_result_marks_match_completed() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (_, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob"]);

    let updated: Match = engine
        .set_result(&matches[0].id, 2, 1, create_test_actor(), create_test_cause())
        .unwrap();

    assert!(updated.completed);
    assert_eq!(updated.score, Some(Scoreline::new(2, 1)));
    assert_eq!(updated.state(), MatchState::Recorded);
}

#[test]
fn test_set_result_negative_score_is_validation_error() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (_, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob"]);

    let err: CoreError = engine
        .set_result(&matches[0].id, -1, 2, create_test_actor(), create_test_cause())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::InvalidScore { .. })
    ));
}

#[test]
fn test_set_result_unknown_match_is_not_found() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    create_active_tournament(&mut engine, &["alice", "bob"]);

    let err: CoreError = engine
        .set_result(
            &MatchId::new("bad-id"),
            1,
            1,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        err,
        CoreError::DomainViolation(DomainError::MatchNotFound(String::from("bad-id")))
    );
}

#[test]
fn test_undo_result_reopens_match() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob"]);
    engine
        .set_result(&matches[0].id, 4, 4, create_test_actor(), create_test_cause())
        .unwrap();

    let reopened: Match = engine
        .undo_result(&matches[0].id, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(reopened.state(), MatchState::Scheduled);
    assert_eq!(reopened.score, Some(Scoreline::new(4, 4)));
    assert_eq!(engine.progress(&tournament.id).unwrap().completed, 0);
}

#[test]
fn test_undo_scheduled_match_succeeds_unchanged() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (_, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob"]);

    let unchanged: Match = engine
        .undo_result(&matches[1].id, create_test_actor(), create_test_cause())
        .unwrap();

    assert_eq!(unchanged, matches[1]);
}

// ============================================================================
// Standings
// ============================================================================

#[test]
fn test_standings_after_results() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob", "carol"]);

    // Every match won by the participant listed first in roster order
    let rank = |p: &ParticipantId| match p.as_str() {
        "alice" => 0,
        "bob" => 1,
        _ => 2,
    };
    for m in &matches {
        let (a, b): (i64, i64) = if rank(&m.player_a) < rank(&m.player_b) {
            (2, 0)
        } else {
            (0, 2)
        };
        engine
            .set_result(&m.id, a, b, create_test_actor(), create_test_cause())
            .unwrap();
    }

    let directory: HashMap<ParticipantId, String> = HashMap::from([
        (ParticipantId::new("alice"), String::from("Alice")),
        (ParticipantId::new("bob"), String::from("Bob")),
    ]);
    let table: Vec<StandingRow> = engine
        .compute_standings(&tournament.id, &directory)
        .unwrap();

    assert_eq!(table.len(), 3);
    assert_eq!(table[0].participant_id.as_str(), "alice");
    assert_eq!(table[0].display_name, "Alice");
    assert_eq!(table[0].points, 12);
    assert_eq!(table[0].played, 4);
    assert_eq!(table[0].goal_difference, 8);
    assert_eq!(table[1].participant_id.as_str(), "bob");
    assert_eq!(table[1].points, 6);
    assert_eq!(table[2].participant_id.as_str(), "carol");
    assert_eq!(table[2].display_name, UNKNOWN_PARTICIPANT_NAME);
    assert_eq!(table[2].points, 0);
    assert_eq!(table[2].lost, 4);
    assert_eq!(
        table.iter().map(|r| r.position).collect::<Vec<usize>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn test_standings_ignore_undone_results() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob"]);
    engine
        .set_result(&matches[0].id, 3, 0, create_test_actor(), create_test_cause())
        .unwrap();
    engine
        .undo_result(&matches[0].id, create_test_actor(), create_test_cause())
        .unwrap();

    let table: Vec<StandingRow> = engine
        .compute_standings(&tournament.id, &EmptyDirectory)
        .unwrap();

    assert!(table.iter().all(|r| r.played == 0 && r.points == 0));
}

// ============================================================================
// Chat and audit
// ============================================================================

#[test]
fn test_record_chat_message() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament = create_users_only_tournament(&mut engine, &["alice", "bob"]);

    let message: ChatMessage = engine
        .record_chat_message(
            &tournament.id,
            ParticipantId::new("alice"),
            "good luck",
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();

    assert_eq!(message.tournament_id.as_ref(), Some(&tournament.id));
    assert_eq!(message.body, "good luck");
}

#[test]
fn test_audit_trail_records_every_operation() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament, matches): (Tournament, Vec<Match>) =
        create_active_tournament(&mut engine, &["alice", "bob"]);
    complete_all_matches(&mut engine, &matches);
    engine
        .finish_tournament(&tournament.id, create_test_actor(), create_test_cause())
        .unwrap();

    let trail: Vec<AuditEvent> = engine.audit_trail(Some(&tournament.id)).unwrap();
    let names: Vec<&str> = trail.iter().map(|e| e.action.name.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "CreateTournament",
            "SetRoster",
            "GenerateFixtures",
            "SetResult",
            "SetResult",
            "FinishTournament"
        ]
    );
    let event_ids: Vec<i64> = trail.iter().filter_map(|e| e.event_id).collect();
    assert_eq!(event_ids, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_failed_operation_leaves_no_audit_event() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament: Tournament = create_users_only_tournament(&mut engine, &["alice"]);
    let before: usize = engine.audit_trail(None).unwrap().len();

    assert!(
        engine
            .generate_fixtures(&tournament.id, create_test_actor(), create_test_cause())
            .is_err()
    );

    assert_eq!(engine.audit_trail(None).unwrap().len(), before);
}
