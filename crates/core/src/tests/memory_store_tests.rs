// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_actor, create_test_cause, ids};
use crate::{InMemoryStore, StoreError, StoreWrite, TournamentStore};
use matchday_audit::{Action, AuditEvent, StateSnapshot};
use matchday_domain::{
    Assignment, Match, MatchId, ParticipantId, Scoreline, Tournament, TournamentFormat,
    TournamentId, TournamentStatus,
};

fn create_event(name: &str, tournament_id: Option<TournamentId>) -> AuditEvent {
    AuditEvent::new(
        tournament_id,
        create_test_actor(),
        create_test_cause(),
        Action::new(name.to_string(), None),
        StateSnapshot::absent(),
        StateSnapshot::absent(),
    )
}

fn create_match(tournament_id: &TournamentId, id: &str, matchday: u32) -> Match {
    Match {
        id: MatchId::new(id),
        tournament_id: tournament_id.clone(),
        matchday,
        player_a: ParticipantId::new("alice"),
        player_b: ParticipantId::new("bob"),
        team_a: None,
        team_b: None,
        score: None,
        completed: false,
    }
}

fn create_seeded_store() -> (InMemoryStore, Tournament) {
    let mut store: InMemoryStore = InMemoryStore::new();
    let tournament: Tournament = Tournament::new("Memory Cup", TournamentFormat::UsersOnly);
    store
        .persist_transition(
            &[StoreWrite::CreateTournament(tournament.clone())],
            &create_event("CreateTournament", Some(tournament.id.clone())),
        )
        .unwrap();
    (store, tournament)
}

#[test]
fn test_event_ids_increase() {
    let (mut store, tournament): (InMemoryStore, Tournament) = create_seeded_store();

    let second: i64 = store
        .persist_transition(
            &[StoreWrite::SetRoster {
                tournament_id: tournament.id.clone(),
                participants: ids(&["alice", "bob"]),
            }],
            &create_event("SetRoster", Some(tournament.id.clone())),
        )
        .unwrap();

    assert_eq!(second, 2);
    let events: Vec<AuditEvent> = store.list_audit_events(None).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].event_id, Some(2));
}

#[test]
fn test_failed_batch_applies_nothing() {
    let (mut store, tournament): (InMemoryStore, Tournament) = create_seeded_store();

    let result: Result<i64, StoreError> = store.persist_transition(
        &[
            StoreWrite::SetStatus {
                tournament_id: tournament.id.clone(),
                status: TournamentStatus::Active,
            },
            StoreWrite::SetMatchResult {
                match_id: MatchId::new("missing"),
                score: Scoreline::new(1, 0),
            },
        ],
        &create_event("SetResult", Some(tournament.id.clone())),
    );

    assert_eq!(
        result,
        Err(StoreError::NotFound {
            entity: "match",
            id: String::from("missing")
        })
    );
    assert_eq!(
        store.get_tournament(&tournament.id).unwrap().unwrap().status,
        TournamentStatus::Upcoming
    );
    assert_eq!(store.list_audit_events(None).unwrap().len(), 1);
}

#[test]
fn test_duplicate_tournament_conflicts() {
    let (mut store, tournament): (InMemoryStore, Tournament) = create_seeded_store();

    let result: Result<i64, StoreError> = store.persist_transition(
        &[StoreWrite::CreateTournament(tournament)],
        &create_event("CreateTournament", None),
    );

    assert!(matches!(result, Err(StoreError::Conflict(_))));
    assert_eq!(store.list_tournaments().unwrap().len(), 1);
}

#[test]
fn test_assignment_uniqueness_per_tournament() {
    let (mut store, tournament): (InMemoryStore, Tournament) = create_seeded_store();
    let first: Assignment =
        Assignment::new(tournament.id.clone(), "alice".into(), "ars".into());
    let same_team: Assignment = Assignment::new(tournament.id.clone(), "bob".into(), "ars".into());

    let result: Result<i64, StoreError> = store.persist_transition(
        &[StoreWrite::ReplaceAssignments {
            tournament_id: tournament.id.clone(),
            assignments: vec![first, same_team],
        }],
        &create_event("RunLottery", Some(tournament.id.clone())),
    );

    assert!(matches!(result, Err(StoreError::Conflict(_))));
    assert!(store.list_assignments(&tournament.id).unwrap().is_empty());
}

#[test]
fn test_matches_listed_by_matchday_in_insertion_order() {
    let (mut store, tournament): (InMemoryStore, Tournament) = create_seeded_store();
    let matches: Vec<Match> = vec![
        create_match(&tournament.id, "m3", 2),
        create_match(&tournament.id, "m1", 1),
        create_match(&tournament.id, "m4", 2),
        create_match(&tournament.id, "m2", 1),
    ];
    store
        .persist_transition(
            &[StoreWrite::InsertMatches(matches)],
            &create_event("GenerateFixtures", Some(tournament.id.clone())),
        )
        .unwrap();

    let listed: Vec<String> = store
        .list_matches(&tournament.id)
        .unwrap()
        .iter()
        .map(|m| m.id.as_str().to_string())
        .collect();

    assert_eq!(listed, vec!["m1", "m2", "m3", "m4"]);
}

#[test]
fn test_result_round_trip_keeps_score_on_clear() {
    let (mut store, tournament): (InMemoryStore, Tournament) = create_seeded_store();
    store
        .persist_transition(
            &[
                StoreWrite::InsertMatches(vec![create_match(&tournament.id, "m1", 1)]),
                StoreWrite::SetMatchResult {
                    match_id: MatchId::new("m1"),
                    score: Scoreline::new(2, 2),
                },
                StoreWrite::ClearMatchResult {
                    match_id: MatchId::new("m1"),
                },
            ],
            &create_event("SetResult", Some(tournament.id.clone())),
        )
        .unwrap();

    let stored: Match = store.get_match(&MatchId::new("m1")).unwrap().unwrap();
    assert!(!stored.completed);
    assert_eq!(stored.score, Some(Scoreline::new(2, 2)));
}

#[test]
fn test_audit_events_filtered_by_tournament() {
    let (mut store, tournament): (InMemoryStore, Tournament) = create_seeded_store();
    store
        .persist_transition(&[], &create_event("PurgeOrphans", None))
        .unwrap();

    assert_eq!(store.list_audit_events(Some(&tournament.id)).unwrap().len(), 1);
    assert_eq!(store.list_audit_events(None).unwrap().len(), 2);
}

#[test]
fn test_set_status_on_missing_tournament() {
    let mut store: InMemoryStore = InMemoryStore::new();

    let result: Result<i64, StoreError> = store.persist_transition(
        &[StoreWrite::SetStatus {
            tournament_id: TournamentId::new("missing"),
            status: TournamentStatus::Active,
        }],
        &create_event("GenerateFixtures", None),
    );

    assert!(matches!(
        result,
        Err(StoreError::NotFound {
            entity: "tournament",
            ..
        })
    ));
    assert!(store.list_audit_events(None).unwrap().is_empty());
}
