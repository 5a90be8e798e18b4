// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status gating as seen through the API.

use matchday::{Engine, InMemoryStore};
use matchday_domain::ErrorKind;

use super::helpers::{
    complete_all, create_test_active, create_test_context, create_test_engine,
    create_test_users_only, score,
};
use crate::{
    ApiError, SetRosterRequest, TournamentResponse, finish_tournament, generate_fixtures,
    reset_tournament, set_result, set_roster, undo_result,
};

fn create_finished(engine: &mut Engine<InMemoryStore>) -> (String, Vec<String>) {
    let (tournament_id, match_ids): (String, Vec<String>) =
        create_test_active(engine, &["alice", "bob"]);
    complete_all(engine, &match_ids);
    finish_tournament(engine, &tournament_id, &create_test_context()).unwrap();
    (tournament_id, match_ids)
}

#[test]
fn test_finish_before_fixtures_is_precondition() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let tournament_id: String = create_test_users_only(&mut engine, &["alice", "bob"]);

    let err: ApiError = finish_tournament(&mut engine, &tournament_id, &create_test_context())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Precondition);
}

#[test]
fn test_finish_with_open_matches_is_precondition() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, match_ids): (String, Vec<String>) =
        create_test_active(&mut engine, &["alice", "bob"]);
    set_result(&mut engine, &match_ids[0], &score(1.0, 1.0), &create_test_context()).unwrap();

    let err: ApiError = finish_tournament(&mut engine, &tournament_id, &create_test_context())
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "all_matches_completed"
    ));
}

#[test]
fn test_finished_tournament_is_locked() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, match_ids): (String, Vec<String>) = create_finished(&mut engine);

    let result_err: ApiError =
        set_result(&mut engine, &match_ids[0], &score(0.0, 0.0), &create_test_context())
            .unwrap_err();
    let undo_err: ApiError =
        undo_result(&mut engine, &match_ids[1], &create_test_context()).unwrap_err();
    let roster_err: ApiError = set_roster(
        &mut engine,
        &tournament_id,
        &SetRosterRequest {
            participants: vec![String::from("carol"), String::from("dave")],
        },
        &create_test_context(),
    )
    .unwrap_err();
    let fixtures_err: ApiError =
        generate_fixtures(&mut engine, &tournament_id, &create_test_context()).unwrap_err();

    for err in [result_err, undo_err, roster_err, fixtures_err] {
        assert_eq!(err.kind(), ErrorKind::Locked);
        assert_eq!(
            err,
            ApiError::TournamentLocked {
                tournament_id: tournament_id.clone()
            }
        );
    }
}

#[test]
fn test_reset_rejected_once_finished() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, _): (String, Vec<String>) = create_finished(&mut engine);

    let err: ApiError =
        reset_tournament(&mut engine, &tournament_id, &create_test_context()).unwrap_err();

    assert!(matches!(
        err,
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "no_reset_after_finish"
    ));
}

#[test]
fn test_reset_reopens_setup() {
    let mut engine: Engine<InMemoryStore> = create_test_engine();
    let (tournament_id, _): (String, Vec<String>) =
        create_test_active(&mut engine, &["alice", "bob"]);

    let response: TournamentResponse =
        reset_tournament(&mut engine, &tournament_id, &create_test_context()).unwrap();
    assert_eq!(response.tournament.status, "upcoming");

    set_roster(
        &mut engine,
        &tournament_id,
        &SetRosterRequest {
            participants: vec![String::from("alice"), String::from("carol")],
        },
        &create_test_context(),
    )
    .unwrap();
}
