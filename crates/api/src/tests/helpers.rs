// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use matchday::{Engine, InMemoryStore};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::{
    CreateTournamentRequest, RequestContext, SetDrawPoolRequest, SetResultRequest,
    SetRosterRequest, TournamentResponse, create_tournament, generate_fixtures, list_matches,
    run_lottery, set_draw_pool, set_result, set_roster,
};

pub fn create_test_context() -> RequestContext {
    RequestContext {
        actor_id: String::from("admin-123"),
        cause_id: String::from("api-req-456"),
        cause_description: String::from("API request"),
    }
}

pub fn create_test_engine() -> Engine<InMemoryStore> {
    Engine::new(InMemoryStore::new())
}

pub fn create_test_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

pub fn score(a: f64, b: f64) -> SetResultRequest {
    SetResultRequest {
        score_a: Some(a),
        score_b: Some(b),
    }
}

/// Creates a tournament through the API and returns its identifier.
pub fn create_test_tournament(engine: &mut Engine<InMemoryStore>, format: &str) -> String {
    let response: TournamentResponse = create_tournament(
        engine,
        &CreateTournamentRequest {
            name: String::from("Office League"),
            format: format.to_string(),
        },
        &create_test_context(),
    )
    .unwrap();
    response.tournament.tournament_id
}

/// Creates a users-only tournament with the given roster.
pub fn create_test_users_only(engine: &mut Engine<InMemoryStore>, roster: &[&str]) -> String {
    let tournament_id: String = create_test_tournament(engine, "users_only");
    set_roster(
        engine,
        &tournament_id,
        &SetRosterRequest {
            participants: roster.iter().map(ToString::to_string).collect(),
        },
        &create_test_context(),
    )
    .unwrap();
    tournament_id
}

/// Creates a drawn lottery tournament with the given roster and pool.
pub fn create_test_drawn_lottery(
    engine: &mut Engine<InMemoryStore>,
    roster: &[&str],
    pool: &[&str],
) -> String {
    let tournament_id: String = create_test_tournament(engine, "lottery");
    set_roster(
        engine,
        &tournament_id,
        &SetRosterRequest {
            participants: roster.iter().map(ToString::to_string).collect(),
        },
        &create_test_context(),
    )
    .unwrap();
    set_draw_pool(
        engine,
        &tournament_id,
        &SetDrawPoolRequest {
            teams: pool.iter().map(ToString::to_string).collect(),
        },
        &create_test_context(),
    )
    .unwrap();
    run_lottery(
        engine,
        &tournament_id,
        &mut create_test_rng(),
        &create_test_context(),
    )
    .unwrap();
    tournament_id
}

/// Creates an active users-only tournament and returns its id and match ids.
pub fn create_test_active(
    engine: &mut Engine<InMemoryStore>,
    roster: &[&str],
) -> (String, Vec<String>) {
    let tournament_id: String = create_test_users_only(engine, roster);
    generate_fixtures(engine, &tournament_id, &create_test_context()).unwrap();
    let match_ids: Vec<String> = list_matches(engine, &tournament_id)
        .unwrap()
        .matchdays
        .into_iter()
        .flat_map(|day| day.matches)
        .map(|m| m.match_id)
        .collect();
    (tournament_id, match_ids)
}

/// Records a 1-0 home win for every match.
pub fn complete_all(engine: &mut Engine<InMemoryStore>, match_ids: &[String]) {
    for match_id in match_ids {
        set_result(engine, match_id, &score(1.0, 0.0), &create_test_context()).unwrap();
    }
}
