// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Engine, InMemoryStore};
use matchday_audit::{Actor, Cause};
use matchday_domain::{Match, ParticipantId, TeamId, Tournament, TournamentFormat};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("admin-123"), String::from("admin"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Admin request"))
}

pub fn create_test_rng() -> StdRng {
    StdRng::seed_from_u64(2026)
}

pub fn create_test_engine() -> Engine<InMemoryStore> {
    Engine::new(InMemoryStore::new())
}

pub fn ids(values: &[&str]) -> Vec<ParticipantId> {
    values.iter().map(|v| ParticipantId::new(v)).collect()
}

pub fn teams(values: &[&str]) -> Vec<TeamId> {
    values.iter().map(|v| TeamId::new(v)).collect()
}

/// Creates an upcoming users-only tournament with the given roster.
pub fn create_users_only_tournament(
    engine: &mut Engine<InMemoryStore>,
    roster: &[&str],
) -> Tournament {
    let tournament: Tournament = engine
        .create_tournament(
            "Friday League",
            TournamentFormat::UsersOnly,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    engine
        .set_roster(
            &tournament.id,
            ids(roster),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
}

/// Creates an upcoming lottery tournament with roster and pool, not yet drawn.
pub fn create_lottery_tournament(
    engine: &mut Engine<InMemoryStore>,
    roster: &[&str],
    pool: &[&str],
) -> Tournament {
    let tournament: Tournament = engine
        .create_tournament(
            "Lottery Cup",
            TournamentFormat::Lottery,
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    engine
        .set_roster(
            &tournament.id,
            ids(roster),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap();
    engine
        .set_draw_pool(
            &tournament.id,
            teams(pool),
            create_test_actor(),
            create_test_cause(),
        )
        .unwrap()
}

/// Creates an active users-only tournament and returns it with its matches.
pub fn create_active_tournament(
    engine: &mut Engine<InMemoryStore>,
    roster: &[&str],
) -> (Tournament, Vec<Match>) {
    let tournament: Tournament = create_users_only_tournament(engine, roster);
    let matches: Vec<Match> = engine
        .generate_fixtures(&tournament.id, create_test_actor(), create_test_cause())
        .unwrap();
    let tournament: Tournament = engine.get_tournament(&tournament.id).unwrap();
    (tournament, matches)
}

/// Records `1-0` for every match.
pub fn complete_all_matches(engine: &mut Engine<InMemoryStore>, matches: &[Match]) {
    for m in matches {
        engine
            .set_result(&m.id, 1, 0, create_test_actor(), create_test_cause())
            .unwrap();
    }
}
