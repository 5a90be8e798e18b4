// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::SqlitePersistence;
use matchday::{StoreWrite, TournamentStore};
use matchday_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use matchday_domain::{Match, MatchId, ParticipantId, Tournament, TournamentFormat, TournamentId};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_event(name: &str, tournament_id: Option<&TournamentId>) -> AuditEvent {
    AuditEvent::new(
        tournament_id.cloned(),
        create_test_actor(),
        create_test_cause(),
        Action::new(name.to_string(), None),
        StateSnapshot::absent(),
        StateSnapshot::absent(),
    )
}

pub fn create_test_match(tournament_id: &TournamentId, id: &str, matchday: u32) -> Match {
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

/// Creates an in-memory store holding one upcoming tournament.
pub fn create_seeded_persistence(format: TournamentFormat) -> (SqlitePersistence, Tournament) {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    let mut tournament: Tournament = Tournament::new("Persisted Cup", format);
    tournament.roster = vec![ParticipantId::new("alice"), ParticipantId::new("bob")];

    persistence
        .persist_transition(
            &[StoreWrite::CreateTournament(tournament.clone())],
            &create_test_event("CreateTournament", Some(&tournament.id)),
        )
        .unwrap();

    (persistence, tournament)
}
