// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Assignment, Match, MatchId, ParticipantId, Scoreline, TeamId, Tournament, TournamentFormat,
    TournamentId,
};

pub fn create_test_roster(ids: &[&str]) -> Vec<ParticipantId> {
    ids.iter().map(|id| ParticipantId::new(id)).collect()
}

pub fn create_test_pool(ids: &[&str]) -> Vec<TeamId> {
    ids.iter().map(|id| TeamId::new(id)).collect()
}

pub fn create_test_tournament(format: TournamentFormat, roster: &[&str]) -> Tournament {
    let mut tournament: Tournament = Tournament::new("Test Cup", format);
    tournament.roster = create_test_roster(roster);
    tournament
}

pub fn create_test_match(
    tournament_id: &TournamentId,
    matchday: u32,
    player_a: &str,
    player_b: &str,
    score: Option<(u32, u32)>,
) -> Match {
    Match {
        id: MatchId::generate(),
        tournament_id: tournament_id.clone(),
        matchday,
        player_a: ParticipantId::new(player_a),
        player_b: ParticipantId::new(player_b),
        team_a: None,
        team_b: None,
        score: score.map(|(a, b)| Scoreline::new(a, b)),
        completed: score.is_some(),
    }
}

pub fn create_test_assignment(
    tournament_id: &TournamentId,
    participant_id: &str,
    team_id: &str,
) -> Assignment {
    Assignment::new(
        tournament_id.clone(),
        ParticipantId::new(participant_id),
        TeamId::new(team_id),
    )
}
