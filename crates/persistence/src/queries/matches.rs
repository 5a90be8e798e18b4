// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use matchday_domain::{Match, MatchId, ParticipantId, Scoreline, TeamId, TournamentId};

use crate::data_models::{MatchRow, from_column};
use crate::diesel_schema::matches;
use crate::error::PersistenceError;

/// Lists a tournament's matches by matchday, then generation order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_matches(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
) -> Result<Vec<Match>, PersistenceError> {
    matches::table
        .filter(matches::tournament_id.eq(tournament_id.as_str()))
        .order((matches::matchday.asc(), matches::ordinal.asc()))
        .select(MatchRow::as_select())
        .load::<MatchRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_matches: {e}")))?
        .into_iter()
        .map(match_from_row)
        .collect()
}

/// Retrieves a match by identifier.
///
/// # Errors
///
/// Returns an error if the query fails or the row is malformed.
pub fn get_match(
    conn: &mut SqliteConnection,
    match_id: &MatchId,
) -> Result<Option<Match>, PersistenceError> {
    matches::table
        .filter(matches::match_id.eq(match_id.as_str()))
        .select(MatchRow::as_select())
        .first::<MatchRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_match: {e}")))?
        .map(match_from_row)
        .transpose()
}

/// Lists every match, including those whose tournament is gone.
///
/// # Errors
///
/// Returns an error if the query fails or a row is malformed.
pub fn list_all_matches(conn: &mut SqliteConnection) -> Result<Vec<Match>, PersistenceError> {
    matches::table
        .order((
            matches::tournament_id.asc(),
            matches::matchday.asc(),
            matches::ordinal.asc(),
        ))
        .select(MatchRow::as_select())
        .load::<MatchRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_all_matches: {e}")))?
        .into_iter()
        .map(match_from_row)
        .collect()
}

fn match_from_row(row: MatchRow) -> Result<Match, PersistenceError> {
    let score: Option<Scoreline> = match (row.score_a, row.score_b) {
        (Some(a), Some(b)) => Some(Scoreline::new(
            from_column("score_a", a)?,
            from_column("score_b", b)?,
        )),
        (None, None) => None,
        _ => {
            return Err(PersistenceError::ReconstructionError(format!(
                "match {} has only one score",
                row.match_id
            )));
        }
    };

    Ok(Match {
        id: MatchId::new(&row.match_id),
        tournament_id: TournamentId::new(&row.tournament_id),
        matchday: from_column("matchday", row.matchday)?,
        player_a: ParticipantId::new(&row.player_a),
        player_b: ParticipantId::new(&row.player_b),
        team_a: row.team_a.as_deref().map(TeamId::new),
        team_b: row.team_b.as_deref().map(TeamId::new),
        score,
        completed: row.completed != 0,
    })
}
