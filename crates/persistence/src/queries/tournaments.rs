// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament queries.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use matchday_domain::{
    ParticipantId, TeamId, Tournament, TournamentFormat, TournamentId, TournamentStatus,
};

use crate::data_models::{TournamentRow, parse_timestamp};
use crate::diesel_schema::{tournament_draw_pool, tournament_roster, tournaments};
use crate::error::PersistenceError;

/// Lists every tournament in creation order.
///
/// # Errors
///
/// Returns an error if a query fails or a row is malformed.
pub fn list_tournaments(conn: &mut SqliteConnection) -> Result<Vec<Tournament>, PersistenceError> {
    // NOTE: rowid is raw SQL; it records insertion order
    let rows: Vec<TournamentRow> = tournaments::table
        .select(TournamentRow::as_select())
        .order(sql::<BigInt>("tournaments.rowid"))
        .load::<TournamentRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_tournaments: {e}")))?;

    rows.into_iter()
        .map(|row| tournament_from_row(conn, row))
        .collect()
}

/// Retrieves one tournament with its roster and draw pool.
///
/// # Errors
///
/// Returns an error if a query fails or a row is malformed.
pub fn get_tournament(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
) -> Result<Option<Tournament>, PersistenceError> {
    let row: Option<TournamentRow> = tournaments::table
        .filter(tournaments::tournament_id.eq(tournament_id.as_str()))
        .select(TournamentRow::as_select())
        .first::<TournamentRow>(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_tournament: {e}")))?;

    row.map(|row| tournament_from_row(conn, row)).transpose()
}

/// Checks whether a tournament row exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn tournament_exists(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
) -> Result<bool, PersistenceError> {
    diesel::select(diesel::dsl::exists(
        tournaments::table.filter(tournaments::tournament_id.eq(tournament_id.as_str())),
    ))
    .get_result::<bool>(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("tournament_exists: {e}")))
}

fn tournament_from_row(
    conn: &mut SqliteConnection,
    row: TournamentRow,
) -> Result<Tournament, PersistenceError> {
    let roster: Vec<ParticipantId> = tournament_roster::table
        .filter(tournament_roster::tournament_id.eq(&row.tournament_id))
        .order(tournament_roster::position.asc())
        .select(tournament_roster::participant_id)
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load roster: {e}")))?
        .iter()
        .map(|id| ParticipantId::new(id))
        .collect();

    let draw_pool: Vec<TeamId> = tournament_draw_pool::table
        .filter(tournament_draw_pool::tournament_id.eq(&row.tournament_id))
        .order(tournament_draw_pool::position.asc())
        .select(tournament_draw_pool::team_id)
        .load::<String>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("load draw pool: {e}")))?
        .iter()
        .map(|id| TeamId::new(id))
        .collect();

    Ok(Tournament {
        id: TournamentId::new(&row.tournament_id),
        name: row.name,
        format: row
            .format
            .parse::<TournamentFormat>()
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        status: row
            .status
            .parse::<TournamentStatus>()
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        roster,
        draw_pool,
        created_at: parse_timestamp(&row.created_at)?,
    })
}
