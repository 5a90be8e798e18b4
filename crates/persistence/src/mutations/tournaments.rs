// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tournament mutations.
//!
//! Roster and draw pool rows are rewritten wholesale with their list
//! position so order survives a round trip.

use diesel::SqliteConnection;
use diesel::prelude::*;
use matchday_domain::{ParticipantId, TeamId, Tournament, TournamentId, TournamentStatus};
use tracing::debug;

use crate::data_models::{format_timestamp, to_column};
use crate::diesel_schema::{
    assignments, chat_messages, matches, tournament_draw_pool, tournament_roster, tournaments,
};
use crate::error::PersistenceError;

fn not_found(tournament_id: &TournamentId) -> PersistenceError {
    PersistenceError::NotFound {
        entity: "tournament",
        id: tournament_id.as_str().to_string(),
    }
}

/// Inserts a tournament with its roster and draw pool.
///
/// # Errors
///
/// Returns `Conflict` if the identifier is taken, or an error if an insert
/// fails.
pub fn insert_tournament(
    conn: &mut SqliteConnection,
    tournament: &Tournament,
) -> Result<(), PersistenceError> {
    diesel::insert_into(tournaments::table)
        .values((
            tournaments::tournament_id.eq(tournament.id.as_str()),
            tournaments::name.eq(&tournament.name),
            tournaments::format.eq(tournament.format.as_str()),
            tournaments::status.eq(tournament.status.as_str()),
            tournaments::created_at.eq(format_timestamp(tournament.created_at)?),
        ))
        .execute(conn)?;

    replace_roster(conn, &tournament.id, &tournament.roster)?;
    replace_draw_pool(conn, &tournament.id, &tournament.draw_pool)?;
    Ok(())
}

/// Changes a tournament's lifecycle state.
///
/// # Errors
///
/// Returns `NotFound` if the tournament does not exist.
pub fn set_status(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
    status: TournamentStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        tournaments::table.filter(tournaments::tournament_id.eq(tournament_id.as_str())),
    )
    .set(tournaments::status.eq(status.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(not_found(tournament_id));
    }
    Ok(())
}

/// Replaces a tournament's roster.
///
/// # Errors
///
/// Returns `NotFound` if the tournament does not exist.
pub fn replace_roster(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
    participants: &[ParticipantId],
) -> Result<(), PersistenceError> {
    if !crate::queries::tournament_exists(conn, tournament_id)? {
        return Err(not_found(tournament_id));
    }

    diesel::delete(
        tournament_roster::table
            .filter(tournament_roster::tournament_id.eq(tournament_id.as_str())),
    )
    .execute(conn)?;

    for (position, participant_id) in participants.iter().enumerate() {
        diesel::insert_into(tournament_roster::table)
            .values((
                tournament_roster::tournament_id.eq(tournament_id.as_str()),
                tournament_roster::position.eq(to_column("position", position)?),
                tournament_roster::participant_id.eq(participant_id.as_str()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Replaces a tournament's draw pool.
///
/// # Errors
///
/// Returns `NotFound` if the tournament does not exist.
pub fn replace_draw_pool(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
    teams: &[TeamId],
) -> Result<(), PersistenceError> {
    if !crate::queries::tournament_exists(conn, tournament_id)? {
        return Err(not_found(tournament_id));
    }

    diesel::delete(
        tournament_draw_pool::table
            .filter(tournament_draw_pool::tournament_id.eq(tournament_id.as_str())),
    )
    .execute(conn)?;

    for (position, team_id) in teams.iter().enumerate() {
        diesel::insert_into(tournament_draw_pool::table)
            .values((
                tournament_draw_pool::tournament_id.eq(tournament_id.as_str()),
                tournament_draw_pool::position.eq(to_column("position", position)?),
                tournament_draw_pool::team_id.eq(team_id.as_str()),
            ))
            .execute(conn)?;
    }
    Ok(())
}

/// Deletes a tournament and everything scoped to it.
///
/// Roster and draw pool rows go through `ON DELETE CASCADE`. Matches,
/// assignments and chat records carry no foreign key and are deleted here.
///
/// # Errors
///
/// Returns `NotFound` if the tournament does not exist.
pub fn delete_tournament(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
) -> Result<(), PersistenceError> {
    let id: &str = tournament_id.as_str();

    let match_count: usize =
        diesel::delete(matches::table.filter(matches::tournament_id.eq(id))).execute(conn)?;
    let assignment_count: usize =
        diesel::delete(assignments::table.filter(assignments::tournament_id.eq(id)))
            .execute(conn)?;
    let chat_count: usize =
        diesel::delete(chat_messages::table.filter(chat_messages::tournament_id.eq(id)))
            .execute(conn)?;
    let deleted: usize =
        diesel::delete(tournaments::table.filter(tournaments::tournament_id.eq(id)))
            .execute(conn)?;

    if deleted == 0 {
        return Err(not_found(tournament_id));
    }

    debug!(
        tournament_id = id,
        match_count, assignment_count, chat_count, "Deleted tournament rows"
    );
    Ok(())
}
