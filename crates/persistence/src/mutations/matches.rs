// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use matchday_domain::{Match, MatchId, Scoreline, TournamentId};

use crate::data_models::{MatchRow, to_column};
use crate::diesel_schema::matches;
use crate::error::PersistenceError;

fn not_found(match_id: &MatchId) -> PersistenceError {
    PersistenceError::NotFound {
        entity: "match",
        id: match_id.as_str().to_string(),
    }
}

/// Inserts matches, keeping their order within each matchday.
///
/// # Errors
///
/// Returns `Conflict` if a match identifier is taken.
pub fn insert_matches(conn: &mut SqliteConnection, batch: &[Match]) -> Result<(), PersistenceError> {
    if batch.is_empty() {
        return Ok(());
    }

    let rows: Vec<MatchRow> = batch
        .iter()
        .enumerate()
        .map(|(ordinal, m)| -> Result<MatchRow, PersistenceError> {
            let (score_a, score_b): (Option<i32>, Option<i32>) = match m.score {
                Some(score) => (
                    Some(to_column("score_a", score.a)?),
                    Some(to_column("score_b", score.b)?),
                ),
                None => (None, None),
            };
            Ok(MatchRow {
                match_id: m.id.as_str().to_string(),
                tournament_id: m.tournament_id.as_str().to_string(),
                ordinal: to_column("ordinal", ordinal)?,
                matchday: to_column("matchday", m.matchday)?,
                player_a: m.player_a.as_str().to_string(),
                player_b: m.player_b.as_str().to_string(),
                team_a: m.team_a.as_ref().map(|t| t.as_str().to_string()),
                team_b: m.team_b.as_ref().map(|t| t.as_str().to_string()),
                score_a,
                score_b,
                completed: i32::from(m.completed),
            })
        })
        .collect::<Result<Vec<MatchRow>, PersistenceError>>()?;

    diesel::insert_into(matches::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

/// Records scores and marks a match completed.
///
/// # Errors
///
/// Returns `NotFound` if the match does not exist.
pub fn set_match_result(
    conn: &mut SqliteConnection,
    match_id: &MatchId,
    score: Scoreline,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(matches::table.filter(matches::match_id.eq(match_id.as_str())))
            .set((
                matches::score_a.eq(Some(to_column("score_a", score.a)?)),
                matches::score_b.eq(Some(to_column("score_b", score.b)?)),
                matches::completed.eq(1),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(not_found(match_id));
    }
    Ok(())
}

/// Marks a match scheduled again. Scores are kept.
///
/// # Errors
///
/// Returns `NotFound` if the match does not exist.
pub fn clear_match_result(
    conn: &mut SqliteConnection,
    match_id: &MatchId,
) -> Result<(), PersistenceError> {
    let updated: usize =
        diesel::update(matches::table.filter(matches::match_id.eq(match_id.as_str())))
            .set(matches::completed.eq(0))
            .execute(conn)?;

    if updated == 0 {
        return Err(not_found(match_id));
    }
    Ok(())
}

/// Deletes every match of a tournament.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_matches_for_tournament(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
) -> Result<usize, PersistenceError> {
    Ok(
        diesel::delete(matches::table.filter(matches::tournament_id.eq(tournament_id.as_str())))
            .execute(conn)?,
    )
}

/// Deletes matches by identifier. Unknown identifiers are ignored.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_matches(
    conn: &mut SqliteConnection,
    match_ids: &[MatchId],
) -> Result<usize, PersistenceError> {
    let ids: Vec<&str> = match_ids.iter().map(MatchId::as_str).collect();
    Ok(diesel::delete(matches::table.filter(matches::match_id.eq_any(ids))).execute(conn)?)
}
