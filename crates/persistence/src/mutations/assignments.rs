// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use matchday_domain::{Assignment, AssignmentId, TournamentId};

use crate::data_models::AssignmentRow;
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

/// Replaces every assignment of a tournament.
///
/// The tournament row is not required, matching the schema: assignments
/// carry no foreign key.
///
/// # Errors
///
/// Returns `Conflict` if a participant or team appears twice.
pub fn replace_assignments(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
    batch: &[Assignment],
) -> Result<(), PersistenceError> {
    diesel::delete(assignments::table.filter(assignments::tournament_id.eq(tournament_id.as_str())))
        .execute(conn)?;

    if batch.is_empty() {
        return Ok(());
    }

    let rows: Vec<AssignmentRow> = batch
        .iter()
        .map(|a| AssignmentRow {
            assignment_id: a.id.as_str().to_string(),
            tournament_id: a.tournament_id.as_str().to_string(),
            participant_id: a.participant_id.as_str().to_string(),
            team_id: a.team_id.as_str().to_string(),
        })
        .collect();

    diesel::insert_into(assignments::table)
        .values(&rows)
        .execute(conn)?;
    Ok(())
}

/// Deletes assignments by identifier. Unknown identifiers are ignored.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_assignments(
    conn: &mut SqliteConnection,
    assignment_ids: &[AssignmentId],
) -> Result<usize, PersistenceError> {
    let ids: Vec<&str> = assignment_ids.iter().map(AssignmentId::as_str).collect();
    Ok(
        diesel::delete(assignments::table.filter(assignments::assignment_id.eq_any(ids)))
            .execute(conn)?,
    )
}
