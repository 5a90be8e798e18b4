// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Assignment queries.
//!
//! Assignments have no position column; `rowid` keeps them in the order
//! they were written, which is roster order for a lottery.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use matchday_domain::{Assignment, AssignmentId, ParticipantId, TeamId, TournamentId};

use crate::data_models::AssignmentRow;
use crate::diesel_schema::assignments;
use crate::error::PersistenceError;

/// Lists a tournament's assignments in the order they were drawn.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assignments(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
) -> Result<Vec<Assignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .filter(assignments::tournament_id.eq(tournament_id.as_str()))
        .order(sql::<BigInt>("assignments.rowid"))
        .select(AssignmentRow::as_select())
        .load::<AssignmentRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_assignments: {e}")))?;

    Ok(rows.into_iter().map(assignment_from_row).collect())
}

/// Lists every assignment, including those whose tournament is gone.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_all_assignments(
    conn: &mut SqliteConnection,
) -> Result<Vec<Assignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = assignments::table
        .order(sql::<BigInt>("assignments.rowid"))
        .select(AssignmentRow::as_select())
        .load::<AssignmentRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_all_assignments: {e}")))?;

    Ok(rows.into_iter().map(assignment_from_row).collect())
}

fn assignment_from_row(row: AssignmentRow) -> Assignment {
    Assignment {
        id: AssignmentId::new(&row.assignment_id),
        tournament_id: TournamentId::new(&row.tournament_id),
        participant_id: ParticipantId::new(&row.participant_id),
        team_id: TeamId::new(&row.team_id),
    }
}
