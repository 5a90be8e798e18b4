// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Applies a batch of store writes and its audit event atomically.

use diesel::{Connection, SqliteConnection};
use matchday::StoreWrite;
use matchday_audit::AuditEvent;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::mutations::{assignments, audit, chat, matches, tournaments};

/// Persists a transition: every write, then the audit event.
///
/// Runs inside one transaction. If any write fails, nothing is kept,
/// including the audit event.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `writes` - The mutations, applied in order
/// * `event` - The audit event recording them
///
/// # Returns
///
/// The event ID assigned to the persisted audit event.
///
/// # Errors
///
/// Returns `NotFound` or `Conflict` if a write is rejected, or a database
/// error.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    writes: &[StoreWrite],
    event: &AuditEvent,
) -> Result<i64, PersistenceError> {
    let event_id: i64 = conn.transaction::<i64, PersistenceError, _>(|tx| {
        for write in writes {
            apply_write(tx, write)?;
            debug!(write = write.name(), "Applied write");
        }
        audit::persist_audit_event(tx, event)
    })?;

    info!(
        event_id,
        action = %event.action.name,
        writes = writes.len(),
        "Persisted transition"
    );

    Ok(event_id)
}

fn apply_write(tx: &mut SqliteConnection, write: &StoreWrite) -> Result<(), PersistenceError> {
    match write {
        StoreWrite::CreateTournament(tournament) => tournaments::insert_tournament(tx, tournament),
        StoreWrite::SetStatus {
            tournament_id,
            status,
        } => tournaments::set_status(tx, tournament_id, *status),
        StoreWrite::SetRoster {
            tournament_id,
            participants,
        } => tournaments::replace_roster(tx, tournament_id, participants),
        StoreWrite::SetDrawPool {
            tournament_id,
            teams,
        } => tournaments::replace_draw_pool(tx, tournament_id, teams),
        StoreWrite::ReplaceAssignments {
            tournament_id,
            assignments: batch,
        } => assignments::replace_assignments(tx, tournament_id, batch),
        StoreWrite::InsertMatches(batch) => matches::insert_matches(tx, batch),
        StoreWrite::SetMatchResult { match_id, score } => {
            matches::set_match_result(tx, match_id, *score)
        }
        StoreWrite::ClearMatchResult { match_id } => matches::clear_match_result(tx, match_id),
        StoreWrite::DeleteMatchesForTournament { tournament_id } => {
            matches::delete_matches_for_tournament(tx, tournament_id).map(|_| ())
        }
        StoreWrite::DeleteTournament { tournament_id } => {
            tournaments::delete_tournament(tx, tournament_id)
        }
        StoreWrite::DeleteMatches(match_ids) => matches::delete_matches(tx, match_ids).map(|_| ()),
        StoreWrite::DeleteAssignments(assignment_ids) => {
            assignments::delete_assignments(tx, assignment_ids).map(|_| ())
        }
        StoreWrite::PostChatMessage(message) => chat::insert_chat_message(tx, message),
    }
}
