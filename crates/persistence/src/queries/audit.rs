// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use matchday_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use matchday_domain::TournamentId;

use crate::data_models::{ActionData, ActorData, AuditEventRow, CauseData, StateSnapshotData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Lists audit events in the order they were recorded.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `tournament_id` - Only this tournament's events, or every event when `None`
///
/// # Errors
///
/// Returns an error if the query fails or a JSON column cannot be decoded.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    tournament_id: Option<&TournamentId>,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let mut query = audit_events::table
        .select(AuditEventRow::as_select())
        .order(audit_events::event_id.asc())
        .into_boxed();
    if let Some(id) = tournament_id {
        query = query.filter(audit_events::tournament_id.eq(id.as_str()));
    }

    let rows: Vec<AuditEventRow> = query
        .load::<AuditEventRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_audit_events: {e}")))?;

    rows.into_iter().map(event_from_row).collect()
}

fn event_from_row(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    let event: AuditEvent = AuditEvent::new(
        row.tournament_id.as_deref().map(TournamentId::new),
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
    );

    Ok(event.with_event_id(row.event_id))
}
