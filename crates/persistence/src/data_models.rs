// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::diesel_schema::{assignments, audit_events, chat_messages, matches, tournaments};
use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// A row of the `tournaments` table, without roster or draw pool.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tournaments)]
pub struct TournamentRow {
    pub tournament_id: String,
    pub name: String,
    pub format: String,
    pub status: String,
    pub created_at: String,
}

/// A row of the `matches` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = matches)]
pub struct MatchRow {
    pub match_id: String,
    pub tournament_id: String,
    pub ordinal: i32,
    pub matchday: i32,
    pub player_a: String,
    pub player_b: String,
    pub team_a: Option<String>,
    pub team_b: Option<String>,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
    pub completed: i32,
}

/// A row of the `assignments` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = assignments)]
pub struct AssignmentRow {
    pub assignment_id: String,
    pub tournament_id: String,
    pub participant_id: String,
    pub team_id: String,
}

/// A row of the `chat_messages` table.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = chat_messages)]
pub struct ChatMessageRow {
    pub message_id: String,
    pub tournament_id: Option<String>,
    pub author: String,
    pub body: String,
    pub posted_at: String,
}

/// A row of the `audit_events` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub tournament_id: Option<String>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    #[allow(dead_code)]
    pub created_at: Option<String>,
}

/// Formats a timestamp for a `TEXT` column.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("timestamp: {e}")))
}

/// Parses a timestamp written by [`format_timestamp`].
///
/// # Errors
///
/// Returns an error if the text is not RFC 3339.
pub fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp '{value}': {e}")))
}

/// Narrows a count or score to an `INTEGER` column.
///
/// # Errors
///
/// Returns an error if the value does not fit.
pub fn to_column<T: ToPrimitive + std::fmt::Display + Copy>(
    field: &str,
    value: T,
) -> Result<i32, PersistenceError> {
    value
        .to_i32()
        .ok_or_else(|| PersistenceError::SerializationError(format!("{field} {value} out of range")))
}

/// Widens an `INTEGER` column back to an unsigned value.
///
/// # Errors
///
/// Returns an error if the stored value is negative.
pub fn from_column(field: &str, value: i32) -> Result<u32, PersistenceError> {
    value
        .to_u32()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("{field} {value} is negative")))
}
