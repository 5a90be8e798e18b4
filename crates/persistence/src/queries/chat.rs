// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use matchday_domain::{ChatMessage, ChatMessageId, ParticipantId, TournamentId};

use crate::data_models::{ChatMessageRow, parse_timestamp};
use crate::diesel_schema::chat_messages;
use crate::error::PersistenceError;

/// Lists the chat records attached to a tournament in posting order.
///
/// # Errors
///
/// Returns an error if the query fails or a timestamp is malformed.
pub fn list_chat_messages(
    conn: &mut SqliteConnection,
    tournament_id: &TournamentId,
) -> Result<Vec<ChatMessage>, PersistenceError> {
    chat_messages::table
        .filter(chat_messages::tournament_id.eq(tournament_id.as_str()))
        .order(sql::<BigInt>("chat_messages.rowid"))
        .select(ChatMessageRow::as_select())
        .load::<ChatMessageRow>(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_chat_messages: {e}")))?
        .into_iter()
        .map(|row| {
            Ok(ChatMessage {
                id: ChatMessageId::new(&row.message_id),
                tournament_id: row.tournament_id.as_deref().map(TournamentId::new),
                author: ParticipantId::new(&row.author),
                body: row.body,
                posted_at: parse_timestamp(&row.posted_at)?,
            })
        })
        .collect()
}
