// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use matchday_domain::ChatMessage;

use crate::data_models::{ChatMessageRow, format_timestamp};
use crate::diesel_schema::chat_messages;
use crate::error::PersistenceError;

/// Inserts a chat record.
///
/// # Errors
///
/// Returns `Conflict` if the message identifier is taken.
pub fn insert_chat_message(
    conn: &mut SqliteConnection,
    message: &ChatMessage,
) -> Result<(), PersistenceError> {
    let row: ChatMessageRow = ChatMessageRow {
        message_id: message.id.as_str().to_string(),
        tournament_id: message
            .tournament_id
            .as_ref()
            .map(|t| t.as_str().to_string()),
        author: message.author.as_str().to_string(),
        body: message.body.clone(),
        posted_at: format_timestamp(message.posted_at)?,
    };

    diesel::insert_into(chat_messages::table)
        .values(&row)
        .execute(conn)?;
    Ok(())
}
