// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the Matchday tournament engine.
//!
//! [`Persistence`] implements [`matchday::TournamentStore`] on top of Diesel.
//! Every batch of writes is applied inside one transaction together with
//! its audit event, so a failed write leaves the database untouched.
//!
//! ## Schema
//!
//! - `tournaments` with ordered `tournament_roster` and `tournament_draw_pool`
//!   rows that cascade on delete
//! - `matches`, ordered by matchday and generation ordinal
//! - `assignments`, unique per participant and per team within a tournament
//! - `chat_messages`
//! - `audit_events`, with actor, cause, action and snapshots stored as JSON
//!
//! Matches and assignments carry the tournament id without a foreign key.
//! Rows whose tournament is gone are reported and purged by the engine's
//! integrity maintenance.
//!
//! ## Testing Philosophy
//!
//! - Tests run against shared in-memory databases, one per test
//! - File-backed databases enable WAL mode

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use matchday::{StoreError, StoreWrite, TournamentStore};
use matchday_audit::AuditEvent;
use matchday_domain::{Assignment, ChatMessage, Match, MatchId, Tournament, TournamentId};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives its own database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Type alias naming the backend explicitly.
pub type SqlitePersistence = Persistence;

/// Diesel-backed tournament store.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory `SQLite` database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a file-based `SQLite` database.
    ///
    /// The file is created if missing and migrated to the current schema.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }
}

impl TournamentStore for Persistence {
    fn list_tournaments(&mut self) -> Result<Vec<Tournament>, StoreError> {
        Ok(queries::list_tournaments(&mut self.conn)?)
    }

    fn get_tournament(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Option<Tournament>, StoreError> {
        Ok(queries::get_tournament(&mut self.conn, tournament_id)?)
    }

    fn list_matches(&mut self, tournament_id: &TournamentId) -> Result<Vec<Match>, StoreError> {
        Ok(queries::list_matches(&mut self.conn, tournament_id)?)
    }

    fn get_match(&mut self, match_id: &MatchId) -> Result<Option<Match>, StoreError> {
        Ok(queries::get_match(&mut self.conn, match_id)?)
    }

    fn list_assignments(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<Assignment>, StoreError> {
        Ok(queries::list_assignments(&mut self.conn, tournament_id)?)
    }

    fn list_all_matches(&mut self) -> Result<Vec<Match>, StoreError> {
        Ok(queries::list_all_matches(&mut self.conn)?)
    }

    fn list_all_assignments(&mut self) -> Result<Vec<Assignment>, StoreError> {
        Ok(queries::list_all_assignments(&mut self.conn)?)
    }

    fn list_chat_messages(
        &mut self,
        tournament_id: &TournamentId,
    ) -> Result<Vec<ChatMessage>, StoreError> {
        Ok(queries::list_chat_messages(&mut self.conn, tournament_id)?)
    }

    fn list_audit_events(
        &mut self,
        tournament_id: Option<&TournamentId>,
    ) -> Result<Vec<AuditEvent>, StoreError> {
        Ok(queries::list_audit_events(&mut self.conn, tournament_id)?)
    }

    fn persist_transition(
        &mut self,
        writes: &[StoreWrite],
        audit_event: &AuditEvent,
    ) -> Result<i64, StoreError> {
        Ok(mutations::persist_transition(
            &mut self.conn,
            writes,
            audit_event,
        )?)
    }
}
