// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use crate::SqlitePersistence;
use crate::error::PersistenceError;
use crate::tests::create_seeded_persistence;
use matchday::TournamentStore;
use matchday_domain::{Tournament, TournamentFormat};

#[test]
fn test_persistence_initialization() {
    let result: Result<SqlitePersistence, PersistenceError> = SqlitePersistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_enforced() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();
    assert_eq!(persistence.verify_foreign_key_enforcement(), Ok(()));
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let (mut db1, _): (SqlitePersistence, Tournament) =
        create_seeded_persistence(TournamentFormat::Lottery);
    let mut db2: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    assert_eq!(db1.list_tournaments().unwrap().len(), 1);
    assert!(db2.list_tournaments().unwrap().is_empty());
}

#[test]
fn test_migrations_applied_on_initialization() {
    let mut persistence: SqlitePersistence = SqlitePersistence::new_in_memory().unwrap();

    assert!(persistence.list_all_matches().is_ok());
    assert!(persistence.list_all_assignments().is_ok());
    assert!(persistence.list_audit_events(None).is_ok());
}

#[test]
fn test_file_database_survives_reopen() {
    let path: std::path::PathBuf = std::env::temp_dir().join(format!(
        "matchday-persistence-{}.db",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);

    let tournament_id = {
        let mut first: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
        let tournament: Tournament = Tournament::new("Durable Cup", TournamentFormat::UsersOnly);
        first
            .persist_transition(
                &[matchday::StoreWrite::CreateTournament(tournament.clone())],
                &crate::tests::create_test_event("CreateTournament", Some(&tournament.id)),
            )
            .unwrap();
        tournament.id
    };

    let mut reopened: SqlitePersistence = SqlitePersistence::new_with_file(&path).unwrap();
    let loaded: Option<Tournament> = reopened.get_tournament(&tournament_id).unwrap();
    assert_eq!(loaded.map(|t| t.name), Some(String::from("Durable Cup")));

    drop(reopened);
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}
