// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `tournaments` — Tournaments with their roster and draw pool
//! - `matches` — Fixtures and results
//! - `assignments` — Participant-to-team assignments
//! - `chat` — Chat records attached to tournaments
//! - `audit` — The audit trail

pub mod assignments;
pub mod audit;
pub mod chat;
pub mod matches;
pub mod tournaments;

pub use assignments::{list_all_assignments, list_assignments};
pub use audit::list_audit_events;
pub use chat::list_chat_messages;
pub use matches::{get_match, list_all_matches, list_matches};
pub use tournaments::{get_tournament, list_tournaments, tournament_exists};
