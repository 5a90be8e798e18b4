// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `tournaments` — Tournament rows, roster, draw pool and cascading delete
//! - `matches` — Fixture inserts, results and match deletes
//! - `assignments` — Draw results
//! - `chat` — Chat records
//! - `audit` — Audit event inserts
//! - `transition` — Applies a batch of store writes and its audit event in
//!   one transaction

pub mod assignments;
pub mod audit;
pub mod chat;
pub mod matches;
pub mod tournaments;
pub mod transition;

pub use transition::persist_transition;
