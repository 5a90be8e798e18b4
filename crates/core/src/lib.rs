// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

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

mod apply;
mod command;
mod engine;
mod error;
mod integrity;
mod memory;
mod state;
mod store;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, apply_create, apply_delete, apply_lottery, apply_purge};
pub use command::Command;
pub use engine::Engine;
pub use error::CoreError;
pub use integrity::{CascadeReport, OrphanReport, scan_orphans};
pub use memory::InMemoryStore;
pub use state::{CatalogResult, TournamentCatalog, TournamentState, TransitionResult};
pub use store::{StoreError, StoreWrite, TournamentStore};
