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
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary for the tournament engine.
//!
//! Transports hand plain request structs and a [`RequestContext`] to the
//! handlers here and get serializable responses or an [`ApiError`] back.

mod error;
mod handlers;
mod request_response;
mod score_input;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    create_tournament, delete_tournament, finish_tournament, generate_fixtures, get_audit_trail,
    get_standings, get_tournament_detail, list_matches, list_tournaments, match_to_info,
    purge_orphans, reset_tournament, run_lottery, scan_orphans, set_draw_pool, set_result,
    set_roster, tournament_to_info, undo_result,
};
pub use request_response::{
    AssignmentInfo, AuditEventInfo, AuditTrailResponse, CreateTournamentRequest,
    DeleteTournamentResponse, GenerateFixturesResponse, ListMatchesResponse,
    ListTournamentsResponse, MatchInfo, MatchResultResponse, MatchdayInfo, OrphanScanResponse,
    PurgeOrphansResponse, RequestContext, RunLotteryResponse, SetDrawPoolRequest,
    SetResultRequest, SetRosterRequest, StandingsResponse, TournamentDetailResponse,
    TournamentInfo, TournamentResponse,
};
pub use score_input::{ScoreInputError, parse_score_pair};
