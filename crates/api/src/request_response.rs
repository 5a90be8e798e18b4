// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use matchday_domain::{FixtureReadiness, MatchProgress, StandingRow};
use time::OffsetDateTime;

/// Who is making a write request, and why.
///
/// Every write carries one of these so the audit trail can attribute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// The operator performing the action.
    pub actor_id: String,
    /// Correlates the request with its audit event.
    pub cause_id: String,
    /// Free-text reason recorded in the audit trail.
    pub cause_description: String,
}

/// API request to create a tournament.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTournamentRequest {
    /// Display name.
    pub name: String,
    /// `lottery` or `users_only`.
    pub format: String,
}

/// API request to replace a tournament's roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetRosterRequest {
    /// Participant identifiers in roster order.
    pub participants: Vec<String>,
}

/// API request to replace a tournament's draw pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDrawPoolRequest {
    /// Team identifiers eligible for the draw.
    pub teams: Vec<String>,
}

/// API request to record a match result.
///
/// Scores are kept as submitted so that fractional, negative and
/// non-finite values can be rejected with a precise message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetResultRequest {
    /// Home goals.
    pub score_a: Option<f64>,
    /// Away goals.
    pub score_b: Option<f64>,
}

/// Tournament information for API responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TournamentInfo {
    /// The tournament identifier.
    pub tournament_id: String,
    /// Display name.
    pub name: String,
    /// `lottery` or `users_only`.
    pub format: String,
    /// `upcoming`, `active` or `finished`.
    pub status: String,
    /// Participants in roster order.
    pub roster: Vec<String>,
    /// Teams eligible for the draw.
    pub draw_pool: Vec<String>,
    /// When the tournament was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// API response for a tournament create, setup or lifecycle change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TournamentResponse {
    /// The tournament after the change.
    pub tournament: TournamentInfo,
    /// A success message.
    pub message: String,
}

/// API response listing every tournament.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTournamentsResponse {
    /// Tournaments, oldest first.
    pub tournaments: Vec<TournamentInfo>,
}

/// API response describing one tournament in full.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TournamentDetailResponse {
    /// The tournament.
    pub tournament: TournamentInfo,
    /// Result entry progress.
    pub progress: MatchProgress,
    /// Whether fixtures could be generated now.
    pub readiness: FixtureReadiness,
}

/// API response for a cascading tournament delete.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteTournamentResponse {
    /// The deleted tournament.
    pub tournament_id: String,
    /// Matches removed with it.
    pub matches_removed: usize,
    /// Assignments removed with it.
    pub assignments_removed: usize,
    /// Chat records removed with it.
    pub chat_messages_removed: usize,
    /// A success message.
    pub message: String,
}

/// One drawn participant/team pair.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignmentInfo {
    /// The participant.
    pub participant_id: String,
    /// The drawn team.
    pub team_id: String,
}

/// API response for a lottery draw.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunLotteryResponse {
    /// The tournament drawn for.
    pub tournament_id: String,
    /// The draw, in roster order.
    pub assignments: Vec<AssignmentInfo>,
    /// A success message.
    pub message: String,
}

/// API response for fixture generation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateFixturesResponse {
    /// The tournament scheduled.
    pub tournament_id: String,
    /// Matches created.
    pub match_count: usize,
    /// Matchdays spanned.
    pub matchday_count: u32,
    /// Status after generation.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// Match information for API responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchInfo {
    /// The match identifier.
    pub match_id: String,
    /// 1-based round number.
    pub matchday: u32,
    /// Home participant.
    pub player_a: String,
    /// Away participant.
    pub player_b: String,
    /// Home team, for lottery tournaments.
    pub team_a: Option<String>,
    /// Away team, for lottery tournaments.
    pub team_b: Option<String>,
    /// Last entered home goals.
    pub score_a: Option<u32>,
    /// Last entered away goals.
    pub score_b: Option<u32>,
    /// Whether the result counts.
    pub completed: bool,
}

/// The matches played on one matchday.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchdayInfo {
    /// 1-based round number.
    pub matchday: u32,
    /// Matches in generation order.
    pub matches: Vec<MatchInfo>,
}

/// API response listing a tournament's fixtures.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListMatchesResponse {
    /// The tournament.
    pub tournament_id: String,
    /// Fixtures grouped by matchday, ascending.
    pub matchdays: Vec<MatchdayInfo>,
}

/// API response for a result change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchResultResponse {
    /// The match after the change.
    pub match_info: MatchInfo,
    /// Tournament completion after the change.
    pub progress_percent: u8,
    /// A success message.
    pub message: String,
}

/// API response carrying a standings table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StandingsResponse {
    /// The tournament.
    pub tournament_id: String,
    /// Ranked rows, best first.
    pub rows: Vec<StandingRow>,
}

/// API response for an orphan scan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrphanScanResponse {
    /// Matches whose tournament no longer exists.
    pub match_ids: Vec<String>,
    /// Assignments whose tournament no longer exists.
    pub assignment_ids: Vec<String>,
    /// Total orphaned records.
    pub total: usize,
}

/// API response for an orphan purge.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PurgeOrphansResponse {
    /// Records removed.
    pub removed: usize,
    /// A success message.
    pub message: String,
}

/// An audit event for API responses.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// Store-assigned identifier.
    pub event_id: Option<i64>,
    /// The tournament concerned, if any.
    pub tournament_id: Option<String>,
    /// Who performed the action.
    pub actor_id: String,
    /// Actor classification.
    pub actor_type: String,
    /// Request correlation identifier.
    pub cause_id: String,
    /// Why the action was performed.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Action details, if any.
    pub details: Option<String>,
    /// Summary before the change.
    pub before: String,
    /// Summary after the change.
    pub after: String,
}

/// API response carrying an audit trail.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditTrailResponse {
    /// Events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
