// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use matchday_domain::{MatchId, ParticipantId, Scoreline, TeamId};

/// A command represents caller intent against one tournament, as data only.
///
/// Commands are the only way to request tournament state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the roster.
    SetRoster {
        /// Participants in roster order.
        participants: Vec<ParticipantId>,
    },
    /// Replace the draw pool.
    SetDrawPool {
        /// Teams eligible for the lottery.
        teams: Vec<TeamId>,
    },
    /// Generate the double round-robin schedule and activate the tournament.
    GenerateFixtures,
    /// Record or overwrite a match result.
    SetResult {
        /// The match.
        match_id: MatchId,
        /// The validated scores.
        score: Scoreline,
    },
    /// Move a recorded match back to scheduled.
    UndoResult {
        /// The match.
        match_id: MatchId,
    },
    /// Close a fully played tournament.
    FinishTournament,
    /// Delete fixtures and assignments and return to upcoming.
    ResetTournament,
    /// Attach a chat record to the tournament.
    RecordChatMessage {
        /// Who posted it.
        author: ParticipantId,
        /// Message text.
        body: String,
    },
}
