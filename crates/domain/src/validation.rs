// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{ParticipantId, TeamId};
use std::collections::HashSet;

/// Participant identifier reserved for the scheduling placeholder.
pub const RESERVED_BYE_IDENTIFIER: &str = "bye";

/// Smallest roster that can be scheduled.
pub const MIN_ROSTER_SIZE: usize = 2;

/// Largest roster that can be scheduled.
pub const MAX_ROSTER_SIZE: usize = 512;

/// Largest goal count accepted for one side of a result.
///
/// Must fit the signed 32-bit score columns of every store.
pub const MAX_SCORE: u32 = 9_999;

/// Validates a tournament display name.
///
/// # Errors
///
/// Returns an error if the name is empty after trimming.
pub fn validate_tournament_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidTournamentName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates a single participant identifier.
///
/// # Errors
///
/// Returns an error if:
/// - The identifier is empty or surrounded by whitespace
/// - The identifier is the reserved placeholder `bye` (any case)
pub fn validate_participant_id(participant_id: &ParticipantId) -> Result<(), DomainError> {
    validate_identifier("participant", participant_id.as_str())?;
    if participant_id
        .as_str()
        .eq_ignore_ascii_case(RESERVED_BYE_IDENTIFIER)
    {
        return Err(DomainError::ReservedIdentifier(
            participant_id.as_str().to_string(),
        ));
    }
    Ok(())
}

/// Validates a roster: well-formed identifiers, no duplicates.
///
/// An empty roster is accepted here; size requirements are enforced when
/// fixtures are generated.
///
/// # Errors
///
/// Returns an error if any identifier is invalid or repeated.
pub fn validate_roster(roster: &[ParticipantId]) -> Result<(), DomainError> {
    let mut seen: HashSet<&ParticipantId> = HashSet::with_capacity(roster.len());
    for participant_id in roster {
        validate_participant_id(participant_id)?;
        if !seen.insert(participant_id) {
            return Err(DomainError::DuplicateParticipant(
                participant_id.as_str().to_string(),
            ));
        }
    }
    Ok(())
}

/// Validates a draw pool: well-formed identifiers, no duplicates.
///
/// # Errors
///
/// Returns an error if any identifier is invalid or repeated.
pub fn validate_draw_pool(pool: &[TeamId]) -> Result<(), DomainError> {
    let mut seen: HashSet<&TeamId> = HashSet::with_capacity(pool.len());
    for team_id in pool {
        validate_identifier("team", team_id.as_str())?;
        if !seen.insert(team_id) {
            return Err(DomainError::DuplicateTeam(team_id.as_str().to_string()));
        }
    }
    Ok(())
}

/// Validates that a roster is large enough to schedule.
///
/// # Errors
///
/// Returns `EmptyRoster` for an empty roster, `RosterTooSmall` below two
/// participants and `RosterTooLarge` above `MAX_ROSTER_SIZE`.
pub const fn validate_roster_size(roster_len: usize) -> Result<(), DomainError> {
    if roster_len == 0 {
        return Err(DomainError::EmptyRoster);
    }
    if roster_len < MIN_ROSTER_SIZE {
        return Err(DomainError::RosterTooSmall {
            required: MIN_ROSTER_SIZE,
            actual: roster_len,
        });
    }
    validate_roster_capacity(roster_len)
}

/// Validates that a roster does not exceed `MAX_ROSTER_SIZE`.
///
/// # Errors
///
/// Returns `RosterTooLarge` above `MAX_ROSTER_SIZE`.
pub const fn validate_roster_capacity(roster_len: usize) -> Result<(), DomainError> {
    if roster_len > MAX_ROSTER_SIZE {
        return Err(DomainError::RosterTooLarge {
            max: MAX_ROSTER_SIZE,
            actual: roster_len,
        });
    }
    Ok(())
}

/// Validates an integer score.
///
/// # Arguments
///
/// * `field` - Which side the score belongs to, for the error message
/// * `value` - The submitted score
///
/// # Errors
///
/// Returns an error if the score is negative or above `MAX_SCORE`.
pub fn validate_score(field: &str, value: i64) -> Result<u32, DomainError> {
    if value < 0 {
        return Err(DomainError::InvalidScore {
            field: field.to_string(),
            reason: format!("must not be negative, got {value}"),
        });
    }
    u32::try_from(value)
        .ok()
        .filter(|score| *score <= MAX_SCORE)
        .ok_or_else(|| DomainError::InvalidScore {
            field: field.to_string(),
            reason: format!("{value} exceeds the maximum of {MAX_SCORE}"),
        })
}

/// Validates a raw numeric score as submitted by a client.
///
/// Clients submit JSON numbers, which may be fractional. This rejects
/// NaN, infinities and fractional values before the integer checks.
///
/// # Errors
///
/// Returns an error if the value is not a finite, whole, non-negative number.
#[allow(clippy::cast_possible_truncation)]
pub fn validate_raw_score(field: &str, value: f64) -> Result<i64, DomainError> {
    if value.is_nan() {
        return Err(DomainError::InvalidScore {
            field: field.to_string(),
            reason: String::from("is not a number"),
        });
    }
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(DomainError::InvalidScore {
            field: field.to_string(),
            reason: format!("must be a whole number, got {value}"),
        });
    }
    if value < 0.0 {
        return Err(DomainError::InvalidScore {
            field: field.to_string(),
            reason: format!("must not be negative, got {value}"),
        });
    }
    if value > f64::from(MAX_SCORE) {
        return Err(DomainError::InvalidScore {
            field: field.to_string(),
            reason: format!("{value} exceeds the maximum of {MAX_SCORE}"),
        });
    }
    // Whole and within 0..=MAX_SCORE at this point
    Ok(value as i64)
}

fn validate_identifier(kind: &'static str, value: &str) -> Result<(), DomainError> {
    if value.is_empty() {
        return Err(DomainError::InvalidIdentifier {
            kind,
            reason: String::from("cannot be empty"),
        });
    }
    if value.trim() != value {
        return Err(DomainError::InvalidIdentifier {
            kind,
            reason: format!("'{value}' has leading or trailing whitespace"),
        });
    }
    Ok(())
}
