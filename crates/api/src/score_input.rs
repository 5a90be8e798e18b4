// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Score input parsing.
//!
//! Clients submit scores as JSON numbers. This module turns a submitted
//! pair into two whole, non-negative goal counts before the engine sees it.

use matchday_domain::{DomainError, validate_raw_score};
use thiserror::Error;

use crate::request_response::SetResultRequest;

/// Score input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreInputError {
    /// One side of the scoreline was not submitted.
    #[error("Missing score for {field}")]
    Missing { field: &'static str },

    /// A submitted value is not a whole, non-negative number.
    #[error(transparent)]
    Rejected(#[from] DomainError),
}

/// Parses both sides of a submitted result.
///
/// # Arguments
///
/// * `request` - The submitted result
///
/// # Returns
///
/// The home and away goal counts.
///
/// # Errors
///
/// Returns a `ScoreInputError` if either side is missing, NaN, infinite,
/// fractional or negative.
pub fn parse_score_pair(request: &SetResultRequest) -> Result<(i64, i64), ScoreInputError> {
    let score_a: f64 = request
        .score_a
        .ok_or(ScoreInputError::Missing { field: "score_a" })?;
    let score_b: f64 = request
        .score_b
        .ok_or(ScoreInputError::Missing { field: "score_b" })?;

    Ok((
        validate_raw_score("score_a", score_a)?,
        validate_raw_score("score_b", score_b)?,
    ))
}
