// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, ErrorKind, TournamentStatus};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InsufficientPool {
        required: 4,
        available: 1,
    };
    assert_eq!(
        format!("{err}"),
        "Draw pool has 1 team(s) but 4 are required (short by 3)"
    );

    let err: DomainError = DomainError::TournamentNotFound(String::from("t-1"));
    assert_eq!(format!("{err}"), "Tournament 't-1' not found");

    let err: DomainError = DomainError::DrawRequired {
        tournament_id: String::from("t-1"),
        missing: vec![String::from("alice"), String::from("bob")],
    };
    assert_eq!(
        format!("{err}"),
        "Tournament t-1 requires a draw before fixtures; unassigned: alice, bob"
    );

    let err: DomainError = DomainError::InvalidStatusTransition {
        from: TournamentStatus::Finished,
        to: TournamentStatus::Active,
    };
    assert_eq!(format!("{err}"), "Cannot move tournament from finished to active");
}

#[test]
fn test_error_kinds() {
    assert_eq!(DomainError::EmptyRoster.kind(), ErrorKind::Validation);
    assert_eq!(
        DomainError::InvalidScore {
            field: String::from("score_a"),
            reason: String::from("negative"),
        }
        .kind(),
        ErrorKind::Validation
    );
    assert_eq!(
        DomainError::InsufficientPool {
            required: 2,
            available: 1
        }
        .kind(),
        ErrorKind::Precondition
    );
    assert_eq!(
        DomainError::DrawRequired {
            tournament_id: String::from("t"),
            missing: Vec::new(),
        }
        .kind(),
        ErrorKind::Precondition
    );
    assert_eq!(
        DomainError::MatchNotFound(String::from("m")).kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        DomainError::TournamentLocked {
            tournament_id: String::from("t")
        }
        .kind(),
        ErrorKind::Locked
    );
    assert_eq!(
        DomainError::InconsistentMatch {
            match_id: String::from("m"),
            reason: String::from("broken"),
        }
        .kind(),
        ErrorKind::Internal
    );
}

#[test]
fn test_error_kind_strings() {
    assert_eq!(ErrorKind::Validation.as_str(), "validation");
    assert_eq!(ErrorKind::Precondition.as_str(), "precondition");
    assert_eq!(ErrorKind::NotFound.as_str(), "not_found");
    assert_eq!(ErrorKind::Locked.as_str(), "locked");
    assert_eq!(ErrorKind::Internal.as_str(), "internal");
}
