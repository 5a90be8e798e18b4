// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant display names loaded at startup.
//!
//! The directory is a JSON object mapping participant identifiers to display
//! names, e.g. `{"alice": "Alice Smith"}`. Participants missing from it are
//! shown under the standings placeholder name.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use matchday_domain::ParticipantId;
use thiserror::Error;

/// Display names keyed by participant.
pub type ParticipantNames = HashMap<ParticipantId, String>;

/// Participant directory loading errors.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The file could not be read.
    #[error("Failed to read participant directory {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a JSON object of strings.
    #[error("Participant directory is not a JSON object of names: {0}")]
    Parse(#[from] serde_json::Error),

    /// An entry has an empty identifier or name.
    #[error("Participant directory entry '{participant_id}' has a blank identifier or name")]
    BlankEntry { participant_id: String },
}

/// Parses a directory from its JSON text.
///
/// # Errors
///
/// Returns an error if the text is not a JSON object of strings, or any
/// identifier or name is blank.
pub fn parse_directory(json: &str) -> Result<ParticipantNames, DirectoryError> {
    let raw: BTreeMap<String, String> = serde_json::from_str(json)?;

    raw.into_iter()
        .map(|(participant_id, name)| {
            let id: &str = participant_id.trim();
            let display_name: &str = name.trim();
            if id.is_empty() || display_name.is_empty() {
                return Err(DirectoryError::BlankEntry {
                    participant_id: participant_id.clone(),
                });
            }
            Ok((ParticipantId::new(id), display_name.to_string()))
        })
        .collect()
}

/// Loads a directory file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_directory(path: &Path) -> Result<ParticipantNames, DirectoryError> {
    let json: String = std::fs::read_to_string(path).map_err(|source| DirectoryError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_directory(&json)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_directory_trims_entries() {
        let names: ParticipantNames =
            parse_directory(r#"{"alice": " Alice Smith ", "bob": "Bob"}"#).unwrap();

        assert_eq!(names.len(), 2);
        assert_eq!(
            names.get(&ParticipantId::new("alice")),
            Some(&String::from("Alice Smith"))
        );
    }

    #[test]
    fn test_parse_directory_rejects_blank_name() {
        let err: DirectoryError = parse_directory(r#"{"alice": "  "}"#).unwrap_err();
        assert!(matches!(err, DirectoryError::BlankEntry { ref participant_id } if participant_id == "alice"));
    }

    #[test]
    fn test_parse_directory_rejects_non_object() {
        let err: DirectoryError = parse_directory(r#"["alice"]"#).unwrap_err();
        assert!(matches!(err, DirectoryError::Parse(_)));
    }

    #[test]
    fn test_load_directory_missing_file() {
        let err: DirectoryError =
            load_directory(Path::new("/nonexistent/matchday/directory.json")).unwrap_err();
        assert!(matches!(err, DirectoryError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/matchday/directory.json"));
    }
}
