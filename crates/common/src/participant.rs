use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Errors raised while collecting participants from disk
#[derive(Debug, thiserror::Error)]
pub enum ParticipantError {
    #[error("cannot read participant directory {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("participant entry in {dir} is not valid UTF-8: {name:?}")]
    InvalidName { dir: PathBuf, name: String },
}

/// A participant handle, unique within a draw.
///
/// The handle doubles as the name of the participant's key file inside the
/// input directory and as the name of their entry in the output archive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Participant {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Participant {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// List every entry of `dir` as a participant, sorted by name.
///
/// Files and subdirectories are treated alike, so anything else sitting in the
/// directory (a stray `.DS_Store`, a `.pub` file) becomes a participant too.
pub fn read_participants(dir: &Path) -> Result<Vec<Participant>, ParticipantError> {
    let unreadable = |source| ParticipantError::Unreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut participants = Vec::new();
    for entry in fs::read_dir(dir).map_err(unreadable)? {
        let entry = entry.map_err(unreadable)?;
        let name = entry
            .file_name()
            .into_string()
            .map_err(|raw| ParticipantError::InvalidName {
                dir: dir.to_path_buf(),
                name: raw.to_string_lossy().into_owned(),
            })?;
        participants.push(Participant(name));
    }
    participants.sort();

    tracing::debug!(
        dir = %dir.display(),
        count = participants.len(),
        "read participants"
    );
    Ok(participants)
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_participants_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["dave", "alice", "carol", "bob"] {
            fs::write(dir.path().join(name), b"key").unwrap();
        }

        let participants = read_participants(dir.path()).unwrap();
        let names: Vec<&str> = participants.iter().map(Participant::as_str).collect();
        assert_eq!(names, vec!["alice", "bob", "carol", "dave"]);
    }

    #[test]
    fn test_read_participants_counts_directories() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("alice"), b"key").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();

        let participants = read_participants(dir.path()).unwrap();
        assert_eq!(participants.len(), 2);
        assert!(participants.contains(&Participant::from("nested")));
    }

    #[test]
    fn test_read_participants_missing_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let result = read_participants(&missing);
        assert!(matches!(result, Err(ParticipantError::Unreadable { .. })));
    }

    #[test]
    fn test_read_participants_empty_dir() {
        let dir = TempDir::new().unwrap();
        assert!(read_participants(dir.path()).unwrap().is_empty());
    }
}
