//! Change type data model

use std::fmt;

use serde::{Serialize, Serializer};

/// Kind of change a diff entry represents
///
/// Mirrors git's diff status letters. `Renamed` never reaches the dataset:
/// renames are folded into `Modified` entries carrying both paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Added,
    Modified,
    Deleted,
    Renamed,
}

impl ChangeType {
    /// Map a raw git status (`A`, `M`, `T`, `D`, `R100`, ...) to a change type
    ///
    /// Returns `None` for statuses the extraction does not handle
    /// (copies, unmerged, unknown).
    pub fn from_status(status: &str) -> Option<Self> {
        let mut chars = status.chars();
        let letter = chars.next()?;
        let score = chars.as_str();

        match letter {
            'A' | 'D' | 'M' | 'T' if !score.is_empty() => None,
            'A' => Some(Self::Added),
            'D' => Some(Self::Deleted),
            // A type change (e.g. file to symlink) is a modification of the path
            'M' | 'T' => Some(Self::Modified),
            'R' if score.chars().all(|c| c.is_ascii_digit()) => Some(Self::Renamed),
            _ => None,
        }
    }

    /// Status letter written to the dataset
    pub fn code(&self) -> char {
        match self {
            Self::Added => 'A',
            Self::Modified => 'M',
            Self::Deleted => 'D',
            Self::Renamed => 'R',
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for ChangeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.code())
    }
}
