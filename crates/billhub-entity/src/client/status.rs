//! Soft-delete status of a record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle state derived from the `deleted_at` / `is_deleted` pair.
///
/// | status   | `deleted_at` | `is_deleted` |
/// |----------|--------------|--------------|
/// | active   | NULL         | any          |
/// | archived | set          | false        |
/// | deleted  | any          | true         |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordStatus {
    /// Visible in default listings.
    Active,
    /// Soft-deleted but restorable.
    Archived,
    /// Flagged as deleted.
    Deleted,
}

impl RecordStatus {
    /// Return the token used in status filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        }
    }

    /// Parse a comma separated status list, skipping names that are not statuses.
    pub fn parse_list(list: &str) -> Vec<RecordStatus> {
        let mut statuses = Vec::new();
        for status in list.split(',').filter_map(|s| s.parse::<RecordStatus>().ok()) {
            if !statuses.contains(&status) {
                statuses.push(status);
            }
        }
        statuses
    }

    /// Classify a row from its soft-delete columns.
    pub fn classify(deleted_at_set: bool, is_deleted: bool) -> Self {
        if is_deleted {
            Self::Deleted
        } else if deleted_at_set {
            Self::Archived
        } else {
            Self::Active
        }
    }
}

impl FromStr for RecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "archived" => Ok(Self::Archived),
            "deleted" => Ok(Self::Deleted),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
