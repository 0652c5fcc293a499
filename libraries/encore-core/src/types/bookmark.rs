/// Bookmark model
use super::Timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted state as listed to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    /// Unique creation time (ms since epoch), the record key
    pub timestamp: Timestamp,

    /// User label, or the autosave sentinel
    pub title: String,

    /// Number of tracks saved with this record
    pub track_count: usize,

    /// Whether this is the rolling autosave record
    pub autosave: bool,
}

impl BookmarkRecord {
    /// Creation time as a UTC date
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_uses_milliseconds() {
        let record = BookmarkRecord {
            timestamp: 1_700_000_000_123,
            title: "evening".to_string(),
            track_count: 12,
            autosave: false,
        };

        let created = record.created_at().unwrap();
        assert_eq!(created.timestamp(), 1_700_000_000);
        assert_eq!(created.timestamp_subsec_millis(), 123);
    }
}
