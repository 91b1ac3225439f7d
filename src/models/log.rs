//! Reward execution log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A log entry as the backend returns it: the date is an RFC 3339 string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireLogEntry {
    pub date: String,
    pub content: String,
}

/// A parsed log entry. The date is `None` when the backend sent something
/// unparseable; the entry is kept so its content is not lost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    pub date: Option<DateTime<Utc>>,
    pub content: String,
}

impl LogEntry {
    /// Parse a wire entry's timestamp.
    pub fn from_wire(entry: WireLogEntry) -> Self {
        let date = DateTime::parse_from_rfc3339(&entry.date)
            .ok()
            .map(|d| d.with_timezone(&Utc));
        Self {
            date,
            content: entry.content,
        }
    }
}

/// Sort entries newest-first; undated entries sink to the end.
pub fn sort_newest_first(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_wire_parses_rfc3339() {
        let entry = LogEntry::from_wire(WireLogEntry {
            date: "2024-03-01T12:30:00Z".to_string(),
            content: "timeout executed".to_string(),
        });

        assert!(entry.date.is_some());
        assert_eq!(entry.content, "timeout executed");
    }

    #[test]
    fn test_from_wire_keeps_unparseable_entry() {
        let entry = LogEntry::from_wire(WireLogEntry {
            date: "yesterday".to_string(),
            content: "kept".to_string(),
        });

        assert_eq!(entry.date, None);
        assert_eq!(entry.content, "kept");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut entries = vec![
            LogEntry::from_wire(WireLogEntry {
                date: "2024-03-01T10:00:00Z".to_string(),
                content: "old".to_string(),
            }),
            LogEntry::from_wire(WireLogEntry {
                date: "bogus".to_string(),
                content: "undated".to_string(),
            }),
            LogEntry::from_wire(WireLogEntry {
                date: "2024-03-02T10:00:00Z".to_string(),
                content: "new".to_string(),
            }),
        ];

        sort_newest_first(&mut entries);

        assert_eq!(entries[0].content, "new");
        assert_eq!(entries[1].content, "old");
        assert_eq!(entries[2].content, "undated");
    }
}
