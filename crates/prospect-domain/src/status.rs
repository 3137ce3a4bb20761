//! Status module - lifecycle tags for opportunities

use std::fmt;

/// Lifecycle status of an opportunity
///
/// The known values cover the usual review flow. Anything else is kept
/// verbatim in [`Status::Other`]; the set is not enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Status {
    /// Freshly extracted
    New,

    /// Looked at by a user
    Reviewed,

    /// Being worked on
    InProgress,

    /// Closed without outcome
    Closed,

    /// Converted into business
    Won,

    /// Did not convert
    Lost,

    /// Any other tag
    Other(String),
}

impl Status {
    /// Get the status tag as stored
    pub fn as_str(&self) -> &str {
        match self {
            Status::New => "new",
            Status::Reviewed => "reviewed",
            Status::InProgress => "in_progress",
            Status::Closed => "closed",
            Status::Won => "won",
            Status::Lost => "lost",
            Status::Other(s) => s,
        }
    }

    /// Parse a status tag; unknown tags are preserved
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "new" => Status::New,
            "reviewed" => Status::Reviewed,
            "in_progress" | "in progress" => Status::InProgress,
            "closed" => Status::Closed,
            "won" => Status::Won,
            "lost" => Status::Lost,
            _ => Status::Other(s.trim().to_string()),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_roundtrip() {
        for status in [
            Status::New,
            Status::Reviewed,
            Status::InProgress,
            Status::Closed,
            Status::Won,
            Status::Lost,
        ] {
            assert_eq!(Status::parse(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let status = Status::parse("Escalated");
        assert_eq!(status, Status::Other("Escalated".to_string()));
        assert_eq!(status.as_str(), "Escalated");
    }
}
