//! Priority module - the three-value scale used by relational storage

use std::fmt;

/// Priority of an opportunity
///
/// Opportunities carry a free-form priority string; relational storage
/// narrows it to one of these three values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Priority {
    /// Can wait
    Low,

    /// Default for new opportunities
    #[default]
    Medium,

    /// Needs attention
    High,
}

impl Priority {
    /// Get the capitalized name
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    /// Parse a priority, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }

    /// Narrow a free-form priority to the three-value scale
    ///
    /// Unknown values become [`Priority::Medium`].
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect_domain::Priority;
    ///
    /// assert_eq!(Priority::normalize("HIGH"), Priority::High);
    /// assert_eq!(Priority::normalize("urgent"), Priority::Medium);
    /// ```
    pub fn normalize(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
