//! Opportunity module - one keyword hit in a transcript, tracked as a business item

use crate::recording::RecordingId;
use std::fmt;

/// Unique identifier for an opportunity based on UUIDv7
///
/// Generated fresh for every emitted opportunity, so two extraction runs in
/// the same second for the same keyword never collide. The time-ordered
/// layout keeps freshly extracted batches sortable by creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpportunityId(u128);

impl OpportunityId {
    /// Generate a new UUIDv7-based OpportunityId
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect_domain::OpportunityId;
    ///
    /// let id = OpportunityId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create an OpportunityId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse an OpportunityId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect_domain::OpportunityId;
    ///
    /// let id = OpportunityId::new();
    /// let parsed = OpportunityId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid opportunity id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for OpportunityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OpportunityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

/// Status assigned to every freshly extracted opportunity
pub const INITIAL_STATUS: &str = "new";

/// Priority assigned to every freshly extracted opportunity
pub const DEFAULT_PRIORITY: &str = "Medium";

/// A detected keyword occurrence with its surrounding context
///
/// Created only by an extraction run. After that it belongs to persistence
/// and changes only through an [`OpportunityUpdate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Opportunity {
    /// Unique identifier
    pub id: OpportunityId,

    /// Human-readable `"{created_at}_{keyword}_{occurrence}"` tag for debugging
    pub label: String,

    /// Parent recording, set once the opportunity is attached to one
    pub recording_id: Option<RecordingId>,

    /// Originating keyword with its original casing
    pub keyword: String,

    /// 1-based ordinal among matches of the same keyword
    pub occurrence: usize,

    /// Lowercased tokens preceding the match, space-joined
    pub context_before: String,

    /// Lowercased tokens following the match, space-joined
    pub context_after: String,

    /// `context_before **keyword** context_after`
    pub full_context: String,

    /// Lifecycle tag (see [`crate::Status`])
    pub status: String,

    /// Free-form priority (see [`crate::Priority`])
    pub priority: String,

    /// User notes
    pub notes: String,

    /// Unix seconds at emission
    pub created_at: u64,
}

impl Opportunity {
    /// Create a fresh opportunity for one keyword match
    ///
    /// # Examples
    ///
    /// ```
    /// use prospect_domain::Opportunity;
    ///
    /// let opp = Opportunity::new("Budget", 1, "we need", "today", 1_700_000_000);
    /// assert_eq!(opp.full_context, "we need **Budget** today");
    /// assert_eq!(opp.label, "1700000000_Budget_1");
    /// assert_eq!(opp.status, "new");
    /// ```
    pub fn new(
        keyword: impl Into<String>,
        occurrence: usize,
        context_before: impl Into<String>,
        context_after: impl Into<String>,
        created_at: u64,
    ) -> Self {
        let keyword = keyword.into();
        let context_before = context_before.into();
        let context_after = context_after.into();
        let full_context = format_full_context(&context_before, &keyword, &context_after);

        Self {
            id: OpportunityId::new(),
            label: format!("{}_{}_{}", created_at, keyword, occurrence),
            recording_id: None,
            keyword,
            occurrence,
            context_before,
            context_after,
            full_context,
            status: INITIAL_STATUS.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            notes: String::new(),
            created_at,
        }
    }

    /// Attach this opportunity to a recording
    pub fn with_recording(mut self, recording_id: RecordingId) -> Self {
        self.recording_id = Some(recording_id);
        self
    }

    /// Apply the mutable fields of an update in place
    pub fn apply(&mut self, update: &OpportunityUpdate) {
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
        if let Some(priority) = &update.priority {
            self.priority = priority.clone();
        }
        if let Some(notes) = &update.notes {
            self.notes = notes.clone();
        }
    }

    /// Structural equality ignoring `id`, `label` and `created_at`
    pub fn same_content(&self, other: &Opportunity) -> bool {
        self.recording_id == other.recording_id
            && self.keyword == other.keyword
            && self.occurrence == other.occurrence
            && self.context_before == other.context_before
            && self.context_after == other.context_after
            && self.full_context == other.full_context
            && self.status == other.status
            && self.priority == other.priority
            && self.notes == other.notes
    }
}

/// Render the markdown-bold context line
pub fn format_full_context(context_before: &str, keyword: &str, context_after: &str) -> String {
    format!("{} **{}** {}", context_before, keyword, context_after)
}

/// Partial update of the user-editable fields
///
/// `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OpportunityUpdate {
    /// New status
    pub status: Option<String>,

    /// New priority
    pub priority: Option<String>,

    /// New notes
    pub notes: Option<String>,
}

impl OpportunityUpdate {
    /// True when the update changes nothing
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.notes.is_none()
    }
}
