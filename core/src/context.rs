//! IME context for presentation-layer communication.
//!
//! The `ImeContext` struct is a simple data container with public fields that
//! the presentation layer reads after every event to redraw its UI. No
//! callbacks, no traits; front-end code reads and writes fields directly.

use crate::candidate::Candidate;

/// Everything the presentation layer needs to render one frame.
///
/// # Fields
///
/// - `preedit_text`: the composing buffer as it should be displayed
/// - `commit_text`: text just selected, ready to hand to the host (consume
///   and clear)
/// - `candidates`: up to one page of suggestions with 1-based positions
/// - `has_next_page` / `has_previous_page`: gate the paging affordances
/// - `loading`: a query is in flight
/// - `error_text`: message of the last failed query, if any
/// - `auxiliary_text`: optional hint text (page indicator)
#[derive(Debug, Clone, Default)]
pub struct ImeContext {
    /// Composing text to display
    pub preedit_text: String,

    /// Selected text to hand to the host application
    pub commit_text: String,

    /// Current page of suggestions
    pub candidates: Vec<Candidate>,

    /// Whether a later page of suggestions exists
    pub has_next_page: bool,

    /// Whether an earlier page of suggestions exists
    pub has_previous_page: bool,

    /// Whether a query is in flight
    pub loading: bool,

    /// Message of the last failed query
    pub error_text: Option<String>,

    /// Auxiliary text for UI hints (page numbers)
    pub auxiliary_text: String,
}

impl ImeContext {
    /// Create a new empty IME context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all state except `commit_text` (the front-end should consume
    /// that first).
    pub fn clear(&mut self) {
        self.preedit_text.clear();
        self.candidates.clear();
        self.has_next_page = false;
        self.has_previous_page = false;
        self.loading = false;
        self.error_text = None;
        self.auxiliary_text.clear();
    }

    /// Take the commit text, leaving it empty.
    pub fn take_commit(&mut self) -> String {
        std::mem::take(&mut self.commit_text)
    }

    /// Check if there's text to commit.
    pub fn has_commit(&self) -> bool {
        !self.commit_text.is_empty()
    }

    /// Check if there's any visible state (preedit or candidates).
    pub fn has_visible_state(&self) -> bool {
        !self.preedit_text.is_empty() || !self.candidates.is_empty()
    }
}
