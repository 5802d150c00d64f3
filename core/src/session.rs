//! IME session state.
//!
//! The `ImeSession` struct combines the session components (input buffer,
//! candidate list, query status) into one place that persists across events.
//! The session knows nothing about the provider or the network; the engine
//! mutates it and syncs it out to an `ImeContext` for display.

use crate::candidate::CandidateList;
use crate::context::ImeContext;
use crate::input_buffer::InputBuffer;

/// Where the session is in the edit → query → response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputState {
    /// No query in flight; buffer may be empty or stable
    #[default]
    Idle,
    /// A debounced edit is waiting for its dispatch deadline
    Pending,
    /// A query was dispatched and its response is outstanding
    Awaiting,
}

/// Session state carried across buffer-change events.
#[derive(Debug, Clone)]
pub struct ImeSession {
    /// Current composing text (digits already stripped)
    input_buffer: InputBuffer,

    /// Decoded suggestions and paging position
    candidates: CandidateList,

    /// Edit/query/response cycle position
    state: InputState,

    /// A query is in flight
    loading: bool,

    /// Message of the last failed query
    error: Option<String>,

    /// A candidate has been picked this session; widens the debounce window
    has_selected: bool,
}

impl ImeSession {
    /// Create a new empty session with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(crate::candidate::DEFAULT_PAGE_SIZE)
    }

    /// Create a session with the specified candidate page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            input_buffer: InputBuffer::new(),
            candidates: CandidateList::with_page_size(page_size),
            state: InputState::Idle,
            loading: false,
            error: None,
            has_selected: false,
        }
    }

    pub fn input_buffer(&self) -> &InputBuffer {
        &self.input_buffer
    }

    pub fn input_buffer_mut(&mut self) -> &mut InputBuffer {
        &mut self.input_buffer
    }

    pub fn candidates(&self) -> &CandidateList {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut CandidateList {
        &mut self.candidates
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn set_state(&mut self, state: InputState) {
        self.state = state;
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.error = error;
    }

    pub fn has_selected(&self) -> bool {
        self.has_selected
    }

    pub fn set_has_selected(&mut self, selected: bool) {
        self.has_selected = selected;
    }

    /// Clear all session state.
    pub fn clear(&mut self) {
        self.input_buffer.clear();
        self.candidates.clear();
        self.state = InputState::Idle;
        self.loading = false;
        self.error = None;
        self.has_selected = false;
    }

    /// Sync session state to an `ImeContext` for the presentation layer.
    ///
    /// Leaves `commit_text` alone; the engine owns that field.
    pub fn sync_to_context(&self, context: &mut ImeContext) {
        context.preedit_text = self.input_buffer.text().to_string();
        context.candidates = self.candidates.current_page_candidates();

        let page = self.candidates.page_state();
        context.has_next_page = page.has_next;
        context.has_previous_page = page.has_previous;
        context.loading = self.loading;
        context.error_text = self.error.clone();

        context.auxiliary_text = if page.total_pages > 1 {
            format!("第{}頁/{}", page.current_page + 1, page.total_pages)
        } else {
            String::new()
        };
    }
}

impl Default for ImeSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_reports_page_facts() {
        let mut session = ImeSession::new();
        session.input_buffer_mut().set_text("nei");
        session
            .candidates_mut()
            .set_items((0..13).map(|i| format!("c{i}")).collect());

        let mut context = ImeContext::new();
        session.sync_to_context(&mut context);

        assert_eq!(context.preedit_text, "nei");
        assert_eq!(context.candidates.len(), 6);
        assert!(context.has_next_page);
        assert!(!context.has_previous_page);
        assert_eq!(context.auxiliary_text, "第1頁/3");
    }

    #[test]
    fn sync_leaves_commit_text_alone() {
        let session = ImeSession::new();
        let mut context = ImeContext::new();
        context.commit_text = "你".to_string();
        session.sync_to_context(&mut context);
        assert_eq!(context.commit_text, "你");
    }

    #[test]
    fn single_page_has_no_indicator() {
        let mut session = ImeSession::new();
        session.candidates_mut().set_items(vec!["你".into()]);
        let mut context = ImeContext::new();
        session.sync_to_context(&mut context);
        assert!(context.auxiliary_text.is_empty());
        assert!(!context.has_next_page);
    }
}
