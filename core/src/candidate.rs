//! Candidate types for cloud-suggested conversions.
//!
//! This module provides:
//! - `Candidate`: one suggestion as shown on the current page
//! - `CandidateList`: the decoded suggestion strings plus paging position
//!
//! Suggestions keep the provider's order: no dedup, no re-sorting. A
//! `Candidate` only exists for the page it is rendered on; changing page or
//! applying a new response rebuilds the visible candidates from scratch.

use serde::{Deserialize, Serialize};

use crate::pagination::{paginate, PageState};

/// Candidates shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// A single suggestion with its 1-based position on the current page.
///
/// The position is the digit the user types to pick it; it carries no
/// identity beyond the page it was built for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub text: String,
    pub position: u8,
}

impl Candidate {
    pub fn new<T: Into<String>>(text: T, position: u8) -> Self {
        Candidate {
            text: text.into(),
            position,
        }
    }
}

/// A paginated list of suggestion strings.
#[derive(Debug, Clone)]
pub struct CandidateList {
    /// All decoded suggestions, in provider order
    items: Vec<String>,

    /// Number of candidates per page
    page_size: usize,

    /// Current page index (0-based); clamped on read whenever the item
    /// count shrinks underneath it
    current_page: usize,
}

impl CandidateList {
    /// Create a new empty candidate list with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create a candidate list with the specified page size.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_size: page_size.max(1),
            current_page: 0,
        }
    }

    /// Replace the suggestions, resetting to the first page.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.current_page = 0;
    }

    /// Drop all suggestions and paging state.
    pub fn clear(&mut self) {
        self.items.clear();
        self.current_page = 0;
    }

    /// Go back to the first page without touching the suggestions.
    pub fn reset_page(&mut self) {
        self.current_page = 0;
    }

    /// All suggestion strings.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Total number of suggestions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Candidates per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Derived paging facts for the current page.
    pub fn page_state(&self) -> PageState {
        paginate(self.items.len(), self.page_size, self.current_page)
    }

    /// Current page index (0-based, clamped).
    pub fn current_page(&self) -> usize {
        self.page_state().current_page
    }

    pub fn has_next(&self) -> bool {
        self.page_state().has_next
    }

    pub fn has_previous(&self) -> bool {
        self.page_state().has_previous
    }

    /// Move to the next page. Returns true if the page changed.
    pub fn page_down(&mut self) -> bool {
        let page = self.page_state();
        if page.has_next {
            self.current_page = page.current_page + 1;
            true
        } else {
            false
        }
    }

    /// Move to the previous page. Returns true if the page changed.
    pub fn page_up(&mut self) -> bool {
        let page = self.page_state();
        if page.has_previous {
            self.current_page = page.current_page - 1;
            true
        } else {
            false
        }
    }

    /// Build the candidates for the current page, positions starting at 1.
    pub fn current_page_candidates(&self) -> Vec<Candidate> {
        let page = self.page_state();
        let end = page.end.min(self.items.len());
        if page.start >= end {
            return Vec::new();
        }
        self.items[page.start..end]
            .iter()
            .enumerate()
            .map(|(i, text)| Candidate::new(text.clone(), (i + 1) as u8))
            .collect()
    }

    /// Look up the suggestion at a 1-based position on the current page.
    pub fn candidate_at(&self, position: usize) -> Option<&str> {
        if position == 0 || position > self.page_size {
            return None;
        }
        let page = self.page_state();
        self.items
            .get(page.start + position - 1)
            .map(String::as_str)
    }
}

impl Default for CandidateList {
    fn default() -> Self {
        Self::new()
    }
}
