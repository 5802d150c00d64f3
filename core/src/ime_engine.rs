//! Event-driven engine turning buffer snapshots into queries and selections.
//!
//! The engine owns the session and interprets two event classes: full-buffer
//! text changes (which may carry a trailing control digit) and query
//! responses. It never performs network work itself; when a debounced edit
//! comes due, `poll` hands the front-end a `QueryRequest`, and the front-end
//! later feeds the decoded outcome back through `apply_response`.
//!
//! Cancellation is a generation counter: every dispatch bumps it, and a
//! response is applied only when its generation still matches. A stale
//! response can therefore never clobber state that belongs to newer input.

use std::time::Instant;

use tracing::debug;

use crate::context::ImeContext;
use crate::segmenter::{segment, Segmented};
use crate::session::{ImeSession, InputState};
use crate::utils;
use crate::Config;

/// A query the front-end must run on the engine's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Composed han context preceding the romanization
    pub retained: String,
    /// Romanization to transliterate
    pub query: String,
    /// Matches this request to its response; stale generations are dropped
    pub generation: u64,
}

/// IME engine: session state plus dispatch bookkeeping.
pub struct ImeEngine {
    session: ImeSession,
    context: ImeContext,
    config: Config,

    /// Generation of the most recent dispatch
    generation: u64,

    /// Deadline of the armed debounce, if any
    dispatch_due: Option<Instant>,

    /// Segmentation of the edit waiting behind the debounce
    pending: Option<Segmented>,

    /// Query segment of the last dispatch (empty once cleared)
    dispatched_query: String,
}

impl ImeEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            session: ImeSession::with_page_size(config.page_size),
            context: ImeContext::new(),
            config,
            generation: 0,
            dispatch_due: None,
            pending: None,
            dispatched_query: String::new(),
        }
    }

    /// Get a reference to the context for reading IME state.
    pub fn context(&self) -> &ImeContext {
        &self.context
    }

    /// Get a mutable reference to the context.
    pub fn context_mut(&mut self) -> &mut ImeContext {
        &mut self.context
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &ImeSession {
        &self.session
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reset to the initial state, stranding any in-flight response.
    pub fn reset(&mut self) {
        self.session.clear();
        self.context.clear();
        self.context.commit_text.clear();
        self.pending = None;
        self.dispatch_due = None;
        self.dispatched_query.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Process a full-buffer text change.
    ///
    /// This is the only input event: the front-end reports the complete new
    /// buffer text, and the engine infers whether the change was an edit or a
    /// trailing control digit (candidate selection / paging).
    pub fn buffer_changed(&mut self, text: &str, now: Instant) {
        // Clear commit text from the previous event
        self.context.commit_text.clear();

        if text.is_empty() {
            // An emptied buffer re-arms the snappy debounce for whatever
            // comes next
            self.session.set_has_selected(false);
        }

        if let Some((base, num)) = split_control_suffix(text) {
            self.handle_control(base, num, now);
            self.sync_context();
            return;
        }

        // A plain edit: stray digits are stripped, never inserted
        let seg = segment(text);
        self.session.input_buffer_mut().set_text(seg.composed());
        self.schedule_dispatch(seg, now);
        self.sync_context();
    }

    /// Run the debounced dispatch once its deadline has passed.
    ///
    /// Returns the request the front-end should fetch, or `None` when
    /// nothing is due (or the pending query segment emptied out, which only
    /// clears the displayed candidates).
    pub fn poll(&mut self, now: Instant) -> Option<QueryRequest> {
        let due = self.dispatch_due?;
        if now < due {
            return None;
        }
        self.dispatch_due = None;
        let seg = self.pending.take()?;

        self.dispatched_query = seg.query.clone();
        // A fresh query invalidates prior paging
        self.session.candidates_mut().reset_page();
        // Either way the previous dispatch is superseded
        self.generation = self.generation.wrapping_add(1);

        if utils::normalize(&seg.query).is_empty() {
            debug!("query emptied; clearing candidates");
            self.session.candidates_mut().clear();
            self.session.set_loading(false);
            self.session.set_state(InputState::Idle);
            self.sync_context();
            return None;
        }

        self.session.set_loading(true);
        self.session.set_state(InputState::Awaiting);
        debug!(generation = self.generation, query = %seg.query, "query dispatched");
        self.sync_context();
        Some(QueryRequest {
            retained: seg.retained,
            query: seg.query,
            generation: self.generation,
        })
    }

    /// Treat the armed debounce as already elapsed.
    ///
    /// For synchronous front-ends (REPLs, tests) that have no timer to wait
    /// on.
    pub fn flush(&mut self) -> Option<QueryRequest> {
        match self.dispatch_due {
            Some(due) => self.poll(due),
            None => None,
        }
    }

    /// Apply the outcome of a dispatched query.
    ///
    /// Ignored unless `generation` matches the most recent dispatch: only
    /// the response for the current locator may touch visible state. On
    /// failure the error message is surfaced and previously displayed
    /// candidates are left in place.
    pub fn apply_response(&mut self, generation: u64, result: Result<Vec<String>, String>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale response discarded");
            return;
        }
        self.session.set_loading(false);
        self.session.set_state(InputState::Idle);
        match result {
            Ok(items) => {
                debug!(count = items.len(), "candidates applied");
                self.session.set_error(None);
                self.session.candidates_mut().set_items(items);
            }
            Err(message) => {
                debug!(%message, "query failed");
                self.session.set_error(Some(message));
            }
        }
        self.sync_context();
    }

    /// Handle a trailing control digit: selection (1-6) or paging (0/9).
    fn handle_control(&mut self, base: &str, num: u8, now: Instant) {
        match num {
            1..=6 => {
                let picked = self
                    .session
                    .candidates()
                    .candidate_at(num as usize)
                    .map(str::to_string);
                let Some(text) = picked else {
                    debug!(num, "selection position empty, ignored");
                    return;
                };

                // The han context comes from the buffer as it stood before
                // this keystroke, not from the event text
                let seg = segment(self.session.input_buffer().text());
                let mut new_text = seg.retained;
                new_text.push_str(&text);
                self.session.input_buffer_mut().set_text(new_text);
                self.session.set_has_selected(true);
                // Optimistic clear; the follow-up query repopulates
                self.session.candidates_mut().clear();
                self.context.commit_text = if self.config.simplified {
                    utils::to_simplified(&text)
                } else {
                    text
                };
                debug!(num, "candidate selected");

                let seg = segment(self.session.input_buffer().text());
                self.schedule_dispatch(seg, now);
            }
            0 => {
                if self.session.candidates_mut().page_down() {
                    self.session.input_buffer_mut().set_text(base);
                    debug!(page = self.session.candidates().current_page(), "page advanced");
                }
            }
            9 => {
                if self.session.candidates_mut().page_up() {
                    self.session.input_buffer_mut().set_text(base);
                    debug!(page = self.session.candidates().current_page(), "page rewound");
                }
            }
            _ => {
                // unreachable given the matched digit set
            }
        }
    }

    /// Arm (or disarm) the debounce after a buffer mutation.
    fn schedule_dispatch(&mut self, seg: Segmented, now: Instant) {
        if seg.query == self.dispatched_query {
            // Nothing new to ask; drop any edit coalesced in between
            if self.pending.take().is_some() {
                self.dispatch_due = None;
                let state = if self.session.loading() {
                    InputState::Awaiting
                } else {
                    InputState::Idle
                };
                self.session.set_state(state);
            }
            return;
        }

        let window = if self.session.has_selected() {
            self.config.settled_window()
        } else {
            self.config.initial_window()
        };
        debug!(query = %seg.query, ?window, "debounce armed");
        self.pending = Some(seg);
        self.dispatch_due = Some(now + window);
        self.session.set_state(InputState::Pending);
    }

    fn sync_context(&mut self) {
        self.session.sync_to_context(&mut self.context);
    }
}

/// Split off a trailing control digit.
///
/// The buffer text is a control sequence when it ends in one of
/// `{0,1,2,3,4,5,6,9}`; 7 and 8 carry no action and fall through to normal
/// edit handling (where the digit is stripped).
fn split_control_suffix(text: &str) -> Option<(&str, u8)> {
    let last = text.chars().last()?;
    if !last.is_ascii_digit() {
        return None;
    }
    let num = last.to_digit(10)? as u8;
    if matches!(num, 0..=6 | 9) {
        Some((&text[..text.len() - last.len_utf8()], num))
    } else {
        None
    }
}
