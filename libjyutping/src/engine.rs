//! High-level engine wiring the state machine to the cloud client.
//!
//! The core engine decides *when* to query and *what* to do with the
//! outcome; this wrapper runs the actual fetch. Front-ends with an event
//! loop feed `update_text` + periodic `pump`; line-oriented front-ends
//! (REPL, tests) use `update_text_now`, which skips the debounce wait.

use std::time::Instant;

use libjyutping_core::{ImeContext, ImeEngine, QueryRequest};

use crate::cloud::CloudInput;
use crate::config::JyutpingConfig;

/// Cloud-backed jyutping engine.
pub struct Engine {
    ime: ImeEngine,
    cloud: CloudInput,
}

impl Engine {
    /// Create an engine from a full configuration.
    pub fn new(config: JyutpingConfig) -> Self {
        let cloud = CloudInput::from_config(&config);
        Self {
            ime: ImeEngine::new(config.into_base()),
            cloud,
        }
    }

    /// Read the render-ready context.
    pub fn context(&self) -> &ImeContext {
        self.ime.context()
    }

    /// Get a mutable reference to the context (commit consumption).
    pub fn context_mut(&mut self) -> &mut ImeContext {
        self.ime.context_mut()
    }

    /// Access the inner state machine.
    pub fn ime(&self) -> &ImeEngine {
        &self.ime
    }

    /// Feed a full-buffer text change.
    pub fn update_text(&mut self, text: &str) {
        self.ime.buffer_changed(text, Instant::now());
    }

    /// Run the debounced query if its deadline has passed.
    pub fn pump(&mut self) {
        if let Some(request) = self.ime.poll(Instant::now()) {
            self.dispatch(request);
        }
    }

    /// Feed a text change and run any resulting query immediately.
    pub fn update_text_now(&mut self, text: &str) {
        self.update_text(text);
        if let Some(request) = self.ime.flush() {
            self.dispatch(request);
        }
    }

    /// Reset all state.
    pub fn reset(&mut self) {
        self.ime.reset();
    }

    fn dispatch(&mut self, request: QueryRequest) {
        let result = self
            .cloud
            .query(&request.query, &request.retained)
            .map_err(|e| e.to_string());
        self.ime.apply_response(request.generation, result);
    }
}
