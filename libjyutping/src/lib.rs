//! libjyutping crate root
//!
//! Cloud-backed jyutping input. This crate binds the provider wire contract
//! (request locators, callback-wrapped responses, blocking fetch) to the
//! generic front-end state machine in `libjyutping-core`.
//!
//! Public API exported here:
//! - `Engine` from `engine` - state machine wired to the cloud client
//! - `CloudInput` and `CloudProvider` from `cloud`
//! - `UrlBuilder` from `url` and `decode_candidates` from `decode`
//! - `CloudError` from `error`
//! - `JyutpingConfig` from `config`

pub mod cloud;
pub mod config;
pub mod decode;
pub mod engine;
pub mod error;
pub mod url;

// Re-export the front-end components from core.
pub use libjyutping_core::{
    paginate, segment, Candidate, CandidateList, Config, ImeContext, ImeEngine, ImeSession,
    InputBuffer, InputState, PageState, QueryRequest, Segmented,
};

// Convenience re-exports for common types used by callers.
pub use cloud::{CloudInput, CloudProvider};
pub use config::JyutpingConfig;
pub use decode::decode_candidates;
pub use engine::Engine;
pub use error::CloudError;
pub use url::UrlBuilder;
