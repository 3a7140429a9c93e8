//! richman game server: REST transport and session management over the
//! pure rules in `richman_rules`.
//!
//! # Architecture
//!
//! - **Session store**: isolated games keyed by opaque ids, idle-evicted.
//! - **API**: JSON endpoints invoking one engine operation per request.
//! - **CLI**: board variant, bind address, and eviction timing.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod api;
pub mod cli;
pub mod session;

// Crate-level exports - Transport
pub use api::{AppState, build_router};

// Crate-level exports - Session management
pub use session::{DEFAULT_IDLE_TIMEOUT, SessionError, SessionId, SessionStore};
