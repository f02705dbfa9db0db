//! Stateful search orchestration.
//!
//! A [`SearchSession`] owns the filters, the paginated result prefix, the
//! debounce timer and the result cache for one user. Every command publishes
//! an immutable [`SearchSessionState`] snapshot on a watch channel.

pub mod backend;
pub mod controller;
pub mod state;

pub use backend::{LocalSearchBackend, SearchBackend};
pub use controller::{SearchSession, SearchSessionBuilder};
pub use state::{HistoryEntry, SearchPhase, SearchSessionState};
