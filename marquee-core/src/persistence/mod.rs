//! Storage ports for session data that outlives a single process.

pub mod history;

pub use history::{
    InMemoryHistoryRepository, JsonFileHistoryRepository, SearchHistoryRepository,
    StoredHistory,
};
