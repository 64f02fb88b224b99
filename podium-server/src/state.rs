//! Server state management
//!
//! One bracket store behind a lock. Writers hold the write lock for the
//! whole submission, so every mutation lands as a single in-process
//! transaction and readers always see a consistent graph.

use podium_engine::BracketStore;
use std::sync::RwLock;

/// Server-wide shared state.
pub struct ServerState {
    pub store: RwLock<BracketStore>,
}

impl ServerState {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(BracketStore::new()),
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
