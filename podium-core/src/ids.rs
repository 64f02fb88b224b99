//! Identifier newtypes
//!
//! Matches are addressed by plain integer ids so the bracket graph can
//! hold weak forward links without owning references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a competitor (team or player) taken from the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompetitorId(pub u64);

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a match within one bracket graph.
///
/// Doubles as the index into the graph's match arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(pub u32);

impl MatchId {
    /// Arena index of this match.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "M{}", self.0)
    }
}
