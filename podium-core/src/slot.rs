//! Slot references - who occupies each side of a match
//!
//! A slot is always in exactly one of three states: a resolved
//! competitor, a placeholder awaiting the outcome of an earlier match,
//! or a bye. The progression engine is the only writer of slots past
//! round one.

use crate::ids::{CompetitorId, MatchId};
use serde::{Deserialize, Serialize};

/// The two sides of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotSide {
    A,
    B,
}

impl SlotSide {
    /// The opposite side.
    pub fn other(self) -> Self {
        match self {
            SlotSide::A => SlotSide::B,
            SlotSide::B => SlotSide::A,
        }
    }
}

/// Occupant of one side of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRef {
    /// A resolved competitor.
    Competitor(CompetitorId),
    /// Waiting on the outcome of the referenced match.
    Awaiting(MatchId),
    /// No opponent; the other side advances automatically.
    Bye,
}

impl SlotRef {
    /// The resolved competitor, if this slot has one.
    pub fn competitor(self) -> Option<CompetitorId> {
        match self {
            SlotRef::Competitor(id) => Some(id),
            _ => None,
        }
    }

    /// Whether this slot holds a resolved competitor.
    pub fn is_resolved(self) -> bool {
        matches!(self, SlotRef::Competitor(_))
    }

    /// Whether this slot is a bye.
    pub fn is_bye(self) -> bool {
        matches!(self, SlotRef::Bye)
    }
}

/// Weak link to a downstream match slot (plain ids, never owning).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextRef {
    pub match_id: MatchId,
    pub slot: SlotSide,
}

impl NextRef {
    pub fn new(match_id: MatchId, slot: SlotSide) -> Self {
        Self { match_id, slot }
    }
}
