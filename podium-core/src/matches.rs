//! Match - the unit of mutation in a bracket graph

use crate::ids::{CompetitorId, MatchId};
use crate::series::SeriesFormat;
use crate::slot::{NextRef, SlotRef, SlotSide};
use serde::{Deserialize, Serialize};

/// Which part of the bracket a match belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketSection {
    Single,
    Upper,
    Lower,
    GrandFinal,
    Swiss,
    RoundRobin,
}

/// Lifecycle of a match. Transitions are forward-only:
/// pending -> ready -> live -> completed, with forfeited reachable from
/// ready or live. Skipping live on a direct result submission is a
/// forward move and therefore legal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Pending,
    Ready,
    Live,
    Completed,
    Forfeited,
}

impl MatchStatus {
    /// Whether the match has reached a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, MatchStatus::Completed | MatchStatus::Forfeited)
    }

    /// Whether a result may be submitted in this state.
    pub fn accepts_result(self) -> bool {
        matches!(self, MatchStatus::Ready | MatchStatus::Live)
    }
}

/// A single match in the bracket.
///
/// Downstream links are weak references (plain ids), so the graph has
/// no ownership cycles and serializes directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    /// Round index within the match's section, 0-based.
    pub round_index: usize,
    /// Position within the round, 0-based.
    pub slot_index: usize,
    pub section: BracketSection,
    pub slot_a: SlotRef,
    pub slot_b: SlotRef,
    pub score_a: u8,
    pub score_b: u8,
    pub status: MatchStatus,
    pub winner_slot: Option<SlotSide>,
    pub next_match_on_win: Option<NextRef>,
    pub next_match_on_loss: Option<NextRef>,
    pub series: SeriesFormat,
    /// Monotonically increasing counter; submissions are a
    /// compare-and-swap against it.
    pub version: u64,
    /// Set when Swiss pairing had to allow a rematch.
    pub pairing_fallback: bool,
}

impl Match {
    /// Create a pending match with the given slots.
    pub fn new(
        id: MatchId,
        round_index: usize,
        slot_index: usize,
        section: BracketSection,
        series: SeriesFormat,
        slot_a: SlotRef,
        slot_b: SlotRef,
    ) -> Self {
        Self {
            id,
            round_index,
            slot_index,
            section,
            slot_a,
            slot_b,
            score_a: 0,
            score_b: 0,
            status: MatchStatus::Pending,
            winner_slot: None,
            next_match_on_win: None,
            next_match_on_loss: None,
            series,
            version: 0,
            pairing_fallback: false,
        }
    }

    /// The slot on the given side.
    pub fn slot(&self, side: SlotSide) -> SlotRef {
        match side {
            SlotSide::A => self.slot_a,
            SlotSide::B => self.slot_b,
        }
    }

    /// Mutable access to the slot on the given side.
    pub fn slot_mut(&mut self, side: SlotSide) -> &mut SlotRef {
        match side {
            SlotSide::A => &mut self.slot_a,
            SlotSide::B => &mut self.slot_b,
        }
    }

    /// The side that lost, once a winner is known.
    pub fn loser_slot(&self) -> Option<SlotSide> {
        self.winner_slot.map(SlotSide::other)
    }

    /// The winning competitor, once the match is terminal.
    pub fn winner(&self) -> Option<CompetitorId> {
        self.winner_slot.and_then(|side| self.slot(side).competitor())
    }

    /// The losing competitor, once the match is terminal.
    ///
    /// None for bye matches: a bye has no loser to advance or record.
    pub fn loser(&self) -> Option<CompetitorId> {
        self.loser_slot().and_then(|side| self.slot(side).competitor())
    }

    /// Whether both slots hold resolved competitors.
    pub fn both_resolved(&self) -> bool {
        self.slot_a.is_resolved() && self.slot_b.is_resolved()
    }

    /// Whether one slot is a bye and the other a resolved competitor.
    pub fn is_bye_match(&self) -> bool {
        (self.slot_a.is_bye() && self.slot_b.is_resolved())
            || (self.slot_b.is_bye() && self.slot_a.is_resolved())
    }

    /// Promote pending to ready once both slots are resolved.
    pub fn refresh_readiness(&mut self) {
        if self.status == MatchStatus::Pending && self.both_resolved() {
            self.status = MatchStatus::Ready;
        }
    }
}
