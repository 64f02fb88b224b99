//! Standings rows - derived ranking view for Swiss and round robin

use crate::ids::CompetitorId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One competitor's line in the standings.
///
/// Recomputed from terminal matches on demand; never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub competitor_id: CompetitorId,
    pub wins: u32,
    pub losses: u32,
    /// Map wins minus map losses across all series.
    pub map_win_differential: i32,
    /// Every opponent actually faced (byes excluded).
    pub opponents_faced: BTreeSet<CompetitorId>,
    /// Sum of opponents' win counts.
    pub buchholz_score: u32,
    /// Original seed rank, the final deterministic tiebreak.
    pub seed_rank: u32,
}

impl StandingRow {
    pub fn new(competitor_id: CompetitorId, seed_rank: u32) -> Self {
        Self {
            competitor_id,
            wins: 0,
            losses: 0,
            map_win_differential: 0,
            opponents_faced: BTreeSet::new(),
            buchholz_score: 0,
            seed_rank,
        }
    }

    /// Matches played (byes count toward wins but are not matches
    /// against an opponent).
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }
}
