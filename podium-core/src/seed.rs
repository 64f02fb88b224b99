//! Seed entries - the ordered field of competitors

use crate::ids::CompetitorId;
use serde::{Deserialize, Serialize};

/// One competitor in the seeded field.
///
/// Immutable once a bracket has been generated from the field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedEntry {
    pub competitor_id: CompetitorId,
    pub display_name: String,
    /// 1-based, unique, dense rank within the field.
    pub seed_rank: u32,
    /// Optional rating used by the rating seeding policy.
    pub rating: Option<u32>,
}

impl SeedEntry {
    pub fn new(competitor_id: CompetitorId, display_name: impl Into<String>, seed_rank: u32) -> Self {
        Self {
            competitor_id,
            display_name: display_name.into(),
            seed_rank,
            rating: None,
        }
    }

    /// Attach a rating.
    pub fn with_rating(mut self, rating: u32) -> Self {
        self.rating = Some(rating);
        self
    }
}
