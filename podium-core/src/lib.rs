//! Podium Core - Bracket data model
//!
//! This crate provides the data model for the bracket engine:
//! - Competitor seeds and slot references
//! - Matches with forward-only status transitions and version counters
//! - The bracket graph aggregate (arena of matches addressed by id)
//! - Standings rows (derived views for Swiss / round robin)
//! - The engine error taxonomy

pub mod error;
pub mod graph;
pub mod ids;
pub mod matches;
pub mod seed;
pub mod series;
pub mod slot;
pub mod standing;

// Re-exports for convenient access
pub use error::BracketError;
pub use graph::{BracketGraph, BracketSections, EventFormat, PlaySettings, Round};
pub use ids::{CompetitorId, MatchId};
pub use matches::{BracketSection, Match, MatchStatus};
pub use seed::SeedEntry;
pub use series::SeriesFormat;
pub use slot::{NextRef, SlotRef, SlotSide};
pub use standing::StandingRow;
