//! Podium Engine - Bracket generation and progression
//!
//! This crate turns a seeded field into a bracket graph and advances it
//! as results arrive:
//! - Seeding policies and bye resolution
//! - Format generators (single/double elimination, Swiss, round robin)
//! - Result progression with optimistic version checks
//! - Standings for the league formats
//! - An event-keyed in-memory bracket store

mod bracket_math;
mod byes;
mod config;
mod double_elim;
mod drop_tables;
mod generator;
mod progression;
mod round_robin;
mod seeding;
mod single_elim;
mod standings;
mod store;
mod swiss;

pub use byes::{compute_byes, ByePlan};
pub use config::{GenerateConfig, SeedingPolicy};
pub use generator::{generate, MAX_FIELD_SIZE};
pub use progression::{start_match, submit_forfeit, submit_result, SubmitOutcome};
pub use seeding::assign;
pub use standings::recompute;
pub use store::BracketStore;
