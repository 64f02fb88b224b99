//! Seeding assignment - order the field before slot placement

use crate::config::SeedingPolicy;
use podium_core::{BracketError, SeedEntry};
use rand::seq::SliceRandom;
use rand::Rng;

/// Order the field under the given policy and re-rank it densely from 1.
///
/// The random source is injected so callers control determinism.
pub fn assign<R: Rng>(
    entries: &[SeedEntry],
    policy: SeedingPolicy,
    rng: &mut R,
) -> Result<Vec<SeedEntry>, BracketError> {
    if entries.is_empty() {
        return Err(BracketError::EmptyField);
    }

    let mut out = entries.to_vec();
    match policy {
        SeedingPolicy::Manual => {}
        SeedingPolicy::Rating => {
            // Unrated competitors sort below every rated one; ties keep
            // the caller's seed order.
            out.sort_by(|a, b| {
                b.rating
                    .unwrap_or(0)
                    .cmp(&a.rating.unwrap_or(0))
                    .then(a.seed_rank.cmp(&b.seed_rank))
            });
        }
        SeedingPolicy::Random => {
            out.shuffle(rng);
        }
    }

    for (i, entry) in out.iter_mut().enumerate() {
        entry.seed_rank = i as u32 + 1;
    }
    Ok(out)
}
