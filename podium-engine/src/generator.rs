//! Format dispatch - one generator per format behind a single entry
//! point

use crate::config::GenerateConfig;
use crate::{double_elim, round_robin, seeding, single_elim, swiss};
use podium_core::{BracketError, BracketGraph, EventFormat, SeedEntry};
use rand::Rng;

/// Largest field any format accepts (bracket sizes above this have no
/// drop table).
pub const MAX_FIELD_SIZE: usize = 64;

fn format_name(format: EventFormat) -> &'static str {
    match format {
        EventFormat::SingleElimination => "single_elimination",
        EventFormat::DoubleElimination => "double_elimination",
        EventFormat::Swiss => "swiss",
        EventFormat::RoundRobin => "round_robin",
    }
}

/// Seed the field and build a bracket for the configured format.
///
/// The random source is only consumed by the random seeding policy;
/// inject a seeded generator for reproducible brackets.
pub fn generate<R: Rng>(
    entries: &[SeedEntry],
    config: &GenerateConfig,
    rng: &mut R,
) -> Result<BracketGraph, BracketError> {
    if entries.is_empty() {
        return Err(BracketError::EmptyField);
    }
    let field = entries.len();
    if field > MAX_FIELD_SIZE {
        return Err(BracketError::FieldTooLarge(field));
    }
    let minimum = match config.format {
        EventFormat::DoubleElimination => 4,
        _ => 2,
    };
    if field < minimum {
        return Err(BracketError::InsufficientTeams {
            format: format_name(config.format),
            minimum,
            actual: field,
        });
    }

    let seeded = seeding::assign(entries, config.seeding_policy, rng)?;
    match config.format {
        EventFormat::SingleElimination => single_elim::generate(&seeded, config),
        EventFormat::DoubleElimination => double_elim::generate(&seeded, config),
        EventFormat::Swiss => swiss::generate(&seeded, config),
        EventFormat::RoundRobin => round_robin::generate(&seeded, config),
    }
}
