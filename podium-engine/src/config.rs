//! Configuration types for bracket generation

use podium_core::{BracketError, EventFormat, SeriesFormat};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the seeded field is ordered before slot assignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedingPolicy {
    /// Sort descending by rating, ties broken by original seed rank.
    Rating,
    /// Fisher-Yates shuffle with the injected random source.
    Random,
    /// Keep the caller's order as-is.
    #[default]
    Manual,
}

impl FromStr for SeedingPolicy {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rating" => Ok(SeedingPolicy::Rating),
            "random" => Ok(SeedingPolicy::Random),
            "manual" => Ok(SeedingPolicy::Manual),
            other => Err(BracketError::InvalidSeedingPolicy(other.to_string())),
        }
    }
}

/// Options for one bracket generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Tournament format.
    pub format: EventFormat,
    /// Seeding policy.
    pub seeding_policy: SeedingPolicy,
    /// Series length for regular matches.
    pub series: SeriesFormat,
    /// Series length for the bracket final (or upper/lower finals).
    pub finals_series: SeriesFormat,
    /// Series length for the grand final and its reset.
    pub grand_final_series: SeriesFormat,
    /// Swiss round count override (defaults to ceil(log2(field))).
    pub swiss_rounds: Option<usize>,
    /// Whether the grand final can be reset (double elimination).
    pub bracket_reset: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::new(EventFormat::SingleElimination)
    }
}

impl GenerateConfig {
    /// Create a config with the site's conventional series lengths for
    /// the given format: Bo3 rounds and Bo5 finals for elimination
    /// play, Bo1 for the league formats, Bo7 grand finals.
    pub fn new(format: EventFormat) -> Self {
        let league = matches!(format, EventFormat::Swiss | EventFormat::RoundRobin);
        Self {
            format,
            seeding_policy: SeedingPolicy::Manual,
            series: if league {
                SeriesFormat::Bo1
            } else {
                SeriesFormat::Bo3
            },
            finals_series: if league {
                SeriesFormat::Bo1
            } else {
                SeriesFormat::Bo5
            },
            grand_final_series: SeriesFormat::Bo7,
            swiss_rounds: None,
            bracket_reset: true,
        }
    }

    /// Set the seeding policy.
    pub fn with_seeding(mut self, policy: SeedingPolicy) -> Self {
        self.seeding_policy = policy;
        self
    }

    /// Set the regular series length.
    pub fn with_series(mut self, series: SeriesFormat) -> Self {
        self.series = series;
        self
    }

    /// Set the finals series length.
    pub fn with_finals_series(mut self, series: SeriesFormat) -> Self {
        self.finals_series = series;
        self
    }

    /// Override the Swiss round count.
    pub fn with_swiss_rounds(mut self, rounds: usize) -> Self {
        self.swiss_rounds = Some(rounds);
        self
    }

    /// Enable or disable the grand-final bracket reset.
    pub fn with_bracket_reset(mut self, enabled: bool) -> Self {
        self.bracket_reset = enabled;
        self
    }
}
