//! Series formats (best-of-N)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Best-of-N series length for a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesFormat {
    Bo1,
    #[default]
    Bo3,
    Bo5,
    Bo7,
}

impl SeriesFormat {
    /// Map wins required to take the series.
    pub fn wins_needed(self) -> u8 {
        match self {
            SeriesFormat::Bo1 => 1,
            SeriesFormat::Bo3 => 2,
            SeriesFormat::Bo5 => 3,
            SeriesFormat::Bo7 => 4,
        }
    }

    /// Whether a score line is a decisive result for this series.
    ///
    /// Exactly one side must reach the required wins; the other must
    /// fall short (a Bo3 accepts 2-0 and 2-1, never 2-2 or 1-0).
    pub fn is_decisive(self, score_a: u8, score_b: u8) -> bool {
        let needed = self.wins_needed();
        (score_a == needed && score_b < needed) || (score_b == needed && score_a < needed)
    }
}

impl fmt::Display for SeriesFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SeriesFormat::Bo1 => "Bo1",
            SeriesFormat::Bo3 => "Bo3",
            SeriesFormat::Bo5 => "Bo5",
            SeriesFormat::Bo7 => "Bo7",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for SeriesFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bo1" => Ok(SeriesFormat::Bo1),
            "bo3" => Ok(SeriesFormat::Bo3),
            "bo5" => Ok(SeriesFormat::Bo5),
            "bo7" => Ok(SeriesFormat::Bo7),
            other => Err(format!("unknown series format: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wins_needed() {
        assert_eq!(SeriesFormat::Bo1.wins_needed(), 1);
        assert_eq!(SeriesFormat::Bo3.wins_needed(), 2);
        assert_eq!(SeriesFormat::Bo5.wins_needed(), 3);
        assert_eq!(SeriesFormat::Bo7.wins_needed(), 4);
    }

    #[test]
    fn test_decisive_scores() {
        assert!(SeriesFormat::Bo3.is_decisive(2, 0));
        assert!(SeriesFormat::Bo3.is_decisive(2, 1));
        assert!(SeriesFormat::Bo3.is_decisive(1, 2));
        assert!(!SeriesFormat::Bo3.is_decisive(2, 2));
        assert!(!SeriesFormat::Bo3.is_decisive(1, 0));
        assert!(!SeriesFormat::Bo3.is_decisive(3, 0));
        assert!(SeriesFormat::Bo1.is_decisive(1, 0));
        assert!(!SeriesFormat::Bo1.is_decisive(1, 1));
        assert!(SeriesFormat::Bo7.is_decisive(4, 3));
    }

    #[test]
    fn test_parse() {
        assert_eq!("bo5".parse::<SeriesFormat>().unwrap(), SeriesFormat::Bo5);
        assert_eq!("Bo1".parse::<SeriesFormat>().unwrap(), SeriesFormat::Bo1);
        assert!("bo9".parse::<SeriesFormat>().is_err());
    }
}
