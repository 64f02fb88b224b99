//! Bracket graph - the root aggregate
//!
//! Owns every match in an arena addressed by `MatchId`; rounds and
//! cross-match links refer to matches by id only, so the graph is
//! cycle-free and serializes directly.

use crate::error::BracketError;
use crate::ids::{CompetitorId, MatchId};
use crate::matches::Match;
use crate::seed::SeedEntry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tournament format of a bracket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventFormat {
    SingleElimination,
    DoubleElimination,
    Swiss,
    RoundRobin,
}

impl fmt::Display for EventFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventFormat::SingleElimination => "single_elimination",
            EventFormat::DoubleElimination => "double_elimination",
            EventFormat::Swiss => "swiss",
            EventFormat::RoundRobin => "round_robin",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for EventFormat {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_elimination" => Ok(EventFormat::SingleElimination),
            "double_elimination" => Ok(EventFormat::DoubleElimination),
            "swiss" => Ok(EventFormat::Swiss),
            "round_robin" => Ok(EventFormat::RoundRobin),
            other => Err(BracketError::InvalidFormat(other.to_string())),
        }
    }
}

/// An ordered sequence of matches played together.
///
/// Ordering is significant: it drives display order and, for Swiss,
/// pairing order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    pub index: usize,
    pub label: String,
    pub match_ids: Vec<MatchId>,
}

impl Round {
    pub fn new(index: usize, label: impl Into<String>) -> Self {
        Self {
            index,
            label: label.into(),
            match_ids: Vec::new(),
        }
    }
}

/// Per-format round structure.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum BracketSections {
    /// One linear sequence of rounds (single elimination).
    SingleElimination { rounds: Vec<Round> },
    /// Upper and lower brackets plus the grand-final series (the reset
    /// match, when created, is appended to `grand_final`).
    DoubleElimination {
        upper: Vec<Round>,
        lower: Vec<Round>,
        grand_final: Vec<Round>,
    },
    /// One linear sequence of rounds paired by record (Swiss) or by
    /// schedule (round robin).
    League { rounds: Vec<Round> },
}

impl BracketSections {
    /// All round lists in display order.
    pub fn round_lists(&self) -> Vec<&[Round]> {
        match self {
            BracketSections::SingleElimination { rounds } => vec![rounds.as_slice()],
            BracketSections::DoubleElimination {
                upper,
                lower,
                grand_final,
            } => vec![upper.as_slice(), lower.as_slice(), grand_final.as_slice()],
            BracketSections::League { rounds } => vec![rounds.as_slice()],
        }
    }
}

/// Generation options the progression engine still needs after the
/// bracket exists (lazily paired Swiss rounds, the bracket reset).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlaySettings {
    /// Series length for matches created after generation.
    pub series: crate::series::SeriesFormat,
    /// Series length for the grand final and its reset.
    pub grand_final_series: crate::series::SeriesFormat,
    /// Whether the lower-bracket finalist winning the grand final
    /// forces a second, decisive match.
    pub bracket_reset: bool,
}

impl Default for PlaySettings {
    fn default() -> Self {
        Self {
            series: crate::series::SeriesFormat::Bo3,
            grand_final_series: crate::series::SeriesFormat::Bo7,
            bracket_reset: true,
        }
    }
}

/// The bracket aggregate: seeded field, match arena, round structure.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BracketGraph {
    pub format: EventFormat,
    pub entrants: Vec<SeedEntry>,
    /// Match arena; `MatchId(n)` lives at index `n`.
    pub matches: Vec<Match>,
    pub sections: BracketSections,
    pub settings: PlaySettings,
    pub total_rounds: usize,
    pub is_complete: bool,
}

impl BracketGraph {
    pub fn new(format: EventFormat, entrants: Vec<SeedEntry>, sections: BracketSections) -> Self {
        Self {
            format,
            entrants,
            matches: Vec::new(),
            sections,
            settings: PlaySettings::default(),
            total_rounds: 0,
            is_complete: false,
        }
    }

    /// Number of matches currently in the graph.
    ///
    /// Grows over time for Swiss (rounds pair lazily) and double
    /// elimination (bracket reset).
    pub fn total_matches(&self) -> usize {
        self.matches.len()
    }

    /// Add a match to the arena, assigning the next id.
    pub fn alloc_match_id(&mut self) -> MatchId {
        MatchId(self.matches.len() as u32)
    }

    pub fn push_match(&mut self, m: Match) -> MatchId {
        debug_assert_eq!(m.id.index(), self.matches.len());
        let id = m.id;
        self.matches.push(m);
        id
    }

    pub fn get(&self, id: MatchId) -> Option<&Match> {
        self.matches.get(id.index())
    }

    pub fn get_mut(&mut self, id: MatchId) -> Option<&mut Match> {
        self.matches.get_mut(id.index())
    }

    /// Like [`get`](Self::get) but with the engine's not-found error.
    pub fn require(&self, id: MatchId) -> Result<&Match, BracketError> {
        self.get(id).ok_or(BracketError::MatchNotFound(id))
    }

    pub fn require_mut(&mut self, id: MatchId) -> Result<&mut Match, BracketError> {
        self.matches
            .get_mut(id.index())
            .ok_or(BracketError::MatchNotFound(id))
    }

    /// Seed entry for a competitor.
    pub fn entrant(&self, id: CompetitorId) -> Option<&SeedEntry> {
        self.entrants.iter().find(|e| e.competitor_id == id)
    }

    /// Display name for a competitor, if it belongs to this field.
    pub fn display_name(&self, id: CompetitorId) -> Option<&str> {
        self.entrant(id).map(|e| e.display_name.as_str())
    }

    /// Original seed rank for a competitor.
    pub fn seed_rank(&self, id: CompetitorId) -> Option<u32> {
        self.entrant(id).map(|e| e.seed_rank)
    }

    /// Matches that have reached a terminal state.
    pub fn terminal_matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(|m| m.status.is_terminal())
    }

    /// Whether every match in the given round is terminal.
    pub fn round_finished(&self, round: &Round) -> bool {
        round
            .match_ids
            .iter()
            .all(|&id| self.get(id).map_or(false, |m| m.status.is_terminal()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matches::{BracketSection, MatchStatus};
    use crate::series::SeriesFormat;
    use crate::slot::SlotRef;

    fn two_team_graph() -> BracketGraph {
        let entrants = vec![
            SeedEntry::new(CompetitorId(10), "Alpha", 1),
            SeedEntry::new(CompetitorId(20), "Bravo", 2),
        ];
        let mut graph = BracketGraph::new(
            EventFormat::SingleElimination,
            entrants,
            BracketSections::SingleElimination { rounds: Vec::new() },
        );
        let id = graph.alloc_match_id();
        let m = Match::new(
            id,
            0,
            0,
            BracketSection::Single,
            SeriesFormat::Bo3,
            SlotRef::Competitor(CompetitorId(10)),
            SlotRef::Competitor(CompetitorId(20)),
        );
        graph.push_match(m);
        graph.total_rounds = 1;
        graph
    }

    #[test]
    fn test_arena_lookup() {
        let graph = two_team_graph();
        assert_eq!(graph.total_matches(), 1);
        assert!(graph.get(MatchId(0)).is_some());
        assert!(graph.get(MatchId(1)).is_none());
        assert!(matches!(
            graph.require(MatchId(9)),
            Err(BracketError::MatchNotFound(MatchId(9)))
        ));
    }

    #[test]
    fn test_entrant_lookup() {
        let graph = two_team_graph();
        assert_eq!(graph.display_name(CompetitorId(10)), Some("Alpha"));
        assert_eq!(graph.seed_rank(CompetitorId(20)), Some(2));
        assert!(graph.entrant(CompetitorId(99)).is_none());
    }

    #[test]
    fn test_round_finished() {
        let mut graph = two_team_graph();
        let mut round = Round::new(0, "Final");
        round.match_ids.push(MatchId(0));
        assert!(!graph.round_finished(&round));

        graph.get_mut(MatchId(0)).unwrap().status = MatchStatus::Completed;
        assert!(graph.round_finished(&round));
    }

    #[test]
    fn test_graph_serde_round_trip() {
        let graph = two_team_graph();
        let json = serde_json::to_string(&graph).unwrap();
        let back: BracketGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_matches(), graph.total_matches());
        assert_eq!(back.format, graph.format);
        assert_eq!(back.entrants, graph.entrants);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(
            "swiss".parse::<EventFormat>().unwrap(),
            EventFormat::Swiss
        );
        assert!(matches!(
            "ladder".parse::<EventFormat>(),
            Err(BracketError::InvalidFormat(s)) if s == "ladder"
        ));
    }
}
