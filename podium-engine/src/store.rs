//! Event-keyed bracket store
//!
//! One graph per event, held in an explicit map the caller owns and
//! injects; tests get isolated stores instead of sharing ambient
//! state. Events are independent failure domains: an error against one
//! graph never touches another.

use crate::config::GenerateConfig;
use crate::progression::{self, SubmitOutcome};
use crate::{generator, standings};
use podium_core::{
    BracketError, BracketGraph, Match, MatchId, SeedEntry, SlotSide, StandingRow,
};
use rand::Rng;
use rustc_hash::FxHashMap;

/// In-memory store of bracket graphs keyed by event id.
#[derive(Default)]
pub struct BracketStore {
    events: FxHashMap<String, BracketGraph>,
}

impl BracketStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate (or regenerate) the bracket for an event.
    pub fn generate<R: Rng>(
        &mut self,
        event_id: &str,
        entries: &[SeedEntry],
        config: &GenerateConfig,
        rng: &mut R,
    ) -> Result<&BracketGraph, BracketError> {
        let graph = generator::generate(entries, config, rng)?;
        self.events.insert(event_id.to_string(), graph);
        self.get(event_id)
    }

    /// The current graph for an event.
    pub fn get(&self, event_id: &str) -> Result<&BracketGraph, BracketError> {
        self.events
            .get(event_id)
            .ok_or_else(|| BracketError::EventNotFound(event_id.to_string()))
    }

    fn get_mut(&mut self, event_id: &str) -> Result<&mut BracketGraph, BracketError> {
        self.events
            .get_mut(event_id)
            .ok_or_else(|| BracketError::EventNotFound(event_id.to_string()))
    }

    /// Current standings for a league-format event.
    pub fn standings(&self, event_id: &str) -> Result<Vec<StandingRow>, BracketError> {
        Ok(standings::recompute(self.get(event_id)?))
    }

    pub fn submit_result(
        &mut self,
        event_id: &str,
        match_id: MatchId,
        score_a: u8,
        score_b: u8,
        expected_version: u64,
    ) -> Result<SubmitOutcome, BracketError> {
        let graph = self.get_mut(event_id)?;
        progression::submit_result(graph, match_id, score_a, score_b, expected_version)
    }

    pub fn submit_forfeit(
        &mut self,
        event_id: &str,
        match_id: MatchId,
        forfeiting_side: SlotSide,
        expected_version: u64,
    ) -> Result<SubmitOutcome, BracketError> {
        let graph = self.get_mut(event_id)?;
        progression::submit_forfeit(graph, match_id, forfeiting_side, expected_version)
    }

    pub fn start_match(
        &mut self,
        event_id: &str,
        match_id: MatchId,
        expected_version: u64,
    ) -> Result<Match, BracketError> {
        let graph = self.get_mut(event_id)?;
        progression::start_match(graph, match_id, expected_version)
    }

    /// Discard an event's bracket. Idempotent: resetting an event that
    /// has no bracket is a no-op that reports `false`.
    pub fn reset(&mut self, event_id: &str) -> bool {
        self.events.remove(event_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_core::{CompetitorId, EventFormat};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn field(n: usize) -> Vec<SeedEntry> {
        (1..=n)
            .map(|i| SeedEntry::new(CompetitorId(i as u64), format!("Team {}", i), i as u32))
            .collect()
    }

    #[test]
    fn test_generate_then_get() {
        let mut store = BracketStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GenerateConfig::new(EventFormat::SingleElimination);
        store.generate("spring-open", &field(8), &config, &mut rng).unwrap();

        let graph = store.get("spring-open").unwrap();
        assert_eq!(graph.total_matches(), 7);
        assert!(matches!(
            store.get("missing"),
            Err(BracketError::EventNotFound(_))
        ));
    }

    #[test]
    fn test_submission_goes_through_the_store() {
        let mut store = BracketStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GenerateConfig::new(EventFormat::SingleElimination);
        store.generate("cup", &field(4), &config, &mut rng).unwrap();

        let outcome = store.submit_result("cup", MatchId(0), 2, 0, 0).unwrap();
        assert_eq!(outcome.updated.version, 1);
        assert!(matches!(
            store.submit_result("nope", MatchId(0), 2, 0, 0),
            Err(BracketError::EventNotFound(_))
        ));
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut store = BracketStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GenerateConfig::new(EventFormat::RoundRobin);
        store.generate("league", &field(5), &config, &mut rng).unwrap();

        assert!(store.reset("league"));
        assert!(!store.reset("league"), "second reset is a no-op");
        assert!(store.get("league").is_err());
    }

    #[test]
    fn test_regenerate_replaces_the_graph() {
        let mut store = BracketStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GenerateConfig::new(EventFormat::SingleElimination);
        store.generate("cup", &field(4), &config, &mut rng).unwrap();
        store.submit_result("cup", MatchId(0), 2, 1, 0).unwrap();

        store.generate("cup", &field(4), &config, &mut rng).unwrap();
        let m = store.get("cup").unwrap().get(MatchId(0)).unwrap();
        assert_eq!(m.version, 0, "regeneration discards prior results");
    }

    #[test]
    fn test_events_are_isolated() {
        let mut store = BracketStore::new();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = GenerateConfig::new(EventFormat::SingleElimination);
        store.generate("a", &field(4), &config, &mut rng).unwrap();
        store.generate("b", &field(4), &config, &mut rng).unwrap();

        store.submit_result("a", MatchId(0), 2, 0, 0).unwrap();
        let untouched = store.get("b").unwrap().get(MatchId(0)).unwrap();
        assert_eq!(untouched.version, 0);
        assert_eq!(store.len(), 2);
    }
}
