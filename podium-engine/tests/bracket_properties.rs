//! Integration tests for the bracket engine
//!
//! Exercises the full stack per format: generation, result submission,
//! propagation, standings, and terminal detection.

use podium_core::{
    BracketError, BracketGraph, BracketSection, BracketSections, CompetitorId, EventFormat,
    Match, MatchId, MatchStatus, SeedEntry, SlotSide,
};
use podium_engine::{generate, submit_result, BracketStore, GenerateConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Arc, Mutex};
use std::thread;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn field(n: usize) -> Vec<SeedEntry> {
    (1..=n)
        .map(|i| SeedEntry::new(CompetitorId(i as u64), format!("Team {}", i), i as u32))
        .collect()
}

fn build(n: usize, config: &GenerateConfig) -> BracketGraph {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    generate(&field(n), config, &mut rng).unwrap()
}

/// Drive every open match to completion, letting `pick` choose the
/// winning side, until the bracket is terminal.
fn drive_to_completion(graph: &mut BracketGraph, pick: impl Fn(&Match) -> SlotSide) {
    for _ in 0..1024 {
        if graph.is_complete {
            return;
        }
        let open: Vec<MatchId> = graph
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::Ready)
            .map(|m| m.id)
            .collect();
        assert!(!open.is_empty(), "bracket stalled before completion");
        for id in open {
            let (status, version, series, side) = {
                let m = graph.get(id).unwrap();
                (m.status, m.version, m.series, pick(m))
            };
            if status != MatchStatus::Ready {
                continue;
            }
            let wins = series.wins_needed();
            let (a, b) = match side {
                SlotSide::A => (wins, 0),
                SlotSide::B => (0, wins),
            };
            submit_result(graph, id, a, b, version).unwrap();
        }
    }
    panic!("bracket did not complete");
}

fn de_sections(graph: &BracketGraph) -> (&[podium_core::Round], &[podium_core::Round], &[podium_core::Round]) {
    let BracketSections::DoubleElimination {
        upper,
        lower,
        grand_final,
    } = &graph.sections
    else {
        panic!("expected a double-elimination layout");
    };
    (upper, lower, grand_final)
}

// ============================================================================
// SINGLE ELIMINATION
// ============================================================================

#[test]
fn test_single_elim_six_team_counts() {
    let graph = build(6, &GenerateConfig::new(EventFormat::SingleElimination));
    assert_eq!(graph.total_matches(), 7, "bracket of 8 has 7 matches");
    assert_eq!(graph.total_rounds, 3);

    let round_one_real = graph
        .matches
        .iter()
        .filter(|m| m.round_index == 0 && !m.is_bye_match())
        .count();
    let round_one_byes = graph
        .matches
        .iter()
        .filter(|m| m.round_index == 0 && m.is_bye_match())
        .count();
    assert_eq!(round_one_real, 2);
    assert_eq!(round_one_byes, 2);
    for m in graph.matches.iter().filter(|m| m.is_bye_match()) {
        assert_eq!(m.status, MatchStatus::Completed, "byes resolve at generation");
    }
}

#[test]
fn test_single_elim_round_trip_leaves_one_undefeated_path() {
    let mut graph = build(8, &GenerateConfig::new(EventFormat::SingleElimination));
    drive_to_completion(&mut graph, |_| SlotSide::A);
    assert!(graph.is_complete);

    let BracketSections::SingleElimination { rounds } = &graph.sections else {
        panic!("expected single-elimination layout");
    };
    let final_id = rounds.last().unwrap().match_ids[0];
    let champion = graph.get(final_id).unwrap().winner().expect("final decided");

    // The champion never lost; everyone else lost exactly once.
    for entry in &graph.entrants {
        let losses = graph
            .matches
            .iter()
            .filter(|m| m.loser() == Some(entry.competitor_id))
            .count();
        if entry.competitor_id == champion {
            assert_eq!(losses, 0, "champion must be undefeated");
        } else {
            assert_eq!(losses, 1, "{} must lose exactly once", entry.display_name);
        }
    }
}

#[test]
fn test_single_elim_winner_propagates_forward() {
    let mut graph = build(4, &GenerateConfig::new(EventFormat::SingleElimination));
    let outcome = submit_result(&mut graph, MatchId(0), 2, 1, 0).unwrap();
    assert_eq!(outcome.updated.status, MatchStatus::Completed);
    assert!(outcome.newly_ready.is_empty(), "final still waits on match 1");

    let outcome = submit_result(&mut graph, MatchId(1), 0, 2, 0).unwrap();
    assert_eq!(outcome.newly_ready, vec![MatchId(2)]);
    let final_match = graph.get(MatchId(2)).unwrap();
    assert_eq!(final_match.status, MatchStatus::Ready);
    assert!(final_match.both_resolved());
}

// ============================================================================
// DOUBLE ELIMINATION
// ============================================================================

#[test]
fn test_double_elim_eight_team_shape() {
    let graph = build(8, &GenerateConfig::new(EventFormat::DoubleElimination));
    let (upper, lower, grand_final) = de_sections(&graph);

    assert_eq!(upper.len(), 3);
    assert_eq!(upper.iter().map(|r| r.match_ids.len()).sum::<usize>(), 7);
    assert_eq!(lower.len(), 5);
    assert_eq!(grand_final.len(), 1);
}

#[test]
fn test_double_elim_reset_when_lower_finalist_wins() {
    let config = GenerateConfig::new(EventFormat::DoubleElimination).with_bracket_reset(true);
    let mut graph = build(8, &config);

    // Lower-bracket side (slot B) wins the first grand final; a second
    // decisive match must appear. Slot A wins it to end the event.
    drive_to_completion(&mut graph, |m| {
        if m.section == BracketSection::GrandFinal && m.round_index == 0 {
            SlotSide::B
        } else {
            SlotSide::A
        }
    });

    let (_, _, grand_final) = de_sections(&graph);
    assert_eq!(grand_final.len(), 2, "bracket reset must be created");
    assert_eq!(grand_final[1].label, "Grand Final Reset");
    let reset = graph.get(grand_final[1].match_ids[0]).unwrap();
    assert_eq!(reset.status, MatchStatus::Completed);
    assert!(graph.is_complete);
}

#[test]
fn test_double_elim_no_reset_when_upper_finalist_wins() {
    let config = GenerateConfig::new(EventFormat::DoubleElimination).with_bracket_reset(true);
    let mut graph = build(8, &config);
    drive_to_completion(&mut graph, |_| SlotSide::A);

    let (_, _, grand_final) = de_sections(&graph);
    assert_eq!(grand_final.len(), 1, "upper finalist win ends the event");
    assert!(graph.is_complete);
}

#[test]
fn test_double_elim_reset_disabled() {
    let config = GenerateConfig::new(EventFormat::DoubleElimination).with_bracket_reset(false);
    let mut graph = build(8, &config);
    drive_to_completion(&mut graph, |m| {
        if m.section == BracketSection::GrandFinal {
            SlotSide::B
        } else {
            SlotSide::A
        }
    });

    let (_, _, grand_final) = de_sections(&graph);
    assert_eq!(grand_final.len(), 1);
    assert!(graph.is_complete);
}

#[test]
fn test_double_elim_everyone_loses_at_most_twice() {
    let mut graph = build(16, &GenerateConfig::new(EventFormat::DoubleElimination));
    drive_to_completion(&mut graph, |_| SlotSide::A);
    assert!(graph.is_complete);

    for entry in &graph.entrants {
        let losses = graph
            .matches
            .iter()
            .filter(|m| m.loser() == Some(entry.competitor_id))
            .count();
        assert!(losses <= 2, "{} lost {} times", entry.display_name, losses);
    }
}

// ============================================================================
// SWISS
// ============================================================================

#[test]
fn test_swiss_sixteen_team_round_count_and_no_rematches() {
    let mut graph = build(16, &GenerateConfig::new(EventFormat::Swiss));
    assert_eq!(graph.total_rounds, 4);

    drive_to_completion(&mut graph, |_| SlotSide::A);
    assert!(graph.is_complete);

    // No pair meets twice unless the pairing flagged a fallback.
    let mut seen = std::collections::HashSet::new();
    for m in &graph.matches {
        if let (Some(a), Some(b)) = (m.slot_a.competitor(), m.slot_b.competitor()) {
            let key = (a.min(b), a.max(b));
            if !seen.insert(key) {
                assert!(m.pairing_fallback, "unflagged rematch {:?}", key);
            }
        }
    }
}

#[test]
fn test_swiss_standings_idempotent_after_play() {
    let mut graph = build(8, &GenerateConfig::new(EventFormat::Swiss));
    drive_to_completion(&mut graph, |_| SlotSide::A);

    let first = podium_engine::recompute(&graph);
    let second = podium_engine::recompute(&graph);
    assert_eq!(first, second);
    assert_eq!(first.len(), 8);
}

// ============================================================================
// ROUND ROBIN
// ============================================================================

#[test]
fn test_round_robin_five_team_schedule() {
    let graph = build(5, &GenerateConfig::new(EventFormat::RoundRobin));
    assert_eq!(graph.total_rounds, 5);
    assert_eq!(graph.total_matches(), 10);
}

#[test]
fn test_round_robin_completes_and_ranks() {
    let mut graph = build(5, &GenerateConfig::new(EventFormat::RoundRobin));
    // Lower competitor id always wins: seed order becomes the table.
    drive_to_completion(&mut graph, |m| {
        let a = m.slot_a.competitor().unwrap();
        let b = m.slot_b.competitor().unwrap();
        if a < b {
            SlotSide::A
        } else {
            SlotSide::B
        }
    });
    assert!(graph.is_complete);

    let rows = podium_engine::recompute(&graph);
    let order: Vec<u64> = rows.iter().map(|r| r.competitor_id.0).collect();
    assert_eq!(order, vec![1, 2, 3, 4, 5]);
    assert_eq!(rows[0].wins, 4);
    assert_eq!(rows[4].losses, 4);
}

// ============================================================================
// CONCURRENCY CONTROL
// ============================================================================

#[test]
fn test_stale_version_rejected_without_mutation() {
    let mut graph = build(4, &GenerateConfig::new(EventFormat::SingleElimination));

    let ok = submit_result(&mut graph, MatchId(0), 2, 0, 0);
    assert!(ok.is_ok());

    // Same expected version again: the CAS must fail and leave the
    // first result in place.
    let err = submit_result(&mut graph, MatchId(0), 0, 2, 0).unwrap_err();
    assert!(matches!(err, BracketError::StaleVersion { current: 1, .. }));

    let m = graph.get(MatchId(0)).unwrap();
    assert_eq!((m.score_a, m.score_b), (2, 0));
    assert_eq!(m.version, 1);
}

#[test]
fn test_concurrent_submissions_exactly_one_wins() {
    let mut store = BracketStore::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let config = GenerateConfig::new(EventFormat::SingleElimination);
    store
        .generate("clash", &field(4), &config, &mut rng)
        .unwrap();

    let store = Arc::new(Mutex::new(store));
    let mut handles = Vec::new();
    for scores in [(2u8, 0u8), (0u8, 2u8)] {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            let mut store = store.lock().unwrap();
            store
                .submit_result("clash", MatchId(0), scores.0, scores.1, 0)
                .map(|outcome| (scores, outcome.updated.version))
        }));
    }
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let oks: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
    let errs: Vec<_> = results.iter().filter(|r| r.is_err()).collect();
    assert_eq!(oks.len(), 1, "exactly one submission wins the race");
    assert_eq!(errs.len(), 1);
    assert!(matches!(
        errs[0].as_ref().unwrap_err(),
        BracketError::StaleVersion { .. }
    ));

    // The surviving state is exactly the winner's input.
    let (winning_scores, _) = oks[0].as_ref().unwrap();
    let store = store.lock().unwrap();
    let m = store.get("clash").unwrap().get(MatchId(0)).unwrap();
    assert_eq!((m.score_a, m.score_b), *winning_scores);
}

// ============================================================================
// ERROR PATHS
// ============================================================================

#[test]
fn test_unknown_match_rejected() {
    let mut graph = build(4, &GenerateConfig::new(EventFormat::SingleElimination));
    assert!(matches!(
        submit_result(&mut graph, MatchId(99), 2, 0, 0),
        Err(BracketError::MatchNotFound(MatchId(99)))
    ));
}

#[test]
fn test_indecisive_score_rejected_without_mutation() {
    let mut graph = build(4, &GenerateConfig::new(EventFormat::SingleElimination));
    let err = submit_result(&mut graph, MatchId(0), 1, 1, 0).unwrap_err();
    assert!(matches!(err, BracketError::InvalidScore { .. }));

    let m = graph.get(MatchId(0)).unwrap();
    assert_eq!(m.status, MatchStatus::Ready);
    assert_eq!(m.version, 0, "failed submission must not bump the version");
}

#[test]
fn test_pending_match_rejects_results() {
    let mut graph = build(4, &GenerateConfig::new(EventFormat::SingleElimination));
    // The final still awaits both semifinals.
    let err = submit_result(&mut graph, MatchId(2), 2, 0, 0).unwrap_err();
    assert!(matches!(
        err,
        BracketError::InvalidStatusTransition {
            status: MatchStatus::Pending,
            ..
        }
    ));
}

// ============================================================================
// FORFEITS AND LIVE TRANSITIONS
// ============================================================================

#[test]
fn test_forfeit_advances_the_opponent() {
    let mut graph = build(4, &GenerateConfig::new(EventFormat::SingleElimination));
    let outcome =
        podium_engine::submit_forfeit(&mut graph, MatchId(0), SlotSide::A, 0).unwrap();
    assert_eq!(outcome.updated.status, MatchStatus::Forfeited);
    assert_eq!(outcome.updated.winner_slot, Some(SlotSide::B));

    let final_match = graph.get(MatchId(2)).unwrap();
    assert_eq!(
        final_match.slot_a.competitor(),
        outcome.updated.slot_b.competitor(),
        "the non-forfeiting side advances"
    );
}

#[test]
fn test_live_transition_and_submission() {
    let mut graph = build(4, &GenerateConfig::new(EventFormat::SingleElimination));
    let live = podium_engine::start_match(&mut graph, MatchId(0), 0).unwrap();
    assert_eq!(live.status, MatchStatus::Live);
    assert_eq!(live.version, 1);

    // Starting again is a stale CAS; submitting with the new version works.
    assert!(matches!(
        podium_engine::start_match(&mut graph, MatchId(0), 0),
        Err(BracketError::StaleVersion { .. })
    ));
    let outcome = submit_result(&mut graph, MatchId(0), 2, 1, 1).unwrap();
    assert_eq!(outcome.updated.status, MatchStatus::Completed);
}
