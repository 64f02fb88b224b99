//! Bracket simulation command
//!
//! Drives random decisive results through a freshly generated bracket
//! until it completes, printing each round as it resolves. Useful for
//! eyeballing a format's full progression without a frontend.

use crate::generate_cmd::{load_field, slot_name};
use podium_core::{BracketGraph, EventFormat, MatchId, MatchStatus, SlotSide};
use podium_engine::{generate, recompute, submit_result, GenerateConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub fn run(field_size: usize, format: &str, seed: u64) -> anyhow::Result<()> {
    let format: EventFormat = format.parse()?;
    let entries = load_field(field_size, None)?;
    let config = GenerateConfig::new(format);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut graph = generate(&entries, &config, &mut rng)?;
    println!(
        "simulating a {} event with {} teams (seed {})",
        graph.format, field_size, seed
    );

    let mut step = 0usize;
    while !graph.is_complete {
        let open: Vec<MatchId> = graph
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::Ready)
            .map(|m| m.id)
            .collect();
        anyhow::ensure!(!open.is_empty(), "bracket stalled before completion");

        for id in open {
            let (status, version, series) = {
                let m = graph.get(id).expect("open match exists");
                (m.status, m.version, m.series)
            };
            if status != MatchStatus::Ready {
                continue;
            }
            let wins = series.wins_needed();
            let loser_score = rng.gen_range(0..wins);
            let (score_a, score_b) = if rng.gen_bool(0.5) {
                (wins, loser_score)
            } else {
                (loser_score, wins)
            };
            let outcome = submit_result(&mut graph, id, score_a, score_b, version)?;
            let m = &outcome.updated;
            println!(
                "  {} {}-{}  {} over {}",
                m.id,
                m.score_a,
                m.score_b,
                slot_name(&graph, m.slot(m.winner_slot.unwrap_or(SlotSide::A))),
                slot_name(&graph, m.slot(m.loser_slot().unwrap_or(SlotSide::B))),
            );
        }
        step += 1;
        anyhow::ensure!(step < 1024, "progression did not converge");
    }

    report(&graph);
    Ok(())
}

fn report(graph: &BracketGraph) {
    match graph.format {
        EventFormat::Swiss | EventFormat::RoundRobin => {
            println!("final standings:");
            for (place, row) in recompute(graph).iter().enumerate() {
                let name = graph
                    .display_name(row.competitor_id)
                    .unwrap_or("unknown");
                println!(
                    "  {:>2}. {:<12} {}-{}  diff {:+}  buchholz {}",
                    place + 1,
                    name,
                    row.wins,
                    row.losses,
                    row.map_win_differential,
                    row.buchholz_score
                );
            }
        }
        _ => {
            let champion = graph
                .matches
                .iter()
                .filter(|m| m.status.is_terminal())
                .last()
                .and_then(|m| m.winner())
                .and_then(|id| graph.display_name(id));
            match champion {
                Some(name) => println!("champion: {}", name),
                None => println!("no champion decided"),
            }
        }
    }
}
