//! Bracket generation command

use anyhow::Context;
use podium_core::{BracketGraph, CompetitorId, EventFormat, Round, SeedEntry, SlotRef};
use podium_engine::{generate, GenerateConfig, SeedingPolicy};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize)]
struct TeamFileEntry {
    id: u64,
    name: String,
    #[serde(default)]
    rating: Option<u32>,
}

/// Load a field from a JSON file, or make up a placeholder one.
pub fn load_field(field_size: usize, teams_path: Option<&str>) -> anyhow::Result<Vec<SeedEntry>> {
    match teams_path {
        Some(path) => {
            let content = std::fs::read_to_string(Path::new(path))
                .with_context(|| format!("reading teams file {}", path))?;
            let teams: Vec<TeamFileEntry> =
                serde_json::from_str(&content).context("parsing teams file")?;
            Ok(teams
                .into_iter()
                .enumerate()
                .map(|(i, t)| SeedEntry {
                    competitor_id: CompetitorId(t.id),
                    display_name: t.name,
                    seed_rank: i as u32 + 1,
                    rating: t.rating,
                })
                .collect())
        }
        None => Ok((1..=field_size)
            .map(|i| SeedEntry::new(CompetitorId(i as u64), format!("Team {}", i), i as u32))
            .collect()),
    }
}

pub fn build(
    entries: &[SeedEntry],
    format: &str,
    policy: &str,
    seed: Option<u64>,
) -> anyhow::Result<BracketGraph> {
    let format: EventFormat = format.parse()?;
    let policy: SeedingPolicy = policy.parse()?;
    let config = GenerateConfig::new(format).with_seeding(policy);
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    Ok(generate(entries, &config, &mut rng)?)
}

pub fn run(
    field_size: usize,
    teams_path: Option<String>,
    format: &str,
    policy: &str,
    seed: Option<u64>,
    output: Option<String>,
) -> anyhow::Result<()> {
    let entries = load_field(field_size, teams_path.as_deref())?;
    let graph = build(&entries, format, policy, seed)?;

    println!(
        "{} bracket: {} teams, {} matches, {} rounds",
        graph.format,
        graph.entrants.len(),
        graph.total_matches(),
        graph.total_rounds
    );
    for rounds in graph.sections.round_lists() {
        print_rounds(&graph, rounds);
    }

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&graph)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path))?;
        tracing::info!("bracket written to {}", path);
    }
    Ok(())
}

pub fn print_rounds(graph: &BracketGraph, rounds: &[Round]) {
    for round in rounds {
        println!("  {}", round.label);
        for &id in &round.match_ids {
            let Some(m) = graph.get(id) else { continue };
            println!(
                "    {}: {} vs {}",
                m.id,
                slot_name(graph, m.slot_a),
                slot_name(graph, m.slot_b),
            );
        }
    }
}

pub fn slot_name(graph: &BracketGraph, slot: SlotRef) -> String {
    match slot {
        SlotRef::Competitor(id) => graph
            .display_name(id)
            .unwrap_or("unknown")
            .to_string(),
        SlotRef::Awaiting(match_id) => format!("(winner of {})", match_id),
        SlotRef::Bye => "(bye)".to_string(),
    }
}
