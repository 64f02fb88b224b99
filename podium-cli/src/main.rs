//! Podium CLI - Command-line interface
//!
//! Commands:
//! - generate: Build a bracket and print or dump it
//! - simulate: Play a generated bracket to completion
//! - serve: Start the HTTP API server

use clap::{Parser, Subcommand};

mod generate_cmd;
mod simulate_cmd;

#[derive(Parser)]
#[command(name = "podium")]
#[command(about = "Tournament bracket generation and progression")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bracket and print its structure
    Generate {
        /// Number of placeholder teams (ignored when --teams is given)
        #[arg(long, default_value = "8")]
        field_size: usize,
        /// JSON file with [{id, name, rating?}, ...]
        #[arg(long)]
        teams: Option<String>,
        #[arg(long, default_value = "single_elimination")]
        format: String,
        #[arg(long, default_value = "manual")]
        policy: String,
        /// RNG seed for the random seeding policy
        #[arg(long)]
        seed: Option<u64>,
        /// Write the full graph as JSON to this path
        #[arg(long)]
        output: Option<String>,
    },
    /// Generate a bracket and drive random results through it
    Simulate {
        #[arg(long, default_value = "8")]
        field_size: usize,
        #[arg(long, default_value = "single_elimination")]
        format: String,
        #[arg(long, default_value = "42")]
        seed: u64,
    },
    /// Start the bracket API server
    Serve {
        #[arg(long, default_value = "8012")]
        port: u16,
    },
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            field_size,
            teams,
            format,
            policy,
            seed,
            output,
        } => generate_cmd::run(field_size, teams, &format, &policy, seed, output),
        Commands::Simulate {
            field_size,
            format,
            seed,
        } => simulate_cmd::run(field_size, &format, seed),
        Commands::Serve { port } => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(podium_server::run_server(podium_server::ServerConfig {
                port,
            }))
        }
    }
}
