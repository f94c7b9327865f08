use anyhow::{Context, Result};
use clap::Parser;
use game_core::{CommandJournal, EncounterSetup, ReplayResult, replay::replay_to_end};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the encounter scenario JSON file
    #[arg(short, long)]
    scenario: String,

    /// Path to the command journal JSON file to replay
    #[arg(short, long)]
    journal: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let scenario_data = fs::read_to_string(&args.scenario)
        .with_context(|| format!("Failed to read scenario file: {}", args.scenario))?;
    let setup: EncounterSetup = serde_json::from_str(&scenario_data)
        .with_context(|| "Failed to deserialize scenario JSON")?;

    let journal_data = fs::read_to_string(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal))?;
    let journal: CommandJournal = serde_json::from_str(&journal_data)
        .with_context(|| "Failed to deserialize journal JSON")?;

    let result: ReplayResult = replay_to_end(&setup, &journal)
        .map_err(|e| anyhow::anyhow!("Replay failed during execution: {:?}", e))?;

    println!("Replay complete.");
    println!("Final Turn: {}", result.final_turn);
    println!("Outcome: {:?}", result.final_outcome);
    println!("Snapshot Hash: {}", result.final_snapshot_hash);

    Ok(())
}
