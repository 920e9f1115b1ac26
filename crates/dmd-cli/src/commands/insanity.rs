use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dmd_mechanics::InsanityTrack;

use super::load_config;

pub fn run(
    start: Option<u32>,
    stop_at_checkpoint: bool,
    batches: &[u32],
    config: Option<&Path>,
) -> Result<(), String> {
    let config = load_config(config)?;
    let mut track = InsanityTrack::from_layout(&config.insanity).map_err(|e| e.to_string())?;
    if let Some(position) = start {
        track.set_position(position);
    }

    println!("  Start: {track}");

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        "Batch",
        "Tentacles",
        "Applied",
        "Position",
        "Checkpoint",
        "Bonus dice",
        "State",
    ]);

    for (i, &count) in batches.iter().enumerate() {
        let outcome = track.apply_tentacles(count, stop_at_checkpoint);
        let checkpoint = outcome
            .checkpoint_ordinal
            .map_or_else(|| "-".to_string(), |n| format!("#{n}"));
        let state = if track.is_dead() { "dead" } else { "alive" };
        table.add_row(vec![
            (i + 1).to_string(),
            count.to_string(),
            outcome.applied.to_string(),
            outcome.position.to_string(),
            checkpoint,
            track.bonus_dice().to_string(),
            state.to_string(),
        ]);
    }
    println!("{table}");

    println!("  End: {track}");
    if track.is_dead() {
        println!("  {}", "The investigator has gone insane.".red().bold());
    } else if let Some(n) = track.tentacles_until_next_checkpoint() {
        println!("  {n} tentacles to the next checkpoint");
    }
    Ok(())
}
