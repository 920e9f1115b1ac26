use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dmd_mechanics::{CombinedRollStats, DieKind, SingleDieStats, combined_stats, single_die_stats};
use serde::Serialize;

use super::{percent, print_json};

#[derive(Serialize)]
struct DiceReport {
    black: SingleDieStats,
    green: SingleDieStats,
    roll: CombinedRollStats,
}

pub fn run(black: u32, green: u32, json: bool) -> Result<(), String> {
    let report = DiceReport {
        black: single_die_stats(DieKind::Standard),
        green: single_die_stats(DieKind::Bonus),
        roll: combined_stats(black, green),
    };

    if json {
        return print_json(&report);
    }

    let mut dice = Table::new();
    dice.set_content_arrangement(ContentArrangement::Dynamic);
    dice.set_header(vec!["Die", "Success", "Pure success", "Tentacle", "Elder sign", "Blank"]);
    for stats in [&report.black, &report.green] {
        dice.add_row(vec![
            stats.kind.to_string(),
            percent(stats.success_prob),
            percent(stats.pure_success_prob),
            percent(stats.tentacle_prob),
            percent(stats.elder_sign_prob),
            percent(stats.blank_prob),
        ]);
    }
    println!("{dice}");
    println!();

    let roll = &report.roll;
    println!(
        "  {} {} black + {} green",
        "Roll:".bold(),
        roll.black_dice,
        roll.green_dice
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Symbol", "Expected", "At least one"]);
    table.add_row(vec![
        "success".to_string(),
        format!("{:.2}", roll.expected_successes()),
        percent(roll.prob_at_least_1_success()),
    ]);
    table.add_row(vec![
        "tentacle".to_string(),
        format!("{:.2}", roll.expected_tentacles()),
        percent(roll.prob_at_least_1_tentacle()),
    ]);
    table.add_row(vec![
        "elder_sign".to_string(),
        format!("{:.2}", roll.expected_elder_signs()),
        percent(roll.prob_at_least_1_elder()),
    ]);
    println!("{table}");
    println!();
    println!("  {roll}");

    Ok(())
}
