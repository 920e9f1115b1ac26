use colored::Colorize;
use dmd_mechanics::power_impact;
use serde::Serialize;

use super::print_json;

#[derive(Serialize)]
struct ImpactReport {
    expected_successes_increase: f64,
    expected_successes_percent_increase: f64,
    max_successes_increase: i64,
    total_dice_increase: i64,
    tentacle_risk: f64,
    is_significant_improvement: bool,
}

pub fn run(black: u32, green: u32, add: u32, json: bool) -> Result<(), String> {
    let impact = power_impact(black, green, add);

    if json {
        return print_json(&ImpactReport {
            expected_successes_increase: impact.expected_successes_increase(),
            expected_successes_percent_increase: impact.expected_successes_percent_increase(),
            max_successes_increase: impact.max_successes_increase(),
            total_dice_increase: impact.total_dice_increase(),
            tentacle_risk: impact.tentacle_risk(),
            is_significant_improvement: impact.is_significant_improvement(),
        });
    }

    println!("{impact}");
    println!("Tentacle risk: {:.2} expected", impact.tentacle_risk());
    if impact.is_significant_improvement() {
        println!("{}", "Significant improvement".green().bold());
    } else {
        println!("{}", "Minor improvement".dimmed());
    }
    Ok(())
}
