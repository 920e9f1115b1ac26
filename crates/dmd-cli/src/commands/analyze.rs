use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use dmd_mechanics::{
    CharacterBuild, CharacterStatistics, PlayStrategy, PowerCatalog, PowerSelection, PowerSlot,
    analyze,
};
use serde::Serialize;

use super::{load_config, percent, print_json, read_file};

pub struct AnalyzeArgs<'a> {
    pub catalog: &'a Path,
    pub name: &'a str,
    pub special: Option<&'a str>,
    pub common: &'a [String],
    pub insanity: Option<u32>,
    pub damage: u32,
    pub stress: u32,
    pub config: Option<&'a Path>,
    pub json: bool,
}

#[derive(Serialize)]
struct AnalyzeReport<'a> {
    name: &'a str,
    powers: Vec<String>,
    insanity: u32,
    health: u32,
    stress: u32,
    statistics: CharacterStatistics,
    strategy: PlayStrategy,
    warnings: Vec<String>,
}

/// Parse `NAME:LEVEL`. The level follows the last colon.
fn parse_selection(slot: PowerSlot, raw: &str) -> Result<PowerSelection, String> {
    let (name, level) = raw
        .rsplit_once(':')
        .ok_or_else(|| format!("expected NAME:LEVEL, got \"{raw}\""))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing power name in \"{raw}\""));
    }
    let level: u8 = level
        .trim()
        .parse()
        .map_err(|_| format!("invalid level in \"{raw}\""))?;
    Ok(PowerSelection::new(slot, name, level))
}

fn selections(special: Option<&str>, common: &[String]) -> Result<Vec<PowerSelection>, String> {
    if common.len() > 2 {
        return Err(format!(
            "at most two common powers can be selected, got {}",
            common.len()
        ));
    }
    let mut out = Vec::new();
    if let Some(raw) = special {
        out.push(parse_selection(PowerSlot::Special, raw)?);
    }
    for (slot, raw) in [PowerSlot::FirstCommon, PowerSlot::SecondCommon]
        .into_iter()
        .zip(common)
    {
        out.push(parse_selection(slot, raw)?);
    }
    Ok(out)
}

pub fn run(args: &AnalyzeArgs<'_>) -> Result<(), String> {
    let config = load_config(args.config)?;
    let catalog = PowerCatalog::from_json(&read_file(args.catalog)?)
        .map_err(|e| format!("{}: {e}", args.catalog.display()))?;
    tracing::debug!(powers = catalog.len(), "loaded power catalog");

    let selections = selections(args.special, args.common)?;
    let (mut build, misses) = CharacterBuild::from_catalog(args.name, &selections, &catalog, &config)
        .map_err(|e| e.to_string())?;

    if let Some(position) = args.insanity {
        build.insanity.set_position(position);
    }
    build.health.take_damage(args.damage);
    build.stress.take_stress(args.stress);

    let statistics = build.statistics();
    let strategy = analyze(&statistics);
    let warnings: Vec<String> = misses.iter().map(ToString::to_string).collect();

    if args.json {
        return print_json(&AnalyzeReport {
            name: &build.name,
            powers: build.effects().map(ToString::to_string).collect(),
            insanity: build.insanity.position(),
            health: build.health.current_health(),
            stress: build.stress.stress(),
            statistics,
            strategy,
            warnings,
        });
    }

    for warning in &warnings {
        eprintln!("{} {warning}", "warning:".yellow().bold());
    }

    println!("  {}", build.name.bold());
    for slot in PowerSlot::ALL {
        let power = build
            .effect(slot)
            .map_or_else(|| "none".to_string(), ToString::to_string);
        println!("  {:<10}{power}", format!("{slot}:"));
    }
    println!("  {}  {}  {}", build.health, build.stress, build.insanity);
    if build.health.is_dead() || build.insanity.is_dead() {
        println!("  {}", "DEAD".red().bold());
    }
    println!();

    print_statistics(&statistics);
    println!();
    print_strategy(&strategy);

    Ok(())
}

fn print_statistics(stats: &CharacterStatistics) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Statistic", "Value"]);

    let rows = [
        (
            "Dice",
            format!(
                "{} black + {} green ({} from insanity)",
                stats.total_black_dice, stats.total_green_dice, stats.bonus_dice_from_insanity
            ),
        ),
        (
            "Expected successes",
            format!(
                "{:.2} ({:.2} before elder signs)",
                stats.expected_successes, stats.base_expected_successes
            ),
        ),
        ("Expected tentacles", format!("{:.2}", stats.expected_tentacles)),
        ("Expected elder signs", format!("{:.2}", stats.expected_elder_signs)),
        ("At least 1 success", percent(stats.prob_at_least_1_success)),
        ("At least 1 tentacle", percent(stats.prob_at_least_1_tentacle)),
        ("At least 1 elder sign", percent(stats.prob_at_least_1_elder)),
        ("Max successes", stats.max_possible_successes.to_string()),
        (
            "Healing per turn",
            format!(
                "{} wounds, {} stress",
                stats.wounds_healed_per_turn, stats.stress_healed_per_turn
            ),
        ),
        ("Rerolls", stats.rerolls_per_roll.to_string()),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    println!("{table}");

    if stats.has_conditional_effects {
        println!("  {}", "Some effects are conditional.".dimmed());
    }
}

fn print_strategy(strategy: &PlayStrategy) {
    println!("  {} {}", "Playstyle:".bold(), strategy.playstyle);
    if !strategy.strengths.is_empty() {
        println!("  {}", "Strengths".green().bold());
        for s in &strategy.strengths {
            println!("    + {s}");
        }
    }
    if !strategy.weaknesses.is_empty() {
        println!("  {}", "Weaknesses".red().bold());
        for w in &strategy.weaknesses {
            println!("    - {w}");
        }
    }
}
