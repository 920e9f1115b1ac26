//! Rule-based play-strategy analysis over character statistics.

use serde::{Deserialize, Serialize};

use crate::build::CharacterStatistics;

/// Broad way a character is best played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Playstyle {
    /// Many successes with little tentacle risk.
    Offensive,
    /// Sustains itself through healing.
    Defensive,
    /// Relies on rerolls.
    Utility,
    /// No dominant trait.
    Balanced,
}

impl std::fmt::Display for Playstyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Offensive => write!(f, "offensive"),
            Self::Defensive => write!(f, "defensive"),
            Self::Utility => write!(f, "utility"),
            Self::Balanced => write!(f, "balanced"),
        }
    }
}

/// Strategy summary for a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayStrategy {
    /// Recommended playstyle.
    pub playstyle: Playstyle,
    /// Strengths, most important first.
    pub strengths: Vec<String>,
    /// Weaknesses, most important first.
    pub weaknesses: Vec<String>,
}

impl PlayStrategy {
    /// The first strength, if any.
    pub fn primary_strength(&self) -> Option<&str> {
        self.strengths.first().map(String::as_str)
    }

    /// The first weakness, if any.
    pub fn primary_weakness(&self) -> Option<&str> {
        self.weaknesses.first().map(String::as_str)
    }
}

/// Analyze a build's statistics.
pub fn analyze(stats: &CharacterStatistics) -> PlayStrategy {
    PlayStrategy {
        playstyle: playstyle(stats),
        strengths: strengths(stats),
        weaknesses: weaknesses(stats),
    }
}

fn heals(stats: &CharacterStatistics) -> bool {
    stats.wounds_healed_per_turn > 0 || stats.stress_healed_per_turn > 0
}

fn playstyle(stats: &CharacterStatistics) -> Playstyle {
    if stats.expected_successes > 2.5 && stats.expected_tentacles < 1.0 {
        Playstyle::Offensive
    } else if heals(stats) {
        Playstyle::Defensive
    } else if stats.rerolls_per_roll > 0 {
        Playstyle::Utility
    } else {
        Playstyle::Balanced
    }
}

fn strengths(stats: &CharacterStatistics) -> Vec<String> {
    let rules = [
        (stats.expected_successes > 2.0, "High success rate"),
        (stats.expected_tentacles < 1.0, "Low tentacle risk"),
        (stats.total_green_dice > 0, "Green dice bonuses (safer rolls)"),
        (stats.wounds_healed_per_turn > 0, "Wound healing"),
        (stats.stress_healed_per_turn > 0, "Stress healing"),
        (stats.rerolls_per_roll > 0, "Reroll capabilities"),
        (
            stats.elder_signs_converted_to_successes > 0.0,
            "Elder sign conversion",
        ),
    ];
    collect(&rules)
}

fn weaknesses(stats: &CharacterStatistics) -> Vec<String> {
    let rules = [
        (stats.expected_successes < 1.5, "Low success rate"),
        (stats.expected_tentacles > 1.5, "High tentacle risk"),
        (
            stats.total_green_dice == 0,
            "No green dice (higher tentacle risk)",
        ),
        (!heals(stats), "No healing capabilities"),
        (stats.rerolls_per_roll == 0, "No reroll capabilities"),
    ];
    collect(&rules)
}

fn collect(rules: &[(bool, &str)]) -> Vec<String> {
    rules
        .iter()
        .filter(|(hit, _)| *hit)
        .map(|(_, label)| (*label).to_string())
        .collect()
}
