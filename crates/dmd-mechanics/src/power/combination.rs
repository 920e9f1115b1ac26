//! Folding active power effects into one set of totals.
//!
//! Additive fields sum over every effect that does not replace a previous
//! level. Effects flagged `replaces_previous` contribute zero to every
//! additive total; the caller keeps at most one level per power in the
//! list. Elder sign conversion is not additive: the highest-level effect
//! that names a count wins, and on a level tie the later effect wins.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::PowerEffect;
use crate::dice::{CombinedRollStats, combined_stats};

/// Black dice every investigator rolls.
pub const BASE_BLACK_DICE: u32 = 3;

/// Green dice every investigator rolls before powers and checkpoints.
pub const BASE_GREEN_DICE: u32 = 0;

/// A set of simultaneously active power effects on top of base dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerCombination {
    /// Active effects, in selection order.
    pub effects: Vec<PowerEffect>,
    /// Black dice before any effect.
    pub base_black_dice: u32,
    /// Green dice before any effect.
    pub base_green_dice: u32,
}

impl Default for PowerCombination {
    fn default() -> Self {
        Self::new(BASE_BLACK_DICE, BASE_GREEN_DICE, Vec::new())
    }
}

/// Aggregated numbers for a [`PowerCombination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombinationTotals {
    /// Black dice rolled.
    pub black: u32,
    /// Green dice rolled.
    pub green: u32,
    /// Rerolls per roll.
    pub rerolls: u32,
    /// Wounds healed per turn.
    pub wounds_healed: u32,
    /// Stress healed per turn.
    pub stress_healed: u32,
    /// Selected elder sign conversion count, if any effect names one.
    pub elder_sign_conversion: Option<u32>,
}

impl CombinationTotals {
    /// Total dice rolled.
    pub fn total_dice(&self) -> u32 {
        self.black.saturating_add(self.green)
    }
}

/// Roll statistics with elder sign conversion applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ConvertedRollStats {
    /// The unconverted roll statistics.
    pub roll: CombinedRollStats,
    /// Expected successes once converted elder signs are counted.
    pub expected_successes: f64,
    /// Expected elder signs counted as successes, if any were converted.
    pub elder_signs_converted: Option<f64>,
}

impl ConvertedRollStats {
    /// Converted elder signs, or zero.
    pub fn converted_or_zero(&self) -> f64 {
        self.elder_signs_converted.unwrap_or(0.0)
    }
}

/// How one combination improves on another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinationComparison {
    /// Absolute gain in converted expected successes.
    pub expected_successes_increase: f64,
    /// Relative gain in converted expected successes, in percent.
    pub expected_successes_percent_increase: f64,
    /// Change in expected tentacles.
    pub tentacle_risk_change: f64,
    /// Change in elder signs converted to successes.
    pub elder_signs_increase: f64,
}

impl PowerCombination {
    /// Create a combination over the given base dice.
    pub fn new(base_black_dice: u32, base_green_dice: u32, effects: Vec<PowerEffect>) -> Self {
        Self {
            effects,
            base_black_dice,
            base_green_dice,
        }
    }

    /// Effects that stack with the rest of the list.
    fn stacking(&self) -> impl Iterator<Item = &PowerEffect> {
        self.effects.iter().filter(|e| !e.replaces_previous)
    }

    fn sum(&self, field: impl Fn(&PowerEffect) -> u32) -> u32 {
        self.stacking()
            .map(field)
            .fold(0u32, |acc, n| acc.saturating_add(n))
    }

    /// Total black dice.
    pub fn total_black_dice(&self) -> u32 {
        self.base_black_dice
            .saturating_add(self.sum(|e| e.black_dice_added))
    }

    /// Total green dice.
    pub fn total_green_dice(&self) -> u32 {
        self.base_green_dice
            .saturating_add(self.sum(|e| e.green_dice_added))
    }

    /// Total rerolls per roll.
    pub fn total_rerolls(&self) -> u32 {
        self.sum(|e| e.rerolls_added)
    }

    /// Total (wounds, stress) healed per turn.
    pub fn total_healing(&self) -> (u32, u32) {
        (self.sum(|e| e.wounds_healed), self.sum(|e| e.stress_healed))
    }

    /// Elder sign conversion count from the highest-level effect that
    /// names one. Among effects of equal level, the last in the list wins.
    pub fn elder_sign_conversion(&self) -> Option<u32> {
        let mut best: Option<&PowerEffect> = None;
        for effect in &self.effects {
            if effect.elder_signs_as_successes.is_none() {
                continue;
            }
            if best.is_none_or(|b| effect.level >= b.level) {
                best = Some(effect);
            }
        }
        best.and_then(|e| e.elder_signs_as_successes)
    }

    /// All aggregated numbers in one pass.
    pub fn totals(&self) -> CombinationTotals {
        let (wounds_healed, stress_healed) = self.total_healing();
        CombinationTotals {
            black: self.total_black_dice(),
            green: self.total_green_dice(),
            rerolls: self.total_rerolls(),
            wounds_healed,
            stress_healed,
            elder_sign_conversion: self.elder_sign_conversion(),
        }
    }

    /// Returns true if any effect only applies under a condition.
    pub fn has_conditional_effects(&self) -> bool {
        self.effects.iter().any(|e| e.is_conditional)
    }

    /// Unique conditions across all effects, sorted.
    pub fn all_conditions(&self) -> BTreeSet<String> {
        self.effects
            .iter()
            .flat_map(|e| e.conditions.iter().cloned())
            .collect()
    }

    /// Roll statistics for the combined dice counts.
    pub fn roll_stats(&self) -> CombinedRollStats {
        combined_stats(self.total_black_dice(), self.total_green_dice())
    }

    /// Roll statistics with elder signs counted as successes.
    ///
    /// The full expected elder sign count is added whether the selected
    /// effect names a fixed count or none at all; a fixed count does not
    /// cap the contribution.
    pub fn with_elder_conversion(&self) -> ConvertedRollStats {
        let roll = self.roll_stats();
        let expected_elder = roll.expected_elder_signs();
        let converts = self.elder_sign_conversion().is_some() || expected_elder > 0.0;

        let elder_signs_converted = converts.then_some(expected_elder);
        ConvertedRollStats {
            roll,
            expected_successes: roll.expected_successes() + elder_signs_converted.unwrap_or(0.0),
            elder_signs_converted,
        }
    }

    /// Compare this combination against an enhanced one.
    pub fn compare(&self, enhanced: &PowerCombination) -> CombinationComparison {
        let base = self.with_elder_conversion();
        let better = enhanced.with_elder_conversion();

        let increase = better.expected_successes - base.expected_successes;
        let percent = if base.expected_successes > 0.0 {
            increase / base.expected_successes * 100.0
        } else {
            0.0
        };

        CombinationComparison {
            expected_successes_increase: increase,
            expected_successes_percent_increase: percent,
            tentacle_risk_change: better.roll.expected_tentacles()
                - base.roll.expected_tentacles(),
            elder_signs_increase: better.converted_or_zero() - base.converted_or_zero(),
        }
    }
}
