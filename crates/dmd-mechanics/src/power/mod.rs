//! Power effects, their combination, and the power catalog.
//!
//! A [`PowerEffect`] is the numeric contribution of one selected level of
//! one power. Effects are created when a level is chosen and replaced
//! wholesale when the choice changes. A [`PowerCombination`] folds a list
//! of effects into dice counts and healing totals.

pub mod catalog;
pub mod combination;

pub use catalog::{LevelStatistics, Power, PowerCatalog, PowerLevel};
pub use combination::{
    CombinationComparison, CombinationTotals, ConvertedRollStats, PowerCombination,
};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Lowest selectable power level.
pub const MIN_POWER_LEVEL: u8 = 1;

/// Highest selectable power level.
pub const MAX_POWER_LEVEL: u8 = 4;

/// Check that a level is within 1-4.
pub fn validate_level(level: u8) -> MechResult<u8> {
    if (MIN_POWER_LEVEL..=MAX_POWER_LEVEL).contains(&level) {
        Ok(level)
    } else {
        Err(MechError::InvalidLevel(level))
    }
}

/// The contribution of one active power level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerEffect {
    /// Name of the power.
    pub power_name: String,
    /// Selected level (1-4).
    pub level: u8,
    /// Green dice added to every roll.
    pub green_dice_added: u32,
    /// Black dice added to every roll.
    pub black_dice_added: u32,
    /// Elder signs counted as successes. `None` if the effect converts none.
    pub elder_signs_as_successes: Option<u32>,
    /// Rerolls added per roll.
    pub rerolls_added: u32,
    /// Wounds healed per turn.
    pub wounds_healed: u32,
    /// Stress healed per turn.
    pub stress_healed: u32,
    /// Whether the effect only applies under some condition.
    pub is_conditional: bool,
    /// Human-readable conditions, if any.
    pub conditions: Vec<String>,
    /// Whether this level supersedes a lower level of the same power
    /// instead of stacking with it.
    pub replaces_previous: bool,
}

impl PowerEffect {
    /// Create an effect that contributes nothing yet.
    pub fn new(power_name: impl Into<String>, level: u8) -> MechResult<Self> {
        Ok(Self {
            power_name: power_name.into(),
            level: validate_level(level)?,
            green_dice_added: 0,
            black_dice_added: 0,
            elder_signs_as_successes: None,
            rerolls_added: 0,
            wounds_healed: 0,
            stress_healed: 0,
            is_conditional: false,
            conditions: Vec::new(),
            replaces_previous: false,
        })
    }

    /// Add `count` green dice.
    pub fn with_green_dice(mut self, count: u32) -> Self {
        self.green_dice_added = count;
        self
    }

    /// Add `count` black dice.
    pub fn with_black_dice(mut self, count: u32) -> Self {
        self.black_dice_added = count;
        self
    }

    /// Count elder signs as successes.
    pub fn with_elder_conversion(mut self, count: Option<u32>) -> Self {
        self.elder_signs_as_successes = count;
        self
    }

    /// Add `count` rerolls.
    pub fn with_rerolls(mut self, count: u32) -> Self {
        self.rerolls_added = count;
        self
    }

    /// Heal `wounds` wounds and `stress` stress per turn.
    pub fn with_healing(mut self, wounds: u32, stress: u32) -> Self {
        self.wounds_healed = wounds;
        self.stress_healed = stress;
        self
    }

    /// Attach a condition. Marks the effect conditional.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.is_conditional = true;
        self.conditions.push(condition.into());
        self
    }

    /// Mark the effect as superseding a lower level of the same power.
    pub fn replacing(mut self) -> Self {
        self.replaces_previous = true;
        self
    }
}

impl std::fmt::Display for PowerEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (level {})", self.power_name, self.level)
    }
}
