//! Character builds: selected powers, tracks, and derived statistics.
//!
//! A [`CharacterBuild`] owns one effect per power slot and the three
//! tracks. Statistics are recomputed from that state on every call and
//! never cached, so they always match the current selection and tracks.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{MechError, MechResult};
use crate::power::{PowerCatalog, PowerCombination, PowerEffect};
use crate::sheet::{HealthTrack, InsanityTrack, StressTrack};

/// A slot a power can be selected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerSlot {
    /// The investigator's unique power.
    Special,
    /// The first common power.
    FirstCommon,
    /// The second common power.
    SecondCommon,
}

impl PowerSlot {
    /// All slots, in effect order.
    pub const ALL: [PowerSlot; 3] = [
        PowerSlot::Special,
        PowerSlot::FirstCommon,
        PowerSlot::SecondCommon,
    ];

    fn index(self) -> usize {
        match self {
            Self::Special => 0,
            Self::FirstCommon => 1,
            Self::SecondCommon => 2,
        }
    }
}

impl std::fmt::Display for PowerSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Special => write!(f, "Special"),
            Self::FirstCommon => write!(f, "Common 1"),
            Self::SecondCommon => write!(f, "Common 2"),
        }
    }
}

/// A caller's choice of power and level for one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerSelection {
    /// Slot to fill.
    pub slot: PowerSlot,
    /// Catalog name of the power.
    pub power: String,
    /// Level to use (1-4).
    pub level: u8,
}

impl PowerSelection {
    /// Create a selection.
    pub fn new(slot: PowerSlot, power: impl Into<String>, level: u8) -> Self {
        Self {
            slot,
            power: power.into(),
            level,
        }
    }
}

/// Complete statistics for a character build.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CharacterStatistics {
    /// Black dice per roll.
    pub total_black_dice: u32,
    /// Green dice per roll, checkpoint bonus included.
    pub total_green_dice: u32,
    /// All dice per roll.
    pub total_dice: u32,
    /// Green dice granted by insanity checkpoints.
    pub bonus_dice_from_insanity: u32,
    /// Expected successes with elder sign conversion applied.
    pub expected_successes: f64,
    /// Expected successes before elder sign conversion.
    pub base_expected_successes: f64,
    /// Expected tentacles per roll.
    pub expected_tentacles: f64,
    /// Expected elder signs per roll.
    pub expected_elder_signs: f64,
    /// Chance of at least one success.
    pub prob_at_least_1_success: f64,
    /// Chance of at least one tentacle.
    pub prob_at_least_1_tentacle: f64,
    /// Chance of at least one elder sign.
    pub prob_at_least_1_elder: f64,
    /// Most successes one roll can produce.
    pub max_possible_successes: u32,
    /// Expected elder signs counted as successes.
    pub elder_signs_converted_to_successes: f64,
    /// Wounds healed per turn.
    pub wounds_healed_per_turn: u32,
    /// Stress healed per turn.
    pub stress_healed_per_turn: u32,
    /// Rerolls per roll.
    pub rerolls_per_roll: u32,
    /// Whether any active effect is conditional.
    pub has_conditional_effects: bool,
}

/// A character with selected powers and live tracks.
#[derive(Debug, Clone)]
pub struct CharacterBuild {
    /// Character name.
    pub name: String,
    slots: [Option<PowerEffect>; 3],
    base_black_dice: u32,
    base_green_dice: u32,
    /// Insanity marker.
    pub insanity: InsanityTrack,
    /// Wounds taken.
    pub health: HealthTrack,
    /// Stress taken.
    pub stress: StressTrack,
}

impl CharacterBuild {
    /// Create a build from already-resolved effects, one per slot.
    pub fn new(
        name: impl Into<String>,
        effects: impl IntoIterator<Item = (PowerSlot, PowerEffect)>,
        config: &EngineConfig,
    ) -> MechResult<Self> {
        config.validate()?;
        let mut build = Self {
            name: name.into(),
            slots: [None, None, None],
            base_black_dice: config.base_black_dice,
            base_green_dice: config.base_green_dice,
            insanity: InsanityTrack::from_layout(&config.insanity)?,
            health: HealthTrack::new(config.max_health),
            stress: StressTrack::new(config.max_stress),
        };
        for (slot, effect) in effects {
            build.set_effect(slot, Some(effect));
        }
        Ok(build)
    }

    /// Resolve selections against a catalog and create the build.
    ///
    /// Selections that cannot be resolved leave their slot empty and are
    /// returned alongside the build. An invalid configuration is a hard
    /// error.
    pub fn from_catalog(
        name: impl Into<String>,
        selections: &[PowerSelection],
        catalog: &PowerCatalog,
        config: &EngineConfig,
    ) -> MechResult<(Self, Vec<MechError>)> {
        let mut effects = Vec::new();
        let mut misses = Vec::new();
        for selection in selections {
            match catalog.effect(&selection.power, selection.level) {
                Ok(effect) => effects.push((selection.slot, effect)),
                Err(err) => {
                    tracing::warn!(
                        slot = %selection.slot,
                        power = %selection.power,
                        level = selection.level,
                        error = %err,
                        "power selection skipped"
                    );
                    misses.push(err);
                }
            }
        }
        let build = Self::new(name, effects, config)?;
        Ok((build, misses))
    }

    /// Replace the effect in a slot. `None` clears it.
    pub fn set_effect(&mut self, slot: PowerSlot, effect: Option<PowerEffect>) {
        self.slots[slot.index()] = effect;
    }

    /// The effect in a slot, if any.
    pub fn effect(&self, slot: PowerSlot) -> Option<&PowerEffect> {
        self.slots[slot.index()].as_ref()
    }

    /// All active effects, in slot order.
    pub fn effects(&self) -> impl Iterator<Item = &PowerEffect> {
        self.slots.iter().flatten()
    }

    /// The active effects over base dice plus checkpoint bonus dice.
    pub fn power_combination(&self) -> PowerCombination {
        PowerCombination::new(
            self.base_black_dice,
            self.base_green_dice
                .saturating_add(self.insanity.bonus_dice()),
            self.effects().cloned().collect(),
        )
    }

    /// Compute the build's statistics from its current state.
    pub fn statistics(&self) -> CharacterStatistics {
        let combination = self.power_combination();
        let totals = combination.totals();
        let converted = combination.with_elder_conversion();
        let roll = converted.roll;

        let stats = CharacterStatistics {
            total_black_dice: totals.black,
            total_green_dice: totals.green,
            total_dice: totals.total_dice(),
            bonus_dice_from_insanity: self.insanity.bonus_dice(),
            expected_successes: converted.expected_successes,
            base_expected_successes: roll.expected_successes(),
            expected_tentacles: roll.expected_tentacles(),
            expected_elder_signs: roll.expected_elder_signs(),
            prob_at_least_1_success: roll.prob_at_least_1_success(),
            prob_at_least_1_tentacle: roll.prob_at_least_1_tentacle(),
            prob_at_least_1_elder: roll.prob_at_least_1_elder(),
            max_possible_successes: roll.max_possible_successes(),
            elder_signs_converted_to_successes: converted.converted_or_zero(),
            wounds_healed_per_turn: totals.wounds_healed,
            stress_healed_per_turn: totals.stress_healed,
            rerolls_per_roll: totals.rerolls,
            has_conditional_effects: combination.has_conditional_effects(),
        };
        tracing::trace!(character = %self.name, ?stats, "statistics recomputed");
        stats
    }
}
