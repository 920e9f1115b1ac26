//! Engine configuration: base dice and track layouts.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::power::combination::{BASE_BLACK_DICE, BASE_GREEN_DICE};
use crate::sheet::vitals::{DEFAULT_MAX_HEALTH, DEFAULT_MAX_STRESS};

/// Layout of the insanity track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InsanityLayout {
    /// Last survivable position. Reaching `max_insanity + 1` is death.
    pub max_insanity: u32,
    /// Checkpoint positions, strictly ascending.
    pub checkpoints: Vec<u32>,
    /// 1-based ordinals of the checkpoints that grant a green die.
    pub bonus_ordinals: Vec<usize>,
    /// Position a new investigator starts on.
    pub starting_position: u32,
}

impl Default for InsanityLayout {
    fn default() -> Self {
        Self {
            max_insanity: 20,
            checkpoints: vec![5, 9, 13, 16, 19, 20],
            bonus_ordinals: vec![2, 4, 6],
            starting_position: 1,
        }
    }
}

impl InsanityLayout {
    /// Position at which the investigator goes insane and dies.
    pub fn death_threshold(&self) -> u32 {
        self.max_insanity.saturating_add(1)
    }

    /// Check that the layout describes a usable track.
    pub fn validate(&self) -> MechResult<()> {
        if self.max_insanity == 0 {
            return Err(MechError::InvalidConfig(
                "max_insanity must be at least 1".to_string(),
            ));
        }
        if !self.checkpoints.windows(2).all(|w| w[0] < w[1]) {
            return Err(MechError::InvalidConfig(format!(
                "checkpoints must be strictly ascending: {:?}",
                self.checkpoints
            )));
        }
        if let Some(bad) = self
            .checkpoints
            .iter()
            .find(|&&p| p < 1 || p > self.max_insanity)
        {
            return Err(MechError::InvalidConfig(format!(
                "checkpoint {bad} is outside 1-{}",
                self.max_insanity
            )));
        }
        if let Some(bad) = self
            .bonus_ordinals
            .iter()
            .find(|&&o| o < 1 || o > self.checkpoints.len())
        {
            return Err(MechError::InvalidConfig(format!(
                "bonus ordinal {bad} does not name a checkpoint"
            )));
        }
        if self.starting_position < 1 || self.starting_position > self.death_threshold() {
            return Err(MechError::InvalidConfig(format!(
                "starting position {} is outside 1-{}",
                self.starting_position,
                self.death_threshold()
            )));
        }
        Ok(())
    }
}

/// Configuration for building characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Black dice rolled before powers.
    pub base_black_dice: u32,
    /// Green dice rolled before powers and checkpoints.
    pub base_green_dice: u32,
    /// Wounds at which an investigator dies.
    pub max_health: u32,
    /// Stress capacity.
    pub max_stress: u32,
    /// Insanity track layout.
    pub insanity: InsanityLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_black_dice: BASE_BLACK_DICE,
            base_green_dice: BASE_GREEN_DICE,
            max_health: DEFAULT_MAX_HEALTH,
            max_stress: DEFAULT_MAX_STRESS,
            insanity: InsanityLayout::default(),
        }
    }
}

impl EngineConfig {
    /// Decode a configuration from a JSON object. Missing fields take
    /// defaults; unknown fields and non-object input are rejected.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        if !value.is_object() {
            return Err(MechError::InvalidConfig(
                "expected a JSON object".to_string(),
            ));
        }
        if !value.get("insanity").is_none_or(serde_json::Value::is_object) {
            return Err(MechError::InvalidConfig(
                "insanity must be a JSON object".to_string(),
            ));
        }
        let config: Self =
            serde_json::from_value(value).map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Set the base dice.
    pub fn with_base_dice(mut self, black: u32, green: u32) -> Self {
        self.base_black_dice = black;
        self.base_green_dice = green;
        self
    }

    /// Set the health death threshold.
    pub fn with_max_health(mut self, max_health: u32) -> Self {
        self.max_health = max_health;
        self
    }

    /// Set the stress capacity.
    pub fn with_max_stress(mut self, max_stress: u32) -> Self {
        self.max_stress = max_stress;
        self
    }

    /// Set the insanity layout.
    pub fn with_insanity(mut self, layout: InsanityLayout) -> Self {
        self.insanity = layout;
        self
    }

    /// Check the whole configuration.
    pub fn validate(&self) -> MechResult<()> {
        if self.max_health == 0 {
            return Err(MechError::InvalidConfig(
                "max_health must be at least 1".to_string(),
            ));
        }
        self.insanity.validate()
    }
}
