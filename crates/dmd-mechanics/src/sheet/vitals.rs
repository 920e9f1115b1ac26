//! Health and stress tracks.

use serde::{Deserialize, Serialize};

use super::ThresholdTrack;
use super::track::Track;
use crate::error::MechResult;

/// Default number of wounds that kills an investigator.
pub const DEFAULT_MAX_HEALTH: u32 = 5;

/// Default stress capacity.
pub const DEFAULT_MAX_STRESS: u32 = 3;

/// Wounds taken, from zero up to the death threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTrack {
    wounds: Track,
}

impl Default for HealthTrack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEALTH)
    }
}

impl HealthTrack {
    /// An unhurt investigator who dies at `death_threshold` wounds.
    pub fn new(death_threshold: u32) -> Self {
        Self {
            wounds: Track::new("Wounds", death_threshold),
        }
    }

    /// Start with some damage already taken (clamped).
    pub fn with_damage(mut self, damage_taken: u32) -> Self {
        self.wounds.set(damage_taken);
        self
    }

    /// Take up to `amount` wounds. Returns the wounds actually taken.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.wounds.raise(amount)
    }

    /// Heal up to `amount` wounds. Returns the wounds actually healed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.wounds.lower(amount)
    }

    /// Wounds taken so far.
    pub fn damage_taken(&self) -> u32 {
        self.wounds.value()
    }

    /// Remaining health.
    pub fn current_health(&self) -> u32 {
        self.wounds.max().saturating_sub(self.wounds.value())
    }

    /// Wounds at which the investigator dies.
    pub fn death_threshold(&self) -> u32 {
        self.wounds.max()
    }

    /// Returns true once damage reaches the death threshold.
    pub fn is_dead(&self) -> bool {
        self.wounds.is_full()
    }
}

impl ThresholdTrack for HealthTrack {
    fn value(&self) -> u32 {
        self.damage_taken()
    }

    fn threshold(&self) -> u32 {
        self.death_threshold()
    }

    fn check_invariants(&self) -> MechResult<()> {
        self.wounds.check_invariants()
    }
}

impl std::fmt::Display for HealthTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Health: {}/{}", self.current_health(), self.death_threshold())
    }
}

/// Stress accumulated, from zero up to capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StressTrack {
    stress: Track,
}

impl Default for StressTrack {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STRESS)
    }
}

impl StressTrack {
    /// A calm investigator with the given stress capacity.
    pub fn new(max_stress: u32) -> Self {
        Self {
            stress: Track::new("Stress", max_stress),
        }
    }

    /// Start with some stress already taken (clamped).
    pub fn with_stress(mut self, stress: u32) -> Self {
        self.stress.set(stress);
        self
    }

    /// Gain up to `amount` stress. Returns the stress actually gained.
    pub fn take_stress(&mut self, amount: u32) -> u32 {
        self.stress.raise(amount)
    }

    /// Remove up to `amount` stress. Returns the stress actually removed.
    pub fn heal(&mut self, amount: u32) -> u32 {
        self.stress.lower(amount)
    }

    /// Current stress.
    pub fn stress(&self) -> u32 {
        self.stress.value()
    }

    /// Stress capacity.
    pub fn max_stress(&self) -> u32 {
        self.stress.max()
    }

    /// Returns true when no more stress can be taken.
    pub fn is_maxed(&self) -> bool {
        self.stress.is_full()
    }
}

impl ThresholdTrack for StressTrack {
    fn value(&self) -> u32 {
        self.stress()
    }

    fn threshold(&self) -> u32 {
        self.max_stress()
    }

    fn check_invariants(&self) -> MechResult<()> {
        self.stress.check_invariants()
    }
}

impl std::fmt::Display for StressTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.stress)
    }
}
