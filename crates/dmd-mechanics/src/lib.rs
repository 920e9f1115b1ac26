//! Dice probability and character-build statistics for Death May Die.
//!
//! Provides exact single-die and combined-roll probabilities for the
//! black and green dice, power effects and their combination, the
//! insanity, health, and stress tracks, and derived character statistics
//! with a rule-based play-strategy summary. Everything is computed in
//! closed form; nothing here rolls dice.

pub mod build;
pub mod config;
pub mod dice;
pub mod error;
pub mod power;
pub mod sheet;
pub mod strategy;

pub use build::{CharacterBuild, CharacterStatistics, PowerSelection, PowerSlot};
pub use config::{EngineConfig, InsanityLayout};
pub use dice::{
    CombinedRollStats, DieKind, PowerImpact, SingleDieStats, Symbol, combined_stats,
    power_impact, single_die_stats,
};
pub use error::{MechError, MechResult};
pub use power::{PowerCatalog, PowerCombination, PowerEffect};
pub use sheet::{HealthTrack, InsanityTrack, StressTrack, TentacleOutcome, ThresholdTrack};
pub use strategy::{PlayStrategy, Playstyle, analyze};
