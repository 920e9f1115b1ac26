//! The power catalog: per-level statistics for every power.
//!
//! The catalog is produced elsewhere (usually a `common_powers.json`
//! export) and consumed here as already-derived numbers. Lookup is the
//! only validation point: a missing power or level is reported to the
//! caller and never replaced by a default level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{PowerEffect, validate_level};
use crate::error::{MechError, MechResult};

/// Numeric statistics for one power level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelStatistics {
    /// Green dice added.
    pub green_dice_added: u32,
    /// Black dice added.
    pub black_dice_added: u32,
    /// Elder signs that count as successes.
    pub elder_signs_as_successes: Option<u32>,
    /// Rerolls added.
    pub rerolls_added: u32,
    /// Wounds healed.
    pub wounds_healed: u32,
    /// Stress healed.
    pub stress_healed: u32,
    /// Whether the level only applies under a condition.
    pub is_conditional: bool,
    /// Condition descriptions.
    pub conditions: Vec<String>,
    /// Whether the level replaces the previous one instead of stacking.
    pub replaces_previous: bool,
}

/// One level of a power.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerLevel {
    /// Level number (1-4).
    pub level: u8,
    /// Rules text, kept for display only.
    #[serde(default)]
    pub description: String,
    /// Derived numbers for this level.
    #[serde(default)]
    pub statistics: LevelStatistics,
}

impl PowerLevel {
    /// Turn this level into the effect it has when selected.
    pub fn to_effect(&self, power_name: &str) -> MechResult<PowerEffect> {
        let stats = &self.statistics;
        Ok(PowerEffect {
            power_name: power_name.to_string(),
            level: validate_level(self.level)?,
            green_dice_added: stats.green_dice_added,
            black_dice_added: stats.black_dice_added,
            elder_signs_as_successes: stats.elder_signs_as_successes,
            rerolls_added: stats.rerolls_added,
            wounds_healed: stats.wounds_healed,
            stress_healed: stats.stress_healed,
            is_conditional: stats.is_conditional,
            conditions: stats.conditions.clone(),
            replaces_previous: stats.replaces_previous,
        })
    }
}

/// A power and all its levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Power {
    /// Power name (e.g. "Marksman").
    pub name: String,
    /// Available levels.
    pub levels: Vec<PowerLevel>,
}

impl Power {
    /// Find a level by number.
    pub fn level(&self, level: u8) -> Option<&PowerLevel> {
        self.levels.iter().find(|l| l.level == level)
    }
}

/// All known powers, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PowerCatalog {
    powers: BTreeMap<String, Power>,
}

impl PowerCatalog {
    /// Build a catalog from a list of powers. Later duplicates replace
    /// earlier ones.
    pub fn from_powers(powers: impl IntoIterator<Item = Power>) -> Self {
        Self {
            powers: powers.into_iter().map(|p| (p.name.clone(), p)).collect(),
        }
    }

    /// Decode a catalog from a JSON array of powers.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let powers: Vec<Power> = serde_json::from_str(json)?;
        Ok(Self::from_powers(powers))
    }

    /// Look up a power by name.
    pub fn get(&self, name: &str) -> Option<&Power> {
        self.powers.get(name)
    }

    /// Names of all powers, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.powers.keys().map(String::as_str)
    }

    /// Number of powers in the catalog.
    pub fn len(&self) -> usize {
        self.powers.len()
    }

    /// Returns true if the catalog holds no powers.
    pub fn is_empty(&self) -> bool {
        self.powers.is_empty()
    }

    /// Resolve a power name and level into an effect.
    pub fn effect(&self, name: &str, level: u8) -> MechResult<PowerEffect> {
        validate_level(level)?;
        let power = self
            .get(name)
            .ok_or_else(|| MechError::UnknownPower(name.to_string()))?;
        let entry = power.level(level).ok_or_else(|| MechError::UnknownLevel {
            power: name.to_string(),
            level,
        })?;
        entry.to_effect(&power.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "name": "Marksman",
            "levels": [
                {"level": 1, "description": "Gain 1 green die when attacking at range",
                 "statistics": {"green_dice_added": 1, "is_conditional": true,
                                "conditions": ["ranged attack"]}},
                {"level": 2, "statistics": {"green_dice_added": 2}}
            ]
        },
        {
            "name": "Arcane Mastery",
            "levels": [
                {"level": 1, "statistics": {"elder_signs_as_successes": 1}},
                {"level": 3, "statistics": {"green_dice_added": 2, "replaces_previous": true}}
            ]
        }
    ]"#;

    #[test]
    fn decode_and_resolve() {
        let catalog = PowerCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let e = catalog.effect("Marksman", 1).unwrap();
        assert_eq!(e.power_name, "Marksman");
        assert_eq!(e.level, 1);
        assert_eq!(e.green_dice_added, 1);
        assert!(e.is_conditional);
        assert_eq!(e.conditions, vec!["ranged attack".to_string()]);
    }

    #[test]
    fn missing_statistics_default_to_zero() {
        let catalog = PowerCatalog::from_json(CATALOG).unwrap();
        let e = catalog.effect("Arcane Mastery", 1).unwrap();
        assert_eq!(e.green_dice_added, 0);
        assert_eq!(e.elder_signs_as_successes, Some(1));
        assert!(!e.replaces_previous);

        let e = catalog.effect("Arcane Mastery", 3).unwrap();
        assert!(e.replaces_previous);
    }

    #[test]
    fn unknown_power() {
        let catalog = PowerCatalog::from_json(CATALOG).unwrap();
        let err = catalog.effect("Swiftness", 1).unwrap_err();
        assert!(matches!(err, MechError::UnknownPower(ref n) if n == "Swiftness"));
        assert!(err.is_configuration());
    }

    #[test]
    fn unknown_level_is_not_defaulted() {
        let catalog = PowerCatalog::from_json(CATALOG).unwrap();
        let err = catalog.effect("Arcane Mastery", 2).unwrap_err();
        assert!(matches!(err, MechError::UnknownLevel { level: 2, .. }));
    }

    #[test]
    fn out_of_range_level() {
        let catalog = PowerCatalog::from_json(CATALOG).unwrap();
        assert!(matches!(
            catalog.effect("Marksman", 9),
            Err(MechError::InvalidLevel(9))
        ));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(
            PowerCatalog::from_json("{not json"),
            Err(MechError::InvalidCatalog(_))
        ));
    }

    #[test]
    fn names_sorted() {
        let catalog = PowerCatalog::from_json(CATALOG).unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(names, vec!["Arcane Mastery", "Marksman"]);
        assert!(!catalog.is_empty());
        assert!(PowerCatalog::default().is_empty());
    }
}
