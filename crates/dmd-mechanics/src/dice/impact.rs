//! Before/after comparison for powers that add green dice.

use serde::Serialize;

use super::stats::{CombinedRollStats, combined_stats};

/// Percentage gain in expected successes above which an improvement is
/// considered significant.
pub const SIGNIFICANT_IMPROVEMENT_PERCENT: f64 = 10.0;

/// How adding dice changes a roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PowerImpact {
    /// The roll without the power.
    pub base: CombinedRollStats,
    /// The roll with the power's dice added.
    pub enhanced: CombinedRollStats,
}

/// Compare a base roll with the same roll plus `adds_green` green dice.
pub fn power_impact(base_black: u32, base_green: u32, adds_green: u32) -> PowerImpact {
    PowerImpact {
        base: combined_stats(base_black, base_green),
        enhanced: combined_stats(base_black, base_green.saturating_add(adds_green)),
    }
}

impl PowerImpact {
    /// Absolute gain in expected successes.
    pub fn expected_successes_increase(&self) -> f64 {
        self.enhanced.expected_successes() - self.base.expected_successes()
    }

    /// Relative gain in expected successes, in percent. Zero when the
    /// base roll expects no successes.
    pub fn expected_successes_percent_increase(&self) -> f64 {
        let base = self.base.expected_successes();
        if base > 0.0 {
            self.expected_successes_increase() / base * 100.0
        } else {
            0.0
        }
    }

    /// Gain in the theoretical maximum number of successes.
    pub fn max_successes_increase(&self) -> i64 {
        i64::from(self.enhanced.max_possible_successes())
            - i64::from(self.base.max_possible_successes())
    }

    /// Number of dice the power adds.
    pub fn total_dice_increase(&self) -> i64 {
        i64::from(self.enhanced.total_dice()) - i64::from(self.base.total_dice())
    }

    /// Expected tentacles on the enhanced roll.
    pub fn tentacle_risk(&self) -> f64 {
        self.enhanced.expected_tentacles()
    }

    /// True if expected successes improve by more than 10%.
    pub fn is_significant_improvement(&self) -> bool {
        self.expected_successes_percent_increase() > SIGNIFICANT_IMPROVEMENT_PERCENT
    }
}

impl std::fmt::Display for PowerImpact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Base: {}", self.base)?;
        writeln!(f, "Enhanced: {}", self.enhanced)?;
        write!(
            f,
            "Improvement: +{:.2} successes ({:.1}%), +{} max successes",
            self.expected_successes_increase(),
            self.expected_successes_percent_increase(),
            self.max_successes_increase(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_green_dice_on_base_roll() {
        let impact = power_impact(3, 0, 2);
        assert_eq!(impact.expected_successes_increase(), 1.0);
        assert!((impact.expected_successes_percent_increase() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(impact.max_successes_increase(), 2);
        assert_eq!(impact.total_dice_increase(), 2);
        assert!(impact.is_significant_improvement());
    }

    #[test]
    fn green_dice_do_not_raise_tentacle_risk() {
        let impact = power_impact(3, 0, 4);
        assert_eq!(impact.tentacle_risk(), impact.base.expected_tentacles());
    }

    #[test]
    fn zero_base_has_zero_percent() {
        let impact = power_impact(0, 0, 2);
        assert_eq!(impact.expected_successes_percent_increase(), 0.0);
        assert!(!impact.is_significant_improvement());
    }

    #[test]
    fn small_gain_is_not_significant() {
        // 20 black dice expect 10 successes; one green die adds 0.5 (5%).
        let impact = power_impact(20, 0, 1);
        assert!(!impact.is_significant_improvement());
    }

    #[test]
    fn no_dice_added() {
        let impact = power_impact(3, 1, 0);
        assert_eq!(impact.expected_successes_increase(), 0.0);
        assert_eq!(impact.total_dice_increase(), 0);
    }

    #[test]
    fn display() {
        let text = power_impact(3, 0, 2).to_string();
        assert!(text.contains("Improvement: +1.00 successes (66.7%), +2 max successes"));
    }
}
