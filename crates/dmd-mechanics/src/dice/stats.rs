//! Exact per-die and per-roll probabilities.
//!
//! Everything here is a pure function of the die definitions and the
//! dice counts. Expected values are linear in the counts; "at least one"
//! probabilities treat each die as independent.

use serde::{Deserialize, Serialize};

use super::{DieKind, Symbol};

/// Probabilities for a single die of one kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SingleDieStats {
    /// Which die these numbers describe.
    pub kind: DieKind,
    /// Chance of any face showing a success, combined faces included.
    pub success_prob: f64,
    /// Chance of a face showing a success and nothing else.
    pub pure_success_prob: f64,
    /// Chance of any face showing a tentacle.
    pub tentacle_prob: f64,
    /// Chance of any face showing an elder sign.
    pub elder_sign_prob: f64,
    /// Chance of a blank face.
    pub blank_prob: f64,
}

impl SingleDieStats {
    /// Probability that one roll shows the symbol.
    pub fn probability(&self, symbol: Symbol) -> f64 {
        match symbol {
            Symbol::Success => self.success_prob,
            Symbol::Tentacle => self.tentacle_prob,
            Symbol::ElderSign => self.elder_sign_prob,
            Symbol::Blank => self.blank_prob,
        }
    }

    /// Expected successes per roll. A face carries at most one success.
    pub fn expected_successes(&self) -> f64 {
        self.success_prob
    }

    /// Success probability as a percentage.
    pub fn success_percentage(&self) -> f64 {
        self.success_prob * 100.0
    }

    /// Tentacle probability as a percentage.
    pub fn tentacle_percentage(&self) -> f64 {
        self.tentacle_prob * 100.0
    }

    /// Elder sign probability as a percentage.
    pub fn elder_sign_percentage(&self) -> f64 {
        self.elder_sign_prob * 100.0
    }
}

/// Compute the statistics for one die of the given kind.
pub fn single_die_stats(kind: DieKind) -> SingleDieStats {
    let die = kind.die();
    debug_assert!(die.validate().is_ok(), "malformed {kind} die");

    SingleDieStats {
        kind,
        success_prob: die.probability_of(Symbol::Success),
        pure_success_prob: die.probability_of_only(Symbol::Success),
        tentacle_prob: die.probability_of(Symbol::Tentacle),
        elder_sign_prob: die.probability_of(Symbol::ElderSign),
        blank_prob: die.probability_of(Symbol::Blank),
    }
}

/// Statistics for rolling black and green dice together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombinedRollStats {
    /// Number of black dice rolled.
    pub black_dice: u32,
    /// Number of green dice rolled.
    pub green_dice: u32,
    /// Per-die statistics for the black dice.
    pub black: SingleDieStats,
    /// Per-die statistics for the green dice.
    pub green: SingleDieStats,
}

/// Compute the statistics for a roll of `black_count` black and
/// `green_count` green dice.
pub fn combined_stats(black_count: u32, green_count: u32) -> CombinedRollStats {
    CombinedRollStats {
        black_dice: black_count,
        green_dice: green_count,
        black: single_die_stats(DieKind::Standard),
        green: single_die_stats(DieKind::Bonus),
    }
}

/// Probability that none of `count` independent dice shows an outcome of
/// probability `p`.
fn none_of(p: f64, count: u32) -> f64 {
    (1.0 - p).powi(i32::try_from(count).unwrap_or(i32::MAX))
}

impl CombinedRollStats {
    /// Total number of dice rolled.
    pub fn total_dice(&self) -> u32 {
        self.black_dice.saturating_add(self.green_dice)
    }

    /// Expected number of the symbol across the whole roll.
    pub fn expected(&self, symbol: Symbol) -> f64 {
        self.black_dice as f64 * self.black.probability(symbol)
            + self.green_dice as f64 * self.green.probability(symbol)
    }

    /// Probability that at least one die shows the symbol.
    pub fn prob_at_least_one(&self, symbol: Symbol) -> f64 {
        1.0 - none_of(self.black.probability(symbol), self.black_dice)
            * none_of(self.green.probability(symbol), self.green_dice)
    }

    /// Expected successes, before any elder sign conversion.
    pub fn expected_successes(&self) -> f64 {
        self.black_dice as f64 * self.black.expected_successes()
            + self.green_dice as f64 * self.green.expected_successes()
    }

    /// Expected tentacles. Only black dice contribute.
    pub fn expected_tentacles(&self) -> f64 {
        self.expected(Symbol::Tentacle)
    }

    /// Expected elder signs.
    pub fn expected_elder_signs(&self) -> f64 {
        self.expected(Symbol::ElderSign)
    }

    /// Probability of at least one success.
    pub fn prob_at_least_1_success(&self) -> f64 {
        self.prob_at_least_one(Symbol::Success)
    }

    /// Probability of at least one tentacle.
    pub fn prob_at_least_1_tentacle(&self) -> f64 {
        self.prob_at_least_one(Symbol::Tentacle)
    }

    /// Probability of at least one elder sign.
    pub fn prob_at_least_1_elder(&self) -> f64 {
        self.prob_at_least_one(Symbol::ElderSign)
    }

    /// Theoretical maximum: every die shows a success face.
    pub fn max_possible_successes(&self) -> u32 {
        self.total_dice()
    }

    /// [`Self::prob_at_least_1_success`] as a percentage.
    pub fn success_percentage(&self) -> f64 {
        self.prob_at_least_1_success() * 100.0
    }

    /// [`Self::prob_at_least_1_tentacle`] as a percentage.
    pub fn tentacle_percentage(&self) -> f64 {
        self.prob_at_least_1_tentacle() * 100.0
    }

    /// [`Self::prob_at_least_1_elder`] as a percentage.
    pub fn elder_percentage(&self) -> f64 {
        self.prob_at_least_1_elder() * 100.0
    }
}

impl std::fmt::Display for CombinedRollStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} black + {} green = {} dice: Expected {:.2} successes, {:.2} tentacles, \
             {:.2} elder signs. Max: {} successes.",
            self.black_dice,
            self.green_dice,
            self.total_dice(),
            self.expected_successes(),
            self.expected_tentacles(),
            self.expected_elder_signs(),
            self.max_possible_successes(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn black_die_stats() {
        let s = single_die_stats(DieKind::Standard);
        assert!(approx(s.success_prob, 0.5));
        assert!(approx(s.pure_success_prob, 2.0 / 6.0));
        assert!(approx(s.tentacle_prob, 2.0 / 6.0));
        assert!(approx(s.elder_sign_prob, 1.0 / 6.0));
        assert!(approx(s.blank_prob, 1.0 / 6.0));
        assert!(approx(s.expected_successes(), 0.5));
        assert!(approx(s.success_percentage(), 50.0));
    }

    #[test]
    fn green_die_stats() {
        let s = single_die_stats(DieKind::Bonus);
        assert!(approx(s.success_prob, 0.5));
        assert!(approx(s.pure_success_prob, 2.0 / 6.0));
        assert_eq!(s.tentacle_prob, 0.0);
        assert!(approx(s.elder_sign_prob, 2.0 / 6.0));
        assert!(approx(s.blank_prob, 2.0 / 6.0));
    }

    #[test]
    fn standard_has_tentacles_bonus_does_not() {
        assert!(single_die_stats(DieKind::Standard).tentacle_prob > 0.0);
        assert_eq!(single_die_stats(DieKind::Bonus).tentacle_prob, 0.0);
    }

    #[test]
    fn base_roll() {
        let c = combined_stats(3, 0);
        assert_eq!(c.total_dice(), 3);
        assert_eq!(c.max_possible_successes(), 3);
        assert_eq!(c.expected_successes(), 1.5);
        assert!(approx(c.expected_tentacles(), 1.0));
        assert!(approx(c.expected_elder_signs(), 0.5));
        assert!(approx(c.prob_at_least_1_success(), 1.0 - 0.125));
        assert!(approx(
            c.prob_at_least_1_tentacle(),
            1.0 - (2.0f64 / 3.0).powi(3)
        ));
    }

    #[test]
    fn mixed_roll_expected_successes() {
        let c = combined_stats(3, 2);
        assert_eq!(c.expected_successes(), 2.5);
        // Green dice add no tentacles.
        assert!(approx(c.expected_tentacles(), 1.0));
        assert!(approx(c.expected_elder_signs(), 0.5 + 2.0 / 3.0));
    }

    #[test]
    fn at_least_one_elder_uses_both_kinds() {
        let c = combined_stats(1, 1);
        let expected = 1.0 - (5.0 / 6.0) * (4.0 / 6.0);
        assert!(approx(c.prob_at_least_1_elder(), expected));
    }

    #[test]
    fn zero_black_dice_means_no_tentacles() {
        let c = combined_stats(0, 5);
        assert_eq!(c.prob_at_least_1_tentacle(), 0.0);
        assert_eq!(c.expected_tentacles(), 0.0);
    }

    #[test]
    fn empty_roll() {
        let c = combined_stats(0, 0);
        assert_eq!(c.total_dice(), 0);
        assert_eq!(c.expected_successes(), 0.0);
        assert_eq!(c.prob_at_least_1_success(), 0.0);
    }

    #[test]
    fn summary() {
        let c = combined_stats(3, 0);
        assert_eq!(
            c.to_string(),
            "3 black + 0 green = 3 dice: Expected 1.50 successes, 1.00 tentacles, \
             0.50 elder signs. Max: 3 successes."
        );
    }
}
