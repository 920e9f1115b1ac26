//! The insanity track and its checkpoints.
//!
//! Position runs from 1 to `max_insanity + 1`; the last position is
//! death and absorbs every further tentacle. Checkpoints are fixed
//! positions on the way. When tentacles are applied with the checkpoint
//! stop, movement halts on the first checkpoint in range and the rest
//! of that batch is discarded.
//!
//! Bonus dice are derived from the current position (how many
//! bonus-granting checkpoints lie at or below it), never counted as
//! events, so reaching a checkpoint twice cannot grant twice.

use serde::{Deserialize, Serialize};

use super::ThresholdTrack;
use crate::config::InsanityLayout;
use crate::error::{MechError, MechResult};

/// A fixed position on the insanity track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Track position of the checkpoint.
    pub position: u32,
    /// Whether reaching it grants a permanent green die.
    pub grants_bonus_die: bool,
}

/// What happened when a batch of tentacles was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TentacleOutcome {
    /// True if movement stopped on a checkpoint.
    pub reached: bool,
    /// 1-based ordinal of the checkpoint stopped on.
    pub checkpoint_ordinal: Option<usize>,
    /// Tentacles that moved the marker.
    pub applied: u32,
    /// Tentacles dropped, either at a checkpoint stop or past death.
    pub discarded: u32,
    /// Position after the batch.
    pub position: u32,
}

/// An investigator's insanity marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsanityTrack {
    position: u32,
    max_insanity: u32,
    checkpoints: Vec<Checkpoint>,
}

impl Default for InsanityTrack {
    fn default() -> Self {
        let layout = InsanityLayout::default();
        Self::build(&layout)
    }
}

impl InsanityTrack {
    /// Create a track from a layout, rejecting layouts that break the
    /// track invariants.
    pub fn from_layout(layout: &InsanityLayout) -> MechResult<Self> {
        layout.validate()?;
        Ok(Self::build(layout))
    }

    fn build(layout: &InsanityLayout) -> Self {
        let checkpoints = layout
            .checkpoints
            .iter()
            .enumerate()
            .map(|(i, &position)| Checkpoint {
                position,
                grants_bonus_die: layout.bonus_ordinals.contains(&(i + 1)),
            })
            .collect();
        Self {
            position: layout.starting_position,
            max_insanity: layout.max_insanity,
            checkpoints,
        }
    }

    /// Current position.
    pub fn position(&self) -> u32 {
        self.position
    }

    /// Last survivable position.
    pub fn max_insanity(&self) -> u32 {
        self.max_insanity
    }

    /// Position at which the investigator dies.
    pub fn death_threshold(&self) -> u32 {
        self.max_insanity.saturating_add(1)
    }

    /// The checkpoints, in track order.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Returns true once the marker reaches the death threshold.
    pub fn is_dead(&self) -> bool {
        self.position >= self.death_threshold()
    }

    /// Move the marker directly, clamped to `1..=death_threshold`.
    pub fn set_position(&mut self, position: u32) {
        self.position = position.clamp(1, self.death_threshold());
    }

    /// Apply `count` tentacles.
    ///
    /// With `stop_at_checkpoint`, the marker stops on the first checkpoint
    /// `cp` with `position < cp <= position + count`, and the remaining
    /// tentacles of this batch are discarded. Landing exactly on a
    /// checkpoint counts as reaching it; a checkpoint at the current
    /// position does not stop the marker again. Otherwise the marker
    /// advances by `count`, clamped at death. A dead investigator is
    /// unaffected.
    pub fn apply_tentacles(&mut self, count: u32, stop_at_checkpoint: bool) -> TentacleOutcome {
        if self.is_dead() || count == 0 {
            return TentacleOutcome {
                reached: false,
                checkpoint_ordinal: None,
                applied: 0,
                discarded: count,
                position: self.position,
            };
        }

        let start = self.position;
        let reach = start.saturating_add(count);

        if stop_at_checkpoint {
            let hit = self
                .checkpoints
                .iter()
                .enumerate()
                .find(|(_, cp)| cp.position > start && cp.position <= reach);
            if let Some((index, cp)) = hit {
                let applied = cp.position - start;
                let discarded = count - applied;
                self.position = cp.position;
                tracing::debug!(
                    checkpoint = index + 1,
                    position = cp.position,
                    discarded,
                    "tentacles stopped at checkpoint"
                );
                self.debug_check();
                return TentacleOutcome {
                    reached: true,
                    checkpoint_ordinal: Some(index + 1),
                    applied,
                    discarded,
                    position: self.position,
                };
            }
        }

        self.position = reach.min(self.death_threshold());
        let applied = self.position - start;
        if self.is_dead() {
            tracing::debug!(position = self.position, "insanity reached death threshold");
        }
        self.debug_check();
        TentacleOutcome {
            reached: false,
            checkpoint_ordinal: None,
            applied,
            discarded: count - applied,
            position: self.position,
        }
    }

    /// Number of checkpoints at or below the current position.
    pub fn checkpoints_reached(&self) -> usize {
        self.checkpoints
            .iter()
            .filter(|cp| cp.position <= self.position)
            .count()
    }

    /// Level-ups earned so far: one per checkpoint reached.
    pub fn level_ups_available(&self) -> usize {
        self.checkpoints_reached()
    }

    /// Permanent green dice granted by the checkpoints reached.
    pub fn bonus_dice(&self) -> u32 {
        let count = self
            .checkpoints
            .iter()
            .filter(|cp| cp.grants_bonus_die && cp.position <= self.position)
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// The next checkpoint ahead of the marker.
    pub fn next_checkpoint(&self) -> Option<u32> {
        self.checkpoints
            .iter()
            .map(|cp| cp.position)
            .find(|&p| p > self.position)
    }

    /// Tentacles needed to reach the next checkpoint.
    pub fn tentacles_until_next_checkpoint(&self) -> Option<u32> {
        self.next_checkpoint().map(|p| p - self.position)
    }

    /// Tentacles needed to die.
    pub fn tentacles_until_death(&self) -> u32 {
        self.death_threshold().saturating_sub(self.position)
    }

    fn debug_check(&self) {
        debug_assert!(
            ThresholdTrack::check_invariants(self).is_ok(),
            "insanity track out of bounds: {self:?}"
        );
    }
}

impl ThresholdTrack for InsanityTrack {
    fn value(&self) -> u32 {
        self.position
    }

    fn threshold(&self) -> u32 {
        self.death_threshold()
    }

    fn check_invariants(&self) -> MechResult<()> {
        if self.position < 1 || self.position > self.death_threshold() {
            return Err(MechError::InvariantViolation(format!(
                "insanity position {} outside 1-{}",
                self.position,
                self.death_threshold()
            )));
        }
        let ascending = self
            .checkpoints
            .windows(2)
            .all(|w| w[0].position < w[1].position);
        if !ascending {
            return Err(MechError::InvariantViolation(
                "insanity checkpoints are not ascending".to_string(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for InsanityTrack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Insanity: {}/{}", self.position, self.death_threshold())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_at(position: u32) -> InsanityTrack {
        let mut t = InsanityTrack::default();
        t.set_position(position);
        t
    }

    #[test]
    fn default_track() {
        let t = InsanityTrack::default();
        assert_eq!(t.position(), 1);
        assert_eq!(t.death_threshold(), 21);
        let positions: Vec<u32> = t.checkpoints().iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![5, 9, 13, 16, 19, 20]);
        assert_eq!(t.bonus_dice(), 0);
        assert!(!t.is_dead());
    }

    #[test]
    fn stops_at_checkpoint() {
        let mut t = track_at(4);
        let out = t.apply_tentacles(3, true);
        assert_eq!(t.position(), 5);
        assert!(out.reached);
        assert_eq!(out.checkpoint_ordinal, Some(1));
        assert_eq!(out.applied, 1);
        assert_eq!(out.discarded, 2);
    }

    #[test]
    fn passes_checkpoint_without_stop() {
        let mut t = track_at(4);
        let out = t.apply_tentacles(3, false);
        assert_eq!(t.position(), 7);
        assert!(!out.reached);
        assert_eq!(out.checkpoint_ordinal, None);
        assert_eq!(out.applied, 3);
    }

    #[test]
    fn landing_exactly_on_checkpoint_reports_it() {
        let mut t = track_at(7);
        let out = t.apply_tentacles(2, true);
        assert_eq!(t.position(), 9);
        assert!(out.reached);
        assert_eq!(out.checkpoint_ordinal, Some(2));
        assert_eq!(out.discarded, 0);
    }

    #[test]
    fn remainder_is_not_carried() {
        let mut t = track_at(4);
        t.apply_tentacles(3, true);
        // The next batch starts from the checkpoint, with nothing owed.
        let out = t.apply_tentacles(1, true);
        assert_eq!(t.position(), 6);
        assert!(!out.reached);
    }

    #[test]
    fn starting_on_checkpoint_does_not_stop_again() {
        let mut t = track_at(5);
        let out = t.apply_tentacles(2, true);
        assert_eq!(t.position(), 7);
        assert!(!out.reached);
    }

    #[test]
    fn clamps_at_death() {
        let mut t = track_at(20);
        let out = t.apply_tentacles(5, true);
        assert_eq!(t.position(), 21);
        assert!(t.is_dead());
        assert_eq!(out.applied, 1);
        assert_eq!(out.discarded, 4);
        assert!(!out.reached);
    }

    #[test]
    fn dead_is_terminal() {
        let mut t = track_at(21);
        let before = t.clone();
        let out = t.apply_tentacles(3, false);
        assert_eq!(t, before);
        assert_eq!(out.applied, 0);
        assert_eq!(out.discarded, 3);
        t.apply_tentacles(1, true);
        assert_eq!(t, before);
    }

    #[test]
    fn zero_tentacles_is_noop() {
        let mut t = track_at(4);
        let out = t.apply_tentacles(0, true);
        assert_eq!(t.position(), 4);
        assert!(!out.reached);
    }

    #[test]
    fn bonus_dice_follow_position() {
        let mut t = InsanityTrack::default();
        t.set_position(5);
        assert_eq!(t.level_ups_available(), 1);
        assert_eq!(t.bonus_dice(), 0);
        t.set_position(9);
        assert_eq!(t.level_ups_available(), 2);
        assert_eq!(t.bonus_dice(), 1);
        t.set_position(16);
        assert_eq!(t.bonus_dice(), 2);
        t.set_position(20);
        assert_eq!(t.checkpoints_reached(), 6);
        assert_eq!(t.bonus_dice(), 3);
    }

    #[test]
    fn bonus_not_granted_twice() {
        let mut t = track_at(8);
        t.apply_tentacles(1, true);
        assert_eq!(t.bonus_dice(), 1);
        // Setting back and reaching the checkpoint again grants nothing new.
        t.set_position(8);
        t.apply_tentacles(1, true);
        assert_eq!(t.bonus_dice(), 1);
    }

    #[test]
    fn next_checkpoint_and_death_distance() {
        let t = track_at(6);
        assert_eq!(t.next_checkpoint(), Some(9));
        assert_eq!(t.tentacles_until_next_checkpoint(), Some(3));
        assert_eq!(t.tentacles_until_death(), 15);

        let t = track_at(20);
        assert_eq!(t.next_checkpoint(), None);
        assert_eq!(t.tentacles_until_death(), 1);
    }

    #[test]
    fn set_position_clamps() {
        let mut t = InsanityTrack::default();
        t.set_position(0);
        assert_eq!(t.position(), 1);
        t.set_position(99);
        assert_eq!(t.position(), 21);
        assert!(t.check_invariants().is_ok());
    }

    #[test]
    fn custom_layout() {
        let layout = InsanityLayout {
            max_insanity: 10,
            checkpoints: vec![3, 6],
            bonus_ordinals: vec![1],
            starting_position: 2,
        };
        let mut t = InsanityTrack::from_layout(&layout).unwrap();
        assert_eq!(t.position(), 2);
        let out = t.apply_tentacles(4, true);
        assert_eq!(out.checkpoint_ordinal, Some(1));
        assert_eq!(t.bonus_dice(), 1);
        assert_eq!(t.death_threshold(), 11);
    }

    #[test]
    fn invalid_layout_rejected() {
        let layout = InsanityLayout {
            checkpoints: vec![9, 5],
            ..InsanityLayout::default()
        };
        assert!(InsanityTrack::from_layout(&layout).is_err());
    }

    #[test]
    fn corrupted_position_detected() {
        let t: InsanityTrack = serde_json::from_str(
            r#"{"position": 40, "max_insanity": 20, "checkpoints": []}"#,
        )
        .unwrap();
        assert!(t.check_invariants().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(track_at(4).to_string(), "Insanity: 4/21");
    }
}
