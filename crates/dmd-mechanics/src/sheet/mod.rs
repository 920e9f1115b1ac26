//! Threshold tracks: health, stress, and insanity.
//!
//! Each track is an independent bounded counter owned by one character
//! build. Tracks are mutated in place by external actions (damage,
//! tentacle rolls, healing) and never shared between builds.

pub mod insanity;
pub mod track;
pub mod vitals;

pub use insanity::{Checkpoint, InsanityTrack, TentacleOutcome};
pub use track::Track;
pub use vitals::{HealthTrack, StressTrack};

use crate::error::MechResult;

/// A bounded counter that ends at a threshold.
pub trait ThresholdTrack {
    /// Current value of the counter.
    fn value(&self) -> u32;

    /// The value at which the track is full.
    fn threshold(&self) -> u32;

    /// Check that the counter is within its bounds.
    fn check_invariants(&self) -> MechResult<()>;

    /// Distance left before the threshold.
    fn remaining(&self) -> u32 {
        self.threshold().saturating_sub(self.value())
    }

    /// Returns true if the counter has reached its threshold.
    fn at_threshold(&self) -> bool {
        self.value() >= self.threshold()
    }
}
