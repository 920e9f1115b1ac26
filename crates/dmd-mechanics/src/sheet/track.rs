//! Bounded counters (wounds, stress).
//!
//! A track is a non-negative count clamped to `0..=max`. Raising or
//! lowering it reports how much was actually applied, so callers can
//! tell when a change was cut short at a bound.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// A named counter clamped between zero and a maximum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    name: String,
    current: u32,
    max: u32,
}

impl Track {
    /// Create an empty track.
    pub fn new(name: impl Into<String>, max: u32) -> Self {
        Self {
            name: name.into(),
            current: 0,
            max,
        }
    }

    /// Create a track with a starting value, clamped to the maximum.
    pub fn with_value(name: impl Into<String>, current: u32, max: u32) -> Self {
        Self {
            name: name.into(),
            current: current.min(max),
            max,
        }
    }

    /// Display name of the track.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn value(&self) -> u32 {
        self.current
    }

    /// Maximum value.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Increase by up to `amount`. Returns the amount actually applied.
    pub fn raise(&mut self, amount: u32) -> u32 {
        let current = self.current.min(self.max);
        let next = current.saturating_add(amount).min(self.max);
        let applied = next.saturating_sub(current);
        if applied < amount {
            tracing::debug!(
                track = %self.name,
                requested = amount,
                applied,
                "track clamped at maximum"
            );
        }
        self.current = next;
        applied
    }

    /// Decrease by up to `amount`. Returns the amount actually applied.
    pub fn lower(&mut self, amount: u32) -> u32 {
        self.current = self.current.min(self.max);
        let applied = amount.min(self.current);
        if applied < amount {
            tracing::debug!(
                track = %self.name,
                requested = amount,
                applied,
                "track clamped at zero"
            );
        }
        self.current -= applied;
        applied
    }

    /// Set the value directly, clamped to the bounds.
    pub fn set(&mut self, value: u32) {
        self.current = value.min(self.max);
    }

    /// Returns true if the track is at zero.
    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Returns true if the track is at its maximum.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Fraction of the track that is filled (0.0 to 1.0).
    pub fn fraction(&self) -> f64 {
        if self.max == 0 {
            return 1.0;
        }
        f64::from(self.current) / f64::from(self.max)
    }

    /// Check that the value is within bounds.
    pub fn check_invariants(&self) -> MechResult<()> {
        if self.current > self.max {
            return Err(MechError::InvariantViolation(format!(
                "{} track at {} exceeds maximum {}",
                self.name, self.current, self.max
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.current, self.max)
    }
}
