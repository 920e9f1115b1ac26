//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A power referenced by a selection does not exist in the catalog.
    #[error("unknown power: {0}")]
    UnknownPower(String),

    /// The power exists but has no entry for the requested level.
    #[error("power '{power}' has no level {level}")]
    UnknownLevel {
        /// Name of the power that was looked up.
        power: String,
        /// The missing level.
        level: u8,
    },

    /// A power level outside the playable range.
    #[error("invalid power level {0} (expected 1-4)")]
    InvalidLevel(u8),

    /// The power catalog could not be decoded.
    #[error("invalid power catalog: {0}")]
    InvalidCatalog(#[from] serde_json::Error),

    /// The engine configuration breaks a track invariant.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An internal invariant was broken. This indicates a programming error.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl MechError {
    /// Returns true for catalog lookup failures the caller can report and skip.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnknownPower(_) | Self::UnknownLevel { .. } | Self::InvalidLevel(_)
        )
    }
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
