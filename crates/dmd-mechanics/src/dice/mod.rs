//! Dice model: symbols, faces, and the two six-sided die kinds.
//!
//! Every roll uses standard (black) dice, which can show tentacles, plus
//! any number of bonus (green) dice, which never do. Both kinds are
//! process-wide constants; nothing in this module is mutable.

pub mod impact;
pub mod stats;

pub use impact::{PowerImpact, power_impact};
pub use stats::{CombinedRollStats, SingleDieStats, combined_stats, single_die_stats};

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Number of faces on every die.
pub const FACES_PER_DIE: usize = 6;

/// Probability of any single face coming up.
pub const PROBABILITY_PER_FACE: f64 = 1.0 / FACES_PER_DIE as f64;

/// Tolerance used when checking that face probabilities sum to one.
pub const PROBABILITY_EPSILON: f64 = 1e-9;

/// A symbol printed on a die face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    /// A success (star icon).
    Success,
    /// Madness: each one costs a point of sanity.
    Tentacle,
    /// Does nothing unless a power converts it.
    ElderSign,
    /// No symbol.
    Blank,
}

impl Symbol {
    /// All symbols, in display order.
    pub const ALL: [Symbol; 4] = [
        Symbol::Success,
        Symbol::Tentacle,
        Symbol::ElderSign,
        Symbol::Blank,
    ];

    /// Parse a symbol from a string like "success", "star", or "elder_sign".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "success" | "star" => Some(Self::Success),
            "tentacle" => Some(Self::Tentacle),
            "elder_sign" | "elder sign" | "elder" => Some(Self::ElderSign),
            "blank" => Some(Self::Blank),
            _ => None,
        }
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Tentacle => write!(f, "tentacle"),
            Self::ElderSign => write!(f, "elder_sign"),
            Self::Blank => write!(f, "blank"),
        }
    }
}

/// The two kinds of dice in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DieKind {
    /// Black die, always rolled three at a time.
    Standard,
    /// Green die, added by powers and insanity checkpoints.
    Bonus,
}

impl DieKind {
    /// Both die kinds.
    pub const ALL: [DieKind; 2] = [DieKind::Standard, DieKind::Bonus];

    /// Parse a die kind from "black", "green", "standard", or "bonus".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "black" | "standard" => Some(Self::Standard),
            "green" | "bonus" => Some(Self::Bonus),
            _ => None,
        }
    }

    /// The constant die definition for this kind.
    pub fn die(self) -> &'static Die {
        match self {
            Self::Standard => &STANDARD_DIE,
            Self::Bonus => &BONUS_DIE,
        }
    }
}

impl std::fmt::Display for DieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standard => write!(f, "black"),
            Self::Bonus => write!(f, "green"),
        }
    }
}

/// One face of a die. A face may carry more than one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DieFace {
    /// The symbols printed on this face.
    pub symbols: &'static [Symbol],
}

impl DieFace {
    const fn new(symbols: &'static [Symbol]) -> Self {
        Self { symbols }
    }

    /// Returns true if this face shows the given symbol.
    pub fn has(&self, symbol: Symbol) -> bool {
        self.symbols.contains(&symbol)
    }

    /// Returns true if the face carries exactly this one symbol.
    pub fn is_only(&self, symbol: Symbol) -> bool {
        matches!(self.symbols, [only] if *only == symbol)
    }

    /// Probability of this face coming up on a roll.
    pub fn probability(&self) -> f64 {
        PROBABILITY_PER_FACE
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.symbols.iter().map(Symbol::to_string).collect();
        write!(f, "{}", names.join("+"))
    }
}

/// A six-sided die of a given kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Die {
    /// Which kind of die this is.
    pub kind: DieKind,
    /// The six faces, in printed order.
    pub faces: [DieFace; FACES_PER_DIE],
}

/// The black die: two successes, a success with a tentacle, a tentacle,
/// an elder sign, and a blank.
pub const STANDARD_DIE: Die = Die {
    kind: DieKind::Standard,
    faces: [
        DieFace::new(&[Symbol::Success]),
        DieFace::new(&[Symbol::Success]),
        DieFace::new(&[Symbol::Success, Symbol::Tentacle]),
        DieFace::new(&[Symbol::Tentacle]),
        DieFace::new(&[Symbol::ElderSign]),
        DieFace::new(&[Symbol::Blank]),
    ],
};

/// The green die: two blanks, an elder sign, two successes, and an elder
/// sign with a success. No tentacles.
pub const BONUS_DIE: Die = Die {
    kind: DieKind::Bonus,
    faces: [
        DieFace::new(&[Symbol::Blank]),
        DieFace::new(&[Symbol::Blank]),
        DieFace::new(&[Symbol::ElderSign]),
        DieFace::new(&[Symbol::Success]),
        DieFace::new(&[Symbol::Success]),
        DieFace::new(&[Symbol::ElderSign, Symbol::Success]),
    ],
};

impl Die {
    /// Number of faces showing the symbol, counting combined faces once.
    pub fn faces_with(&self, symbol: Symbol) -> usize {
        self.faces.iter().filter(|face| face.has(symbol)).count()
    }

    /// Probability that one roll of this die shows the symbol.
    ///
    /// Faces are mutually exclusive outcomes, so this is the count of
    /// matching faces over the face count.
    pub fn probability_of(&self, symbol: Symbol) -> f64 {
        self.faces_with(symbol) as f64 / FACES_PER_DIE as f64
    }

    /// Probability that one roll shows the symbol and nothing else.
    pub fn probability_of_only(&self, symbol: Symbol) -> f64 {
        let count = self.faces.iter().filter(|face| face.is_only(symbol)).count();
        count as f64 / FACES_PER_DIE as f64
    }

    /// Sum of all face probabilities. Always 1.0 for a well-formed die.
    pub fn total_probability(&self) -> f64 {
        self.faces.iter().map(DieFace::probability).sum()
    }

    /// Check the die's structural invariants.
    pub fn validate(&self) -> MechResult<()> {
        let total = self.total_probability();
        if (total - 1.0).abs() > PROBABILITY_EPSILON {
            return Err(MechError::InvariantViolation(format!(
                "{} die face probabilities sum to {total}",
                self.kind
            )));
        }

        for face in &self.faces {
            if face.symbols.is_empty() {
                return Err(MechError::InvariantViolation(format!(
                    "{} die has a face with no symbols",
                    self.kind
                )));
            }
            if face.has(Symbol::Blank) && face.symbols.len() > 1 {
                return Err(MechError::InvariantViolation(format!(
                    "{} die combines blank with another symbol",
                    self.kind
                )));
            }
        }

        let tentacles = self.faces_with(Symbol::Tentacle);
        match self.kind {
            DieKind::Standard if tentacles == 0 => Err(MechError::InvariantViolation(
                "black die has no tentacle face".to_string(),
            )),
            DieKind::Bonus if tentacles > 0 => Err(MechError::InvariantViolation(
                "green die has a tentacle face".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.faces.iter().map(DieFace::to_string).collect();
        write!(f, "{} [{}]", self.kind, faces.join(", "))
    }
}
