// Player position canonicalization.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Basketball positions that drive the position-conditioned tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    PG,
    SG,
    SF,
    PF,
    C,
    /// A label the canonicalizer does not recognize, kept upper-cased.
    /// Every position table falls through to its generic branch for it.
    Unlisted(String),
}

impl Position {
    /// Canonicalize a free-text position label.
    ///
    /// - Blank or missing -> SG
    /// - Descriptive labels: "Guard" -> SG, "Forward" -> SF, "Center" -> C,
    ///   "Point Guard" -> PG, "Shooting Guard" -> SG, "Small Forward" -> SF,
    ///   "Power Forward" -> PF
    /// - Compound labels ("Guard-Forward", "PF/C") take the first segment
    /// - Anything else passes through as `Unlisted`
    pub fn from_label(label: Option<&str>) -> Self {
        let label = label.map(str::trim).unwrap_or("");
        if label.is_empty() {
            return Position::SG;
        }
        if let Some(pos) = Self::from_single(label) {
            return pos;
        }
        let first = label
            .split(['-', '/'])
            .next()
            .map(str::trim)
            .unwrap_or("");
        if first.is_empty() {
            return Position::SG;
        }
        Self::from_single(first).unwrap_or_else(|| Position::Unlisted(first.to_uppercase()))
    }

    fn from_single(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "PG" | "POINT GUARD" => Some(Position::PG),
            "SG" | "SHOOTING GUARD" | "GUARD" => Some(Position::SG),
            "SF" | "SMALL FORWARD" | "FORWARD" => Some(Position::SF),
            "PF" | "POWER FORWARD" => Some(Position::PF),
            "C" | "CENTER" => Some(Position::C),
            _ => None,
        }
    }

    /// Short display label.
    pub fn label(&self) -> &str {
        match self {
            Position::PG => "PG",
            Position::SG => "SG",
            Position::SF => "SF",
            Position::PF => "PF",
            Position::C => "C",
            Position::Unlisted(s) => s.as_str(),
        }
    }

    pub fn is_big(&self) -> bool {
        matches!(self, Position::PF | Position::C)
    }

    pub fn is_guard(&self) -> bool {
        matches!(self, Position::PG | Position::SG)
    }

    pub fn is_wing(&self) -> bool {
        matches!(self, Position::SF)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
