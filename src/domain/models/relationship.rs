//! Relationship types and stimulus pairs.
//!
//! Every trial asks the subject whether a [`StimulusPair`] satisfies one of
//! seven fixed [`RelationshipType`]s.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of semantic or numeric relationship evaluated in a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// The left item is a part of the right item (`wheel`, `car`).
    PartWhole,
    /// The items are opposites (`hot`, `cold`).
    Antonym,
    /// Both items are typically the same colour (`banana`, `lemon`).
    SameColor,
    /// The right number directly follows the left (`41`, `42`).
    SequentialNumber,
    /// The same number written in two notations (`7`, `seven`).
    CrossNotationNumber,
    /// Two expressions with the same numeric value (`1/4`, `0.25`).
    NumericEquivalence,
    /// The same clock time on a 24-hour and a 12-hour dial (`15:30`, `3:30 PM`).
    SameTime,
}

impl RelationshipType {
    /// All relationship types, in catalog order.
    pub const ALL: [Self; 7] = [
        Self::PartWhole,
        Self::Antonym,
        Self::SameColor,
        Self::SequentialNumber,
        Self::CrossNotationNumber,
        Self::NumericEquivalence,
        Self::SameTime,
    ];

    /// Prompt shown to the subject before the pair is revealed.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::PartWhole => "Is the first a part of the second?",
            Self::Antonym => "Are these opposites?",
            Self::SameColor => "Are these the same colour?",
            Self::SequentialNumber => "Does the second number come right after the first?",
            Self::CrossNotationNumber => "Is this the same number?",
            Self::NumericEquivalence => "Are these equal in value?",
            Self::SameTime => "Is this the same time?",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PartWhole => "part_whole",
            Self::Antonym => "antonym",
            Self::SameColor => "same_color",
            Self::SequentialNumber => "sequential_number",
            Self::CrossNotationNumber => "cross_notation_number",
            Self::NumericEquivalence => "numeric_equivalence",
            Self::SameTime => "same_time",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered pair of display strings shown to the subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StimulusPair {
    pub left: String,
    pub right: String,
}

impl StimulusPair {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }
}

impl fmt::Display for StimulusPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  ·  {}", self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for kind in RelationshipType::ALL {
            assert_eq!(RelationshipType::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(RelationshipType::from_str("synonym"), None);
    }

    #[test]
    fn test_pair_value_equality() {
        assert_eq!(StimulusPair::new("hot", "cold"), StimulusPair::new("hot", "cold"));
        assert_ne!(StimulusPair::new("hot", "cold"), StimulusPair::new("cold", "hot"));
    }
}
