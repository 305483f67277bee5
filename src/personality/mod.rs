//! Personality module - MBTI types, score alignment and the self-test
//!
//! MBTI Dimensions (left pole ↔ right pole, scores grow towards the right):
//! - Energy: I (Introversion) ↔ E (Extraversion)
//! - Information: S (Sensing) ↔ N (Intuition)
//! - Decisions: T (Thinking) ↔ F (Feeling)
//! - Lifestyle: J (Judging) ↔ P (Perceiving)

pub mod align;
pub mod quiz;
pub mod traits;

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

pub use align::align;
pub use align::align_scores_with_mbti;
pub use align::Alignment;
pub use quiz::Likert;
pub use quiz::QuizAnswerSet;
pub use quiz::QuizBattery;
pub use quiz::QuizQuestion;
pub use quiz::QuizResult;
pub use quiz::QuizScorer;

use crate::ChatMbtiError;

/// Four display scores, one per dimension in [`Dimension::ALL`] order
pub type Scores = [i32; 4];

/// Score used when nothing is known about a dimension
pub const NEUTRAL_SCORE: i32 = 50;

/// Neutral vector returned whenever input cannot be aligned
pub const NEUTRAL_SCORES: Scores = [NEUTRAL_SCORE; 4];

/// One of the four bipolar personality axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Energy,
    Information,
    Decisions,
    Lifestyle,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Energy,
        Dimension::Information,
        Dimension::Decisions,
        Dimension::Lifestyle,
    ];

    /// Position of this dimension in a score vector and in an MBTI code
    pub const fn index(self) -> usize {
        match self {
            Dimension::Energy => 0,
            Dimension::Information => 1,
            Dimension::Decisions => 2,
            Dimension::Lifestyle => 3,
        }
    }

    /// Pole letters as drawn on a chart: (low scores, high scores)
    pub const fn poles(self) -> (char, char) {
        match self {
            Dimension::Energy => ('I', 'E'),
            Dimension::Information => ('S', 'N'),
            Dimension::Decisions => ('T', 'F'),
            Dimension::Lifestyle => ('J', 'P'),
        }
    }

    /// Letters as the quiz lists them: (non-negative total, negative total)
    pub const fn quiz_letters(self) -> (char, char) {
        match self {
            Dimension::Energy => ('E', 'I'),
            Dimension::Information => ('N', 'S'),
            Dimension::Decisions => ('T', 'F'),
            Dimension::Lifestyle => ('J', 'P'),
        }
    }

    /// Dimension a letter belongs to, accepting either pole
    pub fn from_letter(letter: char) -> Option<Self> {
        let upper = letter.to_ascii_uppercase();
        Self::ALL.into_iter().find(|d| {
            let (left, right) = d.poles();
            upper == left || upper == right
        })
    }

    pub const fn label(self) -> &'static str {
        match self {
            Dimension::Energy => "Energy",
            Dimension::Information => "Information",
            Dimension::Decisions => "Decisions",
            Dimension::Lifestyle => "Lifestyle",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Validated 4-letter MBTI code, canonical uppercase (e.g. "INTJ")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MbtiType([char; 4]);

impl MbtiType {
    /// Build a type from one letter per dimension, validating each slot
    pub fn from_letters(letters: [char; 4]) -> crate::Result<Self> {
        let mut canonical = ['?'; 4];
        for (dimension, letter) in Dimension::ALL.into_iter().zip(letters) {
            let upper = letter.to_ascii_uppercase();
            let (left, right) = dimension.poles();
            if upper != left && upper != right {
                return Err(ChatMbtiError::InvalidMbti(letters.iter().collect()));
            }
            canonical[dimension.index()] = upper;
        }
        Ok(Self(canonical))
    }

    /// Read a loosely formatted code such as "INTJ-A" or "intj (probably)".
    ///
    /// Each dimension takes the first of its pole letters found in the text;
    /// fails when a dimension has none.
    pub fn from_loose_code(code: &str) -> crate::Result<Self> {
        let upper = code.to_uppercase();
        let mut letters = ['?'; 4];
        for dimension in Dimension::ALL {
            let (left, right) = dimension.poles();
            letters[dimension.index()] = upper
                .chars()
                .find(|c| *c == left || *c == right)
                .ok_or_else(|| ChatMbtiError::InvalidMbti(code.trim().to_string()))?;
        }
        Self::from_letters(letters)
    }

    /// Build a type from the pole chosen on each dimension (`true` = right pole)
    pub fn from_poles(right: [bool; 4]) -> Self {
        let mut letters = ['?'; 4];
        for dimension in Dimension::ALL {
            let (left, right_letter) = dimension.poles();
            letters[dimension.index()] = if right[dimension.index()] {
                right_letter
            } else {
                left
            };
        }
        Self(letters)
    }

    /// Letter chosen for a dimension
    pub const fn letter(&self, dimension: Dimension) -> char {
        self.0[dimension.index()]
    }

    /// Whether the letter for a dimension is the right-hand (high score) pole
    pub const fn is_right_pole(&self, dimension: Dimension) -> bool {
        self.0[dimension.index()] == dimension.poles().1
    }

    pub fn as_string(&self) -> String {
        self.0.iter().collect()
    }
}

impl FromStr for MbtiType {
    type Err = ChatMbtiError;

    fn from_str(s: &str) -> crate::Result<Self> {
        let trimmed = s.trim();
        let chars: Vec<char> = trimmed.chars().collect();
        let letters: [char; 4] = chars
            .try_into()
            .map_err(|_| ChatMbtiError::InvalidMbti(trimmed.to_string()))?;
        Self::from_letters(letters).map_err(|_| ChatMbtiError::InvalidMbti(trimmed.to_string()))
    }
}

impl fmt::Display for MbtiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0 {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl Serialize for MbtiType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_string())
    }
}

impl<'de> Deserialize<'de> for MbtiType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
