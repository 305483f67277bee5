//! Score alignment: make intensity scores agree with an already decided MBTI code

use serde::Serialize;

use super::Dimension;
use super::Scores;
use super::NEUTRAL_SCORES;

/// Highest score allowed for a left-pole letter (I, S, T, J)
pub const LEFT_POLE_MAX: i32 = 45;

/// Lowest score allowed for a right-pole letter (E, N, F, P)
pub const RIGHT_POLE_MIN: i32 = 55;

/// Why alignment fell back to the neutral vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultReason {
    MissingCode,
    WrongScoreCount { got: usize },
}

/// Outcome of [`align`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "path", rename_all = "snake_case")]
pub enum Alignment {
    /// Input was usable; `clamped[i]` tells whether slot `i` was moved
    Aligned { scores: Scores, clamped: [bool; 4] },
    /// Input was unusable; scores are the neutral vector
    Defaulted { scores: Scores, reason: DefaultReason },
}

impl Alignment {
    pub const fn scores(&self) -> Scores {
        match self {
            Alignment::Aligned { scores, .. } | Alignment::Defaulted { scores, .. } => *scores,
        }
    }

    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Alignment::Defaulted { .. })
    }

    /// True when at least one slot had to be clamped
    pub fn was_clamped(&self) -> bool {
        match self {
            Alignment::Aligned { clamped, .. } => clamped.iter().any(|c| *c),
            Alignment::Defaulted { .. } => false,
        }
    }
}

/// Clamp each raw score so it is consistent with the letter in `mbti_code`.
///
/// The letter test is a membership test over the whole code, so a malformed
/// code only affects the dimensions whose letters it actually contains. A
/// dimension with neither of its letters present is left untouched. Clamping
/// is one-directional: compliant values pass through unchanged.
pub fn align(mbti_code: Option<&str>, raw_scores: &[f64]) -> Alignment {
    let code = match mbti_code.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_uppercase(),
        _ => {
            return Alignment::Defaulted {
                scores: NEUTRAL_SCORES,
                reason: DefaultReason::MissingCode,
            }
        }
    };

    if raw_scores.len() != 4 {
        return Alignment::Defaulted {
            scores: NEUTRAL_SCORES,
            reason: DefaultReason::WrongScoreCount {
                got: raw_scores.len(),
            },
        };
    }

    let mut scores = NEUTRAL_SCORES;
    let mut clamped = [false; 4];

    for dimension in Dimension::ALL {
        let i = dimension.index();
        let value = to_display(raw_scores[i]);
        let (left, right) = dimension.poles();

        scores[i] = if code.contains(left) {
            value.min(LEFT_POLE_MAX)
        } else if code.contains(right) {
            value.max(RIGHT_POLE_MIN)
        } else {
            value
        };
        clamped[i] = scores[i] != value;
    }

    Alignment::Aligned { scores, clamped }
}

/// Shorthand returning only the aligned vector
pub fn align_scores_with_mbti(mbti_code: &str, raw_scores: &[f64]) -> Scores {
    align(Some(mbti_code), raw_scores).scores()
}

// Model output may be fractional or out of range
fn to_display(raw: f64) -> i32 {
    if raw.is_nan() {
        return super::NEUTRAL_SCORE;
    }
    raw.round().clamp(0.0, 100.0) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_towards_letters() {
        // Only the letters' own poles move: N keeps 90, S keeps 10
        assert_eq!(align_scores_with_mbti("INTJ", &[90.0; 4]), [45, 90, 45, 45]);
        assert_eq!(align_scores_with_mbti("ESFP", &[10.0; 4]), [55, 10, 55, 55]);
        assert_eq!(align_scores_with_mbti("ISTJ", &[90.0; 4]), [45; 4]);
        assert_eq!(align_scores_with_mbti("ENFP", &[10.0; 4]), [55; 4]);
    }

    #[test]
    fn test_compliant_scores_are_unchanged() {
        let result = align(Some("infp"), &[20.0, 80.0, 60.0, 99.0]);
        assert_eq!(result.scores(), [20, 80, 60, 99]);
        assert!(!result.was_clamped());
        assert!(!result.is_defaulted());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(
            align(Some(""), &[1.0, 2.0, 3.0, 4.0]),
            Alignment::Defaulted {
                scores: NEUTRAL_SCORES,
                reason: DefaultReason::MissingCode
            }
        );
        assert_eq!(
            align(None, &[1.0, 2.0, 3.0, 4.0]).scores(),
            NEUTRAL_SCORES
        );
        assert_eq!(
            align(Some("ABCD"), &[1.0, 2.0, 3.0]),
            Alignment::Defaulted {
                scores: NEUTRAL_SCORES,
                reason: DefaultReason::WrongScoreCount { got: 3 }
            }
        );
    }

    #[test]
    fn test_default_is_distinguishable_from_neutral_input() {
        let genuine = align(Some("XXXX"), &[50.0; 4]);
        assert_eq!(genuine.scores(), NEUTRAL_SCORES);
        assert!(!genuine.is_defaulted());
    }

    #[test]
    fn test_malformed_code_leaves_missing_dimensions() {
        // Only 'I' and 'P' are recognisable letters here
        let result = align(Some("IQZP"), &[80.0, 80.0, 80.0, 20.0]);
        assert_eq!(
            result,
            Alignment::Aligned {
                scores: [45, 80, 80, 55],
                clamped: [true, false, false, true]
            }
        );
    }

    #[test]
    fn test_fractional_and_out_of_range_input() {
        assert_eq!(align_scores_with_mbti("ENFP", &[72.6, 140.0, -3.0, f64::NAN]), [73, 100, 55, 55]);
    }
}
