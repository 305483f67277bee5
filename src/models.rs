//! Shared data records exchanged between the analyzer, the API and the CLI

use serde::Deserialize;
use serde::Serialize;

use crate::personality::MbtiType;
use crate::personality::Scores;

/// Personality of one participant, ready for charting.
///
/// `scores` follow [`crate::personality::Dimension::ALL`] and grow towards the
/// right pole (E, N, F, P). Records built by this crate are aligned, so each
/// score agrees with the letter in `mbti`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityRecord {
    pub name: String,
    pub mbti: MbtiType,
    pub scores: Scores,
}

/// Record as the model returns it, before validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPersonalityRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbti: String,
    #[serde(default)]
    pub scores: Vec<f64>,
}

/// Top-level object the analysis prompt asks the model for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub results: Vec<RawPersonalityRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_tolerates_missing_fields() {
        let parsed: AnalysisResponse =
            serde_json::from_str(r#"{"results": [{"name": "Amy"}]}"#).unwrap();
        assert_eq!(parsed.results[0].name, "Amy");
        assert!(parsed.results[0].mbti.is_empty());
        assert!(parsed.results[0].scores.is_empty());
    }

    #[test]
    fn test_record_serializes_code_as_string() {
        let record = PersonalityRecord {
            name: "Bob".to_string(),
            mbti: "intj".parse().unwrap(),
            scores: [20, 70, 30, 40],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["mbti"], "INTJ");
        assert_eq!(value["scores"][1], 70);
    }
}
