//! Personality self-test: question battery, Likert answers and scoring rubric
//!
//! Every question belongs to one dimension and is phrased so that agreeing
//! points towards the dimension's quiz letter (E, N, T, J). Reversed
//! questions point the other way and have their answer negated. Per-dimension
//! totals decide the letter (ties go to the first letter) and are linearly
//! rescaled from `[-bound, +bound]` onto a 0-100 display score.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::warn;

use super::Dimension;
use super::MbtiType;
use super::Scores;
use crate::models::PersonalityRecord;
use crate::ChatMbtiError;
use crate::Result;

// Compiled in so the binary always has a battery to offer
const EMBEDDED_BATTERY: &str = include_str!("../../data/quiz_battery.toml");

/// Largest absolute Likert value
pub const MAX_ANSWER: i32 = 2;

/// Five-point agreement scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Likert {
    StronglyDisagree,
    Disagree,
    Neutral,
    Agree,
    StronglyAgree,
}

impl Likert {
    pub const ALL: [Likert; 5] = [
        Likert::StronglyDisagree,
        Likert::Disagree,
        Likert::Neutral,
        Likert::Agree,
        Likert::StronglyAgree,
    ];

    /// Signed value in -2..=2
    pub const fn value(self) -> i32 {
        match self {
            Likert::StronglyDisagree => -2,
            Likert::Disagree => -1,
            Likert::Neutral => 0,
            Likert::Agree => 1,
            Likert::StronglyAgree => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Likert::StronglyDisagree => "Strongly Disagree",
            Likert::Disagree => "Disagree",
            Likert::Neutral => "Neutral",
            Likert::Agree => "Agree",
            Likert::StronglyAgree => "Strongly Agree",
        }
    }

    /// Parse a label such as "strongly agree" (case-insensitive)
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(wanted))
    }
}

impl TryFrom<i64> for Likert {
    type Error = ChatMbtiError;

    fn try_from(value: i64) -> Result<Self> {
        match value {
            -2 => Ok(Likert::StronglyDisagree),
            -1 => Ok(Likert::Disagree),
            0 => Ok(Likert::Neutral),
            1 => Ok(Likert::Agree),
            2 => Ok(Likert::StronglyAgree),
            other => Err(ChatMbtiError::InvalidAnswer(other)),
        }
    }
}

impl From<Likert> for i64 {
    fn from(value: Likert) -> Self {
        i64::from(value.value())
    }
}

/// One self-test statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: u32,
    pub text: String,
    pub dimension: Dimension,
    #[serde(default)]
    pub reversed: bool,
}

/// Versioned, ordered set of questions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizBattery {
    version: String,
    questions: Vec<QuizQuestion>,
}

impl QuizBattery {
    /// Build and validate a battery
    pub fn new(version: impl Into<String>, questions: Vec<QuizQuestion>) -> Result<Self> {
        let battery = Self {
            version: version.into(),
            questions,
        };
        battery.validate()?;
        Ok(battery)
    }

    /// Battery shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(EMBEDDED_BATTERY)
    }

    /// Load a battery from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let battery: QuizBattery = toml::from_str(content)?;
        battery.validate()?;
        Ok(battery)
    }

    /// The configured battery file, or the embedded one
    pub fn load(config: &crate::config::QuizConfig) -> Result<Self> {
        let battery = match &config.battery_path {
            Some(path) => Self::from_file(path)?,
            None => Self::embedded()?,
        };

        let overflowing = battery.dimensions_exceeding(config.scale_bound);
        if !overflowing.is_empty() {
            warn!(
                "Quiz battery {} can exceed the ±{} scale on {:?}; display scores may leave 0-100",
                battery.version, config.scale_bound, overflowing
            );
        }
        Ok(battery)
    }

    fn validate(&self) -> Result<()> {
        if self.questions.is_empty() {
            return Err(ChatMbtiError::InvalidQuizBattery(
                "battery has no questions".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(ChatMbtiError::InvalidQuizBattery(format!(
                    "duplicate question id {}",
                    question.id
                )));
            }
        }
        Ok(())
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Largest absolute total a dimension can reach
    pub fn max_total(&self, dimension: Dimension) -> i32 {
        self.questions
            .iter()
            .filter(|q| q.dimension == dimension)
            .count() as i32
            * MAX_ANSWER
    }

    /// Dimensions whose totals can fall outside `[-bound, +bound]`
    pub fn dimensions_exceeding(&self, bound: i32) -> Vec<Dimension> {
        Dimension::ALL
            .into_iter()
            .filter(|d| self.max_total(*d) > bound)
            .collect()
    }
}

/// Answers of one quiz attempt, keyed by question id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizAnswerSet {
    answers: BTreeMap<u32, Likert>,
}

impl QuizAnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the previous one for that question
    pub fn insert(&mut self, question_id: u32, answer: Likert) -> Option<Likert> {
        self.answers.insert(question_id, answer)
    }

    pub fn get(&self, question_id: u32) -> Option<Likert> {
        self.answers.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Unanswered question ids, in battery order
    pub fn missing(&self, battery: &QuizBattery) -> Vec<u32> {
        battery
            .questions()
            .iter()
            .map(|q| q.id)
            .filter(|id| !self.answers.contains_key(id))
            .collect()
    }

    pub fn is_complete(&self, battery: &QuizBattery) -> bool {
        self.missing(battery).is_empty()
    }

    /// Parse saved answers: `[[answers]]` tables with `id` and `answer`
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: AnswerFile = toml::from_str(content)?;
        let mut set = Self::new();
        for entry in file.answers {
            if set.insert(entry.id, entry.answer).is_some() {
                warn!("Question {} answered twice; keeping the last answer", entry.id);
            }
        }
        Ok(set)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[derive(Deserialize)]
struct AnswerFile {
    #[serde(default)]
    answers: Vec<AnswerEntry>,
}

#[derive(Deserialize)]
struct AnswerEntry {
    id: u32,
    answer: Likert,
}

impl FromIterator<(u32, Likert)> for QuizAnswerSet {
    fn from_iter<I: IntoIterator<Item = (u32, Likert)>>(iter: I) -> Self {
        Self {
            answers: iter.into_iter().collect(),
        }
    }
}

/// Scored quiz attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub mbti: MbtiType,
    /// Signed per-dimension totals
    pub raw: [i32; 4],
    /// Totals rescaled onto 0-100; higher means further towards E, N, T, J
    pub scores: Scores,
    /// Dimensions whose display score fell outside 0-100
    pub out_of_range: Vec<Dimension>,
    pub battery_version: String,
}

impl QuizResult {
    /// Convert to a chart-ready record.
    ///
    /// Records grow towards the right pole (E, N, F, P) while quiz scores grow
    /// towards the quiz letter (E, N, T, J), so Decisions and Lifestyle are
    /// mirrored before the scores are aligned with the code.
    pub fn into_record(self, name: impl Into<String>) -> PersonalityRecord {
        let mut oriented = [0.0_f64; 4];
        for dimension in Dimension::ALL {
            let i = dimension.index();
            let score = f64::from(self.scores[i]);
            oriented[i] = if dimension.quiz_letters().0 == dimension.poles().1 {
                score
            } else {
                100.0 - score
            };
        }

        let code = self.mbti.to_string();
        PersonalityRecord {
            name: name.into(),
            mbti: self.mbti,
            scores: super::align(Some(&code), &oriented).scores(),
        }
    }
}

/// Applies the scoring rubric to an answer set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizScorer {
    scale_bound: i32,
}

impl Default for QuizScorer {
    fn default() -> Self {
        Self {
            scale_bound: crate::config::default_scale_bound(),
        }
    }
}

impl QuizScorer {
    /// `scale_bound` is the raw total mapped onto 0 and 100; it must be positive
    pub fn new(scale_bound: i32) -> Result<Self> {
        if scale_bound <= 0 {
            return Err(ChatMbtiError::ConfigError(format!(
                "quiz scale bound must be positive, got {scale_bound}"
            )));
        }
        Ok(Self { scale_bound })
    }

    pub fn from_config(config: &crate::config::QuizConfig) -> Result<Self> {
        Self::new(config.scale_bound)
    }

    pub const fn scale_bound(&self) -> i32 {
        self.scale_bound
    }

    /// Score an attempt. Unanswered questions count as neutral.
    pub fn score(&self, answers: &QuizAnswerSet, battery: &QuizBattery) -> QuizResult {
        let mut raw = [0_i32; 4];

        for question in battery.questions() {
            let value = answers.get(question.id).map_or(0, Likert::value);
            let signed = if question.reversed { -value } else { value };
            raw[question.dimension.index()] += signed;
        }

        let mut toward_right = [false; 4];
        let mut scores = [0_i32; 4];
        let mut out_of_range = Vec::new();

        for dimension in Dimension::ALL {
            let i = dimension.index();
            let (first, second) = dimension.quiz_letters();
            let letter = if raw[i] >= 0 { first } else { second };
            toward_right[i] = letter == dimension.poles().1;

            scores[i] = display_score(raw[i], self.scale_bound);
            if !(0..=100).contains(&scores[i]) {
                out_of_range.push(dimension);
            }
        }

        if !out_of_range.is_empty() {
            warn!(
                "Quiz totals {:?} exceed the ±{} scale on {:?}; display scores left unclamped",
                raw, self.scale_bound, out_of_range
            );
        }

        let mbti = MbtiType::from_poles(toward_right);
        debug!("Quiz scored: {} raw={:?} scores={:?}", mbti, raw, scores);

        QuizResult {
            mbti,
            raw,
            scores,
            out_of_range,
            battery_version: battery.version().to_string(),
        }
    }

    /// Score an attempt only if every question was answered
    pub fn score_complete(&self, answers: &QuizAnswerSet, battery: &QuizBattery) -> Result<QuizResult> {
        let missing = answers.missing(battery);
        if !missing.is_empty() {
            return Err(ChatMbtiError::IncompleteQuiz { missing });
        }
        Ok(self.score(answers, battery))
    }
}

/// Map a signed total from `[-bound, +bound]` onto `[0, 100]`, without clamping
pub fn display_score(total: i32, bound: i32) -> i32 {
    let span = f64::from(2 * bound);
    ((f64::from(total + bound) / span) * 100.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u32, dimension: Dimension, reversed: bool) -> QuizQuestion {
        QuizQuestion {
            id,
            text: format!("question {id}"),
            dimension,
            reversed,
        }
    }

    #[test]
    fn test_embedded_battery_is_balanced() {
        let battery = QuizBattery::embedded().unwrap();
        assert_eq!(battery.len(), 12);
        for dimension in Dimension::ALL {
            assert_eq!(battery.max_total(dimension), 6, "{dimension}");
        }
        assert!(battery.dimensions_exceeding(6).is_empty());
    }

    #[test]
    fn test_display_score_mapping() {
        assert_eq!(display_score(-6, 6), 0);
        assert_eq!(display_score(0, 6), 50);
        assert_eq!(display_score(1, 6), 58);
        assert_eq!(display_score(6, 6), 100);
        // Not clamped
        assert_eq!(display_score(8, 6), 117);
        assert_eq!(display_score(-8, 6), -17);
    }

    #[test]
    fn test_likert_conversions() {
        assert_eq!(Likert::try_from(-2).unwrap(), Likert::StronglyDisagree);
        assert!(matches!(
            Likert::try_from(3),
            Err(ChatMbtiError::InvalidAnswer(3))
        ));
        assert_eq!(Likert::from_label("strongly agree"), Some(Likert::StronglyAgree));
        assert_eq!(Likert::from_label("maybe"), None);
        let answers: QuizAnswerSet = serde_json::from_str(r#"{"1": 2, "2": -1}"#).unwrap();
        assert_eq!(answers.get(1), Some(Likert::StronglyAgree));
        assert!(serde_json::from_str::<QuizAnswerSet>(r#"{"1": 5}"#).is_err());
    }

    #[test]
    fn test_reversed_questions_negate() {
        let battery = QuizBattery::new(
            "t",
            vec![
                question(1, Dimension::Energy, false),
                question(2, Dimension::Energy, true),
            ],
        )
        .unwrap();
        let answers: QuizAnswerSet = [(1, Likert::Agree), (2, Likert::StronglyAgree)]
            .into_iter()
            .collect();

        let result = QuizScorer::default().score(&answers, &battery);
        assert_eq!(result.raw, [-1, 0, 0, 0]);
        assert_eq!(result.mbti.to_string(), "INTJ");
        assert_eq!(result.scores, [42, 50, 50, 50]);
    }

    #[test]
    fn test_overflow_is_flagged_not_clamped() {
        let questions = (1..=4).map(|id| question(id, Dimension::Decisions, true)).collect();
        let battery = QuizBattery::new("big", questions).unwrap();
        assert_eq!(battery.dimensions_exceeding(6), vec![Dimension::Decisions]);

        let answers: QuizAnswerSet = (1..=4).map(|id| (id, Likert::StronglyAgree)).collect();
        let result = QuizScorer::default().score(&answers, &battery);
        assert_eq!(result.raw[2], -8);
        assert_eq!(result.scores[2], -17);
        assert_eq!(result.out_of_range, vec![Dimension::Decisions]);
        assert_eq!(result.mbti.letter(Dimension::Decisions), 'F');
    }

    #[test]
    fn test_battery_validation() {
        assert!(matches!(
            QuizBattery::new("empty", vec![]),
            Err(ChatMbtiError::InvalidQuizBattery(_))
        ));
        let dup = vec![
            question(1, Dimension::Energy, false),
            question(1, Dimension::Lifestyle, false),
        ];
        assert!(QuizBattery::new("dup", dup).is_err());
        assert!(QuizScorer::new(0).is_err());
    }

    #[test]
    fn test_score_complete_reports_missing_in_battery_order() {
        let battery = QuizBattery::embedded().unwrap();
        let answers: QuizAnswerSet = [(12, Likert::Agree), (1, Likert::Agree)].into_iter().collect();
        match QuizScorer::default().score_complete(&answers, &battery) {
            Err(ChatMbtiError::IncompleteQuiz { missing }) => {
                assert_eq!(missing, (2..=11).collect::<Vec<_>>());
            }
            other => panic!("expected IncompleteQuiz, got {other:?}"),
        }
    }

    #[test]
    fn test_answers_from_toml() {
        let set = QuizAnswerSet::from_toml_str(
            "[[answers]]\nid = 1\nanswer = 2\n\n[[answers]]\nid = 4\nanswer = -1\n",
        )
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(1), Some(Likert::StronglyAgree));
        assert_eq!(set.get(4), Some(Likert::Disagree));

        assert!(QuizAnswerSet::from_toml_str("[[answers]]\nid = 1\nanswer = 3\n").is_err());
        assert!(QuizAnswerSet::from_toml_str("").unwrap().is_empty());
    }

    #[test]
    fn test_into_record_follows_chart_orientation() {
        let battery = QuizBattery::embedded().unwrap();
        // Neutral everywhere: ENTJ with 50s; the record must still respect the letters
        let result = QuizScorer::default().score(&QuizAnswerSet::new(), &battery);
        let record = result.into_record("You");
        assert_eq!(record.mbti.to_string(), "ENTJ");
        assert_eq!(record.scores, [55, 55, 45, 45]);
    }
}
