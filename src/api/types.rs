//! API request and response types

use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use crate::charts::ChartBundle;
use crate::llm::ChatMessage;
use crate::models::PersonalityRecord;
use crate::personality::Likert;
use crate::personality::MbtiType;
use crate::personality::QuizAnswerSet;
use crate::personality::QuizQuestion;
use crate::personality::QuizResult;
use crate::transcript::ExtractionStats;
use crate::transcript::SpeakerTranscript;
use crate::ChatMbtiError;

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a failed request
pub fn status_for(error: &ChatMbtiError) -> StatusCode {
    match error {
        ChatMbtiError::InvalidMbti(_)
        | ChatMbtiError::InvalidAnswer(_)
        | ChatMbtiError::IncompleteQuiz { .. }
        | ChatMbtiError::UnknownSpeaker(_) => StatusCode::BAD_REQUEST,
        ChatMbtiError::AnalysisError(_) | ChatMbtiError::LlmError(_) | ChatMbtiError::Http(_) => {
            StatusCode::BAD_GATEWAY
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Raw chat export
#[derive(Debug, Deserialize)]
pub struct TranscriptRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub speakers: Vec<SpeakerTranscript>,
    pub stats: ExtractionStats,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    /// Speakers to analyze; everyone when empty
    #[serde(default)]
    pub speakers: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub results: Vec<PersonalityRecord>,
    pub charts: ChartBundle,
}

#[derive(Debug, Deserialize)]
pub struct AlignRequest {
    #[serde(default)]
    pub mbti: Option<String>,
    #[serde(default)]
    pub scores: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct LikertOption {
    pub value: i32,
    pub label: &'static str,
}

/// Questions plus the answer scale a client should offer
#[derive(Debug, Serialize)]
pub struct QuizBatteryResponse {
    pub version: String,
    pub questions: Vec<QuizQuestion>,
    pub options: Vec<LikertOption>,
}

#[derive(Debug, Deserialize)]
pub struct QuizScoreRequest {
    pub answers: QuizAnswerSet,
    /// Label for the chart-ready record
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct QuizScoreResponse {
    pub result: QuizResult,
    pub record: PersonalityRecord,
}

/// One turn of the interview or growth conversation
#[derive(Debug, Deserialize)]
pub struct ConversationRequest {
    pub mbti: MbtiType,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct StyleRequest {
    pub mbti: MbtiType,
}

/// Meet-up search around one or more locations ("A and B")
#[derive(Debug, Deserialize)]
pub struct PlacesRequest {
    pub location: String,
    #[serde(default)]
    pub place_type: Option<String>,
    #[serde(default)]
    pub mbti: Option<MbtiType>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub reply: String,
}

impl LikertOption {
    pub fn all() -> Vec<Self> {
        Likert::ALL
            .into_iter()
            .map(|l| Self {
                value: l.value(),
                label: l.label(),
            })
            .collect()
    }
}
