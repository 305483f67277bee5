/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::error;
use tracing::info;

use crate::analysis::MbtiAnalyzer;
use crate::api::types::status_for;
use crate::api::types::AlignRequest;
use crate::api::types::AnalyzeRequest;
use crate::api::types::AnalyzeResponse;
use crate::api::types::ApiResponse;
use crate::api::types::ConversationRequest;
use crate::api::types::HealthResponse;
use crate::api::types::LikertOption;
use crate::api::types::PlacesRequest;
use crate::api::types::QuizBatteryResponse;
use crate::api::types::QuizScoreRequest;
use crate::api::types::QuizScoreResponse;
use crate::api::types::ReplyResponse;
use crate::api::types::StyleRequest;
use crate::api::types::TranscriptRequest;
use crate::api::types::TranscriptResponse;
use crate::charts::ChartBundle;
use crate::coach::Coach;
use crate::config::AppConfig;
use crate::llm::ChatBackend;
use crate::personality::align;
use crate::personality::Alignment;
use crate::personality::QuizBattery;
use crate::personality::QuizScorer;
use crate::places::plan_meeting;
use crate::places::MeetingPlan;
use crate::transcript::TranscriptExtractor;
use crate::ChatMbtiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<TranscriptExtractor>,
    pub analyzer: Arc<MbtiAnalyzer>,
    pub coach: Arc<Coach>,
    pub battery: Arc<QuizBattery>,
    pub scorer: QuizScorer,
}

impl AppState {
    /// Wire every service from the configuration around one chat backend
    pub fn new(config: &AppConfig, backend: Arc<dyn ChatBackend>) -> crate::Result<Self> {
        Ok(Self {
            extractor: Arc::new(TranscriptExtractor::from_config(&config.filters)),
            analyzer: Arc::new(MbtiAnalyzer::new(backend.clone(), &config.analysis)),
            coach: Arc::new(Coach::new(backend, &config.analysis)),
            battery: Arc::new(QuizBattery::load(&config.quiz)?),
            scorer: QuizScorer::from_config(&config.quiz)?,
        })
    }
}

type HandlerResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<T>>)>;

fn failure<T>(context: &str, e: &ChatMbtiError) -> (StatusCode, Json<ApiResponse<T>>) {
    let status = status_for(e);
    if status.is_server_error() {
        error!("{} failed: {}", context, e);
    } else {
        info!("{} rejected: {}", context, e);
    }
    (status, Json(ApiResponse::error(e.to_string())))
}

/// Health check handler
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::success(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// Split a chat export into speakers (POST /api/transcript)
pub async fn extract_transcript(
    State(state): State<AppState>,
    Json(req): Json<TranscriptRequest>,
) -> Json<ApiResponse<TranscriptResponse>> {
    let (transcript, stats) = state.extractor.extract_with_stats(&req.text);
    info!(
        "POST /api/transcript - {} speaker(s) kept of {}",
        stats.speakers_kept, stats.speakers_seen
    );
    Json(ApiResponse::success(TranscriptResponse {
        speakers: transcript.entries().to_vec(),
        stats,
    }))
}

/// Analyze speakers of a chat export (POST /api/analyze)
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> HandlerResult<AnalyzeResponse> {
    let start_time = std::time::Instant::now();
    let transcript = state.extractor.extract(&req.text);
    if transcript.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(
                "No speaker has enough messages to analyze",
            )),
        ));
    }

    let results = state
        .analyzer
        .analyze(&transcript, &req.speakers)
        .await
        .map_err(|e| failure("POST /api/analyze", &e))?;

    info!(
        "POST /api/analyze - {} record(s) - {}ms",
        results.len(),
        start_time.elapsed().as_millis()
    );
    let charts = ChartBundle::from_records(&results);
    Ok(Json(ApiResponse::success(AnalyzeResponse { results, charts })))
}

/// Align scores with a code (POST /api/align)
pub async fn align_scores(Json(req): Json<AlignRequest>) -> Json<ApiResponse<Alignment>> {
    Json(ApiResponse::success(align(req.mbti.as_deref(), &req.scores)))
}

/// Self-test questions (GET /api/quiz)
pub async fn get_quiz(State(state): State<AppState>) -> Json<ApiResponse<QuizBatteryResponse>> {
    Json(ApiResponse::success(QuizBatteryResponse {
        version: state.battery.version().to_string(),
        questions: state.battery.questions().to_vec(),
        options: LikertOption::all(),
    }))
}

/// Score a completed self-test (POST /api/quiz/score)
pub async fn score_quiz(
    State(state): State<AppState>,
    Json(req): Json<QuizScoreRequest>,
) -> HandlerResult<QuizScoreResponse> {
    let result = state
        .scorer
        .score_complete(&req.answers, &state.battery)
        .map_err(|e| failure("POST /api/quiz/score", &e))?;

    info!("POST /api/quiz/score - {}", result.mbti);
    let record = result
        .clone()
        .into_record(req.name.unwrap_or_else(|| "Me".to_string()));
    Ok(Json(ApiResponse::success(QuizScoreResponse { result, record })))
}

/// One interview turn (POST /api/interview)
pub async fn interview(
    State(state): State<AppState>,
    Json(req): Json<ConversationRequest>,
) -> Json<ApiResponse<ReplyResponse>> {
    info!("POST /api/interview - {}", req.mbti);
    let reply = state
        .coach
        .interview_step(&req.mbti, &req.history, &req.message)
        .await;
    Json(ApiResponse::success(ReplyResponse { reply }))
}

/// One growth-coach turn (POST /api/growth)
pub async fn growth(
    State(state): State<AppState>,
    Json(req): Json<ConversationRequest>,
) -> Json<ApiResponse<ReplyResponse>> {
    info!("POST /api/growth - {}", req.mbti);
    let reply = state
        .coach
        .growth_step(&req.mbti, &req.history, &req.message)
        .await;
    Json(ApiResponse::success(ReplyResponse { reply }))
}

/// Style guide for a type (POST /api/style)
pub async fn style(
    State(state): State<AppState>,
    Json(req): Json<StyleRequest>,
) -> Json<ApiResponse<ReplyResponse>> {
    info!("POST /api/style - {}", req.mbti);
    let reply = state.coach.style_advice(&req.mbti).await;
    Json(ApiResponse::success(ReplyResponse { reply }))
}

/// Meeting point and search keyword (POST /api/places)
pub async fn places(Json(req): Json<PlacesRequest>) -> Json<ApiResponse<MeetingPlan>> {
    let plan = plan_meeting(&req.location, req.place_type.as_deref(), req.mbti.as_ref());
    info!(
        "POST /api/places - {} location(s), keyword {:?}",
        plan.locations.len(),
        plan.keyword
    );
    Json(ApiResponse::success(plan))
}
