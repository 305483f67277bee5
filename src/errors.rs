use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatMbtiError {
    #[error("Invalid MBTI code: {0}")]
    InvalidMbti(String),

    #[error("Invalid quiz answer: {0} (expected an integer in -2..=2)")]
    InvalidAnswer(i64),

    #[error("Quiz incomplete: unanswered question(s) {missing:?}")]
    IncompleteQuiz { missing: Vec<u32> },

    #[error("Invalid quiz battery: {0}")]
    InvalidQuizBattery(String),

    #[error("Unknown speaker: {0}")]
    UnknownSpeaker(String),

    #[error("Analysis error: {0}")]
    AnalysisError(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChatMbtiError>;
