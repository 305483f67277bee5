use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub backtrace: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            backtrace: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_llm_endpoint")]
    pub llm_endpoint: String,
    #[serde(default)]
    pub llm_key: String,
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_llm_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_llm_model() -> String {
    "llama3.1:8b".to_string()
}

pub(crate) fn default_temperature() -> f32 {
    0.2
}

pub(crate) fn default_timeout_secs() -> u64 {
    180
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            llm_endpoint: default_llm_endpoint(),
            llm_key: String::new(),
            llm_model: default_llm_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Characters of each speaker's transcript sent to the model
    #[serde(default = "default_max_chars_per_speaker")]
    pub max_chars_per_speaker: usize,
    /// Messages of history kept for the interview conversation
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Messages of history kept for the growth coach conversation
    #[serde(default = "default_growth_history_window")]
    pub growth_history_window: usize,
}

pub(crate) fn default_max_chars_per_speaker() -> usize {
    600
}

pub(crate) fn default_history_window() -> usize {
    6
}

pub(crate) fn default_growth_history_window() -> usize {
    4
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_chars_per_speaker: default_max_chars_per_speaker(),
            history_window: default_history_window(),
            growth_history_window: default_growth_history_window(),
        }
    }
}

/// Noise filtering policy applied by the transcript extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersConfig {
    #[serde(default = "default_min_messages")]
    pub min_messages: usize,
    #[serde(default = "default_media_placeholders")]
    pub media_placeholders: Vec<String>,
    #[serde(default = "default_system_notices")]
    pub system_notices: Vec<String>,
    #[serde(default = "default_invalid_names")]
    pub invalid_names: Vec<String>,
    #[serde(default = "default_name_suffixes")]
    pub name_suffixes: Vec<String>,
}

pub(crate) fn default_min_messages() -> usize {
    3
}

pub(crate) fn default_media_placeholders() -> Vec<String> {
    to_strings(&["[Photos]", "[Stickers]"])
}

pub(crate) fn default_system_notices() -> Vec<String> {
    to_strings(&[
        "通話時間",
        "Call time",
        "Unsend message",
        "已收回訊息",
        "joined the chat",
        "invite",
        "加入聊天",
        "invited",
        "邀請",
    ])
}

pub(crate) fn default_invalid_names() -> Vec<String> {
    to_strings(&[
        "You",
        "you",
        "System",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ])
}

pub(crate) fn default_name_suffixes() -> Vec<String> {
    to_strings(&[" Photos", " Stickers"])
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            min_messages: default_min_messages(),
            media_placeholders: default_media_placeholders(),
            system_notices: default_system_notices(),
            invalid_names: default_invalid_names(),
            name_suffixes: default_name_suffixes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Raw accumulator bound mapped onto the 0-100 display range
    #[serde(default = "default_scale_bound")]
    pub scale_bound: i32,
    /// Optional battery file; the embedded battery is used when unset
    #[serde(default)]
    pub battery_path: Option<String>,
}

pub(crate) fn default_scale_bound() -> i32 {
    6
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            scale_bound: default_scale_bound(),
            battery_path: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_cors")]
    pub cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_cors() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors: default_cors(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub filters: FiltersConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default config file path
    pub fn load() -> crate::Result<Self> {
        // Try to load from config.toml first, then fall back to config.example.toml
        if Path::new("config.toml").exists() {
            Self::from_file("config.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!(
                "Using config.example.toml. Please create config.toml for production use."
            );
            Self::from_file("config.example.toml")
        } else {
            Err(crate::ChatMbtiError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "No config file found. Please create config.toml or config.example.toml",
            )))
        }
    }

    /// Reject values the rest of the crate cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        if self.quiz.scale_bound <= 0 {
            return Err(crate::ChatMbtiError::ConfigError(format!(
                "quiz.scale_bound must be positive, got {}",
                self.quiz.scale_bound
            )));
        }
        if self.filters.min_messages == 0 {
            return Err(crate::ChatMbtiError::ConfigError(
                "filters.min_messages must be at least 1".to_string(),
            ));
        }
        if url::Url::parse(&self.llm.llm_endpoint).is_err() {
            return Err(crate::ChatMbtiError::ConfigError(format!(
                "llm.llm_endpoint is not a valid URL: {}",
                self.llm.llm_endpoint
            )));
        }
        Ok(())
    }

    /// Get LLM endpoint
    pub fn llm_endpoint(&self) -> &str {
        &self.llm.llm_endpoint
    }

    /// Get LLM key
    pub fn llm_key(&self) -> &str {
        &self.llm.llm_key
    }

    /// Get LLM model
    pub fn llm_model(&self) -> &str {
        &self.llm.llm_model
    }

    /// Get quiz scale bound
    pub fn scale_bound(&self) -> i32 {
        self.quiz.scale_bound
    }
}
