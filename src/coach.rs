//! Conversational helpers built on the chat backend: the interview that
//! refines a self-test result, the growth coach and the style advisor.
//!
//! These never fail: a backend error is logged and turned into a reply the
//! user can read.

use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::llm::prompts::MbtiPrompts;
use crate::llm::ChatBackend;
use crate::llm::ChatMessage;
use crate::llm::ChatOptions;
use crate::personality::traits;
use crate::personality::MbtiType;

lazy_static! {
    static ref CJK_PATTERN: Regex =
        Regex::new(r"[\u{4e00}-\u{9fff}]").expect("CJK pattern is valid");
}

/// Whether the text contains CJK unified ideographs
pub fn is_chinese(text: &str) -> bool {
    CJK_PATTERN.is_match(text)
}

fn language_hint(message: &str) -> &'static str {
    if is_chinese(message) {
        "Reply in Traditional Chinese (繁體中文)."
    } else {
        "Reply in English."
    }
}

pub struct Coach {
    backend: Arc<dyn ChatBackend>,
    history_window: usize,
    growth_history_window: usize,
}

impl Coach {
    pub fn new(backend: Arc<dyn ChatBackend>, config: &AnalysisConfig) -> Self {
        Self {
            backend,
            history_window: config.history_window,
            growth_history_window: config.growth_history_window,
        }
    }

    pub fn interview_messages(
        &self,
        mbti: &MbtiType,
        history: &[ChatMessage],
        message: &str,
    ) -> Vec<ChatMessage> {
        let system = MbtiPrompts::interview().render_with(&[
            ("mbti", mbti.as_string().as_str()),
            ("language", language_hint(message)),
        ]);
        conversation(system, history, self.history_window, message)
    }

    /// One turn of the psychologist interview
    pub async fn interview_step(
        &self,
        mbti: &MbtiType,
        history: &[ChatMessage],
        message: &str,
    ) -> String {
        let messages = self.interview_messages(mbti, history, message);
        match self.backend.chat(&messages, ChatOptions::text()).await {
            Ok(reply) if !reply.content.trim().is_empty() => reply.content,
            Ok(_) => "I'm listening... Tell me more.".to_string(),
            Err(e) => {
                warn!("Interview step failed: {}", e);
                "I'm having trouble processing that. Could you rephrase?".to_string()
            }
        }
    }

    pub fn growth_messages(
        &self,
        mbti: &MbtiType,
        history: &[ChatMessage],
        message: &str,
    ) -> Vec<ChatMessage> {
        let code = mbti.as_string();
        let traits = traits::traits_for(mbti).join(", ");
        let system = MbtiPrompts::growth_coach().render_with(&[
            ("mbti", code.as_str()),
            ("nickname", traits::nickname(mbti)),
            ("traits", traits.as_str()),
            ("language", language_hint(message)),
        ]);
        conversation(system, history, self.growth_history_window, message)
    }

    /// One turn of the growth coach
    pub async fn growth_step(
        &self,
        mbti: &MbtiType,
        history: &[ChatMessage],
        message: &str,
    ) -> String {
        let messages = self.growth_messages(mbti, history, message);
        match self.backend.chat(&messages, ChatOptions::text()).await {
            Ok(reply) if !reply.content.trim().is_empty() => reply.content,
            Ok(_) => "Let me think about that...".to_string(),
            Err(e) => {
                warn!("Growth coach step failed: {}", e);
                "I'm having trouble generating advice right now. Please try again.".to_string()
            }
        }
    }

    /// Markdown outfit guide for a type
    pub async fn style_advice(&self, mbti: &MbtiType) -> String {
        let code = mbti.as_string();
        let system = MbtiPrompts::style_advice().render_with(&[("mbti", code.as_str())]);
        debug!("Requesting style advice for {}", code);

        match self
            .backend
            .chat(&[ChatMessage::system(system)], ChatOptions::text())
            .await
        {
            Ok(reply) if !reply.content.trim().is_empty() => reply.content,
            Ok(_) => "No style advice generated.".to_string(),
            Err(e) => {
                warn!("Style advice failed: {}", e);
                "Style advice is unavailable right now. Please try again.".to_string()
            }
        }
    }
}

/// System prompt, the last `window` history messages, then the new user message
fn conversation(
    system: String,
    history: &[ChatMessage],
    window: usize,
    message: &str,
) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(window);
    let mut messages = Vec::with_capacity(history.len() - start + 2);
    messages.push(ChatMessage::system(system));
    messages.extend_from_slice(&history[start..]);
    messages.push(ChatMessage::user(message));
    messages
}
