//! Per-speaker MBTI analysis through the chat backend

use std::sync::Arc;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::llm::extraction::extract_as;
use crate::llm::prompts::MbtiPrompts;
use crate::llm::ChatBackend;
use crate::llm::ChatMessage;
use crate::llm::ChatOptions;
use crate::models::AnalysisResponse;
use crate::models::PersonalityRecord;
use crate::personality::align;
use crate::personality::MbtiType;
use crate::transcript::SpeakerTranscript;
use crate::transcript::Transcript;
use crate::ChatMbtiError;
use crate::Result;

/// Sends speaker samples to the model and turns the reply into aligned records
#[derive(Clone)]
pub struct MbtiAnalyzer {
    backend: Arc<dyn ChatBackend>,
    max_chars_per_speaker: usize,
}

impl MbtiAnalyzer {
    pub fn new(backend: Arc<dyn ChatBackend>, config: &AnalysisConfig) -> Self {
        Self {
            backend,
            max_chars_per_speaker: config.max_chars_per_speaker,
        }
    }

    /// System prompt with the guard rules, then one user message with every sample
    pub fn build_messages(&self, speakers: &[&SpeakerTranscript]) -> Vec<ChatMessage> {
        let people = speakers
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let system = format!(
            "{}{}",
            MbtiPrompts::analysis_system(),
            MbtiPrompts::analysis_guard().render_with(&[("people", people.as_str())])
        );

        let mut user_content = String::new();
        for speaker in speakers {
            let sample: String = speaker
                .text
                .chars()
                .take(self.max_chars_per_speaker)
                .collect();
            user_content.push_str(&format!("Speaker [{}]: {}\n\n", speaker.name, sample));
        }

        vec![ChatMessage::system(system), ChatMessage::user(user_content)]
    }

    /// Analyze the selected speakers of a transcript (everyone when `selected` is empty)
    pub async fn analyze<S: AsRef<str>>(
        &self,
        transcript: &Transcript,
        selected: &[S],
    ) -> Result<Vec<PersonalityRecord>> {
        let speakers = transcript.select(selected)?;
        self.analyze_speakers(&speakers).await
    }

    pub async fn analyze_speakers(
        &self,
        speakers: &[&SpeakerTranscript],
    ) -> Result<Vec<PersonalityRecord>> {
        if speakers.is_empty() {
            return Err(ChatMbtiError::AnalysisError(
                "No speakers to analyze".to_string(),
            ));
        }

        info!("Analyzing {} speaker(s)", speakers.len());
        let messages = self.build_messages(speakers);
        let reply = self.backend.chat(&messages, ChatOptions::json()).await?;
        debug!("Analysis reply: {} chars", reply.content.len());

        let response: AnalysisResponse = extract_as(&reply.content).map_err(|e| {
            ChatMbtiError::AnalysisError(format!("Invalid MBTI output: {e}"))
        })?;

        let names: Vec<&str> = speakers.iter().map(|s| s.name.as_str()).collect();
        records_from_response(response, &names)
    }
}

/// Validate the model's results against the requested speakers and align them
pub fn records_from_response(
    response: AnalysisResponse,
    expected: &[&str],
) -> Result<Vec<PersonalityRecord>> {
    if response.results.len() != expected.len() {
        return Err(ChatMbtiError::AnalysisError(format!(
            "Model analyzed {} people, expected {}",
            response.results.len(),
            expected.len()
        )));
    }

    response
        .results
        .into_iter()
        .zip(expected)
        .map(|(raw, expected_name)| {
            let name = if raw.name.trim().is_empty() {
                (*expected_name).to_string()
            } else {
                raw.name.trim().to_string()
            };
            let mbti = MbtiType::from_loose_code(&raw.mbti).map_err(|_| {
                ChatMbtiError::AnalysisError(format!(
                    "Model returned an unusable MBTI code for {}: {:?}",
                    name, raw.mbti
                ))
            })?;
            if mbti.as_string() != raw.mbti.trim() {
                debug!("Read model code {:?} as {} for {}", raw.mbti, mbti, name);
            }
            let alignment = align(Some(mbti.as_string().as_str()), &raw.scores);
            if alignment.is_defaulted() {
                warn!("Scores for {} defaulted: {:?}", name, alignment);
            }
            Ok(PersonalityRecord {
                name,
                mbti,
                scores: alignment.scores(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::transcript::TranscriptExtractor;

    /// Replies with a fixed text and remembers what it was sent
    struct ScriptedBackend {
        reply: String,
        seen: Mutex<Vec<ChatMessage>>,
    }

    impl ScriptedBackend {
        fn new(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: reply.to_string(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn chat(&self, messages: &[ChatMessage], _options: ChatOptions) -> Result<ChatMessage> {
            self.seen.lock().unwrap().extend_from_slice(messages);
            Ok(ChatMessage::assistant(self.reply.clone()))
        }
    }

    fn transcript() -> Transcript {
        let raw = "\
10:00\tAmy\tI love planning trips months ahead
10:01\tBen\tlet's just go tonight
10:02\tAmy\tspreadsheets make me happy
10:03\tBen\twho needs a plan
10:04\tAmy\tI booked the hotel already
10:05\tBen\tsee you there";
        TranscriptExtractor::default().extract(raw)
    }

    #[tokio::test]
    async fn test_analyze_aligns_records() {
        let backend = ScriptedBackend::new(
            r#"```json
{"results": [
  {"name": "Amy", "mbti": "ISTJ", "scores": [80, 20, 30, 10]},
  {"name": "Ben", "mbti": "ESFP", "scores": [90, 40, 60, 20]}
]}
```"#,
        );
        let analyzer = MbtiAnalyzer::new(backend.clone(), &AnalysisConfig::default());

        let records = analyzer.analyze::<&str>(&transcript(), &[]).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Amy");
        assert_eq!(records[0].scores, [45, 20, 30, 10]);
        assert_eq!(records[1].mbti.to_string(), "ESFP");
        assert_eq!(records[1].scores, [90, 40, 60, 55]);

        let seen = backend.seen.lock().unwrap();
        assert!(seen[0].content.contains("PEOPLE TO ANALYZE:\nAmy, Ben"));
        assert!(seen[1].content.starts_with("Speaker [Amy]: I love planning"));
    }

    #[tokio::test]
    async fn test_count_mismatch_is_rejected() {
        let backend = ScriptedBackend::new(
            r#"{"results": [{"name": "Amy + Ben", "mbti": "INTJ", "scores": [1, 2, 3, 4]}]}"#,
        );
        let analyzer = MbtiAnalyzer::new(backend, &AnalysisConfig::default());

        let err = analyzer
            .analyze::<&str>(&transcript(), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, ChatMbtiError::AnalysisError(msg) if msg.contains("expected 2")));
    }

    #[tokio::test]
    async fn test_unknown_speaker_is_rejected() {
        let backend = ScriptedBackend::new("{}");
        let analyzer = MbtiAnalyzer::new(backend, &AnalysisConfig::default());

        let err = analyzer
            .analyze(&transcript(), &["Zoe"])
            .await
            .unwrap_err();
        assert!(matches!(err, ChatMbtiError::UnknownSpeaker(name) if name == "Zoe"));
    }

    #[tokio::test]
    async fn test_reply_without_json() {
        let backend = ScriptedBackend::new("Sorry, I can't do that.");
        let analyzer = MbtiAnalyzer::new(backend, &AnalysisConfig::default());

        let err = analyzer.analyze(&transcript(), &["Amy"]).await.unwrap_err();
        assert!(matches!(err, ChatMbtiError::AnalysisError(_)));
    }

    #[test]
    fn test_samples_are_truncated_by_chars() {
        let config = AnalysisConfig {
            max_chars_per_speaker: 3,
            ..AnalysisConfig::default()
        };
        let analyzer = MbtiAnalyzer::new(ScriptedBackend::new(""), &config);
        let speaker = SpeakerTranscript {
            name: "小明".to_string(),
            message_count: 3,
            text: "你好嗎朋友".to_string(),
        };

        let messages = analyzer.build_messages(&[&speaker]);
        assert_eq!(messages[1].content, "Speaker [小明]: 你好嗎\n\n");
    }

    #[test]
    fn test_records_fall_back_to_requested_name() {
        let response: AnalysisResponse =
            serde_json::from_str(r#"{"results": [{"mbti": "enfp", "scores": [60, 70]}]}"#).unwrap();
        let records = records_from_response(response, &["Amy"]).unwrap();
        assert_eq!(records[0].name, "Amy");
        assert_eq!(records[0].scores, [50, 50, 50, 50]);
    }

    #[test]
    fn test_records_read_decorated_code() {
        let response: AnalysisResponse = serde_json::from_str(
            r#"{"results": [{"name": "Amy", "mbti": "INTJ-A", "scores": [20, 70, 30, 40]}]}"#,
        )
        .unwrap();
        let records = records_from_response(response, &["Amy"]).unwrap();
        assert_eq!(records[0].mbti.to_string(), "INTJ");
        assert_eq!(records[0].scores, [20, 70, 30, 40]);
    }

    #[test]
    fn test_records_reject_unusable_code() {
        for code in ["XXXX", ""] {
            let response = AnalysisResponse {
                results: vec![crate::models::RawPersonalityRecord {
                    name: "Amy".to_string(),
                    mbti: code.to_string(),
                    scores: vec![1.0, 2.0, 3.0, 4.0],
                }],
            };
            assert!(matches!(
                records_from_response(response, &["Amy"]),
                Err(ChatMbtiError::AnalysisError(msg)) if msg.contains("unusable MBTI code")
            ));
        }
    }
}
