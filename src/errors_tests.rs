//! Unit tests for error handling
//!
//! Tests error types, conversions, and error message formatting.

#[cfg(test)]
mod tests {
    use std::io;

    use crate::errors::ChatMbtiError;
    use crate::Result;

    // ====== Error Type Tests ======

    #[test]
    fn test_config_error() {
        let error = ChatMbtiError::ConfigError("Invalid configuration".to_string());
        assert!(matches!(error, ChatMbtiError::ConfigError(_)));
        let display = format!("{}", error);
        assert!(display.contains("configuration"));
    }

    #[test]
    fn test_invalid_mbti() {
        let error = ChatMbtiError::InvalidMbti("XYZW".to_string());
        assert_eq!(error.to_string(), "Invalid MBTI code: XYZW");
    }

    #[test]
    fn test_incomplete_quiz_lists_missing() {
        let error = ChatMbtiError::IncompleteQuiz {
            missing: vec![3, 7],
        };
        assert_eq!(
            error.to_string(),
            "Quiz incomplete: unanswered question(s) [3, 7]"
        );
    }

    #[test]
    fn test_invalid_answer() {
        let error = ChatMbtiError::InvalidAnswer(5);
        assert!(error.to_string().contains("-2..=2"));
    }

    #[test]
    fn test_llm_error() {
        let error = ChatMbtiError::LlmError("timeout".to_string());
        assert_eq!(format!("{}", error), "LLM error: timeout");
    }

    // ====== Error Conversion Tests ======

    #[test]
    fn test_error_from_io() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: ChatMbtiError = io_error.into();
        assert!(matches!(error, ChatMbtiError::Io(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: ChatMbtiError = json_error.into();
        assert!(matches!(error, ChatMbtiError::Serialization(_)));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("a = ").unwrap_err();
        let error: ChatMbtiError = toml_error.into();
        assert!(matches!(error, ChatMbtiError::TomlParsing(_)));
    }

    // ====== Error Chain Tests ======

    #[test]
    fn test_error_source_chain() {
        use std::error::Error;

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: ChatMbtiError = io_error.into();
        assert!(error.source().is_some());
    }

    // ====== Result Type Tests ======

    #[test]
    fn test_result_question_mark() {
        fn parse(code: &str) -> Result<String> {
            let mbti: crate::personality::MbtiType = code.parse()?;
            Ok(mbti.to_string())
        }

        assert_eq!(parse("enfp").unwrap(), "ENFP");
        assert!(matches!(parse("EN"), Err(ChatMbtiError::InvalidMbti(_))));
    }
}
