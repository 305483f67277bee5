//! CLI command handlers
//!
//! This module contains all the command handlers for the chatmbti CLI

use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::analysis::MbtiAnalyzer;
use crate::charts::ChartBundle;
use crate::cli::output::*;
use crate::llm::ChatBackend;
use crate::llm::LlmService;
use crate::personality::align;
use crate::personality::Likert;
use crate::personality::MbtiType;
use crate::personality::QuizAnswerSet;
use crate::personality::QuizBattery;
use crate::personality::QuizScorer;
use crate::places::plan_meeting;
use crate::transcript::TranscriptExtractor;
use crate::AppConfig;
use crate::ChatMbtiError;
use crate::Result;

/// Handle parse command
pub fn handle_parse(config: &AppConfig, file: &Path, json: bool) -> Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let extractor = TranscriptExtractor::from_config(&config.filters);
    let (transcript, stats) = extractor.extract_with_stats(&raw);
    info!("Parsed {}: {} speaker(s)", file.display(), transcript.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&transcript)?);
        return Ok(());
    }

    if transcript.is_empty() {
        print_warning(&format!(
            "No speaker has at least {} messages in {}",
            extractor.filters().min_messages,
            file.display()
        ));
        return Ok(());
    }
    print_transcript(&transcript, &stats);
    Ok(())
}

/// Handle analyze command
pub async fn handle_analyze(
    config: &AppConfig,
    file: &Path,
    speakers: &[String],
    json: bool,
) -> Result<()> {
    let raw = std::fs::read_to_string(file)?;
    let transcript = TranscriptExtractor::from_config(&config.filters).extract(&raw);
    if transcript.is_empty() {
        print_warning("No speaker has enough messages to analyze");
        return Ok(());
    }

    let backend: Arc<dyn ChatBackend> = Arc::new(LlmService::new(config)?);
    let analyzer = MbtiAnalyzer::new(backend, &config.analysis);

    if !json {
        print_info(&format!(
            "Analyzing with {} at {}...",
            config.llm_model(),
            config.llm_endpoint()
        ));
    }
    let records = analyzer.analyze(&transcript, speakers).await?;

    if json {
        let output = serde_json::json!({
            "results": records,
            "charts": ChartBundle::from_records(&records),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_records(&records);
    }
    Ok(())
}

/// Handle align command
pub fn handle_align(mbti: &str, scores: &[f64]) -> Result<()> {
    let alignment = align(Some(mbti), scores);
    print_alignment(mbti, &alignment);
    Ok(())
}

/// Handle quiz command
pub fn handle_quiz(config: &AppConfig, answers: Option<&Path>) -> Result<()> {
    let battery = QuizBattery::load(&config.quiz)?;
    let scorer = QuizScorer::from_config(&config.quiz)?;

    let answers = match answers {
        Some(path) => QuizAnswerSet::from_file(path)?,
        None => {
            println!(
                "📝 MBTI self-test ({} questions, battery {})",
                battery.len(),
                battery.version()
            );
            println!("   Answer -2 (strongly disagree) to 2 (strongly agree), or type the label.");
            let stdin = std::io::stdin();
            run_interactive_quiz(&battery, stdin.lock(), std::io::stdout())?
        }
    };

    let result = scorer.score_complete(&answers, &battery)?;
    print_quiz_result(&result);
    Ok(())
}

/// Ask every question on `output` and read answers from `input`.
///
/// Invalid answers are asked again; end of input stops early and the
/// collected (incomplete) answers are returned.
pub fn run_interactive_quiz<R: BufRead, W: Write>(
    battery: &QuizBattery,
    mut input: R,
    mut output: W,
) -> Result<QuizAnswerSet> {
    let mut answers = QuizAnswerSet::new();
    let total = battery.len();

    'questions: for (i, question) in battery.questions().iter().enumerate() {
        writeln!(output, "\n[{}/{}] {}", i + 1, total, question.text)?;
        loop {
            write!(output, "Your answer (-2..2): ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break 'questions;
            }
            match parse_answer(&line) {
                Some(answer) => {
                    answers.insert(question.id, answer);
                    break;
                }
                None => writeln!(output, "⚠️  Please enter a number from -2 to 2")?,
            }
        }
    }
    Ok(answers)
}

fn parse_answer(line: &str) -> Option<Likert> {
    let trimmed = line.trim();
    trimmed
        .parse::<i64>()
        .ok()
        .and_then(|v| Likert::try_from(v).ok())
        .or_else(|| Likert::from_label(trimmed))
}

/// Handle places command
pub fn handle_places(
    location: &str,
    place_type: Option<&str>,
    mbti: Option<&str>,
    json: bool,
) -> Result<()> {
    let mbti = mbti.map(str::parse::<MbtiType>).transpose()?;
    let plan = plan_meeting(location, place_type, mbti.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_meeting_plan(&plan);
    }
    Ok(())
}

/// Handle serve command
pub async fn handle_serve(
    config: &AppConfig,
    host: Option<String>,
    port: Option<u16>,
    cors: bool,
) -> Result<()> {
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);
    if port == 0 {
        return Err(ChatMbtiError::ConfigError(
            "server port must be non-zero".to_string(),
        ));
    }
    crate::api::serve_api(config, host, port, cors || config.server.cors).await
}

/// Handle config command
pub fn handle_config(config: &AppConfig) -> Result<()> {
    print_config(config);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer(" 2\n"), Some(Likert::StronglyAgree));
        assert_eq!(parse_answer("-1"), Some(Likert::Disagree));
        assert_eq!(parse_answer("neutral"), Some(Likert::Neutral));
        assert_eq!(parse_answer("3"), None);
        assert_eq!(parse_answer("maybe"), None);
    }

    #[test]
    fn test_interactive_quiz_reasks_and_stops_at_eof() {
        let battery = QuizBattery::embedded().unwrap();
        let input = "1\nnope\n-2\n0\n";
        let mut output = Vec::new();

        let answers = run_interactive_quiz(&battery, input.as_bytes(), &mut output).unwrap();
        assert_eq!(answers.len(), 3);
        assert_eq!(answers.get(1), Some(Likert::Agree));
        assert_eq!(answers.get(2), Some(Likert::StronglyDisagree));
        assert_eq!(answers.get(3), Some(Likert::Neutral));

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("[1/12]"));
        assert!(shown.contains("Please enter a number"));
    }

    #[test]
    fn test_places_rejects_bad_code() {
        assert!(handle_places("NCKU", None, Some("INTJ"), true).is_ok());
        assert!(matches!(
            handle_places("NCKU", None, Some("XYZW"), true),
            Err(ChatMbtiError::InvalidMbti(_))
        ));
    }
}
