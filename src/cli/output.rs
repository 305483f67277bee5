//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `chatmbti` CLI

use crate::models::PersonalityRecord;
use crate::personality::traits;
use crate::personality::Alignment;
use crate::personality::Dimension;
use crate::personality::QuizResult;
use crate::places::MeetingPlan;
use crate::transcript::ExtractionStats;
use crate::transcript::Transcript;
use crate::AppConfig;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// This prevents panics when truncating strings with multi-byte UTF-8 characters (emojis, CJK)
///
/// # Returns
/// Truncated string with "..." suffix if truncated, otherwise the original string
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Horizontal 0-100 bar with a marker at `score`
#[must_use]
pub fn spectrum_bar(score: i32, width: usize) -> String {
    let clamped = score.clamp(0, 100) as usize;
    let pos = (clamped * width.saturating_sub(1)) / 100;
    (0..width).map(|i| if i == pos { '●' } else { '─' }).collect()
}

/// Print the speakers retained by the extractor
pub fn print_transcript(transcript: &Transcript, stats: &ExtractionStats) {
    println!(
        "💬 Found {} speaker(s) ({} of {} kept, {} lines accepted, {} filtered, {} skipped)",
        transcript.len(),
        stats.speakers_kept,
        stats.speakers_seen,
        stats.accepted,
        stats.filtered,
        stats.malformed
    );
    for entry in transcript.entries() {
        println!();
        println!("  👤 {} ({} messages)", entry.name, entry.message_count);
        let preview = entry.text.replace('\n', " / ");
        println!("     {}", truncate_str(&preview, 80));
    }
}

/// Print analysis records with a spectrum per dimension
pub fn print_records(records: &[PersonalityRecord]) {
    println!("🧠 MBTI analysis for {} speaker(s):", records.len());
    for record in records {
        println!();
        println!(
            "  👤 {} - {} ({})",
            record.name,
            record.mbti,
            traits::nickname(&record.mbti)
        );
        for dimension in Dimension::ALL {
            let (left, right) = dimension.poles();
            let score = record.scores[dimension.index()];
            println!(
                "     {:<12} {} {} {} {:>3}",
                dimension.label(),
                left,
                spectrum_bar(score, 21),
                right,
                score
            );
        }
        println!("     ✨ {}", traits::traits_for(&record.mbti).join(", "));
    }
}

pub fn print_alignment(mbti: &str, alignment: &Alignment) {
    match alignment {
        Alignment::Aligned { scores, clamped } => {
            println!("🎯 Scores aligned with {}: {:?}", mbti.to_uppercase(), scores);
            for dimension in Dimension::ALL {
                if clamped[dimension.index()] {
                    println!("   ↳ {} clamped to match the code", dimension.label());
                }
            }
        }
        Alignment::Defaulted { scores, reason } => {
            print_warning(&format!("Falling back to neutral scores ({reason:?})"));
            println!("🎯 Scores: {scores:?}");
        }
    }
}

/// Print a scored self-test
pub fn print_quiz_result(result: &QuizResult) {
    println!();
    println!(
        "🎉 Your type: {} ({})",
        result.mbti,
        traits::nickname(&result.mbti)
    );
    println!("   Battery version: {}", result.battery_version);
    for dimension in Dimension::ALL {
        let (first, second) = dimension.quiz_letters();
        let i = dimension.index();
        println!(
            "   {:<12} {} {:>3}% (raw {:+})",
            dimension.label(),
            if result.raw[i] >= 0 { first } else { second },
            result.scores[i],
            result.raw[i]
        );
    }
    if !result.out_of_range.is_empty() {
        print_warning(&format!(
            "Scores outside 0-100 on {:?}: the battery exceeds the scale bound",
            result.out_of_range
        ));
    }
    println!("   ✨ {}", traits::traits_for(&result.mbti).join(", "));
}

/// Print a meeting plan
pub fn print_meeting_plan(plan: &MeetingPlan) {
    println!("☕ Searching for: {} ({})", plan.keyword, plan.place_type);
    for location in &plan.locations {
        let source = if location.known { "known" } else { "default" };
        println!(
            "   📍 {} → {:.4}, {:.4} ({})",
            location.name, location.coordinates.lat, location.coordinates.lng, source
        );
    }
    if !plan.rejected.is_empty() {
        print_warning(&format!("Ignored (not a place): {}", plan.rejected.join(", ")));
    }
    if plan.locations.len() > 1 {
        println!(
            "   🤝 Meeting point: {:.4}, {:.4}",
            plan.meeting_point.lat, plan.meeting_point.lng
        );
    }
    println!("   Radius: {} m", plan.radius_m);
    if let Some(link) = &plan.maps_link {
        println!("   🔗 {link}");
    }
}

/// Mask an API key, keeping only its last four characters
#[must_use]
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count == 0 {
        "(not set)".to_string()
    } else if count <= 4 {
        "***masked***".to_string()
    } else {
        let tail: String = key.chars().skip(count - 4).collect();
        format!("***{tail}")
    }
}

pub fn print_config(config: &AppConfig) {
    println!("📋 chatmbti Configuration:");
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!();

    println!("🤖 LLM:");
    println!("  Endpoint: {}", config.llm_endpoint());
    println!("  Key: {}", mask_key(config.llm_key()));
    println!("  Model: {}", config.llm_model());
    println!("  Temperature: {}", config.llm.temperature);
    println!("  Timeout: {}s", config.llm.timeout_secs);
    println!();

    println!("🧠 Analysis:");
    println!(
        "  Max chars per speaker: {}",
        config.analysis.max_chars_per_speaker
    );
    println!("  Interview history: {}", config.analysis.history_window);
    println!(
        "  Growth coach history: {}",
        config.analysis.growth_history_window
    );
    println!();

    println!("🧹 Filters:");
    println!("  Min messages: {}", config.filters.min_messages);
    println!(
        "  Media placeholders: {}",
        config.filters.media_placeholders.len()
    );
    println!("  System notices: {}", config.filters.system_notices.len());
    println!("  Invalid names: {:?}", config.filters.invalid_names);
    println!();

    println!("📝 Quiz:");
    println!("  Scale bound: {}", config.scale_bound());
    println!(
        "  Battery: {}",
        config
            .quiz
            .battery_path
            .as_deref()
            .unwrap_or("(embedded)")
    );
    println!();

    println!("🌐 Server:");
    println!("  Address: {}:{}", config.server.host, config.server.port);
    println!("  CORS: {}", config.server.cors);
}

/// Print colored output functions
pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    println!("❌ {msg}");
}

pub fn print_prompt(msg: &str) {
    print!("{msg}");
    let _ = std::io::Write::flush(&mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("你好世界", 2), "你好...");
        assert_eq!(truncate_str("short", 10), "short");
    }

    #[test]
    fn test_spectrum_bar() {
        assert_eq!(spectrum_bar(0, 5), "●────");
        assert_eq!(spectrum_bar(100, 5), "────●");
        assert_eq!(spectrum_bar(50, 5), "──●──");
        assert_eq!(spectrum_bar(150, 3), "──●");
    }

    #[test]
    fn test_mask_key() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("abc"), "***masked***");
        assert_eq!(mask_key("sk-1234567890"), "***7890");
    }
}
