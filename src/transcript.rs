//! Chat-log transcript extraction
//!
//! Turns an exported group chat (one `H:MM<TAB>Name<TAB>Message` or
//! `H:MM Name Message` line per message) into a per-speaker transcript.
//! Headers, date separators and continuation lines fail the time check and are
//! skipped; system notices, media placeholders and pseudo-speakers are filtered
//! by a [`TranscriptFilters`] policy; speakers with too few messages are
//! dropped. Extraction never fails: unusable input yields an empty transcript.

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::config::FiltersConfig;
use crate::ChatMbtiError;
use crate::Result;

lazy_static! {
    /// `H:MM` or `HH:MM`
    static ref TIME_PATTERN: Regex = Regex::new(r"^\d{1,2}:\d{2}$").expect("time pattern is valid");
}

/// Filtering policy for chat lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptFilters {
    pub min_messages: usize,
    pub media_placeholders: Vec<String>,
    pub system_notices: Vec<String>,
    pub invalid_names: Vec<String>,
    pub name_suffixes: Vec<String>,
}

impl Default for TranscriptFilters {
    fn default() -> Self {
        Self::from(&FiltersConfig::default())
    }
}

impl From<&FiltersConfig> for TranscriptFilters {
    fn from(config: &FiltersConfig) -> Self {
        Self {
            min_messages: config.min_messages,
            media_placeholders: config.media_placeholders.clone(),
            system_notices: config.system_notices.clone(),
            invalid_names: config.invalid_names.clone(),
            name_suffixes: config.name_suffixes.clone(),
        }
    }
}

/// One accepted chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    pub time: String,
    pub speaker: String,
    pub message: String,
}

/// Why a well-formed line was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterReason {
    SystemNotice,
    MediaPlaceholder,
    InvalidName,
}

/// Result of looking at a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    Accepted(ChatLine),
    Filtered(FilterReason),
    /// Empty, not three fields, or no leading time
    Malformed,
}

/// Line counters collected during extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionStats {
    pub accepted: usize,
    pub malformed: usize,
    pub filtered: usize,
    pub speakers_seen: usize,
    pub speakers_kept: usize,
}

/// Messages of one retained speaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpeakerTranscript {
    pub name: String,
    pub message_count: usize,
    /// Messages in arrival order, joined by `\n`
    pub text: String,
}

/// Speaker → messages, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    speakers: Vec<SpeakerTranscript>,
}

impl Transcript {
    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    /// Joined messages of a speaker
    pub fn get(&self, name: &str) -> Option<&str> {
        self.speakers
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.text.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.speakers.iter().map(|s| s.name.as_str())
    }

    pub fn entries(&self) -> &[SpeakerTranscript] {
        &self.speakers
    }

    /// Entries for the requested speakers, in the requested order.
    /// An empty request selects everyone.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&SpeakerTranscript>> {
        if names.is_empty() {
            return Ok(self.speakers.iter().collect());
        }
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.speakers
                    .iter()
                    .find(|s| s.name == name)
                    .ok_or_else(|| ChatMbtiError::UnknownSpeaker(name.to_string()))
            })
            .collect()
    }
}

/// Parses raw chat exports under a filtering policy
#[derive(Debug, Clone, Default)]
pub struct TranscriptExtractor {
    filters: TranscriptFilters,
}

impl TranscriptExtractor {
    pub fn new(filters: TranscriptFilters) -> Self {
        Self { filters }
    }

    pub fn from_config(config: &FiltersConfig) -> Self {
        Self::new(TranscriptFilters::from(config))
    }

    pub fn filters(&self) -> &TranscriptFilters {
        &self.filters
    }

    /// Build the transcript for a whole chat export
    pub fn extract(&self, raw_text: &str) -> Transcript {
        self.extract_with_stats(raw_text).0
    }

    /// Same as [`Self::extract`], also returning line counters
    pub fn extract_with_stats(&self, raw_text: &str) -> (Transcript, ExtractionStats) {
        let mut stats = ExtractionStats::default();
        let mut order: Vec<String> = Vec::new();
        let mut messages: HashMap<String, Vec<String>> = HashMap::new();

        for line in raw_text.split('\n') {
            if line.trim().is_empty() {
                continue;
            }
            match self.parse_line(line) {
                LineOutcome::Accepted(chat_line) => {
                    stats.accepted += 1;
                    let bucket = messages.entry(chat_line.speaker.clone()).or_insert_with(|| {
                        order.push(chat_line.speaker.clone());
                        Vec::new()
                    });
                    bucket.push(chat_line.message);
                }
                LineOutcome::Filtered(_) => stats.filtered += 1,
                LineOutcome::Malformed => stats.malformed += 1,
            }
        }

        stats.speakers_seen = order.len();
        let speakers: Vec<SpeakerTranscript> = order
            .into_iter()
            .filter_map(|name| {
                let lines = messages.remove(&name)?;
                (lines.len() >= self.filters.min_messages).then(|| SpeakerTranscript {
                    message_count: lines.len(),
                    text: lines.join("\n"),
                    name,
                })
            })
            .collect();
        stats.speakers_kept = speakers.len();

        debug!(
            "Extracted transcript: {} accepted, {} filtered, {} malformed lines; {}/{} speakers kept",
            stats.accepted, stats.filtered, stats.malformed, stats.speakers_kept, stats.speakers_seen
        );

        (Transcript { speakers }, stats)
    }

    /// Classify a single line of a chat export
    pub fn parse_line(&self, line: &str) -> LineOutcome {
        let line = line.trim();
        let Some((time, name, message)) = split_fields(line) else {
            return LineOutcome::Malformed;
        };

        if !TIME_PATTERN.is_match(time) {
            return LineOutcome::Malformed;
        }

        let speaker = self.clean_name(name.trim());
        let message = message.trim();
        // An anonymous or empty line carries nothing to attribute
        if speaker.is_empty() || message.is_empty() {
            return LineOutcome::Malformed;
        }

        if self
            .filters
            .system_notices
            .iter()
            .any(|notice| message.contains(notice.as_str()))
        {
            return LineOutcome::Filtered(FilterReason::SystemNotice);
        }
        if self.filters.media_placeholders.iter().any(|p| p == message) {
            return LineOutcome::Filtered(FilterReason::MediaPlaceholder);
        }
        if self.filters.invalid_names.iter().any(|n| *n == speaker) {
            return LineOutcome::Filtered(FilterReason::InvalidName);
        }

        LineOutcome::Accepted(ChatLine {
            time: time.to_string(),
            speaker,
            message: message.to_string(),
        })
    }

    // Some exports glue a media label onto the name field
    fn clean_name(&self, name: &str) -> String {
        self.filters
            .name_suffixes
            .iter()
            .find_map(|suffix| name.strip_suffix(suffix.as_str()))
            .unwrap_or(name)
            .to_string()
    }
}

/// Extract with the default filtering policy
pub fn extract(raw_text: &str) -> Transcript {
    TranscriptExtractor::default().extract(raw_text)
}

/// Tab-separated first; otherwise the first two runs of spaces delimit the fields.
///
/// Only spaces count in the fallback: a line with a single tab keeps it inside
/// the time field and fails the time check.
fn split_fields(line: &str) -> Option<(&str, &str, &str)> {
    let mut tabbed = line.splitn(3, '\t');
    if let (Some(time), Some(name), Some(message)) = (tabbed.next(), tabbed.next(), tabbed.next()) {
        return Some((time, name, message));
    }

    let (time, rest) = line.split_once(' ')?;
    let (name, message) = rest.trim_start_matches(' ').split_once(' ')?;
    Some((time, name, message))
}
