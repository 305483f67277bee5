use chatmbti::config::FiltersConfig;
use chatmbti::transcript::TranscriptExtractor;

const EXPORT: &str = "\
[LINE] Chat history with Weekend Crew
Saved on: 2024/05/01 21:00

2024/05/01(Wed)
14:00\tAlice\thi all
14:01\tBob\tmorning
14:02\tBob\t[Stickers]
14:03\tAlice\tanyone up for hiking?
14:04\tBob\tsure, where?
14:05\tBob\tI can drive
14:06\tYou\tme too
14:07\tYou\tme three
14:08\tYou\tme four
14:09\tCarol\tCall time 0:42
";

#[test]
fn test_speakers_below_threshold_are_dropped() {
    let transcript = TranscriptExtractor::default().extract(EXPORT);

    assert_eq!(transcript.names().collect::<Vec<_>>(), ["Bob"]);
    assert!(!transcript.contains("Alice"));
}

#[test]
fn test_noise_lines_are_rejected() {
    let (transcript, stats) = TranscriptExtractor::default().extract_with_stats(EXPORT);

    // The sticker line does not count towards Bob
    let bob = &transcript.entries()[0];
    assert_eq!(bob.message_count, 3);
    assert_eq!(bob.text, "morning\nsure, where?\nI can drive");

    // "You" has three messages but is never a speaker
    assert!(!transcript.contains("You"));
    assert!(!transcript.contains("Carol"));
    assert_eq!(stats.filtered, 5);
    assert_eq!(stats.accepted, 5);
}

#[test]
fn test_filters_come_from_configuration() {
    let config = FiltersConfig {
        min_messages: 2,
        invalid_names: vec!["Bob".to_string()],
        ..FiltersConfig::default()
    };
    let transcript = TranscriptExtractor::from_config(&config).extract(EXPORT);

    assert_eq!(transcript.names().collect::<Vec<_>>(), ["Alice", "You"]);
}

#[test]
fn test_space_separated_export() {
    let raw = "9:15 Dana first\n9:16 Dana second one\n9:17 Dana third";
    let transcript = chatmbti::transcript::extract(raw);
    assert_eq!(transcript.get("Dana"), Some("first\nsecond one\nthird"));
}
