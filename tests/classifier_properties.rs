use proptest::prelude::*;
use rmgarbage::{GarbageClassifier, GarbageReason, TextCleaner, Verdict};

proptest! {
    #[test]
    fn classify_is_total_and_deterministic(text in any::<String>()) {
        let classifier = GarbageClassifier::new();
        let first = classifier.classify(&text);
        let second = classifier.classify(&text);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn long_strings_are_always_too_long(text in "\\PC{41,80}") {
        prop_assert_eq!(
            GarbageClassifier::new().classify(&text),
            Verdict::Garbage(GarbageReason::TooLong)
        );
    }

    #[test]
    fn four_identical_characters_never_pass(prefix in "[a-z]{0,5}", ch in "[a-z]", suffix in "[a-z]{0,5}") {
        let text = format!("{prefix}{}{suffix}", ch.repeat(4));
        prop_assert!(GarbageClassifier::new().classify(&text).is_garbage());
    }

    #[test]
    fn symbol_only_strings_of_three_or_more_are_garbage(text in "[~|:;.,'#*_-]{3,40}") {
        prop_assert_eq!(
            GarbageClassifier::new().classify(&text),
            Verdict::Garbage(GarbageReason::BadAlnumRatio)
        );
    }

    #[test]
    fn cleaning_keeps_only_clean_lines(lines in prop::collection::vec("[ -~]{0,20}", 0..30)) {
        let text = lines.join("\n");
        let cleaner = TextCleaner::default();
        let cleaned = cleaner.clean(&text);

        for line in &cleaned.lines {
            prop_assert!(cleaner.classifier().classify(line).is_clean());
        }
        prop_assert_eq!(cleaned.stats.units, cleaned.stats.kept + cleaned.stats.rejected);
        prop_assert_eq!(cleaned.stats.rejected, cleaned.rejections.len());
    }
}

#[test]
fn paper_examples() {
    let classifier = GarbageClassifier::new();
    let cases = [
        ("", Verdict::Garbage(GarbageReason::BadAlnumRatio)),
        ("aaaa", Verdict::Garbage(GarbageReason::RepeatedChar)),
        ("xyzxyzqrst", Verdict::Garbage(GarbageReason::BadVowelConsonantRatio)),
        ("needed.The", Verdict::Clean),
        ("Salad", Verdict::Clean),
    ];

    for (text, expected) in cases {
        assert_eq!(classifier.classify(text), expected, "{text:?}");
    }
    assert_eq!(
        classifier.classify(&"a".repeat(41)),
        Verdict::Garbage(GarbageReason::TooLong)
    );
}
