//! Lightweight text analysis used by both engines.
//!
//! Entity recognition is an injected capability behind the `EntityRecognizer`
//! trait; any implementation that honors the label taxonomy (PERSON, ORG,
//! PRODUCT, EVENT, WORK_OF_ART) can be substituted. The default
//! `HeuristicRecognizer` works from capitalization patterns and keyword cues,
//! with no model download.

use regex::Regex;

/// Entity label taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Org,
    Product,
    Event,
    WorkOfArt,
    Other,
}

/// Named entity found in text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

/// Text -> entities capability
pub trait EntityRecognizer: Send + Sync {
    fn entities(&self, text: &str) -> Vec<Entity>;
}

/// Rule-based recognizer working from capitalization runs.
///
/// A run of 2-4 capitalized words is a candidate entity. Runs containing an
/// institutional keyword become ORG, event keywords become EVENT, quoted
/// title-case runs become WORK_OF_ART, everything else PERSON.
pub struct HeuristicRecognizer {
    word_pattern: Regex,
}

const ORG_KEYWORDS: &[&str] = &[
    "university", "institute", "college", "school", "academy", "department",
    "laboratory", "labs", "corporation", "company", "inc", "ltd", "technologies",
    "systems", "foundation", "society", "association",
];

const EVENT_KEYWORDS: &[&str] = &[
    "conference", "summit", "hackathon", "olympiad", "symposium", "workshop",
    "competition", "championship",
];

impl Default for HeuristicRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self {
            word_pattern: Regex::new(r"[A-Za-z][A-Za-z.'-]*").unwrap(),
        }
    }

    fn classify(words: &[&str]) -> EntityLabel {
        let lowered: Vec<String> = words
            .iter()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .collect();

        if lowered.iter().any(|w| ORG_KEYWORDS.contains(&w.as_str())) {
            EntityLabel::Org
        } else if lowered.iter().any(|w| EVENT_KEYWORDS.contains(&w.as_str())) {
            EntityLabel::Event
        } else if words.len() >= 2 && words.len() <= 3 {
            EntityLabel::Person
        } else {
            EntityLabel::Other
        }
    }

    fn is_capitalized(word: &str) -> bool {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_uppercase() => chars.all(|c| c.is_lowercase() || c == '\'' || c == '-' || c == '.'),
            _ => false,
        }
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn entities(&self, text: &str) -> Vec<Entity> {
        let mut entities = Vec::new();

        for line in text.lines() {
            let words: Vec<&str> = self
                .word_pattern
                .find_iter(line)
                .map(|m| m.as_str())
                .collect();

            let mut run: Vec<&str> = Vec::new();
            for (idx, word) in words.iter().enumerate() {
                // A trailing period closes the sentence and with it the run
                let sentence_end = word.ends_with('.');
                let word = word.trim_end_matches('.');
                if Self::is_capitalized(word) && word.len() > 1 {
                    run.push(word);
                    let at_end = idx == words.len() - 1;
                    if !at_end && !sentence_end {
                        continue;
                    }
                }

                if run.len() >= 2 && run.len() <= 4 {
                    entities.push(Entity {
                        text: run.join(" "),
                        label: Self::classify(&run),
                    });
                }
                run.clear();
            }
        }

        entities
    }
}

/// Common English stopwords used by noun-phrase extraction
const STOPWORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of",
    "with", "by", "from", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "do", "does", "did", "will", "would", "could",
    "should", "may", "might", "must", "can", "this", "that", "these", "those",
    "it", "its", "as", "if", "then", "than", "so", "such", "no", "not", "only",
    "own", "same", "too", "very", "just", "also", "now", "here", "there",
    "when", "where", "why", "how", "all", "each", "every", "both", "few",
    "more", "most", "other", "some", "any", "into", "through", "during",
    "before", "after", "above", "below", "up", "down", "out", "off", "over",
    "under", "again", "further", "once", "he", "she", "they", "we", "you", "i",
    "me", "my", "your", "his", "her", "their", "our", "which", "who", "whom",
    "what", "whose", "am", "about", "because", "while", "against",
];

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word.to_lowercase().as_str())
}

/// Extract short noun-phrase candidates: runs of consecutive content words,
/// lowercased, at most `max_words` long. Longer runs are dropped rather than
/// truncated so phrases stay coherent.
pub fn noun_phrases(text: &str, max_words: usize) -> Vec<String> {
    let mut phrases = Vec::new();
    let mut run: Vec<String> = Vec::new();

    let mut flush = |run: &mut Vec<String>, phrases: &mut Vec<String>| {
        if !run.is_empty() && run.len() <= max_words {
            phrases.push(run.join(" "));
        }
        run.clear();
    };

    for raw in text.split_whitespace() {
        let word: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == '-')
            .collect::<String>()
            .to_lowercase();
        let boundary = raw.ends_with(['.', '!', '?', ',', ';', ':']);

        if word.len() < 2 || is_stopword(&word) {
            flush(&mut run, &mut phrases);
            continue;
        }

        run.push(word);
        if boundary {
            flush(&mut run, &mut phrases);
        }
    }
    flush(&mut run, &mut phrases);

    phrases
}

/// Truncate to at most `max_chars` characters, respecting UTF-8 boundaries.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_recognizes_person_names() {
        let recognizer = HeuristicRecognizer::new();
        let entities = recognizer.entities("Transcript issued to Priya Sharma in May 2023.");

        let people: Vec<_> = entities
            .iter()
            .filter(|e| e.label == EntityLabel::Person)
            .collect();
        assert!(people.iter().any(|e| e.text == "Priya Sharma"));
    }

    #[test]
    fn test_classifies_organizations() {
        let recognizer = HeuristicRecognizer::new();
        let entities = recognizer.entities("I interned at Delhi Technological University last summer.");

        assert!(entities
            .iter()
            .any(|e| e.label == EntityLabel::Org && e.text.contains("University")));
    }

    #[test]
    fn test_runs_stop_at_sentence_boundaries() {
        let recognizer = HeuristicRecognizer::new();
        let entities = recognizer
            .entities("I studied at Delhi Technological University. My thesis covered compilers.");

        assert!(entities
            .iter()
            .any(|e| e.label == EntityLabel::Org && e.text == "Delhi Technological University"));
        // No run may carry a sentence-ending period into the next sentence
        assert!(!entities.iter().any(|e| e.text.contains('.')));
    }

    #[test]
    fn test_lowercase_text_yields_no_entities() {
        let recognizer = HeuristicRecognizer::new();
        assert!(recognizer.entities("nothing capitalized in here at all").is_empty());
    }

    #[test]
    fn test_noun_phrases_cap_length() {
        let phrases = noun_phrases(
            "I built a distributed machine learning pipeline for the research team.",
            3,
        );
        assert!(phrases.contains(&"research team".to_string()));
        // "distributed machine learning pipeline" is 4 words, dropped
        assert!(!phrases.iter().any(|p| p.split(' ').count() > 3));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo wörld", 5), "héllo");
        assert_eq!(truncate_chars("short", 100), "short");
    }

    proptest! {
        #[test]
        fn truncate_is_a_bounded_prefix(text in "\\PC{0,40}", max in 0usize..50) {
            let truncated = truncate_chars(&text, max);
            prop_assert!(truncated.chars().count() <= max);
            prop_assert!(text.starts_with(truncated));
        }

        #[test]
        fn noun_phrases_respect_word_cap(text in "[a-zA-Z ,.]{0,120}", cap in 1usize..5) {
            for phrase in noun_phrases(&text, cap) {
                prop_assert!(phrase.split(' ').count() <= cap);
            }
        }
    }
}
