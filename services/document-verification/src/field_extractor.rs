//! Structured field extraction over plain text.
//!
//! A fixed table of case-insensitive patterns pulls out contact details and
//! test scores; the first match per field wins. Candidate applicant names
//! come from the entity recognizer, bounded to the head of the text for
//! performance.

use std::sync::Arc;

use regex::Regex;
use tracing::debug;

use gradwise_models::{ExtractedFields, FieldValue};
use gradwise_utils::config::ExtractionConfig;
use gradwise_utils::nlp::{truncate_chars, EntityLabel, EntityRecognizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Integer,
    Float,
}

struct FieldPattern {
    name: &'static str,
    regex: Regex,
    kind: FieldKind,
}

impl FieldPattern {
    fn new(name: &'static str, pattern: &str, kind: FieldKind) -> Self {
        Self {
            name,
            regex: Regex::new(pattern).unwrap(),
            kind,
        }
    }
}

pub struct FieldExtractor {
    patterns: Vec<FieldPattern>,
    recognizer: Arc<dyn EntityRecognizer>,
    ner_char_limit: usize,
    max_candidate_names: usize,
}

impl FieldExtractor {
    pub fn new(config: &ExtractionConfig, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        let patterns = vec![
            FieldPattern::new(
                "email",
                r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
                FieldKind::Text,
            ),
            FieldPattern::new("phone", r"\+?[1-9]?[0-9]{7,15}", FieldKind::Text),
            FieldPattern::new(
                "gpa",
                r"(?i)(?:GPA|CGPA|Grade Point Average)[:\s]*([0-9]+\.?[0-9]*)",
                FieldKind::Float,
            ),
            FieldPattern::new(
                "gre_score",
                r"(?i)(?:GRE|Graduate Record Examination)[:\s]*([0-9]{3})",
                FieldKind::Integer,
            ),
            FieldPattern::new(
                "toefl_score",
                r"(?i)(?:TOEFL|Test of English)[:\s]*([0-9]{2,3})",
                FieldKind::Integer,
            ),
            FieldPattern::new(
                "ielts_score",
                r"(?i)(?:IELTS|International English)[:\s]*([0-9]\.?[0-9]?)",
                FieldKind::Float,
            ),
            FieldPattern::new(
                "date",
                r"\b[0-3]?[0-9][/-][0-1]?[0-9][/-](?:[0-9]{2})?[0-9]{2}\b",
                FieldKind::Text,
            ),
        ];

        Self {
            patterns,
            recognizer,
            ner_char_limit: config.ner_char_limit,
            max_candidate_names: config.max_candidate_names,
        }
    }

    /// Run the pattern table and name recognition over extracted text.
    /// Fields without a match are simply absent from the result.
    pub fn extract(&self, text: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::new();

        for pattern in &self.patterns {
            let Some(caps) = pattern.regex.captures(text) else {
                continue;
            };
            let raw = caps
                .get(1)
                .or_else(|| caps.get(0))
                .map(|m| m.as_str())
                .unwrap_or_default();
            if raw.is_empty() {
                continue;
            }

            let value = coerce(raw, pattern.kind);
            debug!(field = pattern.name, %value, "Extracted field");
            fields.insert(pattern.name.to_string(), value);
        }

        let names = self.candidate_names(text);
        if !names.is_empty() {
            fields.insert("names".to_string(), FieldValue::List(names));
        }

        fields
    }

    /// Up to `max_candidate_names` person entities from the head of the text.
    fn candidate_names(&self, text: &str) -> Vec<String> {
        let head = truncate_chars(text, self.ner_char_limit);
        self.recognizer
            .entities(head)
            .into_iter()
            .filter(|e| e.label == EntityLabel::Person)
            .map(|e| e.text)
            .take(self.max_candidate_names)
            .collect()
    }
}

fn coerce(raw: &str, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Float => raw
            .parse::<f64>()
            .map(FieldValue::Float)
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string())),
        FieldKind::Integer => raw
            .parse::<i64>()
            .map(FieldValue::Integer)
            .unwrap_or_else(|_| FieldValue::Text(raw.to_string())),
        FieldKind::Text => FieldValue::Text(raw.to_string()),
    }
}
