//! Statement-of-purpose analysis: length, themes, structure.

use std::sync::Arc;

use gradwise_models::SopAnalysis;
use gradwise_utils::config::ScoringConfig;
use gradwise_utils::nlp::{noun_phrases, truncate_chars, EntityLabel, EntityRecognizer};

const NOUN_PHRASE_MAX_WORDS: usize = 3;

pub struct SopAnalyzer {
    recognizer: Arc<dyn EntityRecognizer>,
    char_limit: usize,
    theme_cap: usize,
}

impl SopAnalyzer {
    pub fn new(config: &ScoringConfig, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self {
            recognizer,
            char_limit: config.sop_char_limit,
            theme_cap: config.theme_cap,
        }
    }

    pub fn analyze(&self, sop_text: &str) -> SopAnalysis {
        let word_count = sop_text.split_whitespace().count();
        let key_themes = self.themes(sop_text);

        // Blank-line-separated paragraphs; more paragraphs read as better structure
        let paragraph_count = sop_text
            .split("\n\n")
            .filter(|p| !p.trim().is_empty())
            .count();
        let structure_score = (paragraph_count as u32 * 20).min(100);

        let mut recommendations = Vec::new();
        if word_count < 300 {
            recommendations.push("SoP is too short. Aim for 500-800 words.".to_string());
        } else if word_count > 1000 {
            recommendations
                .push("SoP is too long. Consider condensing to 500-800 words.".to_string());
        } else {
            recommendations.push("SoP length is appropriate.".to_string());
        }
        if key_themes.len() < 5 {
            recommendations
                .push("Consider adding more diverse themes and experiences.".to_string());
        }

        SopAnalysis {
            word_count,
            key_themes,
            structure_score,
            recommendations,
        }
    }

    /// Distinct lowercase themes: ORG/PRODUCT/EVENT/WORK_OF_ART entities plus
    /// short noun phrases, in order of first appearance, capped.
    fn themes(&self, sop_text: &str) -> Vec<String> {
        let head = truncate_chars(sop_text, self.char_limit);
        let mut themes: Vec<String> = Vec::new();

        let mut push = |theme: String| {
            if !theme.is_empty() && !themes.contains(&theme) {
                themes.push(theme);
            }
        };

        for entity in self.recognizer.entities(head) {
            if matches!(
                entity.label,
                EntityLabel::Org | EntityLabel::Product | EntityLabel::Event | EntityLabel::WorkOfArt
            ) {
                push(entity.text.to_lowercase());
            }
        }

        for phrase in noun_phrases(head, NOUN_PHRASE_MAX_WORDS) {
            push(phrase);
        }

        themes.truncate(self.theme_cap);
        themes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gradwise_utils::nlp::HeuristicRecognizer;

    fn analyzer() -> SopAnalyzer {
        SopAnalyzer::new(
            &ScoringConfig::default(),
            Arc::new(HeuristicRecognizer::new()),
        )
    }

    fn words(n: usize) -> String {
        vec!["research"; n].join(" ")
    }

    #[test]
    fn test_word_count_boundaries() {
        let analysis = analyzer().analyze(&words(299));
        assert_eq!(analysis.word_count, 299);
        assert!(analysis
            .recommendations
            .contains(&"SoP is too short. Aim for 500-800 words.".to_string()));

        let analysis = analyzer().analyze(&words(300));
        assert!(analysis
            .recommendations
            .contains(&"SoP length is appropriate.".to_string()));

        let analysis = analyzer().analyze(&words(1001));
        assert!(analysis
            .recommendations
            .contains(&"SoP is too long. Consider condensing to 500-800 words.".to_string()));
    }

    #[test]
    fn test_structure_score_caps_at_100() {
        let two_paragraphs = "First paragraph here.\n\nSecond paragraph here.";
        assert_eq!(analyzer().analyze(two_paragraphs).structure_score, 40);

        let many = vec!["Paragraph."; 8].join("\n\n");
        assert_eq!(analyzer().analyze(&many).structure_score, 100);
    }

    #[test]
    fn test_consecutive_blank_lines_do_not_inflate_structure() {
        let padded = "First paragraph.\n\n\n\nSecond paragraph.";
        assert_eq!(analyzer().analyze(padded).structure_score, 40);
    }

    #[test]
    fn test_theme_extraction_and_diversity_hint() {
        let sop = "I studied distributed systems at Delhi Technological University. \
            My thesis covered machine learning, compiler design, database internals, \
            and network protocols through sustained independent research.";
        let analysis = analyzer().analyze(sop);

        assert!(analysis
            .key_themes
            .contains(&"delhi technological university".to_string()));
        assert!(analysis.key_themes.contains(&"compiler design".to_string()));
        assert!(analysis.key_themes.len() <= 10);
        assert!(!analysis.key_themes.iter().any(|t| t.split(' ').count() > 3));
    }

    #[test]
    fn test_few_themes_triggers_diversity_recommendation() {
        let analysis = analyzer().analyze(&words(500));
        assert!(analysis
            .recommendations
            .contains(&"Consider adding more diverse themes and experiences.".to_string()));
    }
}
