//! Theme strength scoring and primary-theme selection.

use serde::Serialize;

use crate::config::{check_unit, HP};
use crate::error::ConfigResult;
use crate::lexicon::{self, Lexicon, Theme};
use crate::tokenizer::{tokenize, truncate_chars, TokenizedText};
use crate::INSUFFICIENT_CONTENT;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeScore {
    pub label: String,
    pub hits: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeReport {
    /// One entry per lexicon category, in lexicon order.
    pub scores: Vec<ThemeScore>,
    pub primary: Vec<String>,
    pub suggestions: Vec<String>,
}

impl ThemeReport {
    pub fn score_of(&self, label: &str) -> f64 {
        self.scores
            .iter()
            .find(|s| s.label == label)
            .map_or(0.0, |s| s.score)
    }

    /// Primary labels that name one of the built-in [`Theme`]s.
    pub fn primary_themes(&self) -> Vec<Theme> {
        self.primary
            .iter()
            .filter_map(|label| Theme::from_label(label).ok())
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct ThemeClassifier {
    lexicon: Lexicon,
    threshold: f64,
}

impl Default for ThemeClassifier {
    fn default() -> Self {
        Self {
            lexicon: lexicon::themes().clone(),
            threshold: HP.theme_threshold,
        }
    }
}

impl ThemeClassifier {
    pub fn new(lexicon: Lexicon, threshold: f64) -> ConfigResult<Self> {
        check_unit("theme_threshold", threshold)?;
        Ok(Self { lexicon, threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Classify `text` after capping it at the default input length.
    pub fn classify(&self, text: &str) -> ThemeReport {
        let (text, _) = truncate_chars(text, HP.max_input_chars);
        let word_count = tokenize(text).word_count();
        classify_lowered(&text.to_lowercase(), word_count, &self.lexicon, self.threshold)
    }

    pub(crate) fn classify_tokens(&self, tokens: &TokenizedText, lowered: &str) -> ThemeReport {
        classify_lowered(lowered, tokens.word_count(), &self.lexicon, self.threshold)
    }
}

/// Classify with the default threshold and input cap.
pub fn classify(text: &str, lexicon: &Lexicon) -> ThemeReport {
    let (text, _) = truncate_chars(text, HP.max_input_chars);
    let word_count = tokenize(text).word_count();
    classify_lowered(&text.to_lowercase(), word_count, lexicon, HP.theme_threshold)
}

/// Hits normalized so that one hit per 100 words reaches 1.0, capped there.
fn theme_score(hits: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }
    (hits as f64 / (word_count as f64 * HP.theme_hits_per_word)).min(1.0)
}

#[tracing::instrument(level = "debug", skip_all, fields(lexicon = lexicon.name(), word_count))]
fn classify_lowered(
    lowered: &str,
    word_count: usize,
    lexicon: &Lexicon,
    threshold: f64,
) -> ThemeReport {
    let mut scores = Vec::with_capacity(lexicon.categories().len());
    let mut primary = Vec::new();
    let mut suggestions = Vec::new();

    if word_count == 0 {
        suggestions.push(INSUFFICIENT_CONTENT.to_string());
    }

    for category in lexicon.categories() {
        let hits = category.count(lowered);
        let score = theme_score(hits, word_count);
        // No words, no primary themes, whatever the threshold.
        if word_count > 0 && score >= threshold {
            primary.push(category.label().to_string());
        } else {
            let examples = category
                .terms()
                .iter()
                .take(HP.theme_example_terms)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            suggestions.push(format!(
                "Strengthen {} using terms: {examples}",
                category.label()
            ));
        }
        scores.push(ThemeScore {
            label: category.label().to_string(),
            hits,
            score,
        });
    }

    tracing::debug!(primary = primary.len(), "themes classified");
    ThemeReport {
        scores,
        primary,
        suggestions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MatchMode;

    #[test]
    fn empty_text_suggests_every_theme() {
        let report = classify("", lexicon::themes());
        assert!(report.scores.iter().all(|s| s.score == 0.0));
        assert!(report.primary.is_empty());
        assert_eq!(report.suggestions[0], INSUFFICIENT_CONTENT);
        for theme in Theme::ALL {
            assert!(
                report.suggestions.iter().any(|s| s.contains(theme.label())),
                "missing suggestion for {theme}"
            );
        }
    }

    #[test]
    fn scores_are_capped_at_one() {
        // Each word contains "go" twice through loose matching.
        let report = classify("gogo gogo gogo", lexicon::themes());
        assert_eq!(report.score_of("Kingdom Mission"), 1.0);
        assert!(report.scores.iter().all(|s| s.score <= 1.0));
    }

    #[test]
    fn primary_themes_cross_threshold() {
        let text = "Stand firm in the battle and resist the enemy. \
                    Your identity is royal and chosen. \
                    The weather was mild and the roads were clear for travel.";
        let report = classify(text, lexicon::themes());
        let primary = report.primary_themes();
        assert!(primary.contains(&Theme::Warfare));
        assert!(primary.contains(&Theme::Identity));
        assert!(!report.primary.contains(&"Divine Authority".to_string()));
    }

    #[test]
    fn suggestions_name_first_three_terms() {
        let lex = Lexicon::new(
            "t",
            MatchMode::WholeWord,
            [("courage", vec!["bold", "brave", "daring", "fearless"])],
        )
        .unwrap();
        let report = classify("Nothing relevant here at all.", &lex);
        assert_eq!(
            report.suggestions,
            vec!["Strengthen courage using terms: bold, brave, daring".to_string()]
        );
    }

    #[test]
    fn custom_threshold_is_applied() {
        let lex = Lexicon::new("t", MatchMode::Loose, [("hope", vec!["hope"])]).unwrap();
        // 1 hit in 200 words scores 0.5.
        let mut text = vec!["filler"; 199].join(" ");
        text.push_str(" hope");

        let lenient = ThemeClassifier::new(lex.clone(), 0.4).unwrap();
        assert_eq!(lenient.classify(&text).primary, vec!["hope".to_string()]);

        let strict = ThemeClassifier::new(lex, 0.6).unwrap();
        assert!(strict.classify(&text).primary.is_empty());
    }

    #[test]
    fn zero_threshold_still_has_no_primary_for_empty_text() {
        let classifier = ThemeClassifier::new(lexicon::themes().clone(), 0.0).unwrap();
        let report = classifier.classify("");
        assert!(report.primary.is_empty());
        assert_eq!(report.suggestions.len(), Theme::ALL.len() + 1);

        let report = classifier.classify("Nothing thematic.");
        assert_eq!(report.primary.len(), Theme::ALL.len());
    }

    #[test]
    fn rejects_threshold_above_one() {
        assert!(ThemeClassifier::new(lexicon::themes().clone(), 1.01).is_err());
    }
}
