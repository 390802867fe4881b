//! Keyword density, voice style and theme scoring for prose.
//!
//! [`analyze`] runs every scorer with the reference lexicons. Build an
//! [`Analyzer`] from an [`AnalyzerConfig`] to swap lexicons or thresholds.
//! Scoring is pure: an analyzer holds only immutable data and can be shared
//! across threads freely.

pub mod config;
pub mod density;
pub mod error;
pub mod lexicon;
pub mod signals;
pub mod style;
pub mod theme;
pub mod tokenizer;

use once_cell::sync::Lazy;
use serde::Serialize;

pub use config::AnalyzerConfig;
pub use density::{CategoryDensity, DensityResult};
pub use error::{AnalysisError, ConfigError, ConfigResult};
pub use lexicon::{Lexicon, LexiconSpec, MatchMode, Theme};
pub use signals::{MarketingAngle, MarketingFormula, Signals, ViralPotential};
pub use style::{StyleMatcher, StyleProfile, StyleReport};
pub use theme::{ThemeClassifier, ThemeReport};

/// Suggestion returned when a text has no scorable words.
pub const INSUFFICIENT_CONTENT: &str = "Insufficient content: no scorable words found.";

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// The headline numbers: voice match, what to fix, which themes dominate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub match_score: f64,
    pub suggestions: Vec<String>,
    pub primary: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub word_count: usize,
    pub sentence_count: usize,
    pub truncated: bool,
    pub densities: Vec<DensityResult>,
    pub voice: StyleReport,
    pub themes: ThemeReport,
    pub signals: Signals,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Validation {
    pub passed: bool,
    pub issues: Vec<String>,
}

impl AnalysisResult {
    pub fn density(&self, lexicon: &str) -> Option<&DensityResult> {
        self.densities.iter().find(|d| d.lexicon == lexicon)
    }

    /// Publishing gate: the voice must match well enough and enough themes
    /// must come through strongly.
    pub fn validate(&self, min_voice_score: f64, min_theme_count: usize) -> Validation {
        let mut issues = Vec::new();
        if self.voice.score < min_voice_score {
            issues.push(format!(
                "Voice match score {:.2} is below the required {min_voice_score:.2}",
                self.voice.score
            ));
            issues.extend(self.voice.suggestions.iter().cloned());
        }
        if self.themes.primary.len() < min_theme_count {
            issues.push(format!(
                "Content should strongly reflect at least {min_theme_count} core themes"
            ));
        }
        Validation {
            passed: issues.is_empty(),
            issues,
        }
    }
}

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Analyzer {
    max_input_chars: usize,
    min_voice_score: f64,
    min_theme_count: usize,
    densities: Vec<Lexicon>,
    sentiment: Lexicon,
    viral_emotional: Lexicon,
    style: StyleMatcher,
    themes: ThemeClassifier,
}

impl Analyzer {
    /// Validate `config` and build every lexicon it names. Nothing is
    /// checked again while scoring.
    pub fn new(config: AnalyzerConfig) -> ConfigResult<Self> {
        config.validate()?;

        let resolve = |name: &str| -> ConfigResult<Lexicon> {
            let lexicon = match config.lexicons.iter().find(|s| s.name.trim() == name) {
                Some(spec) => Lexicon::from_spec(spec)?,
                None => lexicon::reference(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownLexicon(name.to_string()))?,
            };
            match config.match_mode {
                Some(mode) => lexicon.with_mode(mode),
                None => Ok(lexicon),
            }
        };

        let mut densities = lexicon::DENSITY_LEXICONS
            .iter()
            .map(|&name| resolve(name))
            .collect::<ConfigResult<Vec<_>>>()?;
        for spec in &config.lexicons {
            if lexicon::reference(spec.name.trim()).is_none() {
                densities.push(resolve(spec.name.trim())?);
            }
        }

        let style = StyleMatcher::new(config.style, resolve(lexicon::COMBAT_METAPHORS)?)?;
        let themes = ThemeClassifier::new(resolve(lexicon::THEMES)?, config.theme_threshold)?;
        let sentiment = resolve(lexicon::SENTIMENT)?;
        let viral_emotional = resolve(lexicon::VIRAL_EMOTIONAL)?;

        tracing::debug!(
            density_tables = densities.len(),
            max_input_chars = config.max_input_chars,
            "analyzer configured"
        );

        Ok(Self {
            max_input_chars: config.max_input_chars,
            min_voice_score: config.min_voice_score,
            min_theme_count: config.min_theme_count,
            densities,
            sentiment,
            viral_emotional,
            style,
            themes,
        })
    }

    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let (text, truncated) = tokenizer::truncate_chars(text, self.max_input_chars);
        if truncated {
            tracing::debug!(max_chars = self.max_input_chars, "input truncated");
        }

        let tokens = tokenizer::tokenize(text);
        let lowered = text.to_lowercase();
        let word_count = tokens.word_count();

        let densities: Vec<DensityResult> = self
            .densities
            .iter()
            .map(|lex| density::score_lowered(&lowered, word_count, lex))
            .collect();
        let voice = self.style.match_tokens(&tokens, &lowered);
        let themes = self.themes.classify_tokens(&tokens, &lowered);

        let signals = signals::collect(signals::SignalInputs {
            text,
            lowered: &lowered,
            tokens: &tokens,
            viral_emotional: &self.viral_emotional,
            triggers: densities.iter().find(|d| d.lexicon == lexicon::TRIGGERS),
            sentiment: &self.sentiment,
        });

        let mut suggestions = voice.suggestions.clone();
        suggestions.extend(
            themes
                .suggestions
                .iter()
                .filter(|s| !(word_count == 0 && s.as_str() == INSUFFICIENT_CONTENT))
                .cloned(),
        );
        let summary = Summary {
            match_score: voice.score,
            suggestions,
            primary: themes.primary.clone(),
        };

        tracing::debug!(
            word_count,
            sentence_count = tokens.sentence_count(),
            match_score = voice.score,
            primary = themes.primary.len(),
            "analysis complete"
        );

        AnalysisResult {
            word_count,
            sentence_count: tokens.sentence_count(),
            truncated,
            densities,
            voice,
            themes,
            signals,
            summary,
        }
    }

    /// Reject bytes that are not UTF-8, then analyze.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<AnalysisResult, AnalysisError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.analyze(text))
    }

    /// [`AnalysisResult::validate`] with this analyzer's configured minimums.
    pub fn validate(&self, result: &AnalysisResult) -> Validation {
        result.validate(self.min_voice_score, self.min_theme_count)
    }
}

static DEFAULT_ANALYZER: Lazy<Analyzer> = Lazy::new(|| {
    Analyzer::new(AnalyzerConfig::default()).expect("default configuration is valid")
});

impl Default for Analyzer {
    fn default() -> Self {
        DEFAULT_ANALYZER.clone()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyze `text` with the reference lexicons and default thresholds.
pub fn analyze(text: &str) -> AnalysisResult {
    DEFAULT_ANALYZER.analyze(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn analyzer_is_shareable_across_threads() {
        assert_send_sync::<Analyzer>();
        assert_send_sync::<Lexicon>();
    }

    #[test]
    fn summary_does_not_repeat_insufficient_notice() {
        let result = analyze("");
        let notices = result
            .summary
            .suggestions
            .iter()
            .filter(|s| s.as_str() == INSUFFICIENT_CONTENT)
            .count();
        assert_eq!(notices, 1);
    }

    #[test]
    fn config_lexicon_replaces_reference() {
        let config = AnalyzerConfig::from_json(
            r#"{"lexicons": [{"name": "power_words", "categories": [{"label": "power_words", "terms": ["unstoppable"]}]}]}"#,
        )
        .unwrap();
        let analyzer = Analyzer::new(config).unwrap();
        let result = analyzer.analyze("An unstoppable and proven system.");
        let power = result.density(lexicon::POWER_WORDS).unwrap();
        assert_eq!(power.total_hits, 1);
    }

    #[test]
    fn config_lexicon_adds_density_table() {
        let config = AnalyzerConfig::from_json(
            r#"{"lexicons": [{"name": "brotherhood", "mode": "whole_word", "categories": [{"label": "bond", "terms": ["brother", "band"]}]}]}"#,
        )
        .unwrap();
        let analyzer = Analyzer::new(config).unwrap();
        let result = analyzer.analyze("A band of brothers and one brother.");
        let extra = result.density("brotherhood").unwrap();
        assert_eq!(extra.count_of("bond"), 2);
        assert_eq!(result.densities.len(), lexicon::DENSITY_LEXICONS.len() + 1);
    }

    #[test]
    fn match_mode_override_applies_to_all_lexicons() {
        let config = AnalyzerConfig {
            match_mode: Some(MatchMode::WholeWord),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(config).unwrap();
        let result = analyzer.analyze("He received an award for his reward.");
        assert_eq!(result.voice.measured.metaphor_hits, 0);

        let loose = analyze("He received an award for his reward.");
        assert_eq!(loose.voice.measured.metaphor_hits, 2);
    }

    #[test]
    fn reference_word_lists_ignore_partial_words() {
        let result = analyze("Together we never forget the target budget. Good goddess.");
        assert_eq!(result.density(lexicon::CALLS_TO_ACTION).unwrap().total_hits, 0);
        assert_eq!(result.density(lexicon::SPIRITUAL).unwrap().total_hits, 0);
    }

    #[test]
    fn matched_terms_are_reported() {
        let result = analyze("Click here and join us. Click now.");
        let cta = result.density(lexicon::CALLS_TO_ACTION).unwrap();
        assert_eq!(cta.total_hits, 3);
        assert_eq!(cta.matched_terms(), vec!["click", "join"]);
    }

    #[test]
    fn input_is_truncated_to_cap() {
        let config = AnalyzerConfig {
            max_input_chars: 10,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(config).unwrap();
        let result = analyzer.analyze("one two three four five six");
        assert!(result.truncated);
        assert_eq!(result.word_count, 3);
    }

    #[test]
    fn invalid_utf8_is_rejected() {
        let err = Analyzer::default().analyze_bytes(&[0x66, 0xff, 0x6f]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput(_)));
    }
}
