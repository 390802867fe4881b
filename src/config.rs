//! Analyzer configuration and the fixed scoring constants.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::lexicon::{LexiconSpec, MatchMode};
use crate::style::StyleProfile;

// ---------------------------------------------------------------------------
// Hyperparameters
// ---------------------------------------------------------------------------

pub(crate) struct Hyperparameters {
    pub max_input_chars: usize,
    pub density_basis: f64,
    pub theme_hits_per_word: f64,
    pub theme_threshold: f64,
    pub theme_example_terms: usize,
    pub style_avg_words: f64,
    pub style_short_ratio: f64,
    pub style_short_words: usize,
    pub style_metaphor_saturation: f64,
    pub style_metaphor_floor: f64,
    pub style_acceptance: f64,
    pub min_voice_score: f64,
    pub min_theme_count: usize,
    pub viral_emotional_high: f64,
    pub viral_trigger_high: usize,
    pub viral_emotional_medium: f64,
    pub top_words_limit: usize,
    pub top_word_min_chars: usize,
    pub hook_sentences: usize,
    pub hook_min_chars: usize,
}

pub(crate) static HP: Hyperparameters = Hyperparameters {
    max_input_chars: 5000,
    density_basis: 100.0,
    theme_hits_per_word: 0.01,
    theme_threshold: 0.3,
    theme_example_terms: 3,
    style_avg_words: 8.5,
    style_short_ratio: 0.62,
    style_short_words: 8,
    style_metaphor_saturation: 10.0,
    style_metaphor_floor: 2.0,
    style_acceptance: 0.7,
    min_voice_score: 0.7,
    min_theme_count: 2,
    viral_emotional_high: 5.0,
    viral_trigger_high: 3,
    viral_emotional_medium: 2.0,
    top_words_limit: 20,
    top_word_min_chars: 4,
    hook_sentences: 3,
    hook_min_chars: 21,
};

// ---------------------------------------------------------------------------
// Analyzer configuration
// ---------------------------------------------------------------------------

/// Everything an [`crate::Analyzer`] can be tuned with.
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyzerConfig {
    /// Longer input is truncated to this many characters before scoring.
    pub max_input_chars: usize,
    /// Forces one match mode onto every lexicon when set.
    pub match_mode: Option<MatchMode>,
    pub style: StyleProfile,
    pub theme_threshold: f64,
    pub min_voice_score: f64,
    pub min_theme_count: usize,
    /// Replaces the reference lexicon of the same name, or adds a new
    /// density table when the name is not a reference one.
    pub lexicons: Vec<LexiconSpec>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_input_chars: HP.max_input_chars,
            match_mode: None,
            style: StyleProfile::default(),
            theme_threshold: HP.theme_threshold,
            min_voice_score: HP.min_voice_score,
            min_theme_count: HP.min_theme_count,
            lexicons: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: AnalyzerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the scalar settings. Lexicons are checked when they are built.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_input_chars == 0 {
            return Err(ConfigError::ZeroInputCap);
        }
        check_unit("theme_threshold", self.theme_threshold)?;
        check_unit("min_voice_score", self.min_voice_score)?;
        self.style.validate()?;

        let mut seen: Vec<&str> = Vec::new();
        for spec in &self.lexicons {
            let name = spec.name.trim();
            if seen.contains(&name) {
                return Err(ConfigError::DuplicateLexicon(name.to_string()));
            }
            seen.push(name);
        }
        Ok(())
    }
}

pub(crate) fn check_unit(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { field, value })
    }
}
