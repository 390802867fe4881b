//! Voice matching: sentence rhythm and metaphor use against a target profile.

use serde::{Deserialize, Serialize};

use crate::config::HP;
use crate::density::per_hundred;
use crate::error::{ConfigError, ConfigResult};
use crate::lexicon::{self, Lexicon};
use crate::tokenizer::{tokenize, truncate_chars, TokenizedText};
use crate::INSUFFICIENT_CONTENT;

/// The statistical fingerprint a text is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleProfile {
    pub avg_words_per_sentence: f64,
    pub short_sentence_ratio: f64,
    /// Sentences with fewer words than this count as short.
    pub short_sentence_words: usize,
    /// Metaphor hits per 100 words at which the metaphor component saturates.
    pub metaphor_density: f64,
    /// Below this density a metaphor suggestion is emitted.
    pub metaphor_floor: f64,
    /// Suggestions are only produced for scores under this value.
    pub acceptance: f64,
}

impl Default for StyleProfile {
    fn default() -> Self {
        Self {
            avg_words_per_sentence: HP.style_avg_words,
            short_sentence_ratio: HP.style_short_ratio,
            short_sentence_words: HP.style_short_words,
            metaphor_density: HP.style_metaphor_saturation,
            metaphor_floor: HP.style_metaphor_floor,
            acceptance: HP.style_acceptance,
        }
    }
}

impl StyleProfile {
    pub fn validate(&self) -> ConfigResult<()> {
        let positive = [
            ("avg_words_per_sentence", self.avg_words_per_sentence),
            ("metaphor_density", self.metaphor_density),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidProfile { field, value });
            }
        }
        if !self.metaphor_floor.is_finite() || self.metaphor_floor < 0.0 {
            return Err(ConfigError::InvalidProfile {
                field: "metaphor_floor",
                value: self.metaphor_floor,
            });
        }
        if self.short_sentence_words == 0 {
            return Err(ConfigError::InvalidProfile {
                field: "short_sentence_words",
                value: 0.0,
            });
        }
        crate::config::check_unit("short_sentence_ratio", self.short_sentence_ratio)?;
        crate::config::check_unit("acceptance", self.acceptance)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MeasuredStyle {
    pub sentence_count: usize,
    pub word_count: usize,
    pub avg_words_per_sentence: f64,
    pub short_sentence_ratio: f64,
    pub metaphor_hits: usize,
    pub metaphor_density: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StyleComponents {
    pub words: f64,
    pub ratio: f64,
    pub metaphor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleReport {
    pub score: f64,
    pub measured: MeasuredStyle,
    pub components: StyleComponents,
    pub suggestions: Vec<String>,
}

/// Compares texts against one validated [`StyleProfile`].
#[derive(Debug, Clone)]
pub struct StyleMatcher {
    profile: StyleProfile,
    metaphors: Lexicon,
}

impl Default for StyleMatcher {
    fn default() -> Self {
        Self {
            profile: StyleProfile::default(),
            metaphors: lexicon::combat_metaphors().clone(),
        }
    }
}

impl StyleMatcher {
    pub fn new(profile: StyleProfile, metaphors: Lexicon) -> ConfigResult<Self> {
        profile.validate()?;
        Ok(Self { profile, metaphors })
    }

    pub fn profile(&self) -> &StyleProfile {
        &self.profile
    }

    pub fn metaphors(&self) -> &Lexicon {
        &self.metaphors
    }

    /// Measure `text` after capping it at the default input length.
    pub fn match_style(&self, text: &str) -> StyleReport {
        let (text, _) = truncate_chars(text, HP.max_input_chars);
        self.match_tokens(&tokenize(text), &text.to_lowercase())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    pub(crate) fn match_tokens(&self, tokens: &TokenizedText, lowered: &str) -> StyleReport {
        let target = &self.profile;
        let word_count = tokens.word_count();
        if word_count == 0 {
            return StyleReport {
                score: 0.0,
                measured: MeasuredStyle::default(),
                components: StyleComponents::default(),
                suggestions: vec![INSUFFICIENT_CONTENT.to_string()],
            };
        }

        // word_count > 0 guarantees at least one sentence.
        let sentence_count = tokens.sentence_count();
        let avg = word_count as f64 / sentence_count as f64;
        let short = tokens
            .sentences
            .iter()
            .filter(|s| s.word_count() < target.short_sentence_words)
            .count();
        let ratio = short as f64 / sentence_count as f64;
        let metaphor_hits: usize = self
            .metaphors
            .categories()
            .iter()
            .map(|c| c.count(lowered))
            .sum();
        let metaphor_density = per_hundred(metaphor_hits, word_count);

        let components = StyleComponents {
            words: 1.0
                - ((avg - target.avg_words_per_sentence).abs() / target.avg_words_per_sentence)
                    .min(1.0),
            ratio: (1.0 - (ratio - target.short_sentence_ratio).abs()).clamp(0.0, 1.0),
            metaphor: (metaphor_density / target.metaphor_density).min(1.0),
        };
        let score =
            ((components.words + components.ratio + components.metaphor) / 3.0).clamp(0.0, 1.0);

        let mut suggestions = Vec::new();
        if score < target.acceptance {
            if avg > target.avg_words_per_sentence {
                suggestions.push(format!(
                    "Shorten sentences: they average {avg:.1} words against a target of {:.1}.",
                    target.avg_words_per_sentence
                ));
            }
            if ratio < target.short_sentence_ratio {
                suggestions.push(format!(
                    "Add punchier sentences: {:.0}% are under {} words, aim for {:.0}%.",
                    ratio * 100.0,
                    target.short_sentence_words,
                    target.short_sentence_ratio * 100.0
                ));
            }
            if metaphor_density < target.metaphor_floor {
                suggestions.push(format!(
                    "Add more thematic metaphors: {metaphor_density:.1} per 100 words, aim for at least {:.1}.",
                    target.metaphor_floor
                ));
            }
        }

        tracing::debug!(score, avg, ratio, metaphor_density, "style measured");

        StyleReport {
            score,
            measured: MeasuredStyle {
                sentence_count,
                word_count,
                avg_words_per_sentence: avg,
                short_sentence_ratio: ratio,
                metaphor_hits,
                metaphor_density,
            },
            components,
            suggestions,
        }
    }
}

/// Match `text` against `target` using the reference combat-metaphor lexicon.
pub fn match_style(text: &str, target: &StyleProfile) -> ConfigResult<StyleReport> {
    let matcher = StyleMatcher::new(*target, lexicon::combat_metaphors().clone())?;
    Ok(matcher.match_style(text))
}
