//! Marketing signals derived from the same tokens: viral potential rating,
//! copywriting formula detection, frequent words, hooks and sentiment.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::HP;
use crate::density::{per_hundred, score_lowered, DensityResult};
use crate::lexicon::Lexicon;
use crate::tokenizer::TokenizedText;

// ---------------------------------------------------------------------------
// Viral potential
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViralPotential {
    High,
    Medium,
    Low,
}

impl ViralPotential {
    /// `emotional_density` is matched emotional terms per 100 words;
    /// `trigger_terms` is the raw number of trigger terms found.
    pub fn rate(emotional_density: f64, trigger_terms: usize) -> Self {
        if emotional_density > HP.viral_emotional_high || trigger_terms > HP.viral_trigger_high {
            ViralPotential::High
        } else if emotional_density > HP.viral_emotional_medium {
            ViralPotential::Medium
        } else {
            ViralPotential::Low
        }
    }
}

// ---------------------------------------------------------------------------
// Copywriting formulas
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketingFormula {
    #[serde(rename = "PAS (Problem-Agitate-Solution)")]
    ProblemAgitateSolution,
    #[serde(rename = "AIDA (Attention-Interest-Desire-Action)")]
    Aida,
    #[serde(rename = "Story-based hook")]
    StoryHook,
    #[serde(rename = "Urgency/Scarcity")]
    UrgencyScarcity,
}

// A formula is detected when every one of its patterns matches somewhere.
static FORMULA_RULES: Lazy<Vec<(MarketingFormula, Vec<Regex>)>> = Lazy::new(|| {
    let rules: [(MarketingFormula, &[&str]); 4] = [
        (
            MarketingFormula::ProblemAgitateSolution,
            &[
                r"(?i)problem|issue|struggle",
                r"(?i)worse|painful|frustrat",
                r"(?i)solution|answer|fix",
            ],
        ),
        (
            MarketingFormula::Aida,
            &[
                r"(?i)attention|discover|reveal",
                r"(?i)want|need|desire",
                r"(?i)click|join|buy|get",
            ],
        ),
        (
            MarketingFormula::StoryHook,
            &[r"(?i)story|once|remember when|years ago"],
        ),
        (
            MarketingFormula::UrgencyScarcity,
            &[r"(?i)limited|urgent|now|today|ends|last chance"],
        ),
    ];
    rules
        .into_iter()
        .map(|(formula, patterns)| {
            let compiled = patterns.iter().map(|p| Regex::new(p).unwrap()).collect();
            (formula, compiled)
        })
        .collect()
});

pub fn detect_formulas(text: &str) -> Vec<MarketingFormula> {
    FORMULA_RULES
        .iter()
        .filter(|(_, patterns)| patterns.iter().all(|p| p.is_match(text)))
        .map(|(formula, _)| *formula)
        .collect()
}

// ---------------------------------------------------------------------------
// Marketing angles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketingAngle {
    #[serde(rename = "Father wound angle")]
    FatherWound,
    #[serde(rename = "Marriage restoration")]
    MarriageRestoration,
    #[serde(rename = "Sexual purity")]
    SexualPurity,
    #[serde(rename = "Church wounds")]
    ChurchWounds,
    #[serde(rename = "Generic spiritual content")]
    Generic,
}

static ANGLE_RULES: Lazy<Vec<(MarketingAngle, Regex)>> = Lazy::new(|| {
    [
        (MarketingAngle::FatherWound, r"(?i)father|dad|son"),
        (MarketingAngle::MarriageRestoration, r"(?i)marriage|wife|divorce"),
        (MarketingAngle::SexualPurity, r"(?i)porn|lust|addiction"),
        (MarketingAngle::ChurchWounds, r"(?i)church|pastor|ministry"),
    ]
    .into_iter()
    .map(|(angle, pattern)| (angle, Regex::new(pattern).unwrap()))
    .collect()
});

/// Every angle the text leans on, or [`MarketingAngle::Generic`] alone.
pub fn detect_angles(text: &str) -> Vec<MarketingAngle> {
    let angles: Vec<MarketingAngle> = ANGLE_RULES
        .iter()
        .filter(|(_, pattern)| pattern.is_match(text))
        .map(|(angle, _)| *angle)
        .collect();
    if angles.is_empty() {
        vec![MarketingAngle::Generic]
    } else {
        angles
    }
}

// ---------------------------------------------------------------------------
// Word statistics
// ---------------------------------------------------------------------------

static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
        "from", "up", "about", "into", "through", "during", "is", "are", "was", "were", "be",
        "been", "being", "have", "has", "had", "do", "does", "did", "will", "would", "should",
        "could", "may", "might",
    ]
    .into_iter()
    .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordFrequency {
    pub word: String,
    pub count: usize,
}

/// Most frequent content words, highest count first, ties alphabetical.
pub fn top_words(tokens: &TokenizedText, limit: usize) -> Vec<WordFrequency> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for word in tokens.words() {
        let word = word.to_lowercase();
        if word.chars().count() < HP.top_word_min_chars || STOPWORDS.contains(word.as_str()) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut ranked: Vec<WordFrequency> = counts
        .into_iter()
        .map(|(word, count)| WordFrequency { word, count })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(limit);
    ranked
}

/// Opening sentences long enough to work as a hook.
pub fn hooks(tokens: &TokenizedText) -> Vec<String> {
    tokens
        .sentences
        .iter()
        .take(HP.hook_sentences)
        .filter(|s| s.text.chars().count() >= HP.hook_min_chars)
        .map(|s| s.text.clone())
        .collect()
}

pub fn avg_word_length(tokens: &TokenizedText) -> f64 {
    let word_count = tokens.word_count();
    if word_count == 0 {
        return 0.0;
    }
    let chars: usize = tokens.words().map(|w| w.chars().count()).sum();
    chars as f64 / word_count as f64
}

/// Positive minus negative hits per 100 words. The lexicon needs
/// `positive` and `negative` categories; a missing one counts as zero.
pub fn sentiment(lowered: &str, word_count: usize, lexicon: &Lexicon) -> f64 {
    let hits = |label: &str| lexicon.category(label).map_or(0, |c| c.count(lowered));
    let positive = hits("positive");
    let negative = hits("negative");
    if positive >= negative {
        per_hundred(positive - negative, word_count)
    } else {
        -per_hundred(negative - positive, word_count)
    }
}

// ---------------------------------------------------------------------------
// Bundle
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signals {
    pub viral_potential: ViralPotential,
    pub formulas: Vec<MarketingFormula>,
    pub angles: Vec<MarketingAngle>,
    pub top_words: Vec<WordFrequency>,
    pub hooks: Vec<String>,
    pub sentiment: f64,
    pub avg_word_length: f64,
}

pub(crate) struct SignalInputs<'a> {
    pub text: &'a str,
    pub lowered: &'a str,
    pub tokens: &'a TokenizedText,
    pub viral_emotional: &'a Lexicon,
    pub triggers: Option<&'a DensityResult>,
    pub sentiment: &'a Lexicon,
}

/// Distinct terms found, summed over categories.
fn distinct_terms(result: &DensityResult) -> usize {
    result.categories.iter().map(|c| c.matched_terms.len()).sum()
}

#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn collect(inputs: SignalInputs<'_>) -> Signals {
    let word_count = inputs.tokens.word_count();
    let emotional = score_lowered(inputs.lowered, word_count, inputs.viral_emotional);
    let emotional_density = per_hundred(distinct_terms(&emotional), word_count);
    let trigger_terms = inputs.triggers.map_or(0, distinct_terms);
    tracing::debug!(emotional_density, trigger_terms, "viral inputs");
    Signals {
        viral_potential: ViralPotential::rate(emotional_density, trigger_terms),
        formulas: detect_formulas(inputs.text),
        angles: detect_angles(inputs.text),
        top_words: top_words(inputs.tokens, HP.top_words_limit),
        hooks: hooks(inputs.tokens),
        sentiment: sentiment(inputs.lowered, word_count, inputs.sentiment),
        avg_word_length: avg_word_length(inputs.tokens),
    }
}
