//! Per-category keyword density.
//!
//! One formula serves every lexicon: hits per 100 words, zero when the text
//! has no words.

use serde::Serialize;

use crate::config::HP;
use crate::lexicon::Lexicon;
use crate::tokenizer::{tokenize, truncate_chars};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDensity {
    pub label: String,
    pub count: usize,
    pub density: f64,
    /// Terms with at least one hit, in lexicon term order.
    pub matched_terms: Vec<String>,
}

/// Hits for one lexicon. Every category is present, in lexicon order,
/// including those with zero hits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityResult {
    pub lexicon: String,
    pub word_count: usize,
    pub total_hits: usize,
    pub aggregate_density: f64,
    pub categories: Vec<CategoryDensity>,
}

impl DensityResult {
    /// Categories with at least one hit.
    pub fn found(&self) -> impl Iterator<Item = &CategoryDensity> {
        self.categories.iter().filter(|c| c.count > 0)
    }

    pub fn get(&self, label: &str) -> Option<&CategoryDensity> {
        self.categories.iter().find(|c| c.label == label)
    }

    /// Zero for unknown labels as well as for categories without hits.
    pub fn density_of(&self, label: &str) -> f64 {
        self.get(label).map_or(0.0, |c| c.density)
    }

    pub fn count_of(&self, label: &str) -> usize {
        self.get(label).map_or(0, |c| c.count)
    }

    /// Matched terms across all categories, without repeats.
    pub fn matched_terms(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = Vec::new();
        for term in self.categories.iter().flat_map(|c| &c.matched_terms) {
            if !terms.contains(&term.as_str()) {
                terms.push(term.as_str());
            }
        }
        terms
    }

    /// Found categories by descending count; ties keep lexicon order.
    pub fn ranked(&self) -> Vec<&CategoryDensity> {
        let mut found: Vec<&CategoryDensity> = self.found().collect();
        found.sort_by(|a, b| b.count.cmp(&a.count));
        found
    }
}

/// Hits per 100 words, or 0 for an empty text.
pub fn per_hundred(count: usize, word_count: usize) -> f64 {
    if word_count == 0 {
        0.0
    } else {
        count as f64 / word_count as f64 * HP.density_basis
    }
}

/// Score `text` after capping it at the default input length.
pub fn score(text: &str, lexicon: &Lexicon) -> DensityResult {
    let (text, _) = truncate_chars(text, HP.max_input_chars);
    let word_count = tokenize(text).word_count();
    score_lowered(&text.to_lowercase(), word_count, lexicon)
}

/// Score already-lowercased text whose word count is known.
#[tracing::instrument(level = "trace", skip_all, fields(lexicon = lexicon.name(), word_count))]
pub(crate) fn score_lowered(lowered: &str, word_count: usize, lexicon: &Lexicon) -> DensityResult {
    let categories: Vec<CategoryDensity> = lexicon
        .categories()
        .iter()
        .map(|category| {
            let mut count = 0;
            let mut matched_terms = Vec::new();
            for (term, n) in category.term_counts(lowered) {
                if n > 0 {
                    count += n;
                    matched_terms.push(term.to_string());
                }
            }
            CategoryDensity {
                label: category.label().to_string(),
                count,
                density: per_hundred(count, word_count),
                matched_terms,
            }
        })
        .collect();

    let total_hits = categories.iter().map(|c| c.count).sum();
    DensityResult {
        lexicon: lexicon.name().to_string(),
        word_count,
        total_hits,
        aggregate_density: per_hundred(total_hits, word_count),
        categories,
    }
}
