//! Sentence and word splitting.

use once_cell::sync::Lazy;
use regex::Regex;

// A run of terminators, optional closing quotes/brackets, then whitespace or end.
static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+["'\u{201D}\u{2019})\]]*(?:\s+|$)"#).unwrap());

static PUNCT_STRIP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\w]+|[^\w]+$").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<String>,
}

impl Sentence {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// Sentences in input order, each with its stripped word tokens.
///
/// Sentences that are empty after stripping punctuation are never stored, so
/// every entry has at least one word.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizedText {
    pub sentences: Vec<Sentence>,
}

impl TokenizedText {
    pub fn word_count(&self) -> usize {
        self.sentences.iter().map(Sentence::word_count).sum()
    }

    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.sentences
            .iter()
            .flat_map(|s| s.words.iter().map(String::as_str))
    }
}

pub fn tokenize(text: &str) -> TokenizedText {
    let sentences = split_sentences(text)
        .into_iter()
        .filter_map(|raw| {
            let words = split_words(raw);
            if words.is_empty() {
                None
            } else {
                Some(Sentence {
                    text: raw.to_string(),
                    words,
                })
            }
        })
        .collect();
    TokenizedText { sentences }
}

/// Raw sentence slices, trimmed, with empty pieces dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn split_words(sentence: &str) -> Vec<String> {
    sentence
        .split_whitespace()
        .filter_map(|t| {
            let stripped = PUNCT_STRIP_RE.replace_all(t, "");
            if stripped.is_empty() {
                None
            } else {
                Some(stripped.into_owned())
            }
        })
        .collect()
}

/// Cut `text` to at most `max_chars` characters, never splitting a char.
/// Returns the kept slice and whether anything was dropped.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_sentences() {
        let tokens = tokenize("");
        assert!(tokens.is_empty());
        assert_eq!(tokens.word_count(), 0);
    }

    #[test]
    fn text_without_terminator_is_one_sentence() {
        let tokens = tokenize("stand firm and hold the line");
        assert_eq!(tokens.sentence_count(), 1);
        assert_eq!(tokens.word_count(), 6);
    }

    #[test]
    fn consecutive_terminators_collapse() {
        let tokens = tokenize("Wait... What?! Go now.");
        let lens: Vec<usize> = tokens.sentences.iter().map(Sentence::word_count).collect();
        assert_eq!(lens, vec![1, 1, 2]);
    }

    #[test]
    fn punctuation_only_sentences_are_dropped() {
        let tokens = tokenize("Hello there. ... !!! -- Goodbye.");
        assert_eq!(tokens.sentence_count(), 2);
    }

    #[test]
    fn words_are_stripped_of_edge_punctuation() {
        let words = split_words("\"Victory,\" he said (quietly).");
        assert_eq!(words, vec!["Victory", "he", "said", "quietly"]);
    }

    #[test]
    fn unicode_letters_are_word_characters() {
        let words = split_words("café naïve — résumé");
        assert_eq!(words, vec!["café", "naïve", "résumé"]);
    }

    #[test]
    fn closing_quote_after_terminator_ends_sentence() {
        let tokens = tokenize("He said \"Go.\" Then he left.");
        assert_eq!(tokens.sentence_count(), 2);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let (kept, cut) = truncate_chars("ééééé", 3);
        assert_eq!(kept, "ééé");
        assert!(cut);

        let (kept, cut) = truncate_chars("abc", 10);
        assert_eq!(kept, "abc");
        assert!(!cut);
    }
}
