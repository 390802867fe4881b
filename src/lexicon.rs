//! Keyword tables and the reference lexicons shipped with the crate.
//!
//! A [`Lexicon`] maps category labels to trigger terms. Lexicons are validated
//! once when built and are immutable afterwards; the scorers only read them.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

// ---------------------------------------------------------------------------
// Match modes
// ---------------------------------------------------------------------------

/// How a trigger term is found in text.
///
/// `Loose` counts raw substring occurrences, so "war" also hits inside
/// "award" and "warrior". `WholeWord` requires a word boundary on both sides.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Loose,
    WholeWord,
}

// ---------------------------------------------------------------------------
// Lexicon data
// ---------------------------------------------------------------------------

/// Serializable form of a lexicon, as it appears in configuration files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexiconSpec {
    pub name: String,
    #[serde(default)]
    pub mode: MatchMode,
    pub categories: Vec<CategorySpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub label: String,
    pub terms: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Category {
    label: String,
    terms: Vec<String>,
    // One bounded pattern per term; empty in loose mode.
    patterns: Vec<Regex>,
}

impl Category {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Occurrences of every term in `lowered`, which must already be lowercase.
    pub fn count(&self, lowered: &str) -> usize {
        self.term_counts(lowered).map(|(_, n)| n).sum()
    }

    /// Occurrences of each term in `lowered`, in term order.
    pub fn term_counts<'a>(
        &'a self,
        lowered: &'a str,
    ) -> impl Iterator<Item = (&'a str, usize)> {
        self.terms.iter().enumerate().map(move |(i, term)| {
            let n = match self.patterns.get(i) {
                Some(pattern) => pattern.find_iter(lowered).count(),
                None => lowered.matches(term.as_str()).count(),
            };
            (term.as_str(), n)
        })
    }
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    name: String,
    mode: MatchMode,
    categories: Vec<Category>,
}

impl Lexicon {
    /// Build a lexicon from `(label, terms)` pairs.
    ///
    /// Terms are trimmed, lowercased and deduplicated in first-seen order.
    pub fn new<L, T, I, S>(name: &str, mode: MatchMode, categories: I) -> ConfigResult<Self>
    where
        I: IntoIterator<Item = (L, T)>,
        L: AsRef<str>,
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::BlankLexiconName);
        }

        let mut lexicon = Lexicon {
            name: name.to_string(),
            mode,
            categories: Vec::new(),
        };
        for (label, terms) in categories {
            let label = label.as_ref().trim();
            if lexicon.categories.iter().any(|c| c.label == label) {
                return Err(ConfigError::DuplicateCategory {
                    lexicon: lexicon.name.clone(),
                    label: label.to_string(),
                });
            }
            let category = lexicon.build_category(label, terms)?;
            lexicon.categories.push(category);
        }

        if lexicon.categories.is_empty() {
            return Err(ConfigError::EmptyLexicon {
                name: lexicon.name,
            });
        }
        Ok(lexicon)
    }

    pub fn from_spec(spec: &LexiconSpec) -> ConfigResult<Self> {
        Self::new(
            &spec.name,
            spec.mode,
            spec.categories.iter().map(|c| (&c.label, &c.terms)),
        )
    }

    /// Same categories under a different match mode.
    pub fn with_mode(self, mode: MatchMode) -> ConfigResult<Self> {
        if mode == self.mode {
            return Ok(self);
        }
        let categories: Vec<(String, Vec<String>)> = self
            .categories
            .into_iter()
            .map(|c| (c.label, c.terms))
            .collect();
        Self::new(&self.name, mode, categories)
    }

    /// Add a category, or append terms to an existing one with the same label.
    pub fn with_category<T, S>(mut self, label: &str, terms: T) -> ConfigResult<Self>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let label = label.trim();
        match self.categories.iter().position(|c| c.label == label) {
            Some(idx) => {
                let existing = self.categories[idx].terms.clone();
                let incoming: Vec<String> =
                    terms.into_iter().map(|t| t.as_ref().to_string()).collect();
                let merged = self.build_category(label, existing.into_iter().chain(incoming))?;
                self.categories[idx] = merged;
            }
            None => {
                let category = self.build_category(label, terms)?;
                self.categories.push(category);
            }
        }
        Ok(self)
    }

    fn build_category<T, S>(&self, label: &str, terms: T) -> ConfigResult<Category>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if label.is_empty() {
            return Err(ConfigError::BlankCategory {
                lexicon: self.name.clone(),
            });
        }

        let mut kept: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() {
                return Err(ConfigError::BlankTerm {
                    lexicon: self.name.clone(),
                    label: label.to_string(),
                });
            }
            if !kept.contains(&term) {
                kept.push(term);
            }
        }
        if kept.is_empty() {
            return Err(ConfigError::EmptyCategory {
                lexicon: self.name.clone(),
                label: label.to_string(),
            });
        }

        let patterns = match self.mode {
            MatchMode::Loose => Vec::new(),
            MatchMode::WholeWord => kept
                .iter()
                .map(|t| Regex::new(&format!(r"\b{}\b", regex::escape(t))))
                .collect::<Result<Vec<_>, _>>()?,
        };

        Ok(Category {
            label: label.to_string(),
            terms: kept,
            patterns,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, label: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.label == label)
    }

    pub fn to_spec(&self) -> LexiconSpec {
        LexiconSpec {
            name: self.name.clone(),
            mode: self.mode,
            categories: self
                .categories
                .iter()
                .map(|c| CategorySpec {
                    label: c.label.clone(),
                    terms: c.terms.clone(),
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Themes
// ---------------------------------------------------------------------------

/// The closed set of content themes used by the reference theme lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "Spiritual Warfare")]
    Warfare,
    #[serde(rename = "Kingdom Identity")]
    Identity,
    #[serde(rename = "Divine Authority")]
    Authority,
    #[serde(rename = "Covenant Relationship")]
    Covenant,
    #[serde(rename = "Inner Transformation")]
    Transformation,
    #[serde(rename = "Kingdom Mission")]
    Mission,
    #[serde(rename = "Spiritual Inheritance")]
    Inheritance,
    #[serde(rename = "Overcoming Victory")]
    Victory,
}

impl Theme {
    pub const ALL: [Theme; 8] = [
        Theme::Warfare,
        Theme::Identity,
        Theme::Authority,
        Theme::Covenant,
        Theme::Transformation,
        Theme::Mission,
        Theme::Inheritance,
        Theme::Victory,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Theme::Warfare => "Spiritual Warfare",
            Theme::Identity => "Kingdom Identity",
            Theme::Authority => "Divine Authority",
            Theme::Covenant => "Covenant Relationship",
            Theme::Transformation => "Inner Transformation",
            Theme::Mission => "Kingdom Mission",
            Theme::Inheritance => "Spiritual Inheritance",
            Theme::Victory => "Overcoming Victory",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Theme::Warfare => &[
                "battle", "fight", "warfare", "enemy", "resist", "stand", "armor", "weapon",
                "victory", "overcome",
            ],
            Theme::Identity => &[
                "son", "daughter", "chosen", "royal", "priesthood", "holy", "called", "elect",
                "identity", "belong",
            ],
            Theme::Authority => &[
                "authority", "power", "dominion", "rule", "throne", "reign", "command", "decree",
                "declare", "establish",
            ],
            Theme::Covenant => &[
                "covenant", "promise", "faithful", "blood", "seal", "oath", "agreement", "bond",
                "commitment", "relationship",
            ],
            Theme::Transformation => &[
                "transform", "renew", "change", "conform", "image", "glory", "process", "growth",
                "mature", "develop",
            ],
            Theme::Mission => &[
                "purpose", "calling", "mission", "send", "go", "commission", "assignment", "task",
                "mandate", "ministry",
            ],
            Theme::Inheritance => &[
                "inherit", "inheritance", "portion", "promise", "receive", "blessing",
                "birthright", "possession", "heritage",
            ],
            Theme::Victory => &[
                "victory", "triumph", "overcome", "conquer", "prevail", "win", "success",
                "achievement", "breakthrough",
            ],
        }
    }

    pub fn from_label(label: &str) -> ConfigResult<Theme> {
        Theme::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| ConfigError::UnknownTheme(label.to_string()))
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Reference lexicons
// ---------------------------------------------------------------------------

pub const EMOTIONAL: &str = "emotional";
pub const POWER_WORDS: &str = "power_words";
pub const CALLS_TO_ACTION: &str = "calls_to_action";
pub const SPIRITUAL: &str = "spiritual";
pub const TRIGGERS: &str = "triggers";
pub const COMBAT_METAPHORS: &str = "combat_metaphors";
pub const THEMES: &str = "themes";
pub const SENTIMENT: &str = "sentiment";
pub const VIRAL_EMOTIONAL: &str = "viral_emotional";

/// Names of the lexicons whose densities are reported in every analysis.
pub const DENSITY_LEXICONS: [&str; 5] =
    [EMOTIONAL, POWER_WORDS, CALLS_TO_ACTION, SPIRITUAL, TRIGGERS];

type Table = &'static [(&'static str, &'static [&'static str])];

const EMOTIONAL_TABLE: Table = &[(
    "emotional",
    &[
        "afraid", "angry", "anxious", "broken", "desperate", "empty", "failed", "fear",
        "frustrated", "guilty", "helpless", "hopeless", "hurt", "inadequate", "insecure",
        "lonely", "lost", "overwhelmed", "pain", "rejected", "shame", "struggle", "stuck",
        "tired", "weak", "worried", "darkness", "battle", "warrior", "fight", "wounded",
        "healing",
    ],
)];

const VIRAL_EMOTIONAL_TABLE: Table = &[(
    "viral_emotional",
    &[
        "pain", "hurt", "broken", "lost", "angry", "alone", "empty", "shame", "guilt", "fear",
        "hate", "love", "hope", "peace",
    ],
)];

const POWER_TABLE: Table = &[(
    "power_words",
    &[
        "proven", "secret", "breakthrough", "transform", "revolutionary", "exclusive",
        "limited", "urgent", "powerful", "essential", "critical", "vital", "ultimate",
        "blueprint", "protocol", "system", "framework",
    ],
)];

const CTA_TABLE: Table = &[(
    "calls_to_action",
    &[
        "click", "join", "buy", "get", "start", "download", "subscribe", "learn", "discover",
        "unlock", "access", "grab", "claim", "secure", "reserve", "register", "enroll",
    ],
)];

const SPIRITUAL_TABLE: Table = &[(
    "spiritual",
    &[
        "god", "jesus", "christ", "faith", "prayer", "bible", "scripture", "church", "worship",
        "grace", "salvation", "redemption", "covenant", "ministry", "spiritual", "holy",
        "blessed", "anointed",
    ],
)];

const TRIGGER_TABLE: Table = &[
    (
        "father_wound",
        &["father", "dad", "absent", "disappointed", "failed him", "never there", "old man"],
    ),
    (
        "marriage_death",
        &["marriage", "divorce", "wife", "alone", "empty bed", "she left", "lonely"],
    ),
    (
        "porn_struggle",
        &["porn", "lust", "addiction", "struggle", "temptation", "relapse", "shame"],
    ),
    (
        "church_hurt",
        &["church", "pastor", "ministry", "fake", "hypocrite", "burned out", "lost faith"],
    ),
    (
        "masculinity",
        &["man", "masculine", "weak", "strong", "warrior", "leader", "passive"],
    ),
    (
        "grace",
        &["grace", "forgiven", "mercy", "second chance", "redemption", "worthy"],
    ),
];

const COMBAT_TABLE: Table = &[(
    "combat_metaphors",
    &[
        "battle", "war", "fight", "sword", "shield", "armor", "warrior", "victory", "conquer",
        "defend", "strike", "triumph", "mighty", "strength", "overcome", "prevail",
        "stand firm", "resist",
    ],
)];

const SENTIMENT_TABLE: Table = &[
    (
        "positive",
        &["amazing", "incredible", "powerful", "transformed", "breakthrough", "success"],
    ),
    ("negative", &["failed", "struggle", "pain", "broken", "lost", "weak"]),
];

fn from_table(name: &str, mode: MatchMode, table: Table) -> Lexicon {
    Lexicon::new(name, mode, table.iter().map(|(l, t)| (*l, t.iter())))
        .expect("reference lexicon tables are valid")
}

// Word lists match whole tokens; trigger phrases and metaphors match loosely.
static EMOTIONAL_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(EMOTIONAL, MatchMode::WholeWord, EMOTIONAL_TABLE));
static POWER_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(POWER_WORDS, MatchMode::WholeWord, POWER_TABLE));
static CTA_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(CALLS_TO_ACTION, MatchMode::WholeWord, CTA_TABLE));
static SPIRITUAL_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(SPIRITUAL, MatchMode::WholeWord, SPIRITUAL_TABLE));
static SENTIMENT_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(SENTIMENT, MatchMode::WholeWord, SENTIMENT_TABLE));
static TRIGGER_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(TRIGGERS, MatchMode::Loose, TRIGGER_TABLE));
static VIRAL_EMOTIONAL_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(VIRAL_EMOTIONAL, MatchMode::Loose, VIRAL_EMOTIONAL_TABLE));
static COMBAT_LEXICON: Lazy<Lexicon> =
    Lazy::new(|| from_table(COMBAT_METAPHORS, MatchMode::Loose, COMBAT_TABLE));
static THEME_LEXICON: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::new(
        THEMES,
        MatchMode::Loose,
        Theme::ALL.iter().map(|t| (t.label(), t.keywords().iter())),
    )
    .expect("theme keyword tables are valid")
});

/// Look up a reference lexicon by name.
pub fn reference(name: &str) -> Option<&'static Lexicon> {
    let lexicon: &'static Lexicon = match name {
        EMOTIONAL => &*EMOTIONAL_LEXICON,
        POWER_WORDS => &*POWER_LEXICON,
        CALLS_TO_ACTION => &*CTA_LEXICON,
        SPIRITUAL => &*SPIRITUAL_LEXICON,
        TRIGGERS => &*TRIGGER_LEXICON,
        COMBAT_METAPHORS => &*COMBAT_LEXICON,
        THEMES => &*THEME_LEXICON,
        SENTIMENT => &*SENTIMENT_LEXICON,
        VIRAL_EMOTIONAL => &*VIRAL_EMOTIONAL_LEXICON,
        _ => return None,
    };
    Some(lexicon)
}

pub fn combat_metaphors() -> &'static Lexicon {
    &COMBAT_LEXICON
}

pub fn themes() -> &'static Lexicon {
    &THEME_LEXICON
}
