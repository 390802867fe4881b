use thiserror::Error;

/// Raised while building an [`crate::Analyzer`] or any of its parts.
///
/// Scoring itself never fails: every check lives here so a constructed
/// analyzer can score any text without re-validating.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("lexicon '{name}' has no categories")]
    EmptyLexicon { name: String },

    #[error("lexicon name must not be blank")]
    BlankLexiconName,

    #[error("category '{label}' in lexicon '{lexicon}' has no terms")]
    EmptyCategory { lexicon: String, label: String },

    #[error("category label in lexicon '{lexicon}' must not be blank")]
    BlankCategory { lexicon: String },

    #[error("category '{label}' appears twice in lexicon '{lexicon}'")]
    DuplicateCategory { lexicon: String, label: String },

    #[error("category '{label}' in lexicon '{lexicon}' contains a blank term")]
    BlankTerm { lexicon: String, label: String },

    #[error("no reference lexicon named '{0}'")]
    UnknownLexicon(String),

    #[error("lexicon '{0}' is configured more than once")]
    DuplicateLexicon(String),

    #[error("style profile field '{field}' is invalid: {value}")]
    InvalidProfile { field: &'static str, value: f64 },

    #[error("'{field}' must be within [0, 1], got {value}")]
    InvalidThreshold { field: &'static str, value: f64 },

    #[error("max_input_chars must be greater than zero")]
    ZeroInputCap,

    #[error("unknown theme '{0}'")]
    UnknownTheme(String),

    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to compile term pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Raised at the text boundary, before any scoring happens.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("input is not valid UTF-8: {0}")]
    InvalidInput(#[from] std::str::Utf8Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
