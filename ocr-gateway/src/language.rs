//! Recognition language allow-list.
//!
//! Callers may name a language either by its English name (`"german"`) or by
//! the Tesseract code (`"deu"`), in any case. Adding a language means adding
//! a variant here; there is no discovery of installed language data.

use std::fmt;
use std::str::FromStr;

use crate::error::{GatewayError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    German,
    French,
    Italian,
}

pub const DEFAULT_LANGUAGE: Language = Language::English;

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::German,
        Language::French,
        Language::Italian,
    ];

    /// Tesseract language code (ISO 639-2/T).
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "eng",
            Language::German => "deu",
            Language::French => "fra",
            Language::Italian => "ita",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::German => "german",
            Language::French => "french",
            Language::Italian => "italian",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.name() == token || lang.code() == token)
            .ok_or_else(|| GatewayError::UnsupportedLanguage(s.to_string()))
    }
}

/// Resolves a caller-supplied token. An empty token selects
/// [`DEFAULT_LANGUAGE`].
pub fn resolve_language(token: &str) -> Result<Language> {
    if token.is_empty() {
        return Ok(DEFAULT_LANGUAGE);
    }
    token.parse()
}

/// Human-readable names, comma separated, for error messages.
pub fn supported_language_names() -> String {
    Language::ALL
        .iter()
        .map(Language::name)
        .collect::<Vec<_>>()
        .join(", ")
}
