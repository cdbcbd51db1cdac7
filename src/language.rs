//! Registry of the languages supported by Chatterbox Multilingual.
//!
//! Maps user-facing display names to the ISO-639-1 codes the model and the
//! translation service expect. The set is fixed at compile time.

use std::fmt;

/// A supported synthesis language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    display_name: &'static str,
    code: &'static str,
}

impl Language {
    const fn new(display_name: &'static str, code: &'static str) -> Self {
        Self { display_name, code }
    }

    /// Human-readable name shown in the language picker (e.g. `"Spanish"`).
    pub fn display_name(&self) -> &'static str {
        self.display_name
    }

    /// Two-letter language code passed to the model (e.g. `"es"`).
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Every supported language, in picker order.
    pub fn all() -> &'static [Language] {
        &LANGUAGES
    }

    /// Look up a language by display name (case-insensitive).
    pub fn from_display_name(name: &str) -> Option<Language> {
        let name = name.trim();
        LANGUAGES
            .iter()
            .find(|l| l.display_name.eq_ignore_ascii_case(name))
            .copied()
    }

    /// Look up a language by its two-letter code (case-insensitive).
    pub fn from_code(code: &str) -> Option<Language> {
        let code = code.trim();
        LANGUAGES
            .iter()
            .find(|l| l.code.eq_ignore_ascii_case(code))
            .copied()
    }

    /// Resolve user input that may be either a display name or a code.
    pub fn resolve(input: &str) -> Option<Language> {
        Self::from_display_name(input).or_else(|| Self::from_code(input))
    }

    /// Name used for the downloadable attachment, e.g. `polyglot_es.wav`.
    pub fn download_file_name(&self) -> String {
        format!("polyglot_{}.wav", self.code)
    }
}

impl Default for Language {
    fn default() -> Self {
        LANGUAGES[0]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.code)
    }
}

impl std::str::FromStr for Language {
    type Err = crate::error::PolyglotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s).ok_or_else(|| {
            crate::error::PolyglotError::Validation(format!(
                "unsupported language `{s}`; run `polyglot languages` for the list"
            ))
        })
    }
}

static LANGUAGES: [Language; 23] = [
    Language::new("English", "en"),
    Language::new("Spanish", "es"),
    Language::new("French", "fr"),
    Language::new("German", "de"),
    Language::new("Italian", "it"),
    Language::new("Portuguese", "pt"),
    Language::new("Polish", "pl"),
    Language::new("Turkish", "tr"),
    Language::new("Russian", "ru"),
    Language::new("Dutch", "nl"),
    Language::new("Arabic", "ar"),
    Language::new("Swedish", "sv"),
    Language::new("Danish", "da"),
    Language::new("Greek", "el"),
    Language::new("Finnish", "fi"),
    Language::new("Hebrew", "he"),
    Language::new("Hindi", "hi"),
    Language::new("Japanese", "ja"),
    Language::new("Korean", "ko"),
    Language::new("Malay", "ms"),
    Language::new("Norwegian", "no"),
    Language::new("Swahili", "sw"),
    Language::new("Chinese", "zh"),
];
