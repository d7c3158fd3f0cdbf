/*!
 * The fixed language pair and translation direction.
 *
 * The application translates between exactly two languages, Indonesian and
 * Minangkabau. A direction is fully determined by which of the two is the
 * source; there is no open-ended language selection.
 */

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One of the two supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Bahasa Indonesia (ISO 639-3: ind)
    Indonesian,
    /// Bahaso Minangkabau (ISO 639-3: min)
    Minangkabau,
}

/// Accepted spellings for each language, lowercase
static LANGUAGE_ALIASES: Lazy<HashMap<&'static str, Language>> = Lazy::new(|| {
    let mut aliases = HashMap::new();
    for alias in ["id", "ind", "indonesia", "indonesian", "bahasa indonesia"] {
        aliases.insert(alias, Language::Indonesian);
    }
    for alias in ["min", "minang", "minangkabau", "bahaso minang"] {
        aliases.insert(alias, Language::Minangkabau);
    }
    aliases
});

impl Language {
    /// ISO 639-3 code for the language
    pub fn iso_code(&self) -> &'static str {
        match self {
            Self::Indonesian => "ind",
            Self::Minangkabau => "min",
        }
    }

    /// Name as shown to users, matching the labels of the original interface
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Indonesian => "Indonesia",
            Self::Minangkabau => "Minangkabau",
        }
    }

    /// English name resolved through the ISO registry
    pub fn english_name(&self) -> &'static str {
        isolang::Language::from_639_3(self.iso_code())
            .map(|lang| lang.to_name())
            .unwrap_or_else(|| self.display_name())
    }

    /// The other language of the pair
    pub fn other(&self) -> Self {
        match self {
            Self::Indonesian => Self::Minangkabau,
            Self::Minangkabau => Self::Indonesian,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        LANGUAGE_ALIASES
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| anyhow!("Unsupported language: {}", s))
    }
}

/// Which of the two fixed languages is the source for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TranslationDirection {
    /// Indonesia -> Minangkabau
    IndonesianToMinangkabau,
    /// Minangkabau -> Indonesia
    MinangkabauToIndonesian,
}

impl TranslationDirection {
    /// All directions, in a stable order usable for per-direction storage
    pub const ALL: [Self; 2] = [Self::IndonesianToMinangkabau, Self::MinangkabauToIndonesian];

    /// Direction whose source is the given language
    pub fn from_source(source: Language) -> Self {
        match source {
            Language::Indonesian => Self::IndonesianToMinangkabau,
            Language::Minangkabau => Self::MinangkabauToIndonesian,
        }
    }

    /// Source language of the direction
    pub fn source(&self) -> Language {
        match self {
            Self::IndonesianToMinangkabau => Language::Indonesian,
            Self::MinangkabauToIndonesian => Language::Minangkabau,
        }
    }

    /// Target language of the direction
    pub fn target(&self) -> Language {
        self.source().other()
    }

    /// The reverse direction
    pub fn opposite(&self) -> Self {
        Self::from_source(self.target())
    }

    /// Name of the per-direction directory in the artifact store
    pub fn artifact_key(&self) -> &'static str {
        match self {
            Self::IndonesianToMinangkabau => "indonesia-minangkabau",
            Self::MinangkabauToIndonesian => "minangkabau-indonesia",
        }
    }

    /// Stable index of the direction, for fixed-size per-direction storage
    pub(crate) fn index(&self) -> usize {
        match self {
            Self::IndonesianToMinangkabau => 0,
            Self::MinangkabauToIndonesian => 1,
        }
    }
}

impl std::fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source(), self.target())
    }
}

impl std::str::FromStr for TranslationDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "indonesia-minangkabau" => Ok(Self::IndonesianToMinangkabau),
            "minangkabau-indonesia" => Ok(Self::MinangkabauToIndonesian),
            other => {
                // Fall back to parsing a bare source language
                let source: Language = other.parse()?;
                Ok(Self::from_source(source))
            }
        }
    }
}
