//! Supported CV languages and locale detection.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    En,
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl Language {
    /// Short code used in data file names and localized maps.
    pub fn code(self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::Pt => "Português",
            Language::En => "English",
        }
    }

    pub fn toggled(self) -> Language {
        match self {
            Language::Pt => Language::En,
            Language::En => Language::Pt,
        }
    }

    pub fn present_label(self) -> &'static str {
        match self {
            Language::Pt => "Presente",
            Language::En => "Present",
        }
    }

    pub fn intro_text(self) -> &'static str {
        match self {
            Language::Pt => "Há muito tempo, em uma galáxia muito, muito distante...",
            Language::En => "A long time ago, in a galaxy far, far away...",
        }
    }

    /// Resolve the startup language.
    ///
    /// An explicit CLI choice wins, then the saved preference, then the
    /// process locale. Anything that is not Portuguese falls back to English.
    pub fn detect(
        cli: Option<Language>,
        saved: Option<Language>,
        locale: Option<&str>,
    ) -> Language {
        cli.or(saved)
            .or_else(|| {
                locale
                    .filter(|value| value.to_ascii_lowercase().starts_with("pt"))
                    .map(|_| Language::Pt)
            })
            .unwrap_or_default()
    }

    pub fn locale_from_env() -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|key| env::var(key).ok())
            .find(|value| !value.trim().is_empty())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.starts_with("pt") {
            Ok(Language::Pt)
        } else if normalized.starts_with("en") {
            Ok(Language::En)
        } else {
            Err(anyhow!("Unsupported language: {raw} (expected pt or en)"))
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn parses_regional_variants() {
        assert_eq!("pt-BR".parse::<Language>().unwrap(), Language::Pt);
        assert_eq!(" EN_us ".parse::<Language>().unwrap(), Language::En);
        assert!("de".parse::<Language>().is_err());
    }

    #[test]
    fn detection_prefers_cli_then_saved_then_locale() {
        assert_eq!(
            Language::detect(Some(Language::En), Some(Language::Pt), Some("pt_BR.UTF-8")),
            Language::En
        );
        assert_eq!(
            Language::detect(None, Some(Language::Pt), Some("en_US.UTF-8")),
            Language::Pt
        );
        assert_eq!(
            Language::detect(None, None, Some("pt_PT.UTF-8")),
            Language::Pt
        );
        assert_eq!(Language::detect(None, None, Some("fr_FR")), Language::En);
        assert_eq!(Language::detect(None, None, None), Language::En);
    }
}
