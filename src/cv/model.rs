use crate::language::Language;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A field that is either shared by every language or keyed by language code.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Localized {
    Plain(String),
    PerLanguage(BTreeMap<String, String>),
}

impl Default for Localized {
    fn default() -> Self {
        Localized::Plain(String::new())
    }
}

impl Localized {
    /// Missing translations resolve to an empty string.
    pub fn resolve(&self, language: Language) -> &str {
        match self {
            Localized::Plain(value) => value,
            Localized::PerLanguage(map) => map
                .get(language.code())
                .map(String::as_str)
                .unwrap_or(""),
        }
    }
}

/// Years show up both as JSON strings and numbers.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Scalar {
    Text(String),
    Number(i64),
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Text(value) => write!(f, "{value}"),
            Scalar::Number(value) => write!(f, "{value}"),
        }
    }
}

/// Language-independent CV data (`cv-data.json`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CvData {
    pub personal: Personal,
    pub tech_stack: Vec<String>,
    pub work_experience: Vec<Job>,
    pub education: Vec<Education>,
    pub certifications: Vec<Certification>,
    pub languages: Vec<SpokenLanguage>,
    pub projects: Vec<ProjectRef>,
    pub hobbies: Vec<Localized>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Personal {
    pub name: String,
    pub tagline: Localized,
    pub photo: String,
    pub location: Localized,
    pub phone: String,
    pub email: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Job {
    pub key: Option<String>,
    pub title: Localized,
    pub company: Localized,
    pub period: Localized,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Education {
    pub title: Localized,
    pub institution: String,
    pub period: Localized,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Certification {
    pub name: Localized,
    pub issuer: Option<Localized>,
    pub year: Option<Scalar>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpokenLanguage {
    pub name: Localized,
    pub level: Localized,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectRef {
    pub key: Option<String>,
}

/// Per-language prose (`cv-descriptions-<lang>.json`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Descriptions {
    pub seo: Option<Seo>,
    pub about: Option<String>,
    pub sections: SectionTitles,
    pub key_achievements: Vec<Achievement>,
    pub work_experience: BTreeMap<String, JobDescription>,
    pub projects: BTreeMap<String, ProjectDescription>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seo {
    pub title: String,
    pub description: String,
}

/// Section headings; a missing heading hides the section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SectionTitles {
    pub summary: Option<String>,
    pub key_achievements: Option<String>,
    pub work_experience: Option<String>,
    pub tech_stack: Option<String>,
    pub education: Option<String>,
    pub certifications: Option<String>,
    pub languages: Option<String>,
    pub projects: Option<String>,
    pub hobbies: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Achievement {
    pub title: Option<Localized>,
    pub description: Option<Localized>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct JobDescription {
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectDescription {
    pub name: Option<Localized>,
    pub description: Option<Localized>,
}

/// Everything needed to render one language.
#[derive(Debug, Clone)]
pub struct CvBundle {
    pub language: Language,
    pub data: CvData,
    pub descriptions: Descriptions,
}

impl CvBundle {
    pub fn window_title(&self) -> String {
        if let Some(seo) = self.descriptions.seo.as_ref().filter(|s| !s.title.is_empty()) {
            return seo.title.clone();
        }
        let prefix = match self.language {
            Language::Pt => "Currículo",
            Language::En => "Resume",
        };
        if self.data.personal.name.is_empty() {
            prefix.to_string()
        } else {
            format!("{prefix} - {}", self.data.personal.name)
        }
    }
}
