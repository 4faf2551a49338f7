//! Templates and colours for the CV viewer.

use crate::config::ThemeMode;
use crate::crawl::CrawlTint;
use anyhow::{Result, anyhow};
use iced::{Color, Theme as IcedTheme};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How the CV is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    #[default]
    #[serde(alias = "better-view")]
    Standard,
    AtsFriendly,
    StarWars,
}

impl Template {
    pub const ALL: [Template; 3] = [Template::Standard, Template::AtsFriendly, Template::StarWars];

    pub fn next(self) -> Template {
        match self {
            Template::Standard => Template::AtsFriendly,
            Template::AtsFriendly => Template::StarWars,
            Template::StarWars => Template::Standard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Template::Standard => "Standard",
            Template::AtsFriendly => "ATS Friendly",
            Template::StarWars => "Star Wars",
        }
    }

    pub fn is_crawl(self) -> bool {
        matches!(self, Template::StarWars)
    }

    /// The crawl template is never restored on launch.
    pub fn restorable(self) -> Template {
        if self.is_crawl() {
            Template::Standard
        } else {
            self
        }
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Template {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "standard" | "better-view" => Ok(Template::Standard),
            "ats" | "ats-friendly" => Ok(Template::AtsFriendly),
            "star-wars" | "starwars" | "crawl" => Ok(Template::StarWars),
            other => Err(anyhow!(
                "Unknown template: {other} (expected standard, ats or star-wars)"
            )),
        }
    }
}

/// Colour theme applied to iced widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Theme {
    /// The crawl always runs on a dark sky.
    pub fn for_view(mode: ThemeMode, template: Template) -> Self {
        if template.is_crawl() {
            Theme::Dark
        } else {
            Theme::from(mode)
        }
    }
}

impl From<ThemeMode> for Theme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Night => Theme::Dark,
            ThemeMode::Day => Theme::Light,
        }
    }
}

impl From<Theme> for IcedTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => IcedTheme::Light,
            Theme::Dark => IcedTheme::Dark,
        }
    }
}

pub fn crawl_tint(mode: ThemeMode) -> CrawlTint {
    match mode {
        ThemeMode::Night => CrawlTint::Gold,
        ThemeMode::Day => CrawlTint::Pale,
    }
}

pub fn tint_color(tint: CrawlTint) -> Color {
    match tint {
        CrawlTint::Gold => Color::from_rgb8(0xFF, 0xE8, 0x1F),
        CrawlTint::Pale => Color::from_rgb8(0xE6, 0xE6, 0xD2),
    }
}

pub fn accent_color(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Night => Color::from_rgb8(0x7A, 0xB8, 0xFF),
        ThemeMode::Day => Color::from_rgb8(0x1E, 0x4F, 0x9A),
    }
}

pub fn muted_color(mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Night => Color::from_rgba(1.0, 1.0, 1.0, 0.65),
        ThemeMode::Day => Color::from_rgba(0.0, 0.0, 0.0, 0.6),
    }
}
