use crate::crawl::{CrawlSettings, SearchLimits};
use serde::Deserialize;
use std::time::Duration;

/// High-level app configuration; flattened from the `conf/config.toml` tables.
#[derive(Debug, Clone, Deserialize, serde::Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeMode,
    #[serde(default = "crate::config::defaults::default_font_size")]
    pub font_size: u32,
    #[serde(default = "crate::config::defaults::default_line_spacing")]
    pub line_spacing: f32,
    #[serde(default = "crate::config::defaults::default_crawl_font_size")]
    pub crawl_font_size: u32,
    #[serde(default = "crate::config::defaults::default_margin_horizontal")]
    pub margin_horizontal: u16,
    #[serde(default = "crate::config::defaults::default_crawl_speed")]
    pub crawl_speed: f32,
    #[serde(default = "crate::config::defaults::default_crawl_trailing_margin")]
    pub crawl_trailing_margin: f32,
    #[serde(default = "crate::config::defaults::default_crawl_fallback_duration_ms")]
    pub crawl_fallback_duration_ms: u64,
    #[serde(default = "crate::config::defaults::default_crawl_settle_frames")]
    pub crawl_settle_frames: u8,
    #[serde(default = "crate::config::defaults::default_crawl_search_iterations")]
    pub crawl_search_iterations: u32,
    #[serde(default = "crate::config::defaults::default_crawl_search_tolerance")]
    pub crawl_search_tolerance: f32,
    #[serde(default = "crate::config::defaults::default_crawl_search_max_step")]
    pub crawl_search_max_step: f32,
    #[serde(default = "crate::config::defaults::default_crawl_start_guard_ms")]
    pub crawl_start_guard_ms: u64,
    #[serde(default = "crate::config::defaults::default_crawl_language_settle_ms")]
    pub crawl_language_settle_ms: u64,
    #[serde(default)]
    pub music_path: Option<String>,
    #[serde(default = "crate::config::defaults::default_music_volume")]
    pub music_volume: f32,
    #[serde(default = "crate::config::defaults::default_music_autoplay")]
    pub music_autoplay: bool,
    #[serde(default = "crate::config::defaults::default_music_autoplay_delay_ms")]
    pub music_autoplay_delay_ms: u64,
    #[serde(default = "crate::config::defaults::default_intro_duration_ms")]
    pub intro_duration_ms: u64,
    #[serde(default = "crate::config::defaults::default_window_width")]
    pub window_width: f32,
    #[serde(default = "crate::config::defaults::default_window_height")]
    pub window_height: f32,
    #[serde(default = "crate::config::defaults::default_log_level")]
    pub log_level: LogLevel,
    #[serde(default = "crate::config::defaults::default_key_toggle_crawl")]
    pub key_toggle_crawl: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_language")]
    pub key_toggle_language: String,
    #[serde(default = "crate::config::defaults::default_key_toggle_theme")]
    pub key_toggle_theme: String,
    #[serde(default = "crate::config::defaults::default_key_next_template")]
    pub key_next_template: String,
    #[serde(default = "crate::config::defaults::default_key_reload")]
    pub key_reload: String,
    #[serde(default = "crate::config::defaults::default_key_repeat_intro")]
    pub key_repeat_intro: String,
    #[serde(default = "crate::config::defaults::default_key_safe_quit")]
    pub key_safe_quit: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            theme: ThemeMode::Night,
            font_size: crate::config::defaults::default_font_size(),
            line_spacing: crate::config::defaults::default_line_spacing(),
            crawl_font_size: crate::config::defaults::default_crawl_font_size(),
            margin_horizontal: crate::config::defaults::default_margin_horizontal(),
            crawl_speed: crate::config::defaults::default_crawl_speed(),
            crawl_trailing_margin: crate::config::defaults::default_crawl_trailing_margin(),
            crawl_fallback_duration_ms: crate::config::defaults::default_crawl_fallback_duration_ms(),
            crawl_settle_frames: crate::config::defaults::default_crawl_settle_frames(),
            crawl_search_iterations: crate::config::defaults::default_crawl_search_iterations(),
            crawl_search_tolerance: crate::config::defaults::default_crawl_search_tolerance(),
            crawl_search_max_step: crate::config::defaults::default_crawl_search_max_step(),
            crawl_start_guard_ms: crate::config::defaults::default_crawl_start_guard_ms(),
            crawl_language_settle_ms: crate::config::defaults::default_crawl_language_settle_ms(),
            music_path: None,
            music_volume: crate::config::defaults::default_music_volume(),
            music_autoplay: crate::config::defaults::default_music_autoplay(),
            music_autoplay_delay_ms: crate::config::defaults::default_music_autoplay_delay_ms(),
            intro_duration_ms: crate::config::defaults::default_intro_duration_ms(),
            window_width: crate::config::defaults::default_window_width(),
            window_height: crate::config::defaults::default_window_height(),
            log_level: crate::config::defaults::default_log_level(),
            key_toggle_crawl: crate::config::defaults::default_key_toggle_crawl(),
            key_toggle_language: crate::config::defaults::default_key_toggle_language(),
            key_toggle_theme: crate::config::defaults::default_key_toggle_theme(),
            key_next_template: crate::config::defaults::default_key_next_template(),
            key_reload: crate::config::defaults::default_key_reload(),
            key_repeat_intro: crate::config::defaults::default_key_repeat_intro(),
            key_safe_quit: crate::config::defaults::default_key_safe_quit(),
        }
    }
}

impl AppConfig {
    /// Crawl tunables, with nonsensical values replaced by their defaults.
    pub fn crawl_settings(&self) -> CrawlSettings {
        let defaults = CrawlSettings::default();
        let positive = |value: f32, fallback: f32| {
            if value.is_finite() && value > 0.0 {
                value
            } else {
                fallback
            }
        };
        CrawlSettings {
            speed_px_per_sec: positive(self.crawl_speed, defaults.speed_px_per_sec),
            trailing_margin_px: if self.crawl_trailing_margin.is_finite() {
                self.crawl_trailing_margin.max(0.0)
            } else {
                defaults.trailing_margin_px
            },
            fallback_duration: Duration::from_millis(self.crawl_fallback_duration_ms.max(1)),
            settle_frames: self.crawl_settle_frames.max(1),
            search: SearchLimits {
                max_iterations: self.crawl_search_iterations.max(1),
                tolerance_px: positive(self.crawl_search_tolerance, defaults.search.tolerance_px),
                max_step_px: positive(self.crawl_search_max_step, defaults.search.max_step_px),
            },
            start_guard: Duration::from_millis(self.crawl_start_guard_ms),
            language_settle: Duration::from_millis(self.crawl_language_settle_ms),
        }
    }

    pub fn music_volume_clamped(&self) -> f32 {
        if self.music_volume.is_finite() {
            self.music_volume.clamp(0.0, 1.0)
        } else {
            crate::config::defaults::default_music_volume()
        }
    }
}

/// Theme mode.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeMode {
    Day,
    Night,
}

impl Default for ThemeMode {
    fn default() -> Self {
        ThemeMode::Night
    }
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Day => ThemeMode::Night,
            ThemeMode::Night => ThemeMode::Day,
        }
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ThemeMode::Day => "Day",
            ThemeMode::Night => "Night",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Debug
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
